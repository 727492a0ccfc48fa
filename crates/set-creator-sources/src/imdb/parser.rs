//! HTML scraping for IMDb list and search pages
//!
//! Documents are parsed and dropped inside these functions; `scraper::Html`
//! is not `Send` and must not live across an await point.

use crate::dispatch::ImdbListKind;
use crate::error::SourceError;
use regex::Regex;
use scraper::{Html, Selector};

const PROVIDER: &str = "IMDb";
const ID_SELECTOR: &str = r#"div[class*="lister-item-image"] a img[data-tconst]"#;

fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css)
        .map_err(|e| SourceError::provider(PROVIDER, format!("Bad selector {}: {:?}", css, e)))
}

/// Title count advertised on the first page ("1,234 titles"), if any
pub fn parse_total(html: &str, kind: ImdbListKind) -> Result<Option<usize>, SourceError> {
    let total_re = Regex::new(r"(\d+) title")
        .map_err(|e| SourceError::provider(PROVIDER, e.to_string()))?;
    let selector = selector(kind.total_selector())?;
    let document = Html::parse_document(html);

    for element in document.select(&selector) {
        let text: String = element.text().collect();
        if !text.contains("title") {
            continue;
        }
        let text = text.replace(',', "");
        if let Some(total) = total_re
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
        {
            return Ok(Some(total));
        }
    }
    Ok(None)
}

/// `tt` IDs in page order
pub fn parse_ids(html: &str) -> Result<Vec<String>, SourceError> {
    let selector = selector(ID_SELECTOR)?;
    let document = Html::parse_document(html);
    Ok(document
        .select(&selector)
        .filter_map(|img| img.value().attr("data-tconst"))
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect())
}
