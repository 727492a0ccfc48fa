use crate::dispatch::{ImdbListKind, ImdbTarget};
use crate::error::SourceError;
use crate::http::{check_status, HttpClient};
use crate::imdb::parser;
use crate::paging::Paging;
use reqwest::RequestBuilder;
use std::time::Duration;
use tracing::{debug, info};

const PROVIDER: &str = "IMDb";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";
const USER_AGENT: &str = "Mozilla/5.0 Firefox/102.0";
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(2);

/// Scrapes IMDb list and search pages for title IDs
#[derive(Clone)]
pub struct ImdbClient {
    http: HttpClient,
    page_delay: Duration,
}

impl ImdbClient {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }

    /// Pause between page requests
    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }

    fn request(&self, url: &str) -> RequestBuilder {
        self.http
            .get(url)
            .header("Accept-Language", ACCEPT_LANGUAGE)
            .header("User-Agent", USER_AGENT)
    }

    async fn fetch_page(&self, request: RequestBuilder) -> Result<String, SourceError> {
        let response = check_status(self.http.send(request).await?)?;
        Ok(response.text().await?)
    }

    /// Every IMDb ID on the list, in page order
    ///
    /// The first page is read for the advertised total; the list is then
    /// walked page by page from the query-less base URL.
    pub async fn fetch_ids(&self, target: &ImdbTarget) -> Result<Vec<String>, SourceError> {
        let first = self.fetch_page(self.request(&target.list_url)).await?;
        let total = parser::parse_total(&first, target.kind)?
            .filter(|total| *total > 0)
            .ok_or_else(|| {
                SourceError::ParseUrl(format!(
                    "{} Error: Failed to parse URL: {}",
                    PROVIDER, target.list_url
                ))
            })?;

        let paging = Paging::new(total, target.kind.page_size());
        info!(
            "IMDb list has {} titles across {} pages",
            paging.total(),
            paging.pages()
        );

        let mut ids = Vec::new();
        for page in paging.iter() {
            let params = page_params(target, &paging, page);
            let request = self.request(target.base_url.as_str()).query(&params);
            let html = self.fetch_page(request).await?;

            let mut found = parser::parse_ids(&html)?;
            if target.kind != ImdbListKind::Search && paging.is_last(page) {
                found.truncate(paging.remainder());
            }
            debug!(page, pages = paging.pages(), found = found.len(), "Parsed IMDb page");
            ids.extend(found);

            if !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        if ids.is_empty() {
            return Err(SourceError::empty_list(
                PROVIDER,
                format!("No IMDb IDs Found at {}", target.list_url),
            ));
        }
        Ok(ids)
    }
}

/// Query for one page: the list's own filters plus the kind's page addressing
fn page_params(target: &ImdbTarget, paging: &Paging, page: usize) -> Vec<(String, String)> {
    let mut params = target.params.clone();
    let start = paging.start(page).to_string();
    match target.kind {
        ImdbListKind::Search => {
            params.push(("count".to_string(), paging.page_len(page).to_string()));
            params.push(("start".to_string(), start));
        }
        ImdbListKind::TitleText => params.push(("start".to_string(), start)),
        ImdbListKind::List | ImdbListKind::Other => {
            params.push(("page".to_string(), page.to_string()))
        }
    }
    params
}
