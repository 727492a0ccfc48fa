use crate::error::SourceError;
use crate::http::{check_status, HttpClient};
use serde::{Deserialize, Serialize};
use set_creator_models::{ItemKey, ListItem};
use tracing::debug;

pub const TRAKT_API_URL: &str = "https://api.trakt.tv";
const PAGE_COUNT_HEADER: &str = "X-Pagination-Page-Count";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraktIds {
    pub trakt: Option<u64>,
    pub slug: Option<String>,
    pub imdb: Option<String>,
    pub tmdb: Option<u32>,
    pub tvdb: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraktMedia {
    #[serde(default)]
    pub title: Option<String>,
    pub year: Option<u32>,
    #[serde(default)]
    pub ids: TraktIds,
}

/// One entry of `GET /users/{user}/lists/{list}/items`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraktListItem {
    #[serde(rename = "type")]
    pub item_type: String,
    pub movie: Option<TraktMedia>,
    pub show: Option<TraktMedia>,
}

/// One page of list items plus the page count Trakt reports for the list
#[derive(Debug)]
pub struct TraktPage {
    pub items: Vec<TraktListItem>,
    pub page_count: Option<u32>,
}

impl TraktListItem {
    /// Movies are keyed by TMDb ID; shows, seasons and episodes all collapse
    /// to their show, keyed by TVDb ID. Other types (people) are skipped.
    pub fn to_list_item(&self) -> Option<ListItem> {
        match self.item_type.as_str() {
            "movie" => {
                let movie = self.movie.as_ref()?;
                let title = movie.title.clone().unwrap_or_default();
                let key = ItemKey::from_id_or_title(movie.ids.tmdb, &title);
                Some(ListItem::movie(key, title, movie.year))
            }
            "show" | "season" | "episode" => {
                let show = self.show.as_ref()?;
                let title = show.title.clone().unwrap_or_default();
                let key = ItemKey::from_id_or_title(show.ids.tvdb, &title);
                Some(ListItem::show(key, title, show.year))
            }
            other => {
                debug!(item_type = %other, "Skipping unsupported Trakt list item");
                None
            }
        }
    }
}

/// Fetch one page of a list's items; `page` is omitted for the first request
pub async fn get_list_items(
    http: &HttpClient,
    base_url: &str,
    path: &str,
    client_id: &str,
    access_token: &str,
    page: Option<u32>,
) -> Result<TraktPage, SourceError> {
    let url = format!("{}{}/items", base_url, path);
    let mut request = http
        .get(&url)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {}", access_token))
        .header("trakt-api-version", "2")
        .header("trakt-api-key", client_id);
    if let Some(page) = page {
        request = request.query(&[("page", page)]);
    }

    let response = check_status(http.send(request).await?)?;

    let page_count = response
        .headers()
        .get(PAGE_COUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u32>().ok());

    let body = response.text().await?;
    let items: Vec<TraktListItem> = serde_json::from_str(&body)
        .map_err(|_| SourceError::invalid_response("Trakt", None))?;

    Ok(TraktPage { items, page_count })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_list_item_keys() {
        let items: Vec<TraktListItem> = serde_json::from_str(
            r#"[
                {"rank": 1, "type": "movie", "movie": {"title": "Elf", "year": 2003, "ids": {"trakt": 1, "slug": "elf-2003", "imdb": "tt0319343", "tmdb": 10719}}},
                {"rank": 2, "type": "show", "show": {"title": "Dash & Lily", "year": 2020, "ids": {"trakt": 2, "tvdb": 378192, "tmdb": 110084}}},
                {"rank": 3, "type": "episode", "episode": {"season": 1, "number": 1}, "show": {"title": "Dash & Lily", "year": 2020, "ids": {"tvdb": 378192}}},
                {"rank": 4, "type": "movie", "movie": {"title": "Obscure", "year": null, "ids": {"trakt": 9, "tmdb": null}}},
                {"rank": 5, "type": "person", "person": {"name": "Someone"}}
            ]"#,
        )
        .unwrap();

        let converted: Vec<Option<ListItem>> = items.iter().map(|i| i.to_list_item()).collect();
        assert_eq!(converted[0], Some(ListItem::movie(ItemKey::Id(10719), "Elf", Some(2003))));
        let dash_and_lily = ListItem::show(ItemKey::Id(378192), "Dash & Lily", Some(2020));
        assert_eq!(converted[1], Some(dash_and_lily.clone()));
        assert_eq!(converted[2], Some(dash_and_lily));
        assert_eq!(
            converted[3],
            Some(ListItem::movie(ItemKey::Title("Obscure".to_string()), "Obscure", None))
        );
        assert_eq!(converted[4], None);
    }
}
