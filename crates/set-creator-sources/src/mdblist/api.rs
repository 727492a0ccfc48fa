use crate::dispatch::MdbListTarget;
use crate::error::SourceError;
use crate::http::{check_status, HttpClient};
use serde::Deserialize;
use serde_json::Value;
use set_creator_models::{ItemKey, ListItem, ListItems};
use tracing::{debug, info};

const PROVIDER: &str = "Mdblist";
const USER_AGENT: &str = "Plex-Meta-Manager";
const EMPTY_LIST_ERRORS: [&str; 2] = ["empty", "empty or private list"];

#[derive(Debug, Deserialize)]
struct MdbListItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    mediatype: Option<String>,
    /// TMDb ID
    #[serde(default)]
    id: Option<u32>,
    #[serde(default)]
    tvdbid: Option<u32>,
    #[serde(default)]
    release_year: Option<u32>,
}

impl MdbListItem {
    fn to_list_item(&self) -> Option<ListItem> {
        let title = self.title.clone().unwrap_or_default();
        match self.mediatype.as_deref() {
            Some("movie") => Some(ListItem::movie(
                ItemKey::from_id_or_title(self.id, &title),
                title,
                self.release_year,
            )),
            Some("show") => Some(ListItem::show(
                ItemKey::from_id_or_title(self.tvdbid, &title),
                title,
                self.release_year,
            )),
            _ => None,
        }
    }
}

/// Reads MDbList's public JSON export of a list
#[derive(Clone)]
pub struct MdbListClient {
    http: HttpClient,
}

impl MdbListClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn fetch_list(&self, target: &MdbListTarget) -> Result<ListItems, SourceError> {
        let request = self
            .http
            .get(target.json_url.as_str())
            .header("User-Agent", USER_AGENT)
            .query(&target.params);
        let response = check_status(self.http.send(request).await?)?;
        let body = response.text().await?;

        let items = parse_list_body(&body)?;
        info!(
            "Fetched MDbList {}: {} movies, {} shows",
            target.list_url,
            items.movies.len(),
            items.shows.len()
        );
        Ok(items)
    }
}

/// Interpret an MDbList JSON body
///
/// Errors are reported in-band, either as `{"error": ...}` or as an array
/// whose first element carries the `error` field.
pub fn parse_list_body(body: &str) -> Result<ListItems, SourceError> {
    let json: Value =
        serde_json::from_str(body).map_err(|_| SourceError::invalid_response(PROVIDER, None))?;

    let error = match &json {
        Value::Object(map) => map.get("error"),
        Value::Array(entries) => entries.first().and_then(|first| first.get("error")),
        _ => None,
    };
    if let Some(error) = error {
        let message = error.as_str().unwrap_or_default();
        if EMPTY_LIST_ERRORS.contains(&message) {
            return Err(SourceError::empty_list(
                PROVIDER,
                "No Items Returned. Lists can take 24 hours to update so try again later.",
            ));
        }
        return Err(SourceError::invalid_response(PROVIDER, Some(&json.to_string())));
    }

    let entries = match json {
        Value::Array(entries) => entries,
        other => {
            return Err(SourceError::invalid_response(PROVIDER, Some(&other.to_string())));
        }
    };
    if entries.is_empty() {
        return Err(SourceError::empty_list(
            PROVIDER,
            "No Items Returned. Lists can take 24 hours to update so try again later.",
        ));
    }

    let mut items = ListItems::new();
    for entry in entries {
        match serde_json::from_value::<MdbListItem>(entry) {
            Ok(raw) => match raw.to_list_item() {
                Some(item) => {
                    items.insert(item);
                }
                None => debug!(mediatype = ?raw.mediatype, "Skipping MDbList entry"),
            },
            Err(e) => debug!(error = %e, "Skipping malformed MDbList entry"),
        }
    }
    Ok(items)
}
