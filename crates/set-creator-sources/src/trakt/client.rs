use crate::error::SourceError;
use crate::http::HttpClient;
use crate::trakt::api::{self, TRAKT_API_URL};
use set_creator_config::TraktCredentials;
use set_creator_models::ListItems;
use tracing::{debug, info};

const PROVIDER: &str = "Trakt";

#[derive(Clone)]
pub struct TraktClient {
    http: HttpClient,
    base_url: String,
    client_id: String,
    access_token: String,
}

impl TraktClient {
    pub fn new(http: HttpClient, credentials: &TraktCredentials) -> Self {
        Self::with_base_url(http, credentials, TRAKT_API_URL)
    }

    /// Point the client at another API host (tests)
    pub fn with_base_url(
        http: HttpClient,
        credentials: &TraktCredentials,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client_id: credentials.client_id.clone(),
            access_token: credentials.access_token.clone(),
        }
    }

    /// Fetch every page of the list at `path` (e.g. `/users/me/lists/foo`)
    ///
    /// The first request is sent without a page number; when Trakt reports
    /// more than one page the rest are requested explicitly. Any HTTP error
    /// is reported as the list not being found.
    pub async fn fetch_list(&self, list_url: &str, path: &str) -> Result<ListItems, SourceError> {
        let not_found = |e: SourceError| match e {
            SourceError::Http { .. } => {
                debug!(error = %e, "Trakt list request failed");
                SourceError::not_found(PROVIDER, format!("List {} not found", list_url))
            }
            other => other,
        };

        let first = api::get_list_items(
            &self.http,
            &self.base_url,
            path,
            &self.client_id,
            &self.access_token,
            None,
        )
        .await
        .map_err(not_found)?;
        let pages = first.page_count.unwrap_or(1).max(1);
        debug!(path = %path, pages, "Fetched first Trakt page");

        let mut raw_items = first.items;
        for page in 2..=pages {
            let next = api::get_list_items(
                &self.http,
                &self.base_url,
                path,
                &self.client_id,
                &self.access_token,
                Some(page),
            )
            .await
            .map_err(not_found)?;
            raw_items.extend(next.items);
        }

        if raw_items.is_empty() {
            return Err(SourceError::empty_list(PROVIDER, format!("List {} is empty", list_url)));
        }

        let mut items = ListItems::new();
        for raw in &raw_items {
            if let Some(item) = raw.to_list_item() {
                items.insert(item);
            }
        }

        info!(
            "Fetched {} Trakt list entries: {} movies, {} shows",
            raw_items.len(),
            items.movies.len(),
            items.shows.len()
        );
        Ok(items)
    }
}
