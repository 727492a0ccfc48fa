use crate::dispatch::TmdbTarget;
use crate::error::SourceError;
use crate::http::{check_status, HttpClient};
use crate::tmdb::models::*;
use crate::traits::MetadataLookup;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use set_creator_config::TmdbCredentials;
use set_creator_models::{ItemKey, ListItem, ListItems, SeasonDetail};
use tracing::{debug, info, warn};

pub const TMDB_API_URL: &str = "https://api.themoviedb.org/3";
const PROVIDER: &str = "TMDb";

/// TMDb v3 client authenticated with an API key
#[derive(Clone)]
pub struct TmdbClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
    language: String,
}

impl TmdbClient {
    pub fn new(http: HttpClient, credentials: &TmdbCredentials) -> Self {
        Self::with_base_url(http, credentials, TMDB_API_URL)
    }

    /// Point the client at another API host (tests)
    pub fn with_base_url(
        http: HttpClient,
        credentials: &TmdbCredentials,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: credentials.apikey.clone(),
            language: credentials.language.clone(),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let request = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .query(&[("api_key", self.api_key.as_str()), ("language", self.language.as_str())])
            .query(params);
        let response = check_status(self.http.send(request).await?)?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            debug!(endpoint = %endpoint, error = %e, "Failed to decode TMDb response");
            SourceError::invalid_response(PROVIDER, None)
        })
    }

    /// Check the API key with a cheap authenticated request
    pub async fn validate(&self) -> Result<(), SourceError> {
        match self.get::<serde_json::Value>("/configuration", &[]).await {
            Ok(_) => {
                info!("TMDb Connection Successful");
                Ok(())
            }
            Err(e) => {
                tracing::error!("TMDb Connection Failed");
                Err(SourceError::provider(PROVIDER, format!("Connection Failed: {}", e)))
            }
        }
    }

    pub async fn fetch_list(&self, target: TmdbTarget) -> Result<ListItems, SourceError> {
        let result = match target {
            TmdbTarget::Collection(id) => self.collection(id).await,
            TmdbTarget::Movie(id) => self.movie_collection(id).await,
            TmdbTarget::List(id) => self.list(id).await,
        };
        result.map_err(|e| match e {
            SourceError::NotFound { .. } | SourceError::EmptyList { .. } => e,
            other => SourceError::not_found(
                PROVIDER,
                format!("No Collection found for TMDb ID {}: {}", target.id(), other),
            ),
        })
    }

    pub async fn collection(&self, collection_id: u32) -> Result<ListItems, SourceError> {
        let collection: TmdbCollection = self
            .get(&format!("/collection/{}", collection_id), &[])
            .await?;
        debug!(
            collection_id = collection.id,
            name = ?collection.name,
            parts = collection.parts.len(),
            "Fetched TMDb collection"
        );

        let mut items = ListItems::new();
        for movie in &collection.parts {
            items.insert(movie_item(movie));
        }
        Ok(items)
    }

    /// The collection a movie belongs to
    pub async fn movie_collection(&self, movie_id: u32) -> Result<ListItems, SourceError> {
        let movie: TmdbMovieDetails = self.get(&format!("/movie/{}", movie_id), &[]).await?;
        match movie.belongs_to_collection {
            Some(collection) => self.collection(collection.id).await,
            None => Err(SourceError::not_found(
                PROVIDER,
                format!("No Collection found for TMDb ID {}", movie_id),
            )),
        }
    }

    pub async fn list(&self, list_id: u32) -> Result<ListItems, SourceError> {
        let mut items = ListItems::new();
        let mut page = 1;
        loop {
            let list_page: TmdbListPage = self
                .get(&format!("/list/{}", list_id), &[("page", page.to_string())])
                .await?;
            let total_pages = list_page.total_pages.unwrap_or(1);
            debug!(
                list_id,
                page = list_page.page.unwrap_or(page),
                total_pages,
                "Fetched TMDb list page"
            );

            for entry in &list_page.items {
                match entry {
                    TmdbListEntry::Movie(movie) => {
                        items.insert(movie_item(movie));
                    }
                    TmdbListEntry::Tv(show) => {
                        let item = self.show_item(show).await;
                        items.insert(item);
                    }
                    TmdbListEntry::Other => {}
                }
            }

            if page >= total_pages {
                break;
            }
            page += 1;
        }

        if items.is_empty() {
            return Err(SourceError::empty_list(PROVIDER, format!("List {} is empty", list_id)));
        }
        Ok(items)
    }

    pub async fn tvdb_id(&self, tmdb_show_id: u32) -> Result<Option<u32>, SourceError> {
        let ids: TmdbExternalIds = self
            .get(&format!("/tv/{}/external_ids", tmdb_show_id), &[])
            .await?;
        Ok(ids.tvdb_id.filter(|id| *id > 0))
    }

    /// Show keyed by TVDb ID; falls back to the title when TMDb has none
    async fn show_item(&self, show: &TmdbShow) -> ListItem {
        let title = show.name.clone().unwrap_or_default();
        let tvdb_id = match self.tvdb_id(show.id).await {
            Ok(id) => id,
            Err(e) => {
                warn!(tmdb_id = show.id, error = %e, "Could not look up TVDb ID");
                None
            }
        };
        ListItem::show(
            ItemKey::from_id_or_title(tvdb_id, &title),
            title,
            year_of(show.first_air_date.as_deref()),
        )
    }

    async fn find(&self, external_id: &str, source: &str) -> Result<TmdbFindResult, SourceError> {
        self.get(
            &format!("/find/{}", external_id),
            &[("external_source", source.to_string())],
        )
        .await
    }
}

fn movie_item(movie: &TmdbMovie) -> ListItem {
    ListItem::movie(
        ItemKey::Id(movie.id),
        movie.title.clone().unwrap_or_default(),
        year_of(movie.release_date.as_deref()),
    )
}

#[async_trait]
impl MetadataLookup for TmdbClient {
    async fn find_by_imdb_id(&self, imdb_id: &str) -> Result<Option<ListItem>, SourceError> {
        let result = self.find(imdb_id, "imdb_id").await?;
        if let Some(movie) = result.movie_results.first() {
            return Ok(Some(movie_item(movie)));
        }
        if let Some(show) = result.tv_results.first() {
            return Ok(Some(self.show_item(show).await));
        }
        Ok(None)
    }

    async fn show_seasons(
        &self,
        tvdb_id: u32,
        with_episodes: bool,
    ) -> Result<Vec<SeasonDetail>, SourceError> {
        let result = self.find(&tvdb_id.to_string(), "tvdb_id").await?;
        let show = result.tv_results.first().ok_or_else(|| {
            SourceError::not_found(
                PROVIDER,
                format!("No Results were found for tvdb_id: {}", tvdb_id),
            )
        })?;

        let details: TmdbShowDetails = self.get(&format!("/tv/{}", show.id), &[]).await?;
        let mut seasons = Vec::with_capacity(details.seasons.len());
        for season in &details.seasons {
            let episodes = if with_episodes {
                let endpoint = format!("/tv/{}/season/{}", details.id, season.season_number);
                match self.get::<TmdbSeasonDetails>(&endpoint, &[]).await {
                    Ok(season_details) => {
                        season_details.episodes.iter().map(|e| e.episode_number).collect()
                    }
                    Err(e) => {
                        // keep the seasons built so far
                        tracing::error!(
                            "TMDb Error: Season {} of tvdb_id {} failed: {}",
                            season.season_number,
                            tvdb_id,
                            e
                        );
                        break;
                    }
                }
            } else {
                Vec::new()
            };
            seasons.push(SeasonDetail {
                number: season.season_number,
                episodes,
            });
        }
        Ok(seasons)
    }

    fn lookup_provider_name(&self) -> &str {
        "tmdb"
    }
}
