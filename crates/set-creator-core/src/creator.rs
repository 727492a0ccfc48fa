use crate::emit::{DocumentWriter, PlaceholderFlags};
use crate::error::CreateError;
use crate::expand::expand_shows;
use crate::resolve::resolve_imdb_ids;
use serde::Serialize;
use set_creator_config::{Config, PathManager};
use set_creator_models::ListItems;
use set_creator_sources::http::{HttpClient, DEFAULT_TIMEOUT_SECS};
use set_creator_sources::imdb::client::DEFAULT_PAGE_DELAY;
use set_creator_sources::tmdb::client::TMDB_API_URL;
use set_creator_sources::trakt::api::TRAKT_API_URL;
use set_creator_sources::{
    HttpSettings, ImdbClient, ListSource, MdbListClient, TmdbClient, TraktClient,
};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Serialize)]
pub struct CreateOptions {
    pub url: Option<String>,
    pub season: bool,
    pub episode: bool,
    #[serde(skip)]
    pub timeout: Duration,
    pub log_requests: bool,
    /// Pause between IMDb page requests
    #[serde(skip)]
    pub imdb_page_delay: Duration,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self {
            url: None,
            season: false,
            episode: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_requests: false,
            imdb_page_delay: DEFAULT_PAGE_DELAY,
        }
    }
}

impl CreateOptions {
    pub fn placeholder_flags(&self) -> PlaceholderFlags {
        PlaceholderFlags {
            season: self.season,
            episode: self.episode,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub provider: String,
    pub list_url: String,
    pub movies: usize,
    pub shows: usize,
    /// IMDb IDs that could not be matched
    pub unresolved: Vec<String>,
    pub files: Vec<PathBuf>,
    pub duration_secs: f64,
}

/// Runs one list URL through fetch, resolution, expansion and writing
pub struct SetCreator {
    config: Config,
    paths: PathManager,
    options: CreateOptions,
    tmdb_base_url: String,
    trakt_base_url: String,
}

impl SetCreator {
    pub fn new(config: Config, paths: PathManager, options: CreateOptions) -> Self {
        Self {
            config,
            paths,
            options,
            tmdb_base_url: TMDB_API_URL.to_string(),
            trakt_base_url: TRAKT_API_URL.to_string(),
        }
    }

    pub fn with_tmdb_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.tmdb_base_url = base_url.into();
        self
    }

    pub fn with_trakt_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.trakt_base_url = base_url.into();
        self
    }

    pub fn options(&self) -> &CreateOptions {
        &self.options
    }

    #[instrument(skip(self), fields(url = ?self.options.url))]
    pub async fn run(&self) -> Result<RunSummary, CreateError> {
        let start = Instant::now();

        let tmdb_credentials = self.config.tmdb()?;
        let source = ListSource::parse(self.options.url.as_deref().unwrap_or_default())?;
        let trakt_credentials = match source {
            ListSource::Trakt { .. } => Some(self.config.trakt()?),
            _ => None,
        };

        let mut settings = HttpSettings::new(self.options.timeout, self.options.log_requests)
            .with_secret(tmdb_credentials.apikey.clone());
        if let Some(trakt) = &trakt_credentials {
            settings = settings
                .with_secret(trakt.client_id.clone())
                .with_secret(trakt.access_token.clone());
        }
        let http = HttpClient::new(&settings)?;

        let tmdb = TmdbClient::with_base_url(http.clone(), &tmdb_credentials, &self.tmdb_base_url);
        tmdb.validate().await?;

        info!("Fetching {} list {}", source.provider_name(), source.list_url());
        let mut unresolved = Vec::new();
        let items = match &source {
            ListSource::Trakt { list_url, path } => {
                let credentials = self.config.trakt()?;
                TraktClient::with_base_url(http.clone(), &credentials, &self.trakt_base_url)
                    .fetch_list(list_url, path)
                    .await?
            }
            ListSource::MdbList(target) => {
                MdbListClient::new(http.clone()).fetch_list(target).await?
            }
            ListSource::Tmdb { target, .. } => tmdb.fetch_list(*target).await?,
            ListSource::Imdb(target) => {
                let ids = ImdbClient::new(http.clone())
                    .with_page_delay(self.options.imdb_page_delay)
                    .fetch_ids(target)
                    .await?;
                info!("Found {} IMDb IDs", ids.len());
                let resolution = resolve_imdb_ids(&tmdb, &ids).await;
                unresolved = resolution.unresolved;
                resolution.items
            }
        };

        let files = self.write(&tmdb, &items, source.list_url()).await?;

        Ok(RunSummary {
            provider: source.provider_name().to_string(),
            list_url: source.list_url().to_string(),
            movies: items.movies.len(),
            shows: items.shows.len(),
            unresolved,
            files,
            duration_secs: start.elapsed().as_secs_f64(),
        })
    }

    async fn write(
        &self,
        tmdb: &TmdbClient,
        items: &ListItems,
        list_url: &str,
    ) -> Result<Vec<PathBuf>, CreateError> {
        if items.is_empty() {
            return Err(CreateError::EmptyList(format!("No items found at {}", list_url)));
        }
        info!("Collected {} movies and {} shows", items.movies.len(), items.shows.len());

        let flags = self.options.placeholder_flags();
        let details = expand_shows(tmdb, &items.shows, flags).await;
        debug!(expanded = details.len(), "Show expansion finished");

        DocumentWriter::new(self.paths.clone()).write(items, &details, flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};
    use set_creator_sources::SourceError;
    use std::path::Path;
    use tempfile::TempDir;

    const CONFIG: &str = "\
tmdb:
  apikey: key
trakt:
  client_id: cid
  authorization:
    access_token: tok
";

    fn creator(dir: &Path, url: &str, server: &ServerGuard, options: CreateOptions) -> SetCreator {
        let config = Config::from_yaml_str(&dir.join("config.yml"), CONFIG).unwrap();
        let options = CreateOptions {
            url: Some(url.to_string()),
            ..options
        };
        SetCreator::new(config, PathManager::new(dir), options)
            .with_tmdb_base_url(server.url())
            .with_trakt_base_url(server.url())
    }

    async fn mock_configuration(server: &mut ServerGuard) -> mockito::Mock {
        server
            .mock("GET", "/configuration")
            .match_query(Matcher::UrlEncoded("api_key".into(), "key".into()))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_tmdb_collection_writes_movie_pair() {
        let mut server = Server::new_async().await;
        let _config = mock_configuration(&mut server).await;
        let _collection = server
            .mock("GET", "/collection/10")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"id": 10, "parts": [
                    {"id": 11, "title": "Star Wars", "release_date": "1977-05-25"},
                    {"id": 1891, "title": "The Empire Strikes Back", "release_date": "1980-05-20"}
                ]}"#,
            )
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let summary = creator(
            dir.path(),
            "https://www.themoviedb.org/collection/10-star-wars-collection",
            &server,
            CreateOptions::default(),
        )
        .run()
        .await
        .unwrap();

        assert_eq!(summary.provider, "TMDb");
        assert_eq!(summary.movies, 2);
        assert_eq!(summary.shows, 0);
        assert_eq!(summary.files.len(), 2);

        let paths = PathManager::new(dir.path());
        let list: serde_yaml::Value =
            serde_yaml::from_str(&std::fs::read_to_string(paths.movie_list_file()).unwrap())
                .unwrap();
        assert_eq!(list["metadata"]["Star Wars (1977)"]["template"]["id"].as_u64(), Some(11));
        let set: serde_yaml::Value =
            serde_yaml::from_str(&std::fs::read_to_string(paths.movie_set_file()).unwrap())
                .unwrap();
        assert!(set["set"].get("The Empire Strikes Back (1980)").is_some());
        assert!(!paths.show_list_file().exists());
    }

    #[tokio::test]
    async fn test_trakt_shows_with_seasons() {
        let mut server = Server::new_async().await;
        let _config = mock_configuration(&mut server).await;
        let _items = server
            .mock("GET", "/users/a/lists/b/items")
            .match_header("trakt-api-key", "cid")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"type": "show", "show": {"title": "Breaking Bad", "year": 2008, "ids": {"tvdb": 81189}}}]"#,
            )
            .create_async()
            .await;
        let _find = server
            .mock("GET", "/find/81189")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"movie_results": [], "tv_results": [{"id": 1396, "name": "Breaking Bad"}]}"#)
            .create_async()
            .await;
        let _show = server
            .mock("GET", "/tv/1396")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"id": 1396, "seasons": [{"season_number": 1}]}"#)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let options = CreateOptions {
            season: true,
            ..CreateOptions::default()
        };
        let summary = creator(dir.path(), "https://trakt.tv/users/a/lists/b", &server, options)
            .run()
            .await
            .unwrap();

        assert_eq!(summary.shows, 1);
        let paths = PathManager::new(dir.path());
        let set: serde_yaml::Value =
            serde_yaml::from_str(&std::fs::read_to_string(paths.show_set_file()).unwrap())
                .unwrap();
        let show = &set["set"]["Breaking Bad (2008)"];
        assert!(show.get("poster_tpdb").is_some());
        assert!(show["seasons"].get(1usize).is_some());
        assert!(!paths.movie_list_file().exists());
    }

    #[tokio::test]
    async fn test_empty_list_writes_nothing() {
        let mut server = Server::new_async().await;
        let _config = mock_configuration(&mut server).await;
        let _list = server
            .mock("GET", "/list/7")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"page": 1, "total_pages": 1, "items": []}"#)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let url = "https://www.themoviedb.org/list/7";
        let err = creator(dir.path(), url, &server, CreateOptions::default())
            .run()
            .await
            .unwrap_err();

        assert!(matches!(err, CreateError::Source(ref e) if e.is_empty_list()));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_unsupported_url() {
        let server = Server::new_async().await;
        let dir = TempDir::new().unwrap();
        let err = creator(dir.path(), "https://example.com/list", &server, CreateOptions::default())
            .run()
            .await
            .unwrap_err();

        assert!(matches!(err, CreateError::Source(SourceError::InvalidUrl(_))));
        assert_eq!(err.to_string(), "URL Invalid: https://example.com/list");
    }

    #[tokio::test]
    async fn test_trakt_requires_credentials() {
        let server = Server::new_async().await;
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        let config = Config::from_yaml_str(&config_path, "tmdb:\n  apikey: key\n").unwrap();
        let options = CreateOptions {
            url: Some("https://trakt.tv/users/a/lists/b".to_string()),
            ..CreateOptions::default()
        };
        let err = SetCreator::new(config, PathManager::new(dir.path()), options)
            .with_tmdb_base_url(server.url())
            .run()
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "trakt attribute not in config");
    }

    #[tokio::test]
    async fn test_tmdb_connection_failure() {
        let mut server = Server::new_async().await;
        let _config = server
            .mock("GET", "/configuration")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let err = creator(
            dir.path(),
            "https://www.themoviedb.org/collection/10",
            &server,
            CreateOptions::default(),
        )
        .run()
        .await
        .unwrap_err();

        assert!(err.to_string().contains("Connection Failed"));
    }
}
