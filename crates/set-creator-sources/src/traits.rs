use crate::error::SourceError;
use async_trait::async_trait;
use set_creator_models::{ListItem, SeasonDetail};

/// Cross-reference lookups against a metadata database
///
/// Used to turn scraped IMDb IDs into keyed list items and to enumerate the
/// seasons and episodes of a show for placeholder generation.
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    /// Resolve an IMDb ID (`tt...`) to a movie keyed by TMDb ID or a show
    /// keyed by TVDb ID. `Ok(None)` when the database has no match.
    async fn find_by_imdb_id(&self, imdb_id: &str) -> Result<Option<ListItem>, SourceError>;

    /// Seasons of the show with the given TVDb ID. Episode numbers are only
    /// filled in when `with_episodes` is set.
    async fn show_seasons(
        &self,
        tvdb_id: u32,
        with_episodes: bool,
    ) -> Result<Vec<SeasonDetail>, SourceError>;

    fn lookup_provider_name(&self) -> &str;
}
