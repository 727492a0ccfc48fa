use set_creator_models::ListItems;
use set_creator_sources::{MetadataLookup, ProgressTracker};
use tracing::{debug, error};

/// Result of turning scraped IMDb IDs into keyed list items
#[derive(Debug, Default)]
pub struct ImdbResolution {
    pub items: ListItems,
    /// IDs the lookup had no match for or failed on, in list order
    pub unresolved: Vec<String>,
}

/// Look up each IMDb ID in order; the first item seen for a key wins
///
/// Lookup failures are logged and skipped, they never end the run.
pub async fn resolve_imdb_ids(lookup: &dyn MetadataLookup, imdb_ids: &[String]) -> ImdbResolution {
    let mut resolution = ImdbResolution::default();
    let mut progress = ProgressTracker::new(imdb_ids.len(), 25);

    for (idx, imdb_id) in imdb_ids.iter().enumerate() {
        match lookup.find_by_imdb_id(imdb_id).await {
            Ok(Some(item)) => {
                debug!(imdb_id = %imdb_id, key = %item.key, kind = %item.kind, "Resolved IMDb ID");
                if resolution.items.insert(item) {
                    progress.record_resolved();
                } else {
                    progress.record_duplicate();
                }
            }
            Ok(None) => {
                error!("TMDb Error: No TMDb ID found for IMDb ID {}", imdb_id);
                progress.record_failed_with_error("no match");
                resolution.unresolved.push(imdb_id.clone());
            }
            Err(e) => {
                debug!(
                    imdb_id = %imdb_id,
                    error = %e,
                    "{} lookup failed",
                    lookup.lookup_provider_name()
                );
                error!("TMDb Error: No TMDb ID found for IMDb ID {}", imdb_id);
                progress.record_failed_with_error("lookup error");
                resolution.unresolved.push(imdb_id.clone());
            }
        }
        progress.log_progress(idx + 1);
    }

    progress.log_summary("IMDb ID resolution");
    resolution
}
