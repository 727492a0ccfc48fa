use crate::emit::PlaceholderFlags;
use set_creator_models::{ItemKey, MediaCollection, ShowDetail};
use set_creator_sources::{MetadataLookup, ProgressTracker};
use std::collections::HashMap;
use tracing::{debug, error};

/// Season (and episode) layout for every TVDb-keyed show
///
/// Returns nothing when neither placeholder flag is set. A show whose lookup
/// fails is left out of the map and gets a bare placeholder. Title-keyed
/// shows are skipped.
pub async fn expand_shows(
    lookup: &dyn MetadataLookup,
    shows: &MediaCollection,
    flags: PlaceholderFlags,
) -> HashMap<u32, ShowDetail> {
    let mut details = HashMap::new();
    if !flags.any() {
        return details;
    }

    let mut progress = ProgressTracker::new(shows.len(), 10);

    for (idx, show) in shows.iter().enumerate() {
        let tvdb_id = match &show.key {
            ItemKey::Id(id) => *id,
            ItemKey::Title(title) => {
                debug!(title = %title, "No TVDb ID, skipping expansion");
                progress.record_skipped();
                progress.log_progress(idx + 1);
                continue;
            }
        };
        match lookup.show_seasons(tvdb_id, flags.episode).await {
            Ok(seasons) => {
                debug!(tvdb_id, seasons = seasons.len(), "Expanded show");
                details.insert(tvdb_id, ShowDetail { seasons });
                progress.record_resolved();
            }
            Err(e) => {
                error!("{}", e);
                progress.record_failed();
            }
        }
        progress.log_progress(idx + 1);
    }

    progress.log_summary("Show expansion");
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::tests::FakeLookup;
    use set_creator_models::{ListItem, SeasonDetail};

    fn shows() -> MediaCollection {
        let mut shows = MediaCollection::new();
        shows.insert(ListItem::show(ItemKey::Id(81189), "Breaking Bad", Some(2008)));
        shows.insert(ListItem::show(ItemKey::Id(1), "Unknown To TMDb", None));
        shows.insert(ListItem::show(ItemKey::Title("Local Only".into()), "Local Only", None));
        shows
    }

    fn lookup() -> FakeLookup {
        FakeLookup::default().with_seasons(
            81189,
            vec![
                SeasonDetail { number: 1, episodes: vec![1, 2] },
                SeasonDetail { number: 2, episodes: vec![1] },
            ],
        )
    }

    #[tokio::test]
    async fn test_no_flags_no_lookups() {
        let details = expand_shows(&lookup(), &shows(), PlaceholderFlags::default()).await;
        assert!(details.is_empty());
    }

    #[tokio::test]
    async fn test_failed_lookup_is_skipped() {
        let flags = PlaceholderFlags { season: true, episode: false };
        let details = expand_shows(&lookup(), &shows(), flags).await;

        assert_eq!(details.len(), 1);
        let seasons = &details[&81189].seasons;
        assert_eq!(seasons.len(), 2);
        assert!(seasons.iter().all(|s| s.episodes.is_empty()));
    }

    #[tokio::test]
    async fn test_episodes_requested() {
        let flags = PlaceholderFlags { season: false, episode: true };
        let details = expand_shows(&lookup(), &shows(), flags).await;
        assert_eq!(details[&81189].seasons[0].episodes, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_title_keyed_shows_are_not_looked_up() {
        let lookup = lookup();
        let flags = PlaceholderFlags { season: true, episode: true };
        expand_shows(&lookup, &shows(), flags).await;

        assert_eq!(*lookup.season_calls.lock().unwrap(), vec![81189, 1]);
    }
}
