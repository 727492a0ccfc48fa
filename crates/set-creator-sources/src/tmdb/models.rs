use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

/// Movie as it appears in collection parts, list items and find results
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbShow {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbCollection {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parts: Vec<TmdbMovie>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbCollectionRef {
    pub id: u32,
}

#[derive(Debug, Deserialize)]
pub struct TmdbMovieDetails {
    pub id: u32,
    #[serde(default)]
    pub belongs_to_collection: Option<TmdbCollectionRef>,
}

/// Entry of a user list; `media_type` decides which fields are present
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "media_type", rename_all = "lowercase")]
pub enum TmdbListEntry {
    Movie(TmdbMovie),
    Tv(TmdbShow),
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct TmdbListPage {
    #[serde(default)]
    pub items: Vec<TmdbListEntry>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbExternalIds {
    #[serde(default)]
    pub tvdb_id: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbFindResult {
    #[serde(default)]
    pub movie_results: Vec<TmdbMovie>,
    #[serde(default)]
    pub tv_results: Vec<TmdbShow>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbSeasonSummary {
    pub season_number: u32,
}

#[derive(Debug, Deserialize)]
pub struct TmdbShowDetails {
    pub id: u32,
    #[serde(default)]
    pub seasons: Vec<TmdbSeasonSummary>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbEpisode {
    pub episode_number: u32,
}

#[derive(Debug, Deserialize)]
pub struct TmdbSeasonDetails {
    #[serde(default)]
    pub episodes: Vec<TmdbEpisode>,
}

/// Year of a `YYYY-MM-DD` date; empty or malformed dates have no year
pub fn year_of(date: Option<&str>) -> Option<u32> {
    let date = date?.trim();
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|d| u32::try_from(d.year()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_of() {
        assert_eq!(year_of(Some("1999-03-30")), Some(1999));
        assert_eq!(year_of(Some("")), None);
        assert_eq!(year_of(Some("sometime")), None);
        assert_eq!(year_of(None), None);
    }

    #[test]
    fn test_list_entries_by_media_type() {
        let page: TmdbListPage = serde_json::from_str(
            r#"{
                "items": [
                    {"media_type": "movie", "id": 603, "title": "The Matrix", "release_date": "1999-03-30"},
                    {"media_type": "tv", "id": 1396, "name": "Breaking Bad", "first_air_date": "2008-01-20"},
                    {"media_type": "person", "id": 6384, "name": "Keanu Reeves"}
                ],
                "page": 1,
                "total_pages": 1
            }"#,
        )
        .unwrap();

        assert!(matches!(&page.items[0], TmdbListEntry::Movie(m) if m.id == 603));
        assert!(matches!(&page.items[1], TmdbListEntry::Tv(s) if s.id == 1396));
        assert!(matches!(&page.items[2], TmdbListEntry::Other));
    }
}
