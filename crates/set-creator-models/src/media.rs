use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Movie,
    Show,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Show => write!(f, "show"),
        }
    }
}

/// Identity of a list item
///
/// Movies are keyed by their TMDb ID and shows by their TVDb ID. When the
/// provider has no numeric ID for an item the title is used instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ItemKey {
    Id(u32),
    Title(String),
}

impl ItemKey {
    /// Prefer a non-zero numeric ID, fall back to the title
    pub fn from_id_or_title(id: Option<u32>, title: &str) -> Self {
        match id {
            Some(id) if id > 0 => ItemKey::Id(id),
            _ => ItemKey::Title(title.to_string()),
        }
    }

    pub fn id(&self) -> Option<u32> {
        match self {
            ItemKey::Id(id) => Some(*id),
            ItemKey::Title(_) => None,
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKey::Id(id) => write!(f, "{}", id),
            ItemKey::Title(title) => write!(f, "{}", title),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListItem {
    pub key: ItemKey,
    pub title: String,
    pub year: Option<u32>,
    pub kind: MediaKind,
}

impl ListItem {
    pub fn movie(key: ItemKey, title: impl Into<String>, year: Option<u32>) -> Self {
        Self {
            key,
            title: title.into(),
            year,
            kind: MediaKind::Movie,
        }
    }

    pub fn show(key: ItemKey, title: impl Into<String>, year: Option<u32>) -> Self {
        Self {
            key,
            title: title.into(),
            year,
            kind: MediaKind::Show,
        }
    }

    /// Key used in the output documents: "Title (Year)", or the bare title
    /// when the year is unknown.
    pub fn display_title(&self) -> String {
        match self.year {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_prefers_numeric_id() {
        assert_eq!(ItemKey::from_id_or_title(Some(603), "The Matrix"), ItemKey::Id(603));
        assert_eq!(
            ItemKey::from_id_or_title(None, "The Matrix"),
            ItemKey::Title("The Matrix".to_string())
        );
        // Trakt reports missing IDs as 0 in some payloads
        assert_eq!(
            ItemKey::from_id_or_title(Some(0), "The Matrix"),
            ItemKey::Title("The Matrix".to_string())
        );
    }

    #[test]
    fn test_display_title() {
        let item = ListItem::movie(ItemKey::Id(603), "The Matrix", Some(1999));
        assert_eq!(item.display_title(), "The Matrix (1999)");

        let item = ListItem::show(ItemKey::Title("Untitled".to_string()), "Untitled", None);
        assert_eq!(item.display_title(), "Untitled");
    }
}
