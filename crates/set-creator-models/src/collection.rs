use crate::{ItemKey, ListItem, MediaKind};
use std::collections::HashMap;

/// Items keyed by [`ItemKey`], in first-seen order
///
/// Inserting a key that is already present is a no-op: the first title and
/// year seen for a key are the ones kept.
#[derive(Debug, Clone, Default)]
pub struct MediaCollection {
    items: Vec<ListItem>,
    index: HashMap<ItemKey, usize>,
}

impl MediaCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the item was added, `false` if its key was already present
    pub fn insert(&mut self, item: ListItem) -> bool {
        if self.index.contains_key(&item.key) {
            return false;
        }
        self.index.insert(item.key.clone(), self.items.len());
        self.items.push(item);
        true
    }

    pub fn get(&self, key: &ItemKey) -> Option<&ListItem> {
        self.index.get(key).map(|&i| &self.items[i])
    }

    pub fn contains(&self, key: &ItemKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ListItem> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a MediaCollection {
    type Item = &'a ListItem;
    type IntoIter = std::slice::Iter<'a, ListItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Everything fetched from a list, split by media kind
#[derive(Debug, Clone, Default)]
pub struct ListItems {
    pub movies: MediaCollection,
    pub shows: MediaCollection,
}

impl ListItems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route the item to the movie or show collection
    pub fn insert(&mut self, item: ListItem) -> bool {
        match item.kind {
            MediaKind::Movie => self.movies.insert(item),
            MediaKind::Show => self.shows.insert(item),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty() && self.shows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.movies.len() + self.shows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_occurrence() {
        let mut collection = MediaCollection::new();
        assert!(collection.insert(ListItem::movie(ItemKey::Id(11), "Star Wars", Some(1977))));
        assert!(!collection.insert(ListItem::movie(
            ItemKey::Id(11),
            "Star Wars: A New Hope",
            Some(1997)
        )));

        assert_eq!(collection.len(), 1);
        let kept = collection.get(&ItemKey::Id(11)).unwrap();
        assert_eq!(kept.title, "Star Wars");
        assert_eq!(kept.year, Some(1977));
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut collection = MediaCollection::new();
        collection.insert(ListItem::movie(ItemKey::Id(3), "C", None));
        collection.insert(ListItem::movie(ItemKey::Id(1), "A", None));
        collection.insert(ListItem::movie(ItemKey::Title("B".to_string()), "B", None));
        collection.insert(ListItem::movie(ItemKey::Id(3), "C again", None));

        let titles: Vec<&str> = collection.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_list_items_routes_by_kind() {
        let mut items = ListItems::new();
        assert!(items.is_empty());

        items.insert(ListItem::movie(ItemKey::Id(603), "The Matrix", Some(1999)));
        items.insert(ListItem::show(ItemKey::Id(81189), "Breaking Bad", Some(2008)));
        // Same numeric key in a different collection is a different item
        items.insert(ListItem::show(ItemKey::Id(603), "Some Show", Some(2001)));

        assert_eq!(items.movies.len(), 1);
        assert_eq!(items.shows.len(), 2);
        assert_eq!(items.len(), 3);
        assert!(!items.is_empty());
    }
}
