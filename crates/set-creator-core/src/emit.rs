//! Output documents
//!
//! `movie_list.yml` / `show_list.yml` map each display title to an `images`
//! template with its ID; `movie_set.yml` / `show_set.yml` hold the empty
//! poster placeholders to be filled in by hand.

use crate::error::CreateError;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use set_creator_config::PathManager;
use set_creator_models::{ItemKey, ListItems, MediaCollection, ShowDetail};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

const UNKNOWN_ID: &str = "???";

/// Which season/episode placeholders the show set carries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlaceholderFlags {
    pub season: bool,
    pub episode: bool,
}

impl PlaceholderFlags {
    pub fn any(&self) -> bool {
        self.season || self.episode
    }
}

fn key(name: &str) -> Value {
    Value::String(name.to_string())
}

/// `{poster_tpdb: null}`
fn placeholder() -> Mapping {
    let mut map = Mapping::new();
    map.insert(key("poster_tpdb"), Value::Null);
    map
}

fn id_value(item_key: &ItemKey) -> Value {
    match item_key {
        ItemKey::Id(id) => Value::Number((*id).into()),
        ItemKey::Title(_) => key(UNKNOWN_ID),
    }
}

fn document(root: &str, body: Mapping) -> Value {
    let mut doc = Mapping::new();
    doc.insert(key(root), Value::Mapping(body));
    Value::Mapping(doc)
}

/// `metadata: {"Title (Year)": {template: {name: images, id: N}}}`
pub fn list_document(items: &MediaCollection) -> Value {
    let mut metadata = Mapping::new();
    for item in items {
        let mut template = Mapping::new();
        template.insert(key("name"), key("images"));
        template.insert(key("id"), id_value(&item.key));

        let mut entry = Mapping::new();
        entry.insert(key("template"), Value::Mapping(template));
        metadata.insert(key(&item.display_title()), Value::Mapping(entry));
    }
    document("metadata", metadata)
}

pub fn movie_set_document(movies: &MediaCollection) -> Value {
    let mut set = Mapping::new();
    for movie in movies {
        set.insert(key(&movie.display_title()), Value::Mapping(placeholder()));
    }
    document("set", set)
}

/// Show placeholders, with a `seasons` tree for shows that have details
/// when either flag is set
pub fn show_set_document(
    shows: &MediaCollection,
    details: &HashMap<u32, ShowDetail>,
    flags: PlaceholderFlags,
) -> Value {
    let mut set = Mapping::new();
    for show in shows {
        let mut entry = placeholder();
        let detail = show.key.id().and_then(|id| details.get(&id));
        if let (true, Some(detail)) = (flags.any(), detail) {
            if let Some(seasons) = seasons_value(detail, flags) {
                entry.insert(key("seasons"), seasons);
            }
        }
        set.insert(key(&show.display_title()), Value::Mapping(entry));
    }
    document("set", set)
}

fn seasons_value(detail: &ShowDetail, flags: PlaceholderFlags) -> Option<Value> {
    if detail.seasons.is_empty() {
        return None;
    }

    let mut seasons = Mapping::new();
    for season in &detail.seasons {
        let season_entry = if flags.episode {
            let mut episodes = Mapping::new();
            for episode in &season.episodes {
                episodes.insert(Value::Number((*episode).into()), Value::Mapping(placeholder()));
            }
            let mut entry = if flags.season { placeholder() } else { Mapping::new() };
            entry.insert(key("episodes"), Value::Mapping(episodes));
            entry
        } else {
            placeholder()
        };
        seasons.insert(Value::Number(season.number.into()), Value::Mapping(season_entry));
    }
    Some(Value::Mapping(seasons))
}

/// Writes the document pairs into the config directory
pub struct DocumentWriter {
    paths: PathManager,
}

impl DocumentWriter {
    pub fn new(paths: PathManager) -> Self {
        Self { paths }
    }

    /// Movie files are written only when there are movies, show files only
    /// when there are shows. Returns the paths written.
    pub fn write(
        &self,
        items: &ListItems,
        details: &HashMap<u32, ShowDetail>,
        flags: PlaceholderFlags,
    ) -> Result<Vec<PathBuf>, CreateError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let dir = self.paths.config_dir();
        std::fs::create_dir_all(dir).map_err(|e| CreateError::io(dir, e))?;

        let mut written = Vec::new();
        if !items.movies.is_empty() {
            written.push(write_yaml(
                &self.paths.movie_list_file(),
                &list_document(&items.movies),
            )?);
            written.push(write_yaml(
                &self.paths.movie_set_file(),
                &movie_set_document(&items.movies),
            )?);
        }
        if !items.shows.is_empty() {
            written.push(write_yaml(&self.paths.show_list_file(), &list_document(&items.shows))?);
            written.push(write_yaml(
                &self.paths.show_set_file(),
                &show_set_document(&items.shows, details, flags),
            )?);
        }
        Ok(written)
    }
}

fn write_yaml(path: &Path, doc: &Value) -> Result<PathBuf, CreateError> {
    let content = serde_yaml::to_string(doc)?;
    std::fs::write(path, content).map_err(|e| CreateError::io(path, e))?;
    info!("Saved {}", path.display());
    Ok(path.to_path_buf())
}
