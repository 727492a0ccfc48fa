pub mod collection;
pub mod media;
pub mod show_detail;

pub use collection::{ListItems, MediaCollection};
pub use media::{ItemKey, ListItem, MediaKind};
pub use show_detail::{SeasonDetail, ShowDetail};
