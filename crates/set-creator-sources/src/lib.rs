pub mod dispatch;
pub mod error;
pub mod http;
pub mod imdb;
pub mod mdblist;
pub mod paging;
pub mod progress;
pub mod tmdb;
pub mod traits;
pub mod trakt;

pub use dispatch::{ImdbListKind, ImdbTarget, ListSource, MdbListTarget, TmdbTarget};
pub use error::SourceError;
pub use http::HttpSettings;
pub use imdb::ImdbClient;
pub use mdblist::MdbListClient;
pub use paging::Paging;
pub use progress::ProgressTracker;
pub use tmdb::TmdbClient;
pub use traits::MetadataLookup;
pub use trakt::TraktClient;
