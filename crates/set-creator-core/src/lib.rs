pub mod creator;
pub mod emit;
pub mod error;
pub mod expand;
pub mod resolve;

pub use creator::{CreateOptions, RunSummary, SetCreator};
pub use emit::{DocumentWriter, PlaceholderFlags};
pub use error::CreateError;
pub use expand::expand_shows;
pub use resolve::resolve_imdb_ids;
