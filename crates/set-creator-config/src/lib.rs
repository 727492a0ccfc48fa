pub mod config;
pub mod error;
pub mod paths;

pub use config::{Config, TmdbCredentials, TraktCredentials, DEFAULT_TMDB_LANGUAGE};
pub use error::ConfigError;
pub use paths::{base_path_override, PathManager};
