use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PMM Config Not Found at: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{attribute} attribute not in {parent}")]
    Missing { attribute: String, parent: String },

    #[error("{0} attribute blank")]
    Blank(String),
}
