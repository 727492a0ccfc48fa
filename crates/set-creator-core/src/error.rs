use set_creator_config::ConfigError;
use set_creator_sources::SourceError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CreateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Nothing was collected from the list
    #[error("{0}")]
    EmptyList(String),
}

impl CreateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CreateError::Io {
            path: path.into(),
            source,
        }
    }
}
