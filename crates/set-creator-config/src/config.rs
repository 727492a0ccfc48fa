use crate::error::ConfigError;
use serde_yaml::Value;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_TMDB_LANGUAGE: &str = "en";

/// Plex-Meta-Manager style config file
///
/// Only the `tmdb` and `trakt` sections are read. Sections are validated
/// when they are asked for, so a TMDb-only run does not need Trakt
/// credentials.
#[derive(Debug)]
pub struct Config {
    path: PathBuf,
    root: Value,
}

#[derive(Clone)]
pub struct TmdbCredentials {
    pub apikey: String,
    pub language: String,
}

#[derive(Clone)]
pub struct TraktCredentials {
    pub client_id: String,
    pub access_token: String,
}

impl fmt::Debug for TmdbCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbCredentials")
            .field("apikey", &"(redacted)")
            .field("language", &self.language)
            .finish()
    }
}

impl fmt::Debug for TraktCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraktCredentials")
            .field("client_id", &"(redacted)")
            .field("access_token", &"(redacted)")
            .finish()
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(path, &content)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn from_yaml_str(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let root: Value = serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            root,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tmdb(&self) -> Result<TmdbCredentials, ConfigError> {
        let tmdb = require(&self.root, "tmdb", "config")?;
        let apikey = scalar_string(require(tmdb, "apikey", "tmdb")?);
        let language = tmdb
            .get("language")
            .filter(|v| !is_blank(v))
            .map(scalar_string)
            .unwrap_or_else(|| DEFAULT_TMDB_LANGUAGE.to_string());
        Ok(TmdbCredentials { apikey, language })
    }

    pub fn trakt(&self) -> Result<TraktCredentials, ConfigError> {
        let trakt = require(&self.root, "trakt", "config")?;
        let client_id = scalar_string(require(trakt, "client_id", "trakt")?);
        let authorization = require(trakt, "authorization", "trakt")?;
        let access_token = scalar_string(require(authorization, "access_token", "authorization")?);
        Ok(TraktCredentials {
            client_id,
            access_token,
        })
    }
}

fn require<'a>(node: &'a Value, attribute: &str, parent: &str) -> Result<&'a Value, ConfigError> {
    let value = node.get(attribute).ok_or_else(|| ConfigError::Missing {
        attribute: attribute.to_string(),
        parent: parent.to_string(),
    })?;
    if is_blank(value) {
        return Err(ConfigError::Blank(attribute.to_string()));
    }
    Ok(value)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Sequence(seq) => seq.is_empty(),
        Value::Mapping(map) => map.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Tagged(tagged) => is_blank(&tagged.value),
    }
}

/// Keys are sometimes written unquoted and parse as numbers
fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config(yaml: &str) -> Config {
        Config::from_yaml_str(Path::new("config.yml"), yaml).unwrap()
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "tmdb:\n  apikey: abc123\n  language: de").unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        let tmdb = loaded.tmdb().unwrap();
        assert_eq!(tmdb.apikey, "abc123");
        assert_eq!(tmdb.language, "de");
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load_from_file(Path::new("/nonexistent/config.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().starts_with("PMM Config Not Found at:"));
    }

    #[test]
    fn test_tmdb_validation_messages() {
        let err = config("plex:\n  url: x\n").tmdb().unwrap_err();
        assert_eq!(err.to_string(), "tmdb attribute not in config");

        let err = config("tmdb:\n").tmdb().unwrap_err();
        assert_eq!(err.to_string(), "tmdb attribute blank");

        let err = config("tmdb:\n  language: en\n").tmdb().unwrap_err();
        assert_eq!(err.to_string(), "apikey attribute not in tmdb");

        let err = config("tmdb:\n  apikey: ''\n").tmdb().unwrap_err();
        assert_eq!(err.to_string(), "apikey attribute blank");
    }

    #[test]
    fn test_tmdb_defaults_language() {
        let tmdb = config("tmdb:\n  apikey: 12345\n").tmdb().unwrap();
        assert_eq!(tmdb.apikey, "12345");
        assert_eq!(tmdb.language, DEFAULT_TMDB_LANGUAGE);
    }

    #[test]
    fn test_trakt_validation_messages() {
        let err = config("tmdb:\n  apikey: k\n").trakt().unwrap_err();
        assert_eq!(err.to_string(), "trakt attribute not in config");

        let err = config("trakt:\n  client_id: id\n").trakt().unwrap_err();
        assert_eq!(err.to_string(), "authorization attribute not in trakt");

        let err = config("trakt:\n  client_id: id\n  authorization:\n    access_token:\n")
            .trakt()
            .unwrap_err();
        assert_eq!(err.to_string(), "access_token attribute blank");

        let trakt = config("trakt:\n  client_id: id\n  authorization:\n    access_token: tok\n")
            .trakt()
            .unwrap();
        assert_eq!(trakt.client_id, "id");
        assert_eq!(trakt.access_token, "tok");
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let trakt = TraktCredentials {
            client_id: "secret-id".to_string(),
            access_token: "secret-token".to_string(),
        };
        let printed = format!("{:?}", trakt);
        assert!(!printed.contains("secret-id"));
        assert!(!printed.contains("secret-token"));
    }
}
