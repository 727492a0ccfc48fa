use std::path::{Path, PathBuf};

/// Base directory override from the environment (`SET_CREATOR_BASE_PATH`)
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var("SET_CREATOR_BASE_PATH").ok().map(PathBuf::from)
}

/// Locations of the config file, generated YAML files and logs
///
/// Output files are written next to the config file, logs go to `logs/`
/// below it.
#[derive(Debug, Clone)]
pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        Self {
            log_dir: config_dir.join("logs"),
            config_dir,
        }
    }

    /// Platform config directory, e.g. `~/.config/metadata-set-creator` on Linux
    pub fn from_platform_dirs() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("metadata-set-creator")))
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.yml")
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("set_creator.log")
    }

    pub fn movie_list_file(&self) -> PathBuf {
        self.config_dir.join("movie_list.yml")
    }

    pub fn movie_set_file(&self) -> PathBuf {
        self.config_dir.join("movie_set.yml")
    }

    pub fn show_list_file(&self) -> PathBuf {
        self.config_dir.join("show_list.yml")
    }

    pub fn show_set_file(&self) -> PathBuf {
        self.config_dir.join("show_set.yml")
    }

    pub fn ensure_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::new(base.join("config"));
        }

        // A ./config directory next to where the tool is run wins, which is how
        // the tool is laid out when run from a checkout or a container.
        let local = PathBuf::from("config");
        if local.is_dir() {
            return Self::new(local);
        }

        Self::from_platform_dirs().unwrap_or_else(|| Self::new(local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_files_live_in_config_dir() {
        let paths = PathManager::new("/tmp/sets");
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/sets/config.yml"));
        assert_eq!(paths.movie_list_file(), PathBuf::from("/tmp/sets/movie_list.yml"));
        assert_eq!(paths.movie_set_file(), PathBuf::from("/tmp/sets/movie_set.yml"));
        assert_eq!(paths.show_list_file(), PathBuf::from("/tmp/sets/show_list.yml"));
        assert_eq!(paths.show_set_file(), PathBuf::from("/tmp/sets/show_set.yml"));
        assert_eq!(paths.log_file(), PathBuf::from("/tmp/sets/logs/set_creator.log"));
    }

    #[test]
    fn test_ensure_directories() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::new(dir.path().join("config"));
        paths.ensure_directories().unwrap();
        assert!(paths.config_dir().is_dir());
        assert!(paths.log_dir().is_dir());
    }
}
