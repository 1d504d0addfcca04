use std::path::{Path, PathBuf};

/// File name of the optional desk configuration inside the config directory.
pub const CONFIG_FILE: &str = "desk.toml";

/// Manages standard directory paths for the desk
pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PathManager {
    /// Creates a new PathManager with explicit paths
    pub fn new(config_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            data_dir: data_dir.into(),
        }
    }

    /// Creates a PathManager from the parsed CLI arguments.
    pub fn from_args(args: &crate::args::CommonArgs) -> Self {
        Self::new(args.get_config_dir(), args.get_data_dir())
    }

    /// Location of `desk.toml`. The file does not have to exist.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Ensures all managed directories exist, creating them if necessary.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if directories exist or were created.
    /// * `Err` if creation fails.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_dirs_creates_tree() {
        let root = tempfile::tempdir().unwrap();
        let paths = PathManager::new(root.path().join("cfg"), root.path().join("nested/data"));

        paths.ensure_dirs().unwrap();

        assert!(root.path().join("cfg").is_dir());
        assert!(paths.data_dir().is_dir());
        assert_eq!(paths.config_file(), root.path().join("cfg").join("desk.toml"));
    }
}
