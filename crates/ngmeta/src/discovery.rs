//! Config file discovery.

use ngmeta_core::{Config, ConfigError};
use std::path::{Path, PathBuf};

/// Config file names to search for, in priority order.
pub const CONFIG_CANDIDATES: &[&str] = &["ngmeta.toml", ".ngmeta.toml"];

/// Returns the first config candidate that exists directly under `root`.
#[must_use]
pub fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.is_file())
}

/// Loads the configuration for `root`.
///
/// An explicit path wins (relative paths resolve against `root`); otherwise
/// the first [`CONFIG_CANDIDATES`] entry found is used. With neither, the
/// default configuration is returned.
///
/// # Errors
///
/// Returns an error if the chosen file cannot be read, parsed or validated.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(path) if path.is_absolute() => Some(path.to_path_buf()),
        Some(path) => Some(root.join(path)),
        None => find_config(root),
    };
    match path {
        Some(path) => {
            tracing::debug!(config = %path.display(), "loading config");
            Config::from_file(&path)
        }
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ngmeta_core::DecoratorKind;

    #[test]
    fn missing_config_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(find_config(dir.path()), None);
        assert_eq!(load_config(dir.path(), None).unwrap(), Config::default());
    }

    #[test]
    fn plain_name_wins_over_dotfile() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".ngmeta.toml"), "").unwrap();
        std::fs::write(dir.path().join("ngmeta.toml"), "").unwrap();
        assert_eq!(find_config(dir.path()), Some(dir.path().join("ngmeta.toml")));
    }

    #[test]
    fn dotfile_is_found_alone() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".ngmeta.toml"),
            "[extractor]\nmax_depth = 8\n",
        )
        .unwrap();
        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.extractor.max_depth, 8);
    }

    #[test]
    fn explicit_relative_path_resolves_against_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("conf")).unwrap();
        std::fs::write(
            dir.path().join("conf/meta.toml"),
            "[decorators]\nAppPipe = \"pipe\"\n",
        )
        .unwrap();
        let config = load_config(dir.path(), Some(Path::new("conf/meta.toml"))).unwrap();
        assert_eq!(config.decorators.get("AppPipe"), Some(&DecoratorKind::Pipe));
    }

    #[test]
    fn explicit_missing_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path(), Some(Path::new("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn invalid_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ngmeta.toml"), "[extractor]\nmax_depth = 0\n").unwrap();
        let err = load_config(dir.path(), None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
