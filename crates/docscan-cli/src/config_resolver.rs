//! Locates the docscan configuration file.
//!
//! Lookup order:
//!
//! 1. `--config <path>`
//! 2. `docscan.toml`, then `.docscan.toml`, in the scanned root
//! 3. `config.toml` in the global directory (`$DOCSCAN_CONFIG_DIR` or `~/.docscan/`)
//! 4. built-in defaults

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line.
    Explicit(PathBuf),
    /// Found in the scanned root.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found; use defaults.
    Default,
}

impl ConfigSource {
    /// Returns the config file path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` for configs from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

const ROOT_CONFIG_NAMES: &[&str] = &["docscan.toml", ".docscan.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration for a scan of `root`.
#[must_use]
pub fn resolve(root: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_with_global(root, explicit, global_config_dir().as_deref())
}

/// Same as [`resolve`] with the global directory passed in, so tests do not
/// depend on the environment.
fn resolve_with_global(
    root: &Path,
    explicit: Option<&Path>,
    global_dir: Option<&Path>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = ROOT_CONFIG_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_CONFIG_NAME)) {
        Some(candidate) if candidate.is_file() => {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        }
        _ => ConfigSource::Default,
    }
}

/// Global config directory: `$DOCSCAN_CONFIG_DIR`, else `~/.docscan/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("DOCSCAN_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".docscan"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_wins_and_is_not_checked() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("docscan.toml"), "").unwrap();

        let result = resolve_with_global(root.path(), Some(Path::new("/missing.toml")), None);
        assert_eq!(
            result,
            ConfigSource::Explicit(PathBuf::from("/missing.toml"))
        );
    }

    #[test]
    fn root_config_found() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join(".docscan.toml"), "").unwrap();

        let result = resolve_with_global(root.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(root.path().join(".docscan.toml"))
        );
    }

    #[test]
    fn undotted_name_preferred() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("docscan.toml"), "").unwrap();
        fs::write(root.path().join(".docscan.toml"), "").unwrap();

        let result = resolve_with_global(root.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(root.path().join("docscan.toml"))
        );
    }

    #[test]
    fn directory_named_like_config_is_ignored() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("docscan.toml")).unwrap();

        assert_eq!(
            resolve_with_global(root.path(), None, None),
            ConfigSource::Default
        );
    }

    #[test]
    fn global_used_only_without_root_config() {
        let root = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result = resolve_with_global(root.path(), None, Some(global.path()));
        assert_eq!(result, ConfigSource::Global(global.path().join("config.toml")));
        assert!(result.is_global());

        fs::write(root.path().join("docscan.toml"), "").unwrap();
        let result = resolve_with_global(root.path(), None, Some(global.path()));
        assert!(matches!(result, ConfigSource::Project(_)));
    }

    #[test]
    fn empty_global_dir_gives_defaults() {
        let root = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        let result = resolve_with_global(root.path(), None, Some(global.path()));
        assert_eq!(result, ConfigSource::Default);
        assert!(result.path().is_none());
    }
}
