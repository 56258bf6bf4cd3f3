//! Scan command implementation.

use anyhow::{bail, Context, Result};
use docscan_core::{Config, Scanner};
use std::path::{Component, Path, PathBuf};

use crate::config_resolver::{self, ConfigSource};
use crate::ScanArgs;

/// Runs the scan command.
pub fn run(args: &ScanArgs, config_path: Option<&Path>) -> Result<()> {
    let root = absolute(args.path.as_deref().unwrap_or(Path::new(".")))?;
    if !root.is_dir() {
        bail!("Directory '{}' does not exist.", root.display());
    }

    let source = config_resolver::resolve(&root, config_path);
    let mut config = load_config(&source)?;

    if let Some(max) = args.max_signatures {
        config.scan.max_signatures = max;
    }
    config.scan.exclude.extend(args.exclude.iter().cloned());
    config.validate().context("Config validation failed")?;

    let scanner = Scanner::from_config(&root, &config).context("Failed to set up scanner")?;
    let report = scanner.scan();

    super::output::print(&report, args.format)
}

/// Loads the resolved configuration, or defaults when none was found.
pub fn load_config(source: &ConfigSource) -> Result<Config> {
    match source {
        ConfigSource::Default => Ok(Config::default()),
        other => {
            // Invariant: non-Default variants always have a path
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
        }
    }
}

/// Makes `path` absolute against the working directory and resolves `.`
/// and `..` lexically, without touching the filesystem.
fn absolute(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("Failed to read current directory")?
            .join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            // `pop` is a no-op at the root, so `/..` stays `/`.
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}
