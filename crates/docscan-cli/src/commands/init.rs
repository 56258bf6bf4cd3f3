//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# docscan configuration
# Placed in the scanned directory, or in ~/.docscan/config.toml for all projects.

[scan]
# Directory names skipped entirely
# ignore_dirs = [".git", "node_modules", "target", "vendor", "dist", "build"]

# Files with these extensions are left out of the tree
# ignore_extensions = [".png", ".jpg", ".lock", ".log", ".map"]

# Glob patterns (relative to the scanned directory) listed in the tree
# but not analyzed
exclude = [
    "**/generated/**",
]

# Files of this size in bytes or larger are not read
max_file_size = 102400

# Signatures listed per file
max_signatures = 25

# Respect .gitignore files
respect_gitignore = false

# Map extra extensions to a supported language (see `docscan languages`)
[languages.extensions]
# ".pyi" = "python"

# Replace the built-in pattern for a language. The pattern must use the
# named groups of the language's family, e.g. name/args/ret for "keyword".
[languages.patterns]
# go = 'func\s+(?P<name>\w+)\s*\((?P<args>[^)]*)\)\s*(?P<ret>[^{]*)\{'
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("docscan.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created docscan.toml");
    println!();
    println!("Next steps:");
    println!("  1. Adjust [scan] limits and ignore lists for your project");
    println!("  2. Run: docscan > PROJECT_OVERVIEW.md");

    Ok(())
}
