//! Languages command implementation.

use anyhow::{Context, Result};
use docscan_core::PatternRegistry;
use std::path::Path;

use crate::config_resolver;

/// Runs the languages command.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    let source = config_resolver::resolve(Path::new("."), config_path);
    let config = super::scan::load_config(&source)?;
    let registry =
        PatternRegistry::from_config(&config.languages).context("Invalid [languages] config")?;

    println!("Supported languages:\n");
    println!("{:<12} {:<18} Extensions", "Language", "Family");
    println!("{}", "-".repeat(60));

    for rule in registry.rules() {
        println!(
            "{:<12} {:<18} {}",
            rule.language(),
            rule.family(),
            registry.extensions_for(rule.language()).join(", ")
        );
    }

    println!("\nAdd extensions or replace patterns in docscan.toml, e.g.:");
    println!("  [languages.extensions]");
    println!("  \".pyi\" = \"python\"");

    Ok(())
}
