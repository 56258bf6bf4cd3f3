//! Configuration types for docscan.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default file-size ceiling in bytes. Files this size or larger are listed
/// but not read.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024;

/// Default number of signatures kept per file.
pub const DEFAULT_MAX_SIGNATURES: usize = 25;

const DEFAULT_IGNORE_DIRS: &[&str] = &[
    ".git",
    ".vscode",
    ".idea",
    "node_modules",
    "dist",
    "build",
    "coverage",
    "target",
    "vendor",
    "__pycache__",
    "venv",
    ".env",
    ".gemini",
    ".agent",
    "bin",
    "obj",
    "out",
    "debug",
    "release",
];

const DEFAULT_IGNORE_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".ico", ".svg", ".woff", ".woff2", ".ttf", ".eot", ".mp4",
    ".webm", ".mp3", ".wav", ".zip", ".tar", ".gz", ".pyc", ".exe", ".dll", ".so", ".dylib",
    ".lock", ".log", ".map", ".class", ".o", ".obj",
];

const DEFAULT_IGNORE_FILES: &[&str] = &[".DS_Store"];

/// Top-level configuration for docscan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Traversal and extraction limits.
    #[serde(default)]
    pub scan: ScanConfig,

    /// Extra extension mappings and pattern overrides.
    #[serde(default)]
    pub languages: LanguagesConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.max_signatures == 0 {
            return Err(ConfigError::Validation(
                "scan.max_signatures must be at least 1".into(),
            ));
        }

        for ext in &self.scan.ignore_extensions {
            if !ext.starts_with('.') {
                return Err(ConfigError::Validation(format!(
                    "scan.ignore_extensions: '{ext}' must start with '.'"
                )));
            }
        }

        for pattern in &self.scan.exclude {
            glob::Pattern::new(pattern).map_err(|e| {
                ConfigError::Validation(format!("scan.exclude: invalid glob '{pattern}': {e}"))
            })?;
        }

        Ok(())
    }
}

/// Traversal and extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Directory names pruned from the walk.
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,

    /// Extensions (with leading dot) of files hidden from the tree.
    #[serde(default = "default_ignore_extensions")]
    pub ignore_extensions: Vec<String>,

    /// Exact file names hidden from the tree.
    #[serde(default = "default_ignore_files")]
    pub ignore_files: Vec<String>,

    /// Glob patterns on root-relative paths excluded from analysis.
    /// Matching files stay in the tree listing.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Files of this many bytes or more are not read.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Signatures kept per file.
    #[serde(default = "default_max_signatures")]
    pub max_signatures: usize,

    /// Whether to honor `.gitignore` files.
    #[serde(default)]
    pub respect_gitignore: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ignore_dirs: default_ignore_dirs(),
            ignore_extensions: default_ignore_extensions(),
            ignore_files: default_ignore_files(),
            exclude: Vec::new(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_signatures: DEFAULT_MAX_SIGNATURES,
            respect_gitignore: false,
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn default_ignore_dirs() -> Vec<String> {
    to_strings(DEFAULT_IGNORE_DIRS)
}

fn default_ignore_extensions() -> Vec<String> {
    to_strings(DEFAULT_IGNORE_EXTENSIONS)
}

fn default_ignore_files() -> Vec<String> {
    to_strings(DEFAULT_IGNORE_FILES)
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_max_signatures() -> usize {
    DEFAULT_MAX_SIGNATURES
}

/// Additions to the built-in language table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguagesConfig {
    /// Extension (with leading dot) → language name.
    #[serde(default)]
    pub extensions: BTreeMap<String, String>,

    /// Language name → replacement pattern.
    #[serde(default)]
    pub patterns: BTreeMap<String, String>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Config parsed but holds unusable values.
    #[error("Invalid config: {0}")]
    Validation(String),
}
