//! Directory traversal that builds a [`ScanReport`].

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use ignore::{DirEntry, WalkBuilder};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{Config, ScanConfig};
use crate::registry::{PatternRegistry, RegistryError};
use crate::types::{
    EntryKind, FileSummary, LanguageId, ScanReport, SkipReason, SkippedFile, TreeEntry,
};

/// Errors that stop a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The root does not exist or is not a directory.
    #[error("Directory '{}' does not exist", .0.display())]
    RootNotFound(PathBuf),

    /// IO error resolving the root.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An exclude pattern is not a valid glob.
    #[error("Invalid exclude pattern '{pattern}': {source}")]
    Glob {
        /// Offending pattern.
        pattern: String,
        /// Glob error.
        source: glob::PatternError,
    },

    /// The pattern registry could not be built.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Builder for configuring a [`Scanner`].
#[derive(Default)]
pub struct ScannerBuilder {
    root: Option<PathBuf>,
    config: Option<ScanConfig>,
    registry: Option<PatternRegistry>,
    exclude_patterns: Vec<String>,
}

impl ScannerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to scan (default: current directory).
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the scan settings.
    #[must_use]
    pub fn config(mut self, config: ScanConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the pattern registry (default: built-in table).
    #[must_use]
    pub fn registry(mut self, registry: PatternRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Adds an exclude glob pattern on top of the configured ones.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Builds the scanner.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory doesn't exist, an exclude
    /// pattern is invalid, or the built-in registry fails to compile.
    pub fn build(self) -> Result<Scanner, ScanError> {
        let root = self.root.unwrap_or_else(|| PathBuf::from("."));
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        if !root.is_dir() {
            return Err(ScanError::RootNotFound(root));
        }

        let config = self.config.unwrap_or_default();
        let registry = match self.registry {
            Some(r) => r,
            None => PatternRegistry::builtin()?,
        };

        let exclude = config
            .exclude
            .iter()
            .chain(&self.exclude_patterns)
            .map(|pattern| {
                glob::Pattern::new(pattern).map_err(|source| ScanError::Glob {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Scanner {
            root,
            config,
            registry,
            exclude,
        })
    }
}

/// Walks a directory tree and extracts signatures from known languages.
///
/// Use [`Scanner::builder()`] to construct an instance.
pub struct Scanner {
    root: PathBuf,
    config: ScanConfig,
    registry: PatternRegistry,
    exclude: Vec<glob::Pattern>,
}

impl Scanner {
    /// Creates a new builder for configuring a scanner.
    #[must_use]
    pub fn builder() -> ScannerBuilder {
        ScannerBuilder::new()
    }

    /// Builds a scanner for `root` from a loaded [`Config`].
    ///
    /// # Errors
    ///
    /// See [`ScannerBuilder::build`]; also fails if the language section
    /// of `config` is invalid.
    pub fn from_config(root: impl Into<PathBuf>, config: &Config) -> Result<Self, ScanError> {
        let registry = PatternRegistry::from_config(&config.languages)?;
        Self::builder()
            .root(root)
            .config(config.scan.clone())
            .registry(registry)
            .build()
    }

    /// Returns the absolute root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the pattern registry in use.
    #[must_use]
    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Walks the tree and returns the listing plus per-file signatures.
    ///
    /// Unreadable entries are logged and skipped; they never abort the scan.
    #[must_use]
    pub fn scan(&self) -> ScanReport {
        info!("Scanning directory {}", self.root.display());

        let mut report = ScanReport::new(&self.root);

        for result in self.walker().build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if entry.depth() == 0 {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();

            if is_directory(&entry) {
                report.tree.push(TreeEntry {
                    depth: entry.depth(),
                    name,
                    kind: EntryKind::Directory,
                });
                continue;
            }

            if self.is_hidden_file(&name, entry.path()) {
                continue;
            }

            report.tree.push(TreeEntry {
                depth: entry.depth(),
                name,
                kind: EntryKind::File,
            });

            self.analyze_file(&entry, &mut report);
        }

        info!(
            "Scan complete: {} entries, {} files with {} signatures, {} skipped",
            report.tree.len(),
            report.files.len(),
            report.signature_count(),
            report.skipped.len()
        );

        report
    }

    fn walker(&self) -> WalkBuilder {
        let ignore_dirs: HashSet<String> = self.config.ignore_dirs.iter().cloned().collect();
        let gitignore = self.config.respect_gitignore;

        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .parents(false)
            .ignore(false)
            .git_ignore(gitignore)
            .git_global(gitignore)
            .git_exclude(gitignore)
            .require_git(false)
            .follow_links(false)
            // Files before directories, each group by name.
            .sort_by_file_path(|a, b| {
                a.is_dir()
                    .cmp(&b.is_dir())
                    .then_with(|| a.file_name().cmp(&b.file_name()))
            })
            .filter_entry(move |entry| {
                entry.depth() == 0
                    || !is_directory(entry)
                    || !ignore_dirs.contains(entry.file_name().to_string_lossy().as_ref())
            });
        builder
    }

    /// Files hidden from the tree entirely.
    fn is_hidden_file(&self, name: &str, path: &Path) -> bool {
        if self.config.ignore_files.iter().any(|f| f == name) {
            return true;
        }
        extension_of(path).is_some_and(|ext| self.config.ignore_extensions.contains(&ext))
    }

    fn is_excluded(&self, relative: &Path) -> bool {
        self.exclude.iter().any(|p| p.matches_path(relative))
    }

    fn language_of(&self, path: &Path) -> Option<LanguageId> {
        extension_of(path).and_then(|ext| self.registry.language_for(&ext))
    }

    /// Reads one listed file and records its signatures or skip reason.
    fn analyze_file(&self, entry: &DirEntry, report: &mut ScanReport) {
        let path = entry.path();
        let Some(language) = self.language_of(path) else {
            return;
        };

        let relative = path.strip_prefix(&self.root).unwrap_or(path).to_path_buf();
        if self.is_excluded(&relative) {
            debug!("Excluding: {}", relative.display());
            return;
        }

        let skip = |reason: SkipReason| {
            debug!("Skipping {}: {}", relative.display(), reason);
            SkippedFile {
                relative_path: relative.clone(),
                reason,
            }
        };

        let size = match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => meta.len(),
            Ok(_) => {
                report.skipped.push(skip(SkipReason::Unreadable {
                    message: "not a regular file".to_string(),
                }));
                return;
            }
            Err(e) => {
                report.skipped.push(skip(SkipReason::Unreadable {
                    message: e.to_string(),
                }));
                return;
            }
        };

        let limit = self.config.max_file_size;
        if size >= limit {
            report.skipped.push(skip(SkipReason::TooLarge { size, limit }));
            return;
        }

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                report.skipped.push(skip(SkipReason::Unreadable {
                    message: e.to_string(),
                }));
                return;
            }
        };
        let content = String::from_utf8_lossy(&bytes);

        match self.registry.extract(&content, language) {
            Ok(signatures) if signatures.is_empty() => {}
            Ok(signatures) => {
                debug!(
                    "{}: {} signature(s) as {}",
                    relative.display(),
                    signatures.len(),
                    language
                );
                report.files.push(FileSummary::new(
                    relative.clone(),
                    language,
                    signatures,
                    self.config.max_signatures,
                ));
            }
            Err(e) => {
                report.skipped.push(skip(SkipReason::ExtractionFailed {
                    message: e.to_string(),
                }));
            }
        }
    }
}

/// Directories, including symlinks to directories (listed, never entered).
/// Everything else, dangling symlinks included, is listed as a file.
fn is_directory(entry: &DirEntry) -> bool {
    match entry.file_type() {
        Some(t) if t.is_symlink() => entry.path().is_dir(),
        Some(t) => t.is_dir(),
        None => false,
    }
}

/// Extension with its leading dot, e.g. `".rs"`. `None` for dotfiles such
/// as `.gitignore` and names without a dot.
fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| format!(".{ext}"))
}
