//! Core types for extracted signatures and scan results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A supported source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageId {
    /// Python (`def`).
    Python,
    /// JavaScript (`function`, arrow functions, methods).
    JavaScript,
    /// TypeScript, matched like JavaScript.
    TypeScript,
    /// Rust (`fn`).
    Rust,
    /// Go (`func`).
    Go,
    /// Dart.
    Dart,
    /// Java.
    Java,
    /// Kotlin (`fun`).
    Kotlin,
    /// Swift (`func`).
    Swift,
    /// C.
    C,
    /// C++.
    Cpp,
    /// PHP (`function`).
    Php,
}

impl LanguageId {
    /// Every supported language, in registry order.
    pub const ALL: [Self; 12] = [
        Self::Python,
        Self::JavaScript,
        Self::TypeScript,
        Self::Rust,
        Self::Go,
        Self::Dart,
        Self::Java,
        Self::Kotlin,
        Self::Swift,
        Self::C,
        Self::Cpp,
        Self::Php,
    ];

    /// Lowercase identifier used in configuration files and output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Rust => "rust",
            Self::Go => "go",
            Self::Dart => "dart",
            Self::Java => "java",
            Self::Kotlin => "kotlin",
            Self::Swift => "swift",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Php => "php",
        }
    }
}

impl std::fmt::Display for LanguageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a language name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language '{0}'")]
pub struct UnknownLanguage(pub String);

impl std::str::FromStr for LanguageId {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str() == s)
            .ok_or_else(|| UnknownLanguage(s.to_owned()))
    }
}

/// Declaration grammar a match rule is written against.
///
/// The family decides how the capture groups of a match become a
/// [`Signature`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    /// `keyword name(args) -> ret`, e.g. `def`, `fn`, `func`.
    Keyword,
    /// `keyword name(args): Ret`, e.g. `fun`, `function`.
    ColonAnnotated,
    /// `Ret name(args)`, e.g. C and C++.
    ReturnTypeFirst,
    /// `function name(args)`, `const name = (args) =>` or `name(args) {`.
    Arrow,
    /// `modifier Ret name(args)`; only name and args are captured.
    Modifier,
}

impl Family {
    /// Short human-readable label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::ColonAnnotated => "colon-annotated",
            Self::ReturnTypeFirst => "return-type-first",
            Self::Arrow => "arrow",
            Self::Modifier => "modifier",
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One extracted function-like declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Declared name.
    pub name: String,
    /// Raw argument text, whitespace-collapsed.
    pub arguments: String,
    /// Raw return type text, whitespace-collapsed. Empty when not captured.
    pub return_type: String,
}

impl Signature {
    /// Builds a signature, collapsing whitespace in every field.
    ///
    /// Returns `None` when the name is empty after trimming.
    #[must_use]
    pub fn new(name: &str, arguments: &str, return_type: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_owned(),
            arguments: collapse_whitespace(arguments),
            return_type: collapse_whitespace(return_type),
        })
    }
}

/// Replaces every whitespace run (newlines included) with a single space
/// and trims both ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Signatures found in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    /// Path relative to the scan root.
    pub relative_path: PathBuf,
    /// Language the file was matched as.
    pub language: LanguageId,
    /// Signatures in match order, truncated to the configured cap.
    pub signatures: Vec<Signature>,
}

impl FileSummary {
    /// Creates a summary keeping at most `cap` signatures.
    #[must_use]
    pub fn new(
        relative_path: impl Into<PathBuf>,
        language: LanguageId,
        mut signatures: Vec<Signature>,
        cap: usize,
    ) -> Self {
        signatures.truncate(cap);
        Self {
            relative_path: relative_path.into(),
            language,
            signatures,
        }
    }
}

/// Kind of a project-structure entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A directory below the root.
    Directory,
    /// A regular file.
    File,
}

/// One line of the project-structure listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Depth below the scan root (files directly in the root have depth 1).
    pub depth: usize,
    /// File or directory name.
    pub name: String,
    /// Entry kind.
    pub kind: EntryKind,
}

/// Why a file contributed no signatures despite having a known language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// File size reached the configured ceiling.
    TooLarge {
        /// Size on disk in bytes.
        size: u64,
        /// Configured ceiling in bytes.
        limit: u64,
    },
    /// File could not be read.
    Unreadable {
        /// IO error text.
        message: String,
    },
    /// Extraction reported an error.
    ExtractionFailed {
        /// Extraction error text.
        message: String,
    },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooLarge { size, limit } => {
                write!(f, "too large ({size} bytes, limit {limit})")
            }
            Self::Unreadable { message } => write!(f, "unreadable: {message}"),
            Self::ExtractionFailed { message } => write!(f, "extraction failed: {message}"),
        }
    }
}

/// A file that was listed but not analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    /// Path relative to the scan root.
    pub relative_path: PathBuf,
    /// Why it was skipped.
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Result of scanning a directory tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    /// Absolute scan root.
    pub root: PathBuf,
    /// Project-structure listing in walk order.
    pub tree: Vec<TreeEntry>,
    /// Files with at least one signature, in walk order.
    pub files: Vec<FileSummary>,
    /// Files with a known language that produced no data.
    pub skipped: Vec<SkippedFile>,
}

impl ScanReport {
    /// Creates an empty report for `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Total number of signatures across all files.
    #[must_use]
    pub fn signature_count(&self) -> usize {
        self.files.iter().map(|f| f.signatures.len()).sum()
    }
}
