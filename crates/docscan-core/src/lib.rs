//! # docscan-core
//!
//! Lightweight structural summaries of a source tree for documentation.
//!
//! This crate provides:
//!
//! - [`PatternRegistry`] mapping file extensions to languages and languages
//!   to [`MatchRule`]s
//! - [`extract`] turning file content into [`Signature`]s, one mapping
//!   function per declaration [`Family`]
//! - [`Scanner`] walking a directory into a [`ScanReport`]
//! - [`Config`] loaded from `docscan.toml`
//!
//! ## Example
//!
//! ```ignore
//! use docscan_core::{LanguageId, PatternRegistry};
//!
//! let registry = PatternRegistry::builtin()?;
//! let sigs = registry.extract("int add(int a, int b) {", LanguageId::C)?;
//! assert_eq!(sigs[0].name, "add");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod extractor;
mod registry;
mod scanner;
mod types;

pub use config::{
    Config, ConfigError, LanguagesConfig, ScanConfig, DEFAULT_MAX_FILE_SIZE,
    DEFAULT_MAX_SIGNATURES,
};
pub use extractor::{extract, ExtractError};
pub use registry::{MatchRule, PatternRegistry, RegistryError};
pub use scanner::{ScanError, Scanner, ScannerBuilder};
pub use types::{
    collapse_whitespace, EntryKind, Family, FileSummary, LanguageId, ScanReport, Signature,
    SkipReason, SkippedFile, TreeEntry, UnknownLanguage,
};
