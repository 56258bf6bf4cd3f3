//! Pattern registry: extension → language → match rule.
//!
//! The built-in table covers every [`LanguageId`]. [`PatternRegistry::from_config`]
//! layers extra extensions and replacement patterns from a config file on top.
//!
//! Patterns use named capture groups that the rule's [`Family`] knows how to
//! read (see [`crate::extractor`]):
//!
//! | Family | Groups |
//! |--------|--------|
//! | `keyword`, `colon-annotated` | `name`, `args`, `ret` |
//! | `return-type-first` | `ret`, `name`, `args` |
//! | `arrow` | `fn_name`/`fn_args`/`fn_ret`, `arrow_name`/`arrow_args`/`arrow_ret`, `method_name`/`method_args` |
//! | `modifier` | `name`, `args` |

use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;
use tracing::debug;

use crate::config::LanguagesConfig;
use crate::extractor::{self, ExtractError};
use crate::types::{Family, LanguageId, Signature, UnknownLanguage};

/// Upper bound on the compiled size of a single pattern.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// One row of the built-in table.
struct BuiltinRule {
    language: LanguageId,
    family: Family,
    extensions: &'static [&'static str],
    pattern: &'static str,
}

const ARROW_PATTERN: &str = concat!(
    r"(?:\bfunction\s+(?P<fn_name>[a-zA-Z_][a-zA-Z0-9_]*)\s*\((?P<fn_args>.*?)\)",
    r"(?:\s*:\s*(?P<fn_ret>[^{};=()]+?)\s*\{)?",
    r"|\b(?:const|let|var)\s+(?P<arrow_name>[a-zA-Z_][a-zA-Z0-9_]*)\s*=\s*(?:async\s*)?",
    r"\((?P<arrow_args>.*?)\)(?:\s*:\s*(?P<arrow_ret>[^=]+?))?\s*=>",
    r"|(?P<method_name>[a-zA-Z_][a-zA-Z0-9_]*)\s*\((?P<method_args>[^)]*)\)\s*\{)",
);

const BUILTIN_RULES: &[BuiltinRule] = &[
    BuiltinRule {
        language: LanguageId::Python,
        family: Family::Keyword,
        extensions: &[".py"],
        pattern: r"\bdef\s+(?P<name>[a-zA-Z_][a-zA-Z0-9_]*)\s*\((?P<args>.*?)\)(?:\s*->\s*(?P<ret>.*?))?:",
    },
    BuiltinRule {
        language: LanguageId::JavaScript,
        family: Family::Arrow,
        extensions: &[".js", ".jsx", ".mjs"],
        pattern: ARROW_PATTERN,
    },
    BuiltinRule {
        language: LanguageId::TypeScript,
        family: Family::Arrow,
        extensions: &[".ts", ".tsx"],
        pattern: ARROW_PATTERN,
    },
    BuiltinRule {
        language: LanguageId::Rust,
        family: Family::Keyword,
        extensions: &[".rs"],
        pattern: r"\bfn\s+(?P<name>[a-zA-Z_][a-zA-Z0-9_]*)\s*(?:<.*?>)?\s*\((?P<args>.*?)\)(?:\s*->\s*(?P<ret>.*?))?\s*\{",
    },
    BuiltinRule {
        language: LanguageId::Go,
        family: Family::Keyword,
        extensions: &[".go"],
        pattern: r"\bfunc\s+(?:\([^)]*\)\s*)?(?P<name>[a-zA-Z_][a-zA-Z0-9_]*)\s*\((?P<args>.*?)\)\s*(?P<ret>.*?)\{",
    },
    BuiltinRule {
        language: LanguageId::Dart,
        family: Family::ReturnTypeFirst,
        extensions: &[".dart"],
        pattern: r"(?P<ret>[a-zA-Z0-9_<>?]+)\s+(?P<name>[a-zA-Z_][a-zA-Z0-9_]*)\s*\((?P<args>.*?)\)\s*(?:async)?\s*\{",
    },
    BuiltinRule {
        language: LanguageId::Java,
        family: Family::Modifier,
        extensions: &[".java"],
        pattern: r"(?:public|protected|private|static|\s) +[\w<>\[\]]+\s+(?P<name>[a-zA-Z0-9_]+)\s*\((?P<args>[^)]*)\)\s*(?:throws\s.*?)?\{",
    },
    BuiltinRule {
        language: LanguageId::Kotlin,
        family: Family::ColonAnnotated,
        extensions: &[".kt", ".kts"],
        pattern: r"\bfun\s+(?:<[^>]*>\s*)?(?:[a-zA-Z0-9_<>]+\.)?(?P<name>[a-zA-Z0-9_]+)\s*\((?P<args>[^)]*)\)(?:\s*:\s*(?P<ret>[a-zA-Z0-9_<>?.]+))?\s*\{",
    },
    BuiltinRule {
        language: LanguageId::Swift,
        family: Family::Keyword,
        extensions: &[".swift"],
        pattern: r"\bfunc\s+(?P<name>[a-zA-Z0-9_]+)\s*\((?P<args>[^)]*)\)(?:\s+(?:async|throws|rethrows))*(?:\s*->\s*(?P<ret>[a-zA-Z0-9_<>\[\]?.]+))?\s*\{",
    },
    BuiltinRule {
        language: LanguageId::C,
        family: Family::ReturnTypeFirst,
        extensions: &[".c", ".h"],
        pattern: r"(?P<ret>[a-zA-Z0-9_]+)\s+(?P<name>[a-zA-Z0-9_]+)\s*\((?P<args>[^)]*)\)\s*\{",
    },
    BuiltinRule {
        language: LanguageId::Cpp,
        family: Family::ReturnTypeFirst,
        extensions: &[".cpp", ".hpp", ".cc"],
        pattern: r"(?P<ret>[a-zA-Z0-9_]+)\s+(?P<name>(?:[a-zA-Z0-9_]+::)*~?[a-zA-Z0-9_]+)\s*\((?P<args>[^)]*)\)\s*(?:const)?\s*\{",
    },
    BuiltinRule {
        language: LanguageId::Php,
        family: Family::ColonAnnotated,
        extensions: &[".php"],
        pattern: r"\bfunction\s+(?P<name>[a-zA-Z0-9_]+)\s*\((?P<args>[^)]*)\)\s*(?::\s*(?P<ret>\??[a-zA-Z0-9_<>\\|]+))?\s*\{",
    },
];

/// Errors building a registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A pattern failed to compile.
    #[error("invalid pattern for {language}: {source}")]
    InvalidPattern {
        /// Language the pattern belongs to.
        language: LanguageId,
        /// Compile error.
        source: regex::Error,
    },

    /// A pattern lacks a named group its family reads.
    #[error("pattern for {language} has no '{group}' group, required by the {family} family")]
    MissingGroup {
        /// Language the pattern belongs to.
        language: LanguageId,
        /// Family of the rule.
        family: Family,
        /// Missing group name, or alternatives joined by `|`.
        group: String,
    },

    /// A language name in the configuration is not supported.
    #[error(transparent)]
    UnknownLanguage(#[from] UnknownLanguage),

    /// An extension in the configuration does not start with a dot.
    #[error("extension '{0}' must start with '.'")]
    InvalidExtension(String),
}

/// A compiled pattern plus the family that interprets its captures.
#[derive(Debug, Clone)]
pub struct MatchRule {
    language: LanguageId,
    family: Family,
    regex: Regex,
}

impl MatchRule {
    /// Compiles `pattern` with multi-line and dot-matches-newline enabled.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidPattern`] if the pattern does not
    /// compile or exceeds the size limit, and [`RegistryError::MissingGroup`]
    /// if it lacks a named group that `family` reads.
    pub fn new(
        language: LanguageId,
        family: Family,
        pattern: &str,
    ) -> Result<Self, RegistryError> {
        let regex = RegexBuilder::new(pattern)
            .multi_line(true)
            .dot_matches_new_line(true)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()
            .map_err(|source| RegistryError::InvalidPattern { language, source })?;
        check_groups(&regex, language, family)?;
        Ok(Self {
            language,
            family,
            regex,
        })
    }

    /// Language this rule belongs to.
    #[must_use]
    pub fn language(&self) -> LanguageId {
        self.language
    }

    /// Family deciding how captures map to a signature.
    #[must_use]
    pub fn family(&self) -> Family {
        self.family
    }

    /// Source text of the pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Named groups a family cannot do without. Each entry is satisfied by any
/// one of its alternatives.
fn required_groups(family: Family) -> &'static [&'static [&'static str]] {
    match family {
        Family::Keyword | Family::ColonAnnotated | Family::Modifier => &[&["name"]],
        Family::ReturnTypeFirst => &[&["ret"], &["name"], &["args"]],
        Family::Arrow => &[&["fn_name", "arrow_name", "method_name"]],
    }
}

fn check_groups(
    regex: &Regex,
    language: LanguageId,
    family: Family,
) -> Result<(), RegistryError> {
    let present: Vec<&str> = regex.capture_names().flatten().collect();
    for alternatives in required_groups(family) {
        if !alternatives.iter().any(|group| present.contains(group)) {
            return Err(RegistryError::MissingGroup {
                language,
                family,
                group: alternatives.join("|"),
            });
        }
    }
    Ok(())
}

/// Immutable lookup tables for languages and their rules.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    rules: BTreeMap<LanguageId, MatchRule>,
    extensions: BTreeMap<String, LanguageId>,
}

impl PatternRegistry {
    /// Builds the registry from the built-in table.
    ///
    /// # Errors
    ///
    /// Returns an error only if a built-in pattern fails to compile.
    pub fn builtin() -> Result<Self, RegistryError> {
        let mut rules = BTreeMap::new();
        let mut extensions = BTreeMap::new();
        for row in BUILTIN_RULES {
            let rule = MatchRule::new(row.language, row.family, row.pattern)?;
            rules.insert(row.language, rule);
            for ext in row.extensions {
                extensions.insert((*ext).to_owned(), row.language);
            }
        }
        Ok(Self { rules, extensions })
    }

    /// Builds the built-in registry, then applies extension mappings and
    /// pattern replacements from `config`.
    ///
    /// A replaced pattern keeps the family of the built-in rule.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown language names, extensions without a
    /// leading dot, or patterns that do not compile.
    pub fn from_config(config: &LanguagesConfig) -> Result<Self, RegistryError> {
        let mut registry = Self::builtin()?;

        for (ext, lang) in &config.extensions {
            if !ext.starts_with('.') {
                return Err(RegistryError::InvalidExtension(ext.clone()));
            }
            let language: LanguageId = lang.parse()?;
            debug!("Mapping {} to {}", ext, language);
            registry.extensions.insert(ext.clone(), language);
        }

        for (lang, pattern) in &config.patterns {
            let language: LanguageId = lang.parse()?;
            let family = registry
                .rules
                .get(&language)
                .map_or(Family::Keyword, MatchRule::family);
            debug!("Replacing pattern for {}", language);
            registry
                .rules
                .insert(language, MatchRule::new(language, family, pattern)?);
        }

        Ok(registry)
    }

    /// Returns the rule for `language`, if any.
    #[must_use]
    pub fn rule_for(&self, language: LanguageId) -> Option<&MatchRule> {
        self.rules.get(&language)
    }

    /// Returns the language selected by `extension` (including the leading
    /// dot, case-sensitive).
    #[must_use]
    pub fn language_for(&self, extension: &str) -> Option<LanguageId> {
        self.extensions.get(extension).copied()
    }

    /// Extensions mapped to `language`, sorted.
    #[must_use]
    pub fn extensions_for(&self, language: LanguageId) -> Vec<&str> {
        self.extensions
            .iter()
            .filter(|(_, lang)| **lang == language)
            .map(|(ext, _)| ext.as_str())
            .collect()
    }

    /// All rules, ordered by language.
    pub fn rules(&self) -> impl Iterator<Item = &MatchRule> {
        self.rules.values()
    }

    /// Extracts signatures from `content` using the rule for `language`.
    ///
    /// # Errors
    ///
    /// See [`ExtractError`].
    pub fn extract(
        &self,
        content: &str,
        language: LanguageId,
    ) -> Result<Vec<Signature>, ExtractError> {
        let rule = self
            .rule_for(language)
            .ok_or(ExtractError::MissingRule(language))?;
        extractor::extract(content, rule)
    }
}
