//! Signature extraction.
//!
//! Each [`Family`] has its own mapping function from a match's named capture
//! groups to a [`Signature`]. Matching is done by the `regex` crate, which
//! runs in time linear in the input, so malformed input cannot cause
//! runaway backtracking.

use regex::Captures;
use tracing::debug;

use crate::registry::MatchRule;
use crate::types::{Family, LanguageId, Signature};

/// Words that statement syntax places where a name or type is expected,
/// e.g. `else if (x) {` or `while (x) {`.
const CONTROL_KEYWORDS: &[&str] = &[
    "if", "else", "elif", "for", "foreach", "while", "do", "switch", "case", "catch", "return",
    "throw", "new", "delete", "sizeof", "typeof", "with", "function",
];

/// Why extraction produced no result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// No rule is registered for the language.
    #[error("no match rule registered for {0}")]
    MissingRule(LanguageId),

    /// Content contains NUL bytes and is not source text.
    #[error("content looks binary")]
    BinaryContent,
}

/// Extracts signatures from `content` in match order.
///
/// Matches whose name is empty after trimming are dropped.
///
/// # Errors
///
/// Returns [`ExtractError::BinaryContent`] when `content` contains a NUL byte.
pub fn extract(content: &str, rule: &MatchRule) -> Result<Vec<Signature>, ExtractError> {
    if content.contains('\0') {
        return Err(ExtractError::BinaryContent);
    }

    let map: fn(&Captures<'_>) -> Option<Signature> = match rule.family() {
        Family::Keyword | Family::ColonAnnotated => keyword,
        Family::ReturnTypeFirst => return_type_first,
        Family::Arrow => arrow,
        Family::Modifier => modifier,
    };

    let signatures: Vec<Signature> = rule
        .regex()
        .captures_iter(content)
        .filter_map(|caps| map(&caps))
        .collect();

    debug!(
        "{} rule produced {} signature(s)",
        rule.language(),
        signatures.len()
    );
    Ok(signatures)
}

/// Text of a named group, or `""` when it did not participate.
fn group<'h>(caps: &Captures<'h>, name: &str) -> &'h str {
    caps.name(name).map_or("", |m| m.as_str())
}

fn is_control_keyword(word: &str) -> bool {
    CONTROL_KEYWORDS.contains(&word.trim())
}

/// `def name(args) -> ret:`, `fun name(args): Ret {`: name, then optional
/// args and return type.
fn keyword(caps: &Captures<'_>) -> Option<Signature> {
    Signature::new(
        group(caps, "name"),
        group(caps, "args"),
        group(caps, "ret"),
    )
}

/// `Ret name(args) {`: requires both a return type and a name.
fn return_type_first(caps: &Captures<'_>) -> Option<Signature> {
    let ret = group(caps, "ret");
    let name = group(caps, "name");
    if ret.trim().is_empty() || is_control_keyword(ret) || is_control_keyword(name) {
        return None;
    }
    Signature::new(name, group(caps, "args"), ret)
}

/// Whichever of the `function`, arrow-assignment or method alternatives
/// matched.
fn arrow(caps: &Captures<'_>) -> Option<Signature> {
    let (name, args, ret) = if caps.name("fn_name").is_some() {
        (
            group(caps, "fn_name"),
            group(caps, "fn_args"),
            group(caps, "fn_ret"),
        )
    } else if caps.name("arrow_name").is_some() {
        (
            group(caps, "arrow_name"),
            group(caps, "arrow_args"),
            group(caps, "arrow_ret"),
        )
    } else {
        (group(caps, "method_name"), group(caps, "method_args"), "")
    };

    if is_control_keyword(name) {
        return None;
    }
    Signature::new(name, args, ret)
}

/// `public Ret name(args) {`: the return type is not isolated by the
/// pattern, so only name and args are kept.
fn modifier(caps: &Captures<'_>) -> Option<Signature> {
    let name = group(caps, "name");
    if is_control_keyword(name) {
        return None;
    }
    Signature::new(name, group(caps, "args"), "")
}
