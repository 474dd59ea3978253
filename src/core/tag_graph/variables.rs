//! Identifier scanning for tag condition strings.
//!
//! Conditions are never parsed. String literals are stripped, the remaining text is
//! scanned for identifier-shaped tokens, and word-form operators and literals are
//! filtered out.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Words that look like identifiers but never name a tag. Compared case-insensitively.
pub const STOPWORDS: [&str; 7] = ["and", "or", "not", "true", "false", "null", "undefined"];

fn double_quoted_literal() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#""[^"]*""#).expect("valid double-quote pattern"))
}

fn single_quoted_literal() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"'[^']*'").expect("valid single-quote pattern"))
}

fn identifier() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\b[a-zA-Z_][a-zA-Z0-9_]*\b").expect("valid identifier pattern")
    })
}

/// Returns `true` when `token` is a reserved word of the condition language.
pub fn is_stopword(token: &str) -> bool {
    let lowered = token.to_lowercase();
    STOPWORDS.contains(&lowered.as_str())
}

/// Extract the tag names referenced by a condition, in order of first appearance.
///
/// Absent or empty conditions yield an empty list. Malformed expressions are not
/// rejected; whatever identifier-shaped tokens survive are returned.
pub fn extract_variables(condition: Option<&str>) -> Vec<String> {
    let Some(condition) = condition.filter(|text| !text.is_empty()) else {
        return Vec::new();
    };

    let without_double = double_quoted_literal().replace_all(condition, "");
    let stripped = single_quoted_literal().replace_all(&without_double, "");

    let mut seen = HashSet::new();
    let mut variables = Vec::new();
    for token in identifier().find_iter(&stripped) {
        let name = token.as_str();
        if is_stopword(name) || !seen.insert(name.to_string()) {
            continue;
        }
        variables.push(name.to_string());
    }
    variables
}
