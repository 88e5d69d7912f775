//! `${NAME}` / `${NAME:default}` placeholder expansion over serialized YAML.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::([^}]*))?\}").expect("placeholder pattern")
});

/// Replaces every placeholder in `text` with `lookup(NAME)`, else the inline
/// default, else the empty string. Text that is not a well-formed placeholder
/// is left untouched.
///
/// An empty expansion that makes up a whole plain scalar is written as `''`,
/// so it re-parses as an empty string instead of null.
pub fn expand_placeholders<F>(text: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| {
            let value = lookup(&caps[1])
                .or_else(|| caps.get(2).map(|d| d.as_str().to_string()))
                .unwrap_or_default();
            match caps.get(0) {
                Some(m) if value.is_empty() && is_whole_scalar(text, m.start(), m.end()) => {
                    "''".to_string()
                }
                _ => value,
            }
        })
        .into_owned()
}

/// Whether `text[start..end]` is a complete plain scalar in block or flow
/// YAML: a mapping key or value, a sequence item, or a flow collection entry.
fn is_whole_scalar(text: &str, start: usize, end: usize) -> bool {
    let raw_before = &text[..start];
    let before = raw_before.trim_end_matches(' ');
    let spaced = before.len() < raw_before.len();
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);

    let opens = match before.chars().last() {
        None | Some('\n') | Some('[') | Some('{') | Some(',') => true,
        Some(':') | Some('?') => spaced,
        Some('-') => spaced && before[line_start..before.len() - 1].trim_start().is_empty(),
        _ => false,
    };

    let after = text[end..].trim_start_matches(' ');
    let closes = match after.chars().next() {
        None | Some('\n') | Some(',') | Some(']') | Some('}') => true,
        Some(':') => after[1..].starts_with([' ', '\n']) || after.len() == 1,
        _ => false,
    };

    opens && closes
}
