//! Stage 3: Whitespace normalization — trim lines, collapse runs, join lines.

use crate::lexer::is_word_char;
use crate::shield::Shielded;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static RE_LINE_EDGES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[^\S\n]+|[^\S\n]+$").unwrap());
static RE_WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());
static RE_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());

/// Strip leading and trailing whitespace on every line.
pub fn trim_lines(text: &str) -> String {
    RE_LINE_EDGES.replace_all(text, "").into_owned()
}

/// Collapse runs of two or more whitespace characters into one space.
pub fn collapse_runs(text: &str) -> String {
    RE_WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

/// Remove line breaks. A break between two identifier characters turns into a space.
pub fn join_lines(text: &str) -> String {
    RE_NEWLINES
        .replace_all(text, |caps: &Captures| {
            let Some(m) = caps.get(0) else { return String::new() };
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            if before.is_some_and(is_word_char) && after.is_some_and(is_word_char) {
                " ".to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

/// Apply all whitespace passes to the code outside literals.
pub fn normalize(src: &str) -> String {
    if src.is_empty() {
        return String::new();
    }
    let shielded = Shielded::new(src);
    let mut result = trim_lines(&shielded.text);
    result = collapse_runs(&result);
    result = join_lines(&result);
    shielded.restore(&result)
}
