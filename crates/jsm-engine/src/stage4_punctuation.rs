//! Stage 4: Punctuation compaction — drop whitespace around operators and brackets.

use crate::lexer::is_word_char;
use crate::shield::{Shielded, PLACEHOLDER_OPEN};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static RE_OPERATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([-+*/=<>!?:&|;,])\s*").unwrap());
static RE_FUNCTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bfunction\s+").unwrap());
static RE_COMMA_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s+").unwrap());
static RE_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([{}\[\]()])\s*").unwrap());

/// Would joining `left` and `right` produce a different token?
/// `a - -b` must not become `a--b`, and `a / /re/` must not open a line comment.
fn fuses(left: Option<char>, right: Option<char>) -> bool {
    matches!(
        (left, right),
        (Some('+'), Some('+')) | (Some('-'), Some('-')) | (Some('/'), Some(PLACEHOLDER_OPEN))
    )
}

/// Remove whitespace on both sides of every operator and separator.
pub fn tighten_operators(text: &str) -> String {
    RE_OPERATOR
        .replace_all(text, |caps: &Captures| {
            let (Some(whole), Some(op)) = (caps.get(0), caps.get(1)) else {
                return String::new();
            };
            let op_char = op.as_str().chars().next();
            let before = text[..whole.start()].chars().next_back();
            let after = text[whole.end()..].chars().next();

            let mut out = String::with_capacity(3);
            if whole.start() < op.start() && fuses(before, op_char) {
                out.push(' ');
            }
            out.push_str(op.as_str());
            if op.end() < whole.end() && fuses(op_char, after) {
                out.push(' ');
            }
            out
        })
        .into_owned()
}

/// Collapse `;;`-runs into one terminator, leaving `for(;;)` headers intact.
pub fn collapse_semicolons(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ';' if depth == 0 && out.ends_with(';') => continue,
            _ => {}
        }
        out.push(c);
    }
    out
}

/// `function  name(` keeps one space before the name; `function (` loses it.
pub fn normalize_function(text: &str) -> String {
    RE_FUNCTION
        .replace_all(text, |caps: &Captures| {
            let end = caps.get(0).map_or(text.len(), |m| m.end());
            match text[end..].chars().next() {
                Some(c) if is_word_char(c) => "function ".to_string(),
                _ => "function".to_string(),
            }
        })
        .into_owned()
}

pub fn strip_comma_space(text: &str) -> String {
    RE_COMMA_SPACE.replace_all(text, ",").into_owned()
}

pub fn strip_bracket_space(text: &str) -> String {
    RE_BRACKET.replace_all(text, "$1").into_owned()
}

/// Apply all punctuation passes to the code outside literals.
pub fn compact(src: &str) -> String {
    if src.is_empty() {
        return String::new();
    }
    let shielded = Shielded::new(src);
    let mut result = tighten_operators(&shielded.text);
    result = collapse_semicolons(&result);
    result = normalize_function(&result);
    result = strip_comma_space(&result);
    result = strip_bracket_space(&result);
    shielded.restore(&result)
}
