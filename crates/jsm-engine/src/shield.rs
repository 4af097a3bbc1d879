//! Literal shielding: swap every string, template-text and regex literal for an opaque
//! placeholder, rewrite the remaining code, then put the literals back verbatim.

use crate::lexer;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Opening delimiter of a placeholder (Unicode private use area).
pub const PLACEHOLDER_OPEN: char = '\u{E000}';
/// Closing delimiter of a placeholder.
pub const PLACEHOLDER_CLOSE: char = '\u{E001}';

static RE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{E000}([0-9]+)\x{E001}").unwrap());

/// Placeholder token for the literal at `index`.
pub fn placeholder(index: usize) -> String {
    format!("{PLACEHOLDER_OPEN}{index}{PLACEHOLDER_CLOSE}")
}

/// A buffer with its literals replaced by placeholders.
#[derive(Debug, Clone)]
pub struct Shielded {
    /// Code with placeholders in place of literals.
    pub text: String,
    literals: Vec<String>,
}

impl Shielded {
    pub fn new(src: &str) -> Self {
        let mut text = String::with_capacity(src.len());
        let mut literals = Vec::new();
        for span in lexer::scan(src) {
            let slice = span.text(src);
            if span.kind.is_literal() {
                text.push_str(&placeholder(literals.len()));
                literals.push(slice.to_string());
            } else {
                text.push_str(slice);
            }
        }
        Self { text, literals }
    }

    /// Number of shielded literals.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Original text of the literal behind placeholder `index`.
    pub fn literal(&self, index: usize) -> Option<&str> {
        self.literals.get(index).map(String::as_str)
    }

    /// Replace every placeholder in `text` with its original literal.
    /// Unknown indices are left untouched.
    pub fn restore(&self, text: &str) -> String {
        if self.literals.is_empty() {
            return text.to_string();
        }
        RE_PLACEHOLDER
            .replace_all(text, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| self.literal(i))
                    .map_or_else(|| caps[0].to_string(), str::to_string)
            })
            .into_owned()
    }
}
