//! Stage 1: License extraction — hold a leading `/*! ... */` block aside.

use regex::Regex;
use std::sync::LazyLock;

static RE_LICENSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A/\*![\s\S]*?\*/").unwrap());

/// Split a leading license block off `src`.
///
/// Returns the block followed by a newline, and the remaining buffer. Only a block at
/// byte 0 qualifies; anything else is left for the comment stripper.
pub fn extract(src: &str) -> (Option<String>, String) {
    match RE_LICENSE.find(src) {
        Some(m) => (Some(format!("{}\n", m.as_str())), src[m.end()..].to_string()),
        None => (None, src.to_string()),
    }
}

/// Prepend a preserved license block to the minified body.
pub fn reinsert(license: Option<&str>, body: String) -> String {
    match license {
        Some(block) => {
            let mut out = String::with_capacity(block.len() + body.len());
            out.push_str(block);
            out.push_str(&body);
            out
        }
        None => body,
    }
}
