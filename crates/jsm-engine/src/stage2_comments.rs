//! Stage 2: Comment stripping.

use crate::lexer::{self, is_word_char, SpanKind};

/// Remove every line and block comment outside literals.
///
/// Line comments keep their terminating newline. A block comment wedged between two
/// identifier characters becomes a single space so the tokens stay apart.
pub fn strip(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    for span in lexer::scan(src) {
        if !span.kind.is_comment() {
            out.push_str(span.text(src));
            continue;
        }
        if span.kind == SpanKind::BlockComment {
            let before = out.chars().next_back();
            let after = src[span.end..].chars().next();
            if before.is_some_and(is_word_char) && after.is_some_and(is_word_char) {
                out.push(' ');
            }
        }
    }
    out
}
