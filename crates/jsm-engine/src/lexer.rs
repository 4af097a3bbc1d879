//! Lexical span classifier.
//!
//! A single forward scan splits source text into code, comments and literals so later
//! stages never mistake a `//` inside a string or a `/*` inside a regex for a comment.
//! The scanner never fails: unterminated constructs simply run to the end of the line
//! (strings) or the end of the input (comments, templates).

/// Kind of a classified slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Code,
    LineComment,
    BlockComment,
    /// Single- or double-quoted string, quotes included.
    Str,
    /// Template text: from the opening backtick or the `}` closing an interpolation, up to
    /// and including the closing backtick or the next `${`.
    Template,
    /// Regular expression literal including flags.
    Regex,
}

impl SpanKind {
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Str | Self::Template | Self::Regex)
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }
}

/// Byte range of a classified slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        &src[self.start..self.end]
    }
}

/// Keywords after which a `/` starts a regex rather than a division.
const KEYWORDS_BEFORE_EXPR: &[&str] = &[
    "return", "typeof", "instanceof", "in", "of", "new", "delete", "void", "throw",
    "case", "do", "else", "yield", "await",
];

/// Classify `src` into contiguous spans covering every byte.
pub fn scan(src: &str) -> Vec<Span> {
    Scanner::new(src).run()
}

/// Characters that can be part of an identifier-like token. Non-ASCII characters count,
/// which also covers the private-use placeholder delimiters used for shielding.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == '_'
        || c == '$'
        || c == '\\'
        || (!c.is_ascii() && !c.is_whitespace())
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b == b'\\' || b >= 0x80
}

struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    code_start: usize,
    regex_allowed: bool,
    /// Brace depth inside each open `${ ... }`, innermost last.
    interpolations: Vec<usize>,
    spans: Vec<Span>,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            code_start: 0,
            regex_allowed: true,
            interpolations: Vec::new(),
            spans: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Span> {
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            match b {
                b'/' => match self.bytes.get(self.pos + 1) {
                    Some(b'/') => self.line_comment(),
                    Some(b'*') => self.block_comment(),
                    _ => {
                        if !(self.regex_allowed && self.regex()) {
                            self.punct();
                        }
                    }
                },
                b'\'' | b'"' => self.string(b),
                b'`' => self.template(self.pos),
                b'{' => {
                    if let Some(depth) = self.interpolations.last_mut() {
                        *depth += 1;
                    }
                    self.punct();
                }
                b'}' => match self.interpolations.last().copied() {
                    Some(0) => {
                        self.interpolations.pop();
                        self.template(self.pos);
                    }
                    Some(_) => {
                        if let Some(depth) = self.interpolations.last_mut() {
                            *depth -= 1;
                        }
                        self.close();
                    }
                    None => self.close(),
                },
                b')' | b']' => self.close(),
                b'+' | b'-' if self.bytes.get(self.pos + 1) == Some(&b) => self.increment(),
                b if b.is_ascii_whitespace() => self.pos += 1,
                b if b.is_ascii_digit() => self.number(),
                b if is_ident_byte(b) => self.word(),
                _ => self.punct(),
            }
        }
        self.flush_code(self.bytes.len());
        self.spans
    }

    fn flush_code(&mut self, end: usize) {
        if end > self.code_start {
            self.spans.push(Span { kind: SpanKind::Code, start: self.code_start, end });
        }
    }

    fn push(&mut self, kind: SpanKind, start: usize, end: usize) {
        let end = end.min(self.bytes.len());
        self.flush_code(start);
        self.spans.push(Span { kind, start, end });
        self.code_start = end;
        self.pos = end;
    }

    fn punct(&mut self) {
        self.pos += 1;
        self.regex_allowed = true;
    }

    /// `++`/`--`. Only the postfix form can be followed by `/`, and there it divides.
    fn increment(&mut self) {
        self.pos += 2;
        self.regex_allowed = false;
    }

    fn close(&mut self) {
        self.pos += 1;
        self.regex_allowed = false;
    }

    fn word(&mut self) {
        let start = self.pos;
        while self.pos < self.bytes.len() && is_ident_byte(self.bytes[self.pos]) {
            self.pos += 1;
        }
        self.regex_allowed = KEYWORDS_BEFORE_EXPR.contains(&&self.src[start..self.pos]);
    }

    fn number(&mut self) {
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if !(b.is_ascii_alphanumeric() || b == b'_' || b == b'.') {
                break;
            }
            self.pos += 1;
        }
        self.regex_allowed = false;
    }

    fn line_comment(&mut self) {
        let start = self.pos;
        let end = self.src[start..].find('\n').map_or(self.bytes.len(), |i| start + i);
        self.push(SpanKind::LineComment, start, end);
    }

    fn block_comment(&mut self) {
        let start = self.pos;
        let end = self.src[start + 2..]
            .find("*/")
            .map_or(self.bytes.len(), |i| start + 2 + i + 2);
        self.push(SpanKind::BlockComment, start, end);
    }

    fn string(&mut self, quote: u8) {
        let start = self.pos;
        let mut i = start + 1;
        loop {
            match self.bytes.get(i) {
                None | Some(b'\n') => break,
                Some(b'\\') => i += 2,
                Some(&c) if c == quote => {
                    i += 1;
                    break;
                }
                Some(_) => i += 1,
            }
        }
        self.push(SpanKind::Str, start, i);
        self.regex_allowed = false;
    }

    /// Scan template text starting at a backtick or at the `}` ending an interpolation.
    fn template(&mut self, start: usize) {
        let mut i = start + 1;
        let mut opens_interpolation = false;
        loop {
            match self.bytes.get(i) {
                None => break,
                Some(b'\\') => i += 2,
                Some(b'`') => {
                    i += 1;
                    break;
                }
                Some(b'$') if self.bytes.get(i + 1) == Some(&b'{') => {
                    i += 2;
                    opens_interpolation = true;
                    break;
                }
                Some(_) => i += 1,
            }
        }
        if opens_interpolation {
            self.interpolations.push(0);
        }
        self.push(SpanKind::Template, start, i);
        self.regex_allowed = opens_interpolation;
    }

    /// Try to scan a regex literal at `pos`. Returns false when no closing `/` is found
    /// on the same line, leaving the position untouched.
    fn regex(&mut self) -> bool {
        let start = self.pos;
        let mut i = start + 1;
        let mut in_class = false;
        loop {
            match self.bytes.get(i) {
                None | Some(b'\n') => return false,
                Some(b'\\') => i += 2,
                Some(b'[') => {
                    in_class = true;
                    i += 1;
                }
                Some(b']') => {
                    in_class = false;
                    i += 1;
                }
                Some(b'/') if !in_class => {
                    i += 1;
                    break;
                }
                Some(_) => i += 1,
            }
        }
        while self.bytes.get(i).is_some_and(|b| b.is_ascii_alphabetic()) {
            i += 1;
        }
        self.push(SpanKind::Regex, start, i);
        self.regex_allowed = false;
        true
    }
}
