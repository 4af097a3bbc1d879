//! Stage 5: Variable renaming — short names for `var`/`let`/`const` bindings.
//!
//! Declarations are recognised lexically, so a name declared in two different blocks is
//! one binding here. Renaming happens on a shielded buffer so string, template and regex
//! contents are never touched.
//!
//! Short names follow `a … z, a1 …` but skip any name already used by an identifier that
//! is not being renamed, so the sequence can have gaps: `var total` beside a parameter `a`
//! becomes `b`, and a later declaration may jump further ahead.

use crate::shield::Shielded;
use regex::{Captures, Regex};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

static RE_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:var|let|const)\s+([A-Za-z_$][\w$]*)").unwrap());
static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\w$]+").unwrap());

/// The Nth short name: `a … z, a1 … z1, a2 …`.
pub fn short_name(n: usize) -> String {
    let letter = ALPHABET[n % 26] as char;
    match n / 26 {
        0 => letter.to_string(),
        suffix => format!("{letter}{suffix}"),
    }
}

/// Monotonic short-name source for one renaming pass.
#[derive(Debug, Default)]
pub struct NameGenerator {
    counter: usize,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next name not present in `taken`. Skipped names still consume the counter.
    pub fn next_name(&mut self, taken: &HashSet<&str>) -> String {
        loop {
            let name = short_name(self.counter);
            self.counter += 1;
            if !taken.contains(name.as_str()) {
                return name;
            }
        }
    }

    pub fn issued(&self) -> usize {
        self.counter
    }
}

/// Original identifier → short name, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl RenameTable {
    /// Collect declarations from a shielded buffer and assign short names.
    pub fn build(code: &str) -> Self {
        let declared: Vec<&str> = RE_DECLARATION
            .captures_iter(code)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();
        if declared.is_empty() {
            return Self::default();
        }
        let declared_set: HashSet<&str> = declared.iter().copied().collect();
        let taken: HashSet<&str> = identifier_tokens(code)
            .filter(|t| !declared_set.contains(t))
            .collect();

        let mut table = Self::default();
        let mut names = NameGenerator::new();
        for ident in declared {
            if table.get(ident).is_none() {
                let short = names.next_name(&taken);
                table.insert(ident, short);
            }
        }
        tracing::trace!(entries = table.len(), issued = names.issued(), "rename table built");
        table
    }

    fn insert(&mut self, original: &str, short: String) {
        self.index.insert(original.to_string(), self.entries.len());
        self.entries.push((original.to_string(), short));
    }

    pub fn get(&self, original: &str) -> Option<&str> {
        self.index.get(original).map(|&i| self.entries[i].1.as_str())
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `obj.name` and `obj?.name` are property accesses; `...name` is a spread.
fn is_member_access(code: &str, start: usize) -> bool {
    let prefix = &code[..start];
    prefix.ends_with('.') && !prefix.ends_with("...")
}

/// Identifier-like tokens that refer to bindings (not numbers, not member names).
fn identifier_tokens(code: &str) -> impl Iterator<Item = &str> {
    RE_TOKEN.find_iter(code).filter_map(move |m| {
        let token = m.as_str();
        let starts_with_digit = token.starts_with(|c: char| c.is_ascii_digit());
        (!starts_with_digit && !is_member_access(code, m.start())).then_some(token)
    })
}

/// Replace every binding occurrence of a table entry in one pass.
///
/// Each token is looked up once, so a replacement can never be matched again by a later
/// entry.
pub fn substitute(code: &str, table: &RenameTable) -> String {
    if table.is_empty() {
        return code.to_string();
    }
    RE_TOKEN
        .replace_all(code, |caps: &Captures| {
            let Some(m) = caps.get(0) else { return String::new() };
            let token = m.as_str();
            if is_member_access(code, m.start()) {
                return token.to_string();
            }
            table.get(token).unwrap_or(token).to_string()
        })
        .into_owned()
}

/// Shield literals, rename declared bindings, restore literals.
pub fn rename(src: &str) -> String {
    rename_with_table(src).0
}

/// Like [`rename`], also returning the table that was applied.
pub fn rename_with_table(src: &str) -> (String, RenameTable) {
    let shielded = Shielded::new(src);
    let table = RenameTable::build(&shielded.text);
    let renamed = substitute(&shielded.text, &table);
    (shielded.restore(&renamed), table)
}
