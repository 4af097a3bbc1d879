//! jsmin engine — staged JavaScript minifier.
//!
//! Stages:
//! 1. License extraction (keep a leading `/*! ... */` block aside)
//! 2. Comment stripping
//! 3. Whitespace normalization
//! 4. Punctuation compaction
//! 5. Variable renaming (optional)
//!
//! Every stage re-scans the full buffer with a literal-aware [`lexer`], so string,
//! template and regex contents survive untouched.

pub mod lexer;
pub mod pipeline;
pub mod shield;
pub mod stage1_license;
pub mod stage2_comments;
pub mod stage3_whitespace;
pub mod stage4_punctuation;
pub mod stage5_rename;

pub use pipeline::{minify, Minifier, MinifyOptions, MinifyResult, Stage};

#[cfg(test)]
mod tests;
