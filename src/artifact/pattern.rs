//! File name patterns for artifact discovery.
//!
//! Supports the `*` and `?` wildcards and `[...]` character classes
//! (`[!...]` negates, `a-z` ranges). Every other character matches
//! literally, so a plain binary name is an exact match.
//!
//! Names are matched as raw bytes, so file names that are not valid UTF-8
//! still match wildcards.

use anyhow::{Context, Result};
use regex::bytes::Regex;
use std::ffi::OsStr;

/// A compiled file name pattern.
#[derive(Debug, Clone)]
pub struct NamePattern {
    source: String,
    regex: Regex,
}

impl NamePattern {
    /// Compile a glob-style pattern.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&translate(pattern))
            .with_context(|| format!("Invalid file name pattern '{}'", pattern))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Returns true if `name` (a single path segment) matches.
    pub fn matches(&self, name: impl AsRef<OsStr>) -> bool {
        self.regex.is_match(name.as_ref().as_encoded_bytes())
    }

    /// The pattern as given.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Glob to anchored byte regex.
///
/// `*` and `?` fall back to single bytes so invalid UTF-8 is still covered.
fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut expr = String::with_capacity(pattern.len() + 16);
    expr.push('^');

    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => expr.push_str("(?s-u:.)*"),
            '?' => expr.push_str("(?:(?s:.)|(?s-u:.))"),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    expr.push_str(&translate_class(&chars[i + 1..end]));
                    i = end;
                }
                None => expr.push_str(r"\["),
            },
            c => expr.push_str(&regex::escape(c.encode_utf8(&mut [0u8; 4]))),
        }
        i += 1;
    }

    expr.push('$');
    expr
}

/// Index of the `]` closing the class opened at `open`.
///
/// A `]` directly after `[` or `[!` is part of the class.
fn class_end(chars: &[char], open: usize) -> Option<usize> {
    let mut start = open + 1;
    if chars.get(start) == Some(&'!') {
        start += 1;
    }
    if chars.get(start) == Some(&']') {
        start += 1;
    }
    chars
        .get(start..)?
        .iter()
        .position(|&c| c == ']')
        .map(|offset| start + offset)
}

fn translate_class(body: &[char]) -> String {
    let (negated, body) = match body.split_first() {
        Some(('!', rest)) => (true, rest),
        _ => (false, body),
    };

    let mut class = String::from("[");
    if negated {
        class.push('^');
    }
    for &c in body {
        if matches!(c, '\\' | '[' | ']' | '^' | '&' | '~') {
            class.push('\\');
        }
        class.push(c);
    }
    class.push(']');
    class
}
