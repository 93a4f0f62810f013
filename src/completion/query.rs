//! Query extraction: deriving the token being typed from a line and cursor
//!
//! Given the current line text and a 1-based cursor column, scan backward for
//! the nearest boundary character and slice out the partial word between it
//! and the cursor. The boundary pattern comes from a per-filetype trigger
//! table; filetypes without an entry use the default boundary `[^\w\-]`
//! (word characters and hyphen are part of a token).
//!
//! All indices are char offsets, not byte offsets, so multibyte lines are
//! handled without slicing mid-codepoint.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Boundary used when a filetype has no registered trigger pattern.
static DEFAULT_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\-]").expect("default boundary pattern is valid"));

/// The partial word under the cursor, recomputed on every insert-mode cursor
/// move and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionQuery {
    /// Char offset where the token begins (just after the boundary char, or
    /// 0 when the token starts the line).
    pub start_index: usize,
    /// The partial word between `start_index` and the cursor.
    pub query: String,
    /// The boundary character itself, `None` at line start.
    ///
    /// Policy-free for now: a `.` here is the seam where a semantic source
    /// would be consulted instead of the keyword pool.
    pub left_char: Option<char>,
}

/// Filetype → boundary pattern. Read-only after engine construction.
#[derive(Debug, Default)]
pub struct TriggerTable {
    patterns: HashMap<String, Regex>,
}

impl TriggerTable {
    pub fn empty() -> Self {
        Self { patterns: HashMap::new() }
    }

    /// Compile and register a boundary pattern for a filetype.
    pub fn register(&mut self, filetype: &str, pattern: &str) -> Result<(), regex::Error> {
        let regex = Regex::new(pattern)?;
        self.patterns.insert(filetype.to_string(), regex);
        Ok(())
    }

    pub fn has_entry(&self, filetype: &str) -> bool {
        self.patterns.contains_key(filetype)
    }

    /// The boundary pattern for a filetype, falling back to the default.
    pub fn boundary(&self, filetype: &str) -> &Regex {
        self.patterns.get(filetype).unwrap_or(&DEFAULT_BOUNDARY)
    }
}

fn is_boundary(pattern: &Regex, ch: char) -> bool {
    let mut buf = [0u8; 4];
    pattern.is_match(ch.encode_utf8(&mut buf))
}

/// Rightmost index `<= from` whose char matches the boundary pattern.
fn find_index_right(chars: &[char], pattern: &Regex, from: usize) -> Option<usize> {
    if chars.is_empty() {
        return None;
    }
    let from = from.min(chars.len() - 1);
    (0..=from).rev().find(|&i| is_boundary(pattern, chars[i]))
}

/// Extract the token being typed at `column` (1-based, cursor sits to the
/// right of the last typed char, as the editor reports it in insert mode).
///
/// Pure function of its inputs. A cursor at or before the line start yields
/// `start_index = 0` and an empty query; a boundary char immediately left of
/// the cursor also yields an empty query (the caller hides completions).
pub fn find_query(
    triggers: &TriggerTable,
    filetype: &str,
    line: &str,
    column: usize,
) -> CompletionQuery {
    let pattern = triggers.boundary(filetype);
    let chars: Vec<char> = line.chars().collect();

    // The char just typed sits at column - 2 (0-based); scan backward from it.
    let start = match column.checked_sub(2) {
        Some(from) => find_index_right(&chars, pattern, from).unwrap_or(0),
        None => 0,
    };
    let start_index = if start > 0 { start + 1 } else { 0 };

    let end = column.saturating_sub(1).min(chars.len());
    let query = if start_index < end {
        chars[start_index..end].iter().collect()
    } else {
        String::new()
    };
    let left_char = chars.get(start).copied();

    CompletionQuery { start_index, query, left_char }
}
