//! Search over the hex projection.
//!
//! Queries are matched against [`HexBuffer::hex_data`], so a hex query is a plain token
//! sequence and a text query becomes, per character, an alternation of every byte whose
//! glyph shows that character. Matches are byte indexes, ascending, and may overlap.
//!
//! # Example
//!
//! ```rust
//! use hexview_core::{GlyphTable, HexBuffer, SearchKind, SearchQuery, find_matches};
//!
//! let buffer = HexBuffer::load(b"abcabc".to_vec());
//! let glyphs = GlyphTable::default();
//! let query = SearchQuery::new(SearchKind::Text, "bc");
//! assert_eq!(find_matches(&buffer, &query, &glyphs), vec![1, 4]);
//! ```

use crate::buffer::{HEX_STRIDE, HexBuffer, push_hex_token};
use crate::encoding::GlyphTable;
use regex::Regex;
use std::ops::{Range, RangeInclusive};
use std::sync::Arc;

/// What a query's value means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchKind {
    /// Hex digits, matched against bytes.
    Hex,
    /// Characters, matched against the text column.
    #[default]
    Text,
}

impl SearchKind {
    /// Query prefix (`"hex"` / `"text"`).
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Text => "text",
        }
    }

    /// Parse a prefix, case-insensitively.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        if prefix.eq_ignore_ascii_case("hex") {
            Some(Self::Hex)
        } else if prefix.eq_ignore_ascii_case("text") {
            Some(Self::Text)
        } else {
            None
        }
    }
}

/// A typed query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    /// Interpretation of `value`.
    pub kind: SearchKind,
    /// Raw value (after the prefix).
    pub value: String,
}

impl SearchQuery {
    /// Create a query.
    pub fn new(kind: SearchKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Parse `input`, honouring a `hex:` / `text:` prefix and falling back to `default_kind`.
    pub fn parse(input: &str, default_kind: SearchKind) -> Self {
        match split_prefix(input) {
            Some(query) => query,
            None => Self::new(default_kind, strip_quotes(input)),
        }
    }

    /// The query written back with its prefix.
    pub fn to_input(&self) -> String {
        format!("{}:{}", self.kind.prefix(), self.value)
    }

    /// Whether the query can match nothing by construction.
    pub fn is_blank(&self) -> bool {
        match self.kind {
            SearchKind::Text => self.value.trim().is_empty(),
            SearchKind::Hex => normalize_hex(&self.value).is_none_or(|tokens| tokens.is_empty()),
        }
    }
}

/// Whether `input` starts with a `hex:` or `text:` prefix.
pub fn has_prefix(input: &str) -> bool {
    split_prefix(input).is_some()
}

fn split_prefix(input: &str) -> Option<SearchQuery> {
    let (prefix, value) = input.split_once(':')?;
    let kind = SearchKind::from_prefix(prefix.trim())?;
    Some(SearchQuery::new(kind, strip_quotes(value)))
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Suggestions offered for an unprefixed, non-blank input: one per kind.
pub fn suggestions(input: &str) -> Vec<SearchQuery> {
    if input.trim().is_empty() || has_prefix(input) {
        return Vec::new();
    }
    let value = strip_quotes(input);
    vec![
        SearchQuery::new(SearchKind::Hex, value),
        SearchQuery::new(SearchKind::Text, value),
    ]
}

/// Normalize a hex query to uppercase byte tokens.
///
/// Whitespace and `0x` prefixes are ignored and a trailing odd nibble is dropped. Returns
/// `None` if the value contains anything else.
pub fn normalize_hex(value: &str) -> Option<Vec<String>> {
    let mut digits = String::with_capacity(value.len());
    for word in value.split_whitespace() {
        let word = word
            .strip_prefix("0x")
            .or_else(|| word.strip_prefix("0X"))
            .unwrap_or(word);
        if !word.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        digits.push_str(word);
    }
    let digits = digits.to_ascii_uppercase();
    Some(
        digits
            .as_bytes()
            .chunks_exact(2)
            .map(|pair| String::from_utf8_lossy(pair).into_owned())
            .collect(),
    )
}

/// A compiled search over the hex projection.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    regex: Regex,
    length: usize,
}

impl SearchPattern {
    /// Compile `query`. `None` when it cannot match anything.
    pub fn compile(query: &SearchQuery, glyphs: &GlyphTable) -> Option<Self> {
        let mut pattern = String::new();
        let length = match query.kind {
            SearchKind::Hex => {
                let tokens = normalize_hex(&query.value)?;
                for token in &tokens {
                    pattern.push_str(token);
                    pattern.push(' ');
                }
                tokens.len()
            }
            SearchKind::Text => {
                let mut length = 0;
                for ch in query.value.chars() {
                    let bytes = glyphs.bytes_for_char(ch);
                    if bytes.is_empty() {
                        return None;
                    }
                    pattern.push_str("(?:");
                    for (i, byte) in bytes.iter().enumerate() {
                        if i > 0 {
                            pattern.push('|');
                        }
                        push_hex_token(&mut pattern, *byte);
                        pattern.push(' ');
                    }
                    pattern.push(')');
                    length += 1;
                }
                length
            }
        };
        if length == 0 {
            return None;
        }
        let regex = Regex::new(&pattern).ok()?;
        Some(Self { regex, length })
    }

    /// Match length in bytes.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Start index of every match in `buffer`, ascending, overlaps included.
    pub fn find_all(&self, buffer: &HexBuffer) -> Vec<usize> {
        let haystack = buffer.hex_data();
        let mut matches = Vec::new();
        let mut position = 0;
        while position < haystack.len() {
            let Some(found) = self.regex.find_at(haystack, position) else {
                break;
            };
            matches.push(found.start() / HEX_STRIDE);
            position = found.start() + HEX_STRIDE;
        }
        matches
    }
}

/// Convenience wrapper: compile and run `query` over `buffer`.
pub fn find_matches(buffer: &HexBuffer, query: &SearchQuery, glyphs: &GlyphTable) -> Vec<usize> {
    SearchPattern::compile(query, glyphs)
        .map(|pattern| pattern.find_all(buffer))
        .unwrap_or_default()
}

/// Index (into `matches`) of the first match at or after `origin`, else the first match.
pub fn nearest_match(matches: &[usize], origin: Option<usize>) -> Option<usize> {
    if matches.is_empty() {
        return None;
    }
    let origin = origin.unwrap_or(0);
    let at_or_after = matches.partition_point(|&m| m < origin);
    Some(if at_or_after < matches.len() {
        at_or_after
    } else {
        0
    })
}

/// Step `active` by `delta`, wrapping inside `0..count`.
pub fn cycle(active: Option<usize>, count: usize, delta: isize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let count = count as isize;
    let start = active.map_or(if delta < 0 { 0 } else { -1 }, |a| a as isize);
    Some((start + delta).rem_euclid(count) as usize)
}

/// Search bar state and the current match set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    /// Kind used for unprefixed input.
    pub kind: SearchKind,
    /// What the user typed.
    pub input: String,
    /// The query in effect, once debounced.
    pub query: Option<SearchQuery>,
    /// Start index of every match, ascending.
    pub matches: Arc<[usize]>,
    /// Length of each match in bytes.
    pub length: usize,
    /// Index into `matches` of the active match.
    pub active: Option<usize>,
    /// Whether the prefix suggestion list is open.
    pub suggestions_open: bool,
}

impl SearchState {
    /// Record typed input without searching yet.
    pub fn typed(self, input: &str) -> Self {
        Self {
            input: input.to_string(),
            suggestions_open: !suggestions(input).is_empty(),
            ..self
        }
    }

    /// Apply `input` as the query in effect and search for it.
    pub fn with_query(
        self,
        input: &str,
        buffer: &HexBuffer,
        glyphs: &GlyphTable,
        origin: Option<usize>,
    ) -> Self {
        let query = SearchQuery::parse(input, self.kind);
        let kind = if has_prefix(input) { query.kind } else { self.kind };
        let state = Self {
            kind,
            input: input.to_string(),
            suggestions_open: self.suggestions_open && !has_prefix(input),
            query: (!query.is_blank()).then_some(query),
            ..self
        };
        state.reindex(buffer, glyphs, origin)
    }

    /// Recompute matches for the query in effect and pick the match nearest `origin`.
    pub fn reindex(self, buffer: &HexBuffer, glyphs: &GlyphTable, origin: Option<usize>) -> Self {
        let (matches, length) = match self
            .query
            .as_ref()
            .and_then(|query| SearchPattern::compile(query, glyphs))
        {
            Some(pattern) => (pattern.find_all(buffer), pattern.length()),
            None => (Vec::new(), 0),
        };
        let active = nearest_match(&matches, origin);
        Self {
            matches: matches.into(),
            length,
            active,
            ..self
        }
    }

    /// Change the kind used for unprefixed input. An unprefixed query in effect is re-run.
    pub fn with_kind(
        self,
        kind: SearchKind,
        buffer: &HexBuffer,
        glyphs: &GlyphTable,
        origin: Option<usize>,
    ) -> Self {
        let input = self.input.clone();
        let state = Self { kind, ..self };
        if state.query.is_some() && !has_prefix(&input) {
            state.with_query(&input, buffer, glyphs, origin)
        } else {
            state
        }
    }

    /// Activate the match after the current one, wrapping.
    pub fn next_match(self) -> Self {
        let active = cycle(self.active, self.matches.len(), 1);
        Self { active, ..self }
    }

    /// Activate the match before the current one, wrapping.
    pub fn previous_match(self) -> Self {
        let active = cycle(self.active, self.matches.len(), -1);
        Self { active, ..self }
    }

    /// Activate match `index` if it exists.
    pub fn select_match(self, index: usize) -> Self {
        if index < self.matches.len() {
            Self {
                active: Some(index),
                ..self
            }
        } else {
            self
        }
    }

    /// Close the suggestion list.
    pub fn close_suggestions(self) -> Self {
        Self {
            suggestions_open: false,
            ..self
        }
    }

    /// Drop the query and every match. The kind is kept.
    pub fn clear(self) -> Self {
        Self {
            kind: self.kind,
            ..Self::default()
        }
    }

    /// Suggestions for the current input, empty unless the list is open.
    pub fn current_suggestions(&self) -> Vec<SearchQuery> {
        if self.suggestions_open {
            suggestions(&self.input)
        } else {
            Vec::new()
        }
    }

    /// Byte index where the active match starts.
    pub fn active_start(&self) -> Option<usize> {
        self.active.and_then(|i| self.matches.get(i).copied())
    }

    /// Bytes covered by the active match.
    pub fn active_range(&self) -> Option<Range<usize>> {
        self.active_start()
            .map(|start| start..start + self.length)
    }

    /// Position in `matches` of the first and past-the-last match overlapping `window`.
    pub fn overlapping(&self, window: &RangeInclusive<usize>) -> Range<usize> {
        overlapping(&self.matches, self.length, window)
    }
}

/// Range of entries in `matches` whose `[m, m + length)` span intersects `window`.
pub fn overlapping(matches: &[usize], length: usize, window: &RangeInclusive<usize>) -> Range<usize> {
    if length == 0 || window.is_empty() {
        return 0..0;
    }
    let first = matches.partition_point(|&m| m + length <= *window.start());
    let last = matches.partition_point(|&m| m <= *window.end());
    first..last.max(first)
}
