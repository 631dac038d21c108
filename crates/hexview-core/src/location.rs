//! Shareable location strings.
//!
//! A location is the part of the view state worth putting in a link: scroll position,
//! cursor, selection, the search query and its active match, and the display options that
//! change what the offsets mean. Only fields that differ from their defaults are written,
//! always in the same key order:
//!
//! | Key | Field |
//! |---|---|
//! | `z` | scroll offset (byte index of the top row) |
//! | `c` | cursor |
//! | `s`, `e` | selection start and end |
//! | `q` | query, `hex:<HEX>` or `text:<HEX of UTF-8>` |
//! | `i` | active match |
//! | `b` | offset base |
//! | `w` | fixed column count |
//!
//! Decoding validates every field on its own and drops the ones that don't fit the buffer.

use crate::buffer::OffsetBase;
use crate::layout::MAX_COLUMNS;
use crate::search::{SearchKind, SearchQuery, normalize_hex};
use crate::selection::SelectionRange;
use crate::state::HexViewState;
use tracing::warn;

/// The shareable subset of the view state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    /// Byte index of the top row.
    pub scroll: Option<usize>,
    /// Cursor index.
    pub cursor: Option<usize>,
    /// Selection.
    pub selection: Option<SelectionRange>,
    /// Query in effect.
    pub query: Option<SearchQuery>,
    /// Active match.
    pub active: Option<usize>,
    /// Offset base, when not hexadecimal.
    pub offset_base: Option<OffsetBase>,
    /// Fixed column count, when columns don't follow the viewport.
    pub columns: Option<usize>,
}

impl Location {
    /// Capture the location of `state`, leaving defaults out.
    pub fn capture(state: &HexViewState) -> Self {
        let scroll = state.scroll.top_row * state.layout.view.columns.max(1);
        let query = state.search.query.clone();
        Self {
            scroll: (scroll > 0).then_some(scroll),
            cursor: state.cursor.index,
            selection: state.selection.range,
            active: query.as_ref().and(state.search.active),
            query,
            offset_base: (state.settings.offset_base != OffsetBase::default())
                .then_some(state.settings.offset_base),
            columns: (!state.settings.columns.auto).then_some(state.settings.columns.size),
        }
    }

    /// Whether every field is at its default.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Encode as `key=value` pairs joined by `&`, without a leading `?`.
    pub fn encode(&self) -> String {
        let mut pairs: Vec<(char, String)> = Vec::new();
        if let Some(scroll) = self.scroll {
            pairs.push(('z', scroll.to_string()));
        }
        if let Some(cursor) = self.cursor {
            pairs.push(('c', cursor.to_string()));
        }
        if let Some(range) = self.selection {
            pairs.push(('s', range.start.to_string()));
            pairs.push(('e', range.end.to_string()));
        }
        if let Some(query) = self.query.as_ref().and_then(encode_query) {
            pairs.push(('q', query));
        }
        if let Some(active) = self.active {
            pairs.push(('i', active.to_string()));
        }
        if let Some(base) = self.offset_base {
            pairs.push(('b', base.radix().to_string()));
        }
        if let Some(columns) = self.columns {
            pairs.push(('w', columns.to_string()));
        }

        let mut out = String::new();
        for (i, (key, value)) in pairs.iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            out.push(*key);
            out.push('=');
            out.push_str(value);
        }
        out
    }

    /// Decode against a buffer of `len` bytes.
    ///
    /// Accepts a bare query (`c=1&s=0`), a leading `?`, or a full URL; `#fragments` are
    /// ignored. Unknown keys are skipped and invalid values are dropped with a warning.
    pub fn decode(input: &str, len: usize) -> Self {
        let without_fragment = input.split('#').next().unwrap_or_default();
        let query = match without_fragment.split_once('?') {
            Some((_, query)) => query,
            None => without_fragment,
        };

        let mut location = Self::default();
        let mut start = None;
        let mut end = None;
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
            let value = percent_decode(raw);
            match key {
                "z" => location.scroll = index_field(key, &value, len),
                "c" => location.cursor = index_field(key, &value, len),
                "s" => start = index_field(key, &value, len),
                "e" => end = index_field(key, &value, len),
                "q" => location.query = decode_query(&value).or_else(|| dropped(key, &value)),
                "i" => location.active = value.parse().ok().or_else(|| dropped(key, &value)),
                "b" => {
                    location.offset_base = value
                        .parse()
                        .ok()
                        .and_then(OffsetBase::from_radix)
                        .or_else(|| dropped(key, &value))
                }
                "w" => {
                    location.columns = value
                        .parse()
                        .ok()
                        .filter(|w| (1..=MAX_COLUMNS).contains(w))
                        .or_else(|| dropped(key, &value))
                }
                _ => {}
            }
        }
        location.selection = match (start, end) {
            (Some(start), Some(end)) => Some(SelectionRange::ordered(start, end)),
            (None, None) => None,
            _ => {
                warn!("dropping selection with a missing endpoint from location");
                None
            }
        };
        location
    }
}

fn dropped<T>(key: &str, value: &str) -> Option<T> {
    warn!(key, value, "dropping invalid location field");
    None
}

fn index_field(key: &str, value: &str, len: usize) -> Option<usize> {
    value
        .parse::<usize>()
        .ok()
        .filter(|&index| index < len)
        .or_else(|| dropped(key, value))
}

fn encode_query(query: &SearchQuery) -> Option<String> {
    let payload = match query.kind {
        SearchKind::Hex => normalize_hex(&query.value)?.concat(),
        SearchKind::Text => hex::encode_upper(query.value.as_bytes()),
    };
    (!payload.is_empty()).then(|| format!("{}:{payload}", query.kind.prefix()))
}

fn decode_query(value: &str) -> Option<SearchQuery> {
    let (prefix, payload) = value.split_once(':')?;
    let kind = SearchKind::from_prefix(prefix)?;
    let bytes = hex::decode(payload).ok().filter(|bytes| !bytes.is_empty())?;
    let value = match kind {
        SearchKind::Hex => hex::encode_upper(bytes),
        SearchKind::Text => String::from_utf8(bytes).ok()?,
    };
    Some(SearchQuery::new(kind, value))
}

fn percent_decode(raw: &str) -> String {
    let mut out = Vec::with_capacity(raw.len());
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match (bytes[i], bytes.get(i + 1..i + 3)) {
            (b'%', Some(pair)) => match hex::decode(pair) {
                Ok(decoded) => {
                    out.extend(decoded);
                    i += 3;
                    continue;
                }
                Err(_) => out.push(b'%'),
            },
            (b'+', _) => out.push(b' '),
            (byte, _) => out.push(byte),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_selection() {
        let location = Location::decode("?s=0&e=2", 3);
        assert_eq!(location.selection, Some(SelectionRange { start: 0, end: 2 }));
        assert_eq!(location.cursor, None);
    }

    #[test]
    fn test_fields_are_validated_independently() {
        let location = Location::decode("?c=9&s=1&e=99&z=2&b=7&w=0&q=hex:zz&i=x&foo=bar", 10);
        assert_eq!(location.cursor, Some(9));
        assert_eq!(location.selection, None);
        assert_eq!(location.scroll, Some(2));
        assert_eq!(location.offset_base, None);
        assert_eq!(location.columns, None);
        assert_eq!(location.query, None);
        assert_eq!(location.active, None);
    }

    #[test]
    fn test_encode_order_and_defaults() {
        let location = Location {
            cursor: Some(4),
            selection: Some(SelectionRange::ordered(8, 2)),
            query: Some(SearchQuery::new(SearchKind::Text, "Hi")),
            active: Some(1),
            offset_base: Some(OffsetBase::Decimal),
            columns: Some(32),
            ..Location::default()
        };
        assert_eq!(location.encode(), "c=4&s=2&e=8&q=text:4869&i=1&b=10&w=32");
        assert_eq!(Location::default().encode(), "");
        assert!(Location::default().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            "z=32&c=40",
            "s=1&e=3",
            "q=hex:41FF&i=0",
            "c=0&q=text:C3A9&b=8&w=1",
        ];
        for sample in samples {
            let decoded = Location::decode(sample, 64);
            assert_eq!(decoded.encode(), sample);
        }
    }

    #[test]
    fn test_accepts_urls_and_fragments() {
        let location = Location::decode("https://host/viewer?c=3&q=text%3A41#top", 10);
        assert_eq!(location.cursor, Some(3));
        assert_eq!(location.query, Some(SearchQuery::new(SearchKind::Text, "A")));

        let lower = Location::decode("q=HEX:41ff", 10);
        assert_eq!(lower.query, Some(SearchQuery::new(SearchKind::Hex, "41FF")));
    }

    #[test]
    fn test_half_selection_is_dropped() {
        assert_eq!(Location::decode("s=1", 10).selection, None);
        assert_eq!(Location::decode("e=1", 10).selection, None);
    }
}
