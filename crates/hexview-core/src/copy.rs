//! Clipboard export for the cursor or the selection.

use crate::buffer::{HEX_STRIDE, HexBuffer};
use crate::encoding::{CopyMode, EncodingSettings, GlyphTable};
use crate::selection::SelectionRange;

/// Which column a copy reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Column {
    /// Hex tokens.
    #[default]
    Hex,
    /// Decoded text.
    Text,
}

/// The cell under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HoverState {
    /// Hovered index.
    pub index: Option<usize>,
    /// Column of the last hovered cell. Copy reads from it.
    pub column: Column,
}

/// Export settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyRequest {
    /// Column to read.
    pub column: Column,
    /// How text bytes are rendered.
    pub mode: CopyMode,
}

/// Copy one byte.
pub fn copy_cursor(
    buffer: &HexBuffer,
    index: usize,
    request: CopyRequest,
    encoding: &EncodingSettings,
) -> Option<String> {
    let byte = buffer.byte(index)?;
    Some(match request.column {
        Column::Hex => buffer.hex_of(index)?.to_string(),
        Column::Text => encoding.resolve(byte, request.mode),
    })
}

/// Copy `range`. Hex tokens are each followed by one space; text is concatenated.
pub fn copy_selection(
    buffer: &HexBuffer,
    range: SelectionRange,
    request: CopyRequest,
    encoding: &EncodingSettings,
) -> Option<String> {
    let range = range.clamp(buffer.len())?;
    match request.column {
        Column::Hex => {
            let hex = buffer.hex_data();
            let start = range.start * HEX_STRIDE;
            let end = (range.end + 1) * HEX_STRIDE;
            hex.get(start..end).map(str::to_string)
        }
        Column::Text => {
            let glyphs = GlyphTable::new(*encoding, request.mode);
            let bytes = buffer.bytes().get(range.as_range())?;
            Some(bytes.iter().map(|&byte| glyphs.get(byte)).collect())
        }
    }
}

/// Copy the selection if there is one, otherwise the cursor.
pub fn copy_text(
    buffer: &HexBuffer,
    cursor: Option<usize>,
    selection: Option<SelectionRange>,
    request: CopyRequest,
    encoding: &EncodingSettings,
) -> Option<String> {
    match (selection, cursor) {
        (Some(range), _) => copy_selection(buffer, range, request, encoding),
        (None, Some(index)) => copy_cursor(buffer, index, request, encoding),
        (None, None) => None,
    }
}
