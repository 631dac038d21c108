//! Immutable byte buffer and its two projections.
//!
//! A [`HexBuffer`] owns the bytes and the hex projection (`"00 41 FF "`, three characters per
//! byte) built once at load time. The text projection is not stored: it is the buffer read
//! through a [`GlyphTable`], so changing the encoding never touches the buffer.

use crate::encoding::GlyphTable;
use std::sync::Arc;

/// Width of one byte in the hex projection (two digits and a separator).
pub const HEX_STRIDE: usize = 3;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Append the uppercase two-digit token of `byte`.
pub(crate) fn push_hex_token(out: &mut String, byte: u8) {
    out.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
    out.push(char::from(HEX_DIGITS[usize::from(byte & 0x0F)]));
}

/// Base used to print the offset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OffsetBase {
    /// Base 8.
    Octal,
    /// Base 10.
    Decimal,
    /// Base 16.
    #[default]
    Hexadecimal,
}

impl OffsetBase {
    /// Numeric radix.
    pub fn radix(self) -> u32 {
        match self {
            Self::Octal => 8,
            Self::Decimal => 10,
            Self::Hexadecimal => 16,
        }
    }

    /// Base for a radix; only 8, 10 and 16 are supported.
    pub fn from_radix(radix: u32) -> Option<Self> {
        match radix {
            8 => Some(Self::Octal),
            10 => Some(Self::Decimal),
            16 => Some(Self::Hexadecimal),
            _ => None,
        }
    }

    /// Format `value` in this base, uppercase, zero-padded to `width`.
    pub fn format(self, value: usize, width: usize) -> String {
        match self {
            Self::Octal => format!("{value:0width$o}"),
            Self::Decimal => format!("{value:0width$}"),
            Self::Hexadecimal => format!("{value:0width$X}"),
        }
    }
}

/// An immutable byte buffer with a precomputed hex projection.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct HexBuffer {
    bytes: Arc<[u8]>,
    hex_data: String,
}

impl HexBuffer {
    /// Load a buffer. This is the only O(N) step; every lookup afterwards is O(1).
    pub fn load(bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        let mut hex_data = String::with_capacity(bytes.len() * HEX_STRIDE);
        for &byte in bytes.iter() {
            push_hex_token(&mut hex_data, byte);
            hex_data.push(' ');
        }
        Self { bytes, hex_data }
    }

    /// An empty buffer. Every navigation over it is a no-op.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Raw bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Byte at `index`.
    pub fn byte(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    /// The hex projection, `"00 41 FF "`.
    pub fn hex_data(&self) -> &str {
        &self.hex_data
    }

    /// Uppercase two-digit hex token of the byte at `index`.
    pub fn hex_of(&self, index: usize) -> Option<&str> {
        if index >= self.len() {
            return None;
        }
        let start = index * HEX_STRIDE;
        self.hex_data.get(start..start + 2)
    }

    /// Text of the byte at `index` under `glyphs`.
    pub fn char_of<'a>(&self, index: usize, glyphs: &'a GlyphTable) -> Option<&'a str> {
        self.byte(index).map(|byte| glyphs.get(byte))
    }

    /// Clamp `index` into `[0, len - 1]`. `None` for an empty buffer.
    pub fn clamp(&self, index: usize) -> Option<usize> {
        self.len().checked_sub(1).map(|last| index.min(last))
    }

    /// Offset column text for `index`.
    pub fn address_of(&self, index: usize, base: OffsetBase, width: usize) -> String {
        base.format(index, width)
    }

    /// Number of rows at `columns` bytes per row.
    pub fn row_count(&self, columns: usize) -> usize {
        self.len().div_ceil(columns.max(1))
    }
}

impl std::fmt::Debug for HexBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HexBuffer")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
