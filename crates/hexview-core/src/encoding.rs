//! Byte classes, display tables and the per-byte glyph table.
//!
//! Every byte belongs to exactly one [`ByteClass`]. The text column renders a byte through the
//! table configured for its class; the clipboard export renders it either the same way
//! ([`CopyMode::Displayed`]) or as a canonical escape ([`CopyMode::Parsed`]).
//!
//! Resolution is precomputed into a 256-entry [`GlyphTable`] so the text projection of a
//! buffer is a table lookup per byte.

use base64::{Engine, engine::general_purpose::STANDARD};
use hexview_core_charsets as charsets;
use std::fmt;

/// Glyph used when no table applies and no fallback was configured.
pub const DEFAULT_DISPLAY_CHAR: char = '.';

/// The four byte classes, in resolution priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteClass {
    /// `0x00`.
    Null,
    /// `0x01..=0x1F`.
    NonPrintable,
    /// `0x20..=0x7F`.
    Printable,
    /// `0x80..=0xFF`.
    High,
}

impl ByteClass {
    /// Classify a byte.
    pub fn of(byte: u8) -> Self {
        match byte {
            0x00 => Self::Null,
            0x01..=0x1F => Self::NonPrintable,
            0x20..=0x7F => Self::Printable,
            _ => Self::High,
        }
    }
}

/// How bytes are rendered into clipboard text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CopyMode {
    /// Canonical escapes (`\0`, `\n`, `\x1B`) for null and control bytes.
    Parsed,
    /// Exactly what the text column shows.
    #[default]
    Displayed,
}

impl CopyMode {
    /// Persisted name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Parsed => "parsed",
            Self::Displayed => "displayed",
        }
    }

    /// Parse a persisted name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "parsed" => Some(Self::Parsed),
            "displayed" => Some(Self::Displayed),
            _ => None,
        }
    }
}

/// Tables available for the non-printable class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NonPrintableTable {
    /// Show the fallback character.
    #[default]
    Hidden,
    /// Caret notation (`^A`).
    Caret,
    /// Code page 437 control pictures.
    Cp437,
}

impl NonPrintableTable {
    /// All tables, in menu order.
    pub const ALL: [Self; 3] = [Self::Hidden, Self::Caret, Self::Cp437];

    /// Persisted name (also the label key in the charsets crate).
    pub fn name(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Caret => "caret",
            Self::Cp437 => "cp437",
        }
    }

    /// Parse a persisted name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|table| table.name() == name)
    }
}

/// Single-byte decoders usable for the high-byte class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    /// Strip the high bit and show the ASCII character.
    Ascii,
    /// Base64 of the single byte (`"/w=="`).
    Base64,
    /// Lowercase hex literal of the byte (`"ff"`).
    Hex,
    /// ISO-8859-1.
    Latin1,
    /// UTF-8. A lone high byte never decodes, so this always shows the fallback.
    Utf8,
    /// UTF-16LE. A single byte is never a code unit, so this always shows the fallback.
    Utf16Le,
}

impl TextEncoding {
    /// All decoders, in menu order.
    pub const ALL: [Self; 6] = [
        Self::Ascii,
        Self::Base64,
        Self::Hex,
        Self::Latin1,
        Self::Utf8,
        Self::Utf16Le,
    ];

    /// Persisted name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Base64 => "base64",
            Self::Hex => "hex",
            Self::Latin1 => "latin1",
            Self::Utf8 => "utf8",
            Self::Utf16Le => "utf16le",
        }
    }

    /// Decode one byte. `None` means the decoder has nothing visible for it.
    pub fn decode(self, byte: u8) -> Option<String> {
        let decoded = match self {
            Self::Ascii => visible(char::from(byte & 0x7F)),
            Self::Base64 => Some(STANDARD.encode([byte])),
            Self::Hex => Some(hex::encode([byte])),
            Self::Latin1 => visible(char::from(byte)),
            Self::Utf8 => std::str::from_utf8(&[byte])
                .ok()
                .and_then(|s| s.chars().next())
                .and_then(visible),
            Self::Utf16Le => None,
        };
        decoded.filter(|s| !s.is_empty())
    }
}

fn visible(ch: char) -> Option<String> {
    if ch.is_control() || ch == char::REPLACEMENT_CHARACTER {
        None
    } else {
        Some(ch.to_string())
    }
}

/// Tables and decoders available for the high-byte class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HighByteTable {
    /// Show the fallback character.
    #[default]
    Hidden,
    /// Code page 437.
    Cp437,
    /// Windows-1252 (undefined positions show the fallback).
    Windows1252,
    /// Run a single-byte text decoder.
    Decoder(TextEncoding),
}

impl HighByteTable {
    /// All tables, in menu order.
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::Hidden, Self::Cp437, Self::Windows1252]
            .into_iter()
            .chain(TextEncoding::ALL.into_iter().map(Self::Decoder))
    }

    /// Persisted name (also the label key in the charsets crate).
    pub fn name(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Cp437 => "cp437",
            Self::Windows1252 => "windows1252",
            Self::Decoder(encoding) => encoding.name(),
        }
    }

    /// Parse a persisted name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().find(|table| table.name() == name)
    }
}

/// A table choice plus the fallback character for bytes the table can't show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassEncoding<T> {
    /// Table used for the class.
    pub table: T,
    /// Shown when the table is hidden or has no glyph for the byte.
    pub fallback: char,
}

impl<T: Default> Default for ClassEncoding<T> {
    fn default() -> Self {
        Self {
            table: T::default(),
            fallback: DEFAULT_DISPLAY_CHAR,
        }
    }
}

/// Encoding configuration of the text column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodingSettings {
    /// Glyph shown for byte `0`.
    pub null_char: char,
    /// Configuration for `0x01..=0x1F`.
    pub non_printable: ClassEncoding<NonPrintableTable>,
    /// Configuration for `0x80..=0xFF`.
    pub high_byte: ClassEncoding<HighByteTable>,
}

impl Default for EncodingSettings {
    fn default() -> Self {
        Self {
            null_char: DEFAULT_DISPLAY_CHAR,
            non_printable: ClassEncoding::default(),
            high_byte: ClassEncoding::default(),
        }
    }
}

impl EncodingSettings {
    /// Resolve a byte to text under `mode`.
    ///
    /// Rules apply per class: byte 0 first, then `0x01..=0x1F`, then the literal ASCII range,
    /// then the high range.
    pub fn resolve(&self, byte: u8, mode: CopyMode) -> String {
        match (ByteClass::of(byte), mode) {
            (ByteClass::Null, CopyMode::Parsed) => charsets::c_escape(0),
            (ByteClass::Null, CopyMode::Displayed) => self.null_char.to_string(),
            (ByteClass::NonPrintable, CopyMode::Parsed) => charsets::c_escape(byte),
            (ByteClass::NonPrintable, CopyMode::Displayed) => {
                let glyph = match self.non_printable.table {
                    NonPrintableTable::Hidden => None,
                    NonPrintableTable::Caret => charsets::caret(byte).map(str::to_string),
                    NonPrintableTable::Cp437 => charsets::cp437(byte).map(String::from),
                };
                glyph.unwrap_or_else(|| self.non_printable.fallback.to_string())
            }
            (ByteClass::Printable, _) => char::from(byte).to_string(),
            (ByteClass::High, _) => {
                let glyph = match self.high_byte.table {
                    HighByteTable::Hidden => None,
                    HighByteTable::Cp437 => charsets::cp437(byte).map(String::from),
                    HighByteTable::Windows1252 => charsets::windows_1252(byte).map(String::from),
                    HighByteTable::Decoder(encoding) => encoding.decode(byte),
                };
                glyph.unwrap_or_else(|| self.high_byte.fallback.to_string())
            }
        }
    }
}

/// Precomputed text for all 256 byte values under one encoding and copy mode.
#[derive(Clone, PartialEq, Eq)]
pub struct GlyphTable {
    glyphs: Box<[Box<str>]>,
    encoding: EncodingSettings,
    mode: CopyMode,
}

impl GlyphTable {
    /// Build a table for `encoding` under `mode`.
    pub fn new(encoding: EncodingSettings, mode: CopyMode) -> Self {
        let glyphs = (0..=u8::MAX)
            .map(|byte| encoding.resolve(byte, mode).into_boxed_str())
            .collect();
        Self {
            glyphs,
            encoding,
            mode,
        }
    }

    /// Text for `byte`.
    #[inline]
    pub fn get(&self, byte: u8) -> &str {
        &self.glyphs[byte as usize]
    }

    /// Settings the table was built from.
    pub fn encoding(&self) -> &EncodingSettings {
        &self.encoding
    }

    /// Mode the table was built for.
    pub fn mode(&self) -> CopyMode {
        self.mode
    }

    /// Every byte whose glyph is exactly `ch`, ascending.
    ///
    /// A space additionally matches byte 0.
    pub fn bytes_for_char(&self, ch: char) -> Vec<u8> {
        let mut encoded = [0u8; 4];
        let needle: &str = ch.encode_utf8(&mut encoded);
        let mut bytes: Vec<u8> = (0..=u8::MAX)
            .filter(|&byte| self.get(byte) == needle)
            .collect();
        if ch == ' ' && !bytes.contains(&0) {
            bytes.insert(0, 0);
        }
        bytes
    }
}

impl Default for GlyphTable {
    fn default() -> Self {
        Self::new(EncodingSettings::default(), CopyMode::Displayed)
    }
}

impl fmt::Debug for GlyphTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphTable")
            .field("encoding", &self.encoding)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
