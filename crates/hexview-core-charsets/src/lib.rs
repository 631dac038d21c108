#![warn(missing_docs)]
//! `hexview-core-charsets` - character tables and localized labels for `hexview-core`.
//!
//! This crate only holds data. It knows nothing about buffers, cursors or
//! rendering; it answers "which glyph does this byte have in table X" and "what is the label
//! of option Y in language Z". `hexview-core` combines these tables with the user's encoding
//! settings to build the text projection of a buffer.
//!
//! Tables provided:
//!
//! - **Code page 437**: control pictures for `0x01..=0x1F`, `⌂` for `0x7F`, and the full
//!   extended range `0x80..=0xFF`.
//! - **Windows-1252**: the C1 replacement range `0x80..=0x9F` (five code points are undefined);
//!   `0xA0..=0xFF` coincides with Latin-1.
//! - **Caret notation**: `^@`, `^A`, ... `^_` for `0x00..=0x1F` and `^?` for `0x7F`.
//! - **C escapes**: canonical escape notation used for "parsed" clipboard exports.

/// Code page 437 glyphs for the control range `0x00..=0x1F`.
///
/// Index `0` is a blank; hosts render byte `0` through the configured null character instead.
pub const CP437_CONTROL: [char; 32] = [
    ' ', '☺', '☻', '♥', '♦', '♣', '♠', '•', '◘', '○', '◙', '♂', '♀', '♪', '♫', '☼', //
    '►', '◄', '↕', '‼', '¶', '§', '▬', '↨', '↑', '↓', '→', '←', '∟', '↔', '▲', '▼',
];

/// Code page 437 glyph for `0x7F`.
pub const CP437_DELETE: char = '⌂';

/// Code page 437 glyphs for the extended range `0x80..=0xFF`.
pub const CP437_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å', //
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ', //
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»', //
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐', //
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧', //
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀', //
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩', //
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{a0}',
];

/// Windows-1252 code points for `0x80..=0x9F`. `None` marks the five undefined positions.
pub const WINDOWS_1252_C1: [Option<char>; 32] = [
    Some('€'),
    None,
    Some('‚'),
    Some('ƒ'),
    Some('„'),
    Some('…'),
    Some('†'),
    Some('‡'),
    Some('ˆ'),
    Some('‰'),
    Some('Š'),
    Some('‹'),
    Some('Œ'),
    None,
    Some('Ž'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201c}'),
    Some('\u{201d}'),
    Some('•'),
    Some('–'),
    Some('—'),
    Some('˜'),
    Some('™'),
    Some('š'),
    Some('›'),
    Some('œ'),
    None,
    Some('ž'),
    Some('Ÿ'),
];

const CARET: [&str; 32] = [
    "^@", "^A", "^B", "^C", "^D", "^E", "^F", "^G", "^H", "^I", "^J", "^K", "^L", "^M", "^N",
    "^O", "^P", "^Q", "^R", "^S", "^T", "^U", "^V", "^W", "^X", "^Y", "^Z", "^[", "^\\", "^]",
    "^^", "^_",
];

/// Code page 437 glyph for a byte, or `None` for bytes the table does not cover
/// (`0x00` and the printable ASCII range `0x20..=0x7E`).
pub fn cp437(byte: u8) -> Option<char> {
    match byte {
        0x01..=0x1F => Some(CP437_CONTROL[byte as usize]),
        0x7F => Some(CP437_DELETE),
        0x80..=0xFF => Some(CP437_HIGH[(byte - 0x80) as usize]),
        _ => None,
    }
}

/// Windows-1252 character for a high byte (`0x80..=0xFF`).
///
/// Returns `None` for bytes below `0x80` and for the undefined positions
/// `0x81`, `0x8D`, `0x8F`, `0x90` and `0x9D`.
pub fn windows_1252(byte: u8) -> Option<char> {
    match byte {
        0x80..=0x9F => WINDOWS_1252_C1[(byte - 0x80) as usize],
        0xA0..=0xFF => Some(char::from(byte)),
        _ => None,
    }
}

/// Caret notation (`^A`) for a control byte (`0x00..=0x1F`, `0x7F`).
pub fn caret(byte: u8) -> Option<&'static str> {
    match byte {
        0x00..=0x1F => Some(CARET[byte as usize]),
        0x7F => Some("^?"),
        _ => None,
    }
}

/// Canonical C escape for a control byte.
///
/// Named escapes are used where C defines one (`\0`, `\a`, `\b`, `\t`, `\n`, `\v`, `\f`, `\r`);
/// every other byte is written as `\xNN` with uppercase hex digits.
pub fn c_escape(byte: u8) -> String {
    match byte {
        0x00 => "\\0".to_string(),
        0x07 => "\\a".to_string(),
        0x08 => "\\b".to_string(),
        0x09 => "\\t".to_string(),
        0x0A => "\\n".to_string(),
        0x0B => "\\v".to_string(),
        0x0C => "\\f".to_string(),
        0x0D => "\\r".to_string(),
        other => format!("\\x{other:02X}"),
    }
}

/// Supported UI languages for labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// English.
    #[default]
    En,
    /// French.
    Fr,
}

impl Language {
    /// Parse a language tag such as `"en"`, `"fr"` or `"fr-CA"`. Unknown tags return `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        match primary.to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            _ => None,
        }
    }
}

/// A label translated into every supported [`Language`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    /// English text.
    pub en: &'static str,
    /// French text.
    pub fr: &'static str,
}

impl Label {
    /// Get the text for `language`.
    pub fn get(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.en,
            Language::Fr => self.fr,
        }
    }
}

/// Offset-column bases and their labels.
pub const OFFSET_BASE_LABELS: &[(u32, Label)] = &[
    (8, Label { en: "Octal", fr: "Octal" }),
    (10, Label { en: "Decimal", fr: "Décimal" }),
    (16, Label { en: "Hexadecimal", fr: "Hexadécimal" }),
];

/// Tables selectable for the non-printable class (`0x01..=0x1F`), keyed by persisted name.
pub const NON_PRINTABLE_TABLE_LABELS: &[(&str, Label)] = &[
    ("hidden", Label { en: "Hidden", fr: "Masqué" }),
    ("caret", Label { en: "Caret notation", fr: "Notation caret" }),
    ("cp437", Label { en: "Code page 437", fr: "Page de code 437" }),
];

/// Tables and decoders selectable for the high-byte class (`0x80..=0xFF`), keyed by persisted name.
pub const HIGH_BYTE_TABLE_LABELS: &[(&str, Label)] = &[
    ("hidden", Label { en: "Hidden", fr: "Masqué" }),
    ("cp437", Label { en: "Code page 437", fr: "Page de code 437" }),
    ("windows1252", Label { en: "Windows-1252", fr: "Windows-1252" }),
    ("ascii", Label { en: "ASCII", fr: "ASCII" }),
    ("base64", Label { en: "Base64", fr: "Base64" }),
    ("hex", Label { en: "Hexadecimal literal", fr: "Littéral hexadécimal" }),
    ("latin1", Label { en: "Latin-1", fr: "Latin-1" }),
    ("utf8", Label { en: "UTF-8", fr: "UTF-8" }),
    ("utf16le", Label { en: "UTF-16LE", fr: "UTF-16LE" }),
];

/// Look up a label by key in one of the label tables above.
pub fn find_label<K: PartialEq + Copy>(
    table: &[(K, Label)],
    key: K,
    language: Language,
) -> Option<&'static str> {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| label.get(language))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cp437_boundaries() {
        assert_eq!(cp437(0x00), None);
        assert_eq!(cp437(0x01), Some('☺'));
        assert_eq!(cp437(0x1F), Some('▼'));
        assert_eq!(cp437(0x41), None);
        assert_eq!(cp437(0x7F), Some('⌂'));
        assert_eq!(cp437(0x80), Some('Ç'));
        assert_eq!(cp437(0xB0), Some('░'));
        assert_eq!(cp437(0xE1), Some('ß'));
        assert_eq!(cp437(0xFE), Some('■'));
    }

    #[test]
    fn test_windows_1252_undefined_positions() {
        for byte in [0x81u8, 0x8D, 0x8F, 0x90, 0x9D] {
            assert_eq!(windows_1252(byte), None, "byte {byte:#04x}");
        }
        assert_eq!(windows_1252(0x80), Some('€'));
        assert_eq!(windows_1252(0x99), Some('™'));
        assert_eq!(windows_1252(0xE9), Some('é'));
        assert_eq!(windows_1252(0x41), None);
    }

    #[test]
    fn test_caret_and_escape() {
        assert_eq!(caret(0x00), Some("^@"));
        assert_eq!(caret(0x1B), Some("^["));
        assert_eq!(caret(0x7F), Some("^?"));
        assert_eq!(caret(0x20), None);

        assert_eq!(c_escape(0x00), "\\0");
        assert_eq!(c_escape(0x0A), "\\n");
        assert_eq!(c_escape(0x1B), "\\x1B");
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            find_label(OFFSET_BASE_LABELS, 10, Language::Fr),
            Some("Décimal")
        );
        assert_eq!(
            find_label(HIGH_BYTE_TABLE_LABELS, "utf8", Language::En),
            Some("UTF-8")
        );
        assert_eq!(find_label(NON_PRINTABLE_TABLE_LABELS, "nope", Language::En), None);
        assert_eq!(Language::from_tag("fr-CA"), Some(Language::Fr));
        assert_eq!(Language::from_tag("de"), None);
    }
}
