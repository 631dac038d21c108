//! User settings and their persisted form.
//!
//! [`ViewSettings`] is what the reducers read. [`SettingsBlob`] is what storage sees: every
//! field optional, every unknown value tolerated, so a blob written by an older or newer
//! build still loads.

use crate::buffer::OffsetBase;
use crate::encoding::{ClassEncoding, CopyMode, EncodingSettings, HighByteTable, NonPrintableTable};
use crate::error::SettingsError;
use crate::history::SearchHistory;
use crate::layout::MAX_COLUMNS;
use crate::mode::BodyType;
use serde::{Deserialize, Serialize};
use tracing::warn;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Key hosts use when they store the blob in a key/value store.
pub const SETTINGS_STORAGE_KEY: &str = "hexViewer.settings";

/// Column count configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnSetting {
    /// Follow the viewport width bucket.
    pub auto: bool,
    /// Fixed count used when `auto` is off.
    pub size: usize,
}

impl Default for ColumnSetting {
    fn default() -> Self {
        Self {
            auto: true,
            size: 16,
        }
    }
}

/// Everything the user can configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewSettings {
    /// Offset column base.
    pub offset_base: OffsetBase,
    /// Text column encoding.
    pub encoding: EncodingSettings,
    /// Clipboard rendering.
    pub copy_mode: CopyMode,
    /// Column count.
    pub columns: ColumnSetting,
    /// Body layout.
    pub body: BodyType,
    /// Save every change to storage.
    pub persist: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            offset_base: OffsetBase::default(),
            encoding: EncodingSettings::default(),
            copy_mode: CopyMode::default(),
            columns: ColumnSetting::default(),
            body: BodyType::default(),
            persist: true,
        }
    }
}

/// Validate a user-entered display character.
///
/// Only the last grapheme of `input` is kept (so typing into a filled one-character field
/// replaces it). The grapheme must be a single `char` exactly one column wide.
pub fn display_char(input: &str) -> Option<char> {
    let grapheme = input.graphemes(true).next_back()?;
    if grapheme.width() != 1 {
        return None;
    }
    let mut chars = grapheme.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if !ch.is_control() => Some(ch),
        _ => None,
    }
}

/// Clamp a fixed column count into `1..=MAX_COLUMNS`.
pub fn clamp_columns(size: usize) -> usize {
    size.clamp(1, MAX_COLUMNS)
}

/// Persisted column configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnsBlob {
    /// Follow the viewport.
    pub auto: Option<bool>,
    /// Fixed count.
    pub size: Option<usize>,
}

/// Persisted table choice for one byte class.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassBlob {
    /// Table name.
    pub table: Option<String>,
    /// Fallback character.
    pub fallback: Option<String>,
}

/// The persisted settings shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsBlob {
    /// Offset radix (8, 10 or 16).
    pub offset_base: Option<u32>,
    /// Column configuration.
    pub columns: Option<ColumnsBlob>,
    /// Null glyph.
    pub null_char: Option<String>,
    /// Non-printable class.
    pub non_printable: Option<ClassBlob>,
    /// High-byte class.
    pub high_byte: Option<ClassBlob>,
    /// `"parsed"` or `"displayed"`.
    pub copy_mode: Option<String>,
    /// `"window"` or `"table"`.
    pub body: Option<String>,
    /// Whether changes are saved.
    pub persist: Option<bool>,
    /// Search history, most recent first.
    pub history: Vec<String>,
}

impl SettingsBlob {
    /// Parse a stored blob.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize for storage.
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl ViewSettings {
    /// The persisted form of these settings plus `history`.
    pub fn to_blob(&self, history: &SearchHistory) -> SettingsBlob {
        let class = |table: &str, fallback: char| ClassBlob {
            table: Some(table.to_string()),
            fallback: Some(fallback.to_string()),
        };
        SettingsBlob {
            offset_base: Some(self.offset_base.radix()),
            columns: Some(ColumnsBlob {
                auto: Some(self.columns.auto),
                size: Some(self.columns.size),
            }),
            null_char: Some(self.encoding.null_char.to_string()),
            non_printable: Some(class(
                self.encoding.non_printable.table.name(),
                self.encoding.non_printable.fallback,
            )),
            high_byte: Some(class(
                self.encoding.high_byte.table.name(),
                self.encoding.high_byte.fallback,
            )),
            copy_mode: Some(self.copy_mode.name().to_string()),
            body: Some(self.body.name().to_string()),
            persist: Some(self.persist),
            history: history.entries().to_vec(),
        }
    }

    /// Merge `blob` into these settings. Invalid fields are logged and skipped.
    pub fn merged(self, blob: &SettingsBlob) -> Self {
        let mut next = self;
        if let Some(radix) = blob.offset_base {
            match OffsetBase::from_radix(radix) {
                Some(base) => next.offset_base = base,
                None => warn!(radix, "ignoring unsupported offset base in settings"),
            }
        }
        if let Some(columns) = &blob.columns {
            if let Some(auto) = columns.auto {
                next.columns.auto = auto;
            }
            if let Some(size) = columns.size {
                next.columns.size = clamp_columns(size);
            }
        }
        if let Some(null_char) = blob.null_char.as_deref() {
            match display_char(null_char) {
                Some(ch) => next.encoding.null_char = ch,
                None => warn!(null_char, "ignoring invalid null character in settings"),
            }
        }
        if let Some(class) = &blob.non_printable {
            next.encoding.non_printable = merge_class(
                next.encoding.non_printable,
                class,
                NonPrintableTable::from_name,
            );
        }
        if let Some(class) = &blob.high_byte {
            next.encoding.high_byte =
                merge_class(next.encoding.high_byte, class, HighByteTable::from_name);
        }
        if let Some(mode) = blob.copy_mode.as_deref() {
            match CopyMode::from_name(mode) {
                Some(mode) => next.copy_mode = mode,
                None => warn!(mode, "ignoring unknown copy mode in settings"),
            }
        }
        if let Some(body) = blob.body.as_deref() {
            match BodyType::from_name(body) {
                Some(body) => next.body = body,
                None => warn!(body, "ignoring unknown body type in settings"),
            }
        }
        if let Some(persist) = blob.persist {
            next.persist = persist;
        }
        next
    }
}

fn merge_class<T: Default + Copy>(
    current: ClassEncoding<T>,
    blob: &ClassBlob,
    parse: fn(&str) -> Option<T>,
) -> ClassEncoding<T> {
    let mut next = current;
    if let Some(name) = blob.table.as_deref() {
        next.table = parse(name).unwrap_or_else(|| {
            warn!(table = name, "unknown encoding table in settings, using hidden");
            T::default()
        });
    }
    if let Some(fallback) = blob.fallback.as_deref() {
        match display_char(fallback) {
            Some(ch) => next.fallback = ch,
            None => warn!(fallback, "ignoring invalid fallback character in settings"),
        }
    }
    next
}
