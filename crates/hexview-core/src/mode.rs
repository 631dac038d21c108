//! Viewport mode: theme, language and the width bucket.

use crate::buffer::OffsetBase;
use crate::encoding::{HighByteTable, NonPrintableTable};
use crate::layout::{self, OFFSET_WIDTH};
use hexview_core_charsets::{self as charsets, Language};

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl Theme {
    /// Short name used in class names.
    pub fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Viewport width bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Breakpoint {
    /// `< 600`.
    Xs,
    /// `< 960`.
    Sm,
    /// `< 1280`.
    #[default]
    Md,
    /// `< 1920`.
    Lg,
    /// Anything wider.
    Xl,
}

impl Breakpoint {
    /// Bucket for a viewport `width`.
    pub fn from_width(width: u32) -> Self {
        match width {
            0..600 => Self::Xs,
            600..960 => Self::Sm,
            960..1280 => Self::Md,
            1280..1920 => Self::Lg,
            _ => Self::Xl,
        }
    }

    /// Offset column width for this bucket. The narrowest bucket hides the column.
    pub fn offset_width(self) -> usize {
        match self {
            Self::Xs => 0,
            _ => OFFSET_WIDTH,
        }
    }
}

/// How the body lays out rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BodyType {
    /// Virtualized list; rows come from the mounted range.
    #[default]
    Window,
    /// Paged table; rows come from the viewport height.
    Table,
}

impl BodyType {
    /// Persisted name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Window => "window",
            Self::Table => "table",
        }
    }

    /// Parse a persisted name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "window" => Some(Self::Window),
            "table" => Some(Self::Table),
            _ => None,
        }
    }
}

/// Viewport dimensions and presentation context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModeState {
    /// Theme.
    pub theme: Theme,
    /// Label language.
    pub language: Language,
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
    /// Bucket of `width`.
    pub breakpoint: Breakpoint,
}

impl Default for ModeState {
    fn default() -> Self {
        Self::with_size(1024, 600)
    }
}

impl ModeState {
    /// Mode for a viewport of `width` x `height`.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            theme: Theme::default(),
            language: Language::default(),
            width,
            height,
            breakpoint: Breakpoint::from_width(width),
        }
    }

    /// Resize, recomputing the bucket.
    pub fn resized(self, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            breakpoint: Breakpoint::from_width(width),
            ..self
        }
    }

    /// Columns the width bucket suggests.
    pub fn default_columns(&self) -> usize {
        layout::columns_for_width(self.width)
    }

    /// Rows per page for a paged body.
    pub fn default_rows(&self) -> usize {
        layout::rows_for_height(self.height)
    }

    /// Label for an offset base.
    pub fn offset_base_label(&self, base: OffsetBase) -> &'static str {
        charsets::find_label(charsets::OFFSET_BASE_LABELS, base.radix(), self.language)
            .unwrap_or_default()
    }

    /// Label for a non-printable table.
    pub fn non_printable_label(&self, table: NonPrintableTable) -> &'static str {
        charsets::find_label(
            charsets::NON_PRINTABLE_TABLE_LABELS,
            table.name(),
            self.language,
        )
        .unwrap_or_default()
    }

    /// Label for a high-byte table.
    pub fn high_byte_label(&self, table: HighByteTable) -> &'static str {
        charsets::find_label(charsets::HIGH_BYTE_TABLE_LABELS, table.name(), self.language)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::TextEncoding;

    #[test]
    fn test_breakpoints() {
        assert_eq!(Breakpoint::from_width(0), Breakpoint::Xs);
        assert_eq!(Breakpoint::from_width(599), Breakpoint::Xs);
        assert_eq!(Breakpoint::from_width(600), Breakpoint::Sm);
        assert_eq!(Breakpoint::from_width(1279), Breakpoint::Md);
        assert_eq!(Breakpoint::from_width(1280), Breakpoint::Lg);
        assert_eq!(Breakpoint::from_width(1920), Breakpoint::Xl);
        assert_eq!(Breakpoint::Xs.offset_width(), 0);
        assert_eq!(Breakpoint::Lg.offset_width(), 8);
    }

    #[test]
    fn test_labels_follow_language() {
        let mut mode = ModeState::default();
        assert_eq!(mode.offset_base_label(OffsetBase::Decimal), "Decimal");
        mode.language = Language::Fr;
        assert_eq!(mode.offset_base_label(OffsetBase::Decimal), "Décimal");
        assert_eq!(mode.non_printable_label(NonPrintableTable::Hidden), "Masqué");
        assert_eq!(
            mode.high_byte_label(HighByteTable::Decoder(TextEncoding::Utf16Le)),
            "UTF-16LE"
        );
    }

    #[test]
    fn test_every_table_has_a_label() {
        let mode = ModeState::default();
        for table in NonPrintableTable::ALL {
            assert!(!mode.non_printable_label(table).is_empty(), "{table:?}");
        }
        for table in HighByteTable::all() {
            assert!(!mode.high_byte_label(table).is_empty(), "{table:?}");
        }
    }

    #[test]
    fn test_default_geometry() {
        let mode = ModeState::with_size(1000, 400);
        assert_eq!(mode.default_columns(), 24);
        assert_eq!(mode.default_rows(), 20);
        assert_eq!(mode.resized(300, 40).breakpoint, Breakpoint::Xs);
    }
}
