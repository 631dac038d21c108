//! Action vocabulary.
//!
//! Every input the viewer reacts to is an [`Action`]. Actions are grouped by the concern that
//! originates them, but any reducer in the [pipeline](crate::pipeline) may react to any
//! action: a pointer press moves the cursor, starts a drag and focuses the body.
//!
//! # Example
//!
//! ```rust
//! use hexview_core::{Action, CursorAction, CursorMove, HexViewer};
//!
//! let mut viewer = HexViewer::new(b"hello".to_vec());
//! viewer.dispatch(Action::Cursor(CursorAction::Move(CursorMove::End)));
//! assert_eq!(viewer.state().cursor.index, Some(4));
//! ```

use crate::buffer::OffsetBase;
use crate::copy::{Column, CopyRequest};
use crate::cursor::CursorMove;
use crate::encoding::{CopyMode, HighByteTable, NonPrintableTable};
use crate::layout::{Focus, MountedRange, ScrollAlign};
use crate::location::Location;
use crate::mode::{BodyType, Theme};
use crate::search::{SearchKind, SearchQuery};
use crate::settings::SettingsBlob;
use hexview_core_charsets::Language;
use std::sync::Arc;

/// Viewport and presentation changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeAction {
    /// The viewport was resized.
    Resize {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// Switch theme.
    SetTheme(Theme),
    /// Switch label language.
    SetLanguage(Language),
}

/// Buffer lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferAction {
    /// Replace the buffer.
    Load(Arc<[u8]>),
}

/// Settings changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    /// A blob came back from storage.
    Loaded(SettingsBlob),
    /// Offset column base.
    SetOffsetBase(OffsetBase),
    /// Follow the viewport width for the column count.
    SetAutoColumns(bool),
    /// Fixed column count (turns auto columns off).
    SetColumns(usize),
    /// Glyph for byte 0, as typed by the user.
    SetNullChar(String),
    /// Table for `0x01..=0x1F`.
    SetNonPrintableTable(NonPrintableTable),
    /// Fallback for `0x01..=0x1F`, as typed by the user.
    SetNonPrintableFallback(String),
    /// Table for `0x80..=0xFF`.
    SetHighByteTable(HighByteTable),
    /// Fallback for `0x80..=0xFF`, as typed by the user.
    SetHighByteFallback(String),
    /// Clipboard rendering.
    SetCopyMode(CopyMode),
    /// Body layout.
    SetBodyType(BodyType),
    /// Save settings on change.
    SetPersist(bool),
    /// Restore defaults.
    Reset,
}

/// Geometry and focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutAction {
    /// The virtualizer mounted a new window of cells.
    RangeRendered(MountedRange),
    /// Focus moved.
    Focus(Focus),
    /// The user clicked outside the viewer.
    ClickAway,
    /// Bring a byte into view.
    ScrollTo {
        /// Byte index.
        index: usize,
        /// Alignment.
        align: ScrollAlign,
    },
}

/// Location string handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationAction {
    /// Seed the view from a decoded location.
    Apply(Location),
    /// Publish the current location.
    Share,
}

/// Search history recall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    /// One entry back (ArrowUp).
    RecallOlder,
    /// One entry forward (ArrowDown).
    RecallNewer,
}

/// Cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorAction {
    /// Jump to an index, or clear with `None`.
    MoveTo(Option<usize>),
    /// Keyboard navigation step.
    Move(CursorMove),
}

/// Pointer events over cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    /// Button pressed over a cell.
    Down {
        /// Cell index.
        index: usize,
        /// Column of the cell.
        column: Column,
    },
    /// Pointer entered a cell.
    Enter {
        /// Cell index.
        index: usize,
        /// Column of the cell.
        column: Column,
    },
    /// Button released over a cell.
    Up {
        /// Cell index.
        index: usize,
    },
    /// Pointer left the grid.
    Leave,
}

/// Search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    /// Keystroke in the search input. Matching waits for the debounce.
    Type(String),
    /// Run the query (debounce elapsed).
    SetQuery(String),
    /// Kind used for unprefixed input.
    SetKind(SearchKind),
    /// A suggestion was picked.
    ApplySuggestion(SearchQuery),
    /// Enter (or Shift+Enter with `backward`).
    Commit {
        /// Cycle to the previous match instead of the next.
        backward: bool,
    },
    /// Next match.
    Next,
    /// Previous match.
    Previous,
    /// Activate a match by position.
    SelectMatch(usize),
    /// Mouse wheel over the match counter. Positive is forward.
    Wheel(i32),
    /// Close the suggestion list.
    CloseSuggestions,
    /// Drop the query.
    Clear,
}

/// Clipboard export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyAction {
    /// Copy from the hovered column with the configured copy mode.
    Copy,
    /// Copy with explicit settings.
    CopyAs(CopyRequest),
}

/// Everything the viewer reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Viewport and presentation.
    Mode(ModeAction),
    /// Buffer lifecycle.
    Buffer(BufferAction),
    /// Settings.
    Settings(SettingsAction),
    /// Geometry and focus.
    Layout(LayoutAction),
    /// Location strings.
    Location(LocationAction),
    /// Search history.
    History(HistoryAction),
    /// Cursor.
    Cursor(CursorAction),
    /// Pointer.
    Pointer(PointerAction),
    /// Search.
    Search(SearchAction),
    /// Copy.
    Copy(CopyAction),
    /// Escape pressed.
    Escape,
}

impl Action {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mode(ModeAction::Resize { .. }) => "mode.resize",
            Self::Mode(ModeAction::SetTheme(_)) => "mode.theme",
            Self::Mode(ModeAction::SetLanguage(_)) => "mode.language",
            Self::Buffer(BufferAction::Load(_)) => "buffer.load",
            Self::Settings(SettingsAction::Loaded(_)) => "settings.loaded",
            Self::Settings(SettingsAction::Reset) => "settings.reset",
            Self::Settings(_) => "settings.change",
            Self::Layout(LayoutAction::RangeRendered(_)) => "layout.range",
            Self::Layout(LayoutAction::Focus(_)) => "layout.focus",
            Self::Layout(LayoutAction::ClickAway) => "layout.click_away",
            Self::Layout(LayoutAction::ScrollTo { .. }) => "layout.scroll_to",
            Self::Location(LocationAction::Apply(_)) => "location.apply",
            Self::Location(LocationAction::Share) => "location.share",
            Self::History(_) => "history.recall",
            Self::Cursor(_) => "cursor.move",
            Self::Pointer(PointerAction::Down { .. }) => "pointer.down",
            Self::Pointer(PointerAction::Enter { .. }) => "pointer.enter",
            Self::Pointer(PointerAction::Up { .. }) => "pointer.up",
            Self::Pointer(PointerAction::Leave) => "pointer.leave",
            Self::Search(SearchAction::Type(_)) => "search.type",
            Self::Search(SearchAction::SetQuery(_)) => "search.query",
            Self::Search(_) => "search.navigate",
            Self::Copy(_) => "copy",
            Self::Escape => "escape",
        }
    }
}

/// Column and copy mode pair, shorthand for [`CopyAction::CopyAs`].
pub fn copy_as(column: Column, mode: CopyMode) -> Action {
    Action::Copy(CopyAction::CopyAs(CopyRequest { column, mode }))
}
