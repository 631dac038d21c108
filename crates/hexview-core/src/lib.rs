#![warn(missing_docs)]
//! Hexview Core - Headless Hex Viewer Engine
//!
//! # Overview
//!
//! `hexview-core` is the state machine behind a virtualized hex viewer. It handles navigation,
//! selection, search and clipboard export over a byte buffer shown as paired hex and text
//! columns. The engine does not render anything. It assumes the host owns a virtualized grid
//! that mounts a small window of cells, and it tells that grid which cells to re-highlight.
//!
//! # Core Features
//!
//! - **Two Projections, One Buffer**: hex tokens and text glyphs are O(1) lookups into
//!   precomputed data
//! - **Ordered Reducers**: every action runs through a fixed pipeline of pure reducers
//! - **Cell Patching**: only the mounted cells whose highlights changed are patched
//! - **Search**: text and hex queries matched over the hex projection, overlaps included
//! - **Copy/Export**: hex or text, displayed or parsed (C-escaped) renderings
//! - **Location Strings**: the shareable view state as a compact query string
//! - **Settings**: tolerant JSON blob with encoding tables, columns and history
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  HexViewer (dispatch, keys, host effects)   │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Render Patcher (diff over mounted window)  │  ← Cell Patches
//! ├─────────────────────────────────────────────┤
//! │  Reducer Pipeline (mode → ... → copy)       │  ← State Transitions
//! ├─────────────────────────────────────────────┤
//! │  Cursor / Selection / Search / Location     │  ← Per-Concern State
//! ├─────────────────────────────────────────────┤
//! │  Glyph Tables (encoding settings)           │  ← Text Projection
//! ├─────────────────────────────────────────────┤
//! │  HexBuffer (bytes + hex projection)         │  ← Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Dispatching Actions
//!
//! ```rust
//! use hexview_core::{Action, Column, CopyMode, CursorAction, Effect, HexViewer, copy_as};
//!
//! let mut viewer = HexViewer::new(vec![0x00, 0x41, 0xFF]);
//! viewer.dispatch(Action::Cursor(CursorAction::MoveTo(Some(1))));
//!
//! let dispatch = viewer.dispatch(copy_as(Column::Text, CopyMode::Displayed));
//! assert_eq!(dispatch.effects, vec![Effect::WriteClipboard("A".into())]);
//! ```
//!
//! ## Driving a Host
//!
//! ```rust
//! use hexview_core::{HeadlessHost, HexViewer, Key, KeyEvent, LayoutAction, Action, MountedRange};
//! use hexview_core::{Focus, KeyOutcome};
//!
//! let mut viewer = HexViewer::new(vec![0u8; 4096]);
//! let mut host = HeadlessHost::default();
//! viewer.mount(&mut host);
//!
//! let window = MountedRange::new(0, 383, 0, 767);
//! viewer.dispatch_with(Action::Layout(LayoutAction::RangeRendered(window)), &mut host);
//! viewer.dispatch_with(Action::Layout(LayoutAction::Focus(Focus::Body)), &mut host);
//!
//! assert_eq!(viewer.handle_key(KeyEvent::new(Key::End), &mut host), KeyOutcome::Consumed);
//! assert_eq!(viewer.state().cursor.index, Some(4095));
//! assert!(host.virtualizer.last().is_some());
//! ```
//!
//! # Module Description
//!
//! - [`buffer`] - Byte buffer and hex projection
//! - [`encoding`] - Byte classes, encoding tables and glyph tables
//! - [`cursor`] - Keyboard cursor
//! - [`selection`] - Drag selection
//! - [`search`] - Query parsing and match indexing
//! - [`history`] - Search history
//! - [`copy`] - Clipboard export
//! - [`location`] - Location string codec
//! - [`layout`] - Columns, rows, mounted range and scrolling
//! - [`mode`] - Viewport, theme and labels
//! - [`settings`] - User settings and the persisted blob
//! - [`render`] - Highlights and cell patches
//! - [`commands`] - Action vocabulary
//! - [`pipeline`] - Ordered reducers and effects
//! - [`state`] - State snapshot and manager
//! - [`host`] - Host traits and in-memory hosts
//! - [`input`] - Keyboard mapping
//! - [`debounce`] - Search debouncing
//!
//! # Performance Goals
//!
//! - **Loading**: one linear pass to build the hex projection
//! - **Lookups**: `hex_of`/`char_of` are O(1)
//! - **Patching**: proportional to the mounted window, not to the buffer

pub mod buffer;
pub mod commands;
pub mod copy;
pub mod cursor;
pub mod debounce;
pub mod encoding;
pub mod error;
pub mod history;
pub mod host;
pub mod input;
pub mod layout;
pub mod location;
pub mod mode;
pub mod pipeline;
pub mod render;
pub mod search;
pub mod selection;
pub mod settings;
pub mod state;

pub use buffer::{HEX_STRIDE, HexBuffer, OffsetBase};
pub use commands::{
    Action, BufferAction, CopyAction, CursorAction, HistoryAction, LayoutAction, LocationAction,
    ModeAction, PointerAction, SearchAction, SettingsAction, copy_as,
};
pub use copy::{Column, CopyRequest, HoverState, copy_cursor, copy_selection, copy_text};
pub use cursor::{CursorMove, CursorState, Navigation};
pub use debounce::{DEFAULT_SEARCH_DELAY, SearchDebouncer};
pub use encoding::{
    ByteClass, ClassEncoding, CopyMode, DEFAULT_DISPLAY_CHAR, EncodingSettings, GlyphTable,
    HighByteTable, NonPrintableTable, TextEncoding,
};
pub use error::{ClipboardError, HostError, SettingsError};
pub use history::{HISTORY_LIMIT, SearchHistory};
pub use host::{
    Clipboard, FileStorage, HeadlessHost, MemoryClipboard, MemoryStorage, RecordingVirtualizer,
    SettingsStorage, ViewerHost, Virtualizer,
};
pub use input::{Key, KeyEvent, KeyOutcome, Modifiers};
pub use layout::{
    Focus, LayoutState, MountedRange, ROW_HEIGHT, ScrollAlign, ScrollRequest, ScrollState,
    ViewLayout,
};
pub use location::Location;
pub use mode::{BodyType, Breakpoint, ModeState, Theme};
pub use pipeline::{Effect, ReducerContext};
pub use render::{
    CellPatch, CellSurface, CellView, HeadlessSurface, HighlightClass, HighlightSet, RowView,
};
pub use search::{SearchKind, SearchPattern, SearchQuery, SearchState, find_matches};
pub use selection::{SelectionRange, SelectionState};
pub use settings::{SETTINGS_STORAGE_KEY, SettingsBlob, ViewSettings};
pub use state::{Dispatch, HexViewState, HexViewer, StateChange, StateChangeCallback};

pub use hexview_core_charsets::Language;
