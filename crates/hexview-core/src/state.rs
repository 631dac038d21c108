//! Viewer state and the state manager.
//!
//! [`HexViewState`] is one immutable snapshot of everything the viewer knows. [`HexViewer`]
//! owns the current snapshot and replaces it once per action:
//!
//! 1. the host sends an [`Action`] (or a key, or a debounced search tick)
//! 2. the action runs through the [pipeline](crate::pipeline), producing the next snapshot
//!    and a list of [`Effect`]s
//! 3. the [render patcher](crate::render) diffs the two snapshots over the mounted window
//! 4. the version is incremented and subscribers are notified
//!
//! # Example
//!
//! ```rust
//! use hexview_core::{Action, Column, HeadlessHost, HexViewer, PointerAction};
//!
//! let mut viewer = HexViewer::new(vec![0x00, 0x41, 0xFF]);
//! let mut host = HeadlessHost::default();
//!
//! viewer.dispatch_with(
//!     Action::Pointer(PointerAction::Down { index: 2, column: Column::Hex }),
//!     &mut host,
//! );
//! viewer.dispatch_with(
//!     Action::Pointer(PointerAction::Enter { index: 0, column: Column::Hex }),
//!     &mut host,
//! );
//! viewer.dispatch_with(Action::Pointer(PointerAction::Up { index: 0 }), &mut host);
//!
//! let range = viewer.state().selection.range.unwrap();
//! assert_eq!((range.start, range.end), (0, 2));
//! ```

use crate::buffer::HexBuffer;
use crate::commands::{Action, LocationAction, SearchAction, SettingsAction};
use crate::copy::HoverState;
use crate::cursor::CursorState;
use crate::debounce::SearchDebouncer;
use crate::encoding::{CopyMode, GlyphTable};
use crate::history::SearchHistory;
use crate::host::ViewerHost;
use crate::input::{self, KeyEvent, KeyOutcome};
use crate::layout::{LayoutState, ScrollState};
use crate::location::Location;
use crate::mode::ModeState;
use crate::pipeline::{self, Effect};
use crate::render::{self, CellPatch, CellSurface, CellView, HighlightSet, RowView};
use crate::search::SearchState;
use crate::selection::SelectionState;
use crate::settings::ViewSettings;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// One snapshot of the viewer.
#[derive(Debug, Clone)]
pub struct HexViewState {
    /// The bytes and their hex projection.
    pub buffer: Arc<HexBuffer>,
    /// The text projection's glyphs, derived from the encoding settings.
    pub glyphs: Arc<GlyphTable>,
    /// Viewport and presentation.
    pub mode: ModeState,
    /// User settings.
    pub settings: ViewSettings,
    /// Geometry and focus.
    pub layout: LayoutState,
    /// Scroll position.
    pub scroll: ScrollState,
    /// Keyboard cursor.
    pub cursor: CursorState,
    /// Drag selection.
    pub selection: SelectionState,
    /// Pointer hover.
    pub hover: HoverState,
    /// Search bar and matches.
    pub search: SearchState,
    /// Search history.
    pub history: SearchHistory,
}

impl PartialEq for HexViewState {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.buffer, &other.buffer) || self.buffer == other.buffer)
            && (Arc::ptr_eq(&self.glyphs, &other.glyphs) || self.glyphs == other.glyphs)
            && self.mode == other.mode
            && self.settings == other.settings
            && self.layout == other.layout
            && self.scroll == other.scroll
            && self.cursor == other.cursor
            && self.selection == other.selection
            && self.hover == other.hover
            && self.search == other.search
            && self.history == other.history
    }
}

impl Default for HexViewState {
    fn default() -> Self {
        Self::from_buffer(HexBuffer::empty())
    }
}

impl HexViewState {
    /// Initial state over `bytes`.
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::from_buffer(HexBuffer::load(bytes))
    }

    fn from_buffer(buffer: HexBuffer) -> Self {
        let mode = ModeState::default();
        let settings = ViewSettings::default();
        let mut layout = LayoutState::default();
        layout.view.columns = mode.default_columns();
        layout.view.rows = mode.default_rows();
        layout.offset_width = mode.breakpoint.offset_width();
        Self {
            buffer: Arc::new(buffer),
            glyphs: Arc::new(GlyphTable::new(settings.encoding, CopyMode::Displayed)),
            mode,
            settings,
            layout,
            scroll: ScrollState::default(),
            cursor: CursorState::default(),
            selection: SelectionState::default(),
            hover: HoverState::default(),
            search: SearchState::default(),
            history: SearchHistory::default(),
        }
    }

    /// Render cell `index`.
    pub fn cell(&self, index: usize) -> Option<CellView<'_>> {
        render::cell_view(self, index)
    }

    /// Render row `row`.
    pub fn row(&self, row: usize) -> Option<RowView<'_>> {
        render::row_view(self, row)
    }

    /// Highlights of cell `index`.
    pub fn highlights_at(&self, index: usize) -> HighlightSet {
        render::highlights_at(self, index)
    }

    /// Number of rows at the current column count.
    pub fn row_count(&self) -> usize {
        self.buffer.row_count(self.layout.view.columns)
    }
}

/// State change record handed to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    /// Name of the action that caused it.
    pub action: &'static str,
    /// Version before.
    pub old_version: u64,
    /// Version after.
    pub new_version: u64,
    /// Number of cell patches produced.
    pub patch_count: usize,
}

/// State change callback function type
pub type StateChangeCallback = Box<dyn FnMut(&StateChange) + Send>;

/// Outcome of one dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Side effects to execute.
    pub effects: Vec<Effect>,
    /// Cell patches for the mounted window.
    pub patches: Vec<CellPatch>,
    /// The mounted window changed; the surface needs a full remount instead of patches.
    pub remount: bool,
    /// Whether the state changed at all.
    pub changed: bool,
}

/// Viewer state manager.
///
/// Owns the current [`HexViewState`], runs actions through the pipeline, tracks a version
/// number and notifies subscribers. With [`dispatch_with`](Self::dispatch_with) it also
/// drives a [`ViewerHost`]: patches go to the cell surface and effects go to the clipboard,
/// the virtualizer and storage.
pub struct HexViewer {
    state: HexViewState,
    version: u64,
    callbacks: Vec<StateChangeCallback>,
    debouncer: SearchDebouncer,
}

impl Default for HexViewer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for HexViewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HexViewer")
            .field("state", &self.state)
            .field("version", &self.version)
            .field("callbacks", &self.callbacks.len())
            .field("debouncer", &self.debouncer)
            .finish()
    }
}

impl HexViewer {
    /// Viewer over `bytes`.
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::with_state(HexViewState::new(bytes))
    }

    /// Viewer over an empty buffer.
    pub fn empty() -> Self {
        Self::with_state(HexViewState::default())
    }

    /// Viewer starting from `state`.
    pub fn with_state(state: HexViewState) -> Self {
        Self {
            state,
            version: 0,
            callbacks: Vec::new(),
            debouncer: SearchDebouncer::default(),
        }
    }

    /// Replace the search debouncer (e.g. to change the delay).
    pub fn with_debouncer(mut self, debouncer: SearchDebouncer) -> Self {
        self.debouncer = debouncer;
        self
    }

    /// Current snapshot.
    pub fn state(&self) -> &HexViewState {
        &self.state
    }

    /// Current version.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Check if state has changed since a version
    pub fn has_changed_since(&self, version: u64) -> bool {
        self.version > version
    }

    /// Subscribe to state change notifications
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&StateChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Pending debounced query, if any.
    pub fn debouncer(&self) -> &SearchDebouncer {
        &self.debouncer
    }

    /// Run `action` and return its effects and patches without executing them.
    pub fn dispatch(&mut self, action: Action) -> Dispatch {
        let (next, effects) = pipeline::run(&self.state, &action);
        let changed = next != self.state;

        let prev_mounted = self.state.layout.mounted;
        let next_mounted = next.layout.mounted;
        let remount = prev_mounted != next_mounted;
        let patches = match next_mounted {
            Some(mounted) if changed && !remount => render::diff(&self.state, &next, &mounted),
            _ => Vec::new(),
        };

        debug!(
            action = action.name(),
            changed,
            effects = effects.len(),
            patches = patches.len(),
            "dispatched action"
        );

        self.state = next;
        if changed {
            let old_version = self.version;
            self.version += 1;
            let change = StateChange {
                action: action.name(),
                old_version,
                new_version: self.version,
                patch_count: patches.len(),
            };
            self.notify_callbacks(&change);
        }

        Dispatch {
            effects,
            patches,
            remount,
            changed,
        }
    }

    /// Run `action` and apply the result to `host`.
    pub fn dispatch_with<H: ViewerHost + ?Sized>(&mut self, action: Action, host: &mut H) -> Dispatch {
        let dispatch = self.dispatch(action);
        self.apply(&dispatch, host);
        dispatch
    }

    /// Apply a dispatch result to `host`: patch (or remount) the surface, then run effects.
    pub fn apply<H: ViewerHost + ?Sized>(&self, dispatch: &Dispatch, host: &mut H) {
        if dispatch.remount {
            let range = self.state.layout.mounted;
            let cells = range
                .map(|range| render::highlights_in(&self.state, range.overscan()))
                .unwrap_or_default();
            host.surface().remount(range, &cells);
        } else {
            let surface = host.surface();
            for patch in &dispatch.patches {
                surface.apply(*patch);
            }
        }
        for effect in &dispatch.effects {
            if let Err(err) = crate::host::execute(effect, host) {
                warn!(error = %err, "host effect failed");
            }
        }
    }

    /// Load stored settings and mount the surface. Storage failures keep the defaults.
    pub fn mount<H: ViewerHost + ?Sized>(&mut self, host: &mut H) {
        match host.storage().load() {
            Ok(Some(blob)) => {
                self.dispatch_with(Action::Settings(SettingsAction::Loaded(blob)), host);
            }
            Ok(None) => debug!("no stored settings"),
            Err(err) => warn!(error = %err, "failed to load settings, using defaults"),
        }
        let range = self.state.layout.mounted;
        let cells = range
            .map(|range| render::highlights_in(&self.state, range.overscan()))
            .unwrap_or_default();
        host.surface().remount(range, &cells);
    }

    /// Seed the view from a location string.
    pub fn load_location<H: ViewerHost + ?Sized>(&mut self, input: &str, host: &mut H) -> Dispatch {
        let location = Location::decode(input, self.state.buffer.len());
        self.dispatch_with(Action::Location(LocationAction::Apply(location)), host)
    }

    /// The current location string.
    pub fn location(&self) -> String {
        Location::capture(&self.state).encode()
    }

    /// Search input changed. Matching is deferred until [`tick`](Self::tick) sees the debounce
    /// delay elapse.
    pub fn search_input<H: ViewerHost + ?Sized>(&mut self, input: &str, now: Instant, host: &mut H) {
        self.dispatch_with(Action::Search(SearchAction::Type(input.to_string())), host);
        self.debouncer.push(input, now);
    }

    /// Fire the debounced query if its delay has elapsed. Returns whether it fired.
    pub fn tick<H: ViewerHost + ?Sized>(&mut self, now: Instant, host: &mut H) -> bool {
        match self.debouncer.poll(now) {
            Some(query) => {
                self.dispatch_with(Action::Search(SearchAction::SetQuery(query)), host);
                true
            }
            None => false,
        }
    }

    /// Handle a key. Keys are consumed only when they map to an action in the current focus.
    pub fn handle_key<H: ViewerHost + ?Sized>(&mut self, event: KeyEvent, host: &mut H) -> KeyOutcome {
        let Some(action) = input::key_action(&self.state, &event) else {
            return KeyOutcome::Ignored;
        };
        if matches!(action, Action::Search(SearchAction::Commit { .. })) {
            // Commit applies the typed input itself.
            self.debouncer.cancel();
        }
        self.dispatch_with(action, host);
        KeyOutcome::Consumed
    }

    fn notify_callbacks(&mut self, change: &StateChange) {
        for callback in &mut self.callbacks {
            callback(change);
        }
    }
}
