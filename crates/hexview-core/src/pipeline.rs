//! The reducer pipeline.
//!
//! An action runs through a fixed sequence of per-concern reducers. Each reducer takes the
//! state produced by the one before it and returns the next state; nothing reaches into a
//! shared global. Reducers see the snapshot from before the action through
//! [`ReducerContext::prev`], which is how downstream concerns notice upstream changes (a new
//! buffer, a rebuilt glyph table).
//!
//! Reducers never perform I/O. Side effects are collected as [`Effect`]s and executed by
//! the host afterwards.
//!
//! | # | Stage | Concern |
//! |---|---|---|
//! | 1 | `mode` | viewport size, theme, language |
//! | 2 | `buffer` | buffer replacement |
//! | 3 | `settings` | user settings and the glyph table |
//! | 4 | `layout` | columns, rows, mounted window, focus |
//! | 5 | `location` | location seeding and sharing |
//! | 6 | `history` | search history |
//! | 7 | `cursor` | keyboard cursor |
//! | 8 | `selection` | drag selection and hover |
//! | 9 | `search` | query and matches |
//! | 10 | `copy` | clipboard export |

use crate::buffer::HexBuffer;
use crate::commands::{
    Action, BufferAction, CopyAction, CursorAction, HistoryAction, LayoutAction, LocationAction,
    ModeAction, PointerAction, SearchAction, SettingsAction,
};
use crate::copy::{Column, CopyRequest, HoverState, copy_text};
use crate::cursor::{CursorState, Navigation};
use crate::encoding::{CopyMode, GlyphTable};
use crate::history::SearchHistory;
use crate::layout::{Focus, MountedRange, ScrollAlign, ScrollRequest, paged_top_row};
use crate::location::Location;
use crate::mode::BodyType;
use crate::search::SearchQuery;
use crate::selection::SelectionState;
use crate::settings::{SettingsBlob, ViewSettings, clamp_columns, display_char};
use crate::state::HexViewState;
use std::sync::Arc;
use tracing::{debug, warn};

/// A side effect requested by a reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Put text on the clipboard.
    WriteClipboard(String),
    /// Scroll the virtualizer.
    ScrollTo(ScrollRequest),
    /// Save settings.
    SaveSettings(SettingsBlob),
    /// Publish an encoded location string.
    PublishLocation(String),
}

/// What each reducer gets besides the state it is transforming.
pub struct ReducerContext<'a> {
    prev: &'a HexViewState,
    effects: Vec<Effect>,
}

impl<'a> ReducerContext<'a> {
    /// Context for an action applied to `prev`.
    pub fn new(prev: &'a HexViewState) -> Self {
        Self {
            prev,
            effects: Vec::new(),
        }
    }

    /// State before the action.
    pub fn prev(&self) -> &HexViewState {
        self.prev
    }

    /// Queue a side effect.
    pub fn emit(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Effects queued so far.
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Take the queued effects.
    pub fn into_effects(self) -> Vec<Effect> {
        self.effects
    }

    fn buffer_changed(&self, state: &HexViewState) -> bool {
        !Arc::ptr_eq(&self.prev.buffer, &state.buffer)
    }

    fn glyphs_changed(&self, state: &HexViewState) -> bool {
        !Arc::ptr_eq(&self.prev.glyphs, &state.glyphs)
    }
}

/// A reducer: `(context, state, action) -> state`.
pub type Reducer = fn(&mut ReducerContext<'_>, HexViewState, &Action) -> HexViewState;

/// A named pipeline stage.
#[derive(Clone, Copy)]
pub struct Stage {
    /// Stage name, for logs.
    pub name: &'static str,
    /// The reducer.
    pub reduce: Reducer,
}

/// Every stage, in execution order.
pub const PIPELINE: [Stage; 10] = [
    Stage {
        name: "mode",
        reduce: mode_reducer,
    },
    Stage {
        name: "buffer",
        reduce: buffer_reducer,
    },
    Stage {
        name: "settings",
        reduce: settings_reducer,
    },
    Stage {
        name: "layout",
        reduce: layout_reducer,
    },
    Stage {
        name: "location",
        reduce: location_reducer,
    },
    Stage {
        name: "history",
        reduce: history_reducer,
    },
    Stage {
        name: "cursor",
        reduce: cursor_reducer,
    },
    Stage {
        name: "selection",
        reduce: selection_reducer,
    },
    Stage {
        name: "search",
        reduce: search_reducer,
    },
    Stage {
        name: "copy",
        reduce: copy_reducer,
    },
];

/// Run `action` through every stage.
pub fn run(prev: &HexViewState, action: &Action) -> (HexViewState, Vec<Effect>) {
    let mut ctx = ReducerContext::new(prev);
    let mut state = prev.clone();
    for stage in &PIPELINE {
        state = (stage.reduce)(&mut ctx, state, action);
    }
    (state, ctx.into_effects())
}

/// Bring `index` into view. Window bodies ask the virtualizer; paged bodies move their own
/// page and tell the host the new top row.
fn reveal(
    ctx: &mut ReducerContext<'_>,
    mut state: HexViewState,
    index: usize,
    align: ScrollAlign,
) -> HexViewState {
    let Some(index) = state.buffer.clamp(index) else {
        return state;
    };
    match state.settings.body {
        BodyType::Window => {
            if let Some(request) = state.layout.scroll_to(index, align) {
                ctx.emit(Effect::ScrollTo(request));
            }
        }
        BodyType::Table => {
            let columns = state.layout.view.columns;
            let top = paged_top_row(
                state.scroll.top_row,
                state.layout.row_of(index),
                state.layout.view.rows,
                state.buffer.row_count(columns),
                align,
            );
            if top != state.scroll.top_row {
                state.scroll.top_row = top;
                state.layout.mounted = paged_window(&state);
                ctx.emit(Effect::ScrollTo(ScrollRequest {
                    row: top,
                    align: ScrollAlign::Top,
                }));
            }
        }
    }
    state
}

fn paged_window(state: &HexViewState) -> Option<MountedRange> {
    let top = state.scroll.top_row;
    let bottom = top + state.layout.view.rows.max(1) - 1;
    MountedRange::from_rows(
        top..=bottom,
        top..=bottom,
        state.layout.view.columns,
        state.buffer.len(),
    )
}

fn mode_reducer(
    _: &mut ReducerContext<'_>,
    mut state: HexViewState,
    action: &Action,
) -> HexViewState {
    match action {
        Action::Mode(ModeAction::Resize { width, height }) => {
            state.mode = state.mode.resized(*width, *height);
        }
        Action::Mode(ModeAction::SetTheme(theme)) => state.mode.theme = *theme,
        Action::Mode(ModeAction::SetLanguage(language)) => state.mode.language = *language,
        _ => {}
    }
    state
}

fn buffer_reducer(
    _: &mut ReducerContext<'_>,
    mut state: HexViewState,
    action: &Action,
) -> HexViewState {
    if let Action::Buffer(BufferAction::Load(bytes)) = action {
        state.buffer = Arc::new(HexBuffer::load(Arc::clone(bytes)));
        state.scroll.top_row = 0;
        state.layout.mounted = None;
        debug!(len = state.buffer.len(), "buffer loaded");
    }
    state
}

fn apply_setting(settings: ViewSettings, action: &SettingsAction) -> ViewSettings {
    let mut next = settings;
    match action {
        SettingsAction::SetOffsetBase(base) => next.offset_base = *base,
        SettingsAction::SetAutoColumns(auto) => next.columns.auto = *auto,
        SettingsAction::SetColumns(size) => {
            next.columns.auto = false;
            next.columns.size = clamp_columns(*size);
        }
        SettingsAction::SetNullChar(input) => match display_char(input) {
            Some(ch) => next.encoding.null_char = ch,
            None => debug!(input = input.as_str(), "rejected null character"),
        },
        SettingsAction::SetNonPrintableTable(table) => next.encoding.non_printable.table = *table,
        SettingsAction::SetNonPrintableFallback(input) => match display_char(input) {
            Some(ch) => next.encoding.non_printable.fallback = ch,
            None => debug!(input = input.as_str(), "rejected fallback character"),
        },
        SettingsAction::SetHighByteTable(table) => next.encoding.high_byte.table = *table,
        SettingsAction::SetHighByteFallback(input) => match display_char(input) {
            Some(ch) => next.encoding.high_byte.fallback = ch,
            None => debug!(input = input.as_str(), "rejected fallback character"),
        },
        SettingsAction::SetCopyMode(mode) => next.copy_mode = *mode,
        SettingsAction::SetBodyType(body) => next.body = *body,
        SettingsAction::SetPersist(persist) => next.persist = *persist,
        SettingsAction::Loaded(blob) => next = next.merged(blob),
        SettingsAction::Reset => next = ViewSettings::default(),
    }
    next
}

fn settings_reducer(
    ctx: &mut ReducerContext<'_>,
    mut state: HexViewState,
    action: &Action,
) -> HexViewState {
    let before = state.settings;
    match action {
        Action::Settings(setting) => {
            state.settings = apply_setting(state.settings, setting);
            if let SettingsAction::Loaded(blob) = setting {
                state.history = SearchHistory::from_entries(blob.history.iter().cloned());
            }
        }
        Action::Location(LocationAction::Apply(location)) => {
            if let Some(base) = location.offset_base {
                state.settings.offset_base = base;
            }
            if let Some(columns) = location.columns {
                state.settings.columns.auto = false;
                state.settings.columns.size = clamp_columns(columns);
            }
        }
        _ => {}
    }

    if state.settings.encoding != before.encoding {
        state.glyphs = Arc::new(GlyphTable::new(state.settings.encoding, CopyMode::Displayed));
    }

    let user_change = matches!(
        action,
        Action::Settings(setting) if !matches!(setting, SettingsAction::Loaded(_))
    );
    if user_change && state.settings != before && (state.settings.persist || before.persist) {
        ctx.emit(Effect::SaveSettings(state.settings.to_blob(&state.history)));
    }
    state
}

fn layout_reducer(
    ctx: &mut ReducerContext<'_>,
    mut state: HexViewState,
    action: &Action,
) -> HexViewState {
    let before = state.layout;
    let len = state.buffer.len();
    match action {
        Action::Layout(LayoutAction::RangeRendered(range)) => {
            if state.settings.body == BodyType::Window {
                state.layout.mounted = clamp_range(*range, len);
            }
        }
        Action::Layout(LayoutAction::Focus(focus)) => state.layout.focus = *focus,
        Action::Layout(LayoutAction::ClickAway) => state.layout.focus = Focus::None,
        Action::Pointer(PointerAction::Down { .. }) => state.layout.focus = Focus::Body,
        Action::Search(SearchAction::Type(_)) | Action::History(_) => {
            state.layout.focus = Focus::Toolbar;
        }
        _ => {}
    }

    state.layout.view.columns = if state.settings.columns.auto {
        state.mode.default_columns()
    } else {
        state.settings.columns.size
    };
    state.layout.view.auto_columns = state.settings.columns.auto;
    state.layout.view.rows = state.mode.default_rows();
    state.layout.offset_width = state.mode.breakpoint.offset_width();

    let columns = state.layout.view.columns;
    if columns != before.view.columns {
        // Keep the same first byte on screen.
        state.scroll.top_row = state.scroll.top_row * before.view.columns.max(1) / columns.max(1);
    }

    match state.settings.body {
        BodyType::Window => {
            if ctx.prev.settings.body == BodyType::Table {
                state.layout.mounted = None;
            }
            if let Some(range) = state.layout.mounted {
                state.scroll.top_row = state.layout.row_of(range.visible_start);
            }
        }
        BodyType::Table => {
            let max_top = state.buffer.row_count(columns).saturating_sub(state.layout.view.rows);
            state.scroll.top_row = state.scroll.top_row.min(max_top);
            state.layout.mounted = paged_window(&state);
        }
    }

    if let Action::Layout(LayoutAction::ScrollTo { index, align }) = action {
        state = reveal(ctx, state, *index, *align);
    }
    state
}

fn clamp_range(range: MountedRange, len: usize) -> Option<MountedRange> {
    let last = len.checked_sub(1)?;
    if range.overscan_start > last {
        return None;
    }
    Some(MountedRange::new(
        range.visible_start.min(last),
        range.visible_stop.min(last),
        range.overscan_start,
        range.overscan_stop.min(last),
    ))
}

fn location_reducer(
    ctx: &mut ReducerContext<'_>,
    mut state: HexViewState,
    action: &Action,
) -> HexViewState {
    match action {
        Action::Location(LocationAction::Apply(location)) => {
            if let Some(scroll) = location.scroll.filter(|&z| z < state.buffer.len()) {
                if state.settings.body == BodyType::Window {
                    state.scroll.top_row = state.layout.row_of(scroll);
                }
                state = reveal(ctx, state, scroll, ScrollAlign::Top);
            }
        }
        Action::Location(LocationAction::Share) => {
            let encoded = Location::capture(&state).encode();
            debug!(location = encoded.as_str(), "sharing location");
            ctx.emit(Effect::PublishLocation(encoded));
        }
        _ => {}
    }
    state
}

fn history_reducer(
    ctx: &mut ReducerContext<'_>,
    mut state: HexViewState,
    action: &Action,
) -> HexViewState {
    match action {
        Action::Search(SearchAction::Commit { .. }) => {
            let before = state.history.entries().to_vec();
            state.history = state.history.push(&state.search.input);
            if state.history.entries() != before.as_slice() && state.settings.persist {
                ctx.emit(Effect::SaveSettings(state.settings.to_blob(&state.history)));
            }
        }
        Action::History(HistoryAction::RecallOlder) => {
            state.history = state.history.recall_older();
        }
        Action::History(HistoryAction::RecallNewer) => {
            state.history = state.history.recall_newer();
        }
        Action::Search(SearchAction::Type(_)) => state.history = state.history.reset_recall(),
        _ => {}
    }
    state
}

fn cursor_reducer(
    ctx: &mut ReducerContext<'_>,
    mut state: HexViewState,
    action: &Action,
) -> HexViewState {
    let len = state.buffer.len();
    if ctx.buffer_changed(&state) {
        state.cursor = CursorState::default();
    }
    let before = state.cursor;
    match action {
        Action::Cursor(CursorAction::MoveTo(index)) => {
            state.cursor = state.cursor.move_to(*index, len);
        }
        Action::Cursor(CursorAction::Move(step)) => {
            let nav = Navigation {
                len,
                columns: state.layout.view.columns,
                visible_rows: state.layout.visible_rows(),
            };
            state.cursor = state.cursor.apply(*step, nav);
        }
        Action::Pointer(PointerAction::Down { index, .. }) if *index < len => {
            state.cursor = CursorState::at(*index, len);
        }
        Action::Location(LocationAction::Apply(location)) => {
            if let Some(index) = location.cursor.filter(|&c| c < len) {
                state.cursor = CursorState::at(index, len);
            }
        }
        Action::Escape | Action::Layout(LayoutAction::ClickAway) => {
            state.cursor = CursorState::default();
        }
        _ => {}
    }

    if matches!(action, Action::Cursor(_)) && state.cursor != before {
        if let Some(index) = state.cursor.index {
            state = reveal(ctx, state, index, ScrollAlign::Include);
        }
    }
    state
}

fn selection_reducer(
    ctx: &mut ReducerContext<'_>,
    mut state: HexViewState,
    action: &Action,
) -> HexViewState {
    let len = state.buffer.len();
    if ctx.buffer_changed(&state) {
        state.selection = SelectionState::default();
        state.hover = HoverState::default();
    }
    match action {
        Action::Pointer(PointerAction::Down { index, column }) => {
            state.selection = state.selection.begin_drag(*index, len);
            state.hover = hover(*index, *column, len);
        }
        Action::Pointer(PointerAction::Enter { index, column }) => {
            state.selection = state.selection.extend_drag(*index, len);
            state.hover = hover(*index, *column, len);
        }
        Action::Pointer(PointerAction::Up { index }) => {
            state.selection = state.selection.end_drag(*index, len);
        }
        Action::Pointer(PointerAction::Leave) => state.hover.index = None,
        Action::Location(LocationAction::Apply(location)) => {
            if let Some(range) = location.selection {
                state.selection = SelectionState::seeded(range.start, range.end, len);
            }
        }
        Action::Escape | Action::Layout(LayoutAction::ClickAway) => {
            state.selection = state.selection.clear();
        }
        _ => {}
    }
    state
}

fn hover(index: usize, column: Column, len: usize) -> HoverState {
    HoverState {
        index: (index < len).then_some(index),
        column,
    }
}

fn search_reducer(
    ctx: &mut ReducerContext<'_>,
    mut state: HexViewState,
    action: &Action,
) -> HexViewState {
    let cursor = state.cursor.index;
    if ctx.buffer_changed(&state) || ctx.glyphs_changed(&state) {
        state.search = state.search.reindex(&state.buffer, &state.glyphs, cursor);
    }
    let before = state.search.active_start();
    let mut follow = false;

    match action {
        Action::Search(search) => {
            follow = true;
            let current = std::mem::take(&mut state.search);
            state.search = match search {
                SearchAction::Type(input) => current.typed(input),
                SearchAction::SetQuery(input) => {
                    current.with_query(input, &state.buffer, &state.glyphs, cursor)
                }
                SearchAction::SetKind(kind) => {
                    current.with_kind(*kind, &state.buffer, &state.glyphs, cursor)
                }
                SearchAction::ApplySuggestion(query) => current
                    .with_query(&query.to_input(), &state.buffer, &state.glyphs, cursor)
                    .close_suggestions(),
                SearchAction::Commit { backward } => {
                    let pending = Some(SearchQuery::parse(&current.input, current.kind))
                        .filter(|query| !query.is_blank());
                    let next = if pending != current.query {
                        let input = current.input.clone();
                        current.with_query(&input, &state.buffer, &state.glyphs, cursor)
                    } else if *backward {
                        current.previous_match()
                    } else {
                        current.next_match()
                    };
                    next.close_suggestions()
                }
                SearchAction::Next => current.next_match(),
                SearchAction::Previous => current.previous_match(),
                SearchAction::SelectMatch(index) => current.select_match(*index),
                SearchAction::Wheel(delta) if *delta > 0 => current.next_match(),
                SearchAction::Wheel(delta) if *delta < 0 => current.previous_match(),
                SearchAction::Wheel(_) => current,
                SearchAction::CloseSuggestions => current.close_suggestions(),
                SearchAction::Clear => current.clear(),
            };
        }
        Action::History(_) => {
            if ctx.prev.history.recall_position() != state.history.recall_position() {
                follow = true;
                let input = state.history.current().unwrap_or_default().to_string();
                let current = std::mem::take(&mut state.search);
                state.search = current
                    .with_query(&input, &state.buffer, &state.glyphs, cursor)
                    .close_suggestions();
            }
        }
        Action::Location(LocationAction::Apply(location)) => {
            follow = location.scroll.is_none();
            if let Some(query) = &location.query {
                let current = std::mem::take(&mut state.search);
                state.search =
                    current.with_query(&query.to_input(), &state.buffer, &state.glyphs, cursor);
            }
            if let Some(active) = location.active {
                if active < state.search.matches.len() {
                    state.search = std::mem::take(&mut state.search).select_match(active);
                } else {
                    warn!(
                        active,
                        matches = state.search.matches.len(),
                        "dropping active match from location"
                    );
                }
            }
        }
        Action::Escape => state.search = std::mem::take(&mut state.search).close_suggestions(),
        _ => {}
    }

    let after = state.search.active_start();
    if follow && after != before {
        if let Some(start) = after {
            state = reveal(ctx, state, start, ScrollAlign::IncludeMiddle);
        }
    }
    state
}

fn copy_reducer(
    ctx: &mut ReducerContext<'_>,
    state: HexViewState,
    action: &Action,
) -> HexViewState {
    let request = match action {
        Action::Copy(CopyAction::Copy) => CopyRequest {
            column: state.hover.column,
            mode: state.settings.copy_mode,
        },
        Action::Copy(CopyAction::CopyAs(request)) => *request,
        _ => return state,
    };
    let copied = copy_text(
        &state.buffer,
        state.cursor.index,
        state.selection.range,
        request,
        &state.settings.encoding,
    );
    match copied {
        Some(text) => ctx.emit(Effect::WriteClipboard(text)),
        None => debug!("nothing to copy"),
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::CursorMove;

    fn state(bytes: &[u8]) -> HexViewState {
        HexViewState::new(bytes.to_vec())
    }

    fn apply(state: &HexViewState, action: Action) -> (HexViewState, Vec<Effect>) {
        run(state, &action)
    }

    #[test]
    fn test_pipeline_order() {
        let names: Vec<_> = PIPELINE.iter().map(|stage| stage.name).collect();
        assert_eq!(
            names,
            [
                "mode",
                "buffer",
                "settings",
                "layout",
                "location",
                "history",
                "cursor",
                "selection",
                "search",
                "copy"
            ]
        );
    }

    #[test]
    fn test_pointer_down_sets_cursor_anchor_and_focus() {
        let (next, effects) = apply(
            &state(&[0; 64]),
            Action::Pointer(PointerAction::Down {
                index: 5,
                column: Column::Text,
            }),
        );
        assert_eq!(next.cursor.index, Some(5));
        assert_eq!(next.selection.anchor, Some(5));
        assert!(next.selection.highlighting);
        assert_eq!(next.layout.focus, Focus::Body);
        assert_eq!(next.hover.column, Column::Text);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_buffer_load_resets_downstream() {
        let start = state(b"AAAA");
        let (start, _) = apply(&start, Action::Cursor(CursorAction::MoveTo(Some(3))));
        let (start, _) = apply(&start, Action::Search(SearchAction::SetQuery("text:A".into())));
        assert_eq!(start.search.matches.len(), 4);

        let (next, _) = apply(&start, Action::Buffer(BufferAction::Load(Arc::from(&b"xA"[..]))));
        assert_eq!(next.cursor.index, None);
        assert_eq!(&*next.search.matches, &[1]);
        assert_eq!(next.search.query, start.search.query);
    }

    #[test]
    fn test_encoding_change_reindexes() {
        let start = state(&[0x00, 0x01, 0x41]);
        let (start, _) = apply(&start, Action::Search(SearchAction::SetQuery("text:.".into())));
        assert_eq!(&*start.search.matches, &[0, 1]);

        let (next, effects) = apply(
            &start,
            Action::Settings(SettingsAction::SetNullChar("0".into())),
        );
        assert_eq!(&*next.search.matches, &[1]);
        assert!(matches!(effects.as_slice(), [Effect::SaveSettings(_)]));
    }

    #[test]
    fn test_keyboard_move_scrolls_when_leaving_view() {
        let start = state(&[0; 256]);
        let (start, _) = apply(
            &start,
            Action::Layout(LayoutAction::RangeRendered(MountedRange::new(0, 63, 0, 95))),
        );
        let (start, effects) = apply(&start, Action::Cursor(CursorAction::MoveTo(Some(60))));
        assert!(effects.is_empty());
        let (next, effects) = apply(&start, Action::Cursor(CursorAction::Move(CursorMove::Down)));
        assert_eq!(next.cursor.index, Some(60 + next.layout.view.columns));
        assert!(matches!(
            effects.as_slice(),
            [Effect::ScrollTo(ScrollRequest {
                align: ScrollAlign::Include,
                ..
            })]
        ));
    }

    #[test]
    fn test_copy_effect() {
        let start = state(&[0x00, 0x41, 0xFF]);
        let (start, _) = apply(&start, Action::Cursor(CursorAction::MoveTo(Some(1))));
        let (_, effects) = apply(&start, Action::Copy(CopyAction::Copy));
        assert_eq!(effects, vec![Effect::WriteClipboard("41".into())]);

        let (_, effects) = apply(&state(&[1, 2]), Action::Copy(CopyAction::Copy));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_escape_keeps_query() {
        let start = state(b"abc");
        let (start, _) = apply(&start, Action::Cursor(CursorAction::MoveTo(Some(1))));
        let (start, _) = apply(&start, Action::Search(SearchAction::Type("b".into())));
        let (start, _) = apply(&start, Action::Search(SearchAction::SetQuery("b".into())));
        assert!(start.search.suggestions_open);

        let (next, _) = apply(&start, Action::Escape);
        assert_eq!(next.cursor.index, None);
        assert!(!next.search.suggestions_open);
        assert_eq!(&*next.search.matches, &[1]);
    }

    #[test]
    fn test_table_body_pages_itself() {
        let start = state(&[0; 4096]);
        let (start, _) = apply(
            &start,
            Action::Settings(SettingsAction::SetBodyType(BodyType::Table)),
        );
        let rows = start.layout.view.rows;
        let columns = start.layout.view.columns;
        assert_eq!(start.layout.mounted.map(|r| r.overscan_stop), Some(rows * columns - 1));

        let (next, effects) = apply(&start, Action::Cursor(CursorAction::Move(CursorMove::End)));
        assert!(next.scroll.top_row > 0);
        assert!(next.layout.mounted.is_some_and(|r| r.contains(4095)));
        assert!(matches!(effects.as_slice(), [Effect::ScrollTo(_)]));
    }
}
