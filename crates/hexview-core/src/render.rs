//! Incremental highlight patching.
//!
//! The viewer never re-renders the grid to show a new cursor or selection. Instead
//! [`diff`] compares two state snapshots and emits one [`CellPatch`] per mounted cell whose
//! highlight classes changed. Cells outside the mounted range are never patched; when the
//! virtualizer mounts them later they are rendered from [`highlights_at`].
//!
//! Categories and their cost:
//!
//! - cursor and hover: a single index each, O(1)
//! - selection: interval difference, O(changed cells)
//! - search matches and the active match: coverage over the mounted window, with the first
//!   overlapping match found by binary search

use crate::layout::MountedRange;
use crate::search::{self, SearchState};
use crate::selection::SelectionRange;
use crate::state::HexViewState;
use std::ops::{Range, RangeInclusive};
use std::sync::Arc;

/// A highlight a cell can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HighlightClass {
    /// Keyboard cursor.
    Cursor,
    /// Pointer hover.
    Hover,
    /// Inside the selection.
    Select,
    /// Inside a search match other than the active one.
    Search,
    /// Inside the active search match.
    ActiveSearch,
}

impl HighlightClass {
    /// All classes, in patch order.
    pub const ALL: [Self; 5] = [
        Self::Cursor,
        Self::Hover,
        Self::Select,
        Self::Search,
        Self::ActiveSearch,
    ];

    /// Class name for hosts that style cells by name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Cursor => "cursor",
            Self::Hover => "hover",
            Self::Select => "select",
            Self::Search => "search",
            Self::ActiveSearch => "search-active",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// A set of [`HighlightClass`]es.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HighlightSet(u8);

impl HighlightSet {
    /// No highlight.
    pub const EMPTY: Self = Self(0);

    /// Whether `class` is set.
    pub fn contains(self, class: HighlightClass) -> bool {
        self.0 & class.bit() != 0
    }

    /// Set or clear `class`.
    pub fn set(&mut self, class: HighlightClass, on: bool) {
        if on {
            self.0 |= class.bit();
        } else {
            self.0 &= !class.bit();
        }
    }

    /// A copy with `class` set.
    pub fn with(mut self, class: HighlightClass) -> Self {
        self.set(class, true);
        self
    }

    /// Whether no class is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Classes set, in [`HighlightClass::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = HighlightClass> {
        HighlightClass::ALL
            .into_iter()
            .filter(move |class| self.contains(*class))
    }
}

/// Turn one class on or off for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPatch {
    /// Cell index.
    pub index: usize,
    /// Class to change.
    pub class: HighlightClass,
    /// New state of the class.
    pub on: bool,
}

/// Something that owns rendered cells.
pub trait CellSurface {
    /// Apply a patch. Patches for cells that are not mounted must be ignored.
    fn apply(&mut self, patch: CellPatch);

    /// The mounted range changed; `cells` holds full highlights for the new window.
    fn remount(&mut self, range: Option<MountedRange>, cells: &[HighlightSet]) {
        let _ = (range, cells);
    }
}

struct Highlights<'a> {
    cursor: Option<usize>,
    hover: Option<usize>,
    selection: Option<SelectionRange>,
    search: &'a SearchState,
}

impl<'a> Highlights<'a> {
    fn of(state: &'a HexViewState) -> Self {
        Self {
            cursor: state.cursor.index,
            hover: state.hover.index,
            selection: state.selection.range,
            search: &state.search,
        }
    }
}

/// Highlights of cell `index` computed from scratch.
pub fn highlights_at(state: &HexViewState, index: usize) -> HighlightSet {
    let h = Highlights::of(state);
    let mut set = HighlightSet::EMPTY;
    set.set(HighlightClass::Cursor, h.cursor == Some(index));
    set.set(HighlightClass::Hover, h.hover == Some(index));
    set.set(
        HighlightClass::Select,
        h.selection.is_some_and(|range| range.contains(index)),
    );
    let window = index..=index;
    let active = h.search.active;
    let hits = h.search.overlapping(&window);
    for i in hits {
        if Some(i) == active {
            set.set(HighlightClass::ActiveSearch, true);
        } else {
            set.set(HighlightClass::Search, true);
        }
    }
    set
}

/// Highlights of every cell in `range`, computed from scratch.
pub fn highlights_in(state: &HexViewState, range: RangeInclusive<usize>) -> Vec<HighlightSet> {
    let len = state.buffer.len();
    if len == 0 || range.is_empty() || *range.start() >= len {
        return Vec::new();
    }
    let window = *range.start()..=(*range.end()).min(len - 1);
    let mut cells = vec![HighlightSet::EMPTY; window.end() - window.start() + 1];
    let h = Highlights::of(state);
    let mut mark = |index: usize, class: HighlightClass| {
        if window.contains(&index) {
            cells[index - window.start()].set(class, true);
        }
    };
    if let Some(index) = h.cursor {
        mark(index, HighlightClass::Cursor);
    }
    if let Some(index) = h.hover {
        mark(index, HighlightClass::Hover);
    }
    if let Some(selected) = h.selection.and_then(|range| clip(range.as_range(), &window)) {
        for index in selected {
            mark(index, HighlightClass::Select);
        }
    }
    let (search, active) = coverage(h.search, &window);
    for (offset, (is_search, is_active)) in search.into_iter().zip(active).enumerate() {
        if is_search {
            mark(window.start() + offset, HighlightClass::Search);
        }
        if is_active {
            mark(window.start() + offset, HighlightClass::ActiveSearch);
        }
    }
    cells
}

/// Patches turning the highlights of `prev` into those of `next` over `mounted`.
///
/// Patches come grouped by class in [`HighlightClass::ALL`] order, removals before
/// additions, each group ascending.
pub fn diff(prev: &HexViewState, next: &HexViewState, mounted: &MountedRange) -> Vec<CellPatch> {
    let window = mounted.overscan();
    let prev = Highlights::of(prev);
    let next = Highlights::of(next);
    let mut patches = Vec::new();

    single(&mut patches, prev.cursor, next.cursor, &window, HighlightClass::Cursor);
    single(&mut patches, prev.hover, next.hover, &window, HighlightClass::Hover);
    ranges(
        &mut patches,
        prev.selection.map(|r| r.as_range()),
        next.selection.map(|r| r.as_range()),
        &window,
        HighlightClass::Select,
    );

    let unchanged = Arc::ptr_eq(&prev.search.matches, &next.search.matches)
        && prev.search.length == next.search.length
        && prev.search.active == next.search.active;
    if !unchanged {
        let (prev_search, prev_active) = coverage(prev.search, &window);
        let (next_search, next_active) = coverage(next.search, &window);
        coverage_patches(
            &mut patches,
            &prev_search,
            &next_search,
            &window,
            HighlightClass::Search,
        );
        coverage_patches(
            &mut patches,
            &prev_active,
            &next_active,
            &window,
            HighlightClass::ActiveSearch,
        );
    }
    patches
}

fn single(
    out: &mut Vec<CellPatch>,
    prev: Option<usize>,
    next: Option<usize>,
    window: &RangeInclusive<usize>,
    class: HighlightClass,
) {
    if prev == next {
        return;
    }
    if let Some(index) = prev.filter(|i| window.contains(i)) {
        out.push(CellPatch {
            index,
            class,
            on: false,
        });
    }
    if let Some(index) = next.filter(|i| window.contains(i)) {
        out.push(CellPatch {
            index,
            class,
            on: true,
        });
    }
}

fn clip(
    range: RangeInclusive<usize>,
    window: &RangeInclusive<usize>,
) -> Option<RangeInclusive<usize>> {
    let start = (*range.start()).max(*window.start());
    let end = (*range.end()).min(*window.end());
    (start <= end).then_some(start..=end)
}

/// `a` minus `b`, as at most two intervals.
fn subtract(
    a: &RangeInclusive<usize>,
    b: Option<&RangeInclusive<usize>>,
) -> [Option<RangeInclusive<usize>>; 2] {
    let Some(b) = b else {
        return [Some(a.clone()), None];
    };
    let left = (*a.start() < *b.start())
        .then(|| *a.start()..=(*a.end()).min(*b.start() - 1));
    let right = (*a.end() > *b.end()).then(|| (*a.start()).max(*b.end() + 1)..=*a.end());
    [left.filter(|r| !r.is_empty()), right.filter(|r| !r.is_empty())]
}

fn ranges(
    out: &mut Vec<CellPatch>,
    prev: Option<RangeInclusive<usize>>,
    next: Option<RangeInclusive<usize>>,
    window: &RangeInclusive<usize>,
    class: HighlightClass,
) {
    if prev == next {
        return;
    }
    let prev = prev.and_then(|r| clip(r, window));
    let next = next.and_then(|r| clip(r, window));
    for (from, to, on) in [(&prev, &next, false), (&next, &prev, true)] {
        let Some(from) = from else { continue };
        for part in subtract(from, to.as_ref()).into_iter().flatten() {
            out.extend(part.map(|index| CellPatch { index, class, on }));
        }
    }
}

/// Per-cell coverage of `window` by non-active matches and by the active match.
fn coverage(search: &SearchState, window: &RangeInclusive<usize>) -> (Vec<bool>, Vec<bool>) {
    let size = window.end() - window.start() + 1;
    let mut others = vec![false; size];
    let mut active = vec![false; size];
    let hits: Range<usize> = search::overlapping(&search.matches, search.length, window);
    for i in hits {
        let start = search.matches[i];
        let covered = start.max(*window.start())..(start + search.length).min(window.end() + 1);
        let target = if Some(i) == search.active {
            &mut active
        } else {
            &mut others
        };
        for index in covered {
            target[index - window.start()] = true;
        }
    }
    (others, active)
}

fn coverage_patches(
    out: &mut Vec<CellPatch>,
    prev: &[bool],
    next: &[bool],
    window: &RangeInclusive<usize>,
    class: HighlightClass,
) {
    for on in [false, true] {
        for (offset, (&was, &is)) in prev.iter().zip(next).enumerate() {
            if was != is && is == on {
                out.push(CellPatch {
                    index: window.start() + offset,
                    class,
                    on,
                });
            }
        }
    }
}

/// Index-to-highlights arena for the mounted window.
///
/// Only mounted cells have an entry. A change of the mounted range drops the whole arena and
/// rebuilds it for the new window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessSurface {
    range: Option<MountedRange>,
    cells: Vec<HighlightSet>,
}

impl HeadlessSurface {
    /// An empty surface with nothing mounted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount the window `state` currently reports.
    pub fn mount_state(&mut self, state: &HexViewState) {
        let range = state.layout.mounted;
        let cells = range
            .map(|range| highlights_in(state, range.overscan()))
            .unwrap_or_default();
        CellSurface::remount(self, range, &cells);
    }

    /// Mounted range.
    pub fn mounted(&self) -> Option<MountedRange> {
        self.range
    }

    /// Highlights of a mounted cell.
    pub fn highlights(&self, index: usize) -> Option<HighlightSet> {
        let range = self.range?;
        if !range.contains(index) {
            return None;
        }
        self.cells.get(index - range.overscan_start).copied()
    }

    /// Mounted cells with their highlights, ascending.
    pub fn cells(&self) -> impl Iterator<Item = (usize, HighlightSet)> + '_ {
        let start = self.range.map_or(0, |range| range.overscan_start);
        self.cells
            .iter()
            .enumerate()
            .map(move |(offset, set)| (start + offset, *set))
    }
}

impl CellSurface for HeadlessSurface {
    fn apply(&mut self, patch: CellPatch) {
        let Some(range) = self.range else {
            return;
        };
        if !range.contains(patch.index) {
            return;
        }
        if let Some(cell) = self.cells.get_mut(patch.index - range.overscan_start) {
            cell.set(patch.class, patch.on);
        }
    }

    fn remount(&mut self, range: Option<MountedRange>, cells: &[HighlightSet]) {
        self.range = range;
        self.cells = cells.to_vec();
    }
}

/// One rendered cell, both projections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView<'a> {
    /// Byte index.
    pub index: usize,
    /// Hex token.
    pub hex: &'a str,
    /// Text glyph.
    pub text: &'a str,
    /// Highlight classes.
    pub highlights: HighlightSet,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView<'a> {
    /// Row index.
    pub row: usize,
    /// Offset column text.
    pub address: String,
    /// Cells of the row.
    pub cells: Vec<CellView<'a>>,
}

/// Render cell `index`.
pub fn cell_view(state: &HexViewState, index: usize) -> Option<CellView<'_>> {
    Some(CellView {
        index,
        hex: state.buffer.hex_of(index)?,
        text: state.buffer.char_of(index, &state.glyphs)?,
        highlights: highlights_at(state, index),
    })
}

/// Render row `row`.
pub fn row_view(state: &HexViewState, row: usize) -> Option<RowView<'_>> {
    let columns = state.layout.view.columns.max(1);
    let start = row.checked_mul(columns)?;
    if start >= state.buffer.len() {
        return None;
    }
    let end = (start + columns).min(state.buffer.len());
    Some(RowView {
        row,
        address: state.buffer.address_of(
            start,
            state.settings.offset_base,
            state.layout.offset_width,
        ),
        cells: (start..end).filter_map(|i| cell_view(state, i)).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_set() {
        let mut set = HighlightSet::EMPTY.with(HighlightClass::Cursor);
        set.set(HighlightClass::ActiveSearch, true);
        assert!(set.contains(HighlightClass::Cursor));
        assert!(!set.contains(HighlightClass::Select));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![HighlightClass::Cursor, HighlightClass::ActiveSearch]
        );
        set.set(HighlightClass::Cursor, false);
        set.set(HighlightClass::ActiveSearch, false);
        assert!(set.is_empty());
    }

    #[test]
    fn test_subtract() {
        assert_eq!(subtract(&(2..=8), Some(&(4..=5))), [Some(2..=3), Some(6..=8)]);
        assert_eq!(subtract(&(2..=8), Some(&(0..=9))), [None, None]);
        assert_eq!(subtract(&(2..=8), Some(&(5..=12))), [Some(2..=4), None]);
        assert_eq!(subtract(&(2..=8), None), [Some(2..=8), None]);
        assert_eq!(subtract(&(0..=3), Some(&(0..=1))), [None, Some(2..=3)]);
    }

    #[test]
    fn test_ranges_grow_and_shrink() {
        let window = 0..=99;
        let mut out = Vec::new();
        ranges(&mut out, Some(2..=4), Some(2..=6), &window, HighlightClass::Select);
        let on: Vec<_> = out.iter().map(|p| (p.index, p.on)).collect();
        assert_eq!(on, vec![(5, true), (6, true)]);

        out.clear();
        ranges(&mut out, Some(2..=6), Some(4..=6), &window, HighlightClass::Select);
        let off: Vec<_> = out.iter().map(|p| (p.index, p.on)).collect();
        assert_eq!(off, vec![(2, false), (3, false)]);
    }

    #[test]
    fn test_ranges_outside_window_are_not_patched() {
        let mut out = Vec::new();
        ranges(&mut out, None, Some(0..=200), &(50..=59), HighlightClass::Select);
        assert_eq!(out.len(), 10);
        assert!(out.iter().all(|p| (50..=59).contains(&p.index) && p.on));
    }

    #[test]
    fn test_surface_ignores_unmounted_cells() {
        let mut surface = HeadlessSurface::new();
        surface.apply(CellPatch {
            index: 0,
            class: HighlightClass::Cursor,
            on: true,
        });
        assert_eq!(surface.highlights(0), None);

        let range = MountedRange::new(10, 19, 10, 19);
        CellSurface::remount(&mut surface, Some(range), &[HighlightSet::EMPTY; 10]);
        surface.apply(CellPatch {
            index: 12,
            class: HighlightClass::Cursor,
            on: true,
        });
        surface.apply(CellPatch {
            index: 25,
            class: HighlightClass::Cursor,
            on: true,
        });
        assert_eq!(
            surface.highlights(12),
            Some(HighlightSet::EMPTY.with(HighlightClass::Cursor))
        );
        assert_eq!(surface.highlights(25), None);
        assert_eq!(surface.cells().count(), 10);
    }
}
