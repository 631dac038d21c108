//! Grid geometry: columns, rows, the mounted window and scroll requests.

use std::ops::RangeInclusive;

/// Row height of the paged body, in pixels.
pub const ROW_HEIGHT: u32 = 20;

/// Offset column width (digits) outside the narrowest bucket.
pub const OFFSET_WIDTH: usize = 8;

/// Upper bound for a fixed column count.
pub const MAX_COLUMNS: usize = 256;

/// `(min width, columns)` pairs, widest first.
pub const COLUMN_BUCKETS: [(u32, usize); 6] = [
    (1900, 64),
    (1500, 48),
    (1200, 32),
    (900, 24),
    (640, 16),
    (420, 8),
];

/// Columns for the narrowest widths.
pub const MIN_BUCKET_COLUMNS: usize = 4;

/// Default column count for a viewport `width`.
pub fn columns_for_width(width: u32) -> usize {
    COLUMN_BUCKETS
        .iter()
        .find(|(min, _)| width >= *min)
        .map_or(MIN_BUCKET_COLUMNS, |(_, columns)| *columns)
}

/// Rows that fit in `height` pixels (at least one).
pub fn rows_for_height(height: u32) -> usize {
    (height / ROW_HEIGHT).max(1) as usize
}

/// Which element owns keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Focus {
    /// Focus is outside the viewer.
    #[default]
    None,
    /// The cell grid.
    Body,
    /// The search bar.
    Toolbar,
}

/// How to align a row when scrolling it into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollAlign {
    /// Row at the top.
    Top,
    /// Row centered.
    Middle,
    /// Row at the bottom.
    Bottom,
    /// Scroll the minimum needed to show the row.
    Include,
    /// Center the row, only if it is not visible.
    IncludeMiddle,
    /// Let the virtualizer pick.
    Smart,
}

/// A request for the virtualizer to scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScrollRequest {
    /// Target row.
    pub row: usize,
    /// Alignment.
    pub align: ScrollAlign,
}

/// Cells currently mounted by the virtualizer. All stops are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountedRange {
    /// First fully visible cell.
    pub visible_start: usize,
    /// Last visible cell.
    pub visible_stop: usize,
    /// First mounted cell.
    pub overscan_start: usize,
    /// Last mounted cell.
    pub overscan_stop: usize,
}

impl MountedRange {
    /// Build from cell indexes, ordering each pair and widening overscan to cover the
    /// visible range.
    pub fn new(
        visible_start: usize,
        visible_stop: usize,
        overscan_start: usize,
        overscan_stop: usize,
    ) -> Self {
        let (visible_start, visible_stop) = order(visible_start, visible_stop);
        let (overscan_start, overscan_stop) = order(overscan_start, overscan_stop);
        Self {
            visible_start,
            visible_stop,
            overscan_start: overscan_start.min(visible_start),
            overscan_stop: overscan_stop.max(visible_stop),
        }
    }

    /// Build from row indexes reported by a row virtualizer. Each stop row is mounted whole.
    pub fn from_rows(
        visible: RangeInclusive<usize>,
        overscan: RangeInclusive<usize>,
        columns: usize,
        len: usize,
    ) -> Option<Self> {
        let last = len.checked_sub(1)?;
        let columns = columns.max(1);
        let cell = |row: usize, end: bool| {
            let first = row.saturating_mul(columns);
            if end {
                first.saturating_add(columns - 1).min(last)
            } else {
                first.min(last)
            }
        };
        Some(Self::new(
            cell(*visible.start(), false),
            cell(*visible.end(), true),
            cell(*overscan.start(), false),
            cell(*overscan.end(), true),
        ))
    }

    /// Whether `index` has a mounted cell.
    pub fn contains(&self, index: usize) -> bool {
        self.overscan_start <= index && index <= self.overscan_stop
    }

    /// Whether `index` is in the visible part.
    pub fn is_visible(&self, index: usize) -> bool {
        self.visible_start <= index && index <= self.visible_stop
    }

    /// Mounted cells.
    pub fn overscan(&self) -> RangeInclusive<usize> {
        self.overscan_start..=self.overscan_stop
    }

    /// Number of mounted cells.
    pub fn mounted_len(&self) -> usize {
        self.overscan_stop - self.overscan_start + 1
    }

    /// Number of rows in the visible part at `columns` bytes per row.
    pub fn visible_rows(&self, columns: usize) -> usize {
        let columns = columns.max(1);
        self.visible_stop / columns - self.visible_start / columns + 1
    }
}

fn order(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

/// Scroll position of the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScrollState {
    /// First row shown.
    pub top_row: usize,
}

/// Grid shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewLayout {
    /// Bytes per row.
    pub columns: usize,
    /// Whether `columns` follows the viewport width.
    pub auto_columns: bool,
    /// Rows per page in the paged body.
    pub rows: usize,
}

impl Default for ViewLayout {
    fn default() -> Self {
        Self {
            columns: 16,
            auto_columns: true,
            rows: 1,
        }
    }
}

/// Everything geometry-related the reducers track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutState {
    /// Grid shape.
    pub view: ViewLayout,
    /// Digits in the offset column.
    pub offset_width: usize,
    /// Keyboard focus.
    pub focus: Focus,
    /// Cells mounted right now.
    pub mounted: Option<MountedRange>,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            view: ViewLayout::default(),
            offset_width: OFFSET_WIDTH,
            focus: Focus::None,
            mounted: None,
        }
    }
}

impl LayoutState {
    /// Rows a page move spans: the visible rows of the mounted range, else the page size.
    pub fn visible_rows(&self) -> usize {
        self.mounted
            .map(|range| range.visible_rows(self.view.columns))
            .unwrap_or(self.view.rows)
            .max(1)
    }

    /// Row holding `index`.
    pub fn row_of(&self, index: usize) -> usize {
        index / self.view.columns.max(1)
    }

    /// Scroll request bringing `index` into view, or `None` when no scroll is needed.
    pub fn scroll_to(&self, index: usize, align: ScrollAlign) -> Option<ScrollRequest> {
        let visible = self.mounted.is_some_and(|range| range.is_visible(index));
        let needed = match align {
            ScrollAlign::Include | ScrollAlign::IncludeMiddle | ScrollAlign::Smart => !visible,
            ScrollAlign::Top | ScrollAlign::Middle | ScrollAlign::Bottom => true,
        };
        needed.then(|| ScrollRequest {
            row: self.row_of(index),
            align,
        })
    }
}

/// Top row of a paged body after scrolling `row` into view with `align`.
pub fn paged_top_row(
    current_top: usize,
    row: usize,
    rows: usize,
    total_rows: usize,
    align: ScrollAlign,
) -> usize {
    let rows = rows.max(1);
    let max_top = total_rows.saturating_sub(rows);
    let top = match align {
        ScrollAlign::Top => row,
        ScrollAlign::Middle => row.saturating_sub(rows / 2),
        ScrollAlign::Bottom => row.saturating_sub(rows - 1),
        ScrollAlign::Include | ScrollAlign::Smart => {
            if row < current_top {
                row
            } else if row >= current_top + rows {
                row + 1 - rows
            } else {
                current_top
            }
        }
        ScrollAlign::IncludeMiddle => {
            if row < current_top || row >= current_top + rows {
                row.saturating_sub(rows / 2)
            } else {
                current_top
            }
        }
    };
    top.min(max_top)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_buckets() {
        assert_eq!(columns_for_width(2000), 64);
        assert_eq!(columns_for_width(1900), 64);
        assert_eq!(columns_for_width(1899), 48);
        assert_eq!(columns_for_width(1000), 24);
        assert_eq!(columns_for_width(640), 16);
        assert_eq!(columns_for_width(500), 8);
        assert_eq!(columns_for_width(300), 4);
    }

    #[test]
    fn test_rows_for_height() {
        assert_eq!(rows_for_height(400), 20);
        assert_eq!(rows_for_height(5), 1);
    }

    #[test]
    fn test_mounted_from_rows() {
        let range = MountedRange::from_rows(2..=4, 0..=6, 16, 100).unwrap();
        assert_eq!(range.visible_start, 32);
        assert_eq!(range.visible_stop, 79);
        assert_eq!(range.overscan_start, 0);
        // Row 6 is cut short by the end of the buffer.
        assert_eq!(range.overscan_stop, 99);
        assert_eq!(range.visible_rows(16), 3);
        assert!(MountedRange::from_rows(0..=0, 0..=0, 16, 0).is_none());
    }

    #[test]
    fn test_mounted_new_normalizes() {
        let range = MountedRange::new(40, 10, 20, 30);
        assert_eq!(range.visible_start, 10);
        assert_eq!(range.visible_stop, 40);
        assert_eq!(range.overscan(), 10..=40);
        assert_eq!(range.mounted_len(), 31);
    }

    #[test]
    fn test_scroll_to_include_skips_visible_rows() {
        let layout = LayoutState {
            mounted: Some(MountedRange::new(0, 63, 0, 95)),
            ..LayoutState::default()
        };
        assert_eq!(layout.scroll_to(10, ScrollAlign::Include), None);
        assert_eq!(
            layout.scroll_to(80, ScrollAlign::Include),
            Some(ScrollRequest {
                row: 5,
                align: ScrollAlign::Include
            })
        );
        assert!(layout.scroll_to(10, ScrollAlign::Top).is_some());
    }

    #[test]
    fn test_paged_top_row() {
        assert_eq!(paged_top_row(0, 3, 10, 100, ScrollAlign::Include), 0);
        assert_eq!(paged_top_row(0, 12, 10, 100, ScrollAlign::Include), 3);
        assert_eq!(paged_top_row(20, 12, 10, 100, ScrollAlign::Include), 12);
        assert_eq!(paged_top_row(0, 50, 10, 100, ScrollAlign::IncludeMiddle), 45);
        assert_eq!(paged_top_row(0, 99, 10, 100, ScrollAlign::Top), 90);
        assert_eq!(paged_top_row(0, 5, 10, 100, ScrollAlign::Bottom), 0);
    }
}
