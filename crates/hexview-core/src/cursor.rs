//! Keyboard cursor.
//!
//! All moves clamp into `[0, len - 1]` and saturate at both ends. A move without a focused
//! index starts from index 0. Over an empty buffer every move is a no-op.

/// The focused byte, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CursorState {
    /// Focused index, always `< len` when set.
    pub index: Option<usize>,
}

/// A keyboard navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorMove {
    /// One byte back.
    Left,
    /// One byte forward.
    Right,
    /// One row back.
    Up,
    /// One row forward.
    Down,
    /// First byte.
    Home,
    /// Last byte.
    End,
    /// One page of visible rows back.
    PageUp,
    /// One page of visible rows forward.
    PageDown,
}

/// Geometry a cursor move needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    /// Buffer length.
    pub len: usize,
    /// Bytes per row.
    pub columns: usize,
    /// Rows currently visible.
    pub visible_rows: usize,
}

impl CursorState {
    /// A cursor at `index`, clamped to `len`.
    pub fn at(index: usize, len: usize) -> Self {
        Self::default().move_to(Some(index), len)
    }

    /// Jump to `index`, or clear with `None`.
    pub fn move_to(self, index: Option<usize>, len: usize) -> Self {
        if len == 0 {
            return self;
        }
        Self {
            index: index.map(|i| i.min(len - 1)),
        }
    }

    /// Move by `delta` bytes, saturating at both ends.
    pub fn move_by(self, delta: isize, len: usize) -> Self {
        if len == 0 {
            return self;
        }
        let origin = self.index.unwrap_or(0);
        let target = origin.saturating_add_signed(delta).min(len - 1);
        Self {
            index: Some(target),
        }
    }

    /// Jump to the first byte.
    pub fn move_home(self, len: usize) -> Self {
        self.move_to(Some(0), len)
    }

    /// Jump to the last byte.
    pub fn move_end(self, len: usize) -> Self {
        self.move_to(Some(len.saturating_sub(1)), len)
    }

    /// Move by `pages` pages of `rows` rows each.
    pub fn move_page(self, pages: isize, rows: usize, columns: usize, len: usize) -> Self {
        let step = rows.max(1).saturating_mul(columns.max(1));
        let delta = isize::try_from(step).unwrap_or(isize::MAX).saturating_mul(pages);
        self.move_by(delta, len)
    }

    /// Apply a navigation step.
    pub fn apply(self, step: CursorMove, nav: Navigation) -> Self {
        let columns = isize::try_from(nav.columns.max(1)).unwrap_or(isize::MAX);
        match step {
            CursorMove::Left => self.move_by(-1, nav.len),
            CursorMove::Right => self.move_by(1, nav.len),
            CursorMove::Up => self.move_by(-columns, nav.len),
            CursorMove::Down => self.move_by(columns, nav.len),
            CursorMove::Home => self.move_home(nav.len),
            CursorMove::End => self.move_end(nav.len),
            CursorMove::PageUp => self.move_page(-1, nav.visible_rows, nav.columns, nav.len),
            CursorMove::PageDown => self.move_page(1, nav.visible_rows, nav.columns, nav.len),
        }
    }

    /// Re-clamp after the buffer changed length.
    pub fn clamp(self, len: usize) -> Self {
        match self.index {
            Some(index) if len > 0 => Self {
                index: Some(index.min(len - 1)),
            },
            _ => Self::default(),
        }
    }
}
