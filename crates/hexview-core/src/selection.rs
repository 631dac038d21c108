//! Range selection by pointer drag.
//!
//! The drag is tracked as an anchor plus a `highlighting` flag. While the button is held,
//! entering a cell sets the selection to the ordered pair of the anchor and that cell.
//! Releasing on the anchor itself means "click", which leaves no selection.

use std::ops::RangeInclusive;

/// An inclusive byte range, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionRange {
    /// First selected index.
    pub start: usize,
    /// Last selected index (inclusive).
    pub end: usize,
}

impl SelectionRange {
    /// Build from two endpoints in any order.
    pub fn ordered(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Whether `index` is selected.
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// Number of selected bytes.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// A selection is never empty; the empty selection is `None`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// As a std range.
    pub fn as_range(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    /// Clip into a buffer of `len` bytes.
    pub fn clamp(self, len: usize) -> Option<Self> {
        if len == 0 || self.start >= len {
            return None;
        }
        Some(Self {
            start: self.start,
            end: self.end.min(len - 1),
        })
    }
}

/// Selection plus in-progress drag state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SelectionState {
    /// Current selection.
    pub range: Option<SelectionRange>,
    /// Cell where the drag started.
    pub anchor: Option<usize>,
    /// Whether the pointer button is held.
    pub highlighting: bool,
}

impl SelectionState {
    /// A selection seeded directly (from a location string). Out-of-range input is dropped.
    pub fn seeded(start: usize, end: usize, len: usize) -> Self {
        Self {
            range: (start.max(end) < len).then(|| SelectionRange::ordered(start, end)),
            anchor: None,
            highlighting: false,
        }
    }

    /// Pointer down on `index`: set the anchor and drop the old selection.
    pub fn begin_drag(self, index: usize, len: usize) -> Self {
        if index >= len {
            return self;
        }
        Self {
            range: None,
            anchor: Some(index),
            highlighting: true,
        }
    }

    /// Pointer entered `index` with the button held.
    pub fn extend_drag(self, index: usize, len: usize) -> Self {
        match self.anchor {
            Some(anchor) if self.highlighting && index < len => Self {
                range: Some(SelectionRange::ordered(anchor, index)),
                ..self
            },
            _ => self,
        }
    }

    /// Pointer released over `index`.
    pub fn end_drag(self, index: usize, len: usize) -> Self {
        let Some(anchor) = self.anchor.filter(|_| self.highlighting) else {
            return self;
        };
        let range = if index >= len {
            self.range
        } else if index == anchor {
            None
        } else {
            Some(SelectionRange::ordered(anchor, index))
        };
        Self {
            range,
            anchor: None,
            highlighting: false,
        }
    }

    /// Clear selection and any drag in progress.
    pub fn clear(self) -> Self {
        Self::default()
    }

    /// Re-clamp after the buffer changed.
    pub fn clamp(self, len: usize) -> Self {
        Self {
            range: self.range.and_then(|range| range.clamp(len)),
            anchor: self.anchor.filter(|&anchor| anchor < len),
            highlighting: self.highlighting && len > 0,
        }
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.highlighting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_range() {
        assert_eq!(
            SelectionRange::ordered(30, 10),
            SelectionRange { start: 10, end: 30 }
        );
        let range = SelectionRange::ordered(3, 3);
        assert_eq!(range.len(), 1);
        assert!(range.contains(3));
        assert!(!range.contains(4));
    }

    #[test]
    fn test_drag_backwards() {
        let state = SelectionState::default()
            .begin_drag(10, 100)
            .extend_drag(11, 100)
            .extend_drag(5, 100);
        assert_eq!(state.range, Some(SelectionRange::ordered(5, 10)));
        let state = state.end_drag(5, 100);
        assert_eq!(state.range, Some(SelectionRange { start: 5, end: 10 }));
        assert!(!state.is_dragging());
    }

    #[test]
    fn test_click_leaves_no_selection() {
        let state = SelectionState::default()
            .begin_drag(10, 100)
            .extend_drag(12, 100)
            .extend_drag(10, 100)
            .end_drag(10, 100);
        assert_eq!(state.range, None);
    }

    #[test]
    fn test_mouse_down_clears_previous_selection() {
        let state = SelectionState::seeded(1, 4, 10);
        assert!(state.range.is_some());
        assert_eq!(state.begin_drag(7, 10).range, None);
    }

    #[test]
    fn test_extend_without_drag_is_noop() {
        let state = SelectionState::seeded(1, 4, 10);
        assert_eq!(state.extend_drag(8, 10), state);
        assert_eq!(state.end_drag(8, 10), state);
    }

    #[test]
    fn test_seeded_validation() {
        assert_eq!(
            SelectionState::seeded(8, 2, 10).range,
            Some(SelectionRange { start: 2, end: 8 })
        );
        assert_eq!(SelectionState::seeded(2, 10, 10).range, None);
        assert_eq!(SelectionState::seeded(0, 0, 0).range, None);
    }
}
