use serde::{Deserialize, Serialize};
use std::fmt;

use crate::window::{visible_range, VisibleRange};

/// Which dimension an [`AxisModel`] describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisKind {
    Rows,
    Columns,
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisKind::Rows => write!(f, "row"),
            AxisKind::Columns => write!(f, "column"),
        }
    }
}

/// Scroll and sizing state of one axis of the grid.
///
/// The model stores whatever offset it is given; range discipline belongs to
/// the scroll coordinator, which is the only part that knows the host's real
/// scrollable extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisModel {
    kind: AxisKind,
    item_count: usize,
    item_size: f64,
    scroll_offset: f64,
    buffer_count: usize,
    /// Extra pixels after the last item (room for the synthetic scrollbar)
    trailing_gap: f64,
}

impl AxisModel {
    pub fn new(kind: AxisKind, item_count: usize, item_size: f64, buffer_count: usize) -> Self {
        Self {
            kind,
            item_count,
            item_size,
            scroll_offset: 0.0,
            buffer_count,
            trailing_gap: 0.0,
        }
    }

    pub fn with_trailing_gap(mut self, gap: f64) -> Self {
        self.trailing_gap = gap;
        self
    }

    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn item_size(&self) -> f64 {
        self.item_size
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn buffer_count(&self) -> usize {
        self.buffer_count
    }

    pub fn trailing_gap(&self) -> f64 {
        self.trailing_gap
    }

    /// Store a raw scroll offset. No clamping.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }

    pub fn set_trailing_gap(&mut self, gap: f64) {
        self.trailing_gap = gap;
    }

    /// Items to render for a viewport of `viewport_size` pixels at the current offset
    pub fn visible_range(&self, viewport_size: f64) -> VisibleRange {
        visible_range(
            self.scroll_offset,
            viewport_size,
            self.item_size,
            self.buffer_count,
            self.item_count,
        )
    }

    /// Total size of the items alone
    pub fn items_extent(&self) -> f64 {
        self.item_count as f64 * self.item_size
    }

    /// Total scrollable size including the trailing gap
    pub fn content_extent(&self) -> f64 {
        self.items_extent() + self.trailing_gap
    }

    /// Largest meaningful offset for a viewport of the given size
    pub fn max_scroll(&self, viewport_size: f64) -> f64 {
        (self.content_extent() - viewport_size).max(0.0)
    }

    /// Clamp an offset into `[0, max_scroll]`; NaN becomes 0
    pub fn clamp_offset(&self, offset: f64, viewport_size: f64) -> f64 {
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(0.0, self.max_scroll(viewport_size))
    }

    /// Pixel position of an item's leading edge
    pub fn offset_of(&self, index: usize) -> f64 {
        index as f64 * self.item_size
    }

    /// Item under the given pixel position, clamped to the valid indices
    pub fn index_at(&self, offset: f64) -> Option<usize> {
        let last = self.last_index()?;
        if !offset.is_finite() || offset <= 0.0 || self.item_size <= 0.0 {
            return Some(0);
        }
        Some(((offset / self.item_size).floor() as usize).min(last))
    }

    pub fn last_index(&self) -> Option<usize> {
        self.item_count.checked_sub(1)
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.item_count
    }
}
