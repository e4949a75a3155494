//! Mapping a continuous scroll offset to the discrete items that must be rendered.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Half-open range `[from, to)` of item indices to materialize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct VisibleRange {
    pub from: usize,
    pub to: usize,
}

impl VisibleRange {
    pub const EMPTY: VisibleRange = VisibleRange { from: 0, to: 0 };

    pub fn new(from: usize, to: usize) -> Self {
        debug_assert!(from <= to, "inverted range [{from}, {to})");
        Self { from, to: to.max(from) }
    }

    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.from && index < self.to
    }

    pub fn iter(&self) -> Range<usize> {
        self.from..self.to
    }
}

impl IntoIterator for VisibleRange {
    type Item = usize;
    type IntoIter = Range<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Compute the items intersecting the viewport, padded by `buffer_count` on each side.
///
/// `from = max(0, floor(offset / size) - buffer)` and
/// `to = min(count, ceil((offset + viewport) / size) + buffer)`, with both ends
/// held inside `[0, item_count]`. Degenerate sizes or non-finite offsets give
/// the empty range. Constant time; safe to call on every scroll event.
pub fn visible_range(
    scroll_offset: f64,
    viewport_size: f64,
    item_size: f64,
    buffer_count: usize,
    item_count: usize,
) -> VisibleRange {
    if item_count == 0
        || !item_size.is_finite()
        || item_size <= 0.0
        || !scroll_offset.is_finite()
        || !viewport_size.is_finite()
    {
        return VisibleRange::EMPTY;
    }

    let buffer = buffer_count as f64;
    let count = item_count as f64;
    let first = (scroll_offset / item_size).floor() - buffer;
    let last = ((scroll_offset + viewport_size) / item_size).ceil() + buffer;

    let from = first.clamp(0.0, count) as usize;
    let to = last.clamp(0.0, count) as usize;

    VisibleRange {
        from,
        to: to.max(from),
    }
}
