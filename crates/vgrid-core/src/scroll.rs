//! Horizontal scroll synchronization between the body viewport, the sticky
//! header strip and the synthetic scrollbar.
//!
//! Writing a host element's scroll offset makes the host fire a scroll event
//! for that element, so a naive "copy the offset everywhere" handler ping-pongs
//! forever. The coordinator remembers which region started the current pass
//! and drops events from the other regions until the rendering layer calls
//! [`ScrollCoordinator::apply_pending_corrections`] on its next frame:
//!
//! ```text
//! Idle --body event--> Syncing(Body) --next frame--> Idle
//! Idle --bar event---> Syncing(Bar)  --next frame--> Idle
//! ```
//!
//! There is no edge between two `Syncing` states. The coordinator never
//! touches the host: every write is returned as a [`ScrollCommand`].

use serde::{Deserialize, Serialize};

use crate::axis::AxisModel;
use crate::config::GridConfig;

/// A horizontally scrollable region kept in lock-step with the others
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScrollRegion {
    /// The cell viewport (natively virtualized on the column axis)
    Body,
    /// The sticky column-header strip
    Header,
    /// The synthetic horizontal scrollbar pinned under the viewport
    Bar,
}

impl ScrollRegion {
    pub const ALL: [ScrollRegion; 3] = [
        ScrollRegion::Body,
        ScrollRegion::Header,
        ScrollRegion::Bar,
    ];
}

/// Echo-suppression state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncPhase {
    Idle,
    /// A pass started by this region is waiting for its writes to settle
    Syncing(ScrollRegion),
}

impl Default for SyncPhase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Host element measurements supplied by the rendering layer on resize
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostMetrics {
    /// `scrollWidth` of the body viewport
    pub body_scroll_width: f64,
    /// `clientWidth` of the body viewport
    pub body_client_width: f64,
    /// `offsetWidth` of the vertically scrolling host
    pub vertical_offset_width: f64,
    /// `clientWidth` of the vertically scrolling host
    pub vertical_client_width: f64,
}

impl HostMetrics {
    /// Largest horizontal offset the body can actually reach
    pub fn body_max_scroll(&self) -> f64 {
        (self.body_scroll_width - self.body_client_width).max(0.0)
    }

    /// Rendered width of the native vertical scrollbar
    pub fn scrollbar_gap(&self) -> f64 {
        (self.vertical_offset_width - self.vertical_client_width).max(0.0)
    }

    /// Largest offset of the synthetic bar. Its track is as wide as the body's
    /// content but its client area is narrower by the scrollbar gap.
    pub fn bar_max_scroll(&self) -> f64 {
        let bar_client_width = (self.body_client_width - self.scrollbar_gap()).max(0.0);
        (self.body_scroll_width - bar_client_width).max(0.0)
    }
}

/// A write the rendering layer must apply to the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScrollCommand {
    /// Set a region's horizontal scroll offset
    SetScrollLeft { region: ScrollRegion, offset: f64 },
    /// Make the body's virtualizer scroll a column index into view
    ScrollBodyToIndex { index: usize },
    /// Ask the body's virtualizer to re-measure its viewport and content size
    RevalidateBodySize,
    /// Resize the spacer inside the synthetic bar
    SetBarTrackWidth { width: f64 },
    /// New right margin for the synthetic bar
    SetScrollbarGap { gap: f64 },
}

/// A deferred fix-up applied on the next rendering pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Correction {
    /// The bar reached the end of its track; native virtualizers can report a
    /// scroll width that drifts from the real content width out there
    JumpToLastColumn,
    /// Size the bar's track from the body's measured scroll width
    SyncBarTrack,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct RegionOffsets {
    body: f64,
    header: f64,
    bar: f64,
}

impl RegionOffsets {
    fn get(&self, region: ScrollRegion) -> f64 {
        match region {
            ScrollRegion::Body => self.body,
            ScrollRegion::Header => self.header,
            ScrollRegion::Bar => self.bar,
        }
    }

    fn set(&mut self, region: ScrollRegion, offset: f64) {
        match region {
            ScrollRegion::Body => self.body = offset,
            ScrollRegion::Header => self.header = offset,
            ScrollRegion::Bar => self.bar = offset,
        }
    }
}

/// Keeps the body, header and synthetic bar at the same horizontal offset
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollCoordinator {
    phase: SyncPhase,
    /// Last offset known for each region (reported or written)
    offsets: RegionOffsets,
    metrics: Option<HostMetrics>,
    /// `None` until the first resize; a measured 0 stays 0
    scrollbar_gap: Option<f64>,
    pending: Vec<Correction>,
    end_of_range_tolerance: f64,
    sync_threshold: f64,
}

impl Default for ScrollCoordinator {
    fn default() -> Self {
        Self::from_config(&GridConfig::default())
    }
}

impl ScrollCoordinator {
    pub fn new(end_of_range_tolerance: f64, sync_threshold: f64) -> Self {
        Self {
            phase: SyncPhase::Idle,
            offsets: RegionOffsets::default(),
            metrics: None,
            scrollbar_gap: None,
            pending: Vec::new(),
            end_of_range_tolerance,
            sync_threshold,
        }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.end_of_range_tolerance, config.sync_threshold)
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == SyncPhase::Idle
    }

    /// Last known horizontal offset of a region
    pub fn offset(&self, region: ScrollRegion) -> f64 {
        self.offsets.get(region)
    }

    pub fn metrics(&self) -> Option<HostMetrics> {
        self.metrics
    }

    pub fn scrollbar_gap(&self) -> Option<f64> {
        self.scrollbar_gap
    }

    pub fn pending_corrections(&self) -> &[Correction] {
        &self.pending
    }

    /// The body scrolled. Its vertical offset always goes to the row axis;
    /// the horizontal offset is propagated to the header and the bar.
    pub fn on_body_scroll(
        &mut self,
        left: f64,
        top: f64,
        columns: &mut AxisModel,
        rows: &mut AxisModel,
    ) -> Vec<ScrollCommand> {
        if top.is_finite() {
            rows.set_scroll_offset(top);
        }
        self.propagate(ScrollRegion::Body, left, columns)
    }

    /// The header strip scrolled (trackpad or wheel over the headers)
    pub fn on_header_scroll(&mut self, left: f64, columns: &mut AxisModel) -> Vec<ScrollCommand> {
        self.propagate(ScrollRegion::Header, left, columns)
    }

    /// The synthetic bar scrolled. Its offset is clamped to what the body can
    /// reach before being written to the body and header.
    pub fn on_bar_scroll(&mut self, left: f64, columns: &mut AxisModel) -> Vec<ScrollCommand> {
        self.propagate(ScrollRegion::Bar, left, columns)
    }

    /// Record new host measurements and re-derive the scrollbar gap.
    ///
    /// Unchanged measurements produce no commands.
    pub fn on_resize(
        &mut self,
        metrics: HostMetrics,
        columns: &mut AxisModel,
    ) -> Vec<ScrollCommand> {
        let track_changed = self.metrics.map_or(true, |previous| {
            (previous.body_scroll_width - metrics.body_scroll_width).abs() > self.sync_threshold
        });
        self.metrics = Some(metrics);

        let mut commands = Vec::new();

        let gap = metrics.scrollbar_gap();
        if self.scrollbar_gap != Some(gap) {
            tracing::debug!(gap, previous = ?self.scrollbar_gap, "scrollbar gap measured");
            self.scrollbar_gap = Some(gap);
            columns.set_trailing_gap(gap);
            commands.push(ScrollCommand::SetScrollbarGap { gap });
        }

        if track_changed {
            self.request_correction(Correction::SyncBarTrack);
        }

        commands
    }

    /// Queue a correction for the next rendering pass
    pub fn request_correction(&mut self, correction: Correction) {
        if !self.pending.contains(&correction) {
            self.pending.push(correction);
        }
    }

    /// Run once per rendering pass: releases the in-flight sync and turns the
    /// queued corrections into commands.
    pub fn apply_pending_corrections(&mut self, columns: &AxisModel) -> Vec<ScrollCommand> {
        if let SyncPhase::Syncing(origin) = self.phase {
            tracing::trace!(?origin, "sync pass settled");
        }
        self.phase = SyncPhase::Idle;

        let mut commands = Vec::new();
        for correction in std::mem::take(&mut self.pending) {
            match correction {
                Correction::JumpToLastColumn => {
                    let Some(index) = columns.last_index() else {
                        continue;
                    };
                    tracing::debug!(index, "bar at end of track, jumping body to last column");
                    commands.push(ScrollCommand::ScrollBodyToIndex { index });
                    commands.push(ScrollCommand::RevalidateBodySize);
                }
                Correction::SyncBarTrack => {
                    let Some(metrics) = self.metrics else {
                        continue;
                    };
                    tracing::debug!(width = metrics.body_scroll_width, "resizing bar track");
                    commands.push(ScrollCommand::SetBarTrackWidth {
                        width: metrics.body_scroll_width,
                    });
                }
            }
        }
        commands
    }

    fn propagate(
        &mut self,
        origin: ScrollRegion,
        left: f64,
        columns: &mut AxisModel,
    ) -> Vec<ScrollCommand> {
        if !left.is_finite() {
            return Vec::new();
        }

        if let SyncPhase::Syncing(active) = self.phase {
            if active != origin {
                tracing::trace!(?origin, ?active, left, "echo suppressed");
                self.offsets.set(origin, left);
                return Vec::new();
            }
        }

        self.phase = SyncPhase::Syncing(origin);
        self.offsets.set(origin, left);
        // A newer user event supersedes a queued end-of-range jump
        self.pending.retain(|c| *c != Correction::JumpToLastColumn);

        let target = match origin {
            ScrollRegion::Bar => self.clamp_bar_offset(left, columns),
            ScrollRegion::Body | ScrollRegion::Header => left,
        };
        columns.set_scroll_offset(target);

        if origin == ScrollRegion::Bar && self.is_near_end(left) {
            self.request_correction(Correction::JumpToLastColumn);
        }

        let mut commands = Vec::new();
        for region in ScrollRegion::ALL {
            if region == origin
                || (self.offsets.get(region) - target).abs() <= self.sync_threshold
            {
                continue;
            }
            self.offsets.set(region, target);
            commands.push(ScrollCommand::SetScrollLeft {
                region,
                offset: target,
            });
        }

        tracing::trace!(?origin, target, writes = commands.len(), "sync pass");
        commands
    }

    fn clamp_bar_offset(&self, left: f64, columns: &AxisModel) -> f64 {
        let max = match self.metrics {
            Some(metrics) => metrics.body_max_scroll(),
            None => columns.content_extent(),
        };
        if max.is_nan() {
            return 0.0;
        }
        left.clamp(0.0, max.max(0.0))
    }

    fn is_near_end(&self, left: f64) -> bool {
        match self.metrics {
            Some(metrics) => {
                let max = metrics.bar_max_scroll();
                max > 0.0 && left >= max - self.end_of_range_tolerance
            }
            None => false,
        }
    }
}
