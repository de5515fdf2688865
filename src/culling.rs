//! Limits attached primitives to the visible time window plus a buffer.

use crate::data_types::{Drawing, DrawingId, TimeRange};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportCuller {
    /// Buffer on each side as a share of the visible width.
    pub buffer_ratio: f64,
}

impl Default for ViewportCuller {
    fn default() -> Self {
        Self { buffer_ratio: 0.2 }
    }
}

impl ViewportCuller {
    pub fn new(buffer_ratio: f64) -> Self {
        Self { buffer_ratio }
    }

    pub fn buffer(&self, visible: &TimeRange) -> f64 {
        self.buffer_ratio * visible.width() as f64
    }

    /// `extent` overlaps `[from - b, to + b]`.
    pub fn is_visible(&self, visible: &TimeRange, extent: &TimeRange) -> bool {
        let b = self.buffer(visible);
        extent.to as f64 >= visible.from as f64 - b && extent.from as f64 <= visible.to as f64 + b
    }

    /// Ids of the items inside the buffered window. Items without an extent
    /// are left out.
    pub fn cull<'a, T: 'a>(
        &self,
        visible: &TimeRange,
        items: impl IntoIterator<Item = &'a T>,
        extent: impl Fn(&T) -> Option<(DrawingId, TimeRange)>,
    ) -> Vec<DrawingId> {
        items
            .into_iter()
            .filter_map(|item| extent(item))
            .filter(|(_, range)| self.is_visible(visible, range))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn cull_drawings<'a>(
        &self,
        visible: &TimeRange,
        drawings: impl IntoIterator<Item = &'a Drawing>,
    ) -> Vec<DrawingId> {
        self.cull(visible, drawings, |d| d.time_extent().map(|r| (d.id(), r)))
    }
}

/// Trailing-edge debounce for culling recomputes.
#[derive(Clone, Debug)]
pub struct CullDebouncer {
    delay: Duration,
    pending_since: Option<Instant>,
}

impl CullDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending_since: None,
        }
    }

    /// Records a range change; restarts the quiet period.
    pub fn request(&mut self, now: Instant) {
        self.pending_since = Some(now);
    }

    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// True once, when the quiet period after the last request elapsed.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.pending_since {
            Some(since) if now.saturating_duration_since(since) >= self.delay => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }
}
