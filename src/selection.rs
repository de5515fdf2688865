//! Per-kind selection/hover state and the minimal set of drawings whose
//! handle visibility changed.

use crate::data_types::{CandleSeries, Drawing, DrawingId};
use rayon::prelude::*;
use std::collections::HashSet;

/// At most one selected and one hovered drawing; the two are independent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<DrawingId>,
    hovered: Option<DrawingId>,
}

impl SelectionState {
    pub fn selected(&self) -> Option<DrawingId> {
        self.selected
    }

    pub fn hovered(&self) -> Option<DrawingId> {
        self.hovered
    }

    pub fn set_selected(&mut self, id: Option<DrawingId>) {
        self.selected = id;
    }

    pub fn set_hovered(&mut self, id: Option<DrawingId>) {
        self.hovered = id;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            selected: self.selected,
            hovered: self.hovered,
        }
    }

    /// Forgets `id` if it was selected or hovered.
    pub fn forget(&mut self, id: DrawingId) {
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.hovered == Some(id) {
            self.hovered = None;
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub selected: Option<DrawingId>,
    pub hovered: Option<DrawingId>,
}

impl SelectionSnapshot {
    fn status(&self, id: DrawingId) -> (bool, bool) {
        (self.selected == Some(id), self.hovered == Some(id))
    }
}

pub struct SelectionTracker;

impl SelectionTracker {
    /// Drawings whose (selected, hovered) status differs between snapshots.
    ///
    /// Only the up to four ids named by either snapshot are candidates, and
    /// only ids still present in `drawings` are returned.
    pub fn diff(
        prev: &SelectionSnapshot,
        next: &SelectionSnapshot,
        drawings: &[Drawing],
    ) -> Vec<DrawingId> {
        let mut changed = Vec::with_capacity(4);
        let candidates = [prev.selected, prev.hovered, next.selected, next.hovered];
        for id in candidates.into_iter().flatten() {
            if changed.contains(&id) || prev.status(id) == next.status(id) {
                continue;
            }
            if drawings.iter().any(|d| d.id() == id) {
                changed.push(id);
            }
        }
        changed
    }

    /// Writes the snapshot's flags onto exactly the `changed` drawings.
    pub fn apply(snapshot: &SelectionSnapshot, changed: &[DrawingId], drawings: &mut [Drawing]) {
        for drawing in drawings.iter_mut().filter(|d| changed.contains(&d.id())) {
            let (selected, hovered) = snapshot.status(drawing.id());
            drawing.selected = selected;
            drawing.hovered = hovered;
            drawing.show_handles = selected || hovered;
            drawing.update_all_views();
        }
    }

    /// Recomputes `entry_tapped` for the positions in `ids`.
    ///
    /// A position is tapped once a candle opening at or after its entry time
    /// has a low/high range containing the entry price. Batches of at least
    /// `parallel_threshold` are evaluated on the rayon pool; flags are
    /// written back on the calling thread. Returns the ids whose flag flipped.
    pub fn update_entry_tapped(
        drawings: &mut [Drawing],
        ids: &HashSet<DrawingId>,
        candles: &CandleSeries,
        parallel_threshold: usize,
    ) -> Vec<DrawingId> {
        let entries: Vec<(usize, Option<i64>, f64)> = drawings
            .iter()
            .enumerate()
            .filter(|(_, d)| ids.contains(&d.id()))
            .filter_map(|(i, d)| d.entry().map(|e| (i, e.time, e.price)))
            .collect();

        let evaluate = |&(i, time, price): &(usize, Option<i64>, f64)| {
            (i, time.is_some_and(|t| entry_tapped(candles, t, price)))
        };
        let results: Vec<(usize, bool)> = if entries.len() >= parallel_threshold {
            entries.par_iter().map(evaluate).collect()
        } else {
            entries.iter().map(evaluate).collect()
        };

        let mut flipped = Vec::new();
        for (i, tapped) in results {
            let drawing = &mut drawings[i];
            if drawing.entry_tapped != tapped {
                drawing.entry_tapped = tapped;
                drawing.update_all_views();
                flipped.push(drawing.id());
            }
        }
        flipped
    }
}

fn entry_tapped(candles: &CandleSeries, entry_time: i64, entry_price: f64) -> bool {
    let start = candles.first_index_at_or_after(entry_time);
    candles.as_slice()[start..]
        .iter()
        .any(|c| c.brackets(entry_price))
}
