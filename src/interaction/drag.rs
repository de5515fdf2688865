use super::strategy::strategy_for;
use super::Gesture;
use crate::data_types::{CandleSeries, ChartPoint, DrawingId, DrawingKind, Geometry};
use tracing::debug;

/// Body drag of one drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct DragGesture {
    pub id: DrawingId,
    pub kind: DrawingKind,
    /// Pointer position at pointer-down.
    pub start: ChartPoint,
    /// Geometry at pointer-down; every move translates from it.
    pub origin: Geometry,
}

pub struct DragController;

impl DragController {
    /// Starts a drag unless a resize already owns the pointer or the kind
    /// cannot be dragged.
    pub fn begin(
        gesture: &Gesture,
        id: DrawingId,
        kind: DrawingKind,
        start: ChartPoint,
        origin: Geometry,
    ) -> Option<Gesture> {
        if gesture.is_resizing() || !strategy_for(kind).draggable() {
            return None;
        }
        debug!(%id, %kind, "drag started");
        Some(Gesture::Dragging(DragGesture {
            id,
            kind,
            start,
            origin,
        }))
    }

    /// Geometry for the current pointer sample.
    pub fn update(drag: &DragGesture, current: &ChartPoint, candles: &CandleSeries) -> Geometry {
        let delta = drag.start.delta_to(current);
        strategy_for(drag.kind).apply_drag(&drag.origin, &delta, candles)
    }
}
