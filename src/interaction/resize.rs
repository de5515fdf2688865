use super::strategy::strategy_for;
use super::{Gesture, ResizeModifiers};
use crate::data_types::{CandleSeries, ChartPoint, DrawingId, DrawingKind, Geometry, HandleId};
use glam::Vec2;
use tracing::debug;

/// Handle drag of one drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeGesture {
    pub id: DrawingId,
    pub kind: DrawingKind,
    pub handle: HandleId,
    /// Pane-local pixel position at pointer-down.
    pub start_pixel: Vec2,
    pub origin: Geometry,
    /// Set once the pointer travelled past the activation distance.
    pub indicator_suppressed: bool,
}

pub struct ResizeController;

impl ResizeController {
    pub fn begin(
        id: DrawingId,
        kind: DrawingKind,
        handle: HandleId,
        start_pixel: Vec2,
        origin: Geometry,
    ) -> Gesture {
        debug!(%id, %kind, handle = handle.name(kind), "resize started");
        Gesture::Resizing(ResizeGesture {
            id,
            kind,
            handle,
            start_pixel,
            origin,
            indicator_suppressed: false,
        })
    }

    /// Hides the active-handle indicator once the pointer moved more than
    /// `activation_px` from the gesture start. Never shows it again.
    pub fn track_pointer(resize: &mut ResizeGesture, pixel: Vec2, activation_px: f32) {
        if !resize.indicator_suppressed && pixel.distance(resize.start_pixel) > activation_px {
            resize.indicator_suppressed = true;
        }
    }

    /// Geometry for the pointer sample under the given modifiers.
    pub fn update(
        resize: &ResizeGesture,
        current: &ChartPoint,
        modifiers: ResizeModifiers,
        candles: &CandleSeries,
    ) -> Option<Geometry> {
        strategy_for(resize.kind).apply_resize(
            &resize.origin,
            resize.handle,
            current,
            modifiers,
            candles,
        )
    }
}
