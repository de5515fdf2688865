use super::strategy::{project_segment, DrawingStrategy};
use super::{CreateMode, ResizeModifiers};
use crate::data_types::{CandleSeries, ChartPoint, DrawingKind, Geometry, HandleId};
use crate::hit_test::rect_contains;
use crate::resolver::Projector;
use glam::Vec2;

/// Transient measurement; hit-testable but never dragged or resized.
pub(super) struct RulerStrategy;

impl DrawingStrategy for RulerStrategy {
    fn kind(&self) -> DrawingKind {
        DrawingKind::Ruler
    }

    fn handles(&self) -> &'static [HandleId] {
        &[]
    }

    fn draggable(&self) -> bool {
        false
    }

    fn creation_mode(&self) -> CreateMode {
        CreateMode::ClickDrag
    }

    fn handle_anchors(&self, _geometry: &Geometry, _projector: &Projector) -> Vec<(HandleId, Vec2)> {
        Vec::new()
    }

    fn body_contains(
        &self,
        geometry: &Geometry,
        projector: &Projector,
        query: Vec2,
        _tolerance: f32,
    ) -> bool {
        project_segment(geometry, projector).is_some_and(|(a, b)| rect_contains(a, b, query, 0.0))
    }

    fn apply_resize(
        &self,
        _origin: &Geometry,
        _handle: HandleId,
        _point: &ChartPoint,
        _modifiers: ResizeModifiers,
        _candles: &CandleSeries,
    ) -> Option<Geometry> {
        None
    }
}
