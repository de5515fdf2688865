use super::line::segment_anchors;
use super::strategy::{project_segment, resize_price, DrawingStrategy};
use super::{CreateMode, DrawingCursor, ResizeModifiers};
use crate::data_types::{CandleSeries, ChartPoint, DrawingKind, Geometry, HandleId};
use crate::hit_test::rect_contains;
use crate::resolver::Projector;
use glam::Vec2;

/// Retracement between `p1` (swing start) and `p2` (swing end).
pub(super) struct FibStrategy;

impl DrawingStrategy for FibStrategy {
    fn kind(&self) -> DrawingKind {
        DrawingKind::FibRetracement
    }

    fn handles(&self) -> &'static [HandleId] {
        &[HandleId::Start, HandleId::End]
    }

    fn creation_mode(&self) -> CreateMode {
        CreateMode::TwoClick
    }

    fn handle_anchors(&self, geometry: &Geometry, projector: &Projector) -> Vec<(HandleId, Vec2)> {
        segment_anchors(geometry, projector)
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
        origin: &Geometry,
        handle: HandleId,
        point: &ChartPoint,
        modifiers: ResizeModifiers,
        candles: &CandleSeries,
    ) -> Option<Geometry> {
        let Geometry::Segment { p1, p2 } = *origin else {
            return None;
        };
        let moved = point.with_price(resize_price(point, modifiers, candles));
        match handle {
            HandleId::Start => Some(Geometry::segment(moved, p2)),
            HandleId::End => Some(Geometry::segment(p1, moved)),
            _ => None,
        }
    }

    fn handle_cursor(&self, _handle: HandleId) -> DrawingCursor {
        DrawingCursor::Crosshair
    }
}
