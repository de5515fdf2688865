use super::strategy::{project_segment, resize_price, DrawingStrategy};
use super::{CreateMode, DrawingCursor, ResizeModifiers};
use crate::data_types::{CandleSeries, ChartPoint, DrawingKind, Geometry, HandleId};
use crate::hit_test::distance_to_segment;
use crate::resolver::Projector;
use glam::Vec2;

pub(super) struct LineStrategy;

impl DrawingStrategy for LineStrategy {
    fn kind(&self) -> DrawingKind {
        DrawingKind::Line
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
        tolerance: f32,
    ) -> bool {
        project_segment(geometry, projector)
            .and_then(|(a, b)| distance_to_segment(a, b, query))
            .is_some_and(|d| d <= tolerance)
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
        let mut moved = point.with_price(resize_price(point, modifiers, candles));
        match handle {
            HandleId::Start => {
                if modifiers.constrain {
                    moved.price = p2.price;
                }
                Some(Geometry::segment(moved, p2))
            }
            HandleId::End => {
                if modifiers.constrain {
                    moved.price = p1.price;
                }
                Some(Geometry::segment(p1, moved))
            }
            _ => None,
        }
    }

    fn handle_cursor(&self, _handle: HandleId) -> DrawingCursor {
        DrawingCursor::Crosshair
    }
}

/// Start and end anchors of a two-point drawing.
pub(super) fn segment_anchors(geometry: &Geometry, projector: &Projector) -> Vec<(HandleId, Vec2)> {
    let Geometry::Segment { p1, p2 } = geometry else {
        return Vec::new();
    };
    [(HandleId::Start, p1), (HandleId::End, p2)]
        .into_iter()
        .filter_map(|(h, p)| projector.project(p).map(|v| (h, v)))
        .collect()
}
