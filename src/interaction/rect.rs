use super::strategy::{project_segment, resize_price, DrawingStrategy};
use super::{CreateMode, DrawingCursor, ResizeModifiers};
use crate::data_types::{CandleSeries, ChartPoint, Corner, DrawingKind, Edge, Geometry, HandleId};
use crate::hit_test::rect_contains;
use crate::resolver::Projector;
use glam::Vec2;

pub(super) struct BoxStrategy;

const BOX_HANDLES: [HandleId; 8] = [
    HandleId::Corner(Corner::TopLeft),
    HandleId::Corner(Corner::TopRight),
    HandleId::Corner(Corner::BottomLeft),
    HandleId::Corner(Corner::BottomRight),
    HandleId::Edge(Edge::Left),
    HandleId::Edge(Edge::Right),
    HandleId::Edge(Edge::Top),
    HandleId::Edge(Edge::Bottom),
];

/// Which sides of the box a handle moves: (left, right, top, bottom).
fn moved_sides(handle: HandleId) -> Option<(bool, bool, bool, bool)> {
    Some(match handle {
        HandleId::Corner(Corner::TopLeft) => (true, false, true, false),
        HandleId::Corner(Corner::TopRight) => (false, true, true, false),
        HandleId::Corner(Corner::BottomLeft) => (true, false, false, true),
        HandleId::Corner(Corner::BottomRight) => (false, true, false, true),
        HandleId::Edge(Edge::Left) => (true, false, false, false),
        HandleId::Edge(Edge::Right) => (false, true, false, false),
        HandleId::Edge(Edge::Top) => (false, false, true, false),
        HandleId::Edge(Edge::Bottom) => (false, false, false, true),
        _ => return None,
    })
}

impl DrawingStrategy for BoxStrategy {
    fn kind(&self) -> DrawingKind {
        DrawingKind::Box
    }

    fn handles(&self) -> &'static [HandleId] {
        &BOX_HANDLES
    }

    fn creation_mode(&self) -> CreateMode {
        CreateMode::TwoClick
    }

    fn handle_anchors(&self, geometry: &Geometry, projector: &Projector) -> Vec<(HandleId, Vec2)> {
        let Some((a, b)) = project_segment(geometry, projector) else {
            return Vec::new();
        };
        // Pixel y grows downwards, so the top is the smaller y.
        let min = a.min(b);
        let max = a.max(b);
        let mid = (min + max) * 0.5;
        vec![
            (HandleId::Corner(Corner::TopLeft), Vec2::new(min.x, min.y)),
            (HandleId::Corner(Corner::TopRight), Vec2::new(max.x, min.y)),
            (HandleId::Corner(Corner::BottomLeft), Vec2::new(min.x, max.y)),
            (HandleId::Corner(Corner::BottomRight), Vec2::new(max.x, max.y)),
            (HandleId::Edge(Edge::Left), Vec2::new(min.x, mid.y)),
            (HandleId::Edge(Edge::Right), Vec2::new(max.x, mid.y)),
            (HandleId::Edge(Edge::Top), Vec2::new(mid.x, min.y)),
            (HandleId::Edge(Edge::Bottom), Vec2::new(mid.x, max.y)),
        ]
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
        let (left, right, top, bottom) = moved_sides(handle)?;

        // Owners come from the original geometry so a handle keeps driving
        // the same endpoint even after the box is flipped mid-gesture.
        let mut points = [p1, p2];
        let left_owner = if p2.is_before(&p1) { 1 } else { 0 };
        let top_owner = if p1.price >= p2.price { 0 } else { 1 };

        if left {
            points[left_owner] = points[left_owner].with_time_of(point);
        }
        if right {
            points[1 - left_owner] = points[1 - left_owner].with_time_of(point);
        }
        if top || bottom {
            let price = resize_price(point, modifiers, candles);
            let owner = if top { top_owner } else { 1 - top_owner };
            points[owner].price = price;
        }

        Some(Geometry::segment(points[0], points[1]))
    }

    fn handle_cursor(&self, handle: HandleId) -> DrawingCursor {
        match handle {
            HandleId::Corner(Corner::TopLeft | Corner::BottomRight) => DrawingCursor::ResizeDiagonal,
            HandleId::Corner(_) => DrawingCursor::ResizeAntiDiagonal,
            HandleId::Edge(Edge::Left | Edge::Right) => DrawingCursor::ResizeHorizontal,
            HandleId::Edge(_) => DrawingCursor::ResizeVertical,
            _ => DrawingCursor::Pointer,
        }
    }
}
