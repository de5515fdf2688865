use super::fib::FibStrategy;
use super::line::LineStrategy;
use super::position::PositionStrategy;
use super::rect::BoxStrategy;
use super::ruler::RulerStrategy;
use super::{CreateMode, DrawingCursor, ResizeModifiers};
use crate::data_types::{
    CandleSeries, ChartPoint, DrawingKind, EngineConfig, Geometry, HandleId, PointDelta,
};
use crate::resolver::Projector;
use glam::Vec2;

/// Geometry behavior of one drawing kind.
///
/// Strategies are stateless; every method takes the geometry it works on.
/// Resizes are always recomputed from the gesture's original geometry so a
/// modifier change can re-apply them against the same pointer sample.
pub trait DrawingStrategy: Send + Sync {
    fn kind(&self) -> DrawingKind;

    /// Named handles, in hit-test order.
    fn handles(&self) -> &'static [HandleId];

    fn draggable(&self) -> bool {
        true
    }

    fn creation_mode(&self) -> CreateMode;

    /// Pixel anchor of every handle that can be projected.
    fn handle_anchors(&self, geometry: &Geometry, projector: &Projector) -> Vec<(HandleId, Vec2)>;

    fn body_contains(
        &self,
        geometry: &Geometry,
        projector: &Projector,
        query: Vec2,
        tolerance: f32,
    ) -> bool;

    /// Body drag: translates every defining point.
    fn apply_drag(&self, origin: &Geometry, delta: &PointDelta, candles: &CandleSeries) -> Geometry {
        origin.translated(delta, candles)
    }

    /// `None` when the handle does not belong to this kind.
    fn apply_resize(
        &self,
        origin: &Geometry,
        handle: HandleId,
        point: &ChartPoint,
        modifiers: ResizeModifiers,
        candles: &CandleSeries,
    ) -> Option<Geometry>;

    /// Geometry of a drawing being created from `anchor` to `current`.
    fn create(
        &self,
        anchor: &ChartPoint,
        current: &ChartPoint,
        _config: &EngineConfig,
        _candles: &CandleSeries,
    ) -> Geometry {
        Geometry::segment(*anchor, *current)
    }

    fn handle_cursor(&self, _handle: HandleId) -> DrawingCursor {
        DrawingCursor::Pointer
    }
}

static LINE: LineStrategy = LineStrategy;
static BOX: BoxStrategy = BoxStrategy;
static LONG: PositionStrategy = PositionStrategy::LONG;
static SHORT: PositionStrategy = PositionStrategy::SHORT;
static FIB: FibStrategy = FibStrategy;
static RULER: RulerStrategy = RulerStrategy;

pub fn strategy_for(kind: DrawingKind) -> &'static dyn DrawingStrategy {
    match kind {
        DrawingKind::Line => &LINE,
        DrawingKind::Box => &BOX,
        DrawingKind::LongPosition => &LONG,
        DrawingKind::ShortPosition => &SHORT,
        DrawingKind::FibRetracement => &FIB,
        DrawingKind::Ruler => &RULER,
    }
}

/// Price a resized point lands on, snapped when requested.
pub(crate) fn resize_price(
    point: &ChartPoint,
    modifiers: ResizeModifiers,
    candles: &CandleSeries,
) -> f64 {
    if modifiers.snap {
        candles.snap_price(point)
    } else {
        point.price
    }
}

/// Projects both ends of a segment geometry.
pub(crate) fn project_segment(geometry: &Geometry, projector: &Projector) -> Option<(Vec2, Vec2)> {
    match geometry {
        Geometry::Segment { p1, p2 } => Some((projector.project(p1)?, projector.project(p2)?)),
        Geometry::Position { .. } => None,
    }
}
