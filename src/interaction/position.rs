use super::strategy::{resize_price, DrawingStrategy};
use super::{CreateMode, DrawingCursor, ResizeModifiers};
use crate::data_types::{
    CandleSeries, ChartPoint, DrawingKind, EngineConfig, Geometry, HandleId, PositionSide,
};
use crate::hit_test::rect_contains;
use crate::resolver::Projector;
use glam::Vec2;

/// Long or short trade position.
///
/// `entry` carries the left edge, `target` and `stop` share the right edge.
/// Every resize keeps target and stop on their side of the entry price.
pub(super) struct PositionStrategy {
    side: PositionSide,
}

impl PositionStrategy {
    pub(super) const LONG: PositionStrategy = PositionStrategy {
        side: PositionSide::Long,
    };
    pub(super) const SHORT: PositionStrategy = PositionStrategy {
        side: PositionSide::Short,
    };

    fn clamp_target(&self, price: f64, entry: f64) -> f64 {
        match self.side {
            PositionSide::Long => price.max(entry),
            PositionSide::Short => price.min(entry),
        }
    }

    fn clamp_stop(&self, price: f64, entry: f64) -> f64 {
        match self.side {
            PositionSide::Long => price.min(entry),
            PositionSide::Short => price.max(entry),
        }
    }

    fn clamp_entry(&self, price: f64, target: f64, stop: f64) -> f64 {
        match self.side {
            PositionSide::Long => price.max(stop).min(target),
            PositionSide::Short => price.max(target).min(stop),
        }
    }

    /// Unit direction of profit: +1 for long, -1 for short.
    fn direction(&self) -> f64 {
        match self.side {
            PositionSide::Long => 1.0,
            PositionSide::Short => -1.0,
        }
    }
}

impl DrawingStrategy for PositionStrategy {
    fn kind(&self) -> DrawingKind {
        match self.side {
            PositionSide::Long => DrawingKind::LongPosition,
            PositionSide::Short => DrawingKind::ShortPosition,
        }
    }

    fn handles(&self) -> &'static [HandleId] {
        &[
            HandleId::EntryLeft,
            HandleId::EntryRight,
            HandleId::Target,
            HandleId::Stop,
        ]
    }

    fn creation_mode(&self) -> CreateMode {
        CreateMode::ClickDrag
    }

    fn handle_anchors(&self, geometry: &Geometry, projector: &Projector) -> Vec<(HandleId, Vec2)> {
        let Geometry::Position {
            entry,
            target,
            stop,
        } = geometry
        else {
            return Vec::new();
        };
        let left = projector.x(entry);
        let right = projector.x(target);
        let mut anchors = Vec::with_capacity(4);
        if let Some(y) = projector.y(entry.price) {
            anchors.push((HandleId::EntryLeft, Vec2::new(left, y)));
            anchors.push((HandleId::EntryRight, Vec2::new(right, y)));
        }
        if let Some(y) = projector.y(target.price) {
            anchors.push((HandleId::Target, Vec2::new(left, y)));
        }
        if let Some(y) = projector.y(stop.price) {
            anchors.push((HandleId::Stop, Vec2::new(left, y)));
        }
        anchors
    }

    fn body_contains(
        &self,
        geometry: &Geometry,
        projector: &Projector,
        query: Vec2,
        _tolerance: f32,
    ) -> bool {
        let Geometry::Position {
            entry,
            target,
            stop,
        } = geometry
        else {
            return false;
        };
        let (Some(target_y), Some(stop_y)) = (projector.y(target.price), projector.y(stop.price))
        else {
            return false;
        };
        let a = Vec2::new(projector.x(entry), target_y);
        let b = Vec2::new(projector.x(target), stop_y);
        rect_contains(a, b, query, 0.0)
    }

    fn apply_resize(
        &self,
        origin: &Geometry,
        handle: HandleId,
        point: &ChartPoint,
        modifiers: ResizeModifiers,
        candles: &CandleSeries,
    ) -> Option<Geometry> {
        let Geometry::Position {
            mut entry,
            mut target,
            mut stop,
        } = *origin
        else {
            return None;
        };
        let price = resize_price(point, modifiers, candles);
        match handle {
            HandleId::EntryRight => {
                target = target.with_time_of(point);
                stop = stop.with_time_of(point);
            }
            HandleId::Target => target.price = self.clamp_target(price, entry.price),
            HandleId::Stop => stop.price = self.clamp_stop(price, entry.price),
            HandleId::EntryLeft => {
                entry = entry.with_time_of(point);
                entry.price = self.clamp_entry(price, target.price, stop.price);
            }
            _ => return None,
        }
        Some(Geometry::position(entry, target, stop))
    }

    /// Entry at the anchor. A drag sets the right edge and the target, with
    /// the stop mirrored at 1:1; a plain click uses the configured defaults.
    fn create(
        &self,
        anchor: &ChartPoint,
        current: &ChartPoint,
        config: &EngineConfig,
        candles: &CandleSeries,
    ) -> Geometry {
        let entry = *anchor;
        let dragged_right = current.logical > anchor.logical + 0.5;
        let right = if dragged_right {
            *current
        } else {
            let logical = anchor.logical + config.position_default_bars;
            let time = anchor.time.and(candles.time_at_logical(logical));
            ChartPoint::new(time, anchor.price, logical)
        };

        let distance = self.direction() * (current.price - entry.price);
        let reward = if distance > 0.0 {
            distance
        } else {
            entry.price.abs() * config.position_default_offset_pct
        };
        let target_price = entry.price + self.direction() * reward;
        let stop_price = entry.price - self.direction() * reward;

        Geometry::position(
            entry,
            right.with_price(target_price),
            right.with_price(stop_price),
        )
    }

    fn handle_cursor(&self, handle: HandleId) -> DrawingCursor {
        match handle {
            HandleId::EntryRight => DrawingCursor::ResizeHorizontal,
            HandleId::Target | HandleId::Stop => DrawingCursor::ResizeVertical,
            _ => DrawingCursor::Grab,
        }
    }
}
