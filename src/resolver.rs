//! Pointer position to chart point, and back.

use crate::coordinates::CoordinateApi;
use crate::data_types::{CandleSeries, ChartPoint};
use crate::utils::PixelsExt;
use glam::Vec2;
use gpui::{Bounds, Pixels, Point};

pub struct CoordinateResolver;

impl CoordinateResolver {
    /// Resolves a window-space pointer position into a chart point.
    ///
    /// Returns `None` when the price cannot be resolved; callers treat the
    /// event as outside any usable region. Times beyond the loaded candles
    /// are extrapolated from the nearest bar interval.
    pub fn resolve(
        position: Point<Pixels>,
        container: Bounds<Pixels>,
        coords: &dyn CoordinateApi,
        candles: &CandleSeries,
    ) -> Option<ChartPoint> {
        let x = (position.x - container.origin.x).as_f32();
        let y = (position.y - container.origin.y).as_f32();

        let logical = coords.coordinate_to_logical(x);
        if !logical.is_finite() {
            return None;
        }
        let price = coords.coordinate_to_price(y)?;
        let time = coords
            .coordinate_to_time(x)
            .or_else(|| candles.time_at_logical(logical));

        Some(ChartPoint::new(time, price, logical))
    }
}

/// Projects chart points into pane-local pixels.
#[derive(Clone, Copy)]
pub struct Projector<'a> {
    pub coords: &'a dyn CoordinateApi,
    pub candles: &'a CandleSeries,
}

impl<'a> Projector<'a> {
    pub fn new(coords: &'a dyn CoordinateApi, candles: &'a CandleSeries) -> Self {
        Self { coords, candles }
    }

    /// X from the time when it maps onto a candle, else from the time's
    /// inter/extrapolated logical index, else from the stored logical index.
    pub fn x(&self, point: &ChartPoint) -> f32 {
        if let Some(time) = point.time {
            if let Some(x) = self.coords.time_to_coordinate(time) {
                return x;
            }
            if let Some(logical) = self.candles.logical_for_time(time) {
                return self.coords.logical_to_coordinate(logical);
            }
        }
        self.coords.logical_to_coordinate(point.logical)
    }

    pub fn project(&self, point: &ChartPoint) -> Option<Vec2> {
        let y = self.coords.price_to_coordinate(point.price)?;
        Some(Vec2::new(self.x(point), y))
    }

    pub fn y(&self, price: f64) -> Option<f32> {
        self.coords.price_to_coordinate(price)
    }
}
