#![allow(dead_code)]

use gpui::{point, px, size, Bounds, Pixels, Point};
use gpui_chart_tools::data_types::{
    AxisRange, Candle, CandleSeries, ChartPoint, Drawing, DrawingId, DrawingKind, DrawingOptions,
    Geometry,
};
use gpui_chart_tools::ChartCoordinates;
use std::sync::Arc;

pub const FIRST_TIME: i64 = 1000;
pub const INTERVAL: i64 = 100;
pub const CANDLE_COUNT: usize = 21;

/// 21 bars from t=1000 to t=3000. Bar i spans [10 + i/2, 12 + i/2].
pub fn candles() -> Arc<CandleSeries> {
    let candles = (0..CANDLE_COUNT)
        .map(|i| {
            let base = 10.0 + i as f64 * 0.5;
            Candle::new(FIRST_TIME + i as i64 * INTERVAL, base + 0.5, base + 2.0, base, base + 1.5)
        })
        .collect();
    Arc::new(CandleSeries::new(candles))
}

/// 400x400 pane at the window origin: 20px per bar over bars 0..20, 10px
/// per price unit over prices 0..40.
pub fn surface(candles: Arc<CandleSeries>) -> ChartCoordinates {
    ChartCoordinates::new(
        candles,
        AxisRange::new(0.0, 20.0),
        AxisRange::new(0.0, 40.0),
        Bounds::new(point(px(0.0), px(0.0)), size(px(400.0), px(400.0))),
    )
}

pub fn logical_of(time: i64) -> f64 {
    (time - FIRST_TIME) as f64 / INTERVAL as f64
}

/// Chart point aligned on the test candles.
pub fn pt(time: i64, price: f64) -> ChartPoint {
    ChartPoint::new(Some(time), price, logical_of(time))
}

/// Window position of a chart point on the test surface.
pub fn pixel(time: i64, price: f64) -> Point<Pixels> {
    point(px(logical_of(time) as f32 * 20.0), px(400.0 - price as f32 * 10.0))
}

pub fn drawing(kind: DrawingKind, geometry: Geometry) -> Drawing {
    Drawing::new(DrawingId::next(), kind, geometry, DrawingOptions::default())
}

pub fn line(p1: ChartPoint, p2: ChartPoint) -> Drawing {
    drawing(DrawingKind::Line, Geometry::segment(p1, p2))
}
