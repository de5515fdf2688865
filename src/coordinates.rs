//! Coordinate-conversion contract consumed by the drawing engine, plus a
//! reference chart surface built on logical-bar and price axes.

use crate::data_types::{AxisRange, CandleSeries, TimeRange};
use crate::transform::ChartTransform;
use crate::view_controller::ViewController;
use gpui::{Bounds, Pixels};
use std::sync::Arc;
use tracing::debug;

/// Conversions between chart space and pane-local pixels.
pub trait CoordinateApi {
    /// `None` when `time` is not the open time of a loaded candle.
    fn time_to_coordinate(&self, time: i64) -> Option<f32>;
    /// `None` outside the loaded candle range.
    fn coordinate_to_time(&self, x: f32) -> Option<i64>;
    /// Always defined.
    fn coordinate_to_logical(&self, x: f32) -> f64;
    fn logical_to_coordinate(&self, logical: f64) -> f32;
    fn price_to_coordinate(&self, price: f64) -> Option<f32>;
    fn coordinate_to_price(&self, y: f32) -> Option<f64>;
    fn visible_range(&self) -> Option<TimeRange>;
}

/// The chart as seen from pointer handlers.
pub trait ChartSurface: CoordinateApi {
    /// Window-space bounds of the pane receiving pointer events.
    fn container_bounds(&self) -> Bounds<Pixels>;
    fn set_pan_zoom_enabled(&mut self, enabled: bool);
    fn pan_zoom_enabled(&self) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type RangeListener = Box<dyn FnMut(Option<TimeRange>)>;

/// Reference surface: X is the logical bar index, Y is price.
pub struct ChartCoordinates {
    candles: Arc<CandleSeries>,
    x_axis: AxisRange,
    y_axis: AxisRange,
    transform: ChartTransform,
    pan_zoom_enabled: bool,
    next_subscription: u64,
    listeners: Vec<(SubscriptionId, RangeListener)>,
}

impl ChartCoordinates {
    pub fn new(
        candles: Arc<CandleSeries>,
        x_axis: AxisRange,
        y_axis: AxisRange,
        bounds: Bounds<Pixels>,
    ) -> Self {
        let transform =
            ChartTransform::from_domains((x_axis.min, x_axis.max), (y_axis.min, y_axis.max), bounds);
        Self {
            candles,
            x_axis,
            y_axis,
            transform,
            pan_zoom_enabled: true,
            next_subscription: 0,
            listeners: Vec::new(),
        }
    }

    pub fn candles(&self) -> &Arc<CandleSeries> {
        &self.candles
    }

    pub fn transform(&self) -> &ChartTransform {
        &self.transform
    }

    pub fn x_axis(&self) -> &AxisRange {
        &self.x_axis
    }

    pub fn y_axis(&self) -> &AxisRange {
        &self.y_axis
    }

    pub fn set_candles(&mut self, candles: Arc<CandleSeries>) {
        self.candles = candles;
        self.notify_visible_range();
    }

    pub fn set_bounds(&mut self, bounds: Bounds<Pixels>) {
        self.transform.bounds = bounds;
        self.rebuild_transform();
    }

    pub fn subscribe_visible_range_change(
        &mut self,
        listener: impl FnMut(Option<TimeRange>) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(sid, _)| *sid != id);
    }

    /// Pans the time axis by a pixel delta. Ignored while pan/zoom is disabled.
    pub fn pan(&mut self, delta_px: f32) {
        if !self.pan_zoom_enabled {
            return;
        }
        ViewController::pan_axis(&mut self.x_axis, delta_px, self.transform.width(), false);
        self.axes_changed();
    }

    /// Zooms the time axis around a pivot given as a share of the width.
    pub fn zoom_at(&mut self, pivot_pct: f64, factor: f64) {
        if !self.pan_zoom_enabled {
            return;
        }
        ViewController::zoom_axis_at(&mut self.x_axis, pivot_pct, factor);
        self.axes_changed();
    }

    /// Shows the most recent `count` candles and refits the price axis.
    pub fn fit_recent(&mut self, count: usize) {
        if !self.pan_zoom_enabled {
            return;
        }
        ViewController::fit_recent(&mut self.x_axis, self.candles.len(), count, 2.0);
        ViewController::fit_price_to_visible(&mut self.y_axis, &self.x_axis, &self.candles, 0.05);
        self.axes_changed();
    }

    fn axes_changed(&mut self) {
        self.rebuild_transform();
        self.notify_visible_range();
    }

    fn rebuild_transform(&mut self) {
        self.transform = ChartTransform::from_domains(
            (self.x_axis.min, self.x_axis.max),
            (self.y_axis.min, self.y_axis.max),
            self.transform.bounds,
        );
    }

    fn notify_visible_range(&mut self) {
        let range = self.visible_range();
        debug!(?range, listeners = self.listeners.len(), "visible range changed");
        for (_, listener) in self.listeners.iter_mut() {
            listener(range);
        }
    }
}

impl CoordinateApi for ChartCoordinates {
    fn time_to_coordinate(&self, time: i64) -> Option<f32> {
        let index = self.candles.index_of(time)?;
        Some(self.transform.x_scale.map(index as f64))
    }

    fn coordinate_to_time(&self, x: f32) -> Option<i64> {
        let logical = self.coordinate_to_logical(x).round();
        if logical < 0.0 {
            return None;
        }
        self.candles.get(logical as usize).map(|c| c.time)
    }

    fn coordinate_to_logical(&self, x: f32) -> f64 {
        self.transform.x_scale.invert(x)
    }

    fn logical_to_coordinate(&self, logical: f64) -> f32 {
        self.transform.x_scale.map(logical)
    }

    fn price_to_coordinate(&self, price: f64) -> Option<f32> {
        price
            .is_finite()
            .then(|| self.transform.y_scale.map(price))
    }

    fn coordinate_to_price(&self, y: f32) -> Option<f64> {
        if !(0.0..=self.transform.height()).contains(&y) {
            return None;
        }
        Some(self.transform.y_scale.invert(y))
    }

    fn visible_range(&self) -> Option<TimeRange> {
        let from = self.candles.time_at_logical(self.x_axis.min)?;
        let to = self.candles.time_at_logical(self.x_axis.max)?;
        Some(TimeRange::new(from, to))
    }
}

impl ChartSurface for ChartCoordinates {
    fn container_bounds(&self) -> Bounds<Pixels> {
        self.transform.bounds
    }

    fn set_pan_zoom_enabled(&mut self, enabled: bool) {
        self.pan_zoom_enabled = enabled;
    }

    fn pan_zoom_enabled(&self) -> bool {
        self.pan_zoom_enabled
    }
}
