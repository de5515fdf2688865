use crate::data_types::{AxisRange, CandleSeries};

/// ViewController handles the business logic of chart navigation (zoom, pan, refit)
/// independently of the GPUI infrastructure to facilitate testing.
pub struct ViewController;

impl ViewController {
    /// Calculates and applies a pan on an axis based on a pixel delta.
    pub fn pan_axis(range: &mut AxisRange, delta_pixels: f32, total_pixels: f32, is_y: bool) {
        if total_pixels <= 0.0 {
            return;
        }
        let span = range.span();
        let ratio = span / total_pixels as f64;

        // Dragging right pulls older bars into view, so X decreases; Y grows downwards.
        let delta_data = if is_y {
            delta_pixels as f64 * ratio
        } else {
            -delta_pixels as f64 * ratio
        };

        range.pan(delta_data);
        range.clamp();
    }

    /// Zooms on an axis at a specific pivot point (expressed as a percentage of the domain).
    pub fn zoom_axis_at(range: &mut AxisRange, pivot_pct: f64, factor: f64) {
        let mut new_factor = factor;
        const MIN_SPAN: f64 = 1e-9;

        if range.span() * factor < MIN_SPAN {
            new_factor = MIN_SPAN / range.span();
        }

        let pivot_data = range.min + range.span() * pivot_pct;
        range.zoom_at(pivot_data, pivot_pct, new_factor);
        range.clamp();
    }

    /// Calculates the new bounds for an auto-fit with an optional margin.
    pub fn compute_auto_fit(min: f64, max: f64, margin_pct: f64) -> (f64, f64) {
        if min == f64::INFINITY || max == f64::NEG_INFINITY {
            return (0.0, 100.0);
        }

        let span = if (max - min).abs() < f64::EPSILON {
            1.0
        } else {
            max - min
        };

        (min - span * margin_pct, max + span * margin_pct)
    }

    /// Shows the most recent `count` bars plus `right_margin` empty bars.
    pub fn fit_recent(range: &mut AxisRange, candle_count: usize, count: usize, right_margin: f64) {
        if candle_count == 0 || count == 0 {
            return;
        }
        let last = (candle_count - 1) as f64;
        let first = (candle_count.saturating_sub(count)) as f64;
        range.min = first - 0.5;
        range.max = last + 0.5 + right_margin;
        range.clamp();
    }

    /// Fits the price axis to the candles inside the logical window.
    pub fn fit_price_to_visible(
        price: &mut AxisRange,
        logical: &AxisRange,
        candles: &CandleSeries,
        margin_pct: f64,
    ) {
        let start = logical.min.floor().max(0.0) as usize;
        let end = (logical.max.ceil().max(0.0) as usize).min(candles.len().saturating_sub(1));
        let visible = candles.as_slice().get(start..=end).unwrap_or(&[]);
        let (lo, hi) = visible
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
                (lo.min(c.low), hi.max(c.high))
            });
        let (min, max) = Self::compute_auto_fit(lo, hi, margin_pct);
        price.min = min;
        price.max = max;
        price.clamp();
    }
}
