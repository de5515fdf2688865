//! Transform helper for coordinate projection

use crate::scales::ChartScale;
use crate::utils::PixelsExt;
use gpui::{Bounds, Pixels};

/// Logical-bar X scale and price Y scale over a pane.
///
/// Scales work in pane-local pixels; `bounds.origin` places them in the window.
#[derive(Clone, Debug)]
pub struct ChartTransform {
    pub x_scale: ChartScale,
    pub y_scale: ChartScale,
    pub bounds: Bounds<Pixels>,
}

impl ChartTransform {
    pub fn new(x_scale: ChartScale, y_scale: ChartScale, bounds: Bounds<Pixels>) -> Self {
        Self {
            x_scale,
            y_scale,
            bounds,
        }
    }

    /// Builds the scales for the given logical and price domains.
    pub fn from_domains(
        logical: (f64, f64),
        price: (f64, f64),
        bounds: Bounds<Pixels>,
    ) -> Self {
        let width = bounds.size.width.as_f32();
        let height = bounds.size.height.as_f32();
        Self::new(
            ChartScale::new_linear(logical, (0.0, width)),
            ChartScale::new_linear(price, (height, 0.0)),
            bounds,
        )
    }

    pub fn width(&self) -> f32 {
        self.bounds.size.width.as_f32()
    }

    pub fn height(&self) -> f32 {
        self.bounds.size.height.as_f32()
    }
}
