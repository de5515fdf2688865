use d3rs::scale::{LinearScale, Scale as D3Scale};
use std::fmt;

/// Linear mapping between a data domain and a pixel range.
#[derive(Clone)]
pub struct ChartScale {
    scale: LinearScale,
    domain: (f64, f64),
    range: (f32, f32),
}

impl ChartScale {
    pub fn new_linear(domain: (f64, f64), range: (f32, f32)) -> Self {
        let mut d_min = domain.0;
        let mut d_max = domain.1;
        if (d_max - d_min).abs() < f64::EPSILON {
            d_min -= 0.5;
            d_max += 0.5;
        }
        let scale = LinearScale::new()
            .domain(d_min, d_max)
            .range(range.0 as f64, range.1 as f64);
        Self {
            scale,
            domain: (d_min, d_max),
            range,
        }
    }

    pub fn map(&self, value: f64) -> f32 {
        let res = self.scale.scale(value) as f32;
        if res.is_nan() || res.is_infinite() {
            0.0
        } else {
            res
        }
    }

    /// Falls back to the domain start when the range is empty.
    pub fn invert(&self, pixel: f32) -> f64 {
        self.scale
            .invert(pixel as f64)
            .filter(|v| v.is_finite())
            .unwrap_or(self.domain.0)
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }
}

impl fmt::Debug for ChartScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartScale")
            .field("domain", &self.domain)
            .field("range", &self.range)
            .finish()
    }
}

impl PartialEq for ChartScale {
    fn eq(&self, other: &Self) -> bool {
        self.domain == other.domain && self.range == other.range
    }
}
