use serde::{Deserialize, Serialize};

/// One OHLCV bar. `time` is the candle open in Unix seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl Candle {
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume: 0.0,
        }
    }

    /// Closest of open/high/low/close to `raw`.
    ///
    /// Equidistant levels resolve in the fixed order open, high, low, close:
    /// a later level only wins when it is strictly closer.
    pub fn snapped_price(&self, raw: f64) -> f64 {
        let mut best = self.open;
        let mut best_dist = (self.open - raw).abs();
        for level in [self.high, self.low, self.close] {
            let dist = (level - raw).abs();
            if dist < best_dist {
                best = level;
                best_dist = dist;
            }
        }
        best
    }

    /// True when the bar's low/high range contains `price`.
    pub fn brackets(&self, price: f64) -> bool {
        self.low <= price && price <= self.high
    }
}
