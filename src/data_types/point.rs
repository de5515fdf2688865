use super::CandleSeries;
use serde::{Deserialize, Serialize};

/// A location in chart space under the hybrid time/logical model.
///
/// `time` is the candle-aligned Unix timestamp when it can be resolved.
/// `logical` is the continuous bar coordinate and stays meaningful outside
/// the loaded candles.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub time: Option<i64>,
    pub price: f64,
    #[serde(rename = "logicalIndex", default)]
    pub logical: f64,
}

impl ChartPoint {
    pub fn new(time: Option<i64>, price: f64, logical: f64) -> Self {
        Self {
            time,
            price,
            logical,
        }
    }

    /// Delta that moves `self` onto `to`.
    pub fn delta_to(&self, to: &ChartPoint) -> PointDelta {
        PointDelta {
            time: match (self.time, to.time) {
                (Some(a), Some(b)) => Some(b - a),
                _ => None,
            },
            price: to.price - self.price,
            logical: to.logical - self.logical,
        }
    }

    /// Moves the point by `delta`.
    ///
    /// Without a time delta the point's bar position is stepped by the
    /// logical delta and its time re-read from `candles`, so a drag that
    /// passes through an untimed region does not lose the point's time.
    pub fn translated(&self, delta: &PointDelta, candles: &CandleSeries) -> ChartPoint {
        ChartPoint {
            time: match (self.time, delta.time) {
                (Some(t), Some(dt)) => t.checked_add(dt),
                (Some(t), None) => candles
                    .logical_for_time(t)
                    .and_then(|logical| candles.time_at_logical(logical + delta.logical)),
                (None, _) => None,
            },
            price: self.price + delta.price,
            logical: self.logical + delta.logical,
        }
    }

    /// Copies the time-axis position (time and logical index) of `other`.
    pub fn with_time_of(mut self, other: &ChartPoint) -> ChartPoint {
        self.time = other.time;
        self.logical = other.logical;
        self
    }

    pub fn with_price(mut self, price: f64) -> ChartPoint {
        self.price = price;
        self
    }

    /// Time-axis ordering: timestamps when both are known, logical index otherwise.
    pub fn is_before(&self, other: &ChartPoint) -> bool {
        match (self.time, other.time) {
            (Some(a), Some(b)) => a < b,
            _ => self.logical < other.logical,
        }
    }
}

/// Translation applied to every point of a drawing during a body drag.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointDelta {
    /// `None` when either end of the gesture had no resolvable time.
    pub time: Option<i64>,
    pub price: f64,
    pub logical: f64,
}

/// Closed time interval in Unix seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: i64,
    pub to: i64,
}

impl TimeRange {
    /// Builds a range, ordering the bounds.
    pub fn new(a: i64, b: i64) -> Self {
        Self {
            from: a.min(b),
            to: a.max(b),
        }
    }

    pub fn width(&self) -> i64 {
        self.to - self.from
    }

    /// Smallest range covering every time in `times`.
    pub fn covering(times: impl IntoIterator<Item = i64>) -> Option<Self> {
        let mut iter = times.into_iter();
        let first = iter.next()?;
        let (from, to) = iter.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
        Some(Self { from, to })
    }
}
