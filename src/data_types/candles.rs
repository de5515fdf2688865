use super::{Candle, ChartPoint};

/// Loaded candle data, sorted by open time with duplicate times removed.
///
/// Logical index `i` is the i-th candle. Outside `[0, len)` logical indices
/// map to times by stepping the first or last known bar interval.
#[derive(Clone, Debug, Default)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(mut candles: Vec<Candle>) -> Self {
        candles.sort_by_key(|c| c.time);
        candles.dedup_by_key(|c| c.time);
        Self { candles }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn as_slice(&self) -> &[Candle] {
        &self.candles
    }

    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    pub fn first(&self) -> Option<&Candle> {
        self.candles.first()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Index of the candle opening exactly at `time`.
    pub fn index_of(&self, time: i64) -> Option<usize> {
        self.candles.binary_search_by_key(&time, |c| c.time).ok()
    }

    /// Index of the first candle opening at or after `time`.
    pub fn first_index_at_or_after(&self, time: i64) -> usize {
        self.candles.partition_point(|c| c.time < time)
    }

    fn leading_interval(&self) -> Option<i64> {
        match self.candles.as_slice() {
            [a, b, ..] => Some(b.time - a.time),
            _ => None,
        }
    }

    fn trailing_interval(&self) -> Option<i64> {
        match self.candles.as_slice() {
            [.., a, b] => Some(b.time - a.time),
            _ => None,
        }
    }

    /// Time at a logical index, extrapolating whole bars outside the data.
    ///
    /// Returns `None` with fewer than two candles, where no interval is known,
    /// and when the extrapolated time does not fit in an `i64`.
    pub fn time_at_logical(&self, logical: f64) -> Option<i64> {
        if self.candles.len() < 2 || !logical.is_finite() {
            return None;
        }
        // saturating cast, overflow is caught below
        let index = logical.round() as i64;
        let last = self.candles.len() as i64 - 1;
        if index < 0 {
            let first = self.candles[0].time;
            first.checked_add(index.checked_mul(self.leading_interval()?)?)
        } else if index > last {
            let last_time = self.candles[last as usize].time;
            last_time.checked_add((index - last).checked_mul(self.trailing_interval()?)?)
        } else {
            Some(self.candles[index as usize].time)
        }
    }

    /// Continuous logical index of `time`: interpolated between candles and
    /// extrapolated with the edge intervals outside them.
    pub fn logical_for_time(&self, time: i64) -> Option<f64> {
        match self.candles.len() {
            0 => None,
            1 => (self.candles[0].time == time).then_some(0.0),
            len => match self.candles.binary_search_by_key(&time, |c| c.time) {
                Ok(index) => Some(index as f64),
                Err(0) => {
                    let interval = self.leading_interval()? as f64;
                    Some((time - self.candles[0].time) as f64 / interval)
                }
                Err(index) if index == len => {
                    let interval = self.trailing_interval()? as f64;
                    Some((len - 1) as f64 + (time - self.candles[len - 1].time) as f64 / interval)
                }
                Err(index) => {
                    let prev = &self.candles[index - 1];
                    let next = &self.candles[index];
                    let span = (next.time - prev.time) as f64;
                    Some((index - 1) as f64 + (time - prev.time) as f64 / span)
                }
            },
        }
    }

    /// Candle nearest in time to `point`, clamped to the loaded range.
    pub fn nearest_index(&self, point: &ChartPoint) -> Option<usize> {
        if self.candles.is_empty() {
            return None;
        }
        let last = self.candles.len() - 1;
        match point.time {
            Some(time) => {
                let after = self.first_index_at_or_after(time);
                if after == 0 {
                    Some(0)
                } else if after > last {
                    Some(last)
                } else {
                    let before_gap = time - self.candles[after - 1].time;
                    let after_gap = self.candles[after].time - time;
                    Some(if after_gap < before_gap { after } else { after - 1 })
                }
            }
            None if point.logical.is_finite() => {
                Some(point.logical.round().clamp(0.0, last as f64) as usize)
            }
            None => None,
        }
    }

    /// Price snapped to the nearest candle's closest OHLC level.
    pub fn snap_price(&self, point: &ChartPoint) -> f64 {
        self.nearest_index(point)
            .map(|index| self.candles[index].snapped_price(point.price))
            .unwrap_or(point.price)
    }
}

impl From<Vec<Candle>> for CandleSeries {
    fn from(candles: Vec<Candle>) -> Self {
        Self::new(candles)
    }
}
