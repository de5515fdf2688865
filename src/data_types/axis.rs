/// Visible window of one axis: logical bars on X, price on Y.
///
/// Optional limits bound where the window may be panned; the span itself is
/// never changed by clamping.
#[derive(Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub min_limit: Option<f64>,
    pub max_limit: Option<f64>,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            ..Default::default()
        }
    }

    pub fn with_limits(mut self, min_limit: Option<f64>, max_limit: Option<f64>) -> Self {
        self.min_limit = min_limit;
        self.max_limit = max_limit;
        self.clamp();
        self
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Rescales the span by `factor`, keeping `pivot_data` at `pivot_pct` of
    /// the window. Limits are not applied.
    pub fn zoom_at(&mut self, pivot_data: f64, pivot_pct: f64, factor: f64) {
        let span = self.span() * factor;
        self.min = pivot_data - span * pivot_pct;
        self.max = self.min + span;
    }

    pub fn pan(&mut self, delta: f64) {
        self.min += delta;
        self.max += delta;
    }

    /// Shifts the window back inside its limits.
    ///
    /// A window wider than both limits is moved so it covers them entirely.
    pub fn clamp(&mut self) {
        let span = self.span();
        match (self.min_limit, self.max_limit) {
            (Some(lo), Some(hi)) if span > hi - lo => {
                if self.min > lo {
                    self.shift_to(lo);
                } else if self.max < hi {
                    self.shift_to(hi - span);
                }
            }
            (lo, hi) => {
                if let Some(lo) = lo.filter(|lo| self.min < *lo) {
                    self.shift_to(lo);
                } else if let Some(hi) = hi.filter(|hi| self.max > *hi) {
                    self.shift_to(hi - span);
                }
            }
        }
    }

    fn shift_to(&mut self, min: f64) {
        let span = self.span();
        self.min = min;
        self.max = min + span;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_keeps_span() {
        let mut range = AxisRange::new(-5.0, 15.0).with_limits(Some(0.0), Some(100.0));
        assert_eq!((range.min, range.max), (0.0, 20.0));
        range.pan(90.0);
        range.clamp();
        assert_eq!((range.min, range.max), (80.0, 100.0));
    }

    #[test]
    fn test_wide_window_covers_limits() {
        let range = AxisRange::new(10.0, 210.0).with_limits(Some(0.0), Some(100.0));
        assert_eq!((range.min, range.max), (0.0, 200.0));
        assert!(range.contains(100.0));
    }
}
