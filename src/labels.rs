//! Text shown next to rulers, positions and retracements.

use crate::data_types::{ChartPoint, Geometry, LabelOptions, PositionSide};
use crate::utils::date_formatter::{
    format_duration, format_timestamp, resolve_timezone, SmartDateFormat,
};

/// Retracement ratios drawn by a fib, from the swing end back to its start.
pub const FIB_LEVELS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

pub fn format_price(price: f64, precision: usize) -> String {
    format!("{price:.precision$}")
}

fn percent_change(from: f64, to: f64) -> Option<f64> {
    (from != 0.0).then(|| (to - from) / from.abs() * 100.0)
}

/// Two lines: price change, then bar count and duration.
pub fn ruler_label(p1: &ChartPoint, p2: &ChartPoint, options: &LabelOptions) -> String {
    let mut first = Vec::new();
    let delta = p2.price - p1.price;
    if options.show_price {
        first.push(format_price(delta, options.precision));
    }
    if options.show_percent {
        if let Some(pct) = percent_change(p1.price, p2.price) {
            first.push(format!("({pct:.2}%)"));
        }
    }

    let mut second = Vec::new();
    if options.show_bars {
        let bars = (p2.logical - p1.logical).round() as i64;
        second.push(format!("{bars} bars"));
    }
    if options.show_duration {
        if let (Some(t1), Some(t2)) = (p1.time, p2.time) {
            second.push(format_duration(t2 - t1));
        }
    }

    [first.join(" "), second.join(", ")]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reward and risk of a position, both as positive distances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionStats {
    pub reward: f64,
    pub risk: f64,
    pub reward_pct: Option<f64>,
    pub risk_pct: Option<f64>,
    /// `None` when the risk is zero.
    pub risk_reward: Option<f64>,
}

impl PositionStats {
    pub fn new(entry: f64, target: f64, stop: f64) -> Self {
        let reward = (target - entry).abs();
        let risk = (entry - stop).abs();
        let pct = |d: f64| (entry != 0.0).then(|| d / entry.abs() * 100.0);
        Self {
            reward,
            risk,
            reward_pct: pct(reward),
            risk_pct: pct(risk),
            risk_reward: (risk > 0.0).then(|| reward / risk),
        }
    }

    pub fn from_geometry(geometry: &Geometry) -> Option<Self> {
        match geometry {
            Geometry::Position {
                entry,
                target,
                stop,
            } => Some(Self::new(entry.price, target.price, stop.price)),
            Geometry::Segment { .. } => None,
        }
    }
}

/// Labels for the profit zone, the loss zone and the ratio line.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionLabels {
    pub target: String,
    pub stop: String,
    pub ratio: String,
}

pub fn position_labels(
    geometry: &Geometry,
    side: PositionSide,
    options: &LabelOptions,
) -> Option<PositionLabels> {
    let stats = PositionStats::from_geometry(geometry)?;
    let sign = match side {
        PositionSide::Long => 1.0,
        PositionSide::Short => -1.0,
    };
    let zone = |name: &str, distance: f64, pct: Option<f64>| {
        let mut parts = vec![name.to_string()];
        if options.show_price {
            parts.push(format_price(distance, options.precision));
        }
        if let (true, Some(pct)) = (options.show_percent, pct) {
            parts.push(format!("({pct:.2}%)"));
        }
        parts.join(" ")
    };
    let ratio = match stats.risk_reward {
        Some(rr) => format!("Risk/Reward {rr:.2}"),
        None => "Risk/Reward -".to_string(),
    };
    Some(PositionLabels {
        target: zone("Target:", sign * stats.reward, stats.reward_pct),
        stop: zone("Stop:", -sign * stats.risk, stats.risk_pct),
        ratio,
    })
}

/// Price of a retracement level between swing start `p1` and end `p2`.
pub fn fib_level_price(p1: &ChartPoint, p2: &ChartPoint, level: f64) -> f64 {
    p2.price - (p2.price - p1.price) * level
}

pub fn fib_level_label(level: f64, price: f64, precision: usize) -> String {
    format!("{level} ({})", format_price(price, precision))
}

/// Full date and time in the label's zone.
pub fn time_label(time: i64, options: &LabelOptions) -> String {
    let tz = resolve_timezone(options.timezone.as_deref());
    format_timestamp(time, SmartDateFormat::Full, tz)
}
