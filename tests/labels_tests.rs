mod common;

use common::*;
use gpui_chart_tools::data_types::{ChartPoint, Geometry, LabelOptions, PositionSide};
use gpui_chart_tools::labels::{
    fib_level_label, fib_level_price, position_labels, ruler_label, time_label, PositionStats,
    FIB_LEVELS,
};

#[test]
fn test_ruler_label_lines() {
    let options = LabelOptions::default();
    let label = ruler_label(&pt(1000, 10.0), &pt(1500, 12.5), &options);
    assert_eq!(label, "2.50 (25.00%)\n5 bars, 8m");

    let down = ruler_label(&pt(3000, 20.0), &pt(1000, 15.0), &options);
    assert_eq!(down, "-5.00 (-25.00%)\n-20 bars, -33m");
}

#[test]
fn test_ruler_label_respects_options() {
    let options = LabelOptions {
        show_percent: false,
        show_duration: false,
        precision: 1,
        ..Default::default()
    };
    let label = ruler_label(&pt(1000, 10.0), &pt(1500, 12.5), &options);
    assert_eq!(label, "2.5\n5 bars");

    // Untimed endpoints have no duration and a zero base has no percent
    let label = ruler_label(
        &ChartPoint::new(None, 0.0, 0.0),
        &ChartPoint::new(None, 3.0, 4.0),
        &LabelOptions::default(),
    );
    assert_eq!(label, "3.00\n4 bars");
}

#[test]
fn test_position_stats() {
    let stats = PositionStats::new(100.0, 110.0, 95.0);
    assert_eq!(stats.reward, 10.0);
    assert_eq!(stats.risk, 5.0);
    assert_eq!(stats.reward_pct, Some(10.0));
    assert_eq!(stats.risk_pct, Some(5.0));
    assert_eq!(stats.risk_reward, Some(2.0));

    assert_eq!(PositionStats::new(100.0, 110.0, 100.0).risk_reward, None);
    assert!(PositionStats::from_geometry(&Geometry::segment(pt(1000, 1.0), pt(1100, 2.0))).is_none());
}

#[test]
fn test_long_position_labels() {
    let geometry = Geometry::position(pt(1000, 100.0), pt(1500, 110.0), pt(1500, 95.0));
    let labels = position_labels(&geometry, PositionSide::Long, &LabelOptions::default()).unwrap();
    assert_eq!(labels.target, "Target: 10.00 (10.00%)");
    assert_eq!(labels.stop, "Stop: -5.00 (5.00%)");
    assert_eq!(labels.ratio, "Risk/Reward 2.00");
}

#[test]
fn test_position_without_risk_has_no_ratio() {
    let geometry = Geometry::position(pt(1000, 100.0), pt(1500, 90.0), pt(1500, 100.0));
    let labels = position_labels(&geometry, PositionSide::Short, &LabelOptions::default()).unwrap();
    assert_eq!(labels.ratio, "Risk/Reward -");
}

#[test]
fn test_fib_levels_run_from_end_to_start() {
    let (p1, p2) = (pt(1000, 10.0), pt(2000, 20.0));
    assert_eq!(fib_level_price(&p1, &p2, FIB_LEVELS[0]), 20.0);
    assert_eq!(fib_level_price(&p1, &p2, 1.0), 10.0);
    assert_eq!(fib_level_price(&p1, &p2, 0.5), 15.0);

    let price = fib_level_price(&p1, &p2, 0.618);
    assert!((price - 13.82).abs() < 1e-9);
    assert_eq!(fib_level_label(0.618, price, 2), "0.618 (13.82)");
}

#[test]
fn test_time_label_uses_configured_zone() {
    let utc = LabelOptions::default();
    assert_eq!(time_label(1_704_067_200, &utc), "01 Jan 2024 00:00");

    let paris = LabelOptions {
        timezone: Some("Europe/Paris".into()),
        ..Default::default()
    };
    assert_eq!(time_label(1_704_067_200, &paris), "01 Jan 2024 01:00");
}
