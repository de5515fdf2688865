mod common;

use common::*;
use gpui_chart_tools::data_types::{
    Candle, CandleSeries, ChartPoint, Corner, DrawingKind, Edge, Geometry, HandleId,
};
use gpui_chart_tools::interaction::{strategy_for, ResizeModifiers};
use rand::Rng;

const PLAIN: ResizeModifiers = ResizeModifiers {
    snap: false,
    constrain: false,
};
const SHIFT: ResizeModifiers = ResizeModifiers {
    snap: false,
    constrain: true,
};
const CTRL: ResizeModifiers = ResizeModifiers {
    snap: true,
    constrain: false,
};

fn segment(geometry: Geometry) -> (ChartPoint, ChartPoint) {
    match geometry {
        Geometry::Segment { p1, p2 } => (p1, p2),
        other => panic!("expected a segment, got {other:?}"),
    }
}

fn position(geometry: Geometry) -> (ChartPoint, ChartPoint, ChartPoint) {
    match geometry {
        Geometry::Position {
            entry,
            target,
            stop,
        } => (entry, target, stop),
        other => panic!("expected a position, got {other:?}"),
    }
}

#[test]
fn test_line_start_with_shift_keeps_other_price() {
    let candles = candles();
    let origin = Geometry::segment(pt(1000, 10.0), pt(2000, 20.0));

    let resized = strategy_for(DrawingKind::Line)
        .apply_resize(&origin, HandleId::Start, &pt(1500, 15.0), SHIFT, &candles)
        .unwrap();

    let (p1, p2) = segment(resized);
    assert_eq!(p1.time, Some(1500));
    assert_eq!(p1.price, 20.0);
    assert_eq!(p2, pt(2000, 20.0));
}

#[test]
fn test_line_end_moves_only_that_endpoint() {
    let candles = candles();
    let origin = Geometry::segment(pt(1000, 10.0), pt(2000, 20.0));

    let resized = strategy_for(DrawingKind::Line)
        .apply_resize(&origin, HandleId::End, &pt(2500, 7.5), PLAIN, &candles)
        .unwrap();

    assert_eq!(segment(resized), (pt(1000, 10.0), pt(2500, 7.5)));
}

#[test]
fn test_line_rejects_foreign_handles() {
    let candles = candles();
    let origin = Geometry::segment(pt(1000, 10.0), pt(2000, 20.0));
    let line = strategy_for(DrawingKind::Line);
    assert!(line
        .apply_resize(&origin, HandleId::Target, &pt(1500, 15.0), PLAIN, &candles)
        .is_none());
    assert!(strategy_for(DrawingKind::Ruler)
        .apply_resize(&origin, HandleId::Start, &pt(1500, 15.0), PLAIN, &candles)
        .is_none());
}

#[test]
fn test_snap_uses_nearest_candle_ohlc() {
    let candles = candles();
    let origin = Geometry::segment(pt(1000, 10.0), pt(2000, 20.0));

    // Bar 5 (t=1500) is o=13.0 h=14.5 l=12.5 c=14.0; 14.4 is closest to the high
    let resized = strategy_for(DrawingKind::Line)
        .apply_resize(&origin, HandleId::Start, &pt(1500, 14.4), CTRL, &candles)
        .unwrap();
    assert_eq!(segment(resized).0.price, 14.5);

    // 1540 is nearer to bar 5 than bar 6
    let off_bar = ChartPoint::new(Some(1540), 12.6, 5.4);
    let resized = strategy_for(DrawingKind::FibRetracement)
        .apply_resize(&origin, HandleId::End, &off_bar, CTRL, &candles)
        .unwrap();
    assert_eq!(segment(resized).1.price, 12.5);
}

#[test]
fn test_snap_ties_prefer_open_then_high_then_low() {
    let series = CandleSeries::new(vec![
        Candle::new(0, 10.0, 12.0, 8.0, 11.0),
        Candle::new(60, 10.0, 12.0, 8.0, 11.0),
    ]);
    let tie_open_close = ChartPoint::new(Some(0), 10.5, 0.0);
    assert_eq!(series.snap_price(&tie_open_close), 10.0);
    let tie_close_high = ChartPoint::new(Some(0), 11.5, 0.0);
    assert_eq!(series.snap_price(&tie_close_high), 12.0);
    let tie_open_low = ChartPoint::new(Some(0), 9.0, 0.0);
    assert_eq!(series.snap_price(&tie_open_low), 10.0);
}

#[test]
fn test_long_entry_right_moves_only_right_edge_time() {
    let candles = CandleSeries::default();
    let origin = Geometry::position(
        ChartPoint::new(Some(100), 10.0, 0.0),
        ChartPoint::new(Some(200), 20.0, 1.0),
        ChartPoint::new(Some(200), 5.0, 1.0),
    );

    let resized = strategy_for(DrawingKind::LongPosition)
        .apply_resize(
            &origin,
            HandleId::EntryRight,
            &ChartPoint::new(Some(300), 42.0, 2.0),
            PLAIN,
            &candles,
        )
        .unwrap();

    let (entry, target, stop) = position(resized);
    assert_eq!(entry, ChartPoint::new(Some(100), 10.0, 0.0));
    assert_eq!(target.time, Some(300));
    assert_eq!(stop.time, Some(300));
    assert_eq!(target.price, 20.0);
    assert_eq!(stop.price, 5.0);
}

#[test]
fn test_position_levels_never_cross_entry() {
    let candles = candles();
    let long = Geometry::position(pt(1200, 20.0), pt(2000, 30.0), pt(2000, 15.0));
    let strategy = strategy_for(DrawingKind::LongPosition);

    let (_, target, _) = position(
        strategy
            .apply_resize(&long, HandleId::Target, &pt(1500, 5.0), PLAIN, &candles)
            .unwrap(),
    );
    assert_eq!(target.price, 20.0);

    let (_, _, stop) = position(
        strategy
            .apply_resize(&long, HandleId::Stop, &pt(1500, 35.0), PLAIN, &candles)
            .unwrap(),
    );
    assert_eq!(stop.price, 20.0);

    let (entry, _, _) = position(
        strategy
            .apply_resize(&long, HandleId::EntryLeft, &pt(1100, 50.0), PLAIN, &candles)
            .unwrap(),
    );
    assert_eq!(entry.time, Some(1100));
    assert_eq!(entry.price, 30.0);
}

#[test]
fn test_position_clamp_invariant_under_random_resizes() {
    let candles = candles();
    let mut rng = rand::rng();
    let handles = [
        HandleId::EntryLeft,
        HandleId::EntryRight,
        HandleId::Target,
        HandleId::Stop,
    ];

    for kind in [DrawingKind::LongPosition, DrawingKind::ShortPosition] {
        let strategy = strategy_for(kind);
        for _ in 0..200 {
            let mut geometry = match kind {
                DrawingKind::LongPosition => {
                    Geometry::position(pt(1200, 20.0), pt(2000, 30.0), pt(2000, 15.0))
                }
                _ => Geometry::position(pt(1200, 20.0), pt(2000, 15.0), pt(2000, 30.0)),
            };
            for _ in 0..20 {
                let handle = handles[rng.random_range(0..handles.len())];
                let time = rng.random_range(0..30) * INTERVAL + FIRST_TIME;
                let point = pt(time, rng.random_range(-10.0..60.0));
                let modifiers = ResizeModifiers {
                    snap: rng.random_bool(0.3),
                    constrain: rng.random_bool(0.3),
                };
                geometry = strategy
                    .apply_resize(&geometry, handle, &point, modifiers, &candles)
                    .unwrap();

                let (entry, target, stop) = position(geometry);
                match kind {
                    DrawingKind::LongPosition => {
                        assert!(target.price >= entry.price, "{geometry:?}");
                        assert!(stop.price <= entry.price, "{geometry:?}");
                    }
                    _ => {
                        assert!(target.price <= entry.price, "{geometry:?}");
                        assert!(stop.price >= entry.price, "{geometry:?}");
                    }
                }
            }
        }
    }
}

#[test]
fn test_box_handles_follow_original_owners() {
    let candles = candles();
    // p1 is bottom-right, p2 is top-left
    let origin = Geometry::segment(pt(2000, 10.0), pt(1200, 30.0));
    let strategy = strategy_for(DrawingKind::Box);

    let (p1, p2) = segment(
        strategy
            .apply_resize(
                &origin,
                HandleId::Corner(Corner::TopLeft),
                &pt(1100, 32.0),
                PLAIN,
                &candles,
            )
            .unwrap(),
    );
    assert_eq!(p1, pt(2000, 10.0));
    assert_eq!(p2, pt(1100, 32.0));

    let (p1, p2) = segment(
        strategy
            .apply_resize(
                &origin,
                HandleId::Edge(Edge::Bottom),
                &pt(1500, 5.0),
                PLAIN,
                &candles,
            )
            .unwrap(),
    );
    assert_eq!(p1, pt(2000, 5.0));
    assert_eq!(p2, pt(1200, 30.0));

    let (p1, p2) = segment(
        strategy
            .apply_resize(
                &origin,
                HandleId::Edge(Edge::Right),
                &pt(2500, 99.0),
                PLAIN,
                &candles,
            )
            .unwrap(),
    );
    assert_eq!(p1, pt(2500, 10.0));
    assert_eq!(p2, pt(1200, 30.0));
}

#[test]
fn test_fib_handles_relocate_without_snap() {
    let candles = candles();
    let origin = Geometry::segment(pt(1000, 10.0), pt(2000, 20.0));
    let fib = strategy_for(DrawingKind::FibRetracement);

    // 12.2 is off every OHLC level of bar 5
    let start = fib
        .apply_resize(&origin, HandleId::Start, &pt(1500, 12.2), PLAIN, &candles)
        .unwrap();
    assert_eq!(segment(start), (pt(1500, 12.2), pt(2000, 20.0)));

    let end = fib
        .apply_resize(&origin, HandleId::End, &pt(2500, 30.0), PLAIN, &candles)
        .unwrap();
    assert_eq!(segment(end), (pt(1000, 10.0), pt(2500, 30.0)));

    // Shift has no meaning for a fib
    let shifted = fib
        .apply_resize(&origin, HandleId::End, &pt(2500, 30.0), SHIFT, &candles)
        .unwrap();
    assert_eq!(shifted, end);
    assert!(fib
        .apply_resize(&origin, HandleId::Corner(Corner::TopLeft), &pt(1500, 15.0), PLAIN, &candles)
        .is_none());
}
