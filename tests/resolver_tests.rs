mod common;

use common::*;
use gpui::{point, px, size, Bounds};
use gpui_chart_tools::coordinates::{ChartSurface, CoordinateApi};
use gpui_chart_tools::data_types::{AxisRange, Candle, CandleSeries, ChartPoint};
use gpui_chart_tools::resolver::{CoordinateResolver, Projector};
use gpui_chart_tools::ChartCoordinates;
use std::sync::Arc;

fn offset_surface() -> ChartCoordinates {
    ChartCoordinates::new(
        candles(),
        AxisRange::new(0.0, 20.0),
        AxisRange::new(0.0, 40.0),
        Bounds::new(point(px(50.0), px(30.0)), size(px(400.0), px(400.0))),
    )
}

#[test]
fn test_resolve_subtracts_container_origin() {
    let surface = offset_surface();
    let candles = candles();
    let resolved = CoordinateResolver::resolve(
        point(px(90.0), px(330.0)),
        surface.container_bounds(),
        &surface,
        &candles,
    )
    .unwrap();
    assert_eq!(resolved.time, Some(1200));
    assert!((resolved.price - 10.0).abs() < 1e-6);
    assert!((resolved.logical - 2.0).abs() < 1e-6);
}

#[test]
fn test_resolve_outside_price_axis_is_none() {
    let surface = offset_surface();
    let candles = candles();
    for y in [10.0, 440.0] {
        let resolved = CoordinateResolver::resolve(
            point(px(90.0), px(y)),
            surface.container_bounds(),
            &surface,
            &candles,
        );
        assert!(resolved.is_none(), "y = {y}");
    }
}

#[test]
fn test_resolve_extrapolates_time_past_the_data() {
    let candles = candles();
    let surface = surface(candles.clone());
    let bounds = surface.container_bounds();

    let right = CoordinateResolver::resolve(point(px(440.0), px(200.0)), bounds, &surface, &candles)
        .unwrap();
    assert!((right.logical - 22.0).abs() < 1e-6);
    assert_eq!(right.time, Some(3200));

    let left = CoordinateResolver::resolve(point(px(-60.0), px(200.0)), bounds, &surface, &candles)
        .unwrap();
    assert_eq!(left.time, Some(700));
}

#[test]
fn test_single_candle_leaves_time_unresolved_off_the_bar() {
    let single = Arc::new(CandleSeries::new(vec![Candle::new(1000, 10.0, 12.0, 9.0, 11.0)]));
    let surface = surface(single.clone());
    let bounds = surface.container_bounds();

    let on_bar =
        CoordinateResolver::resolve(point(px(0.0), px(200.0)), bounds, &surface, &single).unwrap();
    assert_eq!(on_bar.time, Some(1000));

    let off_bar =
        CoordinateResolver::resolve(point(px(40.0), px(200.0)), bounds, &surface, &single).unwrap();
    assert_eq!(off_bar.time, None);
    assert!((off_bar.logical - 2.0).abs() < 1e-6);
}

#[test]
fn test_projector_falls_back_from_time_to_logical() {
    let candles = candles();
    let surface = surface(candles.clone());
    let projector = Projector::new(&surface, &candles);

    assert!((projector.x(&pt(1200, 0.0)) - 40.0).abs() < 1e-4);
    // Between two candles the time is interpolated
    assert!((projector.x(&ChartPoint::new(Some(1250), 0.0, 99.0)) - 50.0).abs() < 1e-4);
    // Past the data it is extrapolated, ignoring the stored logical index
    assert!((projector.x(&ChartPoint::new(Some(3200), 0.0, 0.0)) - 440.0).abs() < 1e-4);
    assert!((projector.x(&ChartPoint::new(None, 0.0, 3.0)) - 60.0).abs() < 1e-4);

    let p = projector.project(&pt(1500, 15.0)).unwrap();
    assert!((p.x - 100.0).abs() < 1e-4);
    assert!((p.y - 250.0).abs() < 1e-4);
    assert!(projector.project(&ChartPoint::new(None, f64::NAN, 0.0)).is_none());
}

#[test]
fn test_visible_range_follows_logical_axis() {
    let candles = candles();
    let surface = surface(candles.clone());
    let range = surface.visible_range().unwrap();
    assert_eq!((range.from, range.to), (1000, 3000));

    let empty = ChartCoordinates::new(
        Arc::new(CandleSeries::default()),
        AxisRange::new(0.0, 20.0),
        AxisRange::new(0.0, 40.0),
        Bounds::new(point(px(0.0), px(0.0)), size(px(400.0), px(400.0))),
    );
    assert!(empty.visible_range().is_none());
}

#[test]
fn test_resolve_far_past_the_data_leaves_time_unresolved() {
    let candles = candles();
    let surface = ChartCoordinates::new(
        candles.clone(),
        AxisRange::new(0.0, 1e19),
        AxisRange::new(0.0, 40.0),
        Bounds::new(point(px(0.0), px(0.0)), size(px(400.0), px(400.0))),
    );
    let bounds = surface.container_bounds();

    let resolved =
        CoordinateResolver::resolve(point(px(399.0), px(200.0)), bounds, &surface, &candles)
            .unwrap();
    assert!(resolved.logical > 9e18);
    assert_eq!(resolved.time, None);
    assert!(surface.visible_range().is_none());
}
