mod common;

use common::*;
use glam::Vec2;
use gpui_chart_tools::data_types::{Corner, DrawingKind, Edge, Geometry, HandleId};
use gpui_chart_tools::hit_test::{HitResult, HitTester};
use gpui_chart_tools::resolver::Projector;

#[test]
fn test_line_endpoints_within_threshold_hit_handles() {
    let candles = candles();
    let surface = surface(candles.clone());
    let tester = HitTester::uniform(10.0);
    let line = line(pt(1200, 10.0), pt(1800, 20.0));

    // p1 sits at (40, 300), p2 at (160, 200)
    let projector = Projector::new(&surface, &candles);
    let near_start = tester.test_pixel(Vec2::new(46.0, 306.0), &line, &projector);
    assert_eq!(near_start, HitResult::on_handle(HandleId::Start));

    let near_end = tester.test_pixel(Vec2::new(160.0, 191.0), &line, &projector);
    assert_eq!(near_end, HitResult::on_handle(HandleId::End));

    let far = tester.test_pixel(Vec2::new(40.0, 200.0), &line, &projector);
    assert_eq!(far, HitResult::MISS);
}

#[test]
fn test_line_midpoint_offset_is_body_hit() {
    let candles = candles();
    let surface = surface(candles.clone());
    let threshold = 10.0;
    let tester = HitTester::uniform(threshold);
    let line = line(pt(1200, 10.0), pt(1800, 20.0));
    let projector = Projector::new(&surface, &candles);

    let a = Vec2::new(40.0, 300.0);
    let b = Vec2::new(160.0, 200.0);
    let mid = (a + b) * 0.5;
    let normal = (b - a).perp().normalize();

    let inside = tester.test_pixel(mid + normal * (threshold - 1.0), &line, &projector);
    assert!(inside.near);
    assert_eq!(inside.handle, None);

    let outside = tester.test_pixel(mid + normal * (threshold + 1.0), &line, &projector);
    assert!(!outside.near);
}

#[test]
fn test_zero_length_line_has_handles_but_no_body() {
    let candles = candles();
    let surface = surface(candles.clone());
    let tester = HitTester::uniform(10.0);
    let line = line(pt(1500, 15.0), pt(1500, 15.0));
    let projector = Projector::new(&surface, &candles);

    // (100, 250) is both endpoints; either handle is a valid answer
    let on_point = tester.test_pixel(Vec2::new(100.0, 250.0), &line, &projector);
    assert!(on_point.handle.is_some());

    let beside = tester.test_pixel(Vec2::new(112.0, 250.0), &line, &projector);
    assert_eq!(beside, HitResult::MISS);
}

#[test]
fn test_box_corners_edges_and_body() {
    let candles = candles();
    let surface = surface(candles.clone());
    let tester = HitTester::uniform(10.0);
    // Endpoints given bottom-right first: (200, 300) and (40, 100)
    let rect = drawing(
        DrawingKind::Box,
        Geometry::segment(pt(2000, 10.0), pt(1200, 30.0)),
    );
    let projector = Projector::new(&surface, &candles);

    let cases = [
        (Vec2::new(40.0, 100.0), HandleId::Corner(Corner::TopLeft)),
        (Vec2::new(200.0, 100.0), HandleId::Corner(Corner::TopRight)),
        (Vec2::new(40.0, 300.0), HandleId::Corner(Corner::BottomLeft)),
        (Vec2::new(200.0, 300.0), HandleId::Corner(Corner::BottomRight)),
        (Vec2::new(40.0, 200.0), HandleId::Edge(Edge::Left)),
        (Vec2::new(200.0, 200.0), HandleId::Edge(Edge::Right)),
        (Vec2::new(120.0, 100.0), HandleId::Edge(Edge::Top)),
        (Vec2::new(120.0, 300.0), HandleId::Edge(Edge::Bottom)),
    ];
    for (pixel, handle) in cases {
        let hit = tester.test_pixel(pixel + Vec2::new(2.0, -3.0), &rect, &projector);
        assert_eq!(hit.handle, Some(handle), "at {pixel:?}");
    }

    let body = tester.test_pixel(Vec2::new(90.0, 150.0), &rect, &projector);
    assert!(body.is_body());
    let outside = tester.test_pixel(Vec2::new(260.0, 150.0), &rect, &projector);
    assert_eq!(outside, HitResult::MISS);
}

#[test]
fn test_position_handles_and_band() {
    let candles = candles();
    let surface = surface(candles.clone());
    let tester = HitTester::uniform(10.0);
    let long = drawing(
        DrawingKind::LongPosition,
        Geometry::position(pt(1200, 20.0), pt(2000, 30.0), pt(2000, 15.0)),
    );
    let projector = Projector::new(&surface, &candles);

    // entry (40, 200), right edge x=200, target y=100, stop y=250
    let cases = [
        (Vec2::new(40.0, 200.0), HandleId::EntryLeft),
        (Vec2::new(200.0, 200.0), HandleId::EntryRight),
        (Vec2::new(40.0, 100.0), HandleId::Target),
        (Vec2::new(40.0, 250.0), HandleId::Stop),
    ];
    for (pixel, handle) in cases {
        assert_eq!(tester.test_pixel(pixel, &long, &projector).handle, Some(handle));
    }
    assert_eq!(HandleId::Target.name(DrawingKind::LongPosition), "profit-top-left");
    assert_eq!(HandleId::Stop.name(DrawingKind::ShortPosition), "loss-top-left");

    assert!(tester.test_pixel(Vec2::new(120.0, 130.0), &long, &projector).is_body());
    assert!(tester.test_pixel(Vec2::new(120.0, 240.0), &long, &projector).is_body());
    assert!(!tester.test_pixel(Vec2::new(120.0, 280.0), &long, &projector).near);
}

#[test]
fn test_ruler_is_body_only() {
    let candles = candles();
    let surface = surface(candles.clone());
    let tester = HitTester::uniform(10.0);
    let ruler = drawing(
        DrawingKind::Ruler,
        Geometry::segment(pt(1200, 10.0), pt(1800, 20.0)),
    );

    let on_corner = tester.test(&pt(1200, 10.0), &ruler, &surface, &candles);
    assert_eq!(on_corner, HitResult::BODY);
    let outside = tester.test(&pt(2500, 10.0), &ruler, &surface, &candles);
    assert_eq!(outside, HitResult::MISS);
}

#[test]
fn test_geometry_of_wrong_shape_never_hits() {
    let candles = candles();
    let surface = surface(candles.clone());
    let tester = HitTester::default();
    let broken = drawing(
        DrawingKind::LongPosition,
        Geometry::segment(pt(1200, 10.0), pt(1800, 20.0)),
    );
    assert_eq!(tester.test(&pt(1200, 10.0), &broken, &surface, &candles), HitResult::MISS);
}

#[test]
fn test_coincident_handles_resolve_in_declared_order() {
    let candles = candles();
    let surface = surface(candles.clone());
    let tester = HitTester::uniform(10.0);
    let projector = Projector::new(&surface, &candles);

    // Flat box: top and bottom corners and the left edge share (40, 300)
    let flat = drawing(DrawingKind::Box, Geometry::segment(pt(1200, 10.0), pt(1800, 10.0)));
    let hit = tester.test_pixel(Vec2::new(40.0, 300.0), &flat, &projector);
    assert_eq!(hit, HitResult::on_handle(HandleId::Corner(Corner::TopLeft)));

    let dot = line(pt(1500, 15.0), pt(1500, 15.0));
    let hit = tester.test_pixel(Vec2::new(100.0, 250.0), &dot, &projector);
    assert_eq!(hit, HitResult::on_handle(HandleId::Start));
}
