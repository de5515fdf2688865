mod common;

use common::*;
use gpui_chart_tools::data_types::{
    Candle, CandleSeries, ChartPoint, DrawingId, DrawingKind, DrawingOptions, Geometry,
};
use gpui_chart_tools::registry::DrawingRegistry;
use gpui_chart_tools::selection::{SelectionSnapshot, SelectionTracker};
use gpui_chart_tools::Drawing;
use rand::Rng;
use std::collections::HashSet;

fn lines(n: usize) -> Vec<Drawing> {
    (0..n)
        .map(|i| line(pt(1000 + i as i64 * 100, 10.0), pt(2000, 20.0)))
        .collect()
}

fn pick(rng: &mut impl Rng, drawings: &[Drawing]) -> Option<DrawingId> {
    match rng.random_range(0..=drawings.len()) {
        0 => None,
        // Sometimes name an id that no longer exists
        i if i == drawings.len() && rng.random_bool(0.3) => Some(DrawingId(u64::MAX)),
        i => Some(drawings[i - 1].id()),
    }
}

#[test]
fn test_diff_returns_exactly_the_changed_drawings() {
    let mut rng = rand::rng();
    let drawings = lines(6);
    for _ in 0..1_000 {
        let prev = SelectionSnapshot {
            selected: pick(&mut rng, &drawings),
            hovered: pick(&mut rng, &drawings),
        };
        let next = SelectionSnapshot {
            selected: pick(&mut rng, &drawings),
            hovered: pick(&mut rng, &drawings),
        };
        let changed = SelectionTracker::diff(&prev, &next, &drawings);

        assert!(changed.len() <= 4);
        let unique: HashSet<_> = changed.iter().collect();
        assert_eq!(unique.len(), changed.len());

        for d in &drawings {
            let id = Some(d.id());
            let before = (prev.selected == id, prev.hovered == id);
            let after = (next.selected == id, next.hovered == id);
            assert_eq!(changed.contains(&d.id()), before != after);
        }
        assert!(!changed.contains(&DrawingId(u64::MAX)));
    }
}

#[test]
fn test_moving_hover_touches_two_drawings() {
    let drawings = lines(5);
    let (a, b) = (drawings[1].id(), drawings[3].id());
    let prev = SelectionSnapshot {
        selected: Some(a),
        hovered: Some(a),
    };
    let next = SelectionSnapshot {
        selected: Some(a),
        hovered: Some(b),
    };
    let mut changed = SelectionTracker::diff(&prev, &next, &drawings);
    changed.sort();
    let mut expected = vec![a, b];
    expected.sort();
    assert_eq!(changed, expected);
}

#[test]
fn test_registry_tracks_handles_visibility() {
    let mut registry = DrawingRegistry::new(DrawingKind::Line, DrawingOptions::default());
    let a = registry.create(Geometry::segment(pt(1000, 10.0), pt(2000, 20.0)));
    let b = registry.create(Geometry::segment(pt(1100, 12.0), pt(1900, 18.0)));

    assert_eq!(registry.select(Some(a)), vec![a]);
    assert!(registry.get(a).unwrap().show_handles);
    assert_eq!(registry.target(), Some(a));

    let revision = registry.get(a).unwrap().revision();
    assert_eq!(registry.hover(Some(b)), vec![b]);
    assert_eq!(registry.target(), Some(b));
    // `a` is untouched by a hover change elsewhere
    assert_eq!(registry.get(a).unwrap().revision(), revision);

    registry.hover(None);
    assert!(!registry.get(b).unwrap().show_handles);
    assert!(registry.get(a).unwrap().show_handles);

    registry.remove(a);
    assert_eq!(registry.selected(), None);
    assert_eq!(registry.len(), 1);
}

fn position(entry: ChartPoint) -> Drawing {
    drawing(
        DrawingKind::LongPosition,
        Geometry::position(entry, pt(2500, entry.price + 5.0), pt(2500, entry.price - 5.0)),
    )
}

#[test]
fn test_entry_tapped_scans_from_entry_candle() {
    let candles = candles();
    // Bar 10 (t=2000) spans [15, 17]; later bars only go up
    let mut drawings = vec![
        position(pt(2000, 16.0)),
        position(pt(2000, 14.0)),
        position(pt(1000, 14.0)),
        position(ChartPoint::new(None, 16.0, 10.0)),
    ];
    let ids: HashSet<_> = drawings.iter().map(|d| d.id()).collect();

    let flipped = SelectionTracker::update_entry_tapped(&mut drawings, &ids, &candles, 256);

    let tapped: Vec<bool> = drawings.iter().map(|d| d.entry_tapped).collect();
    assert_eq!(tapped, vec![true, false, true, false]);
    assert_eq!(flipped, vec![drawings[0].id(), drawings[2].id()]);
}

#[test]
fn test_entry_tapped_parallel_matches_sequential() {
    let mut rng = rand::rng();
    let candles = CandleSeries::new(
        (0..500)
            .map(|i| {
                let base = 100.0 + rng.random_range(-20.0..20.0);
                Candle::new(i * 60, base, base + 1.0, base - 1.0, base)
            })
            .collect(),
    );
    let entries: Vec<Drawing> = (0..400)
        .map(|_| {
            let bar = rng.random_range(0..600);
            position(ChartPoint::new(
                Some(bar * 60),
                rng.random_range(70.0..130.0),
                bar as f64,
            ))
        })
        .collect();
    let ids: HashSet<_> = entries.iter().map(|d| d.id()).collect();

    let mut sequential = entries.clone();
    SelectionTracker::update_entry_tapped(&mut sequential, &ids, &candles, usize::MAX);
    let mut parallel = entries;
    SelectionTracker::update_entry_tapped(&mut parallel, &ids, &candles, 1);

    let flags = |ds: &[Drawing]| ds.iter().map(|d| d.entry_tapped).collect::<Vec<_>>();
    assert_eq!(flags(&sequential), flags(&parallel));
}

#[test]
fn test_entry_tapped_only_for_requested_ids() {
    let candles = candles();
    let mut drawings = vec![position(pt(2000, 16.0)), position(pt(2000, 16.0))];
    let only_first: HashSet<_> = [drawings[0].id()].into_iter().collect();
    SelectionTracker::update_entry_tapped(&mut drawings, &only_first, &candles, 256);
    assert!(drawings[0].entry_tapped);
    assert!(!drawings[1].entry_tapped);
}
