use super::{CandleSeries, ChartPoint, DrawingOptions, PointDelta, TimeRange};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DRAWING_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique drawing identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawingId(pub u64);

impl DrawingId {
    /// Allocates a fresh id.
    pub fn next() -> Self {
        Self(NEXT_DRAWING_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Marks an externally supplied id as taken so `next` never reissues it.
    pub fn reserve(id: DrawingId) {
        NEXT_DRAWING_ID.fetch_max(id.0 + 1, Ordering::Relaxed);
    }
}

impl fmt::Display for DrawingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawingKind {
    Line,
    #[serde(alias = "rectangle")]
    Box,
    LongPosition,
    ShortPosition,
    FibRetracement,
    Ruler,
}

impl DrawingKind {
    pub const ALL: [DrawingKind; 6] = [
        DrawingKind::Line,
        DrawingKind::Box,
        DrawingKind::LongPosition,
        DrawingKind::ShortPosition,
        DrawingKind::FibRetracement,
        DrawingKind::Ruler,
    ];

    /// Stable slot of this kind in `ALL`.
    pub fn index(self) -> usize {
        match self {
            DrawingKind::Line => 0,
            DrawingKind::Box => 1,
            DrawingKind::LongPosition => 2,
            DrawingKind::ShortPosition => 3,
            DrawingKind::FibRetracement => 4,
            DrawingKind::Ruler => 5,
        }
    }

    pub fn side(self) -> Option<PositionSide> {
        match self {
            DrawingKind::LongPosition => Some(PositionSide::Long),
            DrawingKind::ShortPosition => Some(PositionSide::Short),
            _ => None,
        }
    }

    pub fn is_position(self) -> bool {
        self.side().is_some()
    }

    /// Rulers are transient and never reach the store.
    pub fn is_persistent(self) -> bool {
        self != DrawingKind::Ruler
    }

    pub fn name(self) -> &'static str {
        match self {
            DrawingKind::Line => "line",
            DrawingKind::Box => "box",
            DrawingKind::LongPosition => "long_position",
            DrawingKind::ShortPosition => "short_position",
            DrawingKind::FibRetracement => "fib_retracement",
            DrawingKind::Ruler => "ruler",
        }
    }
}

impl fmt::Display for DrawingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PositionSide {
    Long,
    Short,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Named resize handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandleId {
    /// First anchor of a line or fib (`p1`).
    Start,
    /// Second anchor of a line or fib (`p2`).
    End,
    Corner(Corner),
    Edge(Edge),
    EntryLeft,
    EntryRight,
    /// Profit level of a position.
    Target,
    /// Loss level of a position.
    Stop,
}

impl HandleId {
    /// Display name; position handles depend on which side the levels sit.
    pub fn name(self, kind: DrawingKind) -> &'static str {
        match (self, kind.side()) {
            (HandleId::Start, _) => "start",
            (HandleId::End, _) => "end",
            (HandleId::Corner(Corner::TopLeft), _) => "top-left",
            (HandleId::Corner(Corner::TopRight), _) => "top-right",
            (HandleId::Corner(Corner::BottomLeft), _) => "bottom-left",
            (HandleId::Corner(Corner::BottomRight), _) => "bottom-right",
            (HandleId::Edge(Edge::Left), _) => "left",
            (HandleId::Edge(Edge::Right), _) => "right",
            (HandleId::Edge(Edge::Top), _) => "top",
            (HandleId::Edge(Edge::Bottom), _) => "bottom",
            (HandleId::EntryLeft, _) => "entry-left",
            (HandleId::EntryRight, _) => "entry-right",
            (HandleId::Target, Some(PositionSide::Short)) => "profit-bottom-left",
            (HandleId::Target, _) => "profit-top-left",
            (HandleId::Stop, Some(PositionSide::Short)) => "loss-top-left",
            (HandleId::Stop, _) => "loss-bottom-left",
        }
    }
}

/// Defining points of a drawing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Geometry {
    Position {
        #[serde(rename = "entryPrice")]
        entry: ChartPoint,
        #[serde(rename = "targetPrice")]
        target: ChartPoint,
        #[serde(rename = "stopPrice")]
        stop: ChartPoint,
    },
    /// Line, box, fib and ruler. Endpoints are unordered.
    Segment { p1: ChartPoint, p2: ChartPoint },
}

impl Geometry {
    pub fn segment(p1: ChartPoint, p2: ChartPoint) -> Self {
        Geometry::Segment { p1, p2 }
    }

    pub fn position(entry: ChartPoint, target: ChartPoint, stop: ChartPoint) -> Self {
        Geometry::Position {
            entry,
            target,
            stop,
        }
    }

    pub fn points(&self) -> Vec<ChartPoint> {
        match *self {
            Geometry::Segment { p1, p2 } => vec![p1, p2],
            Geometry::Position {
                entry,
                target,
                stop,
            } => vec![entry, target, stop],
        }
    }

    /// Same delta applied to every defining point.
    pub fn translated(&self, delta: &PointDelta, candles: &CandleSeries) -> Geometry {
        match self {
            Geometry::Segment { p1, p2 } => Geometry::Segment {
                p1: p1.translated(delta, candles),
                p2: p2.translated(delta, candles),
            },
            Geometry::Position {
                entry,
                target,
                stop,
            } => Geometry::Position {
                entry: entry.translated(delta, candles),
                target: target.translated(delta, candles),
                stop: stop.translated(delta, candles),
            },
        }
    }

    /// Time span over all points; `None` when any point lacks a time.
    pub fn time_extent(&self) -> Option<TimeRange> {
        let times: Option<Vec<i64>> = self.points().iter().map(|p| p.time).collect();
        TimeRange::covering(times?)
    }

    pub fn is_compatible_with(&self, kind: DrawingKind) -> bool {
        matches!(
            (self, kind.is_position()),
            (Geometry::Position { .. }, true) | (Geometry::Segment { .. }, false)
        )
    }
}

/// A drawing owned by its kind's registry.
#[derive(Clone, Debug)]
pub struct Drawing {
    id: DrawingId,
    kind: DrawingKind,
    pub geometry: Geometry,
    pub options: DrawingOptions,
    /// Derived from selection and hover.
    pub show_handles: bool,
    pub selected: bool,
    pub hovered: bool,
    /// Positions only: price revisited the entry level.
    pub entry_tapped: bool,
    revision: u64,
}

impl Drawing {
    pub fn new(id: DrawingId, kind: DrawingKind, geometry: Geometry, options: DrawingOptions) -> Self {
        Self {
            id,
            kind,
            geometry,
            options,
            show_handles: false,
            selected: false,
            hovered: false,
            entry_tapped: false,
            revision: 0,
        }
    }

    pub fn id(&self) -> DrawingId {
        self.id
    }

    pub fn kind(&self) -> DrawingKind {
        self.kind
    }

    /// Bumped by `update_all_views`; renderers repaint when it changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Marks the drawing's views dirty after a geometry or state change.
    pub fn update_all_views(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn set_geometry(&mut self, geometry: Geometry) {
        if self.geometry != geometry {
            self.geometry = geometry;
            self.update_all_views();
        }
    }

    pub fn time_extent(&self) -> Option<TimeRange> {
        self.geometry.time_extent()
    }

    pub fn entry(&self) -> Option<&ChartPoint> {
        match &self.geometry {
            Geometry::Position { entry, .. } => Some(entry),
            Geometry::Segment { .. } => None,
        }
    }
}
