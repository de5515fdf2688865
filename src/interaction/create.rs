use super::strategy::strategy_for;
use crate::data_types::{CandleSeries, ChartPoint, DrawingKind, EngineConfig, Geometry};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreateMode {
    /// First click anchors, second click commits.
    TwoClick,
    /// Pointer-down anchors, pointer-up commits.
    ClickDrag,
}

/// A drawing being placed by the user.
#[derive(Clone, Debug, PartialEq)]
pub struct CreateGesture {
    pub kind: DrawingKind,
    pub anchor: ChartPoint,
    pub current: ChartPoint,
    pub mode: CreateMode,
    /// Pointer-downs received so far; a two-click gesture commits on the
    /// pointer-up following the second.
    pub clicks: u8,
}

impl CreateGesture {
    pub fn new(kind: DrawingKind, anchor: ChartPoint) -> Self {
        Self {
            kind,
            anchor,
            current: anchor,
            mode: strategy_for(kind).creation_mode(),
            clicks: 1,
        }
    }

    pub fn preview(&self, config: &EngineConfig, candles: &CandleSeries) -> Geometry {
        strategy_for(self.kind).create(&self.anchor, &self.current, config, candles)
    }
}
