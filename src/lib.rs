//! gpui_chart_tools: interactive drawing tools for GPUI candlestick charts

pub mod coordinates;
pub mod culling;
pub mod data_types;
pub mod engine;
pub mod interaction;
pub mod labels;
pub mod persistence;
pub mod primitive;
pub mod registry;
pub mod remote;
pub mod resolver;
pub mod scales;
pub mod selection;
pub mod theme;
pub mod transform;
pub mod utils;
pub mod view_controller;

pub use coordinates::{ChartCoordinates, ChartSurface, CoordinateApi};
pub use data_types::{
    Candle, CandleSeries, ChartPoint, Drawing, DrawingId, DrawingKind, EngineConfig, Geometry,
    HandleId,
};
pub use engine::{DrawingEngine, Tool};
pub use persistence::{DrawingEvent, DrawingRecord, DrawingStore, MemoryDrawingStore};
pub use remote::{RemoteDrawing, RemoteId};
