use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning knobs of the drawing engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pixel radius of resize handles.
    pub handle_threshold_px: f32,
    /// Pixel tolerance for body proximity (line bodies).
    pub proximity_threshold_px: f32,
    /// Distance the pointer must travel before the active handle indicator hides.
    pub drag_activation_px: f32,
    /// Viewport buffer on each side, as a share of the visible width.
    pub cull_buffer_ratio: f64,
    pub cull_debounce: Duration,
    /// Batch size from which entry-tapped scans run on the rayon pool.
    pub parallel_threshold: usize,
    /// Width in bars of a position created by a plain click.
    pub position_default_bars: f64,
    /// Target/stop distance of a click-created position, relative to entry.
    pub position_default_offset_pct: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            handle_threshold_px: 10.0,
            proximity_threshold_px: 6.0,
            drag_activation_px: 3.0,
            cull_buffer_ratio: 0.2,
            cull_debounce: Duration::from_millis(50),
            parallel_threshold: 256,
            position_default_bars: 20.0,
            position_default_offset_pct: 0.01,
        }
    }
}

impl EngineConfig {
    /// Parses a JSON config; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).wrap_err("invalid engine config")
    }
}
