use super::DrawingKind;
use crate::theme::DrawingTheme;
use gpui::Hsla;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelOptions {
    pub show_price: bool,
    pub show_percent: bool,
    pub show_bars: bool,
    pub show_duration: bool,
    /// Decimal places for prices.
    pub precision: usize,
    /// IANA zone used for time labels, UTC when unset or unknown.
    pub timezone: Option<String>,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            show_price: true,
            show_percent: true,
            show_bars: true,
            show_duration: true,
            precision: 2,
            timezone: None,
        }
    }
}

/// Per-drawing style, read-only while a gesture runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawingOptions {
    pub stroke: Hsla,
    pub fill: Hsla,
    /// Secondary fill: loss zone of positions, down color of the ruler.
    pub secondary_fill: Hsla,
    pub line_width: f32,
    /// When false handles are never painted, selection still tracks.
    pub handles_enabled: bool,
    pub handle_radius: f32,
    pub labels: LabelOptions,
}

impl DrawingOptions {
    pub fn for_kind(kind: DrawingKind, theme: &DrawingTheme) -> Self {
        let (stroke, fill, secondary_fill) = match kind {
            DrawingKind::Line => (theme.line, theme.line.alpha(0.0), theme.line.alpha(0.0)),
            DrawingKind::Box => (theme.box_border, theme.box_fill, theme.box_fill),
            DrawingKind::LongPosition | DrawingKind::ShortPosition => {
                (theme.entry_line, theme.profit_fill, theme.loss_fill)
            }
            DrawingKind::FibRetracement => (theme.fib_line, theme.fib_fill, theme.fib_fill),
            DrawingKind::Ruler => (theme.label_text, theme.ruler_up, theme.ruler_down),
        };
        Self {
            stroke,
            fill,
            secondary_fill,
            line_width: if kind == DrawingKind::Line { 2.0 } else { 1.0 },
            handles_enabled: kind != DrawingKind::Ruler,
            handle_radius: 4.0,
            labels: LabelOptions::default(),
        }
    }
}

impl Default for DrawingOptions {
    fn default() -> Self {
        Self::for_kind(DrawingKind::Line, &DrawingTheme::default())
    }
}
