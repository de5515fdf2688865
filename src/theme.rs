use gpui::{hsla, px, Hsla, Pixels};

#[derive(Clone, Debug)]
pub struct DrawingTheme {
    pub line: Hsla,
    pub box_border: Hsla,
    pub box_fill: Hsla,
    pub profit_fill: Hsla,
    pub loss_fill: Hsla,
    pub entry_line: Hsla,
    pub fib_line: Hsla,
    pub fib_fill: Hsla,
    pub ruler_up: Hsla,
    pub ruler_down: Hsla,
    pub handle_fill: Hsla,
    pub handle_border: Hsla,
    pub handle_active: Hsla,
    pub label_text: Hsla,
    pub label_background: Hsla,
    pub label_size: Pixels,
    pub preview_alpha: f32,
}

impl Default for DrawingTheme {
    fn default() -> Self {
        let accent = hsla(0.58, 0.85, 0.6, 1.0);
        let profit = hsla(0.42, 0.6, 0.45, 1.0);
        let loss = hsla(0.0, 0.7, 0.55, 1.0);
        Self {
            line: accent,
            box_border: accent,
            box_fill: accent.alpha(0.15),
            profit_fill: profit.alpha(0.2),
            loss_fill: loss.alpha(0.2),
            entry_line: gpui::white().alpha(0.7),
            fib_line: hsla(0.12, 0.8, 0.55, 1.0),
            fib_fill: hsla(0.12, 0.8, 0.55, 0.08),
            ruler_up: profit.alpha(0.25),
            ruler_down: loss.alpha(0.25),
            handle_fill: gpui::white(),
            handle_border: accent,
            handle_active: accent.alpha(0.5),
            label_text: gpui::white(),
            label_background: gpui::black().alpha(0.7),
            label_size: px(11.0),
            preview_alpha: 0.6,
        }
    }
}
