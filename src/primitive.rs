//! Attachment of drawings to the chart and their gpui painting.

use crate::data_types::{
    ChartPoint, Drawing, DrawingId, DrawingKind, DrawingOptions, Geometry, HandleId,
};
use crate::interaction::strategy_for;
use crate::labels::{
    fib_level_label, fib_level_price, position_labels, ruler_label, time_label, FIB_LEVELS,
};
use crate::resolver::Projector;
use crate::theme::DrawingTheme;
use glam::Vec2;
use gpui::{
    fill, outline, point, px, App, BorderStyle, Bounds, Hsla, PathBuilder, Pixels, Point, Size,
    TextAlign, TextRun, TextStyle, Window,
};
use std::collections::HashMap;

/// The chart side of primitive attachment.
pub trait PrimitiveHost {
    fn attach(&mut self, drawing: &Drawing);
    fn detach(&mut self, id: DrawingId);
    fn is_attached(&self, id: DrawingId) -> bool;
}

/// Host that records attached drawings and the revision last seen.
#[derive(Debug, Default)]
pub struct AttachedPrimitives {
    attached: HashMap<DrawingId, u64>,
}

impl AttachedPrimitives {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.attached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    pub fn ids(&self) -> Vec<DrawingId> {
        let mut ids: Vec<_> = self.attached.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn revision(&self, id: DrawingId) -> Option<u64> {
        self.attached.get(&id).copied()
    }
}

impl PrimitiveHost for AttachedPrimitives {
    fn attach(&mut self, drawing: &Drawing) {
        self.attached.insert(drawing.id(), drawing.revision());
    }

    fn detach(&mut self, id: DrawingId) {
        self.attached.remove(&id);
    }

    fn is_attached(&self, id: DrawingId) -> bool {
        self.attached.contains_key(&id)
    }
}

/// Paints one drawing, or the preview of one being created.
pub struct DrawingPrimitive<'a> {
    kind: DrawingKind,
    geometry: &'a Geometry,
    options: &'a DrawingOptions,
    theme: &'a DrawingTheme,
    show_handles: bool,
    entry_tapped: bool,
    active_handle: Option<HandleId>,
    alpha: f32,
}

impl<'a> DrawingPrimitive<'a> {
    pub fn new(drawing: &'a Drawing, theme: &'a DrawingTheme) -> Self {
        Self {
            kind: drawing.kind(),
            geometry: &drawing.geometry,
            options: &drawing.options,
            theme,
            show_handles: drawing.show_handles && drawing.options.handles_enabled,
            entry_tapped: drawing.entry_tapped,
            active_handle: None,
            alpha: 1.0,
        }
    }

    pub fn preview(
        kind: DrawingKind,
        geometry: &'a Geometry,
        options: &'a DrawingOptions,
        theme: &'a DrawingTheme,
    ) -> Self {
        Self {
            kind,
            geometry,
            options,
            theme,
            show_handles: false,
            entry_tapped: true,
            active_handle: None,
            alpha: theme.preview_alpha,
        }
    }

    /// Highlights the handle under an active resize.
    pub fn with_active_handle(mut self, handle: Option<HandleId>) -> Self {
        self.active_handle = handle;
        self
    }

    fn color(&self, color: Hsla) -> Hsla {
        color.opacity(self.alpha)
    }

    /// Paints into `bounds`, the pane the projector's pixels are local to.
    pub fn draw(&self, window: &mut Window, projector: &Projector, bounds: Bounds<Pixels>, cx: &mut App) {
        let origin = bounds.origin;
        match (self.kind, self.geometry) {
            (DrawingKind::Line, Geometry::Segment { p1, p2 }) => {
                if let (Some(a), Some(b)) = (projector.project(p1), projector.project(p2)) {
                    self.stroke(window, origin, &[a, b], self.options.stroke, None);
                }
            }
            (DrawingKind::Box, Geometry::Segment { p1, p2 }) => {
                if let (Some(a), Some(b)) = (projector.project(p1), projector.project(p2)) {
                    let rect = to_bounds(origin, a, b);
                    window.paint_quad(fill(rect, self.color(self.options.fill)));
                    window.paint_quad(outline(rect, self.color(self.options.stroke), BorderStyle::Solid));
                }
            }
            (DrawingKind::FibRetracement, Geometry::Segment { p1, p2 }) => {
                self.draw_fib(window, projector, origin, p1, p2, cx);
            }
            (DrawingKind::Ruler, Geometry::Segment { p1, p2 }) => {
                self.draw_ruler(window, projector, origin, p1, p2, cx);
            }
            (DrawingKind::LongPosition | DrawingKind::ShortPosition, Geometry::Position { .. }) => {
                self.draw_position(window, projector, origin, cx);
            }
            _ => return,
        }

        if self.show_handles {
            self.draw_handles(window, projector, origin);
        }
    }

    fn draw_fib(
        &self,
        window: &mut Window,
        projector: &Projector,
        origin: Point<Pixels>,
        p1: &ChartPoint,
        p2: &ChartPoint,
        cx: &mut App,
    ) {
        let (Some(a), Some(b)) = (projector.project(p1), projector.project(p2)) else {
            return;
        };
        let (left, right) = (a.x.min(b.x), a.x.max(b.x));
        window.paint_quad(fill(to_bounds(origin, a, b), self.color(self.options.fill)));
        self.stroke(window, origin, &[a, b], self.options.stroke, Some(4.0));

        for level in FIB_LEVELS {
            let price = fib_level_price(p1, p2, level);
            let Some(y) = projector.y(price) else {
                continue;
            };
            let l = Vec2::new(left, y);
            self.stroke(window, origin, &[l, Vec2::new(right, y)], self.options.stroke, None);
            let text = fib_level_label(level, price, self.options.labels.precision);
            self.label(window, to_point(origin, l - Vec2::new(0.0, 14.0)), &text, false, cx);
        }
    }

    fn draw_ruler(
        &self,
        window: &mut Window,
        projector: &Projector,
        origin: Point<Pixels>,
        p1: &ChartPoint,
        p2: &ChartPoint,
        cx: &mut App,
    ) {
        let (Some(a), Some(b)) = (projector.project(p1), projector.project(p2)) else {
            return;
        };
        let zone = if p2.price >= p1.price {
            self.options.fill
        } else {
            self.options.secondary_fill
        };
        window.paint_quad(fill(to_bounds(origin, a, b), self.color(zone)));
        self.stroke(window, origin, &[a, b], self.options.stroke, None);

        let labels = &self.options.labels;
        let mut text = ruler_label(p1, p2, labels);
        if let Some(t) = p2.time {
            text.push('\n');
            text.push_str(&time_label(t, labels));
        }
        let below = Vec2::new(a.x.min(b.x), a.y.max(b.y) + 6.0);
        self.label(window, to_point(origin, below), &text, true, cx);
    }

    fn draw_position(
        &self,
        window: &mut Window,
        projector: &Projector,
        origin: Point<Pixels>,
        cx: &mut App,
    ) {
        let Geometry::Position {
            entry,
            target,
            stop,
        } = self.geometry
        else {
            return;
        };
        let (Some(entry_y), Some(target_y), Some(stop_y)) = (
            projector.y(entry.price),
            projector.y(target.price),
            projector.y(stop.price),
        ) else {
            return;
        };
        let left = projector.x(entry);
        let right = projector.x(target);
        // Untapped positions are drawn faded until price reaches the entry.
        let zone_alpha = if self.entry_tapped { 1.0 } else { 0.5 };

        window.paint_quad(fill(
            to_bounds(origin, Vec2::new(left, entry_y), Vec2::new(right, target_y)),
            self.color(self.options.fill).opacity(zone_alpha),
        ));
        window.paint_quad(fill(
            to_bounds(origin, Vec2::new(left, entry_y), Vec2::new(right, stop_y)),
            self.color(self.options.secondary_fill).opacity(zone_alpha),
        ));
        self.stroke(
            window,
            origin,
            &[Vec2::new(left, entry_y), Vec2::new(right, entry_y)],
            self.options.stroke,
            None,
        );

        let Some(side) = self.kind.side() else {
            return;
        };
        if let Some(labels) = position_labels(self.geometry, side, &self.options.labels) {
            let x = left.min(right);
            self.label(window, to_point(origin, Vec2::new(x, target_y)), &labels.target, true, cx);
            self.label(window, to_point(origin, Vec2::new(x, stop_y)), &labels.stop, true, cx);
            self.label(window, to_point(origin, Vec2::new(x, entry_y)), &labels.ratio, true, cx);
        }
    }

    fn draw_handles(&self, window: &mut Window, projector: &Projector, origin: Point<Pixels>) {
        let r = self.options.handle_radius;
        for (handle, anchor) in strategy_for(self.kind).handle_anchors(self.geometry, projector) {
            if self.active_handle == Some(handle) {
                let halo = r * 2.0;
                window.paint_quad(
                    fill(square(origin, anchor, halo), self.theme.handle_active).corner_radii(px(halo)),
                );
            }
            window.paint_quad(
                fill(square(origin, anchor, r), self.theme.handle_fill)
                    .corner_radii(px(r))
                    .border_widths(px(1.0))
                    .border_color(self.theme.handle_border),
            );
        }
    }

    fn stroke(
        &self,
        window: &mut Window,
        origin: Point<Pixels>,
        points: &[Vec2],
        color: Hsla,
        dash: Option<f32>,
    ) {
        let [first, rest @ ..] = points else {
            return;
        };
        let mut builder = PathBuilder::stroke(px(self.options.line_width));
        if let Some(d) = dash {
            builder = builder.dash_array(&[px(d), px(d)]);
        }
        builder.move_to(to_point(origin, *first));
        for p in rest {
            builder.line_to(to_point(origin, *p));
        }
        if let Ok(path) = builder.build() {
            window.paint_path(path, self.color(color));
        }
    }

    fn label(
        &self,
        window: &mut Window,
        at: Point<Pixels>,
        text: &str,
        boxed: bool,
        cx: &mut App,
    ) {
        if text.is_empty() {
            return;
        }
        let font_size = self.theme.label_size;
        let run = TextRun {
            len: text.len(),
            font: TextStyle::default().font(),
            color: self.color(self.theme.label_text),
            background_color: None,
            underline: None,
            strikethrough: None,
        };
        let Ok(lines) = window
            .text_system()
            .shape_text(text.to_string().into(), font_size, &[run], None, None)
        else {
            return;
        };
        let line_height = font_size * 1.3;
        if boxed {
            let width = lines
                .iter()
                .map(|l| l.width())
                .fold(px(0.0), |w, lw| if lw > w { lw } else { w });
            let size = Size::new(width + px(8.0), line_height * lines.len() as f32);
            window.paint_quad(fill(Bounds::new(at, size), self.color(self.theme.label_background)));
        }
        for (i, line) in lines.iter().enumerate() {
            let _ = line.paint(
                at + point(px(4.0), line_height * i as f32),
                line_height,
                TextAlign::Left,
                None,
                window,
                cx,
            );
        }
    }
}

fn to_point(origin: Point<Pixels>, v: Vec2) -> Point<Pixels> {
    origin + point(px(v.x), px(v.y))
}

fn to_bounds(origin: Point<Pixels>, a: Vec2, b: Vec2) -> Bounds<Pixels> {
    Bounds::from_corners(to_point(origin, a.min(b)), to_point(origin, a.max(b)))
}

fn square(origin: Point<Pixels>, center: Vec2, radius: f32) -> Bounds<Pixels> {
    let r = Vec2::splat(radius);
    to_bounds(origin, center - r, center + r)
}
