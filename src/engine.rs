//! Pointer and keyboard entry points of the drawing layer.

use crate::coordinates::{ChartSurface, CoordinateApi};
use crate::culling::{CullDebouncer, ViewportCuller};
use crate::data_types::{
    CandleSeries, ChartPoint, Drawing, DrawingId, DrawingKind, DrawingOptions, EngineConfig,
    Geometry, HandleId, TimeRange,
};
use crate::hit_test::{HitResult, HitTester};
use crate::interaction::{
    strategy_for, CreateGesture, CreateMode, DragController, DrawingCursor, Gesture,
    ResizeController, ResizeModifiers,
};
use crate::persistence::{DrawingEvent, DrawingRecord, DrawingStore};
use crate::primitive::{AttachedPrimitives, DrawingPrimitive, PrimitiveHost};
use crate::registry::DrawingRegistry;
use crate::remote::{RemoteId, RemoteIds};
use crate::resolver::{CoordinateResolver, Projector};
use crate::selection::SelectionTracker;
use crate::theme::DrawingTheme;
use crate::utils::PointExt;
use eyre::{eyre, Result, WrapErr};
use glam::Vec2;
use gpui::{App, Bounds, Pixels, Point, Window};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Active tool of the drawing toolbar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tool {
    /// Select and edit drawings of every kind.
    #[default]
    Crosshair,
    Draw(DrawingKind),
}

impl Tool {
    pub fn kind(self) -> Option<DrawingKind> {
        match self {
            Tool::Crosshair => None,
            Tool::Draw(kind) => Some(kind),
        }
    }

    /// Kinds whose drawings respond to pointer events under this tool.
    /// The ruler is never edited.
    pub fn editable_kinds(self) -> Vec<DrawingKind> {
        match self {
            Tool::Crosshair => DrawingKind::ALL
                .into_iter()
                .filter(|k| *k != DrawingKind::Ruler)
                .collect(),
            Tool::Draw(DrawingKind::Ruler) => Vec::new(),
            Tool::Draw(kind) => vec![kind],
        }
    }
}

/// Owns every drawing of one chart and routes input to them.
pub struct DrawingEngine {
    config: EngineConfig,
    theme: DrawingTheme,
    chart_id: String,
    store: Arc<dyn DrawingStore>,
    registries: Vec<DrawingRegistry>,
    tool: Tool,
    gesture: Gesture,
    modifiers: ResizeModifiers,
    last_pointer: Option<ChartPoint>,
    candles: Arc<CandleSeries>,
    culler: ViewportCuller,
    debouncer: CullDebouncer,
    visible: HashSet<DrawingId>,
    visible_range: Option<TimeRange>,
    host: Box<dyn PrimitiveHost>,
    cursor: DrawingCursor,
    hit_tester: HitTester,
    remote_ids: RemoteIds,
}

impl DrawingEngine {
    pub fn new(chart_id: impl Into<String>, store: Arc<dyn DrawingStore>, config: EngineConfig) -> Self {
        let theme = DrawingTheme::default();
        let registries = DrawingKind::ALL
            .into_iter()
            .map(|kind| DrawingRegistry::new(kind, DrawingOptions::for_kind(kind, &theme)))
            .collect();
        Self {
            culler: ViewportCuller::new(config.cull_buffer_ratio),
            debouncer: CullDebouncer::new(config.cull_debounce),
            hit_tester: HitTester::from_config(&config),
            config,
            theme,
            chart_id: chart_id.into(),
            store,
            registries,
            tool: Tool::default(),
            gesture: Gesture::Idle,
            modifiers: ResizeModifiers::default(),
            last_pointer: None,
            candles: Arc::new(CandleSeries::default()),
            visible: HashSet::new(),
            visible_range: None,
            host: Box::new(AttachedPrimitives::new()),
            cursor: DrawingCursor::Default,
            remote_ids: RemoteIds::new(),
        }
    }

    /// Replaces the theme and the default options derived from it.
    pub fn with_theme(mut self, theme: DrawingTheme) -> Self {
        self.registries = DrawingKind::ALL
            .into_iter()
            .map(|kind| DrawingRegistry::new(kind, DrawingOptions::for_kind(kind, &theme)))
            .collect();
        self.theme = theme;
        self
    }

    pub fn with_host(mut self, host: Box<dyn PrimitiveHost>) -> Self {
        self.host = host;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn chart_id(&self) -> &str {
        &self.chart_id
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn cursor(&self) -> DrawingCursor {
        self.cursor
    }

    pub fn candles(&self) -> &Arc<CandleSeries> {
        &self.candles
    }

    pub fn registry(&self, kind: DrawingKind) -> &DrawingRegistry {
        &self.registries[kind.index()]
    }

    pub fn drawing(&self, id: DrawingId) -> Option<&Drawing> {
        self.registries.iter().find_map(|r| r.get(id))
    }

    /// Local id standing in for a server-assigned id.
    pub fn local_id(&self, id: &RemoteId) -> Option<DrawingId> {
        self.remote_ids.get(id)
    }

    pub fn visible_range(&self) -> Option<TimeRange> {
        self.visible_range
    }

    pub fn is_visible(&self, id: DrawingId) -> bool {
        self.visible.contains(&id)
    }

    pub fn visible_ids(&self) -> Vec<DrawingId> {
        let mut ids: Vec<_> = self.visible.iter().copied().collect();
        ids.sort();
        ids
    }

    /// Handle whose indicator is shown: the one under an active resize,
    /// until the pointer leaves the activation distance.
    pub fn active_handle(&self) -> Option<(DrawingId, HandleId)> {
        match &self.gesture {
            Gesture::Resizing(r) if !r.indicator_suppressed => Some((r.id, r.handle)),
            _ => None,
        }
    }

    /// Loads the chart's stored drawings. Invalid records are skipped.
    pub fn hydrate(&mut self) -> Result<usize> {
        let records = self
            .store
            .load_drawings(&self.chart_id)
            .wrap_err_with(|| format!("failed to load drawings for chart {}", self.chart_id))?;

        let mut loaded = 0;
        for record in records {
            if let Err(err) = record.validate() {
                warn!(id = %record.id, error = %err, "skipping stored drawing");
                continue;
            }
            if !record.kind.is_persistent() {
                continue;
            }
            self.insert_record(record);
            loaded += 1;
        }
        info!(chart = %self.chart_id, loaded, "drawings hydrated");
        self.recull();
        Ok(loaded)
    }

    pub fn set_candles(&mut self, candles: Arc<CandleSeries>) {
        self.candles = candles;
        self.update_entry_tapped();
    }

    /// Switching tools drops the ruler and any unfinished creation.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool == self.tool {
            return;
        }
        debug!(?tool, "tool changed");
        self.clear_ruler();
        if matches!(self.gesture, Gesture::Creating(_)) {
            self.gesture = Gesture::Idle;
        }
        for registry in &mut self.registries {
            registry.hover(None);
        }
        self.tool = tool;
        self.cursor = self.idle_cursor();
    }

    pub fn pointer_down<S: ChartSurface>(&mut self, surface: &mut S, position: Point<Pixels>) {
        let Some(point) = self.resolve(surface, position) else {
            return;
        };
        self.last_pointer = Some(point);

        if let Gesture::Creating(create) = &mut self.gesture {
            if create.mode == CreateMode::TwoClick {
                create.clicks += 1;
                create.current = point;
                return;
            }
        }

        if self.tool == Tool::Draw(DrawingKind::Ruler) {
            self.clear_ruler();
            self.gesture = Gesture::Creating(CreateGesture::new(DrawingKind::Ruler, point));
            self.lock_viewport(surface);
            return;
        }
        self.clear_ruler();

        let pixel = local_pixel(surface.container_bounds(), position);
        self.refresh_hover(&*surface, pixel);

        let mut handle_hit: Option<(DrawingKind, DrawingId, HandleId)> = None;
        let mut body_hit: Option<(DrawingKind, DrawingId)> = None;
        let mut missed = Vec::new();
        {
            let coords: &dyn CoordinateApi = &*surface;
            let projector = Projector::new(coords, &self.candles);
            for kind in self.tool.editable_kinds() {
                let registry = &self.registries[kind.index()];
                let hit = registry
                    .target()
                    .and_then(|id| registry.get(id))
                    .map(|d| (d.id(), self.hit_tester.test_pixel(pixel, d, &projector)));
                match hit {
                    Some((id, HitResult { handle: Some(h), .. })) => {
                        handle_hit = handle_hit.or(Some((kind, id, h)));
                    }
                    Some((id, HitResult { near: true, .. })) => {
                        body_hit = body_hit.or(Some((kind, id)));
                    }
                    Some(_) => missed.push(kind),
                    None => {}
                }
            }
        }
        for kind in missed {
            self.registries[kind.index()].clear_selection();
        }

        if let Some((kind, id, handle)) = handle_hit {
            if let Some(origin) = self.registries[kind.index()].get(id).map(|d| d.geometry) {
                self.gesture = ResizeController::begin(id, kind, handle, pixel, origin);
                self.lock_viewport(surface);
                self.cursor = strategy_for(kind).handle_cursor(handle);
            }
            return;
        }

        if let Some((kind, id)) = body_hit {
            let Some(origin) = self.registries[kind.index()].get(id).map(|d| d.geometry) else {
                return;
            };
            if let Some(gesture) = DragController::begin(&self.gesture, id, kind, point, origin) {
                self.registries[kind.index()].select(Some(id));
                self.gesture = gesture;
                self.lock_viewport(surface);
                self.cursor = DrawingCursor::Grabbing;
            }
            return;
        }

        if let Tool::Draw(kind) = self.tool {
            debug!(%kind, "creation started");
            self.gesture = Gesture::Creating(CreateGesture::new(kind, point));
            self.lock_viewport(surface);
        }
    }

    pub fn pointer_move<S: ChartSurface>(&mut self, surface: &mut S, position: Point<Pixels>) {
        let Some(point) = self.resolve(surface, position) else {
            return;
        };
        self.last_pointer = Some(point);
        let pixel = local_pixel(surface.container_bounds(), position);

        if self.gesture.is_idle() {
            self.cursor = self.refresh_hover(&*surface, pixel);
            return;
        }
        match &mut self.gesture {
            Gesture::Dragging(drag) => {
                let geometry = DragController::update(drag, &point, &self.candles);
                if let Some(d) = self.registries[drag.kind.index()].get_mut(drag.id) {
                    d.set_geometry(geometry);
                }
                self.cursor = DrawingCursor::Grabbing;
            }
            Gesture::Resizing(resize) => {
                ResizeController::track_pointer(resize, pixel, self.config.drag_activation_px);
                let geometry = ResizeController::update(resize, &point, self.modifiers, &self.candles);
                if let (Some(g), Some(d)) =
                    (geometry, self.registries[resize.kind.index()].get_mut(resize.id))
                {
                    d.set_geometry(g);
                }
                self.cursor = strategy_for(resize.kind).handle_cursor(resize.handle);
            }
            Gesture::Creating(create) => {
                create.current = point;
                self.cursor = DrawingCursor::Crosshair;
            }
            Gesture::Idle => {}
        }
    }

    /// Ends the gesture. Pan/zoom is re-enabled whatever happened; a store
    /// failure is returned after the local geometry is kept.
    pub fn pointer_up<S: ChartSurface>(&mut self, surface: &mut S) -> Result<()> {
        surface.set_pan_zoom_enabled(true);

        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => Ok(()),
            Gesture::Dragging(drag) => {
                debug!(id = %drag.id, "drag finished");
                self.cursor = DrawingCursor::Grab;
                self.attach_if_visible(drag.kind, drag.id);
                self.persist(drag.kind, drag.id)
            }
            Gesture::Resizing(resize) => {
                debug!(id = %resize.id, "resize finished");
                let registry = &mut self.registries[resize.kind.index()];
                if registry.contains(resize.id) {
                    registry.select(Some(resize.id));
                }
                self.attach_if_visible(resize.kind, resize.id);
                self.persist(resize.kind, resize.id)
            }
            Gesture::Creating(create) => match create.mode {
                CreateMode::TwoClick if create.clicks < 2 => {
                    self.gesture = Gesture::Creating(create);
                    Ok(())
                }
                _ => self.finish_creation(create),
            },
        }
    }

    /// Re-applies an active resize against the last pointer sample when the
    /// modifier state changes.
    pub fn modifiers_changed(&mut self, modifiers: impl Into<ResizeModifiers>) {
        let next = modifiers.into();
        if next == self.modifiers {
            return;
        }
        self.modifiers = next;
        let (Gesture::Resizing(resize), Some(point)) = (&self.gesture, self.last_pointer) else {
            return;
        };
        if let (Some(g), Some(d)) = (
            ResizeController::update(resize, &point, next, &self.candles),
            self.registries[resize.kind.index()].get_mut(resize.id),
        ) {
            d.set_geometry(g);
        }
    }

    /// Returns whether the key was handled.
    pub fn key_down(&mut self, key: &str) -> Result<bool> {
        match key {
            "backspace" | "delete" => Ok(self.delete_selected()?.is_some()),
            _ => Ok(false),
        }
    }

    /// Deletes the selected drawing of the active tool's kind, else of the
    /// first kind holding a selection.
    ///
    /// Deleting the target of a drag or resize ends that gesture; pan/zoom
    /// comes back on the following pointer-up.
    pub fn delete_selected(&mut self) -> Result<Option<DrawingId>> {
        let kind = self
            .tool
            .kind()
            .filter(|k| self.registries[k.index()].selected().is_some())
            .or_else(|| {
                DrawingKind::ALL
                    .into_iter()
                    .find(|k| self.registries[k.index()].selected().is_some())
            });
        let Some(kind) = kind else {
            return Ok(None);
        };
        let Some(id) = self.registries[kind.index()].selected() else {
            return Ok(None);
        };
        self.remove_local(kind, id);
        debug!(%id, %kind, "selected drawing deleted");
        if kind.is_persistent() {
            self.store
                .delete_drawings(&self.chart_id, &[id])
                .inspect_err(|err| warn!(%id, error = %err, "failed to delete drawing"))?;
        }
        Ok(Some(id))
    }

    pub fn delete_all(&mut self, kind: DrawingKind) -> Result<usize> {
        if self.gesture.target().is_some_and(|id| self.registries[kind.index()].contains(id)) {
            self.gesture = Gesture::Idle;
        }
        let ids = self.registries[kind.index()].clear();
        for id in &ids {
            self.visible.remove(id);
            self.host.detach(*id);
        }
        info!(%kind, count = ids.len(), "drawings cleared");
        if kind.is_persistent() && !ids.is_empty() {
            self.store
                .delete_drawings(&self.chart_id, &ids)
                .inspect_err(|err| warn!(%kind, error = %err, "failed to delete drawings"))?;
        }
        Ok(ids.len())
    }

    pub fn clear_ruler(&mut self) {
        for id in self.registries[DrawingKind::Ruler.index()].clear() {
            self.visible.remove(&id);
            self.host.detach(id);
        }
    }

    /// Adds a drawing programmatically. The store is written first; nothing
    /// is added when it fails.
    pub fn add_drawing(&mut self, kind: DrawingKind, geometry: Geometry) -> Result<DrawingId> {
        if !geometry.is_compatible_with(kind) {
            return Err(eyre!("geometry does not fit a {kind} drawing"));
        }
        let id = DrawingId::next();
        if kind.is_persistent() {
            self.store
                .create_drawing(&self.chart_id, &DrawingRecord::new(id, kind, geometry))?;
        }
        let options = self.registries[kind.index()].options().clone();
        self.registries[kind.index()].insert(Drawing::new(id, kind, geometry, options));
        self.attach_if_visible(kind, id);
        Ok(id)
    }

    /// Notes a visible-range change; culling runs on a later `tick`.
    pub fn visible_range_changed(&mut self, now: Instant) {
        self.debouncer.request(now);
    }

    /// Runs a debounced culling pass when due. Returns whether it ran.
    pub fn tick(&mut self, now: Instant, coords: &dyn CoordinateApi) -> bool {
        if self.debouncer.ready(now) {
            self.refresh_visible(coords);
            true
        } else {
            false
        }
    }

    /// Culls immediately against the surface's visible range.
    pub fn refresh_visible(&mut self, coords: &dyn CoordinateApi) {
        self.visible_range = coords.visible_range();
        self.recull();
    }

    /// Applies another client's change. Server ids are mapped to local ids
    /// and server times aligned to the loaded candles.
    pub fn apply_remote_event(&mut self, event: DrawingEvent) -> Result<()> {
        match event {
            DrawingEvent::Created { drawing_data, .. } => {
                if !drawing_data.kind().is_persistent() {
                    return Ok(());
                }
                let id = match drawing_data.id() {
                    Some(remote) => self.remote_ids.resolve(&remote),
                    None => DrawingId::next(),
                };
                let record = drawing_data.into_record(id, &self.candles)?;
                self.upsert_remote(record);
            }
            DrawingEvent::Updated {
                drawing_id,
                drawing_data,
                ..
            } => {
                if let Some(carried) = drawing_data.id().filter(|id| *id != drawing_id) {
                    return Err(eyre!("update for {drawing_id} carries drawing {carried}"));
                }
                if !drawing_data.kind().is_persistent() {
                    return Ok(());
                }
                let id = self.remote_ids.resolve(&drawing_id);
                let record = drawing_data.into_record(id, &self.candles)?;
                if self.gesture.target() == Some(id) {
                    debug!(%id, "remote update ignored during gesture");
                    return Ok(());
                }
                self.upsert_remote(record);
            }
            DrawingEvent::Deleted { drawing_id, .. } => {
                let Some(id) = self.remote_ids.get(&drawing_id) else {
                    debug!(%drawing_id, "remote delete for unknown drawing");
                    return Ok(());
                };
                if let Some(kind) = self.kind_of(id) {
                    self.remove_local(kind, id);
                }
                self.remote_ids.forget(id);
            }
        }
        Ok(())
    }

    /// Paints the attached drawings and the creation preview.
    pub fn paint(
        &self,
        window: &mut Window,
        coords: &dyn CoordinateApi,
        bounds: Bounds<Pixels>,
        cx: &mut App,
    ) {
        let projector = Projector::new(coords, &self.candles);
        let active = self.active_handle();
        for registry in &self.registries {
            for drawing in registry.iter().filter(|d| self.visible.contains(&d.id())) {
                let handle = active.filter(|(id, _)| *id == drawing.id()).map(|(_, h)| h);
                DrawingPrimitive::new(drawing, &self.theme)
                    .with_active_handle(handle)
                    .draw(window, &projector, bounds, cx);
            }
        }
        if let Gesture::Creating(create) = &self.gesture {
            let geometry = create.preview(&self.config, &self.candles);
            let options = self.registries[create.kind.index()].options();
            DrawingPrimitive::preview(create.kind, &geometry, options, &self.theme)
                .draw(window, &projector, bounds, cx);
        }
    }

    fn resolve<S: ChartSurface>(&self, surface: &S, position: Point<Pixels>) -> Option<ChartPoint> {
        CoordinateResolver::resolve(position, surface.container_bounds(), surface, &self.candles)
    }

    /// Hovers the topmost visible drawing under `pixel` and returns the
    /// cursor for it.
    fn refresh_hover(&mut self, coords: &dyn CoordinateApi, pixel: Vec2) -> DrawingCursor {
        let kinds = self.tool.editable_kinds();
        let projector = Projector::new(coords, &self.candles);
        let found = kinds.iter().rev().find_map(|kind| {
            self.registries[kind.index()]
                .drawings()
                .iter()
                .rev()
                .filter(|d| self.visible.contains(&d.id()))
                .find_map(|d| {
                    let hit = self.hit_tester.test_pixel(pixel, d, &projector);
                    hit.near.then_some((*kind, d.id(), hit))
                })
        });

        for kind in &kinds {
            let hovered = found.filter(|(k, _, _)| k == kind).map(|(_, id, _)| id);
            self.registries[kind.index()].hover(hovered);
        }

        match found {
            Some((kind, _, HitResult { handle: Some(h), .. })) => strategy_for(kind).handle_cursor(h),
            Some((kind, _, _)) if strategy_for(kind).draggable() => DrawingCursor::Grab,
            Some(_) => DrawingCursor::Pointer,
            None => self.idle_cursor(),
        }
    }

    fn idle_cursor(&self) -> DrawingCursor {
        match self.tool {
            Tool::Crosshair => DrawingCursor::Default,
            Tool::Draw(_) => DrawingCursor::Crosshair,
        }
    }

    fn finish_creation(&mut self, create: CreateGesture) -> Result<()> {
        let kind = create.kind;
        let geometry = create.preview(&self.config, &self.candles);
        let id = self.registries[kind.index()].create(geometry);
        self.visible.insert(id);
        if let Some(d) = self.registries[kind.index()].get(id) {
            self.host.attach(d);
        }
        self.update_entry_tapped();
        debug!(%id, %kind, "drawing created");
        if !kind.is_persistent() {
            return Ok(());
        }

        for registry in &mut self.registries {
            registry.clear_selection();
        }
        self.registries[kind.index()].select(Some(id));
        self.store
            .create_drawing(&self.chart_id, &DrawingRecord::new(id, kind, geometry))
            .inspect_err(|err| warn!(%id, %kind, error = %err, "failed to store new drawing"))
    }

    /// Suspends chart pan/zoom while the new gesture owns the pointer.
    fn lock_viewport<S: ChartSurface>(&self, surface: &mut S) {
        if self.gesture.locks_viewport() {
            surface.set_pan_zoom_enabled(false);
        }
    }

    fn persist(&self, kind: DrawingKind, id: DrawingId) -> Result<()> {
        let Some(drawing) = self.registries[kind.index()].get(id) else {
            return Ok(());
        };
        if !kind.is_persistent() {
            return Ok(());
        }
        self.store
            .save_drawing_position(&self.chart_id, id, kind, &drawing.geometry)
            .inspect_err(|err| warn!(%id, %kind, error = %err, "failed to save drawing position"))
    }

    fn kind_of(&self, id: DrawingId) -> Option<DrawingKind> {
        self.registries
            .iter()
            .find(|r| r.contains(id))
            .map(|r| r.kind())
    }

    fn remove_local(&mut self, kind: DrawingKind, id: DrawingId) {
        if self.gesture.target() == Some(id) {
            self.gesture = Gesture::Idle;
        }
        if self.registries[kind.index()].remove(id).is_some() {
            self.visible.remove(&id);
            self.host.detach(id);
        }
    }

    fn insert_record(&mut self, record: DrawingRecord) {
        let options = self.registries[record.kind.index()].options().clone();
        self.registries[record.kind.index()].insert(Drawing::new(
            record.id,
            record.kind,
            record.geometry,
            options,
        ));
    }

    fn upsert_remote(&mut self, record: DrawingRecord) {
        let (id, kind) = (record.id, record.kind);
        if let Some(existing) = self.kind_of(id).filter(|k| *k != kind) {
            self.remove_local(existing, id);
        }
        match self.registries[kind.index()].get_mut(id) {
            Some(drawing) => drawing.set_geometry(record.geometry),
            None => self.insert_record(record),
        }
        self.attach_if_visible(kind, id);
    }

    /// Re-culls one drawing after its geometry changed, then refreshes
    /// entry-tapped for the visible set.
    fn attach_if_visible(&mut self, kind: DrawingKind, id: DrawingId) {
        if let (Some(range), Some(drawing)) =
            (self.visible_range, self.registries[kind.index()].get(id))
        {
            let visible = drawing
                .time_extent()
                .is_some_and(|extent| self.culler.is_visible(&range, &extent));
            if visible {
                self.visible.insert(id);
                self.host.attach(drawing);
            } else if self.visible.remove(&id) {
                self.host.detach(id);
            }
        }
        self.update_entry_tapped();
    }

    fn recull(&mut self) {
        let next: HashSet<DrawingId> = match self.visible_range {
            Some(range) => self
                .registries
                .iter()
                .flat_map(|r| self.culler.cull_drawings(&range, r.iter()))
                .collect(),
            None => HashSet::new(),
        };

        for id in self.visible.difference(&next) {
            self.host.detach(*id);
        }
        for drawing in self.registries.iter().flat_map(|r| r.iter()) {
            if next.contains(&drawing.id()) && !self.visible.contains(&drawing.id()) {
                self.host.attach(drawing);
            }
        }
        debug!(
            visible = next.len(),
            range = ?self.visible_range,
            "drawings culled"
        );
        self.visible = next;
        self.update_entry_tapped();
    }

    fn update_entry_tapped(&mut self) {
        for kind in [DrawingKind::LongPosition, DrawingKind::ShortPosition] {
            SelectionTracker::update_entry_tapped(
                self.registries[kind.index()].drawings_mut(),
                &self.visible,
                &self.candles,
                self.config.parallel_threshold,
            );
        }
    }
}

fn local_pixel(container: Bounds<Pixels>, position: Point<Pixels>) -> Vec2 {
    (position - container.origin).to_vec2()
}
