use crate::data_types::{Drawing, DrawingId, DrawingKind, DrawingOptions, Geometry};
use crate::selection::{SelectionSnapshot, SelectionState, SelectionTracker};
use tracing::debug;

/// Owns every drawing of one kind, in creation order.
pub struct DrawingRegistry {
    kind: DrawingKind,
    drawings: Vec<Drawing>,
    selection: SelectionState,
    options: DrawingOptions,
}

impl DrawingRegistry {
    pub fn new(kind: DrawingKind, options: DrawingOptions) -> Self {
        Self {
            kind,
            drawings: Vec::new(),
            selection: SelectionState::default(),
            options,
        }
    }

    pub fn kind(&self) -> DrawingKind {
        self.kind
    }

    pub fn options(&self) -> &DrawingOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.drawings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Drawing> {
        self.drawings.iter()
    }

    pub fn drawings(&self) -> &[Drawing] {
        &self.drawings
    }

    pub fn drawings_mut(&mut self) -> &mut [Drawing] {
        &mut self.drawings
    }

    pub fn get(&self, id: DrawingId) -> Option<&Drawing> {
        self.drawings.iter().find(|d| d.id() == id)
    }

    pub fn get_mut(&mut self, id: DrawingId) -> Option<&mut Drawing> {
        self.drawings.iter_mut().find(|d| d.id() == id)
    }

    pub fn contains(&self, id: DrawingId) -> bool {
        self.get(id).is_some()
    }

    /// Creates a drawing with a fresh id and the registry's default options.
    pub fn create(&mut self, geometry: Geometry) -> DrawingId {
        let id = DrawingId::next();
        self.insert(Drawing::new(id, self.kind, geometry, self.options.clone()));
        id
    }

    /// Adds a drawing, replacing one with the same id.
    pub fn insert(&mut self, drawing: Drawing) {
        DrawingId::reserve(drawing.id());
        match self.drawings.iter_mut().find(|d| d.id() == drawing.id()) {
            Some(existing) => *existing = drawing,
            None => self.drawings.push(drawing),
        }
    }

    pub fn remove(&mut self, id: DrawingId) -> Option<Drawing> {
        let index = self.drawings.iter().position(|d| d.id() == id)?;
        self.selection.forget(id);
        debug!(%id, kind = %self.kind, "drawing removed");
        Some(self.drawings.remove(index))
    }

    /// Removes every drawing, returning their ids.
    pub fn clear(&mut self) -> Vec<DrawingId> {
        self.selection.clear();
        self.drawings.drain(..).map(|d| d.id()).collect()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected(&self) -> Option<DrawingId> {
        self.selection.selected()
    }

    pub fn hovered(&self) -> Option<DrawingId> {
        self.selection.hovered()
    }

    /// Hovered drawing, else the selected one.
    pub fn target(&self) -> Option<DrawingId> {
        self.selection.hovered().or(self.selection.selected())
    }

    pub fn select(&mut self, id: Option<DrawingId>) -> Vec<DrawingId> {
        self.update_selection(|s| s.set_selected(id))
    }

    pub fn hover(&mut self, id: Option<DrawingId>) -> Vec<DrawingId> {
        self.update_selection(|s| s.set_hovered(id))
    }

    pub fn clear_selection(&mut self) -> Vec<DrawingId> {
        self.update_selection(SelectionState::clear)
    }

    /// Applies a selection change and refreshes only the drawings it affects.
    fn update_selection(&mut self, change: impl FnOnce(&mut SelectionState)) -> Vec<DrawingId> {
        let prev: SelectionSnapshot = self.selection.snapshot();
        change(&mut self.selection);
        let next = self.selection.snapshot();
        let changed = SelectionTracker::diff(&prev, &next, &self.drawings);
        SelectionTracker::apply(&next, &changed, &mut self.drawings);
        changed
    }
}
