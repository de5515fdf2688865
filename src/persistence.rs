//! Drawing persistence contract, its JSON wire shapes and an in-memory store.

use crate::data_types::{DrawingId, DrawingKind, Geometry};
use crate::remote::{RemoteDrawing, RemoteId};
use eyre::{eyre, Result, WrapErr};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// A stored drawing. Geometry fields sit next to `id` and `type`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawingRecord {
    pub id: DrawingId,
    #[serde(rename = "type")]
    pub kind: DrawingKind,
    #[serde(flatten)]
    pub geometry: Geometry,
}

impl DrawingRecord {
    pub fn new(id: DrawingId, kind: DrawingKind, geometry: Geometry) -> Self {
        Self { id, kind, geometry }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).wrap_err("invalid drawing record")
    }

    /// Rejects records whose geometry does not fit their kind.
    pub fn validate(&self) -> Result<()> {
        if self.geometry.is_compatible_with(self.kind) {
            Ok(())
        } else {
            Err(eyre!("drawing {} has geometry incompatible with {}", self.id, self.kind))
        }
    }
}

/// Remote CRUD for drawings, keyed by chart.
///
/// Failures are reported, never retried.
pub trait DrawingStore: Send + Sync {
    fn load_drawings(&self, chart_id: &str) -> Result<Vec<DrawingRecord>>;

    /// Called once per finished drag or resize.
    fn save_drawing_position(
        &self,
        chart_id: &str,
        id: DrawingId,
        kind: DrawingKind,
        geometry: &Geometry,
    ) -> Result<()>;

    fn create_drawing(&self, chart_id: &str, record: &DrawingRecord) -> Result<()>;

    fn delete_drawings(&self, chart_id: &str, ids: &[DrawingId]) -> Result<()>;
}

/// Store backed by a map, with switchable write failures.
#[derive(Default)]
pub struct MemoryDrawingStore {
    charts: RwLock<HashMap<String, Vec<DrawingRecord>>>,
    fail_writes: AtomicBool,
}

impl MemoryDrawingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(chart_id: &str, records: Vec<DrawingRecord>) -> Self {
        let store = Self::new();
        store.charts.write().insert(chart_id.to_string(), records);
        store
    }

    /// Makes every subsequent write fail until switched off.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    pub fn records(&self, chart_id: &str) -> Vec<DrawingRecord> {
        self.charts.read().get(chart_id).cloned().unwrap_or_default()
    }

    pub fn record(&self, chart_id: &str, id: DrawingId) -> Option<DrawingRecord> {
        self.charts
            .read()
            .get(chart_id)
            .and_then(|records| records.iter().find(|r| r.id == id).cloned())
    }

    fn check_writable(&self, op: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::Relaxed) {
            Err(eyre!("{op} rejected by store"))
        } else {
            Ok(())
        }
    }
}

impl DrawingStore for MemoryDrawingStore {
    fn load_drawings(&self, chart_id: &str) -> Result<Vec<DrawingRecord>> {
        Ok(self.records(chart_id))
    }

    fn save_drawing_position(
        &self,
        chart_id: &str,
        id: DrawingId,
        kind: DrawingKind,
        geometry: &Geometry,
    ) -> Result<()> {
        self.check_writable("save")?;
        let mut charts = self.charts.write();
        let records = charts.entry(chart_id.to_string()).or_default();
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => record.geometry = *geometry,
            None => records.push(DrawingRecord::new(id, kind, *geometry)),
        }
        Ok(())
    }

    fn create_drawing(&self, chart_id: &str, record: &DrawingRecord) -> Result<()> {
        self.check_writable("create")?;
        record.validate()?;
        let mut charts = self.charts.write();
        let records = charts.entry(chart_id.to_string()).or_default();
        if records.iter().any(|r| r.id == record.id) {
            return Err(eyre!("drawing {} already exists", record.id));
        }
        records.push(record.clone());
        Ok(())
    }

    fn delete_drawings(&self, chart_id: &str, ids: &[DrawingId]) -> Result<()> {
        self.check_writable("delete")?;
        if let Some(records) = self.charts.write().get_mut(chart_id) {
            records.retain(|r| !ids.contains(&r.id));
        }
        Ok(())
    }
}

/// Drawing change pushed by the server for another client's edit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum DrawingEvent {
    #[serde(rename = "chart_drawing_received")]
    Created {
        symbol: String,
        drawing_data: RemoteDrawing,
    },
    #[serde(rename = "chart_drawing_updated")]
    Updated {
        symbol: String,
        drawing_id: RemoteId,
        drawing_data: RemoteDrawing,
    },
    #[serde(rename = "chart_drawing_deleted")]
    Deleted {
        symbol: String,
        drawing_id: RemoteId,
    },
}

impl DrawingEvent {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).wrap_err("invalid drawing event")
    }

    /// Builds an event from a socket message: its event name and JSON body.
    pub fn from_socket(event: &str, payload: &str) -> Result<Self> {
        let data: serde_json::Value =
            serde_json::from_str(payload).wrap_err_with(|| format!("invalid {event} payload"))?;
        serde_json::from_value(serde_json::json!({ "event": event, "data": data }))
            .wrap_err_with(|| format!("invalid {event} payload"))
    }

    pub fn symbol(&self) -> &str {
        match self {
            DrawingEvent::Created { symbol, .. }
            | DrawingEvent::Updated { symbol, .. }
            | DrawingEvent::Deleted { symbol, .. } => symbol,
        }
    }
}
