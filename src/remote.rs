//! Drawing payloads as the chart server pushes them.
//!
//! The server names drawings with strings (`"drawing-1751719333829-4d04c9qn6"`),
//! sends times as ISO-8601 strings aligned to no particular bar, and may
//! omit the id entirely. Payloads already in [`DrawingRecord`] form are
//! accepted unchanged.

use crate::data_types::{CandleSeries, ChartPoint, DrawingId, DrawingKind, Geometry};
use crate::persistence::DrawingRecord;
use chrono::{DateTime, NaiveDateTime};
use eyre::{bail, eyre, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Bars past the latest candle that a `"relative"` time points at.
pub const RELATIVE_BARS_AHEAD: usize = 10;

/// Drawing id on the wire: ours, or one assigned by the server.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteId {
    Local(DrawingId),
    Server(String),
}

impl From<DrawingId> for RemoteId {
    fn from(id: DrawingId) -> Self {
        RemoteId::Local(id)
    }
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteId::Local(id) => write!(f, "{id}"),
            RemoteId::Server(name) => f.write_str(name),
        }
    }
}

/// Server ids seen so far and the local ids standing in for them.
#[derive(Debug, Default)]
pub struct RemoteIds {
    by_name: HashMap<String, DrawingId>,
}

impl RemoteIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Local id for `id`, allocating one the first time a server id is seen.
    pub fn resolve(&mut self, id: &RemoteId) -> DrawingId {
        match id {
            RemoteId::Local(id) => *id,
            RemoteId::Server(name) => *self
                .by_name
                .entry(name.clone())
                .or_insert_with(DrawingId::next),
        }
    }

    /// Local id for `id` without allocating.
    pub fn get(&self, id: &RemoteId) -> Option<DrawingId> {
        match id {
            RemoteId::Local(id) => Some(*id),
            RemoteId::Server(name) => self.by_name.get(name).copied(),
        }
    }

    pub fn forget(&mut self, id: DrawingId) {
        self.by_name.retain(|_, local| *local != id);
    }
}

/// A server time: an instant, or `"relative"` for a few bars past the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTime", into = "RawTime")]
pub enum RemoteTime {
    /// Unix seconds.
    At(i64),
    Relative,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawTime {
    Seconds(i64),
    Text(String),
}

impl TryFrom<RawTime> for RemoteTime {
    type Error = eyre::Report;

    fn try_from(raw: RawTime) -> Result<Self> {
        match raw {
            RawTime::Seconds(secs) => Ok(RemoteTime::At(secs)),
            RawTime::Text(text) if text == "relative" => Ok(RemoteTime::Relative),
            RawTime::Text(text) => parse_iso(&text).map(RemoteTime::At),
        }
    }
}

impl From<RemoteTime> for RawTime {
    fn from(time: RemoteTime) -> Self {
        match time {
            RemoteTime::At(secs) => match DateTime::from_timestamp(secs, 0) {
                Some(dt) => RawTime::Text(dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
                None => RawTime::Seconds(secs),
            },
            RemoteTime::Relative => RawTime::Text("relative".to_string()),
        }
    }
}

/// RFC 3339, or a bare `YYYY-MM-DDTHH:MM:SS` read as UTC.
fn parse_iso(text: &str) -> Result<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.timestamp());
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
        .map(|naive| naive.and_utc().timestamp())
        .map_err(|err| eyre!("invalid time {text:?}: {err}"))
}

impl RemoteTime {
    /// Chart point at this time, on the bar nearest to it.
    ///
    /// Times outside the candles land on the extrapolated bar grid; ties go
    /// to the later bar. Without candles the time is kept as sent.
    pub fn to_point(self, price: f64, candles: &CandleSeries) -> Result<ChartPoint> {
        match self {
            RemoteTime::At(time) => {
                let Some(logical) = candles.logical_for_time(time) else {
                    return Ok(ChartPoint::new(Some(time), price, 0.0));
                };
                let logical = logical.round();
                let aligned = candles.time_at_logical(logical).unwrap_or(time);
                Ok(ChartPoint::new(Some(aligned), price, logical))
            }
            RemoteTime::Relative => {
                if candles.is_empty() {
                    bail!("a relative time needs loaded candles");
                }
                let logical = (candles.len() - 1 + RELATIVE_BARS_AHEAD) as f64;
                Ok(ChartPoint::new(candles.time_at_logical(logical), price, logical))
            }
        }
    }
}

/// One `entry`, `target` or `stop` of a server position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServerAnchor {
    pub time: RemoteTime,
    pub price: f64,
}

/// Drawing in the server's own shape. Style fields are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerDrawing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RemoteId>,
    #[serde(rename = "type")]
    pub kind: DrawingKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<RemoteTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<RemoteTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<ServerAnchor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ServerAnchor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<ServerAnchor>,
}

impl ServerDrawing {
    pub fn geometry(&self, candles: &CandleSeries) -> Result<Geometry> {
        if self.kind.is_position() {
            let (Some(entry), Some(target), Some(stop)) = (self.entry, self.target, self.stop)
            else {
                bail!("{} needs entry, target and stop", self.kind);
            };
            return Ok(Geometry::position(
                entry.time.to_point(entry.price, candles)?,
                target.time.to_point(target.price, candles)?,
                stop.time.to_point(stop.price, candles)?,
            ));
        }
        match (self.start_time, self.end_time, self.start_price, self.end_price) {
            (Some(start), Some(end), Some(start_price), Some(end_price)) => Ok(Geometry::segment(
                start.to_point(start_price, candles)?,
                end.to_point(end_price, candles)?,
            )),
            _ => Err(eyre!(
                "{} needs startTime, endTime, startPrice and endPrice",
                self.kind
            )),
        }
    }
}

/// `drawing_data` of a remote event, in either shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteDrawing {
    Record(DrawingRecord),
    Server(ServerDrawing),
}

impl From<DrawingRecord> for RemoteDrawing {
    fn from(record: DrawingRecord) -> Self {
        RemoteDrawing::Record(record)
    }
}

impl RemoteDrawing {
    pub fn kind(&self) -> DrawingKind {
        match self {
            RemoteDrawing::Record(record) => record.kind,
            RemoteDrawing::Server(drawing) => drawing.kind,
        }
    }

    /// Id carried inside the payload, if any.
    pub fn id(&self) -> Option<RemoteId> {
        match self {
            RemoteDrawing::Record(record) => Some(RemoteId::Local(record.id)),
            RemoteDrawing::Server(drawing) => drawing.id.clone(),
        }
    }

    /// Validated record stored under `id`, with server times aligned to
    /// `candles`.
    pub fn into_record(self, id: DrawingId, candles: &CandleSeries) -> Result<DrawingRecord> {
        let record = match self {
            RemoteDrawing::Record(record) => DrawingRecord { id, ..record },
            RemoteDrawing::Server(drawing) => {
                DrawingRecord::new(id, drawing.kind, drawing.geometry(candles)?)
            }
        };
        record.validate()?;
        Ok(record)
    }
}
