//! Gesture state machines shared by every drawing kind.
//!
//! A single [`Gesture`] is active at a time. Per-kind behavior lives in
//! [`strategy`], the controllers here only keep gesture bookkeeping.

pub mod create;
pub mod drag;
pub mod resize;
pub mod strategy;

mod fib;
mod line;
mod position;
mod rect;
mod ruler;

pub use create::{CreateGesture, CreateMode};
pub use drag::{DragController, DragGesture};
pub use resize::{ResizeController, ResizeGesture};
pub use strategy::{strategy_for, DrawingStrategy};

use crate::data_types::DrawingId;
use gpui::{CursorStyle, Modifiers};

/// The one gesture in flight.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging(DragGesture),
    Resizing(ResizeGesture),
    Creating(CreateGesture),
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Gesture::Resizing(_))
    }

    /// Drawing whose geometry the gesture owns.
    pub fn target(&self) -> Option<DrawingId> {
        match self {
            Gesture::Dragging(g) => Some(g.id),
            Gesture::Resizing(g) => Some(g.id),
            Gesture::Idle | Gesture::Creating(_) => None,
        }
    }

    /// Drag, resize and click-drag creation suspend chart pan/zoom until
    /// pointer-up.
    pub fn locks_viewport(&self) -> bool {
        match self {
            Gesture::Dragging(_) | Gesture::Resizing(_) => true,
            Gesture::Creating(create) => create.mode == CreateMode::ClickDrag,
            Gesture::Idle => false,
        }
    }
}

/// Keyboard state read live while resizing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResizeModifiers {
    /// Ctrl or Cmd: snap the price to OHLC.
    pub snap: bool,
    /// Shift: keep a line horizontal.
    pub constrain: bool,
}

impl From<&Modifiers> for ResizeModifiers {
    fn from(m: &Modifiers) -> Self {
        Self {
            snap: m.control || m.platform,
            constrain: m.shift,
        }
    }
}

impl From<Modifiers> for ResizeModifiers {
    fn from(m: Modifiers) -> Self {
        Self::from(&m)
    }
}

/// Pointer feedback, computed once per move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawingCursor {
    #[default]
    Default,
    Crosshair,
    /// Over a drawing body that can be selected.
    Pointer,
    /// Over a draggable body.
    Grab,
    Grabbing,
    ResizeHorizontal,
    ResizeVertical,
    ResizeDiagonal,
    ResizeAntiDiagonal,
}

impl From<DrawingCursor> for CursorStyle {
    fn from(cursor: DrawingCursor) -> Self {
        match cursor {
            DrawingCursor::Default => CursorStyle::Arrow,
            DrawingCursor::Crosshair => CursorStyle::Crosshair,
            DrawingCursor::Pointer => CursorStyle::PointingHand,
            DrawingCursor::Grab => CursorStyle::OpenHand,
            DrawingCursor::Grabbing => CursorStyle::ClosedHand,
            DrawingCursor::ResizeHorizontal => CursorStyle::ResizeLeftRight,
            DrawingCursor::ResizeVertical => CursorStyle::ResizeUpDown,
            DrawingCursor::ResizeDiagonal => CursorStyle::ResizeUpLeftDownRight,
            DrawingCursor::ResizeAntiDiagonal => CursorStyle::ResizeUpRightDownLeft,
        }
    }
}
