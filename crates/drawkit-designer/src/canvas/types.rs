//! Canvas type definitions: Mode, SelectState, MouseEvent, CanvasEvent, CanvasSettings.

use std::fmt;

use drawkit_core::constants::{
    DRAG_THRESHOLD_PX, HANDLE_SIZE_PX, MIN_HIT_PEN_WIDTH_PX, PAN_INTERVAL_MS, ZOOM_STEP,
};
use drawkit_core::{BusEvent, EventCategory};
use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::model::ItemId;

/// Interaction mode of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Select,
    Scroll,
    Zoom,
    Place,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Select => write!(f, "select"),
            Mode::Scroll => write!(f, "scroll"),
            Mode::Zoom => write!(f, "zoom"),
            Mode::Place => write!(f, "place"),
        }
    }
}

/// Sub-state of a left-button gesture in select mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectState {
    #[default]
    Idle,
    /// Pressed, not yet dragged past the threshold.
    Select,
    MoveItems,
    ResizeItem,
    RubberBand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Keyboard modifiers held during a mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Additive selection; zoom with the wheel.
    pub ctrl: bool,
    /// 45° snapping while resizing; horizontal wheel scrolling.
    pub shift: bool,
}

/// A mouse event in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub position: Point,
    /// Button pressed or released; for moves, the button held, if any.
    pub button: Option<MouseButton>,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    pub fn new(position: Point, button: Option<MouseButton>) -> Self {
        Self {
            position,
            button,
            modifiers: Modifiers::default(),
        }
    }

    pub fn left(position: Point) -> Self {
        Self::new(position, Some(MouseButton::Left))
    }

    pub fn hover(position: Point) -> Self {
        Self::new(position, None)
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }
}

/// Notifications published by the canvas on its event bus.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// A page property changed; `value` is its serialized form.
    PropertyChanged {
        name: String,
        value: serde_json::Value,
    },
    ScaleChanged(f64),
    ModeChanged(Mode),
    /// The selection, or in place mode the items being placed.
    CurrentItemsChanged(Vec<ItemId>),
    /// Position feedback; empty when a gesture ends.
    MouseInfoChanged(String),
    /// Item geometry was committed or the item list changed.
    ItemsChanged,
}

impl BusEvent for CanvasEvent {
    fn category(&self) -> EventCategory {
        match self {
            CanvasEvent::PropertyChanged { .. } => EventCategory::Property,
            CanvasEvent::ScaleChanged(_) => EventCategory::View,
            CanvasEvent::ModeChanged(_) => EventCategory::Mode,
            CanvasEvent::CurrentItemsChanged(_) => EventCategory::Selection,
            CanvasEvent::MouseInfoChanged(_) => EventCategory::Mouse,
            CanvasEvent::ItemsChanged => EventCategory::Items,
        }
    }

    fn description(&self) -> String {
        match self {
            CanvasEvent::PropertyChanged { name, value } => format!("{} = {}", name, value),
            CanvasEvent::ScaleChanged(scale) => format!("scale {:.4}", scale),
            CanvasEvent::ModeChanged(mode) => format!("mode {}", mode),
            CanvasEvent::CurrentItemsChanged(ids) => format!("{} current item(s)", ids.len()),
            CanvasEvent::MouseInfoChanged(text) => format!("mouse info '{}'", text),
            CanvasEvent::ItemsChanged => "items changed".to_string(),
        }
    }
}

/// Interaction tuning, in view pixels unless noted.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasSettings {
    /// Manhattan distance a press must travel before it becomes a drag.
    pub drag_threshold_px: f64,
    /// Pens thinner than this are widened for hit-testing.
    pub min_hit_pen_width_px: f64,
    pub handle_size_px: f64,
    /// Interval the host should use between pan ticks, in milliseconds.
    pub pan_interval_ms: u64,
    pub zoom_step: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            drag_threshold_px: DRAG_THRESHOLD_PX,
            min_hit_pen_width_px: MIN_HIT_PEN_WIDTH_PX,
            handle_size_px: HANDLE_SIZE_PX,
            pan_interval_ms: PAN_INTERVAL_MS,
            zoom_step: ZOOM_STEP,
        }
    }
}
