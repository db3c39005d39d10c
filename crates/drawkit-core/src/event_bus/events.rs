//! Event categories and the contract events must satisfy to travel on a bus.

use serde::{Deserialize, Serialize};

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Document-level properties such as name, units or grid.
    Property,
    /// View transform changes: scale and scrolling.
    View,
    /// Interaction mode changes.
    Mode,
    /// Selection and place-item changes.
    Selection,
    /// Pointer position feedback.
    Mouse,
    /// Item geometry or item list changes.
    Items,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Property => write!(f, "Property"),
            EventCategory::View => write!(f, "View"),
            EventCategory::Mode => write!(f, "Mode"),
            EventCategory::Selection => write!(f, "Selection"),
            EventCategory::Mouse => write!(f, "Mouse"),
            EventCategory::Items => write!(f, "Items"),
        }
    }
}

/// An event that can be published on an [`EventBus`](super::EventBus).
pub trait BusEvent: Clone + Send + Sync + 'static {
    /// Category used by subscription filters.
    fn category(&self) -> EventCategory;

    /// Short description for logging.
    fn description(&self) -> String;
}
