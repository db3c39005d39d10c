//! # Drawkit Core
//!
//! Core types and utilities shared by the Drawkit crates:
//! length units, error types, interaction constants and the
//! publish/subscribe event bus used by the canvas to report state changes.

pub mod constants;
pub mod error;
pub mod event_bus;
pub mod grid;
pub mod units;

pub use error::{Error, Result};

pub use event_bus::{
    BusEvent, EventBus, EventBusConfig, EventCategory, EventFilter, SubscriptionId,
};

pub use grid::GridStyle;
pub use units::Unit;
