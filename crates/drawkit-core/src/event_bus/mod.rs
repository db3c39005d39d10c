//! # Event Bus Module
//!
//! A synchronous publish/subscribe bus. Publishers emit typed events without
//! knowing their subscribers; subscribers register a handler together with a
//! category filter. The bus is generic over the event type so each component
//! can publish its own event enum.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use drawkit_core::event_bus::{EventBus, EventCategory, EventFilter};
//!
//! let bus: EventBus<CanvasEvent> = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::View]),
//!     |event| println!("view changed: {}", event.description()),
//! );
//!
//! bus.publish(CanvasEvent::ScaleChanged(2.0));
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
