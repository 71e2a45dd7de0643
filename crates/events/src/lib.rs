//! `flowdesk-events` — domain events and the in-process event bus.

pub mod bus;
pub mod entity_event;

pub use bus::{EventBus, EventSubscriber};
pub use entity_event::{EntityEvent, STATUS_CHANGED};
