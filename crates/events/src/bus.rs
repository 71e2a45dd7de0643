//! Synchronous in-process event bus.
//!
//! Delivery is synchronous, in registration order, within the same unit of
//! work as the state change that produced the event. No queuing, no
//! cross-process delivery, no retry. A subscriber error is logged and never
//! reaches the publisher; the workflow engine contains its own failures at
//! the per-rule boundary.

use std::sync::Arc;

use tracing::warn;

use crate::entity_event::EntityEvent;

/// A consumer of entity events.
///
/// Errors returned here are contained by the bus; they must only describe
/// best-effort side effects, never the correctness of the committed state.
pub trait EventSubscriber: Send + Sync {
    /// Stable subscriber name, used in contained-failure logs.
    fn name(&self) -> &'static str;

    fn on_event(&self, event: &EntityEvent) -> anyhow::Result<()>;
}

/// Ordered list of subscribers, registered at startup.
///
/// Kept as a plain vector so tests can assemble a bus with whatever
/// subscribers they need.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Arc<dyn EventSubscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: Arc<dyn EventSubscriber>) {
        self.subscribers.push(subscriber);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Deliver `event` to every subscriber in registration order.
    ///
    /// Never fails: subscriber errors are logged and swallowed so best-effort
    /// automation cannot fail the triggering transaction.
    pub fn publish(&self, event: &EntityEvent) {
        for subscriber in &self.subscribers {
            if let Err(err) = subscriber.on_event(event) {
                warn!(
                    subscriber = subscriber.name(),
                    entity_type = event.entity_type(),
                    event_type = event.event_type(),
                    entity_id = %event.entity_id(),
                    error = %err,
                    "event subscriber failed; continuing"
                );
            }
        }
    }
}

impl core::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
