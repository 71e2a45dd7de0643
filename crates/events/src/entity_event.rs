use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use flowdesk_core::{EntityId, OrganizationId};
use flowdesk_lifecycle::DocumentKind;

/// Event type emitted when a document's lifecycle status changes.
pub const STATUS_CHANGED: &str = "status_changed";

/// Immutable record of a state-changing operation on one entity.
///
/// Produced once per mutation, published after the mutation is persisted, and
/// consumed synchronously by the workflow engine in the same unit of work.
/// `payload` is the full post-mutation entity, opaque to the bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityEvent {
    entity_type: String,
    event_type: String,
    entity_id: EntityId,
    organization_id: OrganizationId,
    old_value: Option<String>,
    new_value: Option<String>,
    payload: serde_json::Value,
    occurred_at: DateTime<Utc>,
}

impl EntityEvent {
    pub fn new(
        entity_type: impl Into<String>,
        event_type: impl Into<String>,
        entity_id: EntityId,
        organization_id: OrganizationId,
        old_value: Option<String>,
        new_value: Option<String>,
        payload: serde_json::Value,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            entity_type: entity_type.into(),
            event_type: event_type.into(),
            entity_id,
            organization_id,
            old_value,
            new_value,
            payload,
            occurred_at,
        }
    }

    /// Convenience constructor for the one event type the core produces.
    pub fn status_changed(
        kind: DocumentKind,
        entity_id: EntityId,
        organization_id: OrganizationId,
        old_status: &str,
        new_status: &str,
        payload: serde_json::Value,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self::new(
            kind.as_str(),
            STATUS_CHANGED,
            entity_id,
            organization_id,
            Some(old_status.to_string()),
            Some(new_status.to_string()),
            payload,
            occurred_at,
        )
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    pub fn old_value(&self) -> Option<&str> {
        self.old_value.as_deref()
    }

    pub fn new_value(&self) -> Option<&str> {
        self.new_value.as_deref()
    }

    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_changed_carries_kind_tag_and_values() {
        let event = EntityEvent::status_changed(
            DocumentKind::Invoice,
            EntityId::new(),
            OrganizationId::new(),
            "draft",
            "sent",
            serde_json::json!({"number": "INV-1"}),
            Utc::now(),
        );

        assert_eq!(event.entity_type(), "invoice");
        assert_eq!(event.event_type(), STATUS_CHANGED);
        assert_eq!(event.old_value(), Some("draft"));
        assert_eq!(event.new_value(), Some("sent"));
        assert_eq!(event.payload()["number"], "INV-1");
    }
}
