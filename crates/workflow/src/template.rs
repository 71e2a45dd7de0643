//! `{{field}}` substitution against a triggering event.

use flowdesk_events::EntityEvent;

/// Resolve `{{field}}` placeholders in `template` from `event`.
///
/// Supported fields: `entity_type`, `event_type`, `entity_id`, `old_value`,
/// `new_value`. Unknown placeholders are left as-is so a typo in a rule is
/// visible in the delivered text instead of silently vanishing.
pub fn render(template: &str, event: &EntityEvent) -> String {
    let entity_id = event.entity_id().to_string();
    template
        .replace("{{entity_type}}", event.entity_type())
        .replace("{{event_type}}", event.event_type())
        .replace("{{entity_id}}", &entity_id)
        .replace("{{old_value}}", event.old_value().unwrap_or(""))
        .replace("{{new_value}}", event.new_value().unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use flowdesk_core::{EntityId, OrganizationId};

    fn test_event() -> EntityEvent {
        EntityEvent::new(
            "invoice",
            "status_changed",
            EntityId::new(),
            OrganizationId::new(),
            Some("draft".into()),
            Some("sent".into()),
            serde_json::json!({}),
            Utc::now(),
        )
    }

    #[test]
    fn substitutes_all_supported_fields() {
        let event = test_event();
        let rendered = render(
            "{{entity_type}} {{entity_id}}: {{old_value}} -> {{new_value}} ({{event_type}})",
            &event,
        );
        assert_eq!(
            rendered,
            format!("invoice {}: draft -> sent (status_changed)", event.entity_id())
        );
    }

    #[test]
    fn unknown_placeholders_are_left_verbatim() {
        let rendered = render("hello {{nobody}}", &test_event());
        assert_eq!(rendered, "hello {{nobody}}");
    }

    #[test]
    fn missing_values_render_empty() {
        let event = EntityEvent::new(
            "invoice",
            "created",
            EntityId::new(),
            OrganizationId::new(),
            None,
            None,
            serde_json::json!({}),
            Utc::now(),
        );
        assert_eq!(render("[{{old_value}}|{{new_value}}]", &event), "[|]");
    }
}
