//! Trigger-condition matching.
//!
//! Permissive by default: an empty condition map always matches, and
//! unrecognized keys are ignored so unknown future condition keys don't
//! silently break existing rules.

use std::collections::BTreeMap;

use tracing::debug;

use flowdesk_events::EntityEvent;

/// Evaluate a rule's conditions against the triggering event.
pub fn matches(conditions: &BTreeMap<String, String>, event: &EntityEvent) -> bool {
    conditions.iter().all(|(key, expected)| {
        let actual = match key.as_str() {
            "old_status" => event.old_value(),
            "new_status" => event.new_value(),
            "entity_type" => Some(event.entity_type()),
            other => {
                debug!(condition = other, "ignoring unrecognized condition key");
                return true;
            }
        };
        actual == Some(expected.as_str())
    })
}
