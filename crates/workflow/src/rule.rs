use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use flowdesk_core::OrganizationId;

use crate::action::ActionSpec;

/// Workflow rule identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(Uuid);

impl RuleId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for RuleId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for RuleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// An organization-defined trigger/condition/action automation.
///
/// Rules are authored by organization admins and read-only at evaluation
/// time; the engine never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRule {
    pub id: RuleId,
    pub organization_id: OrganizationId,
    pub name: String,
    /// Entity tag this rule listens to (e.g. `"invoice"`).
    pub trigger_entity: String,
    /// Event type this rule listens to (e.g. `"status_changed"`).
    pub trigger_event: String,
    /// Key -> expected-value conditions. Empty means "always matches";
    /// unrecognized keys are ignored.
    pub trigger_conditions: BTreeMap<String, String>,
    /// Executed in array order on match.
    pub actions: Vec<ActionSpec>,
    /// Lower runs first; ties break by `created_at`, then id.
    pub execution_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl WorkflowRule {
    pub fn new(
        organization_id: OrganizationId,
        name: impl Into<String>,
        trigger_entity: impl Into<String>,
        trigger_event: impl Into<String>,
    ) -> Self {
        Self {
            id: RuleId::new(),
            organization_id,
            name: name.into(),
            trigger_entity: trigger_entity.into(),
            trigger_event: trigger_event.into(),
            trigger_conditions: BTreeMap::new(),
            actions: Vec::new(),
            execution_order: 0,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn with_condition(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.trigger_conditions.insert(key.into(), value.into());
        self
    }

    pub fn with_action(mut self, action: ActionSpec) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_execution_order(mut self, order: i32) -> Self {
        self.execution_order = order;
        self
    }

    /// Stable sort key for multi-rule evaluation.
    pub fn ordering_key(&self) -> (i32, DateTime<Utc>, RuleId) {
        (self.execution_order, self.created_at, self.id)
    }
}
