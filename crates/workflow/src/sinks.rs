//! Collaborator seams: rule storage, organization membership, and the
//! notification/email sinks invoked by actions.
//!
//! Sinks are best-effort: their errors carry context (`anyhow`) but are
//! contained at the rule boundary and never surfaced to the caller of the
//! triggering mutation.

use flowdesk_core::{DomainResult, EntityId, OrganizationId, UserId};

use crate::rule::WorkflowRule;

/// Loads automation rules for evaluation.
pub trait RuleStore: Send + Sync {
    /// Active rules for `(organization, entity tag, event type)`.
    ///
    /// Ordering is not required here; the engine sorts by execution order.
    fn active_rules(
        &self,
        organization_id: OrganizationId,
        trigger_entity: &str,
        trigger_event: &str,
    ) -> DomainResult<Vec<WorkflowRule>>;
}

/// Resolves the active members of an organization (notification fan-out).
pub trait MemberDirectory: Send + Sync {
    fn active_members(&self, organization_id: OrganizationId) -> DomainResult<Vec<UserId>>;
}

/// In-app notification store.
pub trait NotificationSink: Send + Sync {
    fn create(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
        title: &str,
        body: &str,
        entity_type: &str,
        entity_id: EntityId,
    ) -> anyhow::Result<()>;
}

/// Outbound email dispatch.
pub trait EmailSink: Send + Sync {
    fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}
