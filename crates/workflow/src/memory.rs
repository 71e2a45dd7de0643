//! In-memory collaborator implementations for tests/dev.

use std::sync::Mutex;

use anyhow::anyhow;

use flowdesk_core::{DomainError, DomainResult, EntityId, OrganizationId, UserId};

use crate::rule::{RuleId, WorkflowRule};
use crate::sinks::{EmailSink, MemberDirectory, NotificationSink, RuleStore};

/// Mutex-backed rule store.
#[derive(Debug, Default)]
pub struct InMemoryRuleStore {
    rules: Mutex<Vec<WorkflowRule>>,
}

impl InMemoryRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, rule: WorkflowRule) {
        if let Ok(mut rules) = self.rules.lock() {
            rules.push(rule);
        }
    }

    pub fn remove(&self, id: RuleId) {
        if let Ok(mut rules) = self.rules.lock() {
            rules.retain(|rule| rule.id != id);
        }
    }

    pub fn set_active(&self, id: RuleId, is_active: bool) {
        if let Ok(mut rules) = self.rules.lock() {
            if let Some(rule) = rules.iter_mut().find(|rule| rule.id == id) {
                rule.is_active = is_active;
            }
        }
    }
}

impl RuleStore for InMemoryRuleStore {
    fn active_rules(
        &self,
        organization_id: OrganizationId,
        trigger_entity: &str,
        trigger_event: &str,
    ) -> DomainResult<Vec<WorkflowRule>> {
        let rules = self
            .rules
            .lock()
            .map_err(|_| DomainError::conflict("rule store lock poisoned"))?;
        Ok(rules
            .iter()
            .filter(|rule| {
                rule.is_active
                    && rule.organization_id == organization_id
                    && rule.trigger_entity == trigger_entity
                    && rule.trigger_event == trigger_event
            })
            .cloned()
            .collect())
    }
}

/// Fixed membership list per organization.
#[derive(Debug, Default)]
pub struct InMemoryMemberDirectory {
    members: Mutex<Vec<(OrganizationId, UserId)>>,
}

impl InMemoryMemberDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_member(&self, organization_id: OrganizationId, user_id: UserId) {
        if let Ok(mut members) = self.members.lock() {
            members.push((organization_id, user_id));
        }
    }
}

impl MemberDirectory for InMemoryMemberDirectory {
    fn active_members(&self, organization_id: OrganizationId) -> DomainResult<Vec<UserId>> {
        let members = self
            .members
            .lock()
            .map_err(|_| DomainError::conflict("member directory lock poisoned"))?;
        Ok(members
            .iter()
            .filter(|(org, _)| *org == organization_id)
            .map(|(_, user)| *user)
            .collect())
    }
}

/// A notification recorded by [`InMemoryNotificationSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedNotification {
    pub organization_id: OrganizationId,
    pub user_id: UserId,
    pub title: String,
    pub body: String,
    pub entity_type: String,
    pub entity_id: EntityId,
}

/// Collects notifications instead of persisting them.
#[derive(Debug, Default)]
pub struct InMemoryNotificationSink {
    notifications: Mutex<Vec<RecordedNotification>>,
}

impl InMemoryNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<RecordedNotification> {
        self.notifications
            .lock()
            .map(|mut n| std::mem::take(&mut *n))
            .unwrap_or_default()
    }
}

impl NotificationSink for InMemoryNotificationSink {
    fn create(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
        title: &str,
        body: &str,
        entity_type: &str,
        entity_id: EntityId,
    ) -> anyhow::Result<()> {
        let mut notifications = self
            .notifications
            .lock()
            .map_err(|_| anyhow!("notification sink lock poisoned"))?;
        notifications.push(RecordedNotification {
            organization_id,
            user_id,
            title: title.to_string(),
            body: body.to_string(),
            entity_type: entity_type.to_string(),
            entity_id,
        });
        Ok(())
    }
}

/// An email recorded by [`InMemoryEmailSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Collects outbound email instead of sending it.
#[derive(Debug, Default)]
pub struct InMemoryEmailSink {
    emails: Mutex<Vec<RecordedEmail>>,
}

impl InMemoryEmailSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<RecordedEmail> {
        self.emails
            .lock()
            .map(|mut e| std::mem::take(&mut *e))
            .unwrap_or_default()
    }
}

impl EmailSink for InMemoryEmailSink {
    fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        let mut emails = self
            .emails
            .lock()
            .map_err(|_| anyhow!("email sink lock poisoned"))?;
        emails.push(RecordedEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}
