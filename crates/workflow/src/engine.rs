//! Rule evaluation and action execution.

use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, info, warn};

use flowdesk_events::{EntityEvent, EventSubscriber};

use crate::action::ActionSpec;
use crate::conditions;
use crate::rule::WorkflowRule;
use crate::sinks::{EmailSink, MemberDirectory, NotificationSink, RuleStore};
use crate::template;

/// Stateless per-event rule evaluator.
///
/// Registered on the event bus at startup; runs synchronously inside the unit
/// of work that produced the event. Each rule's execution is isolated: a
/// failure in one rule is logged and the next rule still runs, so a
/// misconfigured rule can never block a status change.
pub struct WorkflowEngine {
    rules: Arc<dyn RuleStore>,
    members: Arc<dyn MemberDirectory>,
    notifications: Arc<dyn NotificationSink>,
    email: Arc<dyn EmailSink>,
}

impl WorkflowEngine {
    pub fn new(
        rules: Arc<dyn RuleStore>,
        members: Arc<dyn MemberDirectory>,
        notifications: Arc<dyn NotificationSink>,
        email: Arc<dyn EmailSink>,
    ) -> Self {
        Self {
            rules,
            members,
            notifications,
            email,
        }
    }

    fn run_rules(&self, event: &EntityEvent) -> anyhow::Result<()> {
        let mut rules = self
            .rules
            .active_rules(event.organization_id(), event.entity_type(), event.event_type())
            .context("failed to load workflow rules")?;

        // Lower execution_order runs first; ties break by creation order.
        rules.sort_by_key(WorkflowRule::ordering_key);

        for rule in &rules {
            if !conditions::matches(&rule.trigger_conditions, event) {
                debug!(rule = %rule.id, rule_name = %rule.name, "rule conditions did not match");
                continue;
            }

            if let Err(err) = self.execute_rule(rule, event) {
                warn!(
                    rule = %rule.id,
                    rule_name = %rule.name,
                    error = %err,
                    "workflow rule failed; continuing with remaining rules"
                );
            }
        }

        Ok(())
    }

    fn execute_rule(&self, rule: &WorkflowRule, event: &EntityEvent) -> anyhow::Result<()> {
        for action in &rule.actions {
            self.execute_action(rule, action, event)?;
        }
        Ok(())
    }

    fn execute_action(
        &self,
        rule: &WorkflowRule,
        action: &ActionSpec,
        event: &EntityEvent,
    ) -> anyhow::Result<()> {
        match action {
            ActionSpec::SendNotification {
                title,
                body,
                target,
            } => {
                if target != "all" {
                    warn!(
                        rule = %rule.id,
                        target = %target,
                        "unsupported notification target; skipping action"
                    );
                    return Ok(());
                }

                let title = template::render(title, event);
                let body = template::render(body, event);
                let members = self
                    .members
                    .active_members(event.organization_id())
                    .context("failed to load organization members")?;

                for user_id in members {
                    self.notifications
                        .create(
                            event.organization_id(),
                            user_id,
                            &title,
                            &body,
                            event.entity_type(),
                            event.entity_id(),
                        )
                        .context("failed to store notification")?;
                }
            }
            ActionSpec::SendEmail { to, subject, body } => {
                let subject = template::render(subject, event);
                let body = template::render(body, event);
                // Email is best-effort: a delivery failure is logged and the
                // rule's remaining actions still run.
                if let Err(err) = self.email.send(to, &subject, &body) {
                    warn!(rule = %rule.id, to = %to, error = %err, "email send failed");
                }
            }
            ActionSpec::Log { message } => {
                info!(
                    rule = %rule.id,
                    entity_type = event.entity_type(),
                    entity_id = %event.entity_id(),
                    "{}",
                    template::render(message, event)
                );
            }
            ActionSpec::Unknown => {
                warn!(rule = %rule.id, "unknown action type; skipping");
            }
        }
        Ok(())
    }
}

impl EventSubscriber for WorkflowEngine {
    fn name(&self) -> &'static str {
        "workflow-engine"
    }

    fn on_event(&self, event: &EntityEvent) -> anyhow::Result<()> {
        self.run_rules(event)
    }
}
