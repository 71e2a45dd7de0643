//! End-to-end pipeline: document mutation -> transition validator ->
//! recalculation -> event publication -> workflow rule execution -> sinks.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use flowdesk_billing::{Invoice, LineItem};
use flowdesk_core::{EntityId, OrganizationId, UserId};
use flowdesk_events::EventBus;
use flowdesk_lifecycle::InvoiceStatus;
use flowdesk_workflow::memory::{
    InMemoryEmailSink, InMemoryMemberDirectory, InMemoryNotificationSink, InMemoryRuleStore,
};
use flowdesk_workflow::{ActionSpec, WorkflowEngine, WorkflowRule};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

struct Harness {
    org: OrganizationId,
    rules: Arc<InMemoryRuleStore>,
    members: Arc<InMemoryMemberDirectory>,
    notifications: Arc<InMemoryNotificationSink>,
    email: Arc<InMemoryEmailSink>,
    bus: EventBus,
}

fn harness() -> Harness {
    flowdesk_observability::init();

    let org = OrganizationId::new();
    let rules = Arc::new(InMemoryRuleStore::new());
    let members = Arc::new(InMemoryMemberDirectory::new());
    let notifications = Arc::new(InMemoryNotificationSink::new());
    let email = Arc::new(InMemoryEmailSink::new());

    let engine = WorkflowEngine::new(
        rules.clone(),
        members.clone(),
        notifications.clone(),
        email.clone(),
    );
    let mut bus = EventBus::new();
    bus.subscribe(Arc::new(engine));

    Harness {
        org,
        rules,
        members,
        notifications,
        email,
        bus,
    }
}

#[test]
fn sending_an_invoice_triggers_matching_rules() {
    let h = harness();
    let user = UserId::new();
    h.members.add_member(h.org, user);
    h.rules.insert(
        WorkflowRule::new(h.org, "notify on send", "invoice", "status_changed")
            .with_condition("new_status", "sent")
            .with_action(ActionSpec::SendNotification {
                title: "Invoice sent".into(),
                body: "Invoice {{entity_id}} is now {{new_value}}".into(),
                target: "all".into(),
            }),
    );

    let mut invoice = Invoice::new(EntityId::new(), h.org);
    let mut items = vec![
        LineItem::new("Consulting", dec("2"), dec("100.00"), 1)
            .with_discount_percent(dec("10"))
            .with_tax_rate(dec("8")),
    ];
    invoice.recalculate(&mut items, Utc::now()).unwrap();
    assert_eq!(invoice.totals().total, dec("194.40"));

    // Validator approves the edge, persistence is the caller's concern,
    // then the event is published in the same unit of work.
    let event = invoice
        .transition(InvoiceStatus::Sent, Utc::now())
        .unwrap()
        .expect("draft -> sent produces an event");
    h.bus.publish(&event);

    let sent = h.notifications.drain();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].user_id, user);
    assert_eq!(
        sent[0].body,
        format!("Invoice {} is now sent", invoice.id())
    );
}

#[test]
fn payment_driven_status_change_flows_through_the_same_pipeline() {
    let h = harness();
    h.rules.insert(
        WorkflowRule::new(h.org, "email on paid", "invoice", "status_changed")
            .with_condition("new_status", "paid")
            .with_action(ActionSpec::SendEmail {
                to: "finance@example.com".into(),
                subject: "Invoice {{entity_id}} paid".into(),
                body: "{{old_value}} -> {{new_value}}".into(),
            }),
    );

    let mut invoice = Invoice::new(EntityId::new(), h.org);
    let mut items = vec![LineItem::new("Retainer", dec("1"), dec("500.00"), 1)];
    invoice.recalculate(&mut items, Utc::now()).unwrap();

    if let Some(event) = invoice.transition(InvoiceStatus::Sent, Utc::now()).unwrap() {
        h.bus.publish(&event);
    }
    assert!(h.email.drain().is_empty());

    let event = invoice
        .record_payment(dec("500.00"), Utc::now())
        .unwrap()
        .expect("full payment forces sent -> paid");
    h.bus.publish(&event);

    let sent = h.email.drain();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "finance@example.com");
    assert_eq!(sent[0].body, "sent -> paid");
    assert_eq!(invoice.balance_due(), dec("0.00"));
}

#[test]
fn broken_rule_cannot_block_the_mutation_or_sibling_rules() {
    let h = harness();
    let user = UserId::new();
    h.members.add_member(h.org, user);

    // First rule targets an unsupported audience and is skipped; the second
    // still fires. Neither can fail the publish call.
    h.rules.insert(
        WorkflowRule::new(h.org, "misconfigured", "invoice", "status_changed")
            .with_execution_order(1)
            .with_action(ActionSpec::Unknown),
    );
    h.rules.insert(
        WorkflowRule::new(h.org, "healthy", "invoice", "status_changed")
            .with_execution_order(2)
            .with_action(ActionSpec::SendNotification {
                title: "{{entity_type}} update".into(),
                body: "now {{new_value}}".into(),
                target: "all".into(),
            }),
    );

    let mut invoice = Invoice::new(EntityId::new(), h.org);
    let event = invoice
        .transition(InvoiceStatus::Sent, Utc::now())
        .unwrap()
        .unwrap();
    h.bus.publish(&event);

    assert_eq!(invoice.status(), InvoiceStatus::Sent);
    let sent = h.notifications.drain();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "invoice update");
}
