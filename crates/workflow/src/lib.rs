//! `flowdesk-workflow` — organization-defined automation rules.
//!
//! The engine is a stateless evaluator per event: fetch active rules for the
//! event's `(organization, entity, event)` key, match conditions, execute
//! actions. Everything here is best-effort automation layered on top of a
//! committed state change; nothing in this crate may fail the triggering
//! transaction.

pub mod action;
pub mod conditions;
pub mod engine;
pub mod memory;
pub mod rule;
pub mod sinks;
pub mod template;

pub use action::ActionSpec;
pub use engine::WorkflowEngine;
pub use rule::{RuleId, WorkflowRule};
pub use sinks::{EmailSink, MemberDirectory, NotificationSink, RuleStore};
