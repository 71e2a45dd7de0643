//! `flowdesk-lifecycle` — per-document-kind status state machines.
//!
//! The transition tables are static configuration versioned with the code.
//! They are plain `match` data behind [`StatusMachine::allowed_targets`], so
//! concurrent readers need no locking.

pub mod status;
pub mod transitions;

pub use status::{
    ContractStatus, DocumentKind, InboundRequestStatus, InvoiceStatus, PayoutStatus,
    ProjectStatus, QuoteStatus,
};
pub use transitions::{StatusMachine, validate_transition};
