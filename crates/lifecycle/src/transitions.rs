//! Status transition validation.
//!
//! Pure and stateless. Every mutation path that changes a status field must
//! go through [`StatusMachine::validate_transition`] (or the string-level
//! [`validate_transition`] for untyped callers such as bulk endpoints).

use core::str::FromStr;

use flowdesk_core::{DomainError, DomainResult};

use crate::status::DocumentKind;

/// A per-document-kind status state machine.
///
/// The transition table is static data expressed in `allowed_targets`; a
/// self-transition is implicitly allowed as a no-op.
pub trait StatusMachine: Copy + Eq + Sized + 'static {
    /// The document kind this status belongs to.
    const KIND: DocumentKind;

    /// Allowed distinct targets from this status. Empty means terminal.
    fn allowed_targets(self) -> &'static [Self];

    /// Stable string form of this status (snake_case).
    fn as_str(self) -> &'static str;

    /// A status with no outgoing edges rejects every distinct target.
    fn is_terminal(self) -> bool {
        self.allowed_targets().is_empty()
    }

    fn can_transition_to(self, next: Self) -> bool {
        self == next || self.allowed_targets().contains(&next)
    }

    /// Validate an edge of the transition table.
    ///
    /// `current == next` always succeeds (idempotent no-op).
    fn validate_transition(self, next: Self) -> DomainResult<()> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(DomainError::invalid_transition(
                Self::KIND.as_str(),
                self.as_str(),
                next.as_str(),
            ))
        }
    }
}

/// String-level transition validation for callers holding untyped statuses.
///
/// Unknown status strings fail with `Validation` before any table lookup.
pub fn validate_transition(kind: DocumentKind, from: &str, to: &str) -> DomainResult<()> {
    match kind {
        DocumentKind::Invoice => check::<crate::status::InvoiceStatus>(from, to),
        DocumentKind::Quote => check::<crate::status::QuoteStatus>(from, to),
        DocumentKind::Contract => check::<crate::status::ContractStatus>(from, to),
        DocumentKind::Project => check::<crate::status::ProjectStatus>(from, to),
        DocumentKind::ResourcePayout => check::<crate::status::PayoutStatus>(from, to),
        DocumentKind::InboundRequest => check::<crate::status::InboundRequestStatus>(from, to),
    }
}

fn check<S>(from: &str, to: &str) -> DomainResult<()>
where
    S: StatusMachine + FromStr<Err = DomainError>,
{
    let from = S::from_str(from)?;
    let to = S::from_str(to)?;
    from.validate_transition(to)
}
