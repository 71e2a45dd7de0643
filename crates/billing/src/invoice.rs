use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use flowdesk_core::{DomainError, DomainResult, EntityId, OrganizationId};
use flowdesk_events::EntityEvent;
use flowdesk_lifecycle::{DocumentKind, InvoiceStatus, StatusMachine};

use crate::line_item::LineItem;
use crate::recalculate::{DocumentTotals, recalculate};

/// Payment deletion can move status backwards (e.g. a `paid` invoice whose
/// payment was recorded in error). These edges are system corrections, not
/// part of the user-facing transition table, and are only reachable through
/// payment settlement.
const PAYMENT_REVERSALS: &[(InvoiceStatus, InvoiceStatus)] = &[
    (InvoiceStatus::Paid, InvoiceStatus::PartiallyPaid),
    (InvoiceStatus::Paid, InvoiceStatus::Sent),
    (InvoiceStatus::PartiallyPaid, InvoiceStatus::Sent),
];

/// Invoice document aggregate.
///
/// Invariants, re-established after every recompute and payment mutation:
/// `total == subtotal - discount_amount + tax_amount` and
/// `balance_due == total - amount_paid`. Payments require a sent invoice;
/// recording one against a `draft` fails (the caller must send first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    id: EntityId,
    organization_id: OrganizationId,
    status: InvoiceStatus,
    totals: DocumentTotals,
    amount_paid: Decimal,
    balance_due: Decimal,
    paid_at: Option<DateTime<Utc>>,
}

impl Invoice {
    pub fn new(id: EntityId, organization_id: OrganizationId) -> Self {
        Self {
            id,
            organization_id,
            status: InvoiceStatus::Draft,
            totals: DocumentTotals::ZERO,
            amount_paid: Decimal::ZERO,
            balance_due: Decimal::ZERO,
            paid_at: None,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    pub fn status(&self) -> InvoiceStatus {
        self.status
    }

    pub fn totals(&self) -> DocumentTotals {
        self.totals
    }

    pub fn amount_paid(&self) -> Decimal {
        self.amount_paid
    }

    pub fn balance_due(&self) -> Decimal {
        self.balance_due
    }

    pub fn paid_at(&self) -> Option<DateTime<Utc>> {
        self.paid_at
    }

    pub fn is_editable(&self) -> bool {
        matches!(self.status, InvoiceStatus::Draft)
    }

    /// Payments are only accepted once the invoice has been sent.
    pub fn accepts_payments(&self) -> bool {
        matches!(
            self.status,
            InvoiceStatus::Sent | InvoiceStatus::PartiallyPaid | InvoiceStatus::Overdue
        )
    }

    /// Move the invoice to `next` as a caller-requested transition.
    pub fn transition(
        &mut self,
        next: InvoiceStatus,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<Option<EntityEvent>> {
        self.status.validate_transition(next)?;
        Ok(self.set_status(next, occurred_at))
    }

    /// Recompute line totals and document aggregates from `items`, then
    /// re-derive `balance_due` and the payment status.
    ///
    /// A returned event means the recompute forced a status change (e.g. the
    /// total dropped below `amount_paid`).
    pub fn recalculate(
        &mut self,
        items: &mut [LineItem],
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<Option<EntityEvent>> {
        self.totals = recalculate(items)?;
        self.settle_payment_state(occurred_at)
    }

    /// Record a payment of `amount` against the balance due.
    pub fn record_payment(
        &mut self,
        amount: Decimal,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<Option<EntityEvent>> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::validation("payment amount must be positive"));
        }
        if self.status == InvoiceStatus::Draft {
            return Err(DomainError::validation(
                "invoice must be sent before payments are recorded",
            ));
        }
        if !self.accepts_payments() {
            return Err(DomainError::validation(format!(
                "cannot record payment on a {} invoice",
                self.status
            )));
        }
        if self.amount_paid + amount > self.totals.total {
            return Err(DomainError::validation("payment exceeds balance due"));
        }

        self.amount_paid += amount;
        self.settle_payment_state(occurred_at)
    }

    /// Remove a previously recorded payment (e.g. a bounced transfer).
    pub fn delete_payment(
        &mut self,
        amount: Decimal,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<Option<EntityEvent>> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::validation("payment amount must be positive"));
        }
        if amount > self.amount_paid {
            return Err(DomainError::validation(
                "cannot delete more than was paid",
            ));
        }

        self.amount_paid -= amount;
        self.settle_payment_state(occurred_at)
    }

    /// Re-establish `balance_due == total - amount_paid` and derive the
    /// payment status. System-forced transitions still have to be legal
    /// table edges (or a listed payment reversal).
    fn settle_payment_state(
        &mut self,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<Option<EntityEvent>> {
        self.balance_due = self.totals.total - self.amount_paid;

        let derivable = matches!(
            self.status,
            InvoiceStatus::Sent
                | InvoiceStatus::PartiallyPaid
                | InvoiceStatus::Overdue
                | InvoiceStatus::Paid
        );
        if !derivable {
            // Draft and void invoices carry no payment-derived status.
            return Ok(None);
        }

        let desired = if self.amount_paid >= self.totals.total {
            InvoiceStatus::Paid
        } else if self.amount_paid > Decimal::ZERO {
            InvoiceStatus::PartiallyPaid
        } else if self.status == InvoiceStatus::Overdue {
            // An unpaid invoice past its due date stays overdue.
            InvoiceStatus::Overdue
        } else {
            InvoiceStatus::Sent
        };

        if desired == self.status {
            return Ok(None);
        }

        let reversal = PAYMENT_REVERSALS.contains(&(self.status, desired));
        if !reversal {
            self.status.validate_transition(desired)?;
        }

        Ok(self.set_status(desired, occurred_at))
    }

    /// Apply an already-validated status change and build its event.
    fn set_status(
        &mut self,
        next: InvoiceStatus,
        occurred_at: DateTime<Utc>,
    ) -> Option<EntityEvent> {
        if self.status == next {
            return None;
        }

        let old = self.status;
        self.status = next;
        self.paid_at = match next {
            InvoiceStatus::Paid => Some(occurred_at),
            // Voiding a paid invoice keeps the record of when it was paid;
            // only payment reversal moves an invoice out of paid without one.
            InvoiceStatus::Void => self.paid_at,
            _ => None,
        };

        Some(EntityEvent::status_changed(
            DocumentKind::Invoice,
            self.id,
            self.organization_id,
            old.as_str(),
            next.as_str(),
            serde_json::to_value(&*self).unwrap_or(serde_json::Value::Null),
            occurred_at,
        ))
    }
}
