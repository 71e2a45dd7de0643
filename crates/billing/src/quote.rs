use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use flowdesk_core::{DomainResult, EntityId, OrganizationId};
use flowdesk_events::EntityEvent;
use flowdesk_lifecycle::{DocumentKind, QuoteStatus, StatusMachine};

use crate::line_item::LineItem;
use crate::recalculate::{DocumentTotals, recalculate};

/// Quote document aggregate.
///
/// Status changes go through the transition validator; totals are only ever
/// written by the recalculation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    id: EntityId,
    organization_id: OrganizationId,
    status: QuoteStatus,
    totals: DocumentTotals,
}

impl Quote {
    pub fn new(id: EntityId, organization_id: OrganizationId) -> Self {
        Self {
            id,
            organization_id,
            status: QuoteStatus::Draft,
            totals: DocumentTotals::ZERO,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    pub fn status(&self) -> QuoteStatus {
        self.status
    }

    pub fn totals(&self) -> DocumentTotals {
        self.totals
    }

    pub fn is_editable(&self) -> bool {
        matches!(self.status, QuoteStatus::Draft)
    }

    /// Recompute line totals and document aggregates from `items`.
    pub fn recalculate(&mut self, items: &mut [LineItem]) -> DomainResult<()> {
        self.totals = recalculate(items)?;
        Ok(())
    }

    /// Move the quote to `next`, returning the `status_changed` event to
    /// publish once the mutation is persisted. `None` means the transition
    /// was a no-op.
    pub fn transition(
        &mut self,
        next: QuoteStatus,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<Option<EntityEvent>> {
        self.status.validate_transition(next)?;
        if self.status == next {
            return Ok(None);
        }

        let old = self.status;
        self.status = next;

        Ok(Some(EntityEvent::status_changed(
            DocumentKind::Quote,
            self.id,
            self.organization_id,
            old.as_str(),
            next.as_str(),
            serde_json::to_value(&*self).unwrap_or(serde_json::Value::Null),
            occurred_at,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn test_quote() -> Quote {
        Quote::new(EntityId::new(), OrganizationId::new())
    }

    #[test]
    fn new_quote_is_an_editable_draft() {
        let quote = test_quote();
        assert_eq!(quote.status(), QuoteStatus::Draft);
        assert!(quote.is_editable());
        assert_eq!(quote.totals(), DocumentTotals::ZERO);
    }

    #[test]
    fn legal_transition_emits_status_changed_event() {
        let mut quote = test_quote();
        let event = quote
            .transition(QuoteStatus::Sent, Utc::now())
            .unwrap()
            .expect("draft -> sent changes state");

        assert_eq!(quote.status(), QuoteStatus::Sent);
        assert_eq!(event.entity_type(), "quote");
        assert_eq!(event.old_value(), Some("draft"));
        assert_eq!(event.new_value(), Some("sent"));
        assert_eq!(event.entity_id(), quote.id());
    }

    #[test]
    fn self_transition_is_a_silent_no_op() {
        let mut quote = test_quote();
        let event = quote.transition(QuoteStatus::Draft, Utc::now()).unwrap();
        assert!(event.is_none());
        assert_eq!(quote.status(), QuoteStatus::Draft);
    }

    #[test]
    fn illegal_transition_leaves_status_untouched() {
        let mut quote = test_quote();
        let err = quote
            .transition(QuoteStatus::Converted, Utc::now())
            .unwrap_err();
        assert!(matches!(
            err,
            flowdesk_core::DomainError::InvalidTransition { .. }
        ));
        assert_eq!(quote.status(), QuoteStatus::Draft);
    }

    #[test]
    fn full_lifecycle_to_converted() {
        let mut quote = test_quote();
        quote.transition(QuoteStatus::Sent, Utc::now()).unwrap();
        quote.transition(QuoteStatus::Approved, Utc::now()).unwrap();
        quote
            .transition(QuoteStatus::Converted, Utc::now())
            .unwrap();
        assert_eq!(quote.status(), QuoteStatus::Converted);
        assert!(quote.status().is_terminal());
    }

    #[test]
    fn recalculate_updates_totals() {
        let mut quote = test_quote();
        let mut items = vec![
            LineItem::new("Work", dec("2"), dec("100.00"), 1)
                .with_discount_percent(dec("10"))
                .with_tax_rate(dec("8")),
        ];

        quote.recalculate(&mut items).unwrap();

        assert_eq!(quote.totals().subtotal, dec("200.00"));
        assert_eq!(quote.totals().total, dec("194.40"));
    }
}
