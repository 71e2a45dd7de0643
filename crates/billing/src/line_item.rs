use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use flowdesk_core::{DomainError, DomainResult, EntityId};

/// One itemized component of a quote or invoice.
///
/// `line_total` is derived; it is mutated only by the recalculation engine.
/// `display_order` defines presentation and recompute iteration order, which
/// must be stable for reproducible rounding aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: EntityId,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// Percent discount, 0..=100, applied before the flat discount.
    pub discount_percent: Decimal,
    /// Flat discount amount, applied after the percent discount.
    pub discount_amount: Decimal,
    pub tax_rate: Decimal,
    pub display_order: i32,
    /// Derived. Never client-authored; always recomputed server-side.
    pub line_total: Decimal,
}

impl LineItem {
    pub fn new(
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
        display_order: i32,
    ) -> Self {
        Self {
            id: EntityId::new(),
            description: description.into(),
            quantity,
            unit_price,
            discount_percent: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            tax_rate: Decimal::ZERO,
            display_order,
            line_total: Decimal::ZERO,
        }
    }

    pub fn with_discount_percent(mut self, percent: Decimal) -> Self {
        self.discount_percent = percent;
        self
    }

    pub fn with_discount_amount(mut self, amount: Decimal) -> Self {
        self.discount_amount = amount;
        self
    }

    pub fn with_tax_rate(mut self, rate: Decimal) -> Self {
        self.tax_rate = rate;
        self
    }

    /// Reject malformed line items before any money math runs.
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity < Decimal::ZERO {
            return Err(DomainError::validation("quantity must not be negative"));
        }
        if self.discount_percent < Decimal::ZERO || self.discount_percent > Decimal::ONE_HUNDRED {
            return Err(DomainError::validation(
                "discount_percent must be between 0 and 100",
            ));
        }
        if self.discount_amount < Decimal::ZERO {
            return Err(DomainError::validation(
                "discount_amount must not be negative",
            ));
        }
        if self.tax_rate < Decimal::ZERO {
            return Err(DomainError::validation("tax_rate must not be negative"));
        }
        Ok(())
    }
}
