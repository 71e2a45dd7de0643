//! Deterministic recomputation of line totals and document aggregates.
//!
//! Rounding happens per line (discount, then tax, half-up to 2 dp) and the
//! rounded components are summed. Aggregating first and rounding once would
//! produce different totals, so the per-line order is load-bearing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use flowdesk_core::{DomainResult, money::percent_of};

use crate::line_item::LineItem;

/// Derived monetary aggregates of a quote or invoice.
///
/// Invariant after every recompute: `total == subtotal - discount_amount +
/// tax_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocumentTotals {
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

impl DocumentTotals {
    pub const ZERO: DocumentTotals = DocumentTotals {
        subtotal: Decimal::ZERO,
        discount_amount: Decimal::ZERO,
        tax_amount: Decimal::ZERO,
        total: Decimal::ZERO,
    };
}

impl Default for DocumentTotals {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Recompute every `line_total` and the document aggregates.
///
/// Pure function of its inputs; persisting the deltas is the caller's
/// responsibility. Items are processed in `display_order` (ties broken by
/// item id, so the iteration order is stable). Idempotent: running it twice
/// on unchanged inputs yields identical output.
pub fn recalculate(items: &mut [LineItem]) -> DomainResult<DocumentTotals> {
    for item in items.iter() {
        item.validate()?;
    }

    items.sort_by_key(|item| (item.display_order, item.id));

    let mut subtotal = Decimal::ZERO;
    let mut discount_amount = Decimal::ZERO;
    let mut tax_amount = Decimal::ZERO;

    for item in items.iter_mut() {
        let gross = item.quantity * item.unit_price;
        let discount_from_percent = percent_of(gross, item.discount_percent);
        let after_discount = gross - discount_from_percent - item.discount_amount;
        let tax = percent_of(after_discount, item.tax_rate);
        item.line_total = after_discount + tax;

        subtotal += gross;
        discount_amount += discount_from_percent + item.discount_amount;
        tax_amount += tax;
    }

    Ok(DocumentTotals {
        subtotal,
        discount_amount,
        tax_amount,
        total: subtotal - discount_amount + tax_amount,
    })
}
