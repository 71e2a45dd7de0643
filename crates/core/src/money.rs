//! Fixed-point money helpers.
//!
//! All monetary arithmetic uses `rust_decimal::Decimal`. Rounding happens at
//! well-defined points (per-line discount and tax) with half-up semantics so
//! recomputed totals are reproducible. Floating point must not appear on any
//! money path.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to 2 decimal places, half-up (0.005 rounds away from zero).
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `value * percent / 100`, rounded to 2 decimal places half-up.
///
/// Used for percent discounts and tax rates, which round per line before
/// aggregation.
pub fn percent_of(value: Decimal, percent: Decimal) -> Decimal {
    round2(value * percent / Decimal::ONE_HUNDRED)
}
