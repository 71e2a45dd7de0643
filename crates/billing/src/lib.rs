//! `flowdesk-billing` — line items, deterministic total recomputation, and
//! the Quote/Invoice document aggregates.
//!
//! `line_total` and the document aggregates are derived values: they are only
//! ever written by the recalculation engine, never taken from a caller.

pub mod invoice;
pub mod line_item;
pub mod quote;
pub mod recalculate;

pub use invoice::Invoice;
pub use line_item::LineItem;
pub use quote::Quote;
pub use recalculate::{DocumentTotals, recalculate};
