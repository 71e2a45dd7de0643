//! `flowdesk-bulk` — apply one lifecycle operation to many documents with
//! per-item failure isolation.

pub mod executor;

pub use executor::{BulkFailure, BulkOperationResult, bulk_apply};
