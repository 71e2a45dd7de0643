//! Per-item-isolated bulk execution.
//!
//! Each item runs independently, in its own transaction boundary at the
//! persistence layer: one item's failure never aborts the loop or rolls back
//! prior successes. The result always accounts for every input id exactly
//! once.

use serde::{Deserialize, Serialize};
use tracing::debug;

use flowdesk_core::{DomainResult, EntityId};

/// One failed item of a bulk operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkFailure {
    pub id: EntityId,
    pub reason: String,
}

/// Complete accounting of a bulk invocation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BulkOperationResult {
    pub success_count: usize,
    pub failures: Vec<BulkFailure>,
}

impl BulkOperationResult {
    /// Total number of items accounted for.
    pub fn item_count(&self) -> usize {
        self.success_count + self.failures.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Apply `operation` to every id, isolating failures per item.
///
/// The operation is expected to do the full single-document pipeline itself:
/// resolve the entity, verify organization ownership, check the operation's
/// precondition, mutate through the transition validator and recalculation
/// engine, persist, and publish. A `DomainError` for one id becomes a failure
/// entry; remaining ids still run.
pub fn bulk_apply<I, F>(ids: I, mut operation: F) -> BulkOperationResult
where
    I: IntoIterator<Item = EntityId>,
    F: FnMut(EntityId) -> DomainResult<()>,
{
    let mut result = BulkOperationResult::default();

    for id in ids {
        match operation(id) {
            Ok(()) => result.success_count += 1,
            Err(err) => {
                debug!(item = %id, error = %err, "bulk item failed");
                result.failures.push(BulkFailure {
                    id,
                    reason: err.to_string(),
                });
            }
        }
    }

    result
}
