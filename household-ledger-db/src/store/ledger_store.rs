use async_trait::async_trait;
use serde_json::Value;

use super::collection::Collection;
use super::field_filter::FieldFilter;
use super::write_op::WriteOp;

/// Contract of the hosted document database backing the ledger.
///
/// The store offers equality queries and atomic multi-document batches.
/// There is no transaction spanning two `write_batch` calls and no isolation
/// from concurrent writers between batches: last write wins.
///
/// # Example
/// ```ignore
/// let unpaid = store
///     .query(Collection::SharedExpenseSplits, &[FieldFilter::boolean("is_paid", false)])
///     .await?;
/// store.write_batch(vec![WriteOp::put(&split)?]).await?;
/// ```
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Find every document of `collection` matching all `filters`
    ///
    /// # Arguments
    /// * `collection` - The collection to search
    /// * `filters` - Field equalities, combined with AND; empty matches everything
    ///
    /// # Returns
    /// * `Ok(Vec<Value>)` - The matching documents, in no particular order
    /// * `Err` - The store could not be reached
    async fn query(
        &self,
        collection: Collection,
        filters: &[FieldFilter],
    ) -> Result<Vec<Value>, Box<dyn std::error::Error + Send + Sync>>;

    /// Apply all operations atomically
    ///
    /// # Arguments
    /// * `operations` - Puts and deletes across any collections
    ///
    /// # Returns
    /// * `Ok(())` - Every operation committed
    /// * `Err` - Nothing committed
    async fn write_batch(
        &self,
        operations: Vec<WriteOp>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
