use async_trait::async_trait;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for creating multiple entities in a batch
///
/// Creates are staged on the session's unit of work and become visible only
/// when the session commits, together with every other staged operation, as
/// one atomic Ledger Store batch.
///
/// # Type Parameters
/// * `T` - The entity type that must implement Identifiable trait
///
/// # Example
/// ```ignore
/// impl CreateBatch<SettlementModel> for SettlementRepositoryImpl {
///     async fn create_batch(&self, items: Vec<SettlementModel>) -> Result<Vec<SettlementModel>, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait CreateBatch<T: Identifiable>: Send + Sync {
    /// Stage multiple new items
    ///
    /// # Arguments
    /// * `items` - A vector of entities to create
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - The staged entities
    /// * `Err` - An entity failed validation or could not be encoded
    async fn create_batch(
        &self,
        items: Vec<T>,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
