use async_trait::async_trait;
use uuid::Uuid;

/// Generic repository trait for deleting multiple entities in a batch
///
/// Deletes are staged on the session's unit of work.
#[async_trait]
pub trait DeleteBatch: Send + Sync {
    /// Stage deletion of multiple items by their IDs
    ///
    /// # Arguments
    /// * `ids` - A slice of UUIDs of the entities to delete
    ///
    /// # Returns
    /// * `Ok(usize)` - The number of deletes staged
    /// * `Err` - An error if the deletes could not be staged
    async fn delete_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<usize, Box<dyn std::error::Error + Send + Sync>>;
}
