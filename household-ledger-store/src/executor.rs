use household_ledger_db::store::{LedgerStore, WriteOp};
use std::error::Error;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Unit of work shared by the repositories of one session.
///
/// Repository writes only stage operations here. `commit` hands everything
/// staged so far to the store as a single atomic batch, so writes spanning
/// several collections (splits and transactions, balances and the saga
/// record) land together or not at all. Reads bypass the staged operations.
#[derive(Clone)]
pub struct Executor {
    store: Arc<dyn LedgerStore>,
    pending: Arc<Mutex<Vec<WriteOp>>>,
}

impl Executor {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self {
            store,
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn store(&self) -> &Arc<dyn LedgerStore> {
        &self.store
    }

    pub async fn stage(&self, operations: Vec<WriteOp>) {
        self.pending.lock().await.extend(operations);
    }

    pub async fn pending_len(&self) -> usize {
        self.pending.lock().await.len()
    }

    /// Submit all staged operations as one batch
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of operations committed (0 if nothing was staged)
    /// * `Err` - The store rejected the batch; the staged operations are discarded
    pub async fn commit(&self) -> Result<usize, Box<dyn Error + Send + Sync>> {
        let operations = std::mem::take(&mut *self.pending.lock().await);
        if operations.is_empty() {
            return Ok(0);
        }
        let count = operations.len();
        self.store.write_batch(operations).await?;
        tracing::debug!(operations = count, "committed ledger batch");
        Ok(count)
    }

    /// Discard staged operations, returning how many were dropped
    pub async fn rollback(&self) -> usize {
        let dropped = std::mem::take(&mut *self.pending.lock().await);
        dropped.len()
    }
}
