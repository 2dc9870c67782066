use async_trait::async_trait;
use household_ledger_db::models::ledger::transaction::TransactionModel;
use household_ledger_db::repository::delete_batch::DeleteBatch;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::TransactionRepositoryImpl;
use crate::utils::stage_deletes;

#[async_trait]
impl DeleteBatch for TransactionRepositoryImpl {
    async fn delete_batch(&self, ids: &[Uuid]) -> Result<usize, Box<dyn Error + Send + Sync>> {
        Ok(stage_deletes::<TransactionModel>(&self.executor, ids).await)
    }
}
