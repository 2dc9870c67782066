use async_trait::async_trait;
use household_ledger_db::models::ledger::shared_expense_split::SharedExpenseSplitModel;
use household_ledger_db::repository::delete_batch::DeleteBatch;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::SharedExpenseSplitRepositoryImpl;
use crate::utils::stage_deletes;

#[async_trait]
impl DeleteBatch for SharedExpenseSplitRepositoryImpl {
    async fn delete_batch(&self, ids: &[Uuid]) -> Result<usize, Box<dyn Error + Send + Sync>> {
        Ok(stage_deletes::<SharedExpenseSplitModel>(&self.executor, ids).await)
    }
}
