use async_trait::async_trait;
use household_ledger_db::models::ledger::shared_expense_split::SharedExpenseSplitModel;
use household_ledger_db::repository::load_batch::LoadBatch;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::SharedExpenseSplitRepositoryImpl;
use crate::utils::load_documents;

#[async_trait]
impl LoadBatch<SharedExpenseSplitModel> for SharedExpenseSplitRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<SharedExpenseSplitModel>>, Box<dyn Error + Send + Sync>> {
        load_documents(&self.executor, ids).await
    }
}
