use async_trait::async_trait;
use household_ledger_db::models::ledger::shared_expense_split::SharedExpenseSplitModel;
use household_ledger_db::repository::create_batch::CreateBatch;
use std::error::Error;

use super::repo_impl::SharedExpenseSplitRepositoryImpl;
use crate::utils::stage_puts;

#[async_trait]
impl CreateBatch<SharedExpenseSplitModel> for SharedExpenseSplitRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<SharedExpenseSplitModel>,
    ) -> Result<Vec<SharedExpenseSplitModel>, Box<dyn Error + Send + Sync>> {
        stage_puts(&self.executor, items).await
    }
}
