use async_trait::async_trait;
use household_ledger_db::models::ledger::shared_expense_split::SharedExpenseSplitModel;
use household_ledger_db::repository::update_batch::UpdateBatch;
use std::error::Error;

use super::repo_impl::SharedExpenseSplitRepositoryImpl;
use crate::utils::stage_puts;

#[async_trait]
impl UpdateBatch<SharedExpenseSplitModel> for SharedExpenseSplitRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<SharedExpenseSplitModel>,
    ) -> Result<Vec<SharedExpenseSplitModel>, Box<dyn Error + Send + Sync>> {
        stage_puts(&self.executor, items).await
    }
}
