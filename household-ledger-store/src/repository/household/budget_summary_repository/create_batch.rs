use async_trait::async_trait;
use household_ledger_db::models::household::budget_summary::BudgetSummaryModel;
use household_ledger_db::repository::create_batch::CreateBatch;
use std::error::Error;

use super::repo_impl::BudgetSummaryRepositoryImpl;
use crate::utils::stage_puts;

#[async_trait]
impl CreateBatch<BudgetSummaryModel> for BudgetSummaryRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<BudgetSummaryModel>,
    ) -> Result<Vec<BudgetSummaryModel>, Box<dyn Error + Send + Sync>> {
        stage_puts(&self.executor, items).await
    }
}
