use household_ledger_db::models::household::budget_summary::BudgetSummaryModel;
use household_ledger_db::store::FieldFilter;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::BudgetSummaryRepositoryImpl;
use crate::utils::query_documents;

impl BudgetSummaryRepositoryImpl {
    /// Most recent budget period summary of a user, by period start
    pub async fn find_latest_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<BudgetSummaryModel>, Box<dyn Error + Send + Sync>> {
        let summaries: Vec<BudgetSummaryModel> =
            query_documents(&self.executor, &[FieldFilter::uuid("user_id", user_id)]).await?;
        Ok(summaries.into_iter().max_by_key(|s| s.period_start))
    }
}
