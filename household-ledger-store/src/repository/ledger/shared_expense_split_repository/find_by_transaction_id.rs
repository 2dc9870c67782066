use household_ledger_db::models::ledger::shared_expense_split::SharedExpenseSplitModel;
use household_ledger_db::store::FieldFilter;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::SharedExpenseSplitRepositoryImpl;
use crate::utils::query_documents;

impl SharedExpenseSplitRepositoryImpl {
    pub async fn find_by_transaction_id(
        &self,
        transaction_id: Uuid,
    ) -> Result<Vec<SharedExpenseSplitModel>, Box<dyn Error + Send + Sync>> {
        query_documents(&self.executor, &[FieldFilter::uuid("transaction_id", transaction_id)]).await
    }
}
