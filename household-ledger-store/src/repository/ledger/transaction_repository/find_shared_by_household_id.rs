use household_ledger_db::models::ledger::transaction::TransactionModel;
use household_ledger_db::store::FieldFilter;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::TransactionRepositoryImpl;
use crate::utils::query_documents;

impl TransactionRepositoryImpl {
    pub async fn find_shared_by_household_id(
        &self,
        household_id: Uuid,
    ) -> Result<Vec<TransactionModel>, Box<dyn Error + Send + Sync>> {
        query_documents(
            &self.executor,
            &[
                FieldFilter::uuid("household_id", household_id),
                FieldFilter::boolean("is_shared", true),
            ],
        )
        .await
    }
}
