use async_trait::async_trait;
use household_ledger_db::models::ledger::transaction::TransactionModel;
use household_ledger_db::repository::load_batch::LoadBatch;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::TransactionRepositoryImpl;
use crate::utils::load_documents;

#[async_trait]
impl LoadBatch<TransactionModel> for TransactionRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<TransactionModel>>, Box<dyn Error + Send + Sync>> {
        load_documents(&self.executor, ids).await
    }
}
