use async_trait::async_trait;
use household_ledger_db::models::ledger::transaction::TransactionModel;
use household_ledger_db::repository::create_batch::CreateBatch;
use std::error::Error;

use super::repo_impl::TransactionRepositoryImpl;
use crate::utils::stage_puts;

#[async_trait]
impl CreateBatch<TransactionModel> for TransactionRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<TransactionModel>,
    ) -> Result<Vec<TransactionModel>, Box<dyn Error + Send + Sync>> {
        stage_puts(&self.executor, items).await
    }
}
