use async_trait::async_trait;
use household_ledger_db::models::ledger::account::AccountModel;
use household_ledger_db::repository::create_batch::CreateBatch;
use std::error::Error;

use super::repo_impl::AccountRepositoryImpl;
use crate::utils::stage_puts;

#[async_trait]
impl CreateBatch<AccountModel> for AccountRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<AccountModel>,
    ) -> Result<Vec<AccountModel>, Box<dyn Error + Send + Sync>> {
        stage_puts(&self.executor, items).await
    }
}
