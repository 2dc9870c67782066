use async_trait::async_trait;
use household_ledger_db::models::ledger::account::AccountModel;
use household_ledger_db::repository::load::Load;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::AccountRepositoryImpl;
use crate::utils::load_documents;

#[async_trait]
impl Load<AccountModel> for AccountRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<Option<AccountModel>, Box<dyn Error + Send + Sync>> {
        Ok(load_documents(&self.executor, &[id]).await?.pop().flatten())
    }
}
