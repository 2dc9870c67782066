use async_trait::async_trait;
use household_ledger_db::models::settlement::settlement_intent::SettlementIntentModel;
use household_ledger_db::repository::load::Load;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::SettlementIntentRepositoryImpl;
use crate::utils::load_documents;

#[async_trait]
impl Load<SettlementIntentModel> for SettlementIntentRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<Option<SettlementIntentModel>, Box<dyn Error + Send + Sync>> {
        Ok(load_documents(&self.executor, &[id]).await?.pop().flatten())
    }
}
