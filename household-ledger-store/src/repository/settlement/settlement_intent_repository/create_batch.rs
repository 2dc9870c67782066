use async_trait::async_trait;
use household_ledger_db::models::settlement::settlement_intent::SettlementIntentModel;
use household_ledger_db::repository::create_batch::CreateBatch;
use std::error::Error;

use super::repo_impl::SettlementIntentRepositoryImpl;
use crate::utils::stage_puts;

#[async_trait]
impl CreateBatch<SettlementIntentModel> for SettlementIntentRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<SettlementIntentModel>,
    ) -> Result<Vec<SettlementIntentModel>, Box<dyn Error + Send + Sync>> {
        stage_puts(&self.executor, items).await
    }
}
