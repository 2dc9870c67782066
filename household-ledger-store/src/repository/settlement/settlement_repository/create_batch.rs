use async_trait::async_trait;
use household_ledger_db::models::settlement::settlement::SettlementModel;
use household_ledger_db::repository::create_batch::CreateBatch;
use std::error::Error;

use super::repo_impl::SettlementRepositoryImpl;
use crate::utils::stage_puts;

#[async_trait]
impl CreateBatch<SettlementModel> for SettlementRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<SettlementModel>,
    ) -> Result<Vec<SettlementModel>, Box<dyn Error + Send + Sync>> {
        stage_puts(&self.executor, items).await
    }
}
