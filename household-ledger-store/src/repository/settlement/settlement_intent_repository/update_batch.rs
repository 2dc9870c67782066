use async_trait::async_trait;
use chrono::Utc;
use household_ledger_db::models::settlement::settlement_intent::SettlementIntentModel;
use household_ledger_db::repository::update_batch::UpdateBatch;
use std::error::Error;

use super::repo_impl::SettlementIntentRepositoryImpl;
use crate::utils::stage_puts;

#[async_trait]
impl UpdateBatch<SettlementIntentModel> for SettlementIntentRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<SettlementIntentModel>,
    ) -> Result<Vec<SettlementIntentModel>, Box<dyn Error + Send + Sync>> {
        let now = Utc::now();
        let items = items
            .into_iter()
            .map(|mut item| {
                item.updated_at = now;
                item
            })
            .collect();
        stage_puts(&self.executor, items).await
    }
}
