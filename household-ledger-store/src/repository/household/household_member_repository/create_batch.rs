use async_trait::async_trait;
use household_ledger_db::models::household::household_member::HouseholdMemberModel;
use household_ledger_db::repository::create_batch::CreateBatch;
use std::error::Error;

use super::repo_impl::HouseholdMemberRepositoryImpl;
use crate::utils::stage_puts;

#[async_trait]
impl CreateBatch<HouseholdMemberModel> for HouseholdMemberRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<HouseholdMemberModel>,
    ) -> Result<Vec<HouseholdMemberModel>, Box<dyn Error + Send + Sync>> {
        stage_puts(&self.executor, items).await
    }
}
