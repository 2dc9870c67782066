use household_ledger_db::models::settlement::settlement_intent::SettlementIntentModel;
use household_ledger_db::store::FieldFilter;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::SettlementIntentRepositoryImpl;
use crate::utils::query_documents;

impl SettlementIntentRepositoryImpl {
    /// Intents neither complete nor failed, oldest first
    pub async fn find_unfinished_by_household_id(
        &self,
        household_id: Uuid,
    ) -> Result<Vec<SettlementIntentModel>, Box<dyn Error + Send + Sync>> {
        let mut intents: Vec<SettlementIntentModel> =
            query_documents(&self.executor, &[FieldFilter::uuid("household_id", household_id)]).await?;
        intents.retain(|intent| !intent.is_finished());
        intents.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(intents)
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::settlement::settlement_intent_repository::test_utils::create_test_intent;
    use crate::test_helper::setup_test_context;
    use household_ledger_db::models::settlement::settlement_intent::SettlementStatus;
    use household_ledger_db::repository::create_batch::CreateBatch;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_find_unfinished_by_household_id() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let household_id = Uuid::new_v4();

        let intents = vec![
            create_test_intent(household_id, dec!(10), SettlementStatus::Transferred),
            create_test_intent(household_id, dec!(10), SettlementStatus::Complete),
            create_test_intent(household_id, dec!(10), SettlementStatus::Failed),
            create_test_intent(household_id, dec!(10), SettlementStatus::SplitsResolved),
            create_test_intent(Uuid::new_v4(), dec!(10), SettlementStatus::Pending),
        ];
        session.settlement_intent_repository.create_batch(intents).await?;
        session.commit().await?;

        let unfinished = session
            .settlement_intent_repository
            .find_unfinished_by_household_id(household_id)
            .await?;
        assert_eq!(unfinished.len(), 2);
        assert!(unfinished.iter().all(|i| !i.is_finished()));
        Ok(())
    }
}
