use household_ledger_api::error::{LedgerError, LedgerResult};
use household_ledger_db::models::settlement::settlement::SettlementModel;
use household_ledger_db::models::settlement::settlement_intent::SettlementIntentModel;
use household_ledger_db::repository::pagination::{Page, PageRequest};
use uuid::Uuid;

use super::executor::SettlementExecutor;

impl SettlementExecutor {
    /// Settlement intents of a household that are neither complete nor failed.
    /// Each one can be passed to `resume_settlement`.
    pub async fn find_unfinished_settlements(&self, household_id: Uuid) -> LedgerResult<Vec<SettlementIntentModel>> {
        self.repos
            .begin()
            .settlement_intent_repository
            .find_unfinished_by_household_id(household_id)
            .await
            .map_err(LedgerError::database)
    }

    /// Settlement history of a household, newest first
    pub async fn list_settlements(&self, household_id: Uuid, page: PageRequest) -> LedgerResult<Page<SettlementModel>> {
        self.repos
            .begin()
            .settlement_repository
            .find_by_household_id(household_id, page)
            .await
            .map_err(LedgerError::database)
    }
}
