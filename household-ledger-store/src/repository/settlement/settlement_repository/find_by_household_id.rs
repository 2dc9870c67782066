use household_ledger_db::models::settlement::settlement::SettlementModel;
use household_ledger_db::repository::pagination::{Page, PageRequest};
use household_ledger_db::store::FieldFilter;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::SettlementRepositoryImpl;
use crate::utils::query_documents;

impl SettlementRepositoryImpl {
    /// Settlement history of a household, newest first
    pub async fn find_by_household_id(
        &self,
        household_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<SettlementModel>, Box<dyn Error + Send + Sync>> {
        let mut all_items: Vec<SettlementModel> =
            query_documents(&self.executor, &[FieldFilter::uuid("household_id", household_id)]).await?;
        all_items.sort_by(|a, b| b.settled_at.cmp(&a.settled_at).then(a.id.cmp(&b.id)));
        Ok(page.apply(all_items))
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::settlement::settlement_repository::test_utils::create_test_settlement;
    use crate::test_helper::setup_test_context;
    use chrono::{Duration, Utc};
    use household_ledger_db::repository::create_batch::CreateBatch;
    use household_ledger_db::repository::pagination::PageRequest;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_find_by_household_id_newest_first() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let household_id = Uuid::new_v4();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let now = Utc::now();

        let mut settlements = Vec::new();
        for days in 0..3 {
            settlements.push(create_test_settlement(household_id, alice, bob, dec!(10), now - Duration::days(days)));
        }
        settlements.push(create_test_settlement(Uuid::new_v4(), alice, bob, dec!(99), now));
        session.settlement_repository.create_batch(settlements.clone()).await?;
        session.commit().await?;

        let page = session
            .settlement_repository
            .find_by_household_id(household_id, PageRequest::new(2, 0))
            .await?;

        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 2);
        assert!(page.has_more());
        assert_eq!(page.items[0].id, settlements[0].id);
        assert_eq!(page.items[1].id, settlements[1].id);
        Ok(())
    }
}
