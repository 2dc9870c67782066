use household_ledger_db::models::household::household_member::HouseholdMemberModel;
use household_ledger_db::store::FieldFilter;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::HouseholdMemberRepositoryImpl;
use crate::utils::query_documents;

impl HouseholdMemberRepositoryImpl {
    /// Active members ordered by join time, then user id.
    ///
    /// The ordering is stable across calls; ratio remainders are assigned to
    /// the last member in this order.
    pub async fn find_active_by_household_id(
        &self,
        household_id: Uuid,
    ) -> Result<Vec<HouseholdMemberModel>, Box<dyn Error + Send + Sync>> {
        let mut members: Vec<HouseholdMemberModel> = query_documents(
            &self.executor,
            &[
                FieldFilter::uuid("household_id", household_id),
                FieldFilter::boolean("is_active", true),
            ],
        )
        .await?;
        members.sort_by(|a, b| a.joined_at.cmp(&b.joined_at).then(a.user_id.cmp(&b.user_id)));
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::household::household_member_repository::test_utils::create_test_member;
    use crate::test_helper::setup_test_context;
    use chrono::{Duration, Utc};
    use household_ledger_db::repository::create_batch::CreateBatch;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_find_active_by_household_id_ordering() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let household_id = Uuid::new_v4();
        let now = Utc::now();

        let late = create_test_member(household_id, Uuid::new_v4(), now);
        let early = create_test_member(household_id, Uuid::new_v4(), now - Duration::days(30));
        let mut inactive = create_test_member(household_id, Uuid::new_v4(), now - Duration::days(60));
        inactive.is_active = false;
        let elsewhere = create_test_member(Uuid::new_v4(), Uuid::new_v4(), now);

        session
            .household_member_repository
            .create_batch(vec![late.clone(), early.clone(), inactive, elsewhere])
            .await?;
        session.commit().await?;

        let members = session
            .household_member_repository
            .find_active_by_household_id(household_id)
            .await?;
        let user_ids: Vec<Uuid> = members.iter().map(|m| m.user_id).collect();
        assert_eq!(user_ids, vec![early.user_id, late.user_id]);
        Ok(())
    }

    #[tokio::test]
    async fn test_same_join_time_orders_by_user_id() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let household_id = Uuid::new_v4();
        let joined_at = Utc::now();

        let first = create_test_member(household_id, Uuid::from_u128(1), joined_at);
        let second = create_test_member(household_id, Uuid::from_u128(2), joined_at);
        session
            .household_member_repository
            .create_batch(vec![second.clone(), first.clone()])
            .await?;
        session.commit().await?;

        let members = session
            .household_member_repository
            .find_active_by_household_id(household_id)
            .await?;
        assert_eq!(members[0].user_id, first.user_id);
        assert_eq!(members[1].user_id, second.user_id);
        Ok(())
    }
}
