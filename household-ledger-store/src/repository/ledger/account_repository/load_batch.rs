use async_trait::async_trait;
use household_ledger_db::models::ledger::account::AccountModel;
use household_ledger_db::repository::load_batch::LoadBatch;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::AccountRepositoryImpl;
use crate::utils::load_documents;

#[async_trait]
impl LoadBatch<AccountModel> for AccountRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<AccountModel>>, Box<dyn Error + Send + Sync>> {
        load_documents(&self.executor, ids).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::ledger::account_repository::test_utils::create_test_account;
    use crate::test_helper::setup_test_context;
    use household_ledger_db::repository::create_batch::CreateBatch;
    use household_ledger_db::repository::load_batch::LoadBatch;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_load_batch_preserves_order_and_gaps() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let household_id = Uuid::new_v4();
        let first = create_test_account(Uuid::new_v4(), household_id, dec!(10));
        let second = create_test_account(Uuid::new_v4(), household_id, dec!(20));
        session.account_repository.create_batch(vec![first.clone(), second.clone()]).await?;
        session.commit().await?;

        let missing = Uuid::new_v4();
        let loaded = session.account_repository.load_batch(&[second.id, missing, first.id]).await?;

        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0].as_ref().map(|a| a.id), Some(second.id));
        assert!(loaded[1].is_none());
        assert_eq!(loaded[2].as_ref().map(|a| a.id), Some(first.id));
        Ok(())
    }
}
