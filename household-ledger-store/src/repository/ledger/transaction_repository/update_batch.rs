use async_trait::async_trait;
use household_ledger_db::models::ledger::transaction::TransactionModel;
use household_ledger_db::repository::update_batch::UpdateBatch;
use std::error::Error;

use super::repo_impl::TransactionRepositoryImpl;
use crate::utils::stage_puts;

#[async_trait]
impl UpdateBatch<TransactionModel> for TransactionRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<TransactionModel>,
    ) -> Result<Vec<TransactionModel>, Box<dyn Error + Send + Sync>> {
        stage_puts(&self.executor, items).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::ledger::transaction_repository::test_utils::create_test_shared_expense;
    use crate::test_helper::setup_test_context;
    use household_ledger_db::repository::create_batch::CreateBatch;
    use household_ledger_db::repository::load_batch::LoadBatch;
    use household_ledger_db::repository::update_batch::UpdateBatch;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_update_batch_replaces_amount() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let session = ctx.session();
        let transaction = create_test_shared_expense(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), dec!(100.00));
        session.transaction_repository.create_batch(vec![transaction.clone()]).await?;
        session.commit().await?;

        let mut shrunk = transaction.clone();
        shrunk.amount = dec!(40.00);
        session.transaction_repository.update_batch(vec![shrunk]).await?;
        session.commit().await?;

        let loaded = session.transaction_repository.load_batch(&[transaction.id]).await?;
        assert_eq!(loaded[0].as_ref().map(|t| t.amount), Some(dec!(40.00)));
        Ok(())
    }
}
