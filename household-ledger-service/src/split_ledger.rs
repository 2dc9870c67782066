use chrono::Utc;
use household_ledger_api::domain::money::round_money;
use household_ledger_api::domain::split_ratio::SplitRatio;
use household_ledger_api::error::{LedgerError, LedgerResult};
use household_ledger_db::models::ledger::shared_expense_split::SharedExpenseSplitModel;
use household_ledger_db::models::ledger::transaction::TransactionModel;
use household_ledger_db::repository::create_batch::CreateBatch;
use household_ledger_db::repository::delete_batch::DeleteBatch;
use household_ledger_db::repository::load_batch::LoadBatch;
use household_ledger_db::repository::update_batch::UpdateBatch;
use household_ledger_store::{LedgerRepositories, LedgerSession};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

use crate::debt_netting::DebtNettingEngine;
use crate::split_ratio::SplitRatioCalculator;

/// Ledger of who owes whom for each shared transaction.
#[derive(Clone)]
pub struct SplitLedger {
    repos: LedgerRepositories,
    calculator: SplitRatioCalculator,
    debt_netting: Arc<DebtNettingEngine>,
}

impl SplitLedger {
    pub fn new(
        repos: LedgerRepositories,
        calculator: SplitRatioCalculator,
        debt_netting: Arc<DebtNettingEngine>,
    ) -> Self {
        Self {
            repos,
            calculator,
            debt_netting,
        }
    }

    /// Create the unpaid splits of a shared transaction
    ///
    /// Every active member other than the payer gets one split of
    /// `round(amount * percentage / 100, 2)`. The payer's own share stays
    /// implicit in the transaction amount.
    ///
    /// # Arguments
    /// * `transaction_id` - The shared transaction, which must already exist in the household
    /// * `amount` - Amount to split, at most the transaction amount
    /// * `household_id` - Household the expense is shared in
    /// * `paid_by_user_id` - Member who fronted the money
    ///
    /// # Returns
    /// * `Ok(Vec<SharedExpenseSplitModel>)` - The created splits; empty (and
    ///   nothing written) when there is nobody to split with
    /// * `Err(LedgerError::ValidationError)` - The transaction is not a shared
    ///   expense of this household fronted by `paid_by_user_id`, `amount`
    ///   exceeds it, or it already has splits
    /// * `Err(LedgerError)` - Missing transaction or store failure
    pub async fn create_expense_splits(
        &self,
        transaction_id: Uuid,
        amount: Decimal,
        household_id: Uuid,
        paid_by_user_id: Uuid,
    ) -> LedgerResult<Vec<SharedExpenseSplitModel>> {
        let session = self.repos.begin();
        let transaction = session
            .transaction_repository
            .load_batch(&[transaction_id])
            .await
            .map_err(LedgerError::database)?
            .pop()
            .flatten()
            .ok_or_else(|| LedgerError::NotFound(format!("Transaction {transaction_id}")))?;
        if transaction.household_id != household_id {
            return Err(LedgerError::ValidationError(format!(
                "Transaction {transaction_id} does not belong to household {household_id}"
            )));
        }
        if !transaction.is_shared {
            return Err(LedgerError::ValidationError(format!(
                "Transaction {transaction_id} is not shared"
            )));
        }
        if transaction.payer_user_id() != paid_by_user_id {
            return Err(LedgerError::ValidationError(format!(
                "Transaction {transaction_id} was paid by {}, not {paid_by_user_id}",
                transaction.payer_user_id()
            )));
        }
        if amount > transaction.amount {
            return Err(LedgerError::ValidationError(format!(
                "Split amount {amount} exceeds transaction amount {}",
                transaction.amount
            )));
        }
        let existing = session
            .split_repository
            .find_by_transaction_id(transaction_id)
            .await
            .map_err(LedgerError::database)?;
        if !existing.is_empty() {
            return Err(LedgerError::ValidationError(format!(
                "Transaction {transaction_id} already has {} splits",
                existing.len()
            )));
        }

        let splits = self
            .stage_expense_splits(&session, transaction_id, amount, household_id, paid_by_user_id)
            .await?;
        if !splits.is_empty() {
            session.commit().await.map_err(LedgerError::database)?;
            self.debt_netting.invalidate_household(household_id).await;
        }
        Ok(splits)
    }

    /// Stage the splits of a shared transaction on the caller's session
    /// without committing, so they can share a batch with the transaction itself.
    ///
    /// The splits together owe `round(amount * owed percentage / 100, 2)`,
    /// never more than `amount`; the last split absorbs the rounding
    /// difference of the individual shares.
    pub async fn stage_expense_splits(
        &self,
        session: &LedgerSession,
        transaction_id: Uuid,
        amount: Decimal,
        household_id: Uuid,
        paid_by_user_id: Uuid,
    ) -> LedgerResult<Vec<SharedExpenseSplitModel>> {
        if amount < Decimal::ZERO {
            return Err(LedgerError::ValidationError(format!(
                "Shared expense amount must not be negative, got {amount}"
            )));
        }

        let ratios = self.calculator.calculate_split_ratio(household_id).await?;
        let owers: Vec<&SplitRatio> = ratios.iter().filter(|r| r.user_id != paid_by_user_id).collect();
        let amounts = split_amounts(amount, &owers);

        let created_at = Utc::now();
        let splits: Vec<SharedExpenseSplitModel> = owers
            .iter()
            .zip(amounts)
            .filter(|(_, split_amount)| !split_amount.is_zero())
            .map(|(ratio, split_amount)| SharedExpenseSplitModel {
                id: Uuid::new_v4(),
                transaction_id,
                ower_user_id: ratio.user_id,
                owed_to_user_id: paid_by_user_id,
                split_amount,
                split_percentage: ratio.percentage,
                is_paid: false,
                paid_at: None,
                created_at,
            })
            .collect();

        if splits.is_empty() {
            tracing::debug!(%transaction_id, %household_id, "no members to split with, expense stays personal");
            return Ok(splits);
        }
        session
            .split_repository
            .create_batch(splits)
            .await
            .map_err(LedgerError::database)
    }

    /// Delete all splits of a transaction, returning how many were removed
    pub async fn delete_expense_splits(&self, transaction_id: Uuid) -> LedgerResult<usize> {
        let session = self.repos.begin();
        let (deleted, household_id) = self.stage_delete_expense_splits(&session, transaction_id).await?;
        if deleted > 0 {
            session.commit().await.map_err(LedgerError::database)?;
            if let Some(household_id) = household_id {
                self.debt_netting.invalidate_household(household_id).await;
            }
        }
        Ok(deleted)
    }

    /// Stage the deletes of a transaction's splits on the caller's session, so
    /// they commit in the same batch as the transaction delete.
    ///
    /// # Returns
    /// * `Ok((usize, Option<Uuid>))` - Number of staged deletes and the household
    ///   of the transaction, if it still exists
    pub async fn stage_delete_expense_splits(
        &self,
        session: &LedgerSession,
        transaction_id: Uuid,
    ) -> LedgerResult<(usize, Option<Uuid>)> {
        let splits = session
            .split_repository
            .find_by_transaction_id(transaction_id)
            .await
            .map_err(LedgerError::database)?;
        let household_id = session
            .transaction_repository
            .load_batch(&[transaction_id])
            .await
            .map_err(LedgerError::database)?
            .pop()
            .flatten()
            .map(|t| t.household_id);
        if splits.is_empty() {
            return Ok((0, household_id));
        }

        let ids: Vec<Uuid> = splits.iter().map(|s| s.id).collect();
        let deleted = session
            .split_repository
            .delete_batch(&ids)
            .await
            .map_err(LedgerError::database)?;
        Ok((deleted, household_id))
    }

    /// Mark a single split as paid outside a settlement
    ///
    /// The parent transaction shrinks by the split amount in the same batch,
    /// as a settlement would. Budget aggregates are not touched. Already paid
    /// splits are returned unchanged.
    pub async fn mark_split_as_paid(&self, split_id: Uuid) -> LedgerResult<SharedExpenseSplitModel> {
        let session = self.repos.begin();
        let mut split = session
            .split_repository
            .load_batch(&[split_id])
            .await
            .map_err(LedgerError::database)?
            .pop()
            .flatten()
            .ok_or_else(|| LedgerError::NotFound(format!("Split {split_id}")))?;
        if split.is_paid {
            return Ok(split);
        }

        let transaction = session
            .transaction_repository
            .load_batch(&[split.transaction_id])
            .await
            .map_err(LedgerError::database)?
            .pop()
            .flatten();
        let household_id = transaction.as_ref().map(|t| t.household_id);
        if let Some(mut transaction) = transaction {
            transaction.amount = round_money((transaction.amount - split.split_amount).max(Decimal::ZERO));
            session
                .transaction_repository
                .update_batch(vec![transaction])
                .await
                .map_err(LedgerError::database)?;
        } else {
            tracing::warn!(%split_id, transaction_id = %split.transaction_id, "paid split has no parent transaction");
        }

        split.is_paid = true;
        split.paid_at = Some(Utc::now());
        let mut updated = session
            .split_repository
            .update_batch(vec![split])
            .await
            .map_err(LedgerError::database)?;
        session.commit().await.map_err(LedgerError::database)?;
        let split = updated
            .pop()
            .ok_or_else(|| LedgerError::InternalError(format!("Split {split_id} lost during update")))?;
        match household_id {
            Some(household_id) => self.debt_netting.invalidate_household(household_id).await,
            None => self.debt_netting.invalidate_all(),
        }
        Ok(split)
    }

    pub async fn splits_for_transaction(&self, transaction_id: Uuid) -> LedgerResult<Vec<SharedExpenseSplitModel>> {
        self.repos
            .begin()
            .split_repository
            .find_by_transaction_id(transaction_id)
            .await
            .map_err(LedgerError::database)
    }
}

/// Per-ower split amounts of `amount`, summing to the rounded total owed.
fn split_amounts(amount: Decimal, owers: &[&SplitRatio]) -> Vec<Decimal> {
    let owed_percentage: Decimal = owers.iter().map(|r| r.percentage).sum();
    let total_owed = round_money(amount * owed_percentage / Decimal::ONE_HUNDRED).min(amount);
    let mut amounts: Vec<Decimal> = owers
        .iter()
        .map(|r| round_money(amount * r.percentage / Decimal::ONE_HUNDRED))
        .collect();

    let remainder = total_owed - amounts.iter().copied().sum::<Decimal>();
    if !remainder.is_zero() {
        if let Some(absorber) = amounts.iter_mut().rev().find(|a| **a + remainder >= Decimal::ZERO) {
            *absorber += remainder;
        }
    }
    amounts
}

/// Unpaid splits `ower -> owed_to` whose parent transaction is a shared
/// transaction of `household_id`, together with those parent transactions.
///
/// Only the household's shared transactions and their splits are read.
pub(crate) async fn find_household_unpaid_splits(
    session: &LedgerSession,
    household_id: Uuid,
    ower_user_id: Uuid,
    owed_to_user_id: Uuid,
) -> Result<(Vec<SharedExpenseSplitModel>, HashMap<Uuid, TransactionModel>), Box<dyn Error + Send + Sync>> {
    let shared = session
        .transaction_repository
        .find_shared_by_household_id(household_id)
        .await?;

    let mut splits = Vec::new();
    let mut transactions = HashMap::new();
    for transaction in shared {
        let matching: Vec<SharedExpenseSplitModel> = session
            .split_repository
            .find_by_transaction_id(transaction.id)
            .await?
            .into_iter()
            .filter(|s| !s.is_paid && s.ower_user_id == ower_user_id && s.owed_to_user_id == owed_to_user_id)
            .collect();
        if !matching.is_empty() {
            splits.extend(matching);
            transactions.insert(transaction.id, transaction);
        }
    }
    Ok((splits, transactions))
}

#[cfg(test)]
mod tests {
    use super::split_amounts;
    use crate::test_utils::{seed_household, seed_shared_expense, test_ledger};
    use household_ledger_api::domain::split_ratio::SplitRatio;
    use household_ledger_api::error::LedgerError;
    use household_ledger_db::repository::create_batch::CreateBatch;
    use household_ledger_db::repository::load_batch::LoadBatch;
    use household_ledger_db::store::Collection;
    use household_ledger_store::repository::ledger::transaction_repository::test_utils::create_test_expense;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_create_expense_splits_proportional() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (store, ledger, _, _) = test_ledger();
        let household = seed_household(&ledger.repos, &[Some(dec!(6000)), Some(dec!(4000))]).await?;
        let (alice, bob) = (household.members[0], household.members[1]);
        let expense = seed_shared_expense(&ledger.repos, &household, bob, dec!(100)).await?;
        let batches_before = store.committed_batches();

        let splits = ledger
            .split_ledger
            .create_expense_splits(expense.id, expense.amount, household.household_id, bob)
            .await?;

        assert_eq!(splits.len(), 1);
        assert_eq!(splits[0].ower_user_id, alice);
        assert_eq!(splits[0].owed_to_user_id, bob);
        assert_eq!(splits[0].split_amount, dec!(60.00));
        assert_eq!(splits[0].split_percentage, dec!(60));
        assert!(!splits[0].is_paid);
        assert_eq!(store.committed_batches(), batches_before + 1);

        let retained = expense.amount - splits.iter().map(|s| s.split_amount).sum::<Decimal>();
        assert_eq!(retained, dec!(40.00));
        Ok(())
    }

    #[tokio::test]
    async fn test_single_member_household_writes_nothing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (store, ledger, _, _) = test_ledger();
        let household = seed_household(&ledger.repos, &[Some(dec!(5000))]).await?;
        let owner = household.members[0];
        let expense = seed_shared_expense(&ledger.repos, &household, owner, dec!(80)).await?;
        let batches_before = store.committed_batches();

        let splits = ledger
            .split_ledger
            .create_expense_splits(expense.id, expense.amount, household.household_id, owner)
            .await?;

        assert!(splits.is_empty());
        assert_eq!(store.committed_batches(), batches_before);
        assert_eq!(store.document_count(Collection::SharedExpenseSplits), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_expense_splits_unknown_transaction() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (_, ledger, _, _) = test_ledger();
        let household = seed_household(&ledger.repos, &[None, None]).await?;

        let result = ledger
            .split_ledger
            .create_expense_splits(Uuid::new_v4(), dec!(10), household.household_id, household.members[0])
            .await;
        assert!(matches!(result, Err(LedgerError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_expense_splits() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (store, ledger, _, _) = test_ledger();
        let household = seed_household(&ledger.repos, &[None, None, None]).await?;
        let payer = household.members[0];
        let expense = seed_shared_expense(&ledger.repos, &household, payer, dec!(90)).await?;
        ledger
            .split_ledger
            .create_expense_splits(expense.id, expense.amount, household.household_id, payer)
            .await?;
        assert_eq!(store.document_count(Collection::SharedExpenseSplits), 2);

        let deleted = ledger.split_ledger.delete_expense_splits(expense.id).await?;
        assert_eq!(deleted, 2);
        assert!(ledger.split_ledger.splits_for_transaction(expense.id).await?.is_empty());
        assert_eq!(ledger.split_ledger.delete_expense_splits(expense.id).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_mark_split_as_paid_shrinks_transaction() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (_, ledger, _, _) = test_ledger();
        let household = seed_household(&ledger.repos, &[None, None]).await?;
        let (alice, payer) = (household.members[0], household.members[1]);
        let expense = seed_shared_expense(&ledger.repos, &household, payer, dec!(50)).await?;
        let splits = ledger
            .split_ledger
            .create_expense_splits(expense.id, expense.amount, household.household_id, payer)
            .await?;
        let before = ledger
            .debt_netting
            .calculate_debt_balance(household.household_id, alice, payer)
            .await?;
        assert_eq!(before.amount, dec!(25.00));

        let paid = ledger.split_ledger.mark_split_as_paid(splits[0].id).await?;
        assert!(paid.is_paid);
        assert!(paid.paid_at.is_some());
        let stored = ledger.repos.begin().transaction_repository.load_batch(&[expense.id]).await?;
        assert_eq!(stored[0].as_ref().ok_or("expense missing")?.amount, dec!(25.00));
        let after = ledger
            .debt_netting
            .calculate_debt_balance(household.household_id, alice, payer)
            .await?;
        assert_eq!(after.amount, Decimal::ZERO);

        let again = ledger.split_ledger.mark_split_as_paid(splits[0].id).await?;
        assert_eq!(again.paid_at, paid.paid_at);
        let stored = ledger.repos.begin().transaction_repository.load_batch(&[expense.id]).await?;
        assert_eq!(stored[0].as_ref().ok_or("expense missing")?.amount, dec!(25.00));

        let missing = ledger.split_ledger.mark_split_as_paid(Uuid::new_v4()).await;
        assert!(matches!(missing, Err(LedgerError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_splitting_twice_is_rejected() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (store, ledger, _, _) = test_ledger();
        let household = seed_household(&ledger.repos, &[None, None]).await?;
        let (alice, bob) = (household.members[0], household.members[1]);
        let expense = seed_shared_expense(&ledger.repos, &household, bob, dec!(100)).await?;
        ledger
            .split_ledger
            .create_expense_splits(expense.id, expense.amount, household.household_id, bob)
            .await?;

        let again = ledger
            .split_ledger
            .create_expense_splits(expense.id, expense.amount, household.household_id, bob)
            .await;
        assert!(matches!(again, Err(LedgerError::ValidationError(_))));
        assert_eq!(store.document_count(Collection::SharedExpenseSplits), 1);

        let debt = ledger
            .debt_netting
            .calculate_debt_balance(household.household_id, alice, bob)
            .await?;
        assert_eq!(debt.amount, dec!(50.00));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_expense_splits_checks_transaction() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (store, ledger, _, _) = test_ledger();
        let household = seed_household(&ledger.repos, &[None, None]).await?;
        let (alice, bob) = (household.members[0], household.members[1]);

        let session = ledger.repos.begin();
        let personal = create_test_expense(bob, household.household_id, household.account_of(bob).id, dec!(40));
        session.transaction_repository.create_batch(vec![personal.clone()]).await?;
        session.commit().await?;
        let not_shared = ledger
            .split_ledger
            .create_expense_splits(personal.id, personal.amount, household.household_id, bob)
            .await;
        assert!(matches!(not_shared, Err(LedgerError::ValidationError(_))));

        let expense = seed_shared_expense(&ledger.repos, &household, bob, dec!(100)).await?;
        let too_much = ledger
            .split_ledger
            .create_expense_splits(expense.id, dec!(100.01), household.household_id, bob)
            .await;
        assert!(matches!(too_much, Err(LedgerError::ValidationError(_))));

        let wrong_payer = ledger
            .split_ledger
            .create_expense_splits(expense.id, expense.amount, household.household_id, alice)
            .await;
        assert!(matches!(wrong_payer, Err(LedgerError::ValidationError(_))));

        let other_household = ledger
            .split_ledger
            .create_expense_splits(expense.id, expense.amount, Uuid::new_v4(), bob)
            .await;
        assert!(matches!(other_household, Err(LedgerError::ValidationError(_))));

        assert_eq!(store.document_count(Collection::SharedExpenseSplits), 0);
        Ok(())
    }

    #[test]
    fn test_split_amounts_never_exceed_total() {
        let ratio = |percentage| SplitRatio {
            user_id: Uuid::new_v4(),
            percentage,
            income: Decimal::ZERO,
        };
        let (a, b) = (ratio(dec!(50)), ratio(dec!(50)));
        assert_eq!(split_amounts(dec!(100.01), &[&a, &b]), vec![dec!(50.01), dec!(50.00)]);

        let (a, b) = (ratio(dec!(33.33)), ratio(dec!(33.33)));
        let amounts = split_amounts(dec!(0.10), &[&a, &b]);
        assert_eq!(amounts.iter().copied().sum::<Decimal>(), dec!(0.07));

        assert!(split_amounts(dec!(10), &[]).is_empty());
    }
}
