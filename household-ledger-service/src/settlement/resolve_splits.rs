use chrono::Utc;
use household_ledger_api::domain::money::round_money;
use household_ledger_db::models::ledger::shared_expense_split::SharedExpenseSplitModel;
use household_ledger_db::models::ledger::transaction::TransactionModel;
use household_ledger_db::models::settlement::settlement_intent::{
    ResolvedTransaction, SettlementIntentModel, SettlementStatus,
};
use household_ledger_db::repository::load_batch::LoadBatch;
use household_ledger_db::repository::update_batch::UpdateBatch;
use household_ledger_store::utils::fingerprint;
use household_ledger_store::LedgerSession;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use uuid::Uuid;

use super::executor::SettlementExecutor;
use crate::events::SettlementEvent;
use crate::split_ledger::find_household_unpaid_splits;

/// A source transaction after its settled splits were taken out of it.
#[derive(Debug, Clone)]
pub struct ShrunkTransaction {
    /// The transaction as written, carrying its new amount
    pub transaction: TransactionModel,
    /// How much the amount went down
    pub reduction: Decimal,
}

type Matched = (Vec<SharedExpenseSplitModel>, HashMap<Uuid, TransactionModel>);

impl SettlementExecutor {
    /// Mark every unpaid split the payer owes the receiver in the household as
    /// paid and shrink each source transaction by its settled splits, in one
    /// batch together with the `SplitsResolved` intent status.
    pub(crate) async fn resolve_splits(
        &self,
        session: &LedgerSession,
        intent: &mut SettlementIntentModel,
    ) -> Result<Vec<ShrunkTransaction>, Box<dyn Error + Send + Sync>> {
        let matched = find_household_unpaid_splits(
            session,
            intent.household_id,
            intent.payer_user_id,
            intent.receiver_user_id,
        )
        .await?;
        let (splits, transactions) = if self.config.verify_before_resolve {
            self.reread_matched(session, intent, matched).await?
        } else {
            matched
        };

        let mut settled_per_transaction: BTreeMap<Uuid, Decimal> = BTreeMap::new();
        for split in &splits {
            *settled_per_transaction.entry(split.transaction_id).or_default() += split.split_amount;
        }

        let mut shrunk = Vec::with_capacity(settled_per_transaction.len());
        let mut resolved = Vec::with_capacity(settled_per_transaction.len());
        for (transaction_id, settled) in &settled_per_transaction {
            let Some(transaction) = transactions.get(transaction_id) else {
                continue;
            };
            let new_amount = round_money((transaction.amount - *settled).max(Decimal::ZERO));
            resolved.push(ResolvedTransaction {
                transaction_id: *transaction_id,
                original_amount: transaction.amount,
                new_amount,
            });
            let mut updated = transaction.clone();
            updated.amount = new_amount;
            shrunk.push(ShrunkTransaction {
                reduction: transaction.amount - new_amount,
                transaction: updated,
            });
        }

        let paid_at = Utc::now();
        let paid_splits: Vec<SharedExpenseSplitModel> = splits
            .into_iter()
            .map(|mut split| {
                split.is_paid = true;
                split.paid_at = Some(paid_at);
                split
            })
            .collect();

        let mut staged = intent.clone();
        staged.status = SettlementStatus::SplitsResolved;
        staged.splits_settled = u32::try_from(paid_splits.len()).unwrap_or(u32::MAX);
        staged.resolved_transactions = resolved;

        session.split_repository.update_batch(paid_splits).await?;
        session
            .transaction_repository
            .update_batch(shrunk.iter().map(|s| s.transaction.clone()).collect())
            .await?;
        session
            .settlement_intent_repository
            .update_batch(vec![staged.clone()])
            .await?;
        session.commit().await?;

        *intent = staged;
        self.events.emit(SettlementEvent::SplitsResolved {
            intent_id: intent.id,
            splits_settled: intent.splits_settled as usize,
            transactions_shrunk: shrunk.len(),
        });
        Ok(shrunk)
    }

    /// Re-load the matched splits and transactions right before writing.
    ///
    /// Records that changed since they were matched are counted and reported;
    /// the fresh values win. Splits that got paid, re-pointed or deleted in the
    /// meantime are dropped.
    async fn reread_matched(
        &self,
        session: &LedgerSession,
        intent: &SettlementIntentModel,
        (splits, transactions): Matched,
    ) -> Result<Matched, Box<dyn Error + Send + Sync>> {
        if splits.is_empty() {
            return Ok((splits, transactions));
        }

        let split_ids: Vec<Uuid> = splits.iter().map(|s| s.id).collect();
        let transaction_ids: Vec<Uuid> = transactions.keys().copied().collect();
        let fresh_splits = session.split_repository.load_batch(&split_ids).await?;
        let fresh_transactions = session.transaction_repository.load_batch(&transaction_ids).await?;

        let mut changed_records = 0;
        for (before, after) in splits.iter().zip(&fresh_splits) {
            if !same_record(before, after.as_ref())? {
                changed_records += 1;
            }
        }
        for (id, after) in transaction_ids.iter().zip(&fresh_transactions) {
            if let Some(before) = transactions.get(id) {
                if !same_record(before, after.as_ref())? {
                    changed_records += 1;
                }
            }
        }
        if changed_records > 0 {
            self.events.emit(SettlementEvent::StaleReadDetected {
                intent_id: intent.id,
                changed_records,
            });
        }

        let transactions: HashMap<Uuid, TransactionModel> = fresh_transactions
            .into_iter()
            .flatten()
            .filter(|t| t.household_id == intent.household_id && t.is_shared)
            .map(|t| (t.id, t))
            .collect();
        let splits: Vec<SharedExpenseSplitModel> = fresh_splits
            .into_iter()
            .flatten()
            .filter(|s| {
                !s.is_paid
                    && s.ower_user_id == intent.payer_user_id
                    && s.owed_to_user_id == intent.receiver_user_id
                    && transactions.contains_key(&s.transaction_id)
            })
            .collect();
        Ok((splits, transactions))
    }
}

fn same_record<T: serde::Serialize>(before: &T, after: Option<&T>) -> Result<bool, Box<dyn Error + Send + Sync>> {
    match after {
        Some(after) => Ok(fingerprint(before)? == fingerprint(after)?),
        None => Ok(false),
    }
}
