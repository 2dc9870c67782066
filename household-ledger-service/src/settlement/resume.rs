use household_ledger_api::domain::settlement_outcome::SettlementOutcome;
use household_ledger_api::error::{LedgerError, LedgerResult};
use household_ledger_db::models::settlement::settlement_intent::SettlementStatus;
use household_ledger_db::repository::load::Load;
use uuid::Uuid;

use super::executor::{outcome_of, SettlementExecutor};
use super::SettlementStage;
use crate::events::SettlementEvent;

impl SettlementExecutor {
    /// Continue an unfinished settlement from its last committed step
    ///
    /// * `Pending` - no money moved; the intent is marked failed and a
    ///   `ValidationError` asks for a new settlement
    /// * `Transferred` - history, split resolution and budget backfill are run
    /// * `SplitsResolved` - the intent is marked complete; the budget backfill
    ///   is not repeated since it may already have been applied
    /// * `Complete` - the recorded outcome is returned unchanged
    /// * `Failed` - `ValidationError`
    pub async fn resume_settlement(&self, intent_id: Uuid) -> LedgerResult<SettlementOutcome> {
        let session = self.repos.begin();
        let mut intent = session
            .settlement_intent_repository
            .load(intent_id)
            .await
            .map_err(LedgerError::database)?
            .ok_or_else(|| LedgerError::NotFound(format!("Settlement intent {intent_id}")))?;
        tracing::info!(%intent_id, status = %intent.status, "resuming settlement");

        match intent.status {
            SettlementStatus::Complete => outcome_of(&intent, 0),
            SettlementStatus::Failed => Err(LedgerError::ValidationError(format!(
                "Settlement {intent_id} failed before any money moved, submit a new settlement"
            ))),
            SettlementStatus::Pending => {
                self.abandon_intent(
                    &session,
                    &mut intent,
                    SettlementStage::Transfer,
                    "abandoned before the transfer committed".to_string(),
                )
                .await;
                Err(LedgerError::ValidationError(format!(
                    "Settlement {intent_id} never moved money and was marked failed, submit a new settlement"
                )))
            }
            SettlementStatus::Transferred => self.finish_from_transferred(&session, intent).await,
            SettlementStatus::SplitsResolved => {
                self.debt_netting.invalidate_household(intent.household_id).await;
                self.events.emit(SettlementEvent::BudgetBackfillSkipped { intent_id });
                self.complete_intent(&session, &mut intent).await;
                outcome_of(&intent, 0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::events::SettlementEvent;
    use crate::test_utils::{seed_household, seed_split_expense, test_ledger};
    use household_ledger_api::error::LedgerError;
    use household_ledger_db::models::settlement::settlement_intent::SettlementStatus;
    use household_ledger_db::repository::create_batch::CreateBatch;
    use household_ledger_db::repository::load::Load;
    use household_ledger_db::repository::load_batch::LoadBatch;
    use household_ledger_db::repository::update_batch::UpdateBatch;
    use household_ledger_db::store::Collection;
    use household_ledger_store::repository::settlement::settlement_intent_repository::test_utils::create_test_intent;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_resume_pending_marks_failed() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (_, ledger, _, events) = test_ledger();
        let intent = create_test_intent(Uuid::new_v4(), dec!(10), SettlementStatus::Pending);
        let session = ledger.repos.begin();
        session.settlement_intent_repository.create_batch(vec![intent.clone()]).await?;
        session.commit().await?;

        let result = ledger.settlement_executor.resume_settlement(intent.id).await;
        assert!(matches!(result, Err(LedgerError::ValidationError(_))));

        let stored = session.settlement_intent_repository.load(intent.id).await?.ok_or("intent missing")?;
        assert_eq!(stored.status, SettlementStatus::Failed);
        assert_eq!(events.count(|e| matches!(e, SettlementEvent::SettlementFailed { .. })), 1);

        let again = ledger.settlement_executor.resume_settlement(intent.id).await;
        assert!(matches!(again, Err(LedgerError::ValidationError(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_resume_unknown_intent() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (_, ledger, _, _) = test_ledger();
        let result = ledger.settlement_executor.resume_settlement(Uuid::new_v4()).await;
        assert!(matches!(result, Err(LedgerError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_resume_after_failed_split_resolution() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (store, ledger, aggregator, events) = test_ledger();
        let household = seed_household(&ledger.repos, &[Some(dec!(6000)), Some(dec!(4000))]).await?;
        let (alice, bob) = (household.members[0], household.members[1]);
        let (expense, splits) = seed_split_expense(&ledger, &household, bob, dec!(100)).await?;
        aggregator.set_spent(bob, expense.category_id, crate::test_utils::april_2024().start, dec!(100));

        store.fail_next_batch_touching(Collection::SharedExpenseSplits);
        let request = household.settlement_request(alice, bob, dec!(60));
        let error = ledger
            .settlement_executor
            .create_settlement(request)
            .await
            .err()
            .ok_or("settlement should have been left partial")?;
        let intent_id = match error {
            LedgerError::PartialSettlement { intent_id, ref stage, .. } => {
                assert_eq!(stage, "resolve_splits");
                intent_id
            }
            other => return Err(format!("unexpected error {other}").into()),
        };
        assert_eq!(
            events.count(|e| matches!(e, SettlementEvent::PartialSettlementInconsistency { .. })),
            1
        );

        let unfinished = ledger
            .settlement_executor
            .find_unfinished_settlements(household.household_id)
            .await?;
        assert_eq!(unfinished.len(), 1);
        assert_eq!(unfinished[0].status, SettlementStatus::Transferred);
        assert!(unfinished[0].settlement_id.is_some());
        assert!(unfinished[0].last_error.is_some());

        let outcome = ledger.settlement_executor.resume_settlement(intent_id).await?;
        assert_eq!(outcome.splits_settled, 1);
        assert_eq!(outcome.transactions_shrunk, 1);
        assert_eq!(Some(outcome.settlement_id), unfinished[0].settlement_id);
        assert_eq!(store.document_count(Collection::Settlements), 1);

        let split = ledger.split_ledger.splits_for_transaction(expense.id).await?;
        assert!(split.iter().all(|s| s.is_paid));
        assert_eq!(split[0].id, splits[0].id);
        assert_eq!(
            aggregator.spent(bob, expense.category_id, crate::test_utils::april_2024().start),
            dec!(40)
        );
        assert!(ledger
            .settlement_executor
            .find_unfinished_settlements(household.household_id)
            .await?
            .is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_resume_after_failed_history_write() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (store, ledger, _, _) = test_ledger();
        let household = seed_household(&ledger.repos, &[None, None]).await?;
        let (alice, bob) = (household.members[0], household.members[1]);
        seed_split_expense(&ledger, &household, bob, dec!(30)).await?;

        store.fail_next_batch_touching(Collection::Settlements);
        let result = ledger
            .settlement_executor
            .create_settlement(household.settlement_request(alice, bob, dec!(15)))
            .await;
        let Err(LedgerError::PartialSettlement { intent_id, stage, .. }) = result else {
            return Err("expected a partial settlement".into());
        };
        assert_eq!(stage, "history");
        assert_eq!(store.document_count(Collection::Settlements), 0);

        let outcome = ledger.settlement_executor.resume_settlement(intent_id).await?;
        assert_eq!(outcome.splits_settled, 1);
        assert_eq!(store.document_count(Collection::Settlements), 1);

        let balance = ledger
            .debt_netting
            .calculate_debt_balance(household.household_id, alice, bob)
            .await?;
        assert!(balance.is_settled());
        Ok(())
    }

    #[tokio::test]
    async fn test_resubmitting_partial_settlement_is_rejected() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (store, ledger, _, _) = test_ledger();
        let household = seed_household(&ledger.repos, &[None, None]).await?;
        let (alice, bob) = (household.members[0], household.members[1]);
        seed_split_expense(&ledger, &household, bob, dec!(30)).await?;
        let request = household.settlement_request(alice, bob, dec!(15));

        store.fail_next_batch_touching(Collection::Settlements);
        let Err(LedgerError::PartialSettlement { intent_id, .. }) =
            ledger.settlement_executor.create_settlement(request.clone()).await
        else {
            return Err("expected a partial settlement".into());
        };
        let batches_after_partial = store.committed_batches();

        let resubmitted = ledger.settlement_executor.create_settlement(request.clone()).await;
        assert!(matches!(resubmitted, Err(LedgerError::ValidationError(_))));
        assert_eq!(store.committed_batches(), batches_after_partial);
        let accounts = ledger
            .repos
            .begin()
            .account_repository
            .load_batch(&[household.account_of(alice).id])
            .await?;
        assert_eq!(accounts[0].as_ref().ok_or("account missing")?.balance, dec!(985));

        ledger.settlement_executor.resume_settlement(intent_id).await?;
        let next = ledger.settlement_executor.create_settlement(request).await?;
        assert_eq!(next.splits_settled, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_resume_splits_resolved_skips_backfill() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (_, ledger, aggregator, events) = test_ledger();
        let household = seed_household(&ledger.repos, &[None, None]).await?;
        let (alice, bob) = (household.members[0], household.members[1]);
        seed_split_expense(&ledger, &household, bob, dec!(30)).await?;

        let outcome = ledger
            .settlement_executor
            .create_settlement(household.settlement_request(alice, bob, dec!(15)))
            .await?;
        let updates_after_settlement = aggregator.update_count();

        // Simulate a crash between resolving splits and completing the intent
        let session = ledger.repos.begin();
        let mut intent = session
            .settlement_intent_repository
            .load(outcome.intent_id)
            .await?
            .ok_or("intent missing")?;
        intent.status = SettlementStatus::SplitsResolved;
        session.settlement_intent_repository.update_batch(vec![intent]).await?;
        session.commit().await?;

        let resumed = ledger.settlement_executor.resume_settlement(outcome.intent_id).await?;
        assert_eq!(resumed.settlement_id, outcome.settlement_id);
        assert_eq!(resumed.splits_settled, outcome.splits_settled);
        assert_eq!(aggregator.update_count(), updates_after_settlement);
        assert_eq!(events.count(|e| matches!(e, SettlementEvent::BudgetBackfillSkipped { .. })), 1);

        let stored = session
            .settlement_intent_repository
            .load(outcome.intent_id)
            .await?
            .ok_or("intent missing")?;
        assert_eq!(stored.status, SettlementStatus::Complete);

        let completed_again = ledger.settlement_executor.resume_settlement(outcome.intent_id).await?;
        assert_eq!(completed_again.settlement_id, outcome.settlement_id);
        Ok(())
    }
}
