use chrono::Utc;
use heapless::String as HeaplessString;
use household_ledger_api::domain::money::round_money;
use household_ledger_api::domain::settlement_outcome::SettlementOutcome;
use household_ledger_api::domain::settlement_request::{SettlementRequest, SETTLEMENT_NOTE_MAX_LEN};
use household_ledger_api::error::{LedgerError, LedgerResult};
use household_ledger_api::service::budget_spent_aggregator::BudgetSpentAggregator;
use household_ledger_db::models::ledger::account::AccountModel;
use household_ledger_db::models::settlement::settlement::SettlementModel;
use household_ledger_db::models::settlement::settlement_intent::{SettlementIntentModel, SettlementStatus};
use household_ledger_db::repository::create_batch::CreateBatch;
use household_ledger_db::repository::load_batch::LoadBatch;
use household_ledger_db::repository::update_batch::UpdateBatch;
use household_ledger_store::utils::fingerprint;
use household_ledger_store::{LedgerRepositories, LedgerSession};
use rust_decimal::Decimal;
use std::error::Error;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;
use validator::Validate;

use super::SettlementStage;
use crate::config::{OverdrawPolicy, SettlementConfig};
use crate::debt_netting::DebtNettingEngine;
use crate::events::{SettlementEvent, SettlementEvents, TracingEvents};

/// Executes settlements between two household members as a persisted saga.
///
/// A settlement is a sequence of atomic batches. The intent record is written
/// first and every later batch carries the intent's next status, so after a
/// crash the stored status tells exactly which steps committed:
///
/// | Batch | Effect                                     | Intent status    |
/// |-------|--------------------------------------------|------------------|
/// | A     | -                                          | `Pending`        |
/// | B     | payer and receiver balances                | `Transferred`    |
/// | C     | settlement history record                  | `settlement_id`  |
/// | D     | splits paid, source transactions shrunk    | `SplitsResolved` |
/// | -     | budget spent backfill (best effort)        |                  |
/// | E     | -                                          | `Complete`       |
pub struct SettlementExecutor {
    pub(crate) repos: LedgerRepositories,
    pub(crate) aggregator: Arc<dyn BudgetSpentAggregator>,
    pub(crate) debt_netting: Arc<DebtNettingEngine>,
    pub(crate) events: Arc<dyn SettlementEvents>,
    pub(crate) config: SettlementConfig,
}

impl SettlementExecutor {
    pub fn new(
        repos: LedgerRepositories,
        aggregator: Arc<dyn BudgetSpentAggregator>,
        debt_netting: Arc<DebtNettingEngine>,
        config: SettlementConfig,
    ) -> Self {
        Self {
            repos,
            aggregator,
            debt_netting,
            events: Arc::new(TracingEvents),
            config,
        }
    }

    pub fn with_events(mut self, events: Arc<dyn SettlementEvents>) -> Self {
        self.events = events;
        self
    }

    /// Settle debt: `payer` pays `amount` to `receiver`
    ///
    /// Transfers the amount between the two accounts, appends the settlement
    /// history record, marks every unpaid split the payer owes the receiver in
    /// this household as paid, shrinks the source transactions by the settled
    /// split amounts and backfills the budget spent amounts.
    ///
    /// # Arguments
    /// * `request` - Parties, amount and accounts of the settlement
    ///
    /// # Returns
    /// * `Ok(SettlementOutcome)` - Every step committed. Budget backfill failures
    ///   are only counted in `budget_updates_failed`.
    /// * `Err(LedgerError::ValidationError)` / `Err(LedgerError::AccountNotFound)` -
    ///   Rejected before anything was written, including a resubmission of a
    ///   request whose unfinished settlement already moved money
    /// * `Err(LedgerError::DatabaseError)` - Failed before any money moved
    /// * `Err(LedgerError::PartialSettlement)` - Money moved but a later step did
    ///   not commit; resume with [`SettlementExecutor::resume_settlement`]
    pub async fn create_settlement(&self, request: SettlementRequest) -> LedgerResult<SettlementOutcome> {
        let span = tracing::info_span!(
            "create_settlement",
            household_id = %request.household_id,
            payer_user_id = %request.payer_user_id,
            receiver_user_id = %request.receiver_user_id,
        );
        self.run_settlement(request).instrument(span).await
    }

    async fn run_settlement(&self, request: SettlementRequest) -> LedgerResult<SettlementOutcome> {
        request.validate()?;
        let note = request
            .note
            .as_deref()
            .map(|note| HeaplessString::<SETTLEMENT_NOTE_MAX_LEN>::try_from(note))
            .transpose()
            .map_err(|_| {
                LedgerError::ValidationError(format!("Settlement note exceeds {SETTLEMENT_NOTE_MAX_LEN} bytes"))
            })?;

        let session = self.repos.begin();
        let (mut payer_account, mut receiver_account) = self.fetch_accounts(&session, &request).await?;

        let new_payer_balance = round_money(payer_account.balance - request.amount);
        if new_payer_balance < Decimal::ZERO && self.config.overdraw_policy == OverdrawPolicy::Reject {
            return Err(LedgerError::ValidationError(format!(
                "Settlement of {} would overdraw account {} (balance {})",
                request.amount, payer_account.id, payer_account.balance
            )));
        }
        let new_receiver_balance = round_money(receiver_account.balance + request.amount);

        let request_hash = fingerprint(&request).map_err(|e| LedgerError::InternalError(e.to_string()))?;
        if let Some(open) = session
            .settlement_intent_repository
            .find_unfinished_by_household_id(request.household_id)
            .await
            .map_err(LedgerError::database)?
            .into_iter()
            .find(|intent| intent.request_hash == request_hash && intent.status != SettlementStatus::Pending)
        {
            return Err(LedgerError::ValidationError(format!(
                "Settlement {} for the same request already moved money, resume it instead",
                open.id
            )));
        }
        let now = Utc::now();
        let mut intent = SettlementIntentModel {
            id: Uuid::new_v4(),
            household_id: request.household_id,
            payer_user_id: request.payer_user_id,
            receiver_user_id: request.receiver_user_id,
            amount: request.amount,
            payer_account_id: request.payer_account_id,
            receiver_account_id: request.receiver_account_id,
            note,
            status: SettlementStatus::Pending,
            request_hash,
            settlement_id: None,
            new_payer_balance: None,
            new_receiver_balance: None,
            resolved_transactions: Vec::new(),
            splits_settled: 0,
            last_error: None,
            created_at: now,
            updated_at: now,
        };

        // Batch A
        if let Err(e) = self.record_intent(&session, &intent).await {
            session.rollback().await;
            self.events.emit(SettlementEvent::SettlementFailed {
                intent_id: intent.id,
                stage: SettlementStage::Intent.to_string(),
                error: e.to_string(),
            });
            return Err(LedgerError::database(e));
        }
        self.events.emit(SettlementEvent::IntentRecorded {
            intent_id: intent.id,
            household_id: intent.household_id,
            amount: intent.amount,
        });

        // Batch B
        payer_account.balance = new_payer_balance;
        receiver_account.balance = new_receiver_balance;
        let mut transferred = intent.clone();
        transferred.status = SettlementStatus::Transferred;
        transferred.new_payer_balance = Some(new_payer_balance);
        transferred.new_receiver_balance = Some(new_receiver_balance);
        if let Err(e) = self
            .transfer_balances(&session, vec![payer_account, receiver_account], &transferred)
            .await
        {
            session.rollback().await;
            self.abandon_intent(&session, &mut intent, SettlementStage::Transfer, e.to_string())
                .await;
            return Err(LedgerError::database(e));
        }
        self.events.emit(SettlementEvent::BalancesTransferred {
            intent_id: transferred.id,
            new_payer_balance,
            new_receiver_balance,
        });

        self.finish_from_transferred(&session, transferred).await
    }

    async fn fetch_accounts(
        &self,
        session: &LedgerSession,
        request: &SettlementRequest,
    ) -> LedgerResult<(AccountModel, AccountModel)> {
        let mut accounts = session
            .account_repository
            .load_batch(&[request.payer_account_id, request.receiver_account_id])
            .await
            .map_err(LedgerError::database)?
            .into_iter();
        let payer_account = accounts
            .next()
            .flatten()
            .ok_or(LedgerError::AccountNotFound(request.payer_account_id))?;
        let receiver_account = accounts
            .next()
            .flatten()
            .ok_or(LedgerError::AccountNotFound(request.receiver_account_id))?;

        for account in [&payer_account, &receiver_account] {
            if account.household_id != request.household_id {
                return Err(LedgerError::ValidationError(format!(
                    "Account {} does not belong to household {}",
                    account.id, request.household_id
                )));
            }
        }
        Ok((payer_account, receiver_account))
    }

    async fn record_intent(
        &self,
        session: &LedgerSession,
        intent: &SettlementIntentModel,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        session
            .settlement_intent_repository
            .create_batch(vec![intent.clone()])
            .await?;
        session.commit().await?;
        Ok(())
    }

    async fn transfer_balances(
        &self,
        session: &LedgerSession,
        accounts: Vec<AccountModel>,
        intent: &SettlementIntentModel,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        session.account_repository.update_batch(accounts).await?;
        session
            .settlement_intent_repository
            .update_batch(vec![intent.clone()])
            .await?;
        session.commit().await?;
        Ok(())
    }

    /// Steps after the transfer: history, split resolution, budget backfill
    /// and completion. Shared by fresh and resumed settlements.
    pub(crate) async fn finish_from_transferred(
        &self,
        session: &LedgerSession,
        mut intent: SettlementIntentModel,
    ) -> LedgerResult<SettlementOutcome> {
        // Batch C, skipped when a resumed intent already has its record
        if intent.settlement_id.is_none() {
            if let Err(e) = self.record_history(session, &mut intent).await {
                return Err(self
                    .report_partial(session, &mut intent, SettlementStage::History, e)
                    .await);
            }
        }

        // Batch D
        let shrunk = match self.resolve_splits(session, &mut intent).await {
            Ok(shrunk) => shrunk,
            Err(e) => {
                return Err(self
                    .report_partial(session, &mut intent, SettlementStage::ResolveSplits, e)
                    .await)
            }
        };
        self.debt_netting.invalidate_household(intent.household_id).await;

        let budget_updates_failed = self.backfill_budgets(&intent, &shrunk).await;

        // Batch E
        self.complete_intent(session, &mut intent).await;
        outcome_of(&intent, budget_updates_failed)
    }

    async fn record_history(
        &self,
        session: &LedgerSession,
        intent: &mut SettlementIntentModel,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let settlement = SettlementModel {
            id: Uuid::new_v4(),
            household_id: intent.household_id,
            payer_user_id: intent.payer_user_id,
            receiver_user_id: intent.receiver_user_id,
            amount: intent.amount,
            payer_account_id: intent.payer_account_id,
            receiver_account_id: intent.receiver_account_id,
            note: intent.note.clone(),
            settled_at: Utc::now(),
        };
        let mut staged = intent.clone();
        staged.settlement_id = Some(settlement.id);

        session.settlement_repository.create_batch(vec![settlement]).await?;
        session
            .settlement_intent_repository
            .update_batch(vec![staged.clone()])
            .await?;
        session.commit().await?;

        *intent = staged;
        if let Some(settlement_id) = intent.settlement_id {
            self.events.emit(SettlementEvent::HistoryRecorded {
                intent_id: intent.id,
                settlement_id,
            });
        }
        Ok(())
    }

    pub(crate) async fn complete_intent(&self, session: &LedgerSession, intent: &mut SettlementIntentModel) {
        let mut staged = intent.clone();
        staged.status = SettlementStatus::Complete;
        staged.last_error = None;
        match self.save_intent(session, &staged).await {
            Ok(()) => {
                *intent = staged;
                if let Some(settlement_id) = intent.settlement_id {
                    self.events.emit(SettlementEvent::SettlementCompleted {
                        intent_id: intent.id,
                        settlement_id,
                    });
                }
            }
            Err(e) => {
                session.rollback().await;
                self.events.emit(SettlementEvent::IntentFinalizeFailed {
                    intent_id: intent.id,
                    error: e.to_string(),
                });
            }
        }
    }

    pub(crate) async fn save_intent(
        &self,
        session: &LedgerSession,
        intent: &SettlementIntentModel,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        session
            .settlement_intent_repository
            .update_batch(vec![intent.clone()])
            .await?;
        session.commit().await?;
        Ok(())
    }

    /// Mark an intent failed after a failure before any money moved
    pub(crate) async fn abandon_intent(
        &self,
        session: &LedgerSession,
        intent: &mut SettlementIntentModel,
        stage: SettlementStage,
        error: String,
    ) {
        intent.status = SettlementStatus::Failed;
        intent.last_error = Some(format!("{stage}: {error}"));
        if let Err(e) = self.save_intent(session, intent).await {
            session.rollback().await;
            tracing::warn!(intent_id = %intent.id, error = %e, "could not mark settlement intent failed");
        }
        self.events.emit(SettlementEvent::SettlementFailed {
            intent_id: intent.id,
            stage: stage.to_string(),
            error,
        });
    }

    async fn report_partial(
        &self,
        session: &LedgerSession,
        intent: &mut SettlementIntentModel,
        stage: SettlementStage,
        error: Box<dyn Error + Send + Sync>,
    ) -> LedgerError {
        session.rollback().await;
        let message = error.to_string();
        intent.last_error = Some(format!("{stage}: {message}"));
        if let Err(e) = self.save_intent(session, intent).await {
            session.rollback().await;
            tracing::warn!(intent_id = %intent.id, error = %e, "could not record settlement failure on intent");
        }
        self.events.emit(SettlementEvent::PartialSettlementInconsistency {
            intent_id: intent.id,
            stage: stage.to_string(),
            error: message.clone(),
        });
        LedgerError::PartialSettlement {
            intent_id: intent.id,
            stage: stage.to_string(),
            message,
        }
    }
}

pub(crate) fn outcome_of(
    intent: &SettlementIntentModel,
    budget_updates_failed: usize,
) -> LedgerResult<SettlementOutcome> {
    let missing = |field: &str| LedgerError::InternalError(format!("Settlement intent {} has no {field}", intent.id));
    Ok(SettlementOutcome {
        settlement_id: intent.settlement_id.ok_or_else(|| missing("settlement_id"))?,
        intent_id: intent.id,
        new_payer_balance: intent.new_payer_balance.ok_or_else(|| missing("new_payer_balance"))?,
        new_receiver_balance: intent
            .new_receiver_balance
            .ok_or_else(|| missing("new_receiver_balance"))?,
        splits_settled: intent.splits_settled as usize,
        transactions_shrunk: intent.resolved_transactions.len(),
        budget_updates_failed,
    })
}
