use rust_decimal::Decimal;
use uuid::Uuid;

/// Diagnostic events emitted while a settlement runs.
#[derive(Debug, Clone, PartialEq)]
pub enum SettlementEvent {
    IntentRecorded {
        intent_id: Uuid,
        household_id: Uuid,
        amount: Decimal,
    },
    BalancesTransferred {
        intent_id: Uuid,
        new_payer_balance: Decimal,
        new_receiver_balance: Decimal,
    },
    HistoryRecorded {
        intent_id: Uuid,
        settlement_id: Uuid,
    },
    /// Records changed between matching splits and writing them
    StaleReadDetected {
        intent_id: Uuid,
        changed_records: usize,
    },
    SplitsResolved {
        intent_id: Uuid,
        splits_settled: usize,
        transactions_shrunk: usize,
    },
    /// Soft failure of the budget backfill; the settlement still succeeds
    BudgetUpdateFailed {
        intent_id: Uuid,
        user_id: Uuid,
        category_id: Option<Uuid>,
        error: String,
    },
    /// A resumed settlement does not repeat the budget backfill
    BudgetBackfillSkipped {
        intent_id: Uuid,
    },
    SettlementCompleted {
        intent_id: Uuid,
        settlement_id: Uuid,
    },
    /// Nothing moved; the intent is marked failed
    SettlementFailed {
        intent_id: Uuid,
        stage: String,
        error: String,
    },
    /// Money moved but splits or history did not follow
    PartialSettlementInconsistency {
        intent_id: Uuid,
        stage: String,
        error: String,
    },
    /// Every step committed but the intent could not be marked complete
    IntentFinalizeFailed {
        intent_id: Uuid,
        error: String,
    },
}

/// Sink for settlement diagnostics.
///
/// Injected into the settlement executor so callers decide where events go;
/// tests record them instead of capturing logs.
pub trait SettlementEvents: Send + Sync {
    fn emit(&self, event: SettlementEvent);
}

/// Forwards every event to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEvents;

impl SettlementEvents for TracingEvents {
    fn emit(&self, event: SettlementEvent) {
        match event {
            SettlementEvent::IntentRecorded { intent_id, household_id, amount } => {
                tracing::debug!(%intent_id, %household_id, %amount, "settlement intent recorded");
            }
            SettlementEvent::BalancesTransferred { intent_id, new_payer_balance, new_receiver_balance } => {
                tracing::info!(%intent_id, %new_payer_balance, %new_receiver_balance, "settlement balances transferred");
            }
            SettlementEvent::HistoryRecorded { intent_id, settlement_id } => {
                tracing::debug!(%intent_id, %settlement_id, "settlement history recorded");
            }
            SettlementEvent::StaleReadDetected { intent_id, changed_records } => {
                tracing::warn!(%intent_id, changed_records, "splits or transactions changed during settlement, using re-read values");
            }
            SettlementEvent::SplitsResolved { intent_id, splits_settled, transactions_shrunk } => {
                tracing::info!(%intent_id, splits_settled, transactions_shrunk, "settlement splits resolved");
            }
            SettlementEvent::BudgetUpdateFailed { intent_id, user_id, category_id, error } => {
                tracing::warn!(%intent_id, %user_id, ?category_id, %error, "budget spent backfill failed");
            }
            SettlementEvent::BudgetBackfillSkipped { intent_id } => {
                tracing::warn!(%intent_id, "resumed settlement skipped budget backfill");
            }
            SettlementEvent::SettlementCompleted { intent_id, settlement_id } => {
                tracing::info!(%intent_id, %settlement_id, "settlement complete");
            }
            SettlementEvent::SettlementFailed { intent_id, stage, error } => {
                tracing::warn!(%intent_id, %stage, %error, "settlement failed before any money moved");
            }
            SettlementEvent::PartialSettlementInconsistency { intent_id, stage, error } => {
                tracing::error!(%intent_id, %stage, %error, "PARTIAL SETTLEMENT: money moved but settlement did not finish, resume required");
            }
            SettlementEvent::IntentFinalizeFailed { intent_id, error } => {
                tracing::warn!(%intent_id, %error, "settlement finished but intent was not marked complete");
            }
        }
    }
}
