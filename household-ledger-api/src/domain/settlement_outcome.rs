use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of a settlement execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementOutcome {
    pub settlement_id: Uuid,
    /// Persisted saga record tracking this settlement
    pub intent_id: Uuid,
    pub new_payer_balance: Decimal,
    pub new_receiver_balance: Decimal,
    /// Number of splits marked paid
    pub splits_settled: usize,
    /// Number of source transactions whose amount was shrunk
    pub transactions_shrunk: usize,
    /// Budget categories whose spent amount could not be backfilled
    pub budget_updates_failed: usize,
}
