use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One household member's share of a shared expense.
///
/// Ratios are never persisted; they are recomputed from the latest declared
/// incomes every time a shared expense is created or displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitRatio {
    pub user_id: Uuid,
    /// Share in percent with two decimal places (0..=100)
    pub percentage: Decimal,
    /// Latest declared income used to derive the share (zero if none)
    pub income: Decimal,
}
