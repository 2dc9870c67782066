use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Net outstanding debt between two household members.
///
/// A positive `net_balance` means the first user owes the second. When
/// `amount` is zero the direction fields are placeholders (`who_owes_user_id`
/// is the first user) and must not be acted on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtBalance {
    pub net_balance: Decimal,
    pub who_owes_user_id: Uuid,
    pub who_is_owed_user_id: Uuid,
    pub amount: Decimal,
}

impl DebtBalance {
    pub fn is_settled(&self) -> bool {
        self.amount.is_zero()
    }
}
