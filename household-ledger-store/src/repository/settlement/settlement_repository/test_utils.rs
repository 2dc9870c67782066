use chrono::{DateTime, Utc};
use household_ledger_db::models::settlement::settlement::SettlementModel;
use rust_decimal::Decimal;
use uuid::Uuid;

pub fn create_test_settlement(
    household_id: Uuid,
    payer_user_id: Uuid,
    receiver_user_id: Uuid,
    amount: Decimal,
    settled_at: DateTime<Utc>,
) -> SettlementModel {
    SettlementModel {
        id: Uuid::new_v4(),
        household_id,
        payer_user_id,
        receiver_user_id,
        amount,
        payer_account_id: Uuid::new_v4(),
        receiver_account_id: Uuid::new_v4(),
        note: None,
        settled_at,
    }
}
