use chrono::Utc;
use household_ledger_db::models::settlement::settlement_intent::{SettlementIntentModel, SettlementStatus};
use rust_decimal::Decimal;
use uuid::Uuid;

pub fn create_test_intent(household_id: Uuid, amount: Decimal, status: SettlementStatus) -> SettlementIntentModel {
    let now = Utc::now();
    SettlementIntentModel {
        id: Uuid::new_v4(),
        household_id,
        payer_user_id: Uuid::new_v4(),
        receiver_user_id: Uuid::new_v4(),
        amount,
        payer_account_id: Uuid::new_v4(),
        receiver_account_id: Uuid::new_v4(),
        note: None,
        status,
        request_hash: 0,
        settlement_id: None,
        new_payer_balance: None,
        new_receiver_balance: None,
        resolved_transactions: Vec::new(),
        splits_settled: 0,
        last_error: None,
        created_at: now,
        updated_at: now,
    }
}
