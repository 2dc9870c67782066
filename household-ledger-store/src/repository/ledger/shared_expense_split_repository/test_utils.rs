use chrono::Utc;
use household_ledger_db::models::ledger::shared_expense_split::SharedExpenseSplitModel;
use rust_decimal::Decimal;
use uuid::Uuid;

pub fn create_test_split(
    transaction_id: Uuid,
    ower_user_id: Uuid,
    owed_to_user_id: Uuid,
    split_amount: Decimal,
    split_percentage: Decimal,
) -> SharedExpenseSplitModel {
    SharedExpenseSplitModel {
        id: Uuid::new_v4(),
        transaction_id,
        ower_user_id,
        owed_to_user_id,
        split_amount,
        split_percentage,
        is_paid: false,
        paid_at: None,
        created_at: Utc::now(),
    }
}
