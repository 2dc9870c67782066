use chrono::NaiveDate;
use household_ledger_db::models::ledger::transaction::{TransactionModel, TransactionType};
use rust_decimal::Decimal;
use uuid::Uuid;

pub fn create_test_expense(
    owner_user_id: Uuid,
    household_id: Uuid,
    account_id: Uuid,
    amount: Decimal,
) -> TransactionModel {
    TransactionModel {
        id: Uuid::new_v4(),
        owner_user_id,
        household_id,
        account_id,
        category_id: Uuid::new_v4(),
        transaction_type: TransactionType::Expense,
        amount,
        date: NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
        is_shared: false,
        paid_by_user_id: None,
        is_excluded_from_budget: false,
        description: None,
    }
}

/// A shared expense fronted by its owner
pub fn create_test_shared_expense(
    payer_user_id: Uuid,
    household_id: Uuid,
    account_id: Uuid,
    amount: Decimal,
) -> TransactionModel {
    TransactionModel {
        is_shared: true,
        paid_by_user_id: Some(payer_user_id),
        ..create_test_expense(payer_user_id, household_id, account_id, amount)
    }
}
