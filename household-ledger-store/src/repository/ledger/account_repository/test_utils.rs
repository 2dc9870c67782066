use household_ledger_db::models::ledger::account::{AccountModel, AccountType};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use uuid::Uuid;

pub fn create_test_account(owner_user_id: Uuid, household_id: Uuid, balance: Decimal) -> AccountModel {
    AccountModel {
        id: Uuid::new_v4(),
        owner_user_id,
        household_id,
        name: HeaplessString::try_from("Checking").unwrap(),
        balance,
        account_type: AccountType::Asset,
        is_excluded_from_budget: false,
        is_active: true,
    }
}
