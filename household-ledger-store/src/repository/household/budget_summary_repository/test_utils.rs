use chrono::NaiveDate;
use household_ledger_db::models::household::budget_summary::BudgetSummaryModel;
use rust_decimal::Decimal;
use uuid::Uuid;

pub fn create_test_budget_summary(
    user_id: Uuid,
    household_id: Uuid,
    period_start: NaiveDate,
    total_income: Decimal,
) -> BudgetSummaryModel {
    BudgetSummaryModel {
        id: Uuid::new_v4(),
        user_id,
        household_id,
        period_start,
        period_end: period_start + chrono::Duration::days(29),
        total_income,
        total_allocated: Decimal::ZERO,
        total_spent: Decimal::ZERO,
    }
}
