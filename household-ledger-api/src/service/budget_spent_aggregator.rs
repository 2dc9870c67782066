use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::budget_period::BudgetPeriod;

/// Budget aggregate collaborator consumed by the settlement core.
///
/// The payday period math and the recomputation of budget totals live behind
/// this trait; the core only reads the current period, reads a category's
/// spent amount and writes a new one.
///
/// # Example
/// ```ignore
/// let period = aggregator.get_member_budget_period(user_id, household_id).await?;
/// let spent = aggregator.get_budget_spent_amount(user_id, category_id, period.start).await?;
/// aggregator.update_budget_spent_amount(user_id, category_id, period.start, spent - reduction).await?;
/// ```
#[async_trait]
pub trait BudgetSpentAggregator: Send + Sync {
    /// Current payday budget period of a household member
    async fn get_member_budget_period(
        &self,
        user_id: Uuid,
        household_id: Uuid,
    ) -> anyhow::Result<BudgetPeriod>;

    /// Spent amount of a category in the period starting at `period_start`
    async fn get_budget_spent_amount(
        &self,
        user_id: Uuid,
        category_id: Uuid,
        period_start: NaiveDate,
    ) -> anyhow::Result<Decimal>;

    /// Overwrite the spent amount of a category, updating the per-period summary
    ///
    /// # Arguments
    /// * `user_id` - Owner of the budget
    /// * `category_id` - Budget category
    /// * `period_start` - First day of the budget period
    /// * `new_spent_amount` - The new absolute spent amount
    async fn update_budget_spent_amount(
        &self,
        user_id: Uuid,
        category_id: Uuid,
        period_start: NaiveDate,
        new_spent_amount: Decimal,
    ) -> anyhow::Result<()>;
}
