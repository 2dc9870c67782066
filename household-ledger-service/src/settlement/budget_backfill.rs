use chrono::NaiveDate;
use household_ledger_api::domain::budget_period::BudgetPeriod;
use household_ledger_api::domain::money::round_money;
use household_ledger_api::error::LedgerError;
use household_ledger_db::models::settlement::settlement_intent::SettlementIntentModel;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use super::executor::SettlementExecutor;
use super::resolve_splits::ShrunkTransaction;
use crate::events::SettlementEvent;

impl SettlementExecutor {
    /// Take the settled amounts out of the owners' current budget periods.
    ///
    /// Only expenses that count against a budget and are dated inside their
    /// owner's current period are backfilled. Reductions are summed per
    /// (owner, category, period) before calling the aggregator. Nothing here
    /// fails the settlement: every failure is reported as a
    /// `BudgetUpdateFailed` event and counted.
    ///
    /// # Returns
    /// Number of failed period lookups and category updates
    pub(crate) async fn backfill_budgets(
        &self,
        intent: &SettlementIntentModel,
        shrunk: &[ShrunkTransaction],
    ) -> usize {
        let mut failures = 0;
        let mut periods: HashMap<Uuid, Option<BudgetPeriod>> = HashMap::new();
        let mut reductions: BTreeMap<(Uuid, Uuid, NaiveDate), Decimal> = BTreeMap::new();

        for ShrunkTransaction { transaction, reduction } in shrunk {
            if !transaction.counts_against_budget() || reduction.is_zero() {
                continue;
            }
            let owner = transaction.owner_user_id;
            if !periods.contains_key(&owner) {
                let period = match self
                    .aggregator
                    .get_member_budget_period(owner, intent.household_id)
                    .await
                {
                    Ok(period) => Some(period),
                    Err(e) => {
                        failures += 1;
                        self.report_budget_failure(intent, owner, None, e);
                        None
                    }
                };
                periods.insert(owner, period);
            }
            let Some(period) = periods.get(&owner).copied().flatten() else {
                continue;
            };
            if !period.contains(transaction.date) {
                continue;
            }
            *reductions
                .entry((owner, transaction.category_id, period.start))
                .or_default() += *reduction;
        }

        for ((user_id, category_id, period_start), reduction) in reductions {
            if let Err(e) = self
                .reduce_spent(user_id, category_id, period_start, reduction)
                .await
            {
                failures += 1;
                self.report_budget_failure(intent, user_id, Some(category_id), e);
            }
        }
        failures
    }

    async fn reduce_spent(
        &self,
        user_id: Uuid,
        category_id: Uuid,
        period_start: NaiveDate,
        reduction: Decimal,
    ) -> anyhow::Result<()> {
        let current = self
            .aggregator
            .get_budget_spent_amount(user_id, category_id, period_start)
            .await?;
        let new_spent = round_money((current - reduction).max(Decimal::ZERO));
        self.aggregator
            .update_budget_spent_amount(user_id, category_id, period_start, new_spent)
            .await
    }

    fn report_budget_failure(
        &self,
        intent: &SettlementIntentModel,
        user_id: Uuid,
        category_id: Option<Uuid>,
        error: anyhow::Error,
    ) {
        let error = LedgerError::BudgetUpdateFailed(format!("{error:#}"));
        self.events.emit(SettlementEvent::BudgetUpdateFailed {
            intent_id: intent.id,
            user_id,
            category_id,
            error: error.to_string(),
        });
    }
}
