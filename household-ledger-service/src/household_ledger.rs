use household_ledger_api::service::budget_spent_aggregator::BudgetSpentAggregator;
use household_ledger_db::store::LedgerStore;
use household_ledger_store::LedgerRepositories;
use std::sync::Arc;

use crate::config::SettlementConfig;
use crate::debt_netting::DebtNettingEngine;
use crate::events::{SettlementEvents, TracingEvents};
use crate::settlement::SettlementExecutor;
use crate::split_ledger::SplitLedger;
use crate::split_ratio::SplitRatioCalculator;

/// All settlement services wired over one store.
///
/// This should be used as a singleton throughout the application; the debt
/// cache it owns is shared by the split ledger and the settlement executor.
pub struct HouseholdLedger {
    pub repos: LedgerRepositories,
    pub split_ratio_calculator: SplitRatioCalculator,
    pub split_ledger: SplitLedger,
    pub debt_netting: Arc<DebtNettingEngine>,
    pub settlement_executor: SettlementExecutor,
}

impl HouseholdLedger {
    pub fn new(
        store: Arc<dyn LedgerStore>,
        aggregator: Arc<dyn BudgetSpentAggregator>,
        config: SettlementConfig,
    ) -> Self {
        Self::with_events(store, aggregator, config, Arc::new(TracingEvents))
    }

    pub fn with_events(
        store: Arc<dyn LedgerStore>,
        aggregator: Arc<dyn BudgetSpentAggregator>,
        config: SettlementConfig,
        events: Arc<dyn SettlementEvents>,
    ) -> Self {
        let repos = LedgerRepositories::new(store);
        let split_ratio_calculator = SplitRatioCalculator::new(repos.clone());
        let debt_netting = Arc::new(DebtNettingEngine::new(repos.clone(), &config));
        let split_ledger = SplitLedger::new(repos.clone(), split_ratio_calculator.clone(), debt_netting.clone());
        let settlement_executor =
            SettlementExecutor::new(repos.clone(), aggregator, debt_netting.clone(), config).with_events(events);
        Self {
            repos,
            split_ratio_calculator,
            split_ledger,
            debt_netting,
            settlement_executor,
        }
    }
}
