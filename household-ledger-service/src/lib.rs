pub mod config;
pub mod events;
pub mod split_ratio;
pub mod split_ledger;
pub mod debt_netting;
pub mod settlement;
pub mod household_ledger;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{OverdrawPolicy, SettlementConfig};
pub use debt_netting::DebtNettingEngine;
pub use events::{SettlementEvent, SettlementEvents, TracingEvents};
pub use household_ledger::HouseholdLedger;
pub use settlement::{SettlementExecutor, SettlementStage};
pub use split_ledger::SplitLedger;
pub use split_ratio::SplitRatioCalculator;
