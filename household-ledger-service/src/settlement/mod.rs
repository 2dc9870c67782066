pub mod executor;
pub mod resolve_splits;
pub mod budget_backfill;
pub mod resume;
pub mod history;

pub use executor::SettlementExecutor;

use std::fmt;

/// Step of a settlement, as reported in failures and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementStage {
    /// Recording the intent; nothing has moved yet
    Intent,
    /// Moving money between the two accounts
    Transfer,
    /// Appending the settlement history record
    History,
    /// Marking splits paid and shrinking their transactions
    ResolveSplits,
    /// Marking the intent complete
    Complete,
}

impl SettlementStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettlementStage::Intent => "intent",
            SettlementStage::Transfer => "transfer",
            SettlementStage::History => "history",
            SettlementStage::ResolveSplits => "resolve_splits",
            SettlementStage::Complete => "complete",
        }
    }
}

impl fmt::Display for SettlementStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
