use serde::{Deserialize, Serialize};
use std::fmt;

/// Named collections of the Ledger Store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Collection {
    Accounts,
    Transactions,
    SharedExpenseSplits,
    Settlements,
    SettlementIntents,
    HouseholdMembers,
    BudgetSummaries,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::Accounts,
        Collection::Transactions,
        Collection::SharedExpenseSplits,
        Collection::Settlements,
        Collection::SettlementIntents,
        Collection::HouseholdMembers,
        Collection::BudgetSummaries,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Accounts => "accounts",
            Collection::Transactions => "transactions",
            Collection::SharedExpenseSplits => "shared_expense_splits",
            Collection::Settlements => "settlements",
            Collection::SettlementIntents => "settlement_intents",
            Collection::HouseholdMembers => "household_members",
            Collection::BudgetSummaries => "budget_summaries",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
