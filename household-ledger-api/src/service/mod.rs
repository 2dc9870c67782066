pub mod budget_spent_aggregator;

pub use budget_spent_aggregator::*;
