pub mod money;
pub mod split_ratio;
pub mod debt_balance;
pub mod budget_period;
pub mod settlement_request;
pub mod settlement_outcome;

pub use money::*;
pub use split_ratio::*;
pub use debt_balance::*;
pub use budget_period::*;
pub use settlement_request::*;
pub use settlement_outcome::*;
