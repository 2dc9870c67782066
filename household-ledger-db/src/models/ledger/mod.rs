pub mod account;
pub mod transaction;
pub mod shared_expense_split;

pub use account::*;
pub use transaction::*;
pub use shared_expense_split::*;
