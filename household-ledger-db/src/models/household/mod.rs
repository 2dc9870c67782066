pub mod household_member;
pub mod budget_summary;

pub use household_member::*;
pub use budget_summary::*;
