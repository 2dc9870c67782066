pub mod household_member_repository;
pub mod budget_summary_repository;

pub use household_member_repository::HouseholdMemberRepositoryImpl;
pub use budget_summary_repository::BudgetSummaryRepositoryImpl;
