pub mod repo_impl;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod create_batch;
pub mod find_latest_by_user_id;

pub use repo_impl::BudgetSummaryRepositoryImpl;
