pub mod repo_impl;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod create_batch;
pub mod find_active_by_household_id;

pub use repo_impl::HouseholdMemberRepositoryImpl;
