pub mod executor;
pub mod ledger_repositories;
pub mod memory_store;
pub mod repository;
pub mod utils;

pub use executor::Executor;
pub use ledger_repositories::{LedgerRepositories, LedgerSession};
pub use memory_store::MemoryLedgerStore;

#[cfg(test)]
pub mod test_helper;
