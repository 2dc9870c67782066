//! Test helper module for store-backed repository tests
//!
//! Every context gets its own in-memory store, so tests are isolated without
//! any cleanup.

use crate::ledger_repositories::{LedgerRepositories, LedgerSession};
use crate::memory_store::MemoryLedgerStore;
use std::sync::Arc;

/// Test context holding a fresh store and the repositories over it
pub struct TestContext {
    pub store: Arc<MemoryLedgerStore>,
    pub repos: LedgerRepositories,
}

impl TestContext {
    /// Start a new session on the context's store
    pub fn session(&self) -> LedgerSession {
        self.repos.begin()
    }
}

/// Setup a test context with an empty store
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let ctx = setup_test_context().await?;
///     let session = ctx.session();
///     // stage writes through session repositories, then
///     session.commit().await?;
///     Ok(())
/// }
/// ```
pub async fn setup_test_context() -> Result<TestContext, Box<dyn std::error::Error + Send + Sync>> {
    let store = Arc::new(MemoryLedgerStore::new());
    let repos = LedgerRepositories::new(store.clone());
    Ok(TestContext { store, repos })
}
