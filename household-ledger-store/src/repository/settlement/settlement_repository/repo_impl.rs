use crate::executor::Executor;

/// Append-only settlement history. Records are created, never updated.
pub struct SettlementRepositoryImpl {
    pub executor: Executor,
}

impl SettlementRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}
