use crate::executor::Executor;

pub struct TransactionRepositoryImpl {
    pub executor: Executor,
}

impl TransactionRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}
