use crate::executor::Executor;

pub struct AccountRepositoryImpl {
    pub executor: Executor,
}

impl AccountRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}
