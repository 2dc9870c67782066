use crate::executor::Executor;

pub struct SharedExpenseSplitRepositoryImpl {
    pub executor: Executor,
}

impl SharedExpenseSplitRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}
