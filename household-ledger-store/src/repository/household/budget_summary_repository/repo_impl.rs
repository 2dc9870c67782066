use crate::executor::Executor;

pub struct BudgetSummaryRepositoryImpl {
    pub executor: Executor,
}

impl BudgetSummaryRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}
