use crate::executor::Executor;

pub struct SettlementIntentRepositoryImpl {
    pub executor: Executor,
}

impl SettlementIntentRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}
