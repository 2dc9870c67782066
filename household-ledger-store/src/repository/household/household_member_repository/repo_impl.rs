use crate::executor::Executor;

pub struct HouseholdMemberRepositoryImpl {
    pub executor: Executor,
}

impl HouseholdMemberRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}
