use household_ledger_db::store::LedgerStore;
use std::error::Error;
use std::sync::Arc;

use crate::executor::Executor;
use crate::repository::household::{BudgetSummaryRepositoryImpl, HouseholdMemberRepositoryImpl};
use crate::repository::ledger::{
    AccountRepositoryImpl, SharedExpenseSplitRepositoryImpl, TransactionRepositoryImpl,
};
use crate::repository::settlement::{SettlementIntentRepositoryImpl, SettlementRepositoryImpl};

/// Entry point to the ledger repositories.
///
/// Holds the store handle and hands out sessions. This should be used as a
/// singleton throughout the application.
#[derive(Clone)]
pub struct LedgerRepositories {
    store: Arc<dyn LedgerStore>,
}

impl LedgerRepositories {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn LedgerStore> {
        &self.store
    }

    /// Create all repositories sharing a single unit of work
    pub fn begin(&self) -> LedgerSession {
        let executor = Executor::new(self.store.clone());
        LedgerSession {
            account_repository: Arc::new(AccountRepositoryImpl::new(executor.clone())),
            transaction_repository: Arc::new(TransactionRepositoryImpl::new(executor.clone())),
            split_repository: Arc::new(SharedExpenseSplitRepositoryImpl::new(executor.clone())),
            settlement_repository: Arc::new(SettlementRepositoryImpl::new(executor.clone())),
            settlement_intent_repository: Arc::new(SettlementIntentRepositoryImpl::new(executor.clone())),
            household_member_repository: Arc::new(HouseholdMemberRepositoryImpl::new(executor.clone())),
            budget_summary_repository: Arc::new(BudgetSummaryRepositoryImpl::new(executor.clone())),
            executor,
        }
    }
}

/// Repositories bound to one unit of work.
///
/// Writes made through any repository are staged and only reach the store on
/// `commit`, as one atomic batch.
pub struct LedgerSession {
    executor: Executor,
    pub account_repository: Arc<AccountRepositoryImpl>,
    pub transaction_repository: Arc<TransactionRepositoryImpl>,
    pub split_repository: Arc<SharedExpenseSplitRepositoryImpl>,
    pub settlement_repository: Arc<SettlementRepositoryImpl>,
    pub settlement_intent_repository: Arc<SettlementIntentRepositoryImpl>,
    pub household_member_repository: Arc<HouseholdMemberRepositoryImpl>,
    pub budget_summary_repository: Arc<BudgetSummaryRepositoryImpl>,
}

impl LedgerSession {
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    pub async fn commit(&self) -> Result<usize, Box<dyn Error + Send + Sync>> {
        self.executor.commit().await
    }

    pub async fn rollback(&self) -> usize {
        self.executor.rollback().await
    }
}
