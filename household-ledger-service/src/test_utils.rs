use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use household_ledger_api::domain::budget_period::BudgetPeriod;
use household_ledger_api::domain::settlement_request::SettlementRequest;
use household_ledger_api::service::budget_spent_aggregator::BudgetSpentAggregator;
use household_ledger_db::models::ledger::account::AccountModel;
use household_ledger_db::models::ledger::shared_expense_split::SharedExpenseSplitModel;
use household_ledger_db::models::ledger::transaction::TransactionModel;
use household_ledger_db::repository::create_batch::CreateBatch;
use household_ledger_store::repository::household::budget_summary_repository::test_utils::create_test_budget_summary;
use household_ledger_store::repository::household::household_member_repository::test_utils::create_test_member;
use household_ledger_store::repository::ledger::account_repository::test_utils::create_test_account;
use household_ledger_store::repository::ledger::transaction_repository::test_utils::create_test_shared_expense;
use household_ledger_store::{LedgerRepositories, MemoryLedgerStore};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::SettlementConfig;
use crate::events::{SettlementEvent, SettlementEvents};
use crate::household_ledger::HouseholdLedger;

/// Starting balance of every fixture account
pub const OPENING_BALANCE: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Records every emitted event for assertions
#[derive(Default)]
pub struct RecordingEvents {
    events: Mutex<Vec<SettlementEvent>>,
}

impl RecordingEvents {
    pub fn events(&self) -> Vec<SettlementEvent> {
        self.events.lock().clone()
    }

    pub fn count(&self, predicate: impl Fn(&SettlementEvent) -> bool) -> usize {
        self.events.lock().iter().filter(|e| predicate(e)).count()
    }
}

impl SettlementEvents for RecordingEvents {
    fn emit(&self, event: SettlementEvent) {
        self.events.lock().push(event);
    }
}

/// Budget aggregator keeping spent amounts in memory
#[derive(Default)]
pub struct InMemoryBudgetAggregator {
    default_period: Option<BudgetPeriod>,
    periods: Mutex<HashMap<Uuid, BudgetPeriod>>,
    spent: Mutex<HashMap<(Uuid, Uuid, NaiveDate), Decimal>>,
    fail_updates: AtomicBool,
    updates: AtomicUsize,
}

impl InMemoryBudgetAggregator {
    /// Every member without an explicit period is in `period`
    pub fn with_default_period(period: BudgetPeriod) -> Self {
        Self {
            default_period: Some(period),
            ..Self::default()
        }
    }

    pub fn set_period(&self, user_id: Uuid, period: BudgetPeriod) {
        self.periods.lock().insert(user_id, period);
    }

    pub fn set_spent(&self, user_id: Uuid, category_id: Uuid, period_start: NaiveDate, spent: Decimal) {
        self.spent.lock().insert((user_id, category_id, period_start), spent);
    }

    pub fn spent(&self, user_id: Uuid, category_id: Uuid, period_start: NaiveDate) -> Decimal {
        self.spent
            .lock()
            .get(&(user_id, category_id, period_start))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BudgetSpentAggregator for InMemoryBudgetAggregator {
    async fn get_member_budget_period(&self, user_id: Uuid, household_id: Uuid) -> anyhow::Result<BudgetPeriod> {
        self.periods
            .lock()
            .get(&user_id)
            .copied()
            .or(self.default_period)
            .ok_or_else(|| anyhow::anyhow!("No budget period for user {user_id} in household {household_id}"))
    }

    async fn get_budget_spent_amount(
        &self,
        user_id: Uuid,
        category_id: Uuid,
        period_start: NaiveDate,
    ) -> anyhow::Result<Decimal> {
        Ok(self.spent(user_id, category_id, period_start))
    }

    async fn update_budget_spent_amount(
        &self,
        user_id: Uuid,
        category_id: Uuid,
        period_start: NaiveDate,
        new_spent_amount: Decimal,
    ) -> anyhow::Result<()> {
        if self.fail_updates.load(Ordering::SeqCst) {
            anyhow::bail!("Budget store rejected update for category {category_id}");
        }
        self.set_spent(user_id, category_id, period_start, new_spent_amount);
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// The budget period containing the fixture transaction date
pub fn april_2024() -> BudgetPeriod {
    BudgetPeriod::new(
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
    )
}

pub fn test_ledger() -> (
    Arc<MemoryLedgerStore>,
    HouseholdLedger,
    Arc<InMemoryBudgetAggregator>,
    Arc<RecordingEvents>,
) {
    test_ledger_with_config(SettlementConfig::default())
}

pub fn test_ledger_with_config(
    config: SettlementConfig,
) -> (
    Arc<MemoryLedgerStore>,
    HouseholdLedger,
    Arc<InMemoryBudgetAggregator>,
    Arc<RecordingEvents>,
) {
    let store = Arc::new(MemoryLedgerStore::new());
    let aggregator = Arc::new(InMemoryBudgetAggregator::with_default_period(april_2024()));
    let events = Arc::new(RecordingEvents::default());
    let ledger = HouseholdLedger::with_events(store.clone(), aggregator.clone(), config, events.clone());
    (store, ledger, aggregator, events)
}

/// A seeded household: members in join order, one account each
pub struct HouseholdFixture {
    pub household_id: Uuid,
    pub members: Vec<Uuid>,
    pub accounts: Vec<AccountModel>,
}

impl HouseholdFixture {
    pub fn account_of(&self, user_id: Uuid) -> &AccountModel {
        let index = self.members.iter().position(|m| *m == user_id).unwrap();
        &self.accounts[index]
    }

    /// `payer` settles `amount` with `receiver` between their fixture accounts
    pub fn settlement_request(&self, payer: Uuid, receiver: Uuid, amount: Decimal) -> SettlementRequest {
        SettlementRequest::new(
            self.household_id,
            payer,
            receiver,
            amount,
            self.account_of(payer).id,
            self.account_of(receiver).id,
        )
    }
}

/// Seed one member per entry; `Some(income)` also records a budget summary
pub async fn seed_household(
    repos: &LedgerRepositories,
    incomes: &[Option<Decimal>],
) -> Result<HouseholdFixture, Box<dyn std::error::Error + Send + Sync>> {
    let household_id = Uuid::new_v4();
    let joined = Utc::now() - Duration::days(365);
    let session = repos.begin();

    let mut members = Vec::with_capacity(incomes.len());
    let mut member_models = Vec::with_capacity(incomes.len());
    let mut summaries = Vec::new();
    let mut accounts = Vec::with_capacity(incomes.len());
    for (index, income) in incomes.iter().enumerate() {
        let user_id = Uuid::new_v4();
        members.push(user_id);
        member_models.push(create_test_member(household_id, user_id, joined + Duration::days(index as i64)));
        if let Some(income) = income {
            summaries.push(create_test_budget_summary(user_id, household_id, april_2024().start, *income));
        }
        accounts.push(create_test_account(user_id, household_id, OPENING_BALANCE));
    }

    session.household_member_repository.create_batch(member_models).await?;
    session.budget_summary_repository.create_batch(summaries).await?;
    let accounts = session.account_repository.create_batch(accounts).await?;
    session.commit().await?;

    Ok(HouseholdFixture {
        household_id,
        members,
        accounts,
    })
}

/// Seed a shared expense fronted by `payer` from their fixture account
pub async fn seed_shared_expense(
    repos: &LedgerRepositories,
    household: &HouseholdFixture,
    payer: Uuid,
    amount: Decimal,
) -> Result<TransactionModel, Box<dyn std::error::Error + Send + Sync>> {
    let session = repos.begin();
    let expense = create_test_shared_expense(payer, household.household_id, household.account_of(payer).id, amount);
    let mut created = session.transaction_repository.create_batch(vec![expense]).await?;
    session.commit().await?;
    created.pop().ok_or_else(|| "expense not created".into())
}

/// Seed a shared expense and split it with the rest of the household
pub async fn seed_split_expense(
    ledger: &HouseholdLedger,
    household: &HouseholdFixture,
    payer: Uuid,
    amount: Decimal,
) -> Result<(TransactionModel, Vec<SharedExpenseSplitModel>), Box<dyn std::error::Error + Send + Sync>> {
    let expense = seed_shared_expense(&ledger.repos, household, payer, amount).await?;
    let splits = ledger
        .split_ledger
        .create_expense_splits(expense.id, expense.amount, household.household_id, payer)
        .await?;
    Ok((expense, splits))
}
