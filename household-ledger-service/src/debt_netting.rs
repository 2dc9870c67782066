use household_ledger_api::domain::debt_balance::DebtBalance;
use household_ledger_api::domain::money::round_money;
use household_ledger_api::error::{LedgerError, LedgerResult};
use household_ledger_store::LedgerRepositories;
use moka::future::Cache;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::SettlementConfig;
use crate::split_ledger::find_household_unpaid_splits;

/// (household, first user, second user)
type BalanceKey = (Uuid, Uuid, Uuid);

/// Nets the unpaid splits between two household members.
///
/// Results are cached for a short TTL and dropped whenever splits of the
/// household change through this crate.
pub struct DebtNettingEngine {
    repos: LedgerRepositories,
    cache: Cache<BalanceKey, DebtBalance>,
}

impl DebtNettingEngine {
    pub fn new(repos: LedgerRepositories, config: &SettlementConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.debt_cache_capacity)
            .time_to_live(config.debt_cache_ttl())
            .build();
        Self { repos, cache }
    }

    /// Net outstanding debt between `user_a` and `user_b` within a household
    ///
    /// # Arguments
    /// * `household_id` - Only splits of this household's shared transactions count
    /// * `user_a` - First member; a positive `net_balance` means this member owes
    /// * `user_b` - Second member
    ///
    /// # Returns
    /// * `Ok(DebtBalance)` - With `amount == 0` when fully settled, in which case
    ///   the direction fields must be ignored
    pub async fn calculate_debt_balance(
        &self,
        household_id: Uuid,
        user_a: Uuid,
        user_b: Uuid,
    ) -> LedgerResult<DebtBalance> {
        let key = (household_id, user_a, user_b);
        if let Some(balance) = self.cache.get(&key).await {
            return Ok(balance);
        }

        let balance = self.compute(household_id, user_a, user_b).await?;
        self.cache.insert(key, balance.clone()).await;
        Ok(balance)
    }

    async fn compute(&self, household_id: Uuid, user_a: Uuid, user_b: Uuid) -> LedgerResult<DebtBalance> {
        let session = self.repos.begin();
        let (a_owes_b, _) = find_household_unpaid_splits(&session, household_id, user_a, user_b)
            .await
            .map_err(LedgerError::database)?;
        let (b_owes_a, _) = find_household_unpaid_splits(&session, household_id, user_b, user_a)
            .await
            .map_err(LedgerError::database)?;

        let net: Decimal = a_owes_b.iter().map(|s| s.split_amount).sum::<Decimal>()
            - b_owes_a.iter().map(|s| s.split_amount).sum::<Decimal>();
        let net_balance = round_money(net);

        let (who_owes_user_id, who_is_owed_user_id) = if net_balance < Decimal::ZERO {
            (user_b, user_a)
        } else {
            (user_a, user_b)
        };
        Ok(DebtBalance {
            net_balance,
            who_owes_user_id,
            who_is_owed_user_id,
            amount: net_balance.abs(),
        })
    }

    /// Drop every cached balance of a household
    pub async fn invalidate_household(&self, household_id: Uuid) {
        let keys: Vec<BalanceKey> = self
            .cache
            .iter()
            .filter(|(key, _)| key.0 == household_id)
            .map(|(key, _)| *key)
            .collect();
        for key in keys {
            self.cache.invalidate(&key).await;
        }
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}
