use household_ledger_api::domain::money::round_percentage;
use household_ledger_api::domain::split_ratio::SplitRatio;
use household_ledger_api::error::{LedgerError, LedgerResult};
use household_ledger_store::LedgerRepositories;
use rust_decimal::Decimal;
use uuid::Uuid;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Derives each member's share of a shared expense from declared incomes.
#[derive(Clone)]
pub struct SplitRatioCalculator {
    repos: LedgerRepositories,
}

impl SplitRatioCalculator {
    pub fn new(repos: LedgerRepositories) -> Self {
        Self { repos }
    }

    /// Compute the current split ratio of a household
    ///
    /// # Arguments
    /// * `household_id` - Household whose active members share expenses
    ///
    /// # Returns
    /// * `Ok(Vec<SplitRatio>)` - One entry per active member in join order,
    ///   percentages summing to exactly 100.00; empty if the household has no
    ///   active members
    /// * `Err(LedgerError::DatabaseError)` - Members or incomes could not be read.
    ///   Callers must not fall back to a default split in this case.
    pub async fn calculate_split_ratio(&self, household_id: Uuid) -> LedgerResult<Vec<SplitRatio>> {
        let session = self.repos.begin();
        let members = session
            .household_member_repository
            .find_active_by_household_id(household_id)
            .await
            .map_err(LedgerError::database)?;

        let mut incomes = Vec::with_capacity(members.len());
        for member in &members {
            let latest = session
                .budget_summary_repository
                .find_latest_by_user_id(member.user_id)
                .await
                .map_err(LedgerError::database)?;
            incomes.push((member.user_id, latest.map(|s| s.total_income).unwrap_or(Decimal::ZERO)));
        }

        Ok(ratios_from_incomes(&incomes))
    }
}

/// Proportional-to-income shares, or an even split when nobody declared income.
///
/// Each share is rounded to two decimals; the rounding remainder goes to the
/// last member (in the given order) whose share can absorb it.
pub fn ratios_from_incomes(incomes: &[(Uuid, Decimal)]) -> Vec<SplitRatio> {
    if incomes.is_empty() {
        return Vec::new();
    }

    let total_income: Decimal = incomes.iter().map(|(_, income)| *income).sum();
    let member_count = Decimal::from(incomes.len());
    let mut ratios: Vec<SplitRatio> = incomes
        .iter()
        .map(|(user_id, income)| {
            let share = if total_income.is_zero() {
                HUNDRED / member_count
            } else {
                *income / total_income * HUNDRED
            };
            SplitRatio {
                user_id: *user_id,
                percentage: round_percentage(share),
                income: *income,
            }
        })
        .collect();

    let remainder = HUNDRED - ratios.iter().map(|r| r.percentage).sum::<Decimal>();
    if !remainder.is_zero() {
        if let Some(absorber) = ratios.iter_mut().rev().find(|r| {
            let adjusted = r.percentage + remainder;
            adjusted >= Decimal::ZERO && adjusted <= HUNDRED
        }) {
            absorber.percentage += remainder;
        }
    }
    ratios
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::seed_household;
    use household_ledger_store::MemoryLedgerStore;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn users(n: u128) -> Vec<Uuid> {
        (1..=n).map(Uuid::from_u128).collect()
    }

    #[test]
    fn test_even_split_absorbs_remainder_in_last_member() {
        let ids = users(3);
        let ratios = ratios_from_incomes(&ids.iter().map(|id| (*id, Decimal::ZERO)).collect::<Vec<_>>());

        let percentages: Vec<Decimal> = ratios.iter().map(|r| r.percentage).collect();
        assert_eq!(percentages, vec![dec!(33.33), dec!(33.33), dec!(33.34)]);
        assert_eq!(percentages.iter().sum::<Decimal>(), dec!(100.00));
    }

    #[test]
    fn test_two_members_without_income_split_evenly() {
        let ids = users(2);
        let ratios = ratios_from_incomes(&[(ids[0], Decimal::ZERO), (ids[1], Decimal::ZERO)]);
        assert_eq!(ratios[0].percentage, dec!(50));
        assert_eq!(ratios[1].percentage, dec!(50));
    }

    #[test]
    fn test_income_proportional_split() {
        let ids = users(2);
        let ratios = ratios_from_incomes(&[(ids[0], dec!(6000)), (ids[1], dec!(4000))]);
        assert_eq!(ratios[0].percentage, dec!(60));
        assert_eq!(ratios[1].percentage, dec!(40));
        assert_eq!(ratios[0].income, dec!(6000));
    }

    #[test]
    fn test_proportional_split_sums_to_hundred() {
        let ids = users(3);
        let ratios = ratios_from_incomes(&[(ids[0], dec!(1000)), (ids[1], dec!(1000)), (ids[2], dec!(1000))]);
        assert_eq!(ratios.iter().map(|r| r.percentage).sum::<Decimal>(), dec!(100));
        assert_eq!(ratios[2].percentage, dec!(33.34));
    }

    #[test]
    fn test_remainder_skips_member_that_would_go_negative() {
        let ids = users(7);
        let mut incomes: Vec<(Uuid, Decimal)> = ids.iter().take(6).map(|id| (*id, dec!(1))).collect();
        incomes.push((ids[6], Decimal::ZERO));
        let ratios = ratios_from_incomes(&incomes);

        assert_eq!(ratios[6].percentage, Decimal::ZERO);
        assert!(ratios.iter().all(|r| r.percentage >= Decimal::ZERO));
        assert_eq!(ratios.iter().map(|r| r.percentage).sum::<Decimal>(), dec!(100));
    }

    #[test]
    fn test_no_members_no_ratios() {
        assert!(ratios_from_incomes(&[]).is_empty());
    }

    #[tokio::test]
    async fn test_calculate_split_ratio_uses_latest_income() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let store = Arc::new(MemoryLedgerStore::new());
        let repos = LedgerRepositories::new(store.clone());
        let household = seed_household(&repos, &[Some(dec!(6000)), Some(dec!(4000))]).await?;

        let ratios = SplitRatioCalculator::new(repos).calculate_split_ratio(household.household_id).await?;
        assert_eq!(ratios.len(), 2);
        assert_eq!(ratios[0].user_id, household.members[0]);
        assert_eq!(ratios[0].percentage, dec!(60));
        assert_eq!(ratios[1].percentage, dec!(40));
        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_store_is_an_error() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let store = Arc::new(MemoryLedgerStore::new());
        let repos = LedgerRepositories::new(store.clone());
        store.set_unreachable(true);

        let result = SplitRatioCalculator::new(repos).calculate_split_ratio(Uuid::new_v4()).await;
        assert!(matches!(result, Err(LedgerError::DatabaseError(_))));
        Ok(())
    }
}
