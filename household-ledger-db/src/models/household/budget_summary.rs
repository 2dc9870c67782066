use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::document::Document;
use crate::models::identifiable::Identifiable;
use crate::store::collection::Collection;

/// Denormalized per-user per-period budget totals.
///
/// Owned by the budget aggregator; the settlement core only reads
/// `total_income` from the latest period to derive split ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummaryModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub household_id: Uuid,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_income: Decimal,
    pub total_allocated: Decimal,
    pub total_spent: Decimal,
}

impl Identifiable for BudgetSummaryModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Document for BudgetSummaryModel {
    const COLLECTION: Collection = Collection::BudgetSummaries;

    fn validate(&self) -> Result<(), String> {
        if self.total_income < Decimal::ZERO {
            return Err(format!("Budget summary {} has negative income {}", self.id, self.total_income));
        }
        if self.period_end < self.period_start {
            return Err(format!("Budget summary {} ends before it starts", self.id));
        }
        Ok(())
    }
}
