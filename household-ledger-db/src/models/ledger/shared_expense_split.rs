use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::document::Document;
use crate::models::identifiable::Identifiable;
use crate::store::collection::Collection;

/// One household member's obligation for one shared transaction.
///
/// Splits exist only for members other than the payer; the payer's own share
/// is implicit in the transaction amount. `owed_to_user_id` is recorded when
/// the split is created and is the authoritative debt direction. The record
/// carries no household id: household scoping goes through the parent
/// transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedExpenseSplitModel {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub ower_user_id: Uuid,
    pub owed_to_user_id: Uuid,
    pub split_amount: Decimal,
    /// Share in percent (0..=100) the amount was derived from
    pub split_percentage: Decimal,
    pub is_paid: bool,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Identifiable for SharedExpenseSplitModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Document for SharedExpenseSplitModel {
    const COLLECTION: Collection = Collection::SharedExpenseSplits;

    fn validate(&self) -> Result<(), String> {
        if self.split_amount < Decimal::ZERO {
            return Err(format!("Split {} has a negative amount {}", self.id, self.split_amount));
        }
        if self.split_percentage < Decimal::ZERO || self.split_percentage > Decimal::ONE_HUNDRED {
            return Err(format!(
                "Split {} has percentage {} outside 0..=100",
                self.id, self.split_percentage
            ));
        }
        if self.ower_user_id == self.owed_to_user_id {
            return Err(format!("Split {} is owed by the payer to themselves", self.id));
        }
        Ok(())
    }
}
