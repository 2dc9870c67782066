use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::document::Document;
use crate::models::identifiable::Identifiable;
use crate::store::collection::Collection;

/// # Documentation
/// - Immutable audit entry of one debt-clearing event.
/// - Written exactly once per settlement execution and never updated.
/// - History display only: balances and splits are never derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementModel {
    pub id: Uuid,
    pub household_id: Uuid,
    pub payer_user_id: Uuid,
    pub receiver_user_id: Uuid,
    pub amount: Decimal,
    pub payer_account_id: Uuid,
    pub receiver_account_id: Uuid,
    #[serde(default)]
    pub note: Option<HeaplessString<500>>,
    pub settled_at: DateTime<Utc>,
}

impl Identifiable for SettlementModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Document for SettlementModel {
    const COLLECTION: Collection = Collection::Settlements;

    fn validate(&self) -> Result<(), String> {
        if self.amount <= Decimal::ZERO {
            return Err(format!("Settlement {} has a non-positive amount {}", self.id, self.amount));
        }
        Ok(())
    }
}
