use chrono::NaiveDate;
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::document::Document;
use crate::models::identifiable::Identifiable;
use crate::store::collection::Collection;

/// A single income or expense event booked against one account.
///
/// For a shared expense, `amount` always equals the payer's retained portion
/// plus every unpaid split. Settling a split shrinks `amount` by exactly that
/// split's amount so the expense stops counting twice against the payer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionModel {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub household_id: Uuid,
    pub account_id: Uuid,
    pub category_id: Uuid,
    #[serde(serialize_with = "serialize_transaction_type", deserialize_with = "deserialize_transaction_type")]
    pub transaction_type: TransactionType,
    /// Always non-negative, two decimal places
    pub amount: Decimal,
    /// Calendar date, no time component
    pub date: NaiveDate,
    pub is_shared: bool,
    /// Who fronted the money when shared
    pub paid_by_user_id: Option<Uuid>,
    pub is_excluded_from_budget: bool,
    #[serde(default)]
    pub description: Option<HeaplessString<255>>,
}

impl TransactionModel {
    /// The member who fronted the money: `paid_by_user_id`, or the owner.
    pub fn payer_user_id(&self) -> Uuid {
        self.paid_by_user_id.unwrap_or(self.owner_user_id)
    }

    /// True when this transaction counts against a budget category.
    pub fn counts_against_budget(&self) -> bool {
        self.transaction_type == TransactionType::Expense && !self.is_excluded_from_budget
    }
}

impl Identifiable for TransactionModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Document for TransactionModel {
    const COLLECTION: Collection = Collection::Transactions;

    fn validate(&self) -> Result<(), String> {
        if self.amount < Decimal::ZERO {
            return Err(format!("Transaction {} has a negative amount {}", self.id, self.amount));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionType {
    Income,
    Expense,
}

pub fn serialize_transaction_type<S>(transaction_type: &TransactionType, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(match transaction_type {
        TransactionType::Income => "income",
        TransactionType::Expense => "expense",
    })
}

pub fn deserialize_transaction_type<'de, D>(deserializer: D) -> Result<TransactionType, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    match s.as_str() {
        "income" => Ok(TransactionType::Income),
        "expense" => Ok(TransactionType::Expense),
        _ => Err(serde::de::Error::custom(format!("Unknown transaction type: {s}"))),
    }
}
