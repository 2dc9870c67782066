use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::document::Document;
use crate::models::identifiable::Identifiable;
use crate::store::collection::Collection;

/// A named money container owned by one user within one household.
///
/// `balance` is authoritative. It changes only through transaction
/// create/update/delete and settlement transfers; nothing recomputes it
/// implicitly. Accounts are deactivated rather than deleted while referenced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountModel {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub household_id: Uuid,
    pub name: HeaplessString<100>,
    /// Signed current balance in CHF with two decimal places
    pub balance: Decimal,
    #[serde(serialize_with = "serialize_account_type", deserialize_with = "deserialize_account_type")]
    pub account_type: AccountType,
    pub is_excluded_from_budget: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Identifiable for AccountModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Document for AccountModel {
    const COLLECTION: Collection = Collection::Accounts;

    fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err(format!("Account {} has an empty name", self.id));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountType {
    Asset,
    Liability,
}

pub fn serialize_account_type<S>(account_type: &AccountType, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(match account_type {
        AccountType::Asset => "asset",
        AccountType::Liability => "liability",
    })
}

pub fn deserialize_account_type<'de, D>(deserializer: D) -> Result<AccountType, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    match s.as_str() {
        "asset" => Ok(AccountType::Asset),
        "liability" => Ok(AccountType::Liability),
        _ => Err(serde::de::Error::custom(format!("Unknown account type: {s}"))),
    }
}
