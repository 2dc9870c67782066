use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::document::Document;
use crate::models::identifiable::Identifiable;
use crate::store::collection::Collection;

/// Persisted saga state of one settlement execution.
///
/// The intent is written before any money moves. Every later status
/// transition is committed in the same batch as the step it describes, so the
/// stored status always matches what actually committed:
///
/// ```text
/// Pending -> Transferred -> SplitsResolved -> Complete
///    \
///     -> Failed   (nothing moved)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementIntentModel {
    pub id: Uuid,
    pub household_id: Uuid,
    pub payer_user_id: Uuid,
    pub receiver_user_id: Uuid,
    pub amount: Decimal,
    pub payer_account_id: Uuid,
    pub receiver_account_id: Uuid,
    #[serde(default)]
    pub note: Option<HeaplessString<500>>,
    #[serde(serialize_with = "serialize_settlement_status", deserialize_with = "deserialize_settlement_status")]
    pub status: SettlementStatus,
    /// Fingerprint of the originating request
    pub request_hash: i64,
    /// Set in the same batch as the settlement history record
    #[serde(default)]
    pub settlement_id: Option<Uuid>,
    /// Balances written by the transfer step
    #[serde(default)]
    pub new_payer_balance: Option<Decimal>,
    #[serde(default)]
    pub new_receiver_balance: Option<Decimal>,
    /// Per-transaction reductions applied when splits were resolved
    #[serde(default)]
    pub resolved_transactions: Vec<ResolvedTransaction>,
    #[serde(default)]
    pub splits_settled: u32,
    #[serde(default)]
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SettlementIntentModel {
    pub fn is_finished(&self) -> bool {
        matches!(self.status, SettlementStatus::Complete | SettlementStatus::Failed)
    }
}

/// A source transaction shrunk by a settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTransaction {
    pub transaction_id: Uuid,
    pub original_amount: Decimal,
    pub new_amount: Decimal,
}

impl ResolvedTransaction {
    pub fn reduction(&self) -> Decimal {
        self.original_amount - self.new_amount
    }
}

impl Identifiable for SettlementIntentModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Document for SettlementIntentModel {
    const COLLECTION: Collection = Collection::SettlementIntents;

    fn validate(&self) -> Result<(), String> {
        if self.amount <= Decimal::ZERO {
            return Err(format!("Settlement intent {} has a non-positive amount {}", self.id, self.amount));
        }
        if let Some(resolved) = self.resolved_transactions.iter().find(|r| r.new_amount > r.original_amount) {
            return Err(format!(
                "Settlement intent {} grows transaction {}",
                self.id, resolved.transaction_id
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SettlementStatus {
    /// Recorded, no money moved yet
    Pending,
    /// Account balances written
    Transferred,
    /// Splits marked paid and source transactions shrunk
    SplitsResolved,
    /// Budget backfill attempted, nothing left to do
    Complete,
    /// Aborted before any money moved
    Failed,
}

impl SettlementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettlementStatus::Pending => "pending",
            SettlementStatus::Transferred => "transferred",
            SettlementStatus::SplitsResolved => "splits_resolved",
            SettlementStatus::Complete => "complete",
            SettlementStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn serialize_settlement_status<S>(status: &SettlementStatus, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(status.as_str())
}

pub fn deserialize_settlement_status<'de, D>(deserializer: D) -> Result<SettlementStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    match s.as_str() {
        "pending" => Ok(SettlementStatus::Pending),
        "transferred" => Ok(SettlementStatus::Transferred),
        "splits_resolved" => Ok(SettlementStatus::SplitsResolved),
        "complete" => Ok(SettlementStatus::Complete),
        "failed" => Ok(SettlementStatus::Failed),
        _ => Err(serde::de::Error::custom(format!("Unknown settlement status: {s}"))),
    }
}
