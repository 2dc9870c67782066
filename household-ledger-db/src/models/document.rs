use serde::de::DeserializeOwned;
use serde::Serialize;

use super::identifiable::Identifiable;
use crate::store::collection::Collection;

/// Trait for tagged records persisted in one Ledger Store collection.
///
/// Documents cross the store boundary as JSON objects. Decoding a document
/// deserializes it and then runs [`Document::validate`], so records with
/// negative amounts, unknown enum values or malformed dates never reach the
/// settlement core.
pub trait Document: Identifiable + Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection this record type lives in
    const COLLECTION: Collection;

    /// Checks the record's own invariants
    ///
    /// # Returns
    /// * `Ok(())` - The record is well formed
    /// * `Err(String)` - A description of the first violated invariant
    fn validate(&self) -> Result<(), String>;
}
