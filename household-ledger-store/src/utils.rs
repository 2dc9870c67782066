use household_ledger_db::models::document::Document;
use household_ledger_db::store::{FieldFilter, WriteOp};
use household_ledger_db::utils::hash_as_i64;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use uuid::Uuid;

use crate::executor::Executor;

/// A trait for converting a store document into a model.
pub trait TryFromDocument: Sized {
    /// Performs the conversion, rejecting malformed or invalid records.
    fn try_from_document(document: &Value) -> Result<Self, Box<dyn Error + Send + Sync>>;
}

impl<T: Document> TryFromDocument for T {
    fn try_from_document(document: &Value) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let item: T = serde_json::from_value(document.clone())
            .map_err(|e| format!("Malformed {} document: {e}", T::COLLECTION))?;
        item.validate()
            .map_err(|e| format!("Invalid {} document: {e}", T::COLLECTION))?;
        Ok(item)
    }
}

/// Runs an equality query and decodes every matching document.
pub async fn query_documents<T: Document>(
    executor: &Executor,
    filters: &[FieldFilter],
) -> Result<Vec<T>, Box<dyn Error + Send + Sync>> {
    let documents = executor.store().query(T::COLLECTION, filters).await?;
    documents.iter().map(T::try_from_document).collect()
}

/// Loads records by id, preserving the order of `ids`.
pub async fn load_documents<T: Document>(
    executor: &Executor,
    ids: &[Uuid],
) -> Result<Vec<Option<T>>, Box<dyn Error + Send + Sync>> {
    let mut result = Vec::with_capacity(ids.len());
    for id in ids {
        let mut found = query_documents::<T>(executor, &[FieldFilter::uuid("id", *id)]).await?;
        result.push(found.pop());
    }
    Ok(result)
}

/// Validates records and stages them as puts on the session's unit of work.
pub async fn stage_puts<T: Document>(
    executor: &Executor,
    items: Vec<T>,
) -> Result<Vec<T>, Box<dyn Error + Send + Sync>> {
    if items.is_empty() {
        return Ok(items);
    }
    let mut operations = Vec::with_capacity(items.len());
    for item in &items {
        item.validate()
            .map_err(|e| format!("Refusing to write {}: {e}", T::COLLECTION))?;
        operations.push(WriteOp::put(item)?);
    }
    executor.stage(operations).await;
    Ok(items)
}

/// Stages deletes of records by id.
pub async fn stage_deletes<T: Document>(executor: &Executor, ids: &[Uuid]) -> usize {
    let operations: Vec<WriteOp> = ids.iter().map(|id| WriteOp::delete::<T>(*id)).collect();
    let count = operations.len();
    executor.stage(operations).await;
    count
}

/// Content fingerprint of a record, used to detect drift between two reads.
pub fn fingerprint<T: Serialize>(item: &T) -> Result<i64, Box<dyn Error + Send + Sync>> {
    Ok(hash_as_i64(item)?)
}
