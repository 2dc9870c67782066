use async_trait::async_trait;
use household_ledger_db::store::{Collection, FieldFilter, LedgerStore, WriteOp};
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// In-process Ledger Store.
///
/// Keeps one ordered map of JSON documents per collection. A batch is fully
/// checked before any operation is applied, and applied under a single write
/// lock, so it commits entirely or not at all. Faults can be injected to
/// exercise the settlement failure paths.
#[derive(Default)]
pub struct MemoryLedgerStore {
    collections: RwLock<HashMap<Collection, BTreeMap<Uuid, Value>>>,
    faults: Mutex<FaultPlan>,
    committed_batches: AtomicUsize,
}

#[derive(Default)]
struct FaultPlan {
    unreachable: bool,
    /// One-shot failures: the next batch touching the collection is rejected
    fail_batches_touching: Vec<Collection>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every query and batch fail until reset
    pub fn set_unreachable(&self, unreachable: bool) {
        self.faults.lock().unreachable = unreachable;
    }

    /// Reject the next batch that writes to `collection`
    pub fn fail_next_batch_touching(&self, collection: Collection) {
        self.faults.lock().fail_batches_touching.push(collection);
    }

    pub fn committed_batches(&self) -> usize {
        self.committed_batches.load(Ordering::SeqCst)
    }

    pub fn document_count(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .get(&collection)
            .map(BTreeMap::len)
            .unwrap_or(0)
    }

    /// Store a raw document without any checks, bypassing batches
    pub fn insert_raw(&self, collection: Collection, id: Uuid, document: Value) {
        self.collections
            .write()
            .entry(collection)
            .or_default()
            .insert(id, document);
    }

    fn check_reachable(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.faults.lock().unreachable {
            return Err("Ledger store is unreachable".into());
        }
        Ok(())
    }

    fn take_injected_failure(&self, operations: &[WriteOp]) -> Option<Collection> {
        let mut faults = self.faults.lock();
        let position = faults
            .fail_batches_touching
            .iter()
            .position(|c| operations.iter().any(|op| op.collection() == *c))?;
        Some(faults.fail_batches_touching.remove(position))
    }

    fn check_operation(operation: &WriteOp) -> Result<(), Box<dyn Error + Send + Sync>> {
        if let WriteOp::Put { collection, id, document } = operation {
            if !document.is_object() {
                return Err(format!("Document {id} in {collection} is not an object").into());
            }
            let id_matches = document
                .get("id")
                .and_then(Value::as_str)
                .is_some_and(|stored| stored == id.to_string());
            if !id_matches {
                return Err(format!("Document in {collection} does not carry id {id}").into());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn query(
        &self,
        collection: Collection,
        filters: &[FieldFilter],
    ) -> Result<Vec<Value>, Box<dyn Error + Send + Sync>> {
        self.check_reachable()?;
        let collections = self.collections.read();
        let Some(documents) = collections.get(&collection) else {
            return Ok(Vec::new());
        };
        Ok(documents
            .values()
            .filter(|document| filters.iter().all(|filter| filter.matches(document)))
            .cloned()
            .collect())
    }

    async fn write_batch(&self, operations: Vec<WriteOp>) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.check_reachable()?;
        if let Some(collection) = self.take_injected_failure(&operations) {
            return Err(format!("Injected failure for batch touching {collection}").into());
        }
        for operation in &operations {
            Self::check_operation(operation)?;
        }

        let mut collections = self.collections.write();
        for operation in operations {
            match operation {
                WriteOp::Put { collection, id, document } => {
                    collections.entry(collection).or_default().insert(id, document);
                }
                WriteOp::Delete { collection, id } => {
                    if let Some(documents) = collections.get_mut(&collection) {
                        documents.remove(&id);
                    }
                }
            }
        }
        self.committed_batches.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn put(collection: Collection, id: Uuid, extra: Value) -> WriteOp {
        let mut document = json!({ "id": id.to_string() });
        if let (Some(target), Some(source)) = (document.as_object_mut(), extra.as_object()) {
            target.extend(source.clone());
        }
        WriteOp::Put { collection, id, document }
    }

    #[tokio::test]
    async fn test_query_filters_by_equality() -> Result<(), Box<dyn Error + Send + Sync>> {
        let store = MemoryLedgerStore::new();
        let household = Uuid::new_v4();
        store
            .write_batch(vec![
                put(Collection::Transactions, Uuid::new_v4(), json!({ "household_id": household.to_string(), "is_shared": true })),
                put(Collection::Transactions, Uuid::new_v4(), json!({ "household_id": household.to_string(), "is_shared": false })),
                put(Collection::Transactions, Uuid::new_v4(), json!({ "household_id": Uuid::new_v4().to_string(), "is_shared": true })),
            ])
            .await?;

        let shared = store
            .query(
                Collection::Transactions,
                &[FieldFilter::uuid("household_id", household), FieldFilter::boolean("is_shared", true)],
            )
            .await?;
        assert_eq!(shared.len(), 1);
        assert_eq!(store.query(Collection::Transactions, &[]).await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_operation_rejects_whole_batch() -> Result<(), Box<dyn Error + Send + Sync>> {
        let store = MemoryLedgerStore::new();
        let result = store
            .write_batch(vec![
                put(Collection::Accounts, Uuid::new_v4(), json!({})),
                WriteOp::Put {
                    collection: Collection::Accounts,
                    id: Uuid::new_v4(),
                    document: json!({ "id": Uuid::new_v4().to_string() }),
                },
            ])
            .await;

        assert!(result.is_err());
        assert_eq!(store.document_count(Collection::Accounts), 0);
        assert_eq!(store.committed_batches(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_injected_failure_is_one_shot() -> Result<(), Box<dyn Error + Send + Sync>> {
        let store = MemoryLedgerStore::new();
        store.fail_next_batch_touching(Collection::SharedExpenseSplits);

        let unrelated = store.write_batch(vec![put(Collection::Accounts, Uuid::new_v4(), json!({}))]).await;
        assert!(unrelated.is_ok());

        let batch = vec![
            put(Collection::Accounts, Uuid::new_v4(), json!({})),
            put(Collection::SharedExpenseSplits, Uuid::new_v4(), json!({})),
        ];
        assert!(store.write_batch(batch.clone()).await.is_err());
        assert_eq!(store.document_count(Collection::Accounts), 1);

        store.write_batch(batch).await?;
        assert_eq!(store.document_count(Collection::Accounts), 2);
        Ok(())
    }

    #[test]
    fn test_unreachable_store_fails_reads() {
        let store = MemoryLedgerStore::new();
        store.set_unreachable(true);
        assert!(tokio_test::block_on(store.query(Collection::Accounts, &[])).is_err());
        store.set_unreachable(false);
        assert!(tokio_test::block_on(store.query(Collection::Accounts, &[])).is_ok());
    }

    #[tokio::test]
    async fn test_delete_removes_document() -> Result<(), Box<dyn Error + Send + Sync>> {
        let store = MemoryLedgerStore::new();
        let id = Uuid::new_v4();
        store.write_batch(vec![put(Collection::Settlements, id, json!({}))]).await?;
        store
            .write_batch(vec![WriteOp::Delete { collection: Collection::Settlements, id }])
            .await?;
        assert_eq!(store.document_count(Collection::Settlements), 0);
        Ok(())
    }
}
