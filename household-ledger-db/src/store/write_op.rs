use serde_json::Value;
use uuid::Uuid;

use super::collection::Collection;
use crate::models::document::Document;

/// One operation of an atomic write batch.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Create or replace the record stored under `id`
    Put {
        collection: Collection,
        id: Uuid,
        document: Value,
    },
    /// Delete the record stored under `id`
    Delete { collection: Collection, id: Uuid },
}

impl WriteOp {
    /// Builds a `Put` for a typed record
    pub fn put<T: Document>(item: &T) -> Result<Self, serde_json::Error> {
        Ok(WriteOp::Put {
            collection: T::COLLECTION,
            id: item.get_id(),
            document: serde_json::to_value(item)?,
        })
    }

    pub fn delete<T: Document>(id: Uuid) -> Self {
        WriteOp::Delete {
            collection: T::COLLECTION,
            id,
        }
    }

    pub fn collection(&self) -> Collection {
        match self {
            WriteOp::Put { collection, .. } | WriteOp::Delete { collection, .. } => *collection,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            WriteOp::Put { id, .. } | WriteOp::Delete { id, .. } => *id,
        }
    }
}
