//! InMemoryDocumentStore - HashMap-backed document store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{Document, DocumentStore, StoreError};

/// Documents kept as JSON under `"collection:key"`. Clones share storage.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    storage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents across all collections.
    pub fn len(&self) -> usize {
        self.storage.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn make_key(collection: &str, key: &str) -> String {
        format!("{}:{}", collection, key)
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn get_document<D: Document>(&self, key: &str) -> Result<Option<D>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        storage
            .get(&Self::make_key(D::COLLECTION, key))
            .map(|bytes| serde_json::from_slice(bytes).map_err(StoreError::from))
            .transpose()
    }

    fn insert_document<D: Document>(&self, document: &D) -> Result<(), StoreError> {
        let key = Self::make_key(D::COLLECTION, document.key());
        let bytes = serde_json::to_vec(document)?;

        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        if storage.contains_key(&key) {
            return Err(StoreError::Duplicate {
                collection: D::COLLECTION.to_string(),
                key: document.key().to_string(),
            });
        }
        storage.insert(key, bytes);
        Ok(())
    }

    fn delete_document<D: Document>(&self, key: &str) -> Result<bool, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        Ok(storage.remove(&Self::make_key(D::COLLECTION, key)).is_some())
    }

    fn find_documents<D: Document>(
        &self,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<Vec<D>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        let prefix = format!("{}:", D::COLLECTION);
        let mut results = Vec::new();
        for (key, bytes) in storage.iter() {
            if !key.starts_with(&prefix) {
                continue;
            }
            let document: D = serde_json::from_slice(bytes)?;
            if predicate(&document) {
                results.push(document);
            }
        }
        Ok(results)
    }
}
