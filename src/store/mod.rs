//! Store - keyed document storage for the auth backend.
//!
//! Documents are grouped into collections and addressed by a unique key.
//! Inserting a key that already exists fails, which is how the backend keeps
//! one account per email.
//!
//! ## Example
//!
//! ```ignore
//! use movie_corner::store::{CollectionsExt, Document, InMemoryDocumentStore};
//!
//! impl Document for UserRecord {
//!     const COLLECTION: &'static str = "users";
//!     fn key(&self) -> &str { &self.email }
//! }
//!
//! let store = InMemoryDocumentStore::new();
//! store.collection::<UserRecord>().insert(&user)?;
//! let found = store.collection::<UserRecord>().get("ann@example.com")?;
//! ```

mod collection;
mod in_memory;

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

/// Types that can live in a document collection.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Collection name, like a MongoDB collection or a table.
    const COLLECTION: &'static str;

    /// The document's unique key within its collection.
    fn key(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A document with this key already exists.
    Duplicate { collection: String, key: String },
    Serde(String),
    Storage(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Duplicate { collection, key } => {
                write!(f, "duplicate document {}:{}", collection, key)
            }
            StoreError::Serde(msg) => write!(f, "document serialization error: {}", msg),
            StoreError::Storage(msg) => write!(f, "document storage error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}

/// Backend storage for documents.
pub trait DocumentStore: Send + Sync {
    fn get_document<D: Document>(&self, key: &str) -> Result<Option<D>, StoreError>;

    /// Insert a new document. Fails with [`StoreError::Duplicate`] if the key is taken.
    fn insert_document<D: Document>(&self, document: &D) -> Result<(), StoreError>;

    /// Returns true if the document existed.
    fn delete_document<D: Document>(&self, key: &str) -> Result<bool, StoreError>;

    fn find_documents<D: Document>(
        &self,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<Vec<D>, StoreError>;
}

pub use collection::{Collection, CollectionsExt};
pub use in_memory::InMemoryDocumentStore;
