//! Collection - typed view over one document collection.

use std::marker::PhantomData;

use super::{Document, DocumentStore, StoreError};

pub struct Collection<'a, S, D> {
    store: &'a S,
    _marker: PhantomData<D>,
}

impl<'a, S: DocumentStore, D: Document> Collection<'a, S, D> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    pub fn get(&self, key: &str) -> Result<Option<D>, StoreError> {
        self.store.get_document(key)
    }

    pub fn insert(&self, document: &D) -> Result<(), StoreError> {
        self.store.insert_document(document)
    }

    pub fn delete(&self, key: &str) -> Result<bool, StoreError> {
        self.store.delete_document::<D>(key)
    }

    pub fn find(&self, predicate: &dyn Fn(&D) -> bool) -> Result<Vec<D>, StoreError> {
        self.store.find_documents(predicate)
    }
}

/// `store.collection::<D>()` on any [`DocumentStore`].
pub trait CollectionsExt: DocumentStore + Sized {
    fn collection<D: Document>(&self) -> Collection<'_, Self, D> {
        Collection::new(self)
    }
}

impl<S: DocumentStore> CollectionsExt for S {}
