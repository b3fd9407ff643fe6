//! Stored user accounts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::AuthError;
use crate::store::{CollectionsExt, Document, DocumentStore};
use crate::wire::SessionUser;

/// A registered account. The password is a bcrypt hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Document for UserRecord {
    const COLLECTION: &'static str = "users";

    fn key(&self) -> &str {
        &self.email
    }
}

impl UserRecord {
    pub fn new(name: impl Into<String>, email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            password: password_hash.into(),
        }
    }

    /// The public view, without the hash.
    pub fn to_session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// User lookups over any document store.
#[derive(Clone)]
pub struct UserDirectory<S> {
    store: S,
}

impl<S: DocumentStore> UserDirectory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fails with [`AuthError::AlreadyExists`] when the email is taken.
    pub fn create(&self, user: &UserRecord) -> Result<(), AuthError> {
        self.store.collection::<UserRecord>().insert(user)?;
        Ok(())
    }

    pub fn by_email(&self, email: &str) -> Result<Option<UserRecord>, AuthError> {
        Ok(self.store.collection::<UserRecord>().get(email)?)
    }

    pub fn by_id(&self, id: &str) -> Result<Option<UserRecord>, AuthError> {
        let found = self.store.collection::<UserRecord>().find(&|u| u.id == id)?;
        Ok(found.into_iter().next())
    }
}
