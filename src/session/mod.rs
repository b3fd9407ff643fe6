//! Session - who is logged in, and how the client talks to the auth backend.
//!
//! [`AuthSession`] is passed explicitly to everything that needs the current
//! user. It restores itself from a [`SessionStore`] and emits `auth.login`,
//! `auth.logout` and `auth.error` notifications.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use movie_corner::session::{AuthClient, AuthSession, FileSessionStore};
//!
//! let session = AuthSession::new(Arc::new(FileSessionStore::new("session.json")));
//! session.on("auth.error", |message| eprintln!("{message}"));
//!
//! let client = AuthClient::new(&config, session.clone())?;
//! client.sign_in(&LoginForm::new("ann@example.com", "secret")).await?;
//! assert!(session.is_authenticated());
//! ```

#[cfg(feature = "client")]
mod client;
mod session;
mod store;

#[cfg(feature = "client")]
pub use client::{AuthClient, ClientError};
pub use session::{AuthSession, ERROR_EVENT, LOGIN_EVENT, LOGOUT_EVENT, TOKEN_KEY, USER_KEY};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, SessionStoreError};
