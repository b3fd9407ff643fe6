//! AuthSession - the logged-in user, bearer token and auth notifications.
//!
//! The session is an explicit context object: the browse driver, the auth
//! client and the route gate all receive it instead of reading global state.
//! Clones share the same underlying session.

use std::sync::{Arc, Mutex, MutexGuard};

use event_emitter_rs::EventEmitter;
use tracing::{debug, warn};

use super::store::{SessionStore, SessionStoreError};
use crate::wire::SessionUser;

pub const USER_KEY: &str = "user";
pub const TOKEN_KEY: &str = "token";

pub const LOGIN_EVENT: &str = "auth.login";
pub const LOGOUT_EVENT: &str = "auth.logout";
pub const ERROR_EVENT: &str = "auth.error";

const DEFAULT_ERROR: &str = "Something went wrong. Please try again.";

#[derive(Debug, Default)]
struct SessionState {
    user: Option<SessionUser>,
    token: Option<String>,
    loading: bool,
    error: Option<String>,
}

#[derive(Clone)]
pub struct AuthSession {
    state: Arc<Mutex<SessionState>>,
    store: Arc<dyn SessionStore>,
    emitter: Arc<Mutex<EventEmitter>>,
}

impl AuthSession {
    /// Restore whatever user and token the store holds. A stored user that
    /// does not decode is treated as absent.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let user = match store.get(USER_KEY) {
            Ok(Some(raw)) if raw != "undefined" => match serde_json::from_str(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    warn!(error = %err, "stored session user is corrupt, ignoring it");
                    None
                }
            },
            Ok(_) => None,
            Err(err) => {
                warn!(error = %err, "could not read stored session user");
                None
            }
        };
        let token = store.get(TOKEN_KEY).unwrap_or_else(|err| {
            warn!(error = %err, "could not read stored session token");
            None
        });

        Self {
            state: Arc::new(Mutex::new(SessionState {
                user,
                token,
                loading: false,
                error: None,
            })),
            store,
            emitter: Arc::new(Mutex::new(EventEmitter::new())),
        }
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.state().user.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state().token.clone()
    }

    /// Both a user and a token are present. A token restored without a
    /// readable user does not count.
    pub fn is_authenticated(&self) -> bool {
        let state = self.state();
        state.user.is_some() && state.token.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    pub fn set_loading(&self) {
        self.state().loading = true;
    }

    /// Record a successful login and persist it.
    pub fn set_user(&self, user: SessionUser, token: impl Into<String>) -> Result<(), SessionStoreError> {
        let token = token.into();
        let encoded =
            serde_json::to_string(&user).map_err(|e| SessionStoreError::Serde(e.to_string()))?;
        {
            let mut state = self.state();
            state.user = Some(user);
            state.token = Some(token.clone());
            state.loading = false;
        }
        self.store.set(USER_KEY, &encoded)?;
        self.store.set(TOKEN_KEY, &token)?;
        debug!("session user set");
        self.notify(LOGIN_EVENT, "Login successful!");
        Ok(())
    }

    /// Forget the user and token, in memory and in the store.
    pub fn logout(&self) -> Result<(), SessionStoreError> {
        {
            let mut state = self.state();
            state.user = None;
            state.token = None;
            state.loading = false;
        }
        self.store.remove(USER_KEY)?;
        self.store.remove(TOKEN_KEY)?;
        debug!("session cleared");
        self.notify(LOGOUT_EVENT, "Logout successful!");
        Ok(())
    }

    pub fn set_error(&self, message: impl Into<String>) {
        let message = message.into();
        let shown = if message.is_empty() {
            DEFAULT_ERROR.to_string()
        } else {
            message.clone()
        };
        {
            let mut state = self.state();
            state.error = Some(message);
            state.loading = false;
        }
        self.notify(ERROR_EVENT, shown);
    }

    pub fn clear_error(&self) {
        self.state().error = None;
    }

    /// Reset the in-memory session. Stored credentials are left alone.
    pub fn reset(&self) {
        *self.state() = SessionState::default();
    }

    /// Listen for `auth.login`, `auth.logout` or `auth.error` notifications.
    /// Listeners run on their own threads.
    pub fn on<F>(&self, event: &str, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.emitter().on(event, listener);
    }

    fn notify(&self, event: &str, message: impl Into<String>) {
        self.emitter().emit(event, message.into());
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn emitter(&self) -> MutexGuard<'_, EventEmitter> {
        self.emitter
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
