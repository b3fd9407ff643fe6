//! Server - the `/auth` backend over HTTP.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /auth/register` - create an account.
//! - `POST /auth/login` - check credentials and issue a bearer token.
//! - `POST /auth/logout` - acknowledge a logout.
//! - `GET /auth/profile/:id` - public profile, bearer token required.
//! - `GET /` - health check.
//!
//! ## Example
//!
//! ```ignore
//! use movie_corner::server::{self, AppState, ServerConfig};
//! use movie_corner::store::InMemoryDocumentStore;
//!
//! let config = ServerConfig::from_env()?;
//! let state = AppState::new(InMemoryDocumentStore::new(), &config);
//!
//! // Get the router to compose with other axum routes
//! let app = server::router(state.clone());
//!
//! // Or serve directly
//! server::serve(state, "0.0.0.0:5000").await?;
//! ```

mod config;
mod cors;
mod error;
mod handlers;
mod password;
mod token;
mod users;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tracing::info;

use crate::store::DocumentStore;

pub use config::{ServerConfig, DEFAULT_BCRYPT_COST, DEFAULT_CORS_ORIGIN, DEFAULT_PORT};
pub use error::{AuthError, LoginError};
pub use token::{Claims, TokenIssuer};
pub use users::{UserDirectory, UserRecord};

/// Shared backend state. Clones share the same store.
#[derive(Clone)]
pub struct AppState<S> {
    pub users: UserDirectory<S>,
    pub tokens: TokenIssuer,
    pub bcrypt_cost: u32,
    pub cors_origins: Arc<Vec<String>>,
}

impl<S: DocumentStore + Clone + 'static> AppState<S> {
    pub fn new(store: S, config: &ServerConfig) -> Self {
        Self {
            users: UserDirectory::new(store),
            tokens: TokenIssuer::new(&config.jwt_secret, config.jwt_ttl),
            bcrypt_cost: config.bcrypt_cost,
            cors_origins: Arc::new(config.cors_origins.clone()),
        }
    }
}

/// Build the axum `Router` for the backend.
pub fn router<S: DocumentStore + Clone + 'static>(state: AppState<S>) -> Router {
    let auth = Router::new()
        .route("/register", post(handlers::register::<S>))
        .route("/login", post(handlers::login::<S>))
        .route("/logout", post(handlers::logout))
        .route("/profile/:id", get(handlers::profile::<S>));

    Router::new()
        .route("/", get(handlers::health))
        .nest("/auth", auth)
        .layer(middleware::from_fn_with_state(
            state.cors_origins.clone(),
            cors::cors_middleware,
        ))
        .with_state(state)
}

/// Serve the backend at the given address (e.g. `"0.0.0.0:5000"`).
pub async fn serve<S: DocumentStore + Clone + 'static>(
    state: AppState<S>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "auth backend listening");
    axum::serve(listener, app).await
}
