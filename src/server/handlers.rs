//! Route handlers for `/auth` and the health check.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tracing::{info, warn};

use super::error::{AuthError, LoginError};
use super::password::{hash_password, verify_password};
use super::users::UserRecord;
use super::AppState;
use crate::store::DocumentStore;
use crate::wire::{LoginResponse, MessageResponse, SessionUser};

/// Fields are optional here so that absent ones become a 400, not a rejection.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// `GET /`
pub async fn health() -> impl IntoResponse {
    Json("Server is running!")
}

/// `POST /auth/register`
pub async fn register<S: DocumentStore + Clone + 'static>(
    State(state): State<AppState<S>>,
    body: Result<Json<RegisterBody>, JsonRejection>,
) -> Result<impl IntoResponse, AuthError> {
    let required = || AuthError::Validation("All fields are required".into());
    let Json(body) = body.map_err(|_| required())?;
    let (Some(name), Some(email), Some(password)) =
        (present(body.name), present(body.email), present(body.password))
    else {
        return Err(required());
    };

    if state.users.by_email(&email)?.is_some() {
        warn!(%email, "registration for existing email");
        return Err(AuthError::AlreadyExists);
    }

    let hash = hash_password(password, state.bcrypt_cost).await?;
    let user = UserRecord::new(name, email, hash);
    state.users.create(&user)?;

    info!(user_id = %user.id, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::ok("User registered successfully")),
    ))
}

/// `POST /auth/login`
pub async fn login<S: DocumentStore + Clone + 'static>(
    State(state): State<AppState<S>>,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> Result<Json<LoginResponse>, LoginError> {
    let required = || AuthError::Validation("Email and password are required".into());
    let Json(body) = body.map_err(|_| required())?;
    let (Some(email), Some(password)) = (present(body.email), present(body.password)) else {
        return Err(required().into());
    };

    let Some(user) = state.users.by_email(&email)? else {
        warn!(%email, "login for unknown email");
        return Err(AuthError::InvalidCredentials.into());
    };
    if !verify_password(password, user.password.clone()).await? {
        warn!(user_id = %user.id, "login with wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state.tokens.issue(&user.id, &user.email)?;
    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        success: true,
        token: Some(token),
        user: Some(user.to_session_user()),
    }))
}

/// `POST /auth/logout`. Tokens are stateless, so this only acknowledges.
pub async fn logout() -> impl IntoResponse {
    Json(MessageResponse::ok("Logout successful"))
}

/// `GET /auth/profile/:id`, bearer token required.
pub async fn profile<S: DocumentStore + Clone + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<SessionUser>, AuthError> {
    let token = bearer_token(&headers)
        .ok_or_else(|| AuthError::Unauthorized("Access denied. No token provided.".into()))?;
    state.tokens.verify(token)?;

    state
        .users
        .by_id(&id)?
        .map(|user| Json(user.to_session_user()))
        .ok_or_else(|| AuthError::NotFound("User not found".into()))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
