//! Error type for the auth backend.

use std::error::Error;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::store::StoreError;
use crate::wire::MessageResponse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Missing or malformed input.
    Validation(String),
    /// Unknown email or wrong password; deliberately indistinguishable.
    InvalidCredentials,
    AlreadyExists,
    Unauthorized(String),
    NotFound(String),
    Internal(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Validation(msg)
            | AuthError::Unauthorized(msg)
            | AuthError::NotFound(msg)
            | AuthError::Internal(msg) => f.write_str(msg),
            AuthError::InvalidCredentials => f.write_str("Invalid credentials"),
            AuthError::AlreadyExists => f.write_str("User already exists"),
        }
    }
}

impl Error for AuthError {}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { .. } => AuthError::AlreadyExists,
            other => AuthError::Internal(other.to_string()),
        }
    }
}

impl AuthError {
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 400,
            AuthError::InvalidCredentials => 400,
            AuthError::AlreadyExists => 400,
            AuthError::Unauthorized(_) => 401,
            AuthError::NotFound(_) => 404,
            AuthError::Internal(_) => 500,
        }
    }

    fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// `{ "message": ... }`
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status(), Json(MessageResponse::bare(self.to_string()))).into_response()
    }
}

/// Login failures also carry `"success": false`, except server errors.
#[derive(Debug)]
pub struct LoginError(pub AuthError);

impl From<AuthError> for LoginError {
    fn from(err: AuthError) -> Self {
        LoginError(err)
    }
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        let LoginError(err) = self;
        if matches!(err, AuthError::Internal(_)) {
            return err.into_response();
        }
        (err.status(), Json(MessageResponse::failed(err.to_string()))).into_response()
    }
}
