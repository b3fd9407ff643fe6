//! AuthClient - reqwest client for the `/auth` backend.

use std::fmt;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::session::AuthSession;
use super::store::SessionStoreError;
use crate::config::ClientConfig;
use crate::forms::{FieldErrors, LoginForm, RegisterForm};
use crate::wire::{LoginResponse, MessageResponse, SessionUser};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    Transport(String),
    /// Non-2xx answer; `message` is the backend's `message` field when present.
    Api { status: u16, message: String },
    Decode(String),
    /// The form failed validation and was not sent.
    Invalid(FieldErrors),
    Session(SessionStoreError),
}

impl ClientError {
    /// Text suitable for the session error banner.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Invalid(errors) => errors.values().cloned().collect::<Vec<_>>().join(" "),
            _ => String::new(),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport(msg) => write!(f, "auth request failed: {}", msg),
            ClientError::Api { status, message } => {
                write!(f, "auth backend answered {}: {}", status, message)
            }
            ClientError::Decode(msg) => write!(f, "unexpected auth response: {}", msg),
            ClientError::Invalid(errors) => write!(f, "invalid form: {} field(s)", errors.len()),
            ClientError::Session(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Session(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SessionStoreError> for ClientError {
    fn from(err: SessionStoreError) -> Self {
        ClientError::Session(err)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

pub struct AuthClient {
    client: Client,
    base_url: String,
    session: AuthSession,
}

impl AuthClient {
    pub fn new(config: &ClientConfig, session: AuthSession) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.auth_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub async fn register(&self, form: &RegisterForm) -> Result<MessageResponse, ClientError> {
        form.validate().map_err(ClientError::Invalid)?;
        self.post("/auth/register", form).await
    }

    pub async fn login(&self, form: &LoginForm) -> Result<LoginResponse, ClientError> {
        form.validate().map_err(ClientError::Invalid)?;
        self.post("/auth/login", form).await
    }

    pub async fn logout(&self) -> Result<MessageResponse, ClientError> {
        let request = self.authorize(self.client.post(self.url("/auth/logout")));
        Self::decode(request.send().await?).await
    }

    pub async fn profile(&self, id: &str) -> Result<SessionUser, ClientError> {
        let path = format!("/auth/profile/{}", urlencoding::encode(id));
        let request = self.authorize(self.client.get(self.url(&path)));
        Self::decode(request.send().await?).await
    }

    /// Log in and record the user on the session. Failures land in the
    /// session error as well as the returned error.
    pub async fn sign_in(&self, form: &LoginForm) -> Result<SessionUser, ClientError> {
        self.session.clear_error();
        if let Err(errors) = form.validate() {
            return Err(ClientError::Invalid(errors));
        }
        self.session.set_loading();

        let result = match self.login(form).await {
            Ok(LoginResponse {
                token: Some(token),
                user: Some(user),
                ..
            }) => self
                .session
                .set_user(user.clone(), token)
                .map(|_| user)
                .map_err(ClientError::from),
            Ok(_) => Err(ClientError::Decode("login response without token".into())),
            Err(err) => Err(err),
        };

        match &result {
            Ok(user) => info!(user_id = %user.id, "signed in"),
            Err(err) => {
                warn!(error = %err, "sign in failed");
                self.session.set_error(err.user_message());
            }
        }
        result
    }

    /// Tell the backend, then clear the local session whatever it answered.
    pub async fn sign_out(&self) -> Result<(), ClientError> {
        if let Err(err) = self.logout().await {
            warn!(error = %err, "backend logout failed, clearing session anyway");
        }
        self.session.logout()?;
        info!("signed out");
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(path, "auth request");
        let request = self.authorize(self.client.post(self.url(path)).json(body));
        Self::decode(request.send().await?).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<MessageResponse>(&body)
                .map(|m| m.message)
                .unwrap_or(body);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}
