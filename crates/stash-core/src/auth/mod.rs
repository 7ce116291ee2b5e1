//! Supabase password auth and session handling.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{AccountCredentials, ServiceConfig};
use crate::util::{compact_text, is_http_url, unix_timestamp_now};

const EXPIRY_SKEW_SECONDS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub user: AuthUser,
}

impl AuthSession {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= unix_timestamp_now() + EXPIRY_SKEW_SECONDS
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AuthSession")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid auth configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("Missing credentials: {0}")]
    MissingCredentials(&'static str),
    #[error("Auth request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse auth payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Sign-in rejected: {0}")]
    Rejected(String),
    #[error("Auth API error: {0}")]
    Api(String),
    #[error("Secure storage error: {0}")]
    SecureStorage(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Where a signed-in session survives between runs.
pub trait SessionPersistence: Clone + Send + Sync + 'static {
    fn load_session(&self) -> AuthResult<Option<AuthSession>>;
    fn save_session(&self, session: &AuthSession) -> AuthResult<()>;
    fn clear_session(&self) -> AuthResult<()>;
}

/// Process-local persistence, for tests and for runs without a keyring.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    session: Arc<Mutex<Option<AuthSession>>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn with_session(session: AuthSession) -> Self {
        Self {
            session: Arc::new(Mutex::new(Some(session))),
        }
    }
}

impl SessionPersistence for MemorySessionStore {
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        Ok(self
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear_session(&self) -> AuthResult<()> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// The session currently used to authorize row requests.
///
/// Cloned handles share one slot, so signing in through the connection is
/// visible to every store built from it.
#[derive(Debug, Clone, Default)]
pub struct SessionSlot(Arc<RwLock<Option<AuthSession>>>);

impl SessionSlot {
    pub fn set(&self, session: AuthSession) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    #[must_use]
    pub fn get(&self) -> Option<AuthSession> {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|session| session.access_token.clone())
    }

    #[must_use]
    pub fn user_id(&self) -> Option<String> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|session| session.user.id.clone())
    }

    pub fn clear(&self) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Credentials exchanged at the token endpoint.
enum Grant<'a> {
    Password(&'a AccountCredentials),
    RefreshToken(&'a str),
}

impl Grant<'_> {
    const fn grant_type(&self) -> &'static str {
        match self {
            Self::Password(_) => "password",
            Self::RefreshToken(_) => "refresh_token",
        }
    }

    fn body(&self) -> serde_json::Value {
        match self {
            Self::Password(credentials) => serde_json::json!({
                "email": credentials.email,
                "password": credentials.password,
            }),
            Self::RefreshToken(token) => serde_json::json!({ "refresh_token": token }),
        }
    }
}

/// GoTrue client for the configured project.
#[derive(Clone)]
pub struct SupabaseAuthClient<S: SessionPersistence> {
    endpoint: String,
    anon_key: String,
    http: Client,
    persistence: S,
}

impl<S: SessionPersistence> SupabaseAuthClient<S> {
    pub fn new(config: &ServiceConfig, persistence: S) -> AuthResult<Self> {
        Self::with_client(config, persistence, Client::builder().build()?)
    }

    /// Share an existing HTTP client (connection pool) with the row API.
    pub fn with_client(config: &ServiceConfig, persistence: S, http: Client) -> AuthResult<Self> {
        let anon_key = config.supabase_anon_key.trim();
        if anon_key.is_empty() {
            return Err(AuthError::InvalidConfiguration("anon key is empty"));
        }
        Ok(Self {
            endpoint: normalize_auth_url(&config.supabase_url)?,
            anon_key: anon_key.to_string(),
            http,
            persistence,
        })
    }

    pub const fn persistence(&self) -> &S {
        &self.persistence
    }

    /// Load the persisted session, refreshing it when it has expired.
    ///
    /// A session that cannot be refreshed is discarded.
    pub async fn restore_session(&self) -> AuthResult<Option<AuthSession>> {
        let Some(saved) = self.persistence.load_session()? else {
            return Ok(None);
        };
        if !saved.is_expired() {
            return Ok(Some(saved));
        }

        tracing::debug!(user_id = %saved.user.id, "Saved session expired, refreshing");
        match self.refresh_session(&saved.refresh_token).await {
            Ok(session) => Ok(Some(session)),
            Err(error) => {
                tracing::warn!("Discarding saved session: {error}");
                self.persistence.clear_session()?;
                Ok(None)
            }
        }
    }

    pub async fn sign_in(&self, credentials: &AccountCredentials) -> AuthResult<AuthSession> {
        if credentials.email.trim().is_empty() {
            return Err(AuthError::MissingCredentials("email is required"));
        }
        if credentials.password.is_empty() {
            return Err(AuthError::MissingCredentials("password is required"));
        }

        let session = self.exchange(&Grant::Password(credentials)).await?;
        tracing::info!(user_id = %session.user.id, "Signed in");
        Ok(session)
    }

    pub async fn refresh_session(&self, refresh_token: &str) -> AuthResult<AuthSession> {
        if refresh_token.trim().is_empty() {
            return Err(AuthError::MissingCredentials("refresh token is required"));
        }
        self.exchange(&Grant::RefreshToken(refresh_token)).await
    }

    /// Revoke the session remotely and forget it locally.
    ///
    /// An already-invalid token still clears local state.
    pub async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        let response = self
            .http
            .post(format!("{}/logout", self.endpoint))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() && status != StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api(parse_api_error(status, &body)));
        }

        self.persistence.clear_session()?;
        Ok(())
    }

    /// Trade `grant` for a session and persist it.
    async fn exchange(&self, grant: &Grant<'_>) -> AuthResult<AuthSession> {
        let response = self
            .http
            .post(format!("{}/token", self.endpoint))
            .query(&[("grant_type", grant.grant_type())])
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .json(&grant.body())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = parse_api_error(status, &body);
            return Err(match status {
                StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => AuthError::Rejected(message),
                _ => AuthError::Api(message),
            });
        }

        let session = response.json::<TokenResponse>().await?.into_auth_session()?;
        self.persistence.save_session(&session)?;
        Ok(session)
    }
}

/// Base URL of the auth API for a project URL.
pub fn normalize_auth_url(url: &str) -> AuthResult<String> {
    let base = url.trim().trim_end_matches('/');
    if !is_http_url(base) {
        return Err(AuthError::InvalidConfiguration(
            "project URL must start with http:// or https://",
        ));
    }
    Ok(if base.ends_with(AUTH_PATH) {
        base.to_string()
    } else {
        format!("{base}{AUTH_PATH}")
    })
}

const AUTH_PATH: &str = "/auth/v1";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
    expires_in: Option<i64>,
    user: Option<UserPayload>,
}

impl TokenResponse {
    fn into_auth_session(self) -> AuthResult<AuthSession> {
        let expires_at = self
            .expires_at
            .or_else(|| Some(unix_timestamp_now().saturating_add(self.expires_in?)));

        let (Some(access_token), Some(refresh_token), Some(expires_at), Some(user)) =
            (self.access_token, self.refresh_token, expires_at, self.user)
        else {
            return Err(AuthError::Api(
                "token response is missing session fields".to_string(),
            ));
        };

        Ok(AuthSession {
            access_token,
            refresh_token,
            expires_at,
            user: AuthUser {
                id: user.id,
                email: user.email,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    id: String,
    email: Option<String>,
}

/// Error bodies differ between GoTrue and PostgREST; take whichever field is set.
#[derive(Debug, Default, Deserialize)]
struct ErrorPayload {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

/// Readable `message (status)` text for an error response.
pub(crate) fn parse_api_error(status: StatusCode, body: &str) -> String {
    let code = status.as_u16();
    let payload: ErrorPayload = serde_json::from_str(body).unwrap_or_default();
    let message = payload
        .message
        .or(payload.msg)
        .or(payload.error_description)
        .or(payload.error)
        .map(|message| message.trim().to_string())
        .unwrap_or_else(|| compact_text(body));

    if message.is_empty() {
        format!("HTTP {code}")
    } else {
        format!("{message} ({code})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expires_at: i64) -> AuthSession {
        AuthSession {
            access_token: "secret-access-token".to_string(),
            refresh_token: "secret-refresh-token".to_string(),
            expires_at,
            user: AuthUser {
                id: "user".to_string(),
                email: None,
            },
        }
    }

    fn client(store: MemorySessionStore) -> SupabaseAuthClient<MemorySessionStore> {
        let config = ServiceConfig::new("https://demo.supabase.co", "anon").unwrap();
        SupabaseAuthClient::new(&config, store).unwrap()
    }

    #[test]
    fn auth_url_gets_api_path_once() {
        for url in ["https://demo.supabase.co/", "https://demo.supabase.co/auth/v1"] {
            assert_eq!(
                normalize_auth_url(url).unwrap(),
                "https://demo.supabase.co/auth/v1"
            );
        }
        assert!(matches!(
            normalize_auth_url("demo.supabase.co"),
            Err(AuthError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn password_grant_response_becomes_session() {
        let response: TokenResponse = serde_json::from_str(
            r#"{"access_token":"a","refresh_token":"r","expires_in":3600,
                "token_type":"bearer","user":{"id":"u1","email":"me@example.com"}}"#,
        )
        .unwrap();
        let session = response.into_auth_session().unwrap();
        assert_eq!(session.user.id, "u1");
        assert_eq!(session.user.email.as_deref(), Some("me@example.com"));
        assert!(!session.is_expired());
    }

    #[test]
    fn partial_session_fields_are_rejected() {
        let response: TokenResponse =
            serde_json::from_str(r#"{"access_token":"a","user":{"id":"u1"}}"#).unwrap();
        assert!(matches!(response.into_auth_session(), Err(AuthError::Api(_))));
    }

    #[test]
    fn debug_output_hides_tokens() {
        let rendered = format!("{:?}", session(1_700_000_000));
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("expires_at: 1700000000"));
    }

    #[test]
    fn parse_api_error_prefers_message_fields() {
        let message = parse_api_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        );
        assert_eq!(message, "Invalid login credentials (400)");
        assert_eq!(parse_api_error(StatusCode::BAD_GATEWAY, " "), "HTTP 502");
        assert_eq!(
            parse_api_error(StatusCode::SERVICE_UNAVAILABLE, "upstream down"),
            "upstream down (503)"
        );
    }

    #[test]
    fn session_slot_is_shared_between_clones() {
        let slot = SessionSlot::default();
        let other = slot.clone();
        slot.set(session(1));
        assert_eq!(other.user_id().as_deref(), Some("user"));
        assert_eq!(other.access_token().as_deref(), Some("secret-access-token"));
        other.clear();
        assert!(slot.get().is_none());
    }

    #[tokio::test]
    async fn restore_returns_fresh_session_without_network() {
        let fresh = session(unix_timestamp_now() + 3600);
        let auth = client(MemorySessionStore::with_session(fresh.clone()));
        assert_eq!(auth.restore_session().await.unwrap(), Some(fresh));
    }

    #[tokio::test]
    async fn restore_without_stored_session_is_none() {
        let auth = client(MemorySessionStore::default());
        assert_eq!(auth.restore_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn sign_in_requires_password() {
        let auth = client(MemorySessionStore::default());
        let result = auth
            .sign_in(&AccountCredentials::new("me@example.com", ""))
            .await;
        assert!(matches!(result, Err(AuthError::MissingCredentials(_))));
    }
}
