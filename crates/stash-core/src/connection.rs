//! Process-wide service connection.
//!
//! Built once at startup from injected configuration and handed to whoever
//! needs it; there is no global client.

use reqwest::Client;

use crate::auth::{AuthSession, SessionPersistence, SessionSlot, SupabaseAuthClient};
use crate::config::{AccountCredentials, ServiceConfig};
use crate::error::{Error, Result};
use crate::library::Library;
use crate::query::QueryClient;
use crate::remote::RestClient;
use crate::store::SupabaseStore;

/// How [`Connection::authenticate`] obtained its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    Restored,
    SignedIn,
}

#[derive(Clone)]
pub struct Connection<P: SessionPersistence> {
    config: ServiceConfig,
    auth: SupabaseAuthClient<P>,
    store: SupabaseStore,
    session: SessionSlot,
}

impl<P: SessionPersistence> Connection<P> {
    /// Build the auth client and row store over one shared HTTP client.
    pub fn new(config: ServiceConfig, persistence: P) -> Result<Self> {
        let http = Client::builder().build()?;
        let session = SessionSlot::default();
        let auth = SupabaseAuthClient::with_client(&config, persistence, http.clone())?;
        let store = SupabaseStore::new(RestClient::with_client(&config, session.clone(), http));
        Ok(Self {
            config,
            auth,
            store,
            session,
        })
    }

    /// Establish a session: restore the persisted one, or sign in with
    /// `credentials`.
    pub async fn authenticate(
        &self,
        credentials: Option<&AccountCredentials>,
    ) -> Result<(AuthSession, SessionSource)> {
        if let Some(session) = self.auth.restore_session().await? {
            tracing::debug!(user_id = %session.user.id, "Restored session");
            self.session.set(session.clone());
            return Ok((session, SessionSource::Restored));
        }

        let credentials = credentials.ok_or(Error::Unauthenticated)?;
        let session = self.auth.sign_in(credentials).await?;
        self.session.set(session.clone());
        Ok((session, SessionSource::SignedIn))
    }

    /// Revoke the current session, if any, and forget it locally.
    pub async fn sign_out(&self) -> Result<()> {
        let token = self
            .session
            .access_token()
            .or_else(|| {
                self.auth
                    .persistence()
                    .load_session()
                    .ok()
                    .flatten()
                    .map(|session| session.access_token)
            });
        match token {
            Some(token) => self.auth.sign_out(&token).await?,
            None => self.auth.persistence().clear_session()?,
        }
        self.session.clear();
        tracing::info!("Signed out");
        Ok(())
    }

    #[must_use]
    pub fn session(&self) -> Option<AuthSession> {
        self.session.get()
    }

    #[must_use]
    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    #[must_use]
    pub const fn auth(&self) -> &SupabaseAuthClient<P> {
        &self.auth
    }

    #[must_use]
    pub fn store(&self) -> SupabaseStore {
        self.store.clone()
    }

    /// A fresh cached library over this connection's store.
    #[must_use]
    pub fn library(&self) -> Library<SupabaseStore> {
        Library::with_client(self.store(), QueryClient::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthUser, MemorySessionStore};
    use crate::util::unix_timestamp_now;

    fn config() -> ServiceConfig {
        ServiceConfig::new("http://127.0.0.1:9", "anon").unwrap()
    }

    #[tokio::test]
    async fn authenticate_prefers_persisted_session() {
        let stored = AuthSession {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            expires_at: unix_timestamp_now() + 3600,
            user: AuthUser {
                id: "u1".into(),
                email: Some("me@example.com".into()),
            },
        };
        let connection =
            Connection::new(config(), MemorySessionStore::with_session(stored.clone())).unwrap();

        let (session, source) = connection.authenticate(None).await.unwrap();
        assert_eq!(session, stored);
        assert_eq!(source, SessionSource::Restored);
        assert_eq!(connection.store().session().user_id().as_deref(), Some("u1"));
    }

    #[tokio::test]
    async fn authenticate_without_session_or_credentials_is_unauthenticated() {
        let connection = Connection::new(config(), MemorySessionStore::default()).unwrap();
        let error = connection.authenticate(None).await.unwrap_err();
        assert!(matches!(error, Error::Unauthenticated));
        assert!(connection.session().is_none());
    }

    #[tokio::test]
    async fn sign_out_without_session_clears_local_state() {
        let connection = Connection::new(config(), MemorySessionStore::default()).unwrap();
        connection.sign_out().await.unwrap();
        assert!(connection.session().is_none());
    }
}
