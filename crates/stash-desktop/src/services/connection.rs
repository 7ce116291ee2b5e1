//! Startup connection: configuration, session restore and sign-in.

use thiserror::Error;

use stash_core::auth::AuthSession;
use stash_core::config::{AccountCredentials, ServiceConfig};
use stash_core::Connection;

use super::SessionStore;
use crate::state::DesktopLibrary;

/// Why the app could not reach its data at startup
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Set SUPABASE_URL and SUPABASE_ANON_KEY to connect to your library")]
    NotConfigured,

    #[error("No saved session; set STASH_ACCOUNT_EMAIL and STASH_ACCOUNT_PASSWORD to sign in")]
    NoCredentials,

    #[error(transparent)]
    Core(#[from] stash_core::Error),
}

/// Connect with environment configuration, restoring the keychain session or
/// signing in with the configured account.
pub async fn connect() -> Result<(DesktopLibrary, AuthSession), StartupError> {
    let config = ServiceConfig::from_env()?.ok_or(StartupError::NotConfigured)?;
    connect_with(config, AccountCredentials::from_env()).await
}

async fn connect_with(
    config: ServiceConfig,
    credentials: Option<AccountCredentials>,
) -> Result<(DesktopLibrary, AuthSession), StartupError> {
    let connection = Connection::new(config, SessionStore)?;
    let (session, source) = match connection.authenticate(credentials.as_ref()).await {
        Ok(established) => established,
        Err(stash_core::Error::Unauthenticated) => return Err(StartupError::NoCredentials),
        Err(error) => return Err(error.into()),
    };
    tracing::info!(user_id = %session.user.id, ?source, "Connected to Supabase");
    Ok((connection.library(), session))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_errors_name_the_missing_settings() {
        assert!(StartupError::NotConfigured.to_string().contains("SUPABASE_URL"));
        assert!(StartupError::NoCredentials
            .to_string()
            .contains("STASH_ACCOUNT_PASSWORD"));
    }

    #[test]
    fn core_errors_pass_through_unchanged() {
        let error = StartupError::from(stash_core::Error::Config("bad url".into()));
        assert_eq!(error.to_string(), "Configuration error: bad url");
    }
}
