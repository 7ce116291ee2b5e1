//! Desktop session persistence in the OS keychain.

use keyring::Entry;

use stash_core::auth::{AuthError, AuthResult, AuthSession, SessionPersistence};

/// The desktop app's Supabase session, stored as JSON under `stash/supabase_session`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionStore;

impl SessionStore {
    const SERVICE: &'static str = "stash";
    const USER: &'static str = "supabase_session";

    fn entry() -> AuthResult<Entry> {
        Entry::new(Self::SERVICE, Self::USER).map_err(keychain_error)
    }
}

fn keychain_error(error: keyring::Error) -> AuthError {
    AuthError::SecureStorage(error.to_string())
}

impl SessionPersistence for SessionStore {
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        let raw = match Self::entry()?.get_password() {
            Err(keyring::Error::NoEntry) => return Ok(None),
            other => other.map_err(keychain_error)?,
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        let raw = serde_json::to_string(session)?;
        Self::entry()?.set_password(&raw).map_err(keychain_error)
    }

    fn clear_session(&self) -> AuthResult<()> {
        match Self::entry()?.delete_credential() {
            Err(keyring::Error::NoEntry) => Ok(()),
            other => other.map_err(keychain_error),
        }
    }
}
