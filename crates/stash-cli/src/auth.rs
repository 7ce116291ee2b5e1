//! CLI session persistence in the OS keychain.

use stash_core::auth::{AuthError, AuthResult, AuthSession, SessionPersistence};
use stash_core::config::ServiceConfig;
use stash_core::Connection;

use crate::error::CliError;

/// One keychain entry. Tests swap the keychain for a process-wide map.
#[derive(Clone)]
struct KeychainSlot {
    user: String,
}

#[cfg(not(test))]
impl KeychainSlot {
    const SERVICE: &'static str = "stash-cli";

    fn entry(&self) -> Result<keyring::Entry, keyring::Error> {
        keyring::Entry::new(Self::SERVICE, &self.user)
    }

    fn read(&self) -> Result<Option<String>, keyring::Error> {
        match self.entry()?.get_password() {
            Err(keyring::Error::NoEntry) => Ok(None),
            other => other.map(Some),
        }
    }

    fn write(&self, value: &str) -> Result<(), keyring::Error> {
        self.entry()?.set_password(value)
    }

    fn erase(&self) -> Result<(), keyring::Error> {
        match self.entry()?.delete_credential() {
            Err(keyring::Error::NoEntry) => Ok(()),
            other => other,
        }
    }
}

#[cfg(test)]
impl KeychainSlot {
    fn with_map<T>(
        f: impl FnOnce(&mut std::collections::HashMap<String, String>) -> T,
    ) -> Result<T, String> {
        use std::collections::HashMap;
        use std::sync::{Mutex, OnceLock};

        static SLOTS: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
        let mut slots = SLOTS
            .get_or_init(Mutex::default)
            .lock()
            .map_err(|error| error.to_string())?;
        Ok(f(&mut slots))
    }

    fn read(&self) -> Result<Option<String>, String> {
        Self::with_map(|slots| slots.get(&self.user).cloned())
    }

    fn write(&self, value: &str) -> Result<(), String> {
        Self::with_map(|slots| {
            slots.insert(self.user.clone(), value.to_string());
        })
    }

    fn erase(&self) -> Result<(), String> {
        Self::with_map(|slots| {
            slots.remove(&self.user);
        })
    }
}

fn storage_error(error: impl ToString) -> AuthError {
    AuthError::SecureStorage(error.to_string())
}

/// Per-profile Supabase session kept in the OS keychain as JSON.
#[derive(Clone)]
pub struct SessionStore {
    slot: KeychainSlot,
}

impl SessionStore {
    pub fn new(profile_name: &str) -> Self {
        Self {
            slot: KeychainSlot {
                user: format!("supabase_session:{profile_name}"),
            },
        }
    }
}

impl SessionPersistence for SessionStore {
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        let Some(raw) = self.slot.read().map_err(storage_error)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        self.slot
            .write(&serde_json::to_string(session)?)
            .map_err(storage_error)
    }

    fn clear_session(&self) -> AuthResult<()> {
        self.slot.erase().map_err(storage_error)
    }
}

pub fn connect(profile_name: &str, config: ServiceConfig) -> Result<Connection<SessionStore>, CliError> {
    Ok(Connection::new(config, SessionStore::new(profile_name))?)
}

pub fn load_stored_session(profile_name: &str) -> Result<Option<AuthSession>, CliError> {
    SessionStore::new(profile_name)
        .load_session()
        .map_err(|error| CliError::Auth(error.to_string()))
}

pub fn clear_stored_session(profile_name: &str) -> Result<(), CliError> {
    SessionStore::new(profile_name)
        .clear_session()
        .map_err(|error| CliError::Auth(error.to_string()))
}

#[cfg(test)]
mod tests {
    use stash_core::auth::AuthUser;

    use super::*;

    #[test]
    fn sessions_are_scoped_per_profile() {
        let session = AuthSession {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: 1_700_000_000,
            user: AuthUser {
                id: "user".to_string(),
                email: None,
            },
        };
        SessionStore::new("scoped-a").save_session(&session).unwrap();

        assert_eq!(load_stored_session("scoped-a").unwrap(), Some(session));
        assert_eq!(load_stored_session("scoped-b").unwrap(), None);

        clear_stored_session("scoped-a").unwrap();
        assert_eq!(load_stored_session("scoped-a").unwrap(), None);
    }
}
