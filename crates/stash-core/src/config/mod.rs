//! Service connection configuration.
//!
//! Values are injected at process start, from the environment or from a CLI
//! profile. Nothing here is embedded at build time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

pub const SUPABASE_URL_ENV: &str = "SUPABASE_URL";
pub const SUPABASE_ANON_KEY_ENV: &str = "SUPABASE_ANON_KEY";
pub const ACCOUNT_EMAIL_ENV: &str = "STASH_ACCOUNT_EMAIL";
pub const ACCOUNT_PASSWORD_ENV: &str = "STASH_ACCOUNT_PASSWORD";

/// Public endpoint and anon key of the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl ServiceConfig {
    /// Validate and normalize a URL/key pair.
    pub fn new(url: impl AsRef<str>, anon_key: impl AsRef<str>) -> Result<Self> {
        let supabase_url = url.as_ref().trim().trim_end_matches('/').to_string();
        if !is_http_url(&supabase_url) {
            return Err(Error::Config(format!(
                "{SUPABASE_URL_ENV} must be an http:// or https:// URL"
            )));
        }

        let supabase_anon_key = anon_key.as_ref().trim().to_string();
        if supabase_anon_key.is_empty() {
            return Err(Error::Config(format!(
                "{SUPABASE_ANON_KEY_ENV} must not be empty"
            )));
        }

        Ok(Self {
            supabase_url,
            supabase_anon_key,
        })
    }

    /// Resolve an optional pair. Both or neither must be set.
    pub fn resolve(url: Option<String>, anon_key: Option<String>) -> Result<Option<Self>> {
        match (normalize_text_option(url), normalize_text_option(anon_key)) {
            (None, None) => Ok(None),
            (Some(url), Some(anon_key)) => Self::new(url, anon_key).map(Some),
            (Some(_), None) => Err(Error::Config(format!(
                "{SUPABASE_URL_ENV} is set but {SUPABASE_ANON_KEY_ENV} is missing"
            ))),
            (None, Some(_)) => Err(Error::Config(format!(
                "{SUPABASE_ANON_KEY_ENV} is set but {SUPABASE_URL_ENV} is missing"
            ))),
        }
    }

    /// Read `SUPABASE_URL` / `SUPABASE_ANON_KEY`.
    pub fn from_env() -> Result<Option<Self>> {
        Self::resolve(
            std::env::var(SUPABASE_URL_ENV).ok(),
            std::env::var(SUPABASE_ANON_KEY_ENV).ok(),
        )
    }

    /// Base URL of the row API.
    #[must_use]
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.supabase_url)
    }

    /// Endpoint for one table.
    #[must_use]
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{table}", self.rest_url())
    }
}

/// Account used for password sign-in.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountCredentials {
    pub email: String,
    pub password: String,
}

impl AccountCredentials {
    #[must_use]
    pub fn new(email: impl AsRef<str>, password: impl Into<String>) -> Self {
        Self {
            email: email.as_ref().trim().to_string(),
            password: password.into(),
        }
    }

    /// Read `STASH_ACCOUNT_EMAIL` / `STASH_ACCOUNT_PASSWORD`.
    ///
    /// Returns `None` when either is unset.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let email = normalize_text_option(std::env::var(ACCOUNT_EMAIL_ENV).ok())?;
        let password = std::env::var(ACCOUNT_PASSWORD_ENV)
            .ok()
            .filter(|password| !password.is_empty())?;
        Some(Self::new(email, password))
    }
}

impl fmt::Debug for AccountCredentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AccountCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
