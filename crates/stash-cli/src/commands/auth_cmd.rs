use stash_core::auth::AuthSession;
use stash_core::config::AccountCredentials;
use stash_core::util::normalize_text_option;

use crate::auth::{clear_stored_session, connect, load_stored_session};
use crate::cli::AuthCommands;
use crate::commands::common::resolve_service_config;
use crate::error::CliError;

fn auth_error(error: impl ToString) -> CliError {
    CliError::Auth(error.to_string())
}

fn signed_in_as(session: &AuthSession) -> &str {
    session.user.email.as_deref().unwrap_or(&session.user.id)
}

pub async fn run_auth(command: AuthCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        AuthCommands::Login {
            profile,
            email,
            password,
        } => login(profile.as_deref().or(global_profile), email, password).await,
        AuthCommands::Status { profile } => status(profile.as_deref().or(global_profile)).await,
        AuthCommands::Logout { profile } => logout(profile.as_deref().or(global_profile)).await,
    }
}

async fn login(
    profile: Option<&str>,
    email: Option<String>,
    password: Option<String>,
) -> Result<(), CliError> {
    let (name, service) = resolve_service_config(profile)?;
    let service = service.ok_or(CliError::NotConfigured)?;
    let credentials = resolve_credentials(email, password)?;

    let session = connect(&name, service)?
        .auth()
        .sign_in(&credentials)
        .await
        .map_err(auth_error)?;
    println!("[{name}] signed in as {}", signed_in_as(&session));
    Ok(())
}

/// Without a configured service only the keychain is consulted; with one the
/// saved session is refreshed first.
async fn status(profile: Option<&str>) -> Result<(), CliError> {
    let (name, service) = resolve_service_config(profile)?;
    let session = match service {
        Some(service) => connect(&name, service)?
            .auth()
            .restore_session()
            .await
            .map_err(auth_error)?,
        None => load_stored_session(&name)?,
    };

    match session {
        Some(session) => {
            let expires = chrono::DateTime::from_timestamp(session.expires_at, 0)
                .map_or_else(|| session.expires_at.to_string(), |at| at.to_rfc3339());
            println!("[{name}] signed in as {} until {expires}", signed_in_as(&session));
        }
        None => println!("[{name}] not signed in"),
    }
    Ok(())
}

async fn logout(profile: Option<&str>) -> Result<(), CliError> {
    let (name, service) = resolve_service_config(profile)?;
    match service {
        Some(service) => connect(&name, service)?.sign_out().await?,
        None => clear_stored_session(&name)?,
    }
    println!("[{name}] signed out");
    Ok(())
}

/// Flags first, then `STASH_ACCOUNT_EMAIL` / `STASH_ACCOUNT_PASSWORD`.
pub fn resolve_credentials(
    email: Option<String>,
    password: Option<String>,
) -> Result<AccountCredentials, CliError> {
    let from_env = AccountCredentials::from_env();
    let email = normalize_text_option(email)
        .or_else(|| from_env.as_ref().map(|credentials| credentials.email.clone()))
        .ok_or_else(|| auth_error("an email is required (--email)"))?;
    let password = password
        .filter(|password| !password.is_empty())
        .or_else(|| from_env.map(|credentials| credentials.password))
        .ok_or_else(|| auth_error("a password is required (--password)"))?;
    Ok(AccountCredentials::new(email, password))
}
