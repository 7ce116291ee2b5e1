use std::env;

use stash_core::config::{SUPABASE_ANON_KEY_ENV, SUPABASE_URL_ENV};
use stash_core::util::{is_http_url, normalize_text_option};

use crate::cli::ConfigCommands;
use crate::config_profiles::{Profile, ProfilesFile};
use crate::error::CliError;

/// Values to write into a profile. Unset fields leave the profile alone.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
}

impl ProfileUpdate {
    /// Flags first, then `SUPABASE_URL` / `SUPABASE_ANON_KEY`.
    pub fn from_flags_or_env(url: Option<String>, anon_key: Option<String>) -> Self {
        let pick = |flag: Option<String>, var: &str| {
            normalize_text_option(flag).or_else(|| normalize_text_option(env::var(var).ok()))
        };
        Self {
            supabase_url: pick(url, SUPABASE_URL_ENV),
            supabase_anon_key: pick(anon_key, SUPABASE_ANON_KEY_ENV),
        }
    }

    fn apply_to(self, profile: &mut Profile) -> Result<(), CliError> {
        if let Some(url) = self.supabase_url {
            let url = url.trim_end_matches('/').to_string();
            if !is_http_url(&url) {
                return Err(CliError::Config(format!(
                    "supabase_url must be an http:// or https:// URL, got `{url}`"
                )));
            }
            profile.supabase_url = Some(url);
        }
        if let Some(key) = self.supabase_anon_key {
            profile.supabase_anon_key = Some(key);
        }
        Ok(())
    }
}

pub fn run_config(command: ConfigCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    let ConfigCommands::Init {
        profile,
        supabase_url,
        supabase_anon_key,
        no_activate,
    } = command;

    let mut config = ProfilesFile::load()?;
    let update = ProfileUpdate::from_flags_or_env(supabase_url, supabase_anon_key);
    let name = init_profile(
        &mut config,
        profile.as_deref().or(global_profile),
        update,
        !no_activate,
    )?;
    let path = config.save()?;
    println!("Profile '{name}' written to {}", path.display());

    let missing = config.profile(&name).map(missing_fields).unwrap_or_default();
    if missing.is_empty() {
        println!("Next: stash auth login --profile {name} --email <email>");
    } else {
        println!("Profile '{name}' still needs: {}", missing.join(", "));
    }
    Ok(())
}

/// Apply `update` to the resolved profile, optionally making it active.
/// Returns the profile's name.
pub fn init_profile(
    config: &mut ProfilesFile,
    profile_name: Option<&str>,
    update: ProfileUpdate,
    activate: bool,
) -> Result<String, CliError> {
    let name = config.resolve_profile_name(profile_name);
    update.apply_to(config.profile_entry(&name))?;
    if activate {
        config.active_profile = Some(name.clone());
    }
    Ok(name)
}

pub fn missing_fields(profile: &Profile) -> Vec<&'static str> {
    [
        ("supabase_url", profile.supabase_url()),
        ("supabase_anon_key", profile.supabase_anon_key()),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_none())
    .map(|(field, _)| field)
    .collect()
}
