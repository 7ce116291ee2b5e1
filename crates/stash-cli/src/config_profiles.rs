//! Named connection profiles stored as JSON in the user config directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stash_core::config::ServiceConfig;
use stash_core::util::normalize_text_option;

use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "cli-config.json";
const PROFILE_ENV: &str = "STASH_PROFILE";
const FALLBACK_PROFILE: &str = "default";
const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfilesFile {
    #[serde(default = "format_version")]
    pub version: u32,
    #[serde(default)]
    pub active_profile: Option<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for ProfilesFile {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            active_profile: None,
            profiles: BTreeMap::new(),
        }
    }
}

/// Connection settings saved under one profile name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supabase_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supabase_anon_key: Option<String>,
}

const fn format_version() -> u32 {
    FORMAT_VERSION
}

/// `<config dir>/stash/cli-config.json`, relative to the working directory when
/// the platform has no config dir.
pub fn profiles_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_default()
        .join("stash")
        .join(CONFIG_FILE_NAME)
}

/// Trimmed profile name; blank names count as absent.
pub fn clean_profile_name(value: Option<&str>) -> Option<String> {
    normalize_text_option(value.map(ToOwned::to_owned))
}

fn file_error(action: &str, path: &Path, error: impl std::fmt::Display) -> CliError {
    CliError::Config(format!("Could not {action} {}: {error}", path.display()))
}

impl ProfilesFile {
    pub fn load() -> Result<Self, CliError> {
        Self::read(&profiles_path())
    }

    /// Read `path`; a missing file is an empty configuration.
    pub fn read(path: &Path) -> Result<Self, CliError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default())
            }
            Err(error) => return Err(file_error("read", path, error)),
        };
        let mut file: Self =
            serde_json::from_str(&raw).map_err(|error| file_error("parse", path, error))?;
        file.tidy();
        Ok(file)
    }

    pub fn save(&self) -> Result<PathBuf, CliError> {
        let path = profiles_path();
        self.write(&path)?;
        Ok(path)
    }

    pub fn write(&self, path: &Path) -> Result<(), CliError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|error| file_error("create", dir, error))?;
        }
        let mut tidy = self.clone();
        tidy.tidy();
        let json = serde_json::to_string_pretty(&tidy)?;
        fs::write(path, json).map_err(|error| file_error("write", path, error))
    }

    /// Explicit name, then `STASH_PROFILE`, then the active profile, then
    /// `default`.
    pub fn resolve_profile_name(&self, explicit: Option<&str>) -> String {
        let from_env = std::env::var(PROFILE_ENV).ok();
        let name = [explicit, from_env.as_deref(), self.active_profile.as_deref()]
            .into_iter()
            .find_map(clean_profile_name)
            .unwrap_or_else(|| FALLBACK_PROFILE.to_string());
        name
    }

    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn profile_entry(&mut self, name: &str) -> &mut Profile {
        self.profiles.entry(name.to_string()).or_default()
    }

    fn tidy(&mut self) {
        self.active_profile = clean_profile_name(self.active_profile.as_deref());
        self.profiles.values_mut().for_each(Profile::tidy);
    }
}

impl Profile {
    pub fn supabase_url(&self) -> Option<String> {
        normalize_text_option(self.supabase_url.clone())
    }

    pub fn supabase_anon_key(&self) -> Option<String> {
        normalize_text_option(self.supabase_anon_key.clone())
    }

    /// Connection settings stored in this profile, if complete.
    pub fn service_config(&self) -> stash_core::Result<Option<ServiceConfig>> {
        ServiceConfig::resolve(self.supabase_url(), self.supabase_anon_key())
    }

    fn tidy(&mut self) {
        self.supabase_url = self
            .supabase_url()
            .map(|url| url.trim_end_matches('/').to_string());
        self.supabase_anon_key = self.supabase_anon_key();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn blank_profile_names_are_absent() {
        assert_eq!(clean_profile_name(None), None);
        assert_eq!(clean_profile_name(Some(" ")), None);
        assert_eq!(clean_profile_name(Some(" work ")), Some("work".into()));
    }

    #[test]
    fn saved_profiles_are_tidied_and_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut file = ProfilesFile {
            active_profile: Some(" default ".to_string()),
            ..ProfilesFile::default()
        };
        *file.profile_entry("default") = Profile {
            supabase_url: Some(" https://project.supabase.co/ ".to_string()),
            supabase_anon_key: Some(" anon-key ".to_string()),
        };

        file.write(&path).unwrap();
        let loaded = ProfilesFile::read(&path).unwrap();
        assert_eq!(loaded.active_profile.as_deref(), Some("default"));
        let profile = loaded.profile("default").unwrap();
        assert_eq!(
            profile.supabase_url.as_deref(),
            Some("https://project.supabase.co")
        );
        assert_eq!(profile.supabase_anon_key.as_deref(), Some("anon-key"));

        let service = profile.service_config().unwrap().unwrap();
        assert_eq!(service.rest_url(), "https://project.supabase.co/rest/v1");
    }

    #[test]
    fn missing_file_is_empty_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = ProfilesFile::read(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, ProfilesFile::default());
    }

    #[test]
    fn malformed_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();
        let error = ProfilesFile::read(&path).unwrap_err();
        assert!(error.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn half_configured_profile_is_an_error() {
        let profile = Profile {
            supabase_url: Some("https://project.supabase.co".to_string()),
            supabase_anon_key: None,
        };
        assert!(profile.service_config().is_err());
        assert_eq!(Profile::default().service_config().unwrap(), None);
    }

    #[test]
    fn explicit_profile_name_wins() {
        let file = ProfilesFile {
            active_profile: Some("work".to_string()),
            ..ProfilesFile::default()
        };
        assert_eq!(file.resolve_profile_name(Some("laptop")), "laptop");
        if std::env::var(PROFILE_ENV).is_err() {
            assert_eq!(file.resolve_profile_name(None), "work");
        }
    }
}
