//! Persistent CLI configuration.
//!
//! State lives in `~/.stratus/config.json`. `STRATUS_HOME` overrides the
//! home directory, which is also how tests point the CLI at a scratch
//! directory. A missing file is an empty configuration, not an error.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// A targeted resource stored as guid plus display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetedResource {
    /// Platform guid.
    pub guid: String,
    /// Display name.
    pub name: String,
}

/// The persisted CLI state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API endpoint last targeted with `stratus api`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Bearer token from the last login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Logged-in username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Targeted organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<TargetedResource>,
    /// Targeted space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<TargetedResource>,
}

impl Config {
    /// Path of the config file.
    #[must_use]
    pub fn path() -> PathBuf {
        let home = std::env::var_os("STRATUS_HOME")
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        home.join(".stratus").join("config.json")
    }

    /// Loads the config, treating a missing file as empty.
    pub fn load() -> Result<Self, CliError> {
        Self::load_from(&Self::path())
    }

    fn load_from(path: &std::path::Path) -> Result<Self, CliError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|e| CliError::Config(e.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(CliError::Config(e.to_string())),
        }
    }

    /// The API endpoint, preferring an explicit override.
    pub fn api_endpoint<'a>(&'a self, flag: Option<&'a str>) -> Result<&'a str, CliError> {
        flag.or(self.target.as_deref()).ok_or(CliError::NoApiEndpoint)
    }

    /// The logged-in username.
    pub fn current_user(&self) -> Result<&str, CliError> {
        self.user.as_deref().ok_or(CliError::NotLoggedIn)
    }

    /// The targeted organization.
    pub fn targeted_organization(&self) -> Result<&TargetedResource, CliError> {
        self.organization
            .as_ref()
            .ok_or(CliError::NoOrganizationTargeted)
    }

    /// The targeted space.
    pub fn targeted_space(&self) -> Result<&TargetedResource, CliError> {
        self.space.as_ref().ok_or(CliError::NoSpaceTargeted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targeted_config() -> Config {
        Config {
            target: Some("https://api.stratus.example".into()),
            access_token: Some("some-token".into()),
            user: Some("some-user".into()),
            organization: Some(TargetedResource {
                guid: "some-org-guid".into(),
                name: "some-org".into(),
            }),
            space: Some(TargetedResource {
                guid: "some-space-guid".into(),
                name: "some-space".into(),
            }),
        }
    }

    #[test]
    fn missing_file_loads_as_empty_config() {
        let dir = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(_) => return,
        };
        let config = Config::load_from(&dir.path().join("config.json"));
        assert!(config.is_ok_and(|c| c.target.is_none() && c.user.is_none()));
    }

    #[test]
    fn round_trips_through_json() {
        let config = targeted_config();
        let json = serde_json::to_string(&config).unwrap_or_default();
        let loaded: Config = serde_json::from_str(&json).unwrap_or_default();
        assert_eq!(loaded.organization, config.organization);
        assert_eq!(loaded.space, config.space);
        assert_eq!(loaded.target, config.target);
    }

    #[test]
    fn corrupt_file_is_a_config_error() {
        let dir = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(_) => return,
        };
        let path = dir.path().join("config.json");
        if std::fs::write(&path, "{not json").is_err() {
            return;
        }
        assert!(matches!(
            Config::load_from(&path),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn accessors_fail_when_untargeted() {
        let config = Config::default();
        assert!(matches!(
            config.current_user(),
            Err(CliError::NotLoggedIn)
        ));
        assert!(matches!(
            config.targeted_organization(),
            Err(CliError::NoOrganizationTargeted)
        ));
        assert!(matches!(
            config.targeted_space(),
            Err(CliError::NoSpaceTargeted)
        ));
        assert!(matches!(
            config.api_endpoint(None),
            Err(CliError::NoApiEndpoint)
        ));
    }

    #[test]
    fn api_flag_overrides_stored_target() {
        let config = targeted_config();
        let endpoint = config.api_endpoint(Some("https://other.example"));
        assert!(endpoint.is_ok_and(|e| e == "https://other.example"));
    }
}
