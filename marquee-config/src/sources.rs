use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub api: FileApiConfig,
    #[serde(default)]
    pub preferences: FilePreferencesConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileApiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// v3 API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// v4 read access token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// humantime duration, e.g. `15s`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FilePreferencesConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Values read from the process environment (after `.env` is applied).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub base_url: Option<String>,
    pub language: Option<String>,
    pub request_timeout: Option<String>,
    pub user_agent: Option<String>,
    pub preferences_path: Option<PathBuf>,
}

impl EnvConfig {
    pub const CONFIG_PATH: &'static str = "MARQUEE_CONFIG";
    pub const API_KEY: &'static str = "TMDB_API_KEY";
    pub const ACCESS_TOKEN: &'static str = "TMDB_ACCESS_TOKEN";
    pub const BASE_URL: &'static str = "MARQUEE_API_BASE_URL";
    pub const LANGUAGE: &'static str = "MARQUEE_LANGUAGE";
    pub const REQUEST_TIMEOUT: &'static str = "MARQUEE_REQUEST_TIMEOUT";
    pub const USER_AGENT: &'static str = "MARQUEE_USER_AGENT";
    pub const PREFERENCES_PATH: &'static str = "MARQUEE_PREFERENCES_PATH";

    pub fn gather() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            config_path: var(Self::CONFIG_PATH).map(PathBuf::from),
            api_key: var(Self::API_KEY),
            access_token: var(Self::ACCESS_TOKEN),
            base_url: var(Self::BASE_URL),
            language: var(Self::LANGUAGE),
            request_timeout: var(Self::REQUEST_TIMEOUT),
            user_agent: var(Self::USER_AGENT),
            preferences_path: var(Self::PREFERENCES_PATH).map(PathBuf::from),
        }
    }
}
