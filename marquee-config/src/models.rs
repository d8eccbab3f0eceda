use std::path::PathBuf;
use std::time::Duration;

use marquee_core::{Credentials, RequestDefaults, TransportOptions};
use url::Url;

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    /// Theme preferences file; `None` means the platform default location.
    pub preferences_path: Option<PathBuf>,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub credentials: Credentials,
    pub language: String,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl ApiConfig {
    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            base_url: self.base_url.to_string(),
            credentials: self.credentials.clone(),
            timeout: self.request_timeout,
            user_agent: self.user_agent.clone(),
        }
    }

    pub fn request_defaults(&self) -> RequestDefaults {
        RequestDefaults {
            language: self.language.clone(),
        }
    }
}

/// Where the configuration came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}

/// Non-fatal issues found while composing the configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigWarnings {
    pub items: Vec<String>,
}

impl ConfigWarnings {
    pub fn push(&mut self, message: impl Into<String>) {
        self.items.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}
