use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use marquee_core::locale;
use marquee_core::routes::API_BASE_URL;
use marquee_core::transport::DEFAULT_TIMEOUT;
use marquee_core::Credentials;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::models::{
    ApiConfig, Config, ConfigLoad, ConfigMetadata, ConfigWarnings,
};
use crate::sources::{EnvConfig, FileConfig};

/// Platform default, e.g. `~/.config/marquee/config.toml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "marquee", "marquee")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    /// Do not read any `.env` file.
    pub skip_env_file: bool,
}

/// Composes defaults, the TOML file and the environment, in that order of
/// increasing precedence.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn without_env_file(mut self) -> Self {
        self.options.skip_env_file = true;
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = self.load_env_file()?;
        let env_config = EnvConfig::gather();
        self.load_with_env(env_config, env_file_loaded)
    }

    /// Compose from an already gathered environment.
    pub fn load_with_env(
        &self,
        env_config: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env_config)?;
        let (config, warnings) = compose_config(
            file_config.unwrap_or_default(),
            env_config,
            ConfigMetadata {
                config_path,
                env_file_loaded,
            },
        )?;
        Ok(ConfigLoad { config, warnings })
    }

    fn load_env_file(&self) -> Result<bool, ConfigLoadError> {
        if self.options.skip_env_file {
            return Ok(false);
        }
        match &self.options.env_file {
            Some(path) => match dotenvy::from_path(path) {
                Ok(()) => Ok(true),
                Err(err) if err.not_found() => {
                    Err(ConfigLoadError::MissingEnvFile { path: path.clone() })
                }
                Err(err) => Err(err.into()),
            },
            // an implicit .env is optional
            None => match dotenvy::dotenv() {
                Ok(_) => Ok(true),
                Err(err) if err.not_found() => Ok(false),
                Err(err) => Err(err.into()),
            },
        }
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let source = ConfigPathSource {
            explicit: self.options.config_path.clone(),
            env: env_config.config_path.clone(),
            default: default_config_path(),
        };

        let Some((path, provenance)) = source.resolved_path() else {
            return Ok((None, None));
        };

        if !path.exists() {
            if provenance.is_required() {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        debug!(path = %path.display(), "reading configuration file");
        let file_config = read_file_config(&path)?;
        Ok((Some(file_config), Some(path)))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|err| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
    toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source: err,
    })
}

fn compose_config(
    file: FileConfig,
    env: EnvConfig,
    metadata: ConfigMetadata,
) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();
    let file_api = file.api;

    let raw_base_url = env
        .base_url
        .or(file_api.base_url)
        .unwrap_or_else(|| API_BASE_URL.to_string());
    let base_url = parse_base_url(&raw_base_url)?;

    let access_token = env.access_token.or(file_api.access_token);
    let api_key = env.api_key.or(file_api.api_key);
    let credentials = match (access_token, api_key) {
        (Some(token), Some(_)) => {
            warnings.push(
                "both an API key and an access token are configured; \
                 using the access token",
            );
            Credentials::AccessToken(token)
        }
        (Some(token), None) => Credentials::AccessToken(token),
        (None, Some(key)) => Credentials::ApiKey(key),
        (None, None) => return Err(ConfigLoadError::MissingCredentials),
    };

    let language = env
        .language
        .or(file_api.language)
        .and_then(|tag| {
            let normalized = locale::normalize_locale(&tag);
            if normalized.is_none() {
                warnings.push(format!(
                    "ignoring unusable language `{tag}`; using the system locale"
                ));
            }
            normalized
        })
        .unwrap_or_else(locale::language_tag);

    let request_timeout = match env.request_timeout.or(file_api.request_timeout)
    {
        Some(raw) => parse_timeout(&raw)?,
        None => DEFAULT_TIMEOUT,
    };

    let user_agent = env
        .user_agent
        .or(file_api.user_agent)
        .unwrap_or_else(|| format!("marquee/{}", env!("CARGO_PKG_VERSION")));

    let preferences_path = env.preferences_path.or(file.preferences.path);

    let config = Config {
        api: ApiConfig {
            base_url,
            credentials,
            language,
            request_timeout,
            user_agent,
        },
        preferences_path,
        metadata,
    };
    Ok((config, warnings))
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigLoadError> {
    let mut url = Url::parse(raw).map_err(|source| {
        ConfigLoadError::InvalidBaseUrl {
            value: raw.to_string(),
            source,
        }
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigLoadError::UnsupportedScheme {
            value: raw.to_string(),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigLoadError> {
    let timeout = humantime::parse_duration(raw).map_err(|source| {
        ConfigLoadError::InvalidDuration {
            value: raw.to_string(),
            source,
        }
    })?;
    if timeout.is_zero() {
        return Err(ConfigLoadError::ZeroTimeout);
    }
    Ok(timeout)
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(
        "no TMDB credentials: set TMDB_API_KEY or TMDB_ACCESS_TOKEN, \
         or api.api_key / api.access_token in the configuration file"
    )]
    MissingCredentials,
    #[error("invalid API base URL '{value}'")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API base URL '{value}' must use http or https")]
    UnsupportedScheme { value: String },
    #[error("invalid request timeout '{value}'")]
    InvalidDuration {
        value: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
    #[error("env file missing: {path}")]
    MissingEnvFile { path: PathBuf },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

#[derive(Debug, Default)]
struct ConfigPathSource {
    explicit: Option<PathBuf>,
    env: Option<PathBuf>,
    default: Option<PathBuf>,
}

impl ConfigPathSource {
    fn resolved_path(&self) -> Option<(PathBuf, ConfigPathProvenance)> {
        if let Some(path) = &self.explicit {
            return Some((path.clone(), ConfigPathProvenance::Explicit));
        }
        if let Some(path) = &self.env {
            return Some((path.clone(), ConfigPathProvenance::Env));
        }
        if let Some(path) = &self.default {
            return Some((path.clone(), ConfigPathProvenance::Default));
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigPathProvenance {
    Explicit,
    Env,
    Default,
}

impl ConfigPathProvenance {
    /// Paths named by the user must exist; the platform default may not.
    fn is_required(self) -> bool {
        matches!(self, ConfigPathProvenance::Explicit | ConfigPathProvenance::Env)
    }
}
