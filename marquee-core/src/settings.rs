//! Observable application configuration and persisted theme preferences.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use directories::ProjectDirs;
use marquee_model::{
    DarkThemeMode, ImageConfiguration, ThemePreferences, TmdbConfig,
};
use tokio::sync::{Mutex, RwLock, watch};
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info};

use crate::client::TmdbClient;
use crate::error::{ApiResult, PreferencesError};

/// Durable storage for [`ThemePreferences`].
#[async_trait]
pub trait PreferencesStore: Send + Sync + fmt::Debug {
    /// Stored preferences, or defaults when nothing has been saved yet.
    async fn load(&self) -> Result<ThemePreferences, PreferencesError>;

    async fn save(
        &self,
        preferences: &ThemePreferences,
    ) -> Result<(), PreferencesError>;
}

/// JSON file store, by default `<config_dir>/marquee/preferences.json`.
#[derive(Debug, Clone)]
pub struct JsonPreferencesStore {
    path: PathBuf,
}

impl JsonPreferencesStore {
    pub const FILE_NAME: &'static str = "preferences.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform configuration directory.
    pub fn in_config_dir() -> Result<Self, PreferencesError> {
        Self::default_path()
            .map(Self::new)
            .ok_or(PreferencesError::NoConfigDir)
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "marquee", "marquee")
            .map(|dirs| dirs.config_dir().join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PreferencesError {
        PreferencesError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl PreferencesStore for JsonPreferencesStore {
    async fn load(&self) -> Result<ThemePreferences, PreferencesError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stored preferences");
                Ok(ThemePreferences::default())
            }
            Err(err) => Err(self.io_error(err)),
        }
    }

    async fn save(
        &self,
        preferences: &ThemePreferences,
    ) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| self.io_error(err))?;
        }

        let contents = serde_json::to_vec_pretty(preferences)?;
        // write-then-rename so readers never see a partial file
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, contents)
            .await
            .map_err(|err| self.io_error(err))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|err| self.io_error(err))?;

        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryPreferencesStore {
    inner: RwLock<ThemePreferences>,
}

impl MemoryPreferencesStore {
    pub fn new(preferences: ThemePreferences) -> Self {
        Self {
            inner: RwLock::new(preferences),
        }
    }
}

#[async_trait]
impl PreferencesStore for MemoryPreferencesStore {
    async fn load(&self) -> Result<ThemePreferences, PreferencesError> {
        Ok(*self.inner.read().await)
    }

    async fn save(
        &self,
        preferences: &ThemePreferences,
    ) -> Result<(), PreferencesError> {
        *self.inner.write().await = *preferences;
        Ok(())
    }
}

/// Owner of the current [`TmdbConfig`].
///
/// Every change is broadcast to all subscribers; theme changes are written
/// through to the [`PreferencesStore`] before they are broadcast.
#[derive(Clone)]
pub struct ConfigStore {
    sender: Arc<watch::Sender<TmdbConfig>>,
    preferences: Arc<dyn PreferencesStore>,
    write_lock: Arc<Mutex<()>>,
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("current", &*self.sender.borrow())
            .field("preferences", &self.preferences)
            .finish()
    }
}

impl ConfigStore {
    /// Start from stored preferences and default image configuration.
    pub async fn load(
        preferences: Arc<dyn PreferencesStore>,
    ) -> Result<Self, PreferencesError> {
        let stored = preferences.load().await?;
        let initial =
            TmdbConfig::from_parts(ImageConfiguration::default(), stored);
        Ok(Self::with_initial(initial, preferences))
    }

    pub fn with_initial(
        initial: TmdbConfig,
        preferences: Arc<dyn PreferencesStore>,
    ) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
            preferences,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Store with in-memory preferences.
    pub fn in_memory() -> Self {
        Self::with_initial(
            TmdbConfig::default(),
            Arc::new(MemoryPreferencesStore::default()),
        )
    }

    pub fn current(&self) -> TmdbConfig {
        self.sender.borrow().clone()
    }

    /// Yields the current value immediately, then every later change.
    pub fn subscribe(&self) -> WatchStream<TmdbConfig> {
        WatchStream::new(self.sender.subscribe())
    }

    pub fn receiver(&self) -> watch::Receiver<TmdbConfig> {
        self.sender.subscribe()
    }

    pub async fn set_dark_theme(
        &self,
        mode: DarkThemeMode,
    ) -> Result<(), PreferencesError> {
        self.update_preferences(|prefs| prefs.dark_theme = mode)
            .await
    }

    pub async fn set_dynamic_theme(
        &self,
        enabled: bool,
    ) -> Result<(), PreferencesError> {
        self.update_preferences(|prefs| prefs.use_dynamic_theme = enabled)
            .await
    }

    /// Replace the image section, keeping the theme preferences.
    pub fn apply_remote(&self, images: ImageConfiguration) {
        self.sender.send_modify(|config| config.images = images);
        debug!("applied remote image configuration");
    }

    /// Fetch `configuration` and merge its image section.
    pub async fn refresh_remote(
        &self,
        client: &TmdbClient,
    ) -> ApiResult<TmdbConfig> {
        let remote = client.configuration().await?;
        self.apply_remote(remote.images);
        Ok(self.current())
    }

    async fn update_preferences(
        &self,
        change: impl FnOnce(&mut ThemePreferences),
    ) -> Result<(), PreferencesError> {
        // serializes persist + broadcast so the file matches the last emission
        let _guard = self.write_lock.lock().await;

        let mut preferences = self.sender.borrow().preferences();
        change(&mut preferences);
        self.preferences.save(&preferences).await?;

        self.sender.send_modify(|config| {
            config.dark_theme = preferences.dark_theme;
            config.use_dynamic_theme = preferences.use_dynamic_theme;
        });
        info!(
            dark_theme = ?preferences.dark_theme,
            dynamic = preferences.use_dynamic_theme,
            "theme preferences updated"
        );
        Ok(())
    }
}
