//! Configuration loading for Marquee.
//!
//! Sources, lowest precedence first: built-in defaults, a TOML file
//! (`--config`, `$MARQUEE_CONFIG` or the platform config dir), then `.env`
//! and the process environment.
#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod sources;

pub use loader::{
    ConfigLoadError, ConfigLoader, ConfigLoaderOptions, default_config_path,
};
pub use models::{
    ApiConfig, Config, ConfigLoad, ConfigMetadata, ConfigWarnings,
};
pub use sources::{EnvConfig, FileConfig};
