use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use marquee_config::{ConfigLoader, ConfigLoaderOptions};
use marquee_core::{
    ConfigStore, JsonPreferencesStore, PreferencesStore, ReqwestTransport,
    SessionStore, TmdbClient, TmdbRepository,
};
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,marquee_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let repo = build_repository(&cli).await?;
    let result = commands::run(&repo, cli.command).await;
    repo.shutdown();
    result
}

async fn build_repository(cli: &Cli) -> Result<TmdbRepository> {
    let loader = ConfigLoader::with_options(ConfigLoaderOptions {
        config_path: cli.config.clone(),
        env_file: cli.env_file.clone(),
        skip_env_file: false,
    });
    let load = loader.load().context("failed to load configuration")?;
    for warning in &load.warnings.items {
        warn!("{warning}");
    }
    let config = load.config;
    debug!(
        config_path = ?config.metadata.config_path,
        env_file_loaded = config.metadata.env_file_loaded,
        base_url = %config.api.base_url,
        "configuration loaded"
    );

    let transport = ReqwestTransport::new(config.api.transport_options())
        .context("failed to build HTTP client")?;
    let mut client =
        TmdbClient::with_defaults(Arc::new(transport), config.api.request_defaults());
    if let Some(language) = &cli.language {
        client = client.with_language(language.clone());
    }

    let preferences: Arc<dyn PreferencesStore> = match &config.preferences_path {
        Some(path) => Arc::new(JsonPreferencesStore::new(path.clone())),
        None => Arc::new(
            JsonPreferencesStore::in_config_dir()
                .context("no config directory for theme preferences")?,
        ),
    };
    let config_store = ConfigStore::load(preferences)
        .await
        .context("failed to read theme preferences")?;

    Ok(TmdbRepository::new(client, config_store, SessionStore::new()))
}
