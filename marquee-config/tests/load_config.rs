use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use marquee_config::{ConfigLoadError, ConfigLoader, EnvConfig};
use marquee_core::Credentials;

static ENV_LOCK: Mutex<()> = Mutex::new(());

const MANAGED_VARS: &[&str] = &[
    EnvConfig::CONFIG_PATH,
    EnvConfig::API_KEY,
    EnvConfig::ACCESS_TOKEN,
    EnvConfig::BASE_URL,
    EnvConfig::LANGUAGE,
    EnvConfig::REQUEST_TIMEOUT,
    EnvConfig::USER_AGENT,
    EnvConfig::PREFERENCES_PATH,
];

fn env_from(pairs: &[(&str, &str)]) -> EnvConfig {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    EnvConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn file_values_apply_under_environment() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
[api]
api_key = "file-key"
language = "es-ES"
request_timeout = "12s"
user_agent = "marquee-tests"

[preferences]
path = "/srv/marquee/preferences.json"
"#,
    )?;

    let loader = ConfigLoader::new()
        .with_config_path(&config_path)
        .without_env_file();
    let load = loader.load_with_env(
        env_from(&[(EnvConfig::LANGUAGE, "it-IT")]),
        false,
    )?;
    let config = load.config;

    assert_eq!(config.api.credentials, Credentials::ApiKey("file-key".into()));
    assert_eq!(config.api.language, "it-IT");
    assert_eq!(config.api.request_timeout, Duration::from_secs(12));
    assert_eq!(config.api.user_agent, "marquee-tests");
    assert_eq!(
        config.preferences_path,
        Some(PathBuf::from("/srv/marquee/preferences.json"))
    );
    assert_eq!(config.metadata.config_path, Some(config_path));
    Ok(())
}

#[test]
fn explicit_missing_file_is_an_error() {
    let loader = ConfigLoader::new()
        .with_config_path("/definitely/not/here/config.toml")
        .without_env_file();
    let err = loader
        .load_with_env(env_from(&[(EnvConfig::API_KEY, "k")]), false)
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::MissingConfig { .. }));
}

#[test]
fn config_path_from_environment_is_used() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("from-env.toml");
    fs::write(&config_path, "[api]\naccess_token = \"v4\"\n")?;

    let load = ConfigLoader::new().without_env_file().load_with_env(
        env_from(&[(
            EnvConfig::CONFIG_PATH,
            config_path.to_str().unwrap_or_default(),
        )]),
        false,
    )?;
    assert_eq!(
        load.config.api.credentials,
        Credentials::AccessToken("v4".into())
    );
    Ok(())
}

#[test]
fn malformed_file_reports_parse_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[api\napi_key = 1")?;

    let err = ConfigLoader::new()
        .with_config_path(&config_path)
        .without_env_file()
        .load_with_env(env_from(&[]), false)
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::Parse { .. }));
    Ok(())
}

#[test]
fn env_file_supplies_credentials() -> Result<()> {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    for var in MANAGED_VARS {
        unsafe { std::env::remove_var(var) };
    }

    let dir = tempfile::tempdir()?;
    let env_path = dir.path().join(".env");
    fs::write(
        &env_path,
        "TMDB_ACCESS_TOKEN=token-from-dotenv\nMARQUEE_REQUEST_TIMEOUT=3s\n",
    )?;
    let config_path = dir.path().join("empty.toml");
    fs::write(&config_path, "")?;

    let load = ConfigLoader::new()
        .with_config_path(&config_path)
        .with_env_file(&env_path)
        .load()?;

    assert!(load.config.metadata.env_file_loaded);
    assert_eq!(
        load.config.api.credentials,
        Credentials::AccessToken("token-from-dotenv".into())
    );
    assert_eq!(load.config.api.request_timeout, Duration::from_secs(3));

    for var in MANAGED_VARS {
        unsafe { std::env::remove_var(var) };
    }
    Ok(())
}

#[test]
fn process_environment_wins_over_env_file() -> Result<()> {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    for var in MANAGED_VARS {
        unsafe { std::env::remove_var(var) };
    }
    unsafe { std::env::set_var(EnvConfig::API_KEY, "from-process") };

    let dir = tempfile::tempdir()?;
    let env_path = dir.path().join(".env");
    fs::write(&env_path, "TMDB_API_KEY=from-dotenv\n")?;
    let config_path = dir.path().join("empty.toml");
    fs::write(&config_path, "")?;

    let load = ConfigLoader::new()
        .with_config_path(&config_path)
        .with_env_file(&env_path)
        .load()?;
    assert_eq!(
        load.config.api.credentials,
        Credentials::ApiKey("from-process".into())
    );

    for var in MANAGED_VARS {
        unsafe { std::env::remove_var(var) };
    }
    Ok(())
}

#[test]
fn explicit_missing_env_file_is_an_error() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    for var in MANAGED_VARS {
        unsafe { std::env::remove_var(var) };
    }
    unsafe { std::env::set_var(EnvConfig::API_KEY, "k") };

    let err = ConfigLoader::new()
        .with_env_file("/definitely/not/here/.env")
        .load()
        .unwrap_err();
    assert!(
        matches!(&err, ConfigLoadError::MissingEnvFile { path }
            if path.ends_with(".env")),
        "unexpected error: {err:?}"
    );

    for var in MANAGED_VARS {
        unsafe { std::env::remove_var(var) };
    }
}
