use std::path::Path;

use config::{Config, ConfigError, Environment, File};

pub const DEFAULT_DATABASE_URL: &str = "sqlite:////tmp/test.db";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub debug: bool,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl DatabaseSettings {
    /// The URL handed to the connection manager.
    pub fn connection_url(&self) -> String {
        normalize_database_url(&self.url)
    }
}

/// Rewrites the legacy `postgres://` scheme and turns `sqlite://` URLs into
/// plain file paths. `sqlite:////tmp/test.db` becomes `/tmp/test.db`.
pub fn normalize_database_url(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("postgres://") {
        format!("postgresql://{}", rest)
    } else if let Some(path) = url.strip_prefix("sqlite:///") {
        path.to_owned()
    } else if let Some(path) = url.strip_prefix("sqlite://") {
        path.to_owned()
    } else {
        url.to_owned()
    }
}

/// Values read straight from the process environment. These win over every
/// other source.
#[derive(Default, Debug)]
pub struct EnvOverrides {
    pub database_url: Option<String>,
    pub port: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").ok(),
            port: std::env::var("PORT").ok(),
        }
    }
}

pub fn get_settings() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| ConfigError::Message(format!("Failed to determine the current directory: {}", e)))?;
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    build_settings(
        &base_path.join("settings"),
        &environment,
        EnvOverrides::from_env(),
    )
}

pub fn build_settings(
    settings_directory: &Path,
    environment: &str,
    overrides: EnvOverrides,
) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder()
        .set_default("application.host", "0.0.0.0")?
        .set_default("application.port", i64::from(DEFAULT_PORT))?
        .set_default("database.url", DEFAULT_DATABASE_URL)?
        .set_default("database.max_connections", 10_i64)?
        .set_default("database.acquire_timeout_secs", 2_i64)?
        .set_default("debug", false)?
        .add_source(File::from(settings_directory.join("base.yaml")).required(false))
        .add_source(
            File::from(settings_directory.join(format!("{}.yaml", environment))).required(false),
        )
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        );

    if let Some(url) = overrides.database_url {
        builder = builder.set_override("database.url", url)?;
    }
    if let Some(port) = overrides.port {
        builder = builder.set_override("application.port", port)?;
    }

    builder.build()?.try_deserialize::<Settings>()
}
