//! Server configuration.
//!
//! Loaded once at startup, in increasing priority:
//!
//! 1. Built-in defaults (`AppConfig::default()`)
//! 2. `botica.toml` in the working directory (optional)
//! 3. `BOTICA__<SECTION>__<KEY>` environment variables,
//!    e.g. `BOTICA__SERVER__PORT=8080`, `BOTICA__CATALOG__UNITS=unit,box`
//!
//! Nothing reads the environment after [`AppConfig::load`] returns.

use std::time::Duration;

use botica_core::Catalog;
use botica_db::DbConfig;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    /// Allowed units of measure and storage locations.
    pub catalog: Catalog,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Pool settings, converted into [`DbConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite file path, or `:memory:`.
    pub path: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub run_migrations: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: "./botica.db".to_string(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 30,
            run_migrations: true,
        }
    }
}

impl DatabaseSettings {
    pub fn to_db_config(&self) -> DbConfig {
        let config = if self.path == ":memory:" {
            DbConfig::in_memory()
        } else {
            DbConfig::new(&self.path)
                .max_connections(self.max_connections)
                .min_connections(self.min_connections)
        };

        config
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .run_migrations(self.run_migrations)
    }
}

impl AppConfig {
    /// Loads defaults, then `botica.toml`, then `BOTICA__*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .add_source(File::with_name("botica").required(false))
            .add_source(
                Environment::with_prefix("BOTICA")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("catalog.units")
                    .with_list_parse_key("catalog.locations"),
            );

        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::MissingRequired("database.path".to_string()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "database.max_connections".to_string(),
            ));
        }
        if self.catalog.units.is_empty() {
            return Err(ConfigError::MissingRequired("catalog.units".to_string()));
        }
        Ok(())
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
