use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::store::schema::is_valid_keyspace_name;

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const CONFIG_DIR: &str = "config";
const DEFAULT_KEYSPACE: &str = "warehouse";
const DEFAULT_CASSANDRA_NODE: &str = "127.0.0.1:9042";
const DEFAULT_REPLICATION_FACTOR: u32 = 1;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Which store implementation backs the handlers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreBackend {
    #[default]
    Cassandra,
    InMemory,
}

/// Cassandra connection and schema settings
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CassandraConfig {
    /// Contact points, `host:port`
    #[serde(default = "default_known_nodes")]
    #[validate(length(min = 1))]
    pub known_nodes: Vec<String>,

    /// Keyspace holding both tables
    #[serde(default = "default_keyspace")]
    #[validate(custom = "validate_keyspace")]
    pub keyspace: String,

    /// SimpleStrategy replication factor used when the keyspace is created
    #[serde(default = "default_replication_factor")]
    #[validate(range(min = 1))]
    pub replication_factor: u32,

    #[serde(default = "default_connect_timeout_secs")]
    #[validate(range(min = 1))]
    pub connect_timeout_secs: u64,
}

impl Default for CassandraConfig {
    fn default() -> Self {
        Self {
            known_nodes: default_known_nodes(),
            keyspace: default_keyspace(),
            replication_factor: default_replication_factor(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Application configuration structure with validation
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Application environment
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Logging level
    #[serde(default = "default_log_level")]
    #[validate(custom = "validate_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    /// Store backend: "cassandra" or "in-memory"
    #[serde(default)]
    pub store_backend: StoreBackend,

    /// Cassandra settings, ignored by the in-memory backend
    #[serde(default)]
    #[validate]
    pub cassandra: CassandraConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            log_json: false,
            store_backend: StoreBackend::default(),
            cassandra: CassandraConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] ConfigError),
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_environment() -> String {
    DEFAULT_ENV.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_known_nodes() -> Vec<String> {
    vec![DEFAULT_CASSANDRA_NODE.to_string()]
}

fn default_keyspace() -> String {
    DEFAULT_KEYSPACE.to_string()
}

fn default_replication_factor() -> u32 {
    DEFAULT_REPLICATION_FACTOR
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level.to_ascii_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => {
            let mut err = ValidationError::new("invalid_log_level");
            err.message = Some("log_level must be one of trace, debug, info, warn, error".into());
            Err(err)
        }
    }
}

fn validate_keyspace(keyspace: &str) -> Result<(), ValidationError> {
    if is_valid_keyspace_name(keyspace) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_keyspace");
        err.message = Some(
            "keyspace must start with a letter and contain at most 48 letters, digits or underscores"
                .into(),
        );
        Err(err)
    }
}

/// Initializes tracing using the provided log level as the default filter
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_directive = format!("warehouse_inventory_api={},tower_http=debug", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    let filter = EnvFilter::new(filter_directive);
    if json {
        let _ = fmt().with_env_filter(filter).json().try_init();
    } else {
        let _ = fmt().with_env_filter(filter).try_init();
    }
}

/// Loads application configuration from the working directory
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    load_config_from(Path::new(CONFIG_DIR))
}

/// Loads application configuration
///
/// Layers configuration sources in this order:
/// 1. Built-in defaults
/// 2. `{config_dir}/default.toml`
/// 3. Environment-specific file (`{config_dir}/{RUN_ENV}.toml`)
/// 4. Environment variables (`APP__*`, lists comma-separated)
pub fn load_config_from(config_dir: &Path) -> Result<AppConfig, AppConfigError> {
    // Support both RUN_ENV and APP_ENV for selecting config profile
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);

    if !config_dir.exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            config_dir.display()
        );
    }

    let config = Config::builder()
        .set_default("environment", run_env.as_str())?
        .add_source(File::from(config_dir.join("default")).required(false))
        .add_source(File::from(config_dir.join(&run_env)).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("cassandra.known_nodes"),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    app_config.validate().map_err(|e| {
        error!("Configuration validation failed: {:?}", e);
        AppConfigError::Validation(e)
    })?;

    info!("Configuration loaded successfully");
    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_valid() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.store_backend, StoreBackend::Cassandra);
        assert_eq!(cfg.cassandra.keyspace, "warehouse");
        assert_eq!(cfg.cassandra.replication_factor, 1);
        assert_eq!(cfg.bind_address(), "0.0.0.0:8080");
        assert_eq!(cfg.environment, "development");
    }

    #[rstest]
    #[case("warehouse", true)]
    #[case("inventory_v2", true)]
    #[case("warehouses; DROP TABLE x", false)]
    #[case("_hidden", false)]
    #[case("", false)]
    fn keyspace_validation(#[case] keyspace: &str, #[case] ok: bool) {
        let mut cfg = AppConfig::default();
        cfg.cassandra.keyspace = keyspace.to_string();
        assert_eq!(cfg.validate().is_ok(), ok);
    }

    #[test]
    fn rejects_unknown_log_level_and_empty_nodes() {
        let mut cfg = AppConfig::default();
        cfg.log_level = "loud".into();
        assert!(cfg.validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.cassandra.known_nodes.clear();
        assert!(cfg.validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.cassandra.replication_factor = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn reads_settings_from_default_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
                port = 9191
                log_level = "debug"
                store_backend = "in-memory"

                [cassandra]
                known_nodes = ["cass-1:9042", "cass-2:9042"]
                keyspace = "inventory"
                replication_factor = 3
            "#,
        )
        .unwrap();

        let cfg = load_config_from(dir.path()).unwrap();
        assert_eq!(cfg.port, 9191);
        assert_eq!(cfg.log_level(), "debug");
        assert_eq!(cfg.store_backend, StoreBackend::InMemory);
        assert_eq!(cfg.cassandra.known_nodes, vec!["cass-1:9042", "cass-2:9042"]);
        assert_eq!(cfg.cassandra.keyspace, "inventory");
        assert_eq!(cfg.cassandra.replication_factor, 3);
        assert_eq!(cfg.cassandra.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
    }

    #[test]
    fn invalid_file_values_fail_validation() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[cassandra]\nkeyspace = \"bad-name\"\n",
        )
        .unwrap();

        let result = load_config_from(dir.path());
        assert!(matches!(result, Err(AppConfigError::Validation(_))));
    }
}
