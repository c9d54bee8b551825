//! Configuration loader with layered sources.

use crate::validation::validate_config;
use crate::AppConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use homelab_core::HomelabError;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Prefix for nested environment overrides (`HOMELAB__SERVER__PORT`).
const ENV_PREFIX: &str = "HOMELAB";

/// Flat variables honoured for compatibility with existing deployments,
/// mapped to their configuration key.
const FLAT_VARIABLES: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("CORS_ORIGIN", "server.cors_origin"),
    ("DATA_DIR", "database.data_dir"),
    ("REDIS_URL", "cache.redis_url"),
    ("REDIS_TTL", "cache.ttl_secs"),
    ("REDIS_KEY_PREFIX", "cache.key_prefix"),
    ("CACHE_BACKEND", "cache.backend"),
    ("LOG_LEVEL", "observability.log_level"),
    ("LOG_FORMAT", "observability.log_format"),
];

/// Configuration loaded once at startup.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from `config_dir` and the process environment.
    ///
    /// Sources, lowest precedence first:
    /// 1. Built-in defaults
    /// 2. `default.toml`
    /// 3. `{environment}.toml`
    /// 4. `local.toml`
    /// 5. Environment variables with the `HOMELAB__` prefix
    /// 6. Flat variables (`PORT`, `DATA_DIR`, `REDIS_URL`, ...)
    pub fn new(config_dir: &str) -> Result<Self, HomelabError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let config = load_config(config_dir, &std::env::vars().collect())?;
        Ok(Self { config })
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub fn get(&self) -> &AppConfig {
        &self.config
    }
}

/// Loads and validates configuration from `config_dir` and the given
/// environment snapshot.
pub fn load_config(
    config_dir: &str,
    vars: &HashMap<String, String>,
) -> Result<AppConfig, HomelabError> {
    let environment = vars
        .get("HOMELAB_ENVIRONMENT")
        .cloned()
        .unwrap_or_else(|| "development".to_string());

    info!("Loading configuration for environment: {}", environment);

    let mut builder = Config::builder();

    for name in ["default", environment.as_str(), "local"] {
        let path = format!("{}/{}.toml", config_dir, name);
        if Path::new(&path).exists() {
            debug!("Loading config from: {}", path);
            builder = builder.add_source(File::with_name(&path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .source(Some(vars.clone().into_iter().collect())),
    );

    builder = apply_flat_variables(builder, vars).map_err(config_error_to_homelab_error)?;
    builder = builder
        .set_override("app.environment", environment)
        .map_err(config_error_to_homelab_error)?;

    let app_config = builder
        .build()
        .and_then(Config::try_deserialize::<AppConfig>)
        .map_err(config_error_to_homelab_error)?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn apply_flat_variables(
    mut builder: ConfigBuilder<DefaultState>,
    vars: &HashMap<String, String>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    for (variable, key) in FLAT_VARIABLES {
        builder = builder.set_override_option(*key, vars.get(*variable).cloned())?;
    }

    // Caching stays on unless explicitly switched off.
    let redis_enabled = vars
        .get("REDIS_ENABLED")
        .map(|value| !value.trim().eq_ignore_ascii_case("false"));
    builder.set_override_option("cache.enabled", redis_enabled)
}

fn config_error_to_homelab_error(err: ConfigError) -> HomelabError {
    HomelabError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CacheBackendKind;
    use std::fs;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_files_or_env() {
        let dir = TempDir::new().unwrap();
        let config = load_config(dir.path().to_str().unwrap(), &HashMap::new()).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.data_dir, "/data");
        assert!(config.cache.enabled);
        assert_eq!(config.app.environment, "development");
    }

    #[test]
    fn test_flat_variables_override_defaults() {
        let dir = TempDir::new().unwrap();
        let env = vars(&[
            ("PORT", "8080"),
            ("DATA_DIR", "/tmp/homelab"),
            ("REDIS_TTL", "60"),
            ("REDIS_KEY_PREFIX", "lab"),
            ("CACHE_BACKEND", "memory"),
        ]);
        let config = load_config(dir.path().to_str().unwrap(), &env).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.data_dir, "/tmp/homelab");
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.cache.key_prefix, "lab");
        assert_eq!(config.cache.backend, CacheBackendKind::Memory);
    }

    #[test]
    fn test_redis_enabled_only_false_disables() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_str().unwrap();

        let config = load_config(path, &vars(&[("REDIS_ENABLED", "false")])).unwrap();
        assert!(!config.cache.enabled);

        let config = load_config(path, &vars(&[("REDIS_ENABLED", "no")])).unwrap();
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_file_layers_and_prefixed_env() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[server]\nport = 7000\ncors_origin = \"http://dash.lan\"\n",
        )
        .unwrap();
        fs::write(dir.path().join("staging.toml"), "[server]\nport = 7100\n").unwrap();

        let env = vars(&[
            ("HOMELAB_ENVIRONMENT", "staging"),
            ("HOMELAB__CACHE__TTL_SECS", "120"),
        ]);
        let config = load_config(dir.path().to_str().unwrap(), &env).unwrap();
        assert_eq!(config.server.port, 7100);
        assert_eq!(config.server.cors_origin, "http://dash.lan");
        assert_eq!(config.cache.ttl_secs, 120);
        assert_eq!(config.app.environment, "staging");
    }

    #[test]
    fn test_flat_variable_wins_over_prefixed() {
        let dir = TempDir::new().unwrap();
        let env = vars(&[("HOMELAB__SERVER__PORT", "6000"), ("PORT", "6001")]);
        let config = load_config(dir.path().to_str().unwrap(), &env).unwrap();
        assert_eq!(config.server.port, 6001);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = TempDir::new().unwrap();
        let err = load_config(dir.path().to_str().unwrap(), &vars(&[("REDIS_TTL", "0")]))
            .unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
        assert!(err.to_string().contains("cache.ttl_secs"));

        let err = load_config(dir.path().to_str().unwrap(), &vars(&[("PORT", "not-a-port")]))
            .unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_loader_reads_config_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("local.toml"), "[database]\nfile_name = \"first.db\"\n").unwrap();

        let loader = ConfigLoader::new(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(loader.get().database.file_name, "first.db");
    }
}
