//! Configuration loader: embedded TOML defaults, an optional user config
//! file, then environment variables, in ascending priority (spec §6).
//!
//! Unlike the upstream source — which reads `os.environ` at import time,
//! scattered across modules — every environment variable recognized by
//! this crate is named explicitly here and layered through the `config`
//! crate, so startup is a single explicit call with no import-time I/O
//! (spec §9 "Global configuration").

use crate::domain::error::{Error, Result};
use config::{Config as ConfigBuilder, Environment, FileFormat};
use std::path::Path;
use validator::Validate;

use super::types::Config;

const DEFAULT_CONFIG_TOML: &str = include_str!("../../../config/default.toml");

/// Returns the embedded default config TOML, for tests that verify parsing
/// without touching the filesystem or environment.
pub fn get_default_config_toml() -> &'static str {
    DEFAULT_CONFIG_TOML
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn new() -> Self {
        Self
    }

    /// Loads embedded defaults, an optional user config file at `path`, and
    /// environment variables, highest priority last.
    pub fn load(&self, path: Option<&Path>) -> Result<Config> {
        let mut builder = ConfigBuilder::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG_TOML, FileFormat::Toml));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        } else if let Some(dir) = dirs::config_dir() {
            let user_config_path = dir.join("knowledge-service").join("config.toml");
            if user_config_path.exists() {
                builder = builder.add_source(config::File::from(user_config_path).required(false));
            }
        }

        // The spec names env vars by domain rather than a uniform prefix, so
        // each is mapped onto its field by hand instead of `Environment::with_prefix`.
        builder = builder
            .set_override_option("postgres.db", std::env::var("POSTGRES_DB").ok())?
            .set_override_option("postgres.user", std::env::var("POSTGRES_USER").ok())?
            .set_override_option("postgres.password", std::env::var("POSTGRES_PASSWORD").ok())?
            .set_override_option("postgres.host", std::env::var("POSTGRES_HOST").ok())?
            .set_override_option(
                "postgres.port",
                std::env::var("POSTGRES_PORT").ok().and_then(|v| v.parse::<i64>().ok()),
            )?
            .set_override_option("neo4j.auth", std::env::var("NEO4J_AUTH").ok())?
            .set_override_option("neo4j.uri", std::env::var("X_NEO4J_URI").ok())?
            .set_override_option("dispatch.broker_url", std::env::var("CELERY_BROKER_URL").ok())?
            .set_override_option(
                "pipeline.retry_max",
                std::env::var("PIPELINE_RETRY_MAX").ok().and_then(|v| v.parse::<i64>().ok()),
            )?
            .set_override_option(
                "pipeline.retry_base_ms",
                std::env::var("PIPELINE_RETRY_BASE_MS").ok().and_then(|v| v.parse::<i64>().ok()),
            )?
            .set_override_option(
                "pipeline.retry_cap_ms",
                std::env::var("PIPELINE_RETRY_CAP_MS").ok().and_then(|v| v.parse::<i64>().ok()),
            )?
            .set_override_option(
                "pipeline.stage_deadline_sec",
                std::env::var("STAGE_DEADLINE_SEC").ok().and_then(|v| v.parse::<i64>().ok()),
            )?
            .set_override_option(
                "pipeline.search_deadline_sec",
                std::env::var("SEARCH_DEADLINE_SEC").ok().and_then(|v| v.parse::<i64>().ok()),
            )?
            .set_override_option(
                "pipeline.fanout_concurrency",
                std::env::var("FANOUT_CONCURRENCY").ok().and_then(|v| v.parse::<i64>().ok()),
            )?
            .set_override_option(
                "pipeline.fanout_timeout_sec",
                std::env::var("FANOUT_TIMEOUT_SEC").ok().and_then(|v| v.parse::<i64>().ok()),
            )?
            .set_override_option(
                "pipeline.top_k_default",
                std::env::var("TOP_K_DEFAULT").ok().and_then(|v| v.parse::<i64>().ok()),
            )?
            // Environment variables not named by spec §6 (e.g. server bind
            // address) still fall back to the uniform prefix.
            .add_source(Environment::with_prefix("KNOWLEDGE_SERVICE").separator("__").try_parsing(true));

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("failed to build configuration: {e}")))?;

        let config: Config = config
            .try_deserialize()
            .map_err(|e| Error::config(format!("failed to deserialize configuration: {e}")))?;

        config
            .validate()
            .map_err(|e| Error::config(format!("configuration validation failed: {e}")))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_parse_and_validate() {
        let config = ConfigLoader::new().load(None).expect("embedded defaults must parse and validate");
        assert!(config.pipeline.retry_max > 0);
        assert!(config.pipeline.top_k_default > 0);
        assert!(!config.server.host.is_empty());
    }
}
