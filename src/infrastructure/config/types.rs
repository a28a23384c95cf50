//! Configuration value types (spec §6 "Configuration (recognized
//! options)", §9 "Global configuration" — a value object passed to the
//! startup routine rather than read from the environment at import time).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// One configured RAG prompt template (spec §3 `[ADDED] QueryType`, §9 Open
/// Question (c)). Keyed in [`Config::query_types`] by resource-type id
/// (the key `"default"` is the fallback used when no entry matches).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QueryTypeConfig {
    pub name: String,
    #[validate(length(min = 1))]
    pub prompt_template: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PostgresConfig {
    #[validate(length(min = 1))]
    pub db: String,
    #[validate(length(min = 1))]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[validate(length(min = 1))]
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Neo4jConfig {
    #[validate(length(min = 1))]
    pub uri: String,
    /// `"user/password"`, matching the upstream `NEO4J_AUTH` convention.
    #[validate(length(min = 1))]
    pub auth: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DispatchConfig {
    #[validate(length(min = 1))]
    pub broker_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PipelineConfig {
    #[validate(range(min = 1))]
    pub retry_max: u32,
    #[validate(range(min = 1))]
    pub retry_base_ms: u64,
    #[validate(range(min = 1))]
    pub retry_cap_ms: u64,
    #[validate(range(min = 1))]
    pub stage_deadline_sec: u64,
    #[validate(range(min = 1))]
    pub search_deadline_sec: u64,
    #[validate(range(min = 1))]
    pub fanout_concurrency: usize,
    #[validate(range(min = 1))]
    pub fanout_timeout_sec: u64,
    #[validate(range(min = 1))]
    pub top_k_default: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    #[validate(length(min = 1))]
    pub host: String,
    pub port: u16,
}

/// Root configuration, assembled by [`super::loader::ConfigLoader`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Config {
    #[validate(nested)]
    pub postgres: PostgresConfig,
    #[validate(nested)]
    pub neo4j: Neo4jConfig,
    #[validate(nested)]
    pub dispatch: DispatchConfig,
    #[validate(nested)]
    pub pipeline: PipelineConfig,
    #[validate(nested)]
    pub server: ServerConfig,
    /// Resource-type-id → prompt template (spec §3 `[ADDED] QueryType`).
    /// The `"default"` key is the fallback used when no resource type
    /// matches.
    #[serde(default)]
    pub query_types: HashMap<String, QueryTypeConfig>,
}
