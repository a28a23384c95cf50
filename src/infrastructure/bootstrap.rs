//! Explicit construction routine that builds the default [`Registry`]
//! (spec §9 "Cyclic imports / module-level state": startup here is an
//! explicit function returning a value, not framework module-init magic).

use crate::application::registry::Registry;
use crate::domain::types::{QueryType, ResourceType};
use crate::infrastructure::adapters::{
    DeterministicLanguageModel, InMemoryCollectionStore, InMemoryGraphStore, InMemoryQuarantine,
    InMemoryResourceStore, InMemoryResourceTypeStore, InMemorySearchStore,
    InMemorySubscriptionStore, MarkdownParagraphChunker, MarkerAntivirusScanner,
    PlainTextFileManager,
};
use crate::infrastructure::config::Config;
use crate::infrastructure::dispatcher::{InMemoryDispatcher, RetryPolicy};
use crate::infrastructure::webhook::{FanoutPolicy, ReqwestWebhookClient};
use std::sync::Arc;
use uuid::Uuid;

/// Builds a [`Registry`] wired entirely to in-memory/deterministic
/// adapters, seeded with one default resource type, together with a
/// handle to the concrete in-memory dispatcher backing `task_dispatch`.
///
/// The in-memory `TaskDispatch` is a `tokio::mpsc` queue local to this
/// process (spec §9 "Celery-style worker plumbing" is out of scope) — the
/// caller is responsible for driving it with [`InMemoryDispatcher::run`],
/// typically via [`crate::infrastructure::dispatcher::spawn_stage_worker`].
/// A deployment with a real broker (`CELERY_BROKER_URL`) swaps in a
/// `TaskDispatch` adapter that lets the HTTP and worker binaries run as
/// separate processes sharing one durable queue; every port is
/// independently swappable (spec §5 "the registry itself is immutable
/// after startup").
pub fn build_default_registry(config: &Config) -> (Registry, Arc<InMemoryDispatcher>) {
    let resource_type_store = Arc::new(InMemoryResourceTypeStore::new());
    resource_type_store.seed(ResourceType {
        id: Uuid::nil(),
        name: "default".to_string(),
        tooltip: "Generic plain-text/markdown resource".to_string(),
    });

    let retry_policy = RetryPolicy {
        max_attempts: config.pipeline.retry_max,
        base: std::time::Duration::from_millis(config.pipeline.retry_base_ms),
        cap: std::time::Duration::from_millis(config.pipeline.retry_cap_ms),
    };

    let fanout_policy = FanoutPolicy {
        concurrency: config.pipeline.fanout_concurrency,
        timeout: std::time::Duration::from_secs(config.pipeline.fanout_timeout_sec),
        max_attempts: 3,
    };

    let dispatcher = InMemoryDispatcher::new(retry_policy);

    let mut query_types = std::collections::HashMap::new();
    let mut default_query_type = QueryType::default();
    for (key, entry) in &config.query_types {
        let query_type = QueryType {
            id: key.clone(),
            name: entry.name.clone(),
            prompt_template: entry.prompt_template.clone(),
        };
        if key == "default" {
            default_query_type = query_type;
        } else if let Ok(resource_type_id) = Uuid::parse_str(key) {
            query_types.insert(resource_type_id, query_type);
        } else {
            tracing::warn!(key, "query_types entry is neither \"default\" nor a valid uuid, ignoring");
        }
    }

    let registry = Registry {
        task_dispatch: dispatcher.clone(),
        subscription_store: Arc::new(InMemorySubscriptionStore::new()),
        resource_type_store,
        collection_store: Arc::new(InMemoryCollectionStore::new()),
        resource_store: Arc::new(InMemoryResourceStore::new()),
        graph_store: Arc::new(InMemoryGraphStore::new()),
        search_store: Arc::new(InMemorySearchStore::new()),
        file_manager: Arc::new(PlainTextFileManager::new()),
        antivirus_scanner: Arc::new(MarkerAntivirusScanner::new()),
        quarantine: Arc::new(InMemoryQuarantine::new()),
        language_model: Arc::new(DeterministicLanguageModel::new()),
        chunker: Arc::new(MarkdownParagraphChunker::new()),
        webhook_client: Arc::new(ReqwestWebhookClient::new(fanout_policy)),
        query_types: Arc::new(query_types),
        default_query_type,
        top_k_default: config.pipeline.top_k_default,
        stage_deadline: std::time::Duration::from_secs(config.pipeline.stage_deadline_sec),
    };

    (registry, dispatcher)
}
