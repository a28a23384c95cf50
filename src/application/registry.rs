//! The repository registry (spec §4.5, C3): a typed, compile-time-checked
//! capability set, constructed once at startup and shared immutably
//! (spec §5 "the registry itself is immutable after startup").
//!
//! The original design keyed ports in a `dict`-like `RepoSet`, resolved by
//! string at call time — a lookup of an unknown key was a runtime error.
//! Here every port is a named field, so an unknown key is instead a compile
//! error: the registry cannot be constructed without every capability, and
//! a use case cannot reference a capability the registry doesn't have.

use crate::domain::ports::{
    SharedAntivirusScanner, SharedChunker, SharedCollectionStore, SharedFileManager,
    SharedGraphStore, SharedLanguageModel, SharedQuarantine, SharedResourceStore,
    SharedResourceTypeStore, SharedSearchStore, SharedSubscriptionStore, SharedTaskDispatch,
    SharedWebhookClient,
};
use crate::domain::types::QueryType;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// The full set of capability ports a use case may depend on.
///
/// Construction happens once, in `infrastructure::bootstrap`; use cases take
/// `&Registry` (or an `Arc<Registry>`) rather than individual ports so that
/// adding a use case never requires touching every call site.
#[derive(Clone)]
pub struct Registry {
    pub task_dispatch: SharedTaskDispatch,
    pub subscription_store: SharedSubscriptionStore,
    pub resource_type_store: SharedResourceTypeStore,
    pub collection_store: SharedCollectionStore,
    pub resource_store: SharedResourceStore,
    pub graph_store: SharedGraphStore,
    pub search_store: SharedSearchStore,
    pub file_manager: SharedFileManager,
    pub antivirus_scanner: SharedAntivirusScanner,
    pub quarantine: SharedQuarantine,
    pub language_model: SharedLanguageModel,
    pub chunker: SharedChunker,
    pub webhook_client: SharedWebhookClient,
    /// RAG prompt templates by resource-type id (spec §3 `[ADDED]
    /// QueryType`, §9 Open Question (c)), fixed at construction like every
    /// other capability here.
    pub query_types: Arc<HashMap<Uuid, QueryType>>,
    pub default_query_type: QueryType,
    /// Default cap on `top-k` similarity results (spec §6 `TOP_K_DEFAULT`),
    /// used whenever a search doesn't specify its own `max_results`.
    pub top_k_default: usize,
    /// Per-stage invocation deadline (spec §5 "A stage invocation has a
    /// context with a deadline (default 10 min)").
    pub stage_deadline: Duration,
}

impl Registry {
    /// Resolves the prompt template for a resource type, falling back to
    /// [`Registry::default_query_type`] when none is configured for it.
    pub fn query_type_for(&self, resource_type_id: Uuid) -> QueryType {
        self.query_types
            .get(&resource_type_id)
            .cloned()
            .unwrap_or_else(|| self.default_query_type.clone())
    }
}
