//! The graph store port (spec §4.1, §6 "Persisted graph layout"): the
//! processing substrate that models `Subscription -[OWNS]-> Collection
//! -[CONTAINS]-> Resource -[HAS_CHUNK]-> Chunk`, plus `SearchRequest`
//! `-[MATCHES {score}]->` `Chunk` and `-[ABOUT]->` `Collection`.
//!
//! `GraphStore` owns node/edge shape and similarity computation only. The
//! `SearchRequest`/`SearchResult` rows are a separate, simpler CRUD
//! concern owned by `SearchStore` — the same split the graph and search
//! repositories keep upstream.

use crate::domain::error::Result;
use crate::domain::types::{Collection, Resource, ResourceChunk, Subscription};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Candidate scope for a similarity search (spec §4.2 stage 9, §9 Open
/// Question (a)): absent-or-empty `resource_ids` means the whole collection.
#[derive(Debug, Clone, Default)]
pub struct SearchScope {
    pub collection_id: Uuid,
    pub resource_ids: Vec<Uuid>,
    pub filters: HashMap<String, String>,
}

#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Upsert the `Subscription -[OWNS]-> Collection -[CONTAINS]-> Resource`
    /// chain for a single resource (spec §4.2 stage 2).
    async fn upsert_resource_node(
        &self,
        subscription: &Subscription,
        collection: &Collection,
        resource: &Resource,
    ) -> Result<()>;

    /// Mark a resource node `is_deleted=true` without removing it (spec §9
    /// Open Question (b): cleanup is left to an external job).
    async fn soft_delete_resource(&self, resource_id: Uuid) -> Result<()>;

    async fn create_chunk_nodes(&self, chunks: &[ResourceChunk]) -> Result<()>;

    /// Idempotent: chunks already created for a resource are left untouched
    /// (spec §8 idempotence law "replaying `ChunkResourceText`").
    async fn chunks_for_resource(&self, resource_id: Uuid) -> Result<Vec<ResourceChunk>>;

    async fn chunks_missing_embeddings(&self, resource_id: Uuid) -> Result<Vec<ResourceChunk>>;

    async fn update_chunk_embedding(&self, chunk_id: Uuid, embedding: Vec<f32>) -> Result<()>;

    /// Persist the `SearchRequest -[ABOUT]-> Collection` edge so the search
    /// node is reachable from the graph it was run against (spec §6
    /// "Persisted graph layout"). Ownership of the `SearchRequest` row itself
    /// belongs to [`super::search_store::SearchStore`](crate::domain::ports::search_store::SearchStore).
    async fn link_search_to_collection(&self, search_id: Uuid, collection_id: Uuid) -> Result<()>;

    /// Compute similarity of the query embedding to every candidate chunk
    /// within `scope`, returning them ordered per spec §4.2 tie-breaks:
    /// descending score, then ascending chunk sequence, then ascending
    /// resource id. Capped at `top_k`.
    async fn top_k_similar_chunks(
        &self,
        query_embedding: &[f32],
        scope: &SearchScope,
        top_k: usize,
    ) -> Result<Vec<(ResourceChunk, f32)>>;

    /// Persist `SearchRequest -[MATCHES {score}]-> Chunk` edges for
    /// provenance. The [`SearchResult`](crate::domain::types::SearchResult)
    /// rows themselves are owned by `SearchStore`.
    async fn link_search_matches(&self, search_id: Uuid, chunk_ids: &[Uuid]) -> Result<()>;
}
pub type SharedGraphStore = Arc<dyn GraphStore>;
