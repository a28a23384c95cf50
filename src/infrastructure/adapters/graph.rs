//! In-memory `GraphStore` (spec §4.1, §6 "Persisted graph layout"): models
//! the node/edge shape as plain maps rather than an actual graph database.
//! Similarity is cosine on L2-normalised vectors, ordered per spec §4.2's
//! tie-break rule.

use crate::domain::error::Result;
use crate::domain::ports::{GraphStore, SearchScope};
use crate::domain::types::{Collection, Resource, ResourceChunk, Subscription};
use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryGraphStore {
    resource_nodes: DashSet<Uuid>,
    deleted_resources: DashSet<Uuid>,
    chunks_by_resource: DashMap<Uuid, Vec<ResourceChunk>>,
    search_collection_links: DashMap<Uuid, Uuid>,
    search_match_links: DashMap<Uuid, Vec<Uuid>>,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[async_trait]
impl GraphStore for InMemoryGraphStore {
    async fn upsert_resource_node(
        &self,
        _subscription: &Subscription,
        _collection: &Collection,
        resource: &Resource,
    ) -> Result<()> {
        self.resource_nodes.insert(resource.id);
        Ok(())
    }

    async fn soft_delete_resource(&self, resource_id: Uuid) -> Result<()> {
        self.deleted_resources.insert(resource_id);
        Ok(())
    }

    async fn create_chunk_nodes(&self, chunks: &[ResourceChunk]) -> Result<()> {
        if chunks.is_empty() {
            return Ok(());
        }
        let resource_id = chunks[0].resource_id;
        // Idempotent: chunks already created for this resource are left untouched.
        self.chunks_by_resource.entry(resource_id).or_insert_with(|| chunks.to_vec());
        Ok(())
    }

    async fn chunks_for_resource(&self, resource_id: Uuid) -> Result<Vec<ResourceChunk>> {
        Ok(self.chunks_by_resource.get(&resource_id).map(|c| c.clone()).unwrap_or_default())
    }

    async fn chunks_missing_embeddings(&self, resource_id: Uuid) -> Result<Vec<ResourceChunk>> {
        Ok(self
            .chunks_by_resource
            .get(&resource_id)
            .map(|c| c.iter().filter(|c| c.embedding.is_none()).cloned().collect())
            .unwrap_or_default())
    }

    async fn update_chunk_embedding(&self, chunk_id: Uuid, embedding: Vec<f32>) -> Result<()> {
        for mut entry in self.chunks_by_resource.iter_mut() {
            if let Some(chunk) = entry.value_mut().iter_mut().find(|c| c.id == chunk_id) {
                chunk.embedding = Some(embedding);
                return Ok(());
            }
        }
        Ok(())
    }

    async fn link_search_to_collection(&self, search_id: Uuid, collection_id: Uuid) -> Result<()> {
        self.search_collection_links.insert(search_id, collection_id);
        Ok(())
    }

    async fn top_k_similar_chunks(
        &self,
        query_embedding: &[f32],
        scope: &SearchScope,
        top_k: usize,
    ) -> Result<Vec<(ResourceChunk, f32)>> {
        let resource_filter: Option<HashSet<Uuid>> = if scope.resource_ids.is_empty() {
            None
        } else {
            Some(scope.resource_ids.iter().copied().collect())
        };

        let mut candidates: Vec<(ResourceChunk, f32)> = self
            .chunks_by_resource
            .iter()
            .filter(|entry| resource_filter.as_ref().map(|f| f.contains(entry.key())).unwrap_or(true))
            .flat_map(|entry| entry.value().clone())
            .filter(|chunk| {
                scope
                    .filters
                    .iter()
                    .all(|(k, v)| chunk.metadata.get(k).map(|cv| cv == v).unwrap_or(false))
            })
            .filter_map(|chunk| {
                let score = cosine_similarity(query_embedding, chunk.embedding.as_deref()?);
                Some((chunk, score))
            })
            .collect();

        candidates.sort_by(|(a, sa), (b, sb)| {
            sb.partial_cmp(sa)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.sequence.cmp(&b.sequence))
                .then_with(|| a.resource_id.cmp(&b.resource_id))
        });
        candidates.truncate(top_k);
        Ok(candidates)
    }

    async fn link_search_matches(&self, search_id: Uuid, chunk_ids: &[Uuid]) -> Result<()> {
        self.search_match_links.insert(search_id, chunk_ids.to_vec());
        Ok(())
    }
}
