//! The `SearchRequest`/`SearchResult` CRUD port (spec §4.1): the query
//! pipeline's counterpart to [`super::stores::ResourceStore`], mutated by
//! every query-pipeline stage in turn.

use crate::domain::error::Result;
use crate::domain::types::{SearchRequest, SearchResult};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

#[async_trait]
pub trait SearchStore: Send + Sync {
    async fn create(&self, search_request: SearchRequest) -> Result<SearchRequest>;

    async fn get(&self, id: Uuid) -> Result<Option<SearchRequest>>;

    /// Atomic read-modify-write, mirroring `ResourceStore::update_if_changed`:
    /// every stage of the query pipeline (spec §4.2) advances `status` and
    /// fills in exactly one of `embedding`, `prompt`/`response`, or
    /// `credential_url` this way.
    async fn update_if_changed(
        &self,
        id: Uuid,
        updater: Box<dyn FnOnce(SearchRequest) -> Result<SearchRequest> + Send>,
    ) -> Result<SearchRequest>;

    async fn save_results(&self, search_id: Uuid, results: &[SearchResult]) -> Result<()>;

    async fn results(&self, search_id: Uuid) -> Result<Vec<SearchResult>>;
}
pub type SharedSearchStore = Arc<dyn SearchStore>;
