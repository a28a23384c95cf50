//! In-memory `SearchStore` (spec §4.1): `SearchRequest`/`SearchResult`
//! CRUD, mirroring [`super::stores::InMemoryResourceStore`]'s per-id
//! locking for atomic read-modify-write.

use crate::domain::error::{Error, Result};
use crate::domain::ports::SearchStore;
use crate::domain::types::{SearchRequest, SearchResult};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemorySearchStore {
    requests: DashMap<Uuid, SearchRequest>,
    results: DashMap<Uuid, Vec<SearchResult>>,
    locks: DashMap<Uuid, std::sync::Arc<Mutex<()>>>,
}

impl InMemorySearchStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, id: Uuid) -> std::sync::Arc<Mutex<()>> {
        self.locks.entry(id).or_insert_with(|| std::sync::Arc::new(Mutex::new(()))).clone()
    }
}

#[async_trait]
impl SearchStore for InMemorySearchStore {
    async fn create(&self, search_request: SearchRequest) -> Result<SearchRequest> {
        self.requests.insert(search_request.id, search_request.clone());
        Ok(search_request)
    }

    async fn get(&self, id: Uuid) -> Result<Option<SearchRequest>> {
        Ok(self.requests.get(&id).map(|r| r.clone()))
    }

    async fn update_if_changed(
        &self,
        id: Uuid,
        updater: Box<dyn FnOnce(SearchRequest) -> Result<SearchRequest> + Send>,
    ) -> Result<SearchRequest> {
        let lock = self.lock_for(id);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        let current = self
            .requests
            .get(&id)
            .map(|r| r.clone())
            .ok_or_else(|| Error::not_found(format!("search request {id}")))?;
        let updated = updater(current)?;
        self.requests.insert(id, updated.clone());
        Ok(updated)
    }

    async fn save_results(&self, search_id: Uuid, results: &[SearchResult]) -> Result<()> {
        self.results.insert(search_id, results.to_vec());
        Ok(())
    }

    async fn results(&self, search_id: Uuid) -> Result<Vec<SearchResult>> {
        Ok(self.results.get(&search_id).map(|r| r.clone()).unwrap_or_default())
    }
}
