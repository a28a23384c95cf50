//! Synchronous halves of the query pipeline: accepting a new search request
//! and polling for its result (spec §4.2, §6).

use crate::application::registry::Registry;
use crate::domain::error::{Error, Result};
use crate::domain::ports::SearchStage;
use crate::domain::types::{SearchRequest, SearchResult, SearchStatus};
use chrono::{Duration, Utc};
use std::collections::HashMap;
use uuid::Uuid;

const DEFAULT_SEARCH_DEADLINE_SECS: i64 = 120;

/// Accepts a new search over a collection (optionally scoped to specific
/// resources), persists the `pending` row, and enqueues
/// `InitiateSearchRequest`.
pub struct InitiateSearch<'a> {
    registry: &'a Registry,
}

impl<'a> InitiateSearch<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(
        &self,
        collection_id: Uuid,
        query: String,
        resource_ids: Vec<Uuid>,
        filters: HashMap<String, String>,
        callback_urls: Vec<String>,
    ) -> Result<SearchRequest> {
        let query = query.trim().to_string();
        if query.is_empty() {
            return Err(Error::validation("query cannot be empty"));
        }

        let collection = self
            .registry
            .collection_store
            .get(collection_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("collection {collection_id}")))?;

        if !resource_ids.is_empty() {
            let in_collection = self
                .registry
                .resource_store
                .list_for_collection(collection.id)
                .await?
                .into_iter()
                .map(|r| r.id)
                .collect::<std::collections::HashSet<_>>();
            if resource_ids.iter().any(|id| !in_collection.contains(id)) {
                return Err(Error::validation(format!(
                    "resource_ids contain a resource not in collection {collection_id}"
                )));
            }
        }

        let now = Utc::now();
        let search = SearchRequest {
            id: Uuid::new_v4(),
            collection_id,
            query,
            resource_ids,
            filters,
            callback_urls,
            created_at: now,
            status: SearchStatus::Pending,
            embedding: None,
            prompt: None,
            response: None,
            credential_url: None,
            error: None,
            deadline: now + Duration::seconds(DEFAULT_SEARCH_DEADLINE_SECS),
        };

        let created = self.registry.search_store.create(search).await?;

        self.registry
            .task_dispatch
            .enqueue_search_stage(SearchStage::InitiateSearchRequest, created.id)
            .await?;

        Ok(created)
    }
}

pub struct GetQueryResult<'a> {
    registry: &'a Registry,
}

impl<'a> GetQueryResult<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Returns the search request plus its results. Callers should render
    /// "pending" when `status` is not yet terminal.
    pub async fn execute(&self, search_id: Uuid) -> Result<(SearchRequest, Vec<SearchResult>)> {
        let search = self
            .registry
            .search_store
            .get(search_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("search request {search_id}")))?;
        let results = self.registry.search_store.results(search_id).await?;
        Ok((search, results))
    }
}

pub struct GetQueryResultMetadata<'a> {
    registry: &'a Registry,
}

impl<'a> GetQueryResultMetadata<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Returns the search request without its results, for cheap polling.
    pub async fn execute(&self, search_id: Uuid) -> Result<SearchRequest> {
        self.registry
            .search_store
            .get(search_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("search request {search_id}")))
    }
}
