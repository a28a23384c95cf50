//! Stage 7 (spec §4.2): verifies the search request exists and starts the
//! pipeline. Creation of the row itself happens synchronously in the HTTP
//! handler (spec §4.2 "Synchronous operations"); this stage is the async
//! hand-off into the worker-driven part of the pipeline.

use crate::application::registry::Registry;
use crate::domain::error::{Error, Result};
use crate::domain::ports::SearchStage;
use uuid::Uuid;

pub struct InitiateSearchRequest<'a> {
    registry: &'a Registry,
}

impl<'a> InitiateSearchRequest<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, search_id: Uuid) -> Result<()> {
        self.registry
            .search_store
            .get(search_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("search request {search_id}")))?;

        self.registry
            .task_dispatch
            .enqueue_search_stage(SearchStage::VectoriseTheSearchQuery, search_id)
            .await
    }
}
