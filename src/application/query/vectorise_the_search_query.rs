//! Stage 8 (spec §4.2): embeds the query text and persists the vector on
//! the search request.

use crate::application::deadline::check_deadline;
use crate::application::registry::Registry;
use crate::domain::error::{Error, Result};
use crate::domain::ports::SearchStage;
use crate::domain::types::SearchStatus;
use uuid::Uuid;

pub struct VectoriseTheSearchQuery<'a> {
    registry: &'a Registry,
}

impl<'a> VectoriseTheSearchQuery<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, search_id: Uuid) -> Result<()> {
        let search = self
            .registry
            .search_store
            .get(search_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("search request {search_id}")))?;

        if let Err(e) = check_deadline(&search) {
            self.fail(search_id, &e.to_string()).await?;
            return Err(e);
        }

        if search.embedding.is_some() {
            return self
                .registry
                .task_dispatch
                .enqueue_search_stage(SearchStage::IdentifyRelatedContent, search_id)
                .await;
        }

        let embedding = self.registry.language_model.embed(&search.query).await?;

        self.registry
            .search_store
            .update_if_changed(search_id, {
                let embedding = embedding.clone();
                Box::new(move |mut s| {
                    s.embedding = Some(embedding);
                    s.status = SearchStatus::Vectorised;
                    Ok(s)
                })
            })
            .await?;

        self.registry
            .task_dispatch
            .enqueue_search_stage(SearchStage::IdentifyRelatedContent, search_id)
            .await
    }

    async fn fail(&self, search_id: Uuid, message: &str) -> Result<()> {
        let message = message.to_string();
        self.registry
            .search_store
            .update_if_changed(search_id, {
                let message = message.clone();
                Box::new(move |mut s| {
                    s.status = SearchStatus::Failed;
                    s.error = Some(message);
                    Ok(s)
                })
            })
            .await?;
        Ok(())
    }
}
