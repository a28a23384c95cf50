//! Stage 9 (spec §4.2): retrieves candidate chunks honoring `filters` and
//! `resource_ids`, computes similarities, and stores the top-k as
//! `SearchResult`s (spec §9 Open Question (a): absent-or-empty
//! `resource_ids` means the whole collection).

use crate::application::deadline::check_deadline;
use crate::application::registry::Registry;
use crate::domain::error::{Error, Result};
use crate::domain::ports::{SearchScope, SearchStage};
use crate::domain::types::{SearchResult, SearchStatus};
use chrono::Utc;
use uuid::Uuid;

const DEFAULT_TOP_K: usize = 16;

pub struct IdentifyRelatedContent<'a> {
    registry: &'a Registry,
    top_k: usize,
}

impl<'a> IdentifyRelatedContent<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(registry: &'a Registry, top_k: usize) -> Self {
        Self { registry, top_k }
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

        let embedding = search
            .embedding
            .clone()
            .ok_or_else(|| Error::internal(format!("search {search_id} has no embedding yet")))?;

        let scope = SearchScope {
            collection_id: search.collection_id,
            resource_ids: search.resource_ids.clone(),
            filters: search.filters.clone(),
        };

        let scored = self
            .registry
            .graph_store
            .top_k_similar_chunks(&embedding, &scope, self.top_k)
            .await?;

        if scored.is_empty() {
            // No candidate chunks: terminal success with an empty result set
            // (spec §8 boundary behavior), not an error.
            self.registry
                .search_store
                .update_if_changed(
                    search_id,
                    Box::new(|mut s| {
                        s.status = SearchStatus::Ready;
                        Ok(s)
                    }),
                )
                .await?;
            return Ok(());
        }

        let now = Utc::now();
        let results: Vec<SearchResult> = scored
            .into_iter()
            .map(|(chunk, score)| SearchResult {
                id: Uuid::new_v4(),
                search_id,
                chunk_id: chunk.id,
                content: chunk.extract,
                score,
                created_at: now,
            })
            .collect();

        self.registry
            .graph_store
            .link_search_matches(search_id, &results.iter().map(|r| r.chunk_id).collect::<Vec<_>>())
            .await?;
        self.registry.search_store.save_results(search_id, &results).await?;

        self.registry
            .search_store
            .update_if_changed(
                search_id,
                Box::new(|mut s| {
                    s.status = SearchStatus::Matched;
                    Ok(s)
                }),
            )
            .await?;

        self.registry
            .task_dispatch
            .enqueue_search_stage(SearchStage::ExecuteTheRagPrompt, search_id)
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
