//! Stage 10 (spec §4.2): renders `template + query + ordered context
//! extracts` and invokes the language model.

use crate::application::deadline::check_deadline;
use crate::application::registry::Registry;
use crate::domain::error::{Error, Result};
use crate::domain::ports::SearchStage;
use crate::domain::types::SearchStatus;
use tera::Context;
use uuid::Uuid;

pub struct ExecuteTheRagPrompt<'a> {
    registry: &'a Registry,
}

impl<'a> ExecuteTheRagPrompt<'a> {
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

        let mut results = self.registry.search_store.results(search_id).await?;
        // ordered context extracts: descending score, matching §4.2 stage 9's
        // own tie-break so the prompt reflects the same ranking shown to callers.
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        let context = results
            .iter()
            .map(|r| r.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n---\n\n");

        let query_type = self.query_type_for_search(&search).await?;
        let mut ctx = Context::new();
        ctx.insert("query", &search.query);
        ctx.insert("context", &context);
        let prompt = tera::Tera::one_off(&query_type.prompt_template, &ctx, false)?;

        let response = self.registry.language_model.generate_rag(&prompt).await?;

        self.registry
            .search_store
            .update_if_changed(search_id, {
                let prompt = prompt.clone();
                let response = response.clone();
                Box::new(move |mut s| {
                    s.prompt = Some(prompt);
                    s.response = Some(response);
                    s.status = SearchStatus::Generated;
                    Ok(s)
                })
            })
            .await?;

        self.registry
            .task_dispatch
            .enqueue_search_stage(SearchStage::IssueCredentials, search_id)
            .await
    }

    /// Resolves the prompt template by the collection's resource type (spec
    /// §3 `[ADDED] QueryType`, §9 Open Question (c): "selected by resource
    /// type" in the original). A search runs over a collection rather than
    /// a single resource, so this takes the collection's lowest-ordered
    /// allowed resource type as representative; a collection scoped to one
    /// resource type (the common case) always resolves unambiguously.
    async fn query_type_for_search(
        &self,
        search: &crate::domain::types::SearchRequest,
    ) -> Result<crate::domain::types::QueryType> {
        let collection = self
            .registry
            .collection_store
            .get(search.collection_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("collection {}", search.collection_id)))?;

        let resource_type_id = collection.resource_type_ids.iter().min().copied();
        Ok(match resource_type_id {
            Some(id) => self.registry.query_type_for(id),
            None => self.registry.default_query_type.clone(),
        })
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
