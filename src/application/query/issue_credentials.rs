//! Stage 11 (spec §4.2): issues a fetchable credential URL for the
//! completed response. Requires the RAG result to already be persisted —
//! the full provenance of the process is what the credential describes.

use crate::application::registry::Registry;
use crate::domain::error::{Error, Result};
use crate::domain::ports::SearchStage;
use crate::domain::types::SearchStatus;
use uuid::Uuid;

pub struct IssueCredentials<'a> {
    registry: &'a Registry,
}

impl<'a> IssueCredentials<'a> {
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

        if search.response.is_none() {
            return Err(Error::internal(format!(
                "search {search_id} has no response to issue a credential for"
            )));
        }

        let credential_url = self.registry.language_model.issue_credential(search_id).await?;

        self.registry
            .search_store
            .update_if_changed(search_id, {
                let credential_url = credential_url.clone();
                Box::new(move |mut s| {
                    s.credential_url = Some(credential_url);
                    s.status = SearchStatus::Credentialled;
                    Ok(s)
                })
            })
            .await?;

        self.registry
            .task_dispatch
            .enqueue_search_stage(SearchStage::VentilateSearchResults, search_id)
            .await
    }
}
