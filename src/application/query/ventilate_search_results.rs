//! Stage 12 (spec §4.2): fan-out to deduped callback URLs with a
//! `search.ready` status payload, then mark the search `ready`.

use crate::application::registry::Registry;
use crate::domain::error::Result;
use crate::domain::ports::WebhookEvent;
use crate::domain::types::SearchStatus;
use chrono::Utc;
use uuid::Uuid;

pub struct VentilateSearchResults<'a> {
    registry: &'a Registry,
}

impl<'a> VentilateSearchResults<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, search_id: Uuid) -> Result<()> {
        let Some(search) = self.registry.search_store.get(search_id).await? else {
            return Ok(());
        };

        if !search.callback_urls.is_empty() {
            let event = WebhookEvent::SearchReady {
                search_id,
                status: "ready".to_string(),
                timestamp: Utc::now(),
                message: None,
            };
            let delivered = self
                .registry
                .webhook_client
                .notify(&search.callback_urls, event)
                .await;
            if !delivered {
                return Err(crate::domain::error::Error::transient(format!(
                    "all webhook deliveries failed for search {search_id}"
                )));
            }
        }

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

        Ok(())
    }
}
