//! Stage 6 (spec §4.2): fan-out a `resource.ready` callback to every unique
//! webhook URL, then mark the resource `ready`. A missing resource or empty
//! URL list is a no-op success.

use crate::application::registry::Registry;
use crate::domain::error::Result;
use crate::domain::ports::WebhookEvent;
use crate::domain::types::ResourceStatus;
use chrono::Utc;
use uuid::Uuid;

pub struct VentilateResourceProcessing<'a> {
    registry: &'a Registry,
}

impl<'a> VentilateResourceProcessing<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, resource_id: Uuid) -> Result<()> {
        let Some(resource) = self.registry.resource_store.get(resource_id).await? else {
            return Ok(());
        };

        if !resource.callback_urls.is_empty() {
            let event = WebhookEvent::ResourceReady {
                resource_id,
                status: "ready".to_string(),
                timestamp: Utc::now(),
                message: None,
            };
            let delivered = self
                .registry
                .webhook_client
                .notify(&resource.callback_urls, event)
                .await;
            if !delivered {
                return Err(crate::domain::error::Error::transient(format!(
                    "all webhook deliveries failed for resource {resource_id}"
                )));
            }
        }

        self.registry
            .resource_store
            .update_if_changed(
                resource_id,
                Box::new(|mut r| {
                    r.status = ResourceStatus::Ready;
                    Ok(r)
                }),
            )
            .await?;

        Ok(())
    }
}
