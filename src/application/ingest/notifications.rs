//! Fan-out handlers for the two ingest error branches (spec §4.2 stage 1):
//! quarantine and invalid-format notifications. Each is dispatched as its
//! own `IngestStage` so delivery shares the same at-least-once queue and
//! retry policy as every other stage.

use crate::application::registry::Registry;
use crate::domain::error::Result;
use crate::domain::ports::WebhookEvent;
use chrono::Utc;
use uuid::Uuid;

pub struct SendQuarantineNotification<'a> {
    registry: &'a Registry,
}

impl<'a> SendQuarantineNotification<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, resource_id: Uuid) -> Result<()> {
        let Some(resource) = self.registry.resource_store.get(resource_id).await? else {
            return Ok(());
        };
        if resource.callback_urls.is_empty() {
            return Ok(());
        }
        let event = WebhookEvent::ResourceReady {
            resource_id,
            status: "quarantined".to_string(),
            timestamp: Utc::now(),
            message: Some("resource failed virus scan".to_string()),
        };
        self.registry.webhook_client.notify(&resource.callback_urls, event).await;
        Ok(())
    }
}

pub struct SendValidationErrorNotification<'a> {
    registry: &'a Registry,
}

impl<'a> SendValidationErrorNotification<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, resource_id: Uuid) -> Result<()> {
        let Some(resource) = self.registry.resource_store.get(resource_id).await? else {
            return Ok(());
        };
        if resource.callback_urls.is_empty() {
            return Ok(());
        }
        let event = WebhookEvent::ResourceReady {
            resource_id,
            status: "invalid_format".to_string(),
            timestamp: Utc::now(),
            message: Some("resource failed format validation".to_string()),
        };
        self.registry.webhook_client.notify(&resource.callback_urls, event).await;
        Ok(())
    }
}
