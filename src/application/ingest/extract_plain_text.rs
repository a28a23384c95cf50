//! Stage 3 (spec §4.2): markdown extraction. Idempotent — a resource that
//! already has `markdown_content` skips straight to the next enqueue.

use crate::application::registry::Registry;
use crate::domain::error::{Error, Result};
use crate::domain::ports::IngestStage;
use crate::domain::types::ResourceStatus;
use uuid::Uuid;

pub struct ExtractPlainText<'a> {
    registry: &'a Registry,
}

impl<'a> ExtractPlainText<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, resource_id: Uuid) -> Result<()> {
        let resource = self
            .registry
            .resource_store
            .get(resource_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("resource {resource_id}")))?;

        if resource.markdown_content.is_some() {
            return self
                .registry
                .task_dispatch
                .enqueue(IngestStage::ChunkResourceText, resource_id)
                .await;
        }

        if resource.file_type.is_none() {
            return Err(Error::internal(format!(
                "resource {resource_id} has no file_type at extraction time"
            )));
        }

        let extracted = match self.registry.file_manager.extract_markdown_content(resource).await {
            Ok(r) => r,
            Err(e) => {
                let message = format!("failed to extract text from resource {resource_id}: {e}");
                self.registry
                    .resource_store
                    .update_if_changed(resource_id, {
                        let message = message.clone();
                        Box::new(move |mut r| {
                            r.status = ResourceStatus::Failed;
                            r.error = Some(message);
                            Ok(r)
                        })
                    })
                    .await?;
                return Err(Error::fatal(message));
            }
        };

        self.registry
            .resource_store
            .update_if_changed(resource_id, {
                let extracted = extracted.clone();
                Box::new(move |mut r| {
                    r.markdown_content = extracted.markdown_content;
                    r.status = ResourceStatus::Extracted;
                    Ok(r)
                })
            })
            .await?;

        self.registry
            .task_dispatch
            .enqueue(IngestStage::ChunkResourceText, resource_id)
            .await
    }
}
