//! Stage 5 (spec §4.2): embeds every chunk still missing a vector. On any
//! embed failure the resource is marked `failed` and nothing further is
//! enqueued — a repair tool may re-enqueue this stage later.

use crate::application::registry::Registry;
use crate::domain::error::Result;
use crate::domain::ports::IngestStage;
use crate::domain::types::ResourceStatus;
use uuid::Uuid;

pub struct UpdateChunksWithEmbeddings<'a> {
    registry: &'a Registry,
}

impl<'a> UpdateChunksWithEmbeddings<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, resource_id: Uuid) -> Result<()> {
        let missing = self
            .registry
            .graph_store
            .chunks_missing_embeddings(resource_id)
            .await?;

        if missing.is_empty() {
            return self
                .registry
                .task_dispatch
                .enqueue(IngestStage::VentilateResourceProcessing, resource_id)
                .await;
        }

        for chunk in &missing {
            let embedding = match self.registry.language_model.embed(&chunk.extract).await {
                Ok(v) => v,
                Err(e) => {
                    let message = format!(
                        "failed to embed chunk {} of resource {resource_id}: {e}",
                        chunk.id
                    );
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
                    return Err(e);
                }
            };
            self.registry
                .graph_store
                .update_chunk_embedding(chunk.id, embedding)
                .await?;
        }

        self.registry
            .resource_store
            .update_if_changed(
                resource_id,
                Box::new(|mut r| {
                    r.status = ResourceStatus::Embedded;
                    Ok(r)
                }),
            )
            .await?;

        self.registry
            .task_dispatch
            .enqueue(IngestStage::VentilateResourceProcessing, resource_id)
            .await
    }
}
