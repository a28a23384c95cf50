//! The `Chunker` port (spec §4.1, §4.2 stage 4): splits a resource's
//! markdown into ordered, embeddable fragments. Strategy is selected by
//! `resource_type.id`.

use crate::domain::error::Result;
use crate::domain::types::{Resource, ResourceChunk, ResourceType};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait Chunker: Send + Sync {
    /// Returns chunks in document order, `sequence` starting at 0. Chunks
    /// carry no `id`/`embedding` yet — those are assigned by the caller and
    /// `UpdateChunksWithEmbeddings` respectively.
    async fn chunk(&self, resource_type: &ResourceType, resource: &Resource) -> Result<Vec<ResourceChunk>>;
}
pub type SharedChunker = Arc<dyn Chunker>;
