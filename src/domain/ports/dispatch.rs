//! The task-hand-off layer (spec §4.1, §4.3): the only way a use case may
//! trigger the next pipeline stage.

use crate::domain::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One step of the ingest pipeline, realised as a use case (spec §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestStage {
    InitiateProcessing,
    InitialiseResourceGraph,
    ExtractPlainText,
    ChunkResourceText,
    UpdateChunksWithEmbeddings,
    VentilateResourceProcessing,
    /// Fan-out notification emitted when the antivirus scan quarantines a
    /// resource (spec §4.2 stage 1).
    QuarantineNotification,
    /// Fan-out notification emitted when format validation fails.
    ValidationErrorNotification,
}

/// One step of the query pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStage {
    InitiateSearchRequest,
    VectoriseTheSearchQuery,
    IdentifyRelatedContent,
    ExecuteTheRagPrompt,
    IssueCredentials,
    VentilateSearchResults,
}

/// A dispatched unit of work, as it sits on the durable queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DispatchMessage {
    Ingest { stage: IngestStage, resource_id: Uuid },
    Search { stage: SearchStage, search_id: Uuid },
}

/// Enqueues the next pipeline stage as an atomic, replayable unit of work.
///
/// Delivery is at-least-once; ordering per `(stage, id)` is not guaranteed
/// (spec §4.1, §5). Every use case consuming a dispatched message must be
/// idempotent under redelivery.
#[async_trait]
pub trait TaskDispatch: Send + Sync {
    async fn enqueue(&self, stage: IngestStage, resource_id: Uuid) -> Result<()>;
    async fn enqueue_search_stage(&self, stage: SearchStage, search_id: Uuid) -> Result<()>;
}

pub type SharedTaskDispatch = std::sync::Arc<dyn TaskDispatch>;
