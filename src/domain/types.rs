//! Entities and value objects of the Knowledge Service domain (spec §3).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Status of a resource as it moves through the ingest pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    Pending,
    Scanning,
    Quarantined,
    InvalidFormat,
    Graphed,
    Extracted,
    Chunked,
    Embedded,
    Ready,
    Failed,
}

impl ResourceStatus {
    /// Terminal states end the ingest pipeline: no further stage is enqueued.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ResourceStatus::Quarantined
                | ResourceStatus::InvalidFormat
                | ResourceStatus::Failed
                | ResourceStatus::Ready
        )
    }
}

/// Status of a search request as it moves through the query pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Pending,
    Vectorised,
    Matched,
    Generated,
    Credentialled,
    Ready,
    Failed,
}

impl SearchStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchStatus::Ready | SearchStatus::Failed)
    }
}

/// A named capability that selects a chunking strategy and prompt template.
/// Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceType {
    pub id: Uuid,
    pub name: String,
    pub tooltip: String,
}

/// Top-level tenant scope that owns collections and the set of allowed
/// resource types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub resource_type_ids: HashSet<Uuid>,
    pub collection_ids: HashSet<Uuid>,
    /// At most one of `organisation_id`/`user_id` is set; ownership outside
    /// the scope of this crate (Non-goal: authentication).
    pub organisation_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}

/// A bag of resources scoped to a subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: Uuid,
    pub subscription_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub resource_type_ids: HashSet<Uuid>,
}

/// An ingested artifact moving through the ingest pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: Uuid,
    pub collection_id: Uuid,
    pub resource_type_id: Uuid,
    pub name: String,
    pub file_name: String,
    pub file_type: Option<String>,
    pub file: Option<Vec<u8>>,
    pub markdown_content: Option<String>,
    pub callback_urls: Vec<String>,
    pub status: ResourceStatus,
    pub error: Option<String>,
}

impl Resource {
    /// §3 invariant: once `status` has reached `extracted` or later, both
    /// `file_type` and `markdown_content` must be populated.
    pub fn check_invariants(&self) -> crate::domain::error::Result<()> {
        use crate::domain::error::Error;
        let reached_extraction = !matches!(
            self.status,
            ResourceStatus::Pending
                | ResourceStatus::Scanning
                | ResourceStatus::Quarantined
                | ResourceStatus::InvalidFormat
        );
        if reached_extraction && (self.file_type.is_none() || self.markdown_content.is_none()) {
            return Err(Error::internal(format!(
                "resource {} reached status {:?} without file_type/markdown_content",
                self.id, self.status
            )));
        }
        if self.status == ResourceStatus::Quarantined && self.file.is_some() {
            return Err(Error::internal(format!(
                "resource {} is quarantined but still holds file bytes",
                self.id
            )));
        }
        Ok(())
    }
}

/// A heading encountered while chunking a resource's markdown content,
/// forming the ordered `path` of a [`ResourceChunk`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionHeader {
    pub id: Uuid,
    pub heading: String,
}

/// A searchable fragment of a resource: the unit of embedding and retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceChunk {
    pub id: Uuid,
    pub resource_id: Uuid,
    /// Monotone per-resource sequence, assigned in document order.
    pub sequence: u32,
    pub text: String,
    /// Canonical text used for embedding; may equal `text`.
    pub extract: String,
    pub preamble: Option<String>,
    pub postamble: Option<String>,
    pub path: Vec<SectionHeader>,
    pub metadata: HashMap<String, String>,
    pub embedding: Option<Vec<f32>>,
    /// Transient: only set while rendering a [`SearchResult`].
    pub score: Option<f32>,
}

/// An asynchronous query job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub id: Uuid,
    pub collection_id: Uuid,
    pub query: String,
    /// Empty/absent means whole collection (spec §9 Open Question (a)).
    pub resource_ids: Vec<Uuid>,
    pub filters: HashMap<String, String>,
    pub callback_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub status: SearchStatus,
    pub embedding: Option<Vec<f32>>,
    pub prompt: Option<String>,
    pub response: Option<String>,
    pub credential_url: Option<String>,
    pub error: Option<String>,
    /// End-to-end deadline, propagated across stages (§5).
    pub deadline: DateTime<Utc>,
}

/// One piece of evidence backing a search's answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: Uuid,
    pub search_id: Uuid,
    pub chunk_id: Uuid,
    /// The extract used, copied at match time for provenance stability.
    pub content: String,
    pub score: f32,
    pub created_at: DateTime<Utc>,
}

/// Per-resource-type prompt rendering configuration (spec §9 Open Question
/// (c)): the template has `{{ query }}` and `{{ context }}` placeholders,
/// rendered via `tera`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryType {
    pub id: String,
    pub name: String,
    pub prompt_template: String,
}

impl Default for QueryType {
    fn default() -> Self {
        Self {
            id: "default".to_string(),
            name: "Default RAG prompt".to_string(),
            prompt_template: "Answer the question using only the context below.\n\n\
                Context:\n{{ context }}\n\nQuestion: {{ query }}\n\nAnswer:"
                .to_string(),
        }
    }
}
