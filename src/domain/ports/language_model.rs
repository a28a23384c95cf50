//! The `LanguageModel` port (spec §4.1): embedding, RAG generation, and
//! credential issuance for completed search results.

use crate::domain::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Renders `prompt` (already filled in by the caller via the resource
    /// type's `QueryType` template) against an LLM and returns the answer.
    async fn generate_rag(&self, prompt: &str) -> Result<String>;

    /// Issues a short-lived, fetchable URL for a completed search's full
    /// response (spec §4.2 stage 11).
    async fn issue_credential(&self, search_id: Uuid) -> Result<String>;
}
pub type SharedLanguageModel = Arc<dyn LanguageModel>;
