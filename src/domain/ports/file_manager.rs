//! The `FileManager` port (spec §4.1): file-format inspection and markdown
//! extraction, independent of antivirus scanning.

use crate::domain::error::Result;
use crate::domain::types::Resource;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait FileManager: Send + Sync {
    fn supported_file_types(&self) -> Vec<String>;

    /// Sniffs the declared MIME type from file content. `None` if the
    /// content does not match any supported type.
    fn detect_file_type(&self, resource: &Resource) -> Option<String>;

    /// Checks that `resource.file_type` agrees with what the content
    /// actually is (spec §4.2 stage 1 "declared vs detected").
    fn validate_file_format(&self, resource: &Resource) -> bool;

    /// Extracts markdown content, returning the resource with
    /// `markdown_content` populated (spec §4.2 stage 3).
    async fn extract_markdown_content(&self, resource: Resource) -> Result<Resource>;
}
pub type SharedFileManager = Arc<dyn FileManager>;
