//! Default `FileManager` adapter: treats `text/plain` and `text/markdown`
//! as the supported types and passes content through as markdown
//! unmodified. A deployment with richer extraction (PDF, audio transcripts,
//! ...) swaps this adapter out; the pipeline is unaffected either way.

use crate::domain::error::{Error, Result};
use crate::domain::ports::FileManager;
use crate::domain::types::Resource;
use async_trait::async_trait;

const SUPPORTED: &[&str] = &["text/plain", "text/markdown"];

#[derive(Default)]
pub struct PlainTextFileManager;

impl PlainTextFileManager {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileManager for PlainTextFileManager {
    fn supported_file_types(&self) -> Vec<String> {
        SUPPORTED.iter().map(|s| s.to_string()).collect()
    }

    fn detect_file_type(&self, resource: &Resource) -> Option<String> {
        let bytes = resource.file.as_ref()?;
        std::str::from_utf8(bytes).ok()?;
        if bytes.starts_with(b"#") {
            Some("text/markdown".to_string())
        } else {
            Some("text/plain".to_string())
        }
    }

    fn validate_file_format(&self, resource: &Resource) -> bool {
        let Some(file_type) = &resource.file_type else {
            return false;
        };
        if !SUPPORTED.contains(&file_type.as_str()) {
            return false;
        }
        resource
            .file
            .as_ref()
            .map(|b| std::str::from_utf8(b).is_ok())
            .unwrap_or(false)
    }

    async fn extract_markdown_content(&self, mut resource: Resource) -> Result<Resource> {
        let bytes = resource
            .file
            .as_ref()
            .ok_or_else(|| Error::internal(format!("resource {} has no file to extract", resource.id)))?;
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::fatal(format!("resource {} is not valid UTF-8: {e}", resource.id)))?;
        resource.markdown_content = Some(text.to_string());
        Ok(resource)
    }
}
