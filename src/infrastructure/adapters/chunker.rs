//! Default `Chunker` adapter: splits markdown into paragraph-sized chunks,
//! tracking the heading path each paragraph falls under (spec §3
//! `ResourceChunk::path`). One strategy regardless of `resource_type.id` —
//! a deployment with per-type strategies (e.g. audio transcripts chunked
//! by timestamp) swaps in its own `Chunker` adapter.

use crate::domain::error::Result;
use crate::domain::ports::Chunker;
use crate::domain::types::{Resource, ResourceChunk, ResourceType, SectionHeader};
use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Default)]
pub struct MarkdownParagraphChunker;

impl MarkdownParagraphChunker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Chunker for MarkdownParagraphChunker {
    async fn chunk(&self, _resource_type: &ResourceType, resource: &Resource) -> Result<Vec<ResourceChunk>> {
        let markdown = resource.markdown_content.as_deref().unwrap_or_default();

        let mut chunks = Vec::new();
        let mut path: Vec<SectionHeader> = Vec::new();
        let mut sequence = 0u32;

        for paragraph in markdown.split("\n\n") {
            let paragraph = paragraph.trim();
            if paragraph.is_empty() {
                continue;
            }
            if let Some(heading) = paragraph.strip_prefix('#') {
                path = vec![SectionHeader {
                    id: Uuid::new_v4(),
                    heading: heading.trim_start_matches('#').trim().to_string(),
                }];
                continue;
            }

            chunks.push(ResourceChunk {
                id: Uuid::new_v4(),
                resource_id: resource.id,
                sequence,
                text: paragraph.to_string(),
                extract: paragraph.to_string(),
                preamble: None,
                postamble: None,
                path: path.clone(),
                metadata: HashMap::new(),
                embedding: None,
                score: None,
            });
            sequence += 1;
        }

        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Resource, ResourceStatus, ResourceType};

    fn resource_with(markdown: &str) -> Resource {
        Resource {
            id: Uuid::new_v4(),
            collection_id: Uuid::new_v4(),
            resource_type_id: Uuid::new_v4(),
            name: "doc".to_string(),
            file_name: "doc.md".to_string(),
            file_type: Some("text/markdown".to_string()),
            file: None,
            markdown_content: Some(markdown.to_string()),
            callback_urls: vec![],
            status: ResourceStatus::Extracted,
            error: None,
        }
    }

    #[tokio::test]
    async fn headings_are_tracked_as_path_not_emitted_as_chunks() {
        let chunker = MarkdownParagraphChunker::new();
        let resource = resource_with("# Title\n\nfirst\n\n## Sub\n\nsecond");
        let resource_type = ResourceType {
            id: resource.resource_type_id,
            name: "doc".to_string(),
            tooltip: String::new(),
        };

        let chunks = chunker.chunk(&resource_type, &resource).await.unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].sequence, 0);
        assert_eq!(chunks[0].text, "first");
        assert_eq!(chunks[0].path.last().unwrap().heading, "Title");
        assert_eq!(chunks[1].sequence, 1);
        assert_eq!(chunks[1].path.last().unwrap().heading, "Sub");
    }

    #[tokio::test]
    async fn blank_paragraphs_are_skipped_without_breaking_sequence() {
        let chunker = MarkdownParagraphChunker::new();
        let resource = resource_with("alpha\n\n\n\nbeta");
        let resource_type = ResourceType {
            id: resource.resource_type_id,
            name: "doc".to_string(),
            tooltip: String::new(),
        };

        let chunks = chunker.chunk(&resource_type, &resource).await.unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].sequence, 0);
        assert_eq!(chunks[1].sequence, 1);
    }
}
