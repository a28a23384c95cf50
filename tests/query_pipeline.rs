//! Exercises the query pipeline's seed scenario (spec §8: ranking
//! tie-break) at the `GraphStore` boundary, plus an end-to-end run of the
//! full pipeline against ingested chunks.

mod common;

use common::{create_collection, create_subscription, default_resource_type_id, new_registry};
use knowledge_service::application::crud::queries::{GetQueryResult, InitiateSearch};
use knowledge_service::application::crud::resources::UploadResource;
use knowledge_service::application::ingest::{
    ChunkResourceText, ExtractPlainText, InitialiseResourceGraph, InitiateProcessing,
    UpdateChunksWithEmbeddings,
};
use knowledge_service::application::query::{
    ExecuteTheRagPrompt, IdentifyRelatedContent, InitiateSearchRequest, IssueCredentials,
    VectoriseTheSearchQuery,
};
use knowledge_service::domain::ports::{GraphStore, SearchScope};
use knowledge_service::domain::types::{Resource, ResourceChunk, ResourceStatus, SearchStatus};
use knowledge_service::infrastructure::adapters::InMemoryGraphStore;
use std::collections::HashMap;
use uuid::Uuid;

fn chunk(resource_id: Uuid, sequence: u32, embedding: Vec<f32>) -> ResourceChunk {
    ResourceChunk {
        id: Uuid::new_v4(),
        resource_id,
        sequence,
        text: format!("chunk {sequence}"),
        extract: format!("chunk {sequence}"),
        preamble: None,
        postamble: None,
        path: vec![],
        metadata: HashMap::new(),
        embedding: Some(embedding),
        score: None,
    }
}

#[tokio::test]
async fn similarity_ranking_breaks_ties_by_sequence_then_resource() {
    let store = InMemoryGraphStore::new();
    let resource_a = Uuid::new_v4();
    let resource_b = Uuid::new_v4();
    let resource_c = Uuid::new_v4();

    // cos([1,0], [0.91, x]) == 0.91, and the two 0.8 chunks tie exactly.
    let high = chunk(resource_a, 2, vec![0.91, (1.0f32 - 0.91 * 0.91).sqrt()]);
    let tie_a = chunk(resource_b, 0, vec![0.8, (1.0f32 - 0.8 * 0.8).sqrt()]);
    let tie_b = chunk(resource_c, 5, vec![0.8, (1.0f32 - 0.8 * 0.8).sqrt()]);

    store.create_chunk_nodes(std::slice::from_ref(&high)).await.unwrap();
    store.create_chunk_nodes(std::slice::from_ref(&tie_a)).await.unwrap();
    store.create_chunk_nodes(std::slice::from_ref(&tie_b)).await.unwrap();

    let scope = SearchScope {
        collection_id: Uuid::new_v4(),
        resource_ids: vec![],
        filters: HashMap::new(),
    };
    let ranked = store.top_k_similar_chunks(&[1.0, 0.0], &scope, 10).await.unwrap();

    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].0.id, high.id);
    assert_eq!(ranked[1].0.id, tie_a.id); // sequence 0 before sequence 5 at equal score
    assert_eq!(ranked[2].0.id, tie_b.id);
}

#[tokio::test]
async fn end_to_end_query_pipeline_reaches_ready_with_credential() {
    let registry = new_registry();
    let subscription = create_subscription(&registry, "S").await;
    let collection = create_collection(&registry, subscription.id, "C").await;

    let resource = Resource {
        id: Uuid::new_v4(),
        collection_id: collection.id,
        resource_type_id: default_resource_type_id(),
        name: "doc".to_string(),
        file_name: "doc.md".to_string(),
        file_type: None,
        file: Some(b"# H\n\nthe quick brown fox\n\njumps over the lazy dog".to_vec()),
        markdown_content: None,
        callback_urls: vec![],
        status: ResourceStatus::Pending,
        error: None,
    };
    let created = UploadResource::new(&registry).execute(resource).await.unwrap();
    InitiateProcessing::new(&registry).execute(created.id).await.unwrap();
    InitialiseResourceGraph::new(&registry).execute(created.id).await.unwrap();
    ExtractPlainText::new(&registry).execute(created.id).await.unwrap();
    ChunkResourceText::new(&registry).execute(created.id).await.unwrap();
    UpdateChunksWithEmbeddings::new(&registry).execute(created.id).await.unwrap();

    let search = InitiateSearch::new(&registry)
        .execute(collection.id, "quick fox".to_string(), vec![], HashMap::new(), vec![])
        .await
        .unwrap();
    assert_eq!(search.status, SearchStatus::Pending);

    InitiateSearchRequest::new(&registry).execute(search.id).await.unwrap();
    VectoriseTheSearchQuery::new(&registry).execute(search.id).await.unwrap();
    IdentifyRelatedContent::new(&registry).execute(search.id).await.unwrap();
    ExecuteTheRagPrompt::new(&registry).execute(search.id).await.unwrap();
    IssueCredentials::new(&registry).execute(search.id).await.unwrap();

    let (finished, results) = GetQueryResult::new(&registry).execute(search.id).await.unwrap();
    assert_eq!(finished.status, SearchStatus::Credentialled);
    assert!(finished.response.is_some());
    assert!(finished.credential_url.is_some());
    assert!(!results.is_empty());
}
