//! Exercises the ingest pipeline's seed scenarios (spec §8: happy path,
//! virus quarantine, idempotent replay) plus a couple of upload boundary
//! behaviors, stage by stage against the in-memory adapters.

mod common;

use common::{create_collection, create_subscription, default_resource_type_id, new_registry};
use knowledge_service::application::crud::resources::{ListResourcesForCollection, UploadResource};
use knowledge_service::application::ingest::{
    ChunkResourceText, ExtractPlainText, InitialiseResourceGraph, InitiateProcessing,
    UpdateChunksWithEmbeddings, VentilateResourceProcessing,
};
use knowledge_service::domain::error::Error;
use knowledge_service::domain::types::{Resource, ResourceStatus};
use uuid::Uuid;

fn fresh_resource(collection_id: Uuid, file: &[u8]) -> Resource {
    Resource {
        id: Uuid::new_v4(),
        collection_id,
        resource_type_id: default_resource_type_id(),
        name: "doc".to_string(),
        file_name: "doc.md".to_string(),
        file_type: None,
        file: Some(file.to_vec()),
        markdown_content: None,
        callback_urls: vec![],
        status: ResourceStatus::Pending,
        error: None,
    }
}

async fn run_ingest_to_ready(registry: &knowledge_service::application::registry::Registry, resource_id: Uuid) {
    InitiateProcessing::new(registry).execute(resource_id).await.unwrap();
    InitialiseResourceGraph::new(registry).execute(resource_id).await.unwrap();
    ExtractPlainText::new(registry).execute(resource_id).await.unwrap();
    ChunkResourceText::new(registry).execute(resource_id).await.unwrap();
    UpdateChunksWithEmbeddings::new(registry).execute(resource_id).await.unwrap();
    VentilateResourceProcessing::new(registry).execute(resource_id).await.unwrap();
}

#[tokio::test]
async fn happy_path_ingest_reaches_ready_with_embedded_chunks() {
    let registry = new_registry();
    let subscription = create_subscription(&registry, "S").await;
    let collection = create_collection(&registry, subscription.id, "C").await;

    let resource = fresh_resource(collection.id, b"# Heading\n\npara one\n\npara two");
    let created = UploadResource::new(&registry).execute(resource).await.unwrap();
    assert_eq!(created.status, ResourceStatus::Pending);

    run_ingest_to_ready(&registry, created.id).await;

    let finished = registry.resource_store.get(created.id).await.unwrap().unwrap();
    assert_eq!(finished.status, ResourceStatus::Ready);
    assert_eq!(finished.file_type.as_deref(), Some("text/markdown"));

    let chunks = registry.graph_store.chunks_for_resource(created.id).await.unwrap();
    assert_eq!(chunks.len(), 2);
    let mut sequences: Vec<u32> = chunks.iter().map(|c| c.sequence).collect();
    sequences.sort();
    assert_eq!(sequences, vec![0, 1]);
    assert!(chunks.iter().all(|c| c.embedding.is_some()));
}

#[tokio::test]
async fn virus_marker_quarantines_resource_and_clears_file() {
    let registry = new_registry();
    let subscription = create_subscription(&registry, "S").await;
    let collection = create_collection(&registry, subscription.id, "C").await;

    let resource = fresh_resource(collection.id, b"VIRUSxxx");
    let created = UploadResource::new(&registry).execute(resource).await.unwrap();

    let err = InitiateProcessing::new(&registry).execute(created.id).await.unwrap_err();
    assert!(matches!(err, Error::VirusDetected { .. }));

    let quarantined = registry.resource_store.get(created.id).await.unwrap().unwrap();
    assert_eq!(quarantined.status, ResourceStatus::Quarantined);
    assert!(quarantined.file.is_none());

    let chunks = registry.graph_store.chunks_for_resource(created.id).await.unwrap();
    assert!(chunks.is_empty());
}

#[tokio::test]
async fn replaying_chunk_stage_does_not_duplicate_chunks_or_reembed() {
    let registry = new_registry();
    let subscription = create_subscription(&registry, "S").await;
    let collection = create_collection(&registry, subscription.id, "C").await;

    let resource = fresh_resource(collection.id, b"# H\n\nalpha\n\nbeta");
    let created = UploadResource::new(&registry).execute(resource).await.unwrap();
    run_ingest_to_ready(&registry, created.id).await;

    let before = registry.graph_store.chunks_for_resource(created.id).await.unwrap();
    let mut before_ids: Vec<Uuid> = before.iter().map(|c| c.id).collect();
    before_ids.sort();

    // Replay the chunk and embedding stages as a dispatcher redelivery would.
    ChunkResourceText::new(&registry).execute(created.id).await.unwrap();
    UpdateChunksWithEmbeddings::new(&registry).execute(created.id).await.unwrap();

    let after = registry.graph_store.chunks_for_resource(created.id).await.unwrap();
    let mut after_ids: Vec<Uuid> = after.iter().map(|c| c.id).collect();
    after_ids.sort();

    assert_eq!(before_ids, after_ids);
    assert_eq!(before.len(), after.len());
    let missing = registry.graph_store.chunks_missing_embeddings(created.id).await.unwrap();
    assert!(missing.is_empty());
}

#[tokio::test]
async fn upload_with_empty_file_is_rejected() {
    let registry = new_registry();
    let subscription = create_subscription(&registry, "S").await;
    let collection = create_collection(&registry, subscription.id, "C").await;

    let mut resource = fresh_resource(collection.id, b"");
    resource.file = Some(Vec::new());
    let err = UploadResource::new(&registry).execute(resource).await.unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[tokio::test]
async fn upload_with_disallowed_resource_type_is_rejected_and_not_created() {
    let registry = new_registry();
    let subscription = create_subscription(&registry, "S").await;
    let collection = create_collection(&registry, subscription.id, "C").await;

    let mut resource = fresh_resource(collection.id, b"hello world");
    resource.resource_type_id = Uuid::new_v4(); // not in collection.resource_type_ids

    let err = UploadResource::new(&registry).execute(resource).await.unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));

    let resources = ListResourcesForCollection::new(&registry).execute(collection.id).await.unwrap();
    assert!(resources.is_empty());
}
