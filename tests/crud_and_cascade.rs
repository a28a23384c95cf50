//! Exercises cascading delete (spec §8): deleting a subscription removes
//! its collections and resources from the relational stores and
//! soft-deletes their graph nodes, and subsequent lookups 404.

mod common;

use common::{create_collection, create_subscription, default_resource_type_id, new_registry};
use knowledge_service::application::crud::collections::GetCollection;
use knowledge_service::application::crud::resources::{ListResourcesForCollection, UploadResource};
use knowledge_service::application::crud::subscriptions::{DeleteSubscription, GetSubscription};
use knowledge_service::domain::types::{Resource, ResourceStatus};
use uuid::Uuid;

#[tokio::test]
async fn deleting_a_subscription_cascades_to_collections_and_resources() {
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
        file: Some(b"hello world".to_vec()),
        markdown_content: None,
        callback_urls: vec![],
        status: ResourceStatus::Pending,
        error: None,
    };
    let created = UploadResource::new(&registry).execute(resource).await.unwrap();

    let deleted = DeleteSubscription::new(&registry).execute(subscription.id).await.unwrap();
    assert!(deleted);

    assert!(GetSubscription::new(&registry).execute(subscription.id).await.unwrap().is_none());
    assert!(GetCollection::new(&registry).execute(collection.id).await.unwrap().is_none());
    let remaining = ListResourcesForCollection::new(&registry).execute(collection.id).await.unwrap();
    assert!(remaining.is_empty());
    assert!(registry.resource_store.get(created.id).await.unwrap().is_none());

    // Graph node is soft-deleted, not removed — chunk lookups still resolve
    // to an empty list rather than erroring (spec §9 Open Question (b)).
    let chunks = registry.graph_store.chunks_for_resource(created.id).await.unwrap();
    assert!(chunks.is_empty());
}

#[tokio::test]
async fn deleting_a_subscription_without_collections_still_succeeds() {
    let registry = new_registry();
    let subscription = create_subscription(&registry, "Lonely").await;

    let deleted = DeleteSubscription::new(&registry).execute(subscription.id).await.unwrap();
    assert!(deleted);
    assert!(GetSubscription::new(&registry).execute(subscription.id).await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_an_unknown_subscription_returns_false() {
    let registry = new_registry();
    let deleted = DeleteSubscription::new(&registry).execute(Uuid::new_v4()).await.unwrap();
    assert!(!deleted);
}
