//! Shared test scaffolding: builds a fresh [`Registry`] wired to the
//! default in-memory adapters (spec §8's seed scenarios all run against
//! these, matching the original's `tests/test_uc_*.py` one-registry-per-test
//! layout).

use knowledge_service::application::crud::collections::CreateCollection;
use knowledge_service::application::crud::subscriptions::CreateSubscription;
use knowledge_service::application::registry::Registry;
use knowledge_service::domain::types::{Collection, Subscription};
use knowledge_service::infrastructure::bootstrap::build_default_registry;
use knowledge_service::infrastructure::config::ConfigLoader;
use std::collections::HashSet;
use uuid::Uuid;

pub fn new_registry() -> Registry {
    let config = ConfigLoader::new().load(None).expect("embedded defaults must parse");
    build_default_registry(&config).0
}

/// The resource type `infrastructure::bootstrap` seeds by default.
pub fn default_resource_type_id() -> Uuid {
    Uuid::nil()
}

pub async fn create_subscription(registry: &Registry, name: &str) -> Subscription {
    let subscription = Subscription {
        id: Uuid::new_v4(),
        name: name.to_string(),
        is_active: true,
        resource_type_ids: HashSet::from([default_resource_type_id()]),
        collection_ids: HashSet::new(),
        organisation_id: None,
        user_id: None,
    };
    CreateSubscription::new(registry).execute(subscription).await.unwrap()
}

pub async fn create_collection(registry: &Registry, subscription_id: Uuid, name: &str) -> Collection {
    let collection = Collection {
        id: Uuid::new_v4(),
        subscription_id,
        name: name.to_string(),
        description: None,
        resource_type_ids: HashSet::from([default_resource_type_id()]),
    };
    CreateCollection::new(registry).execute(collection).await.unwrap()
}
