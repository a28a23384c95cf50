//! Synchronous CRUD on subscriptions (spec §4.2 "Synchronous operations",
//! §6 HTTP surface). Deleting a subscription cascades: its collections
//! (and their resources and chunks) are removed too (spec §8 "cascading
//! delete").

use crate::application::registry::Registry;
use crate::domain::error::Result;
use crate::domain::types::Subscription;
use uuid::Uuid;

pub struct CreateSubscription<'a> {
    registry: &'a Registry,
}

impl<'a> CreateSubscription<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, subscription: Subscription) -> Result<Subscription> {
        self.registry.subscription_store.create(subscription).await
    }
}

pub struct GetSubscription<'a> {
    registry: &'a Registry,
}

impl<'a> GetSubscription<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, id: Uuid) -> Result<Option<Subscription>> {
        self.registry.subscription_store.get(id).await
    }
}

pub struct ListSubscriptions<'a> {
    registry: &'a Registry,
}

impl<'a> ListSubscriptions<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self) -> Result<Vec<Subscription>> {
        self.registry.subscription_store.list().await
    }
}

/// Cascades: every collection owned by the subscription is deleted first
/// (which in turn cascades to resources and chunks), then the subscription
/// row itself.
pub struct DeleteSubscription<'a> {
    registry: &'a Registry,
}

impl<'a> DeleteSubscription<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, id: Uuid) -> Result<bool> {
        let collections = self.registry.collection_store.list_for_subscription(id).await?;
        for collection in collections {
            super::collections::DeleteCollection::new(self.registry)
                .execute(collection.id)
                .await?;
        }
        self.registry.subscription_store.delete(id).await
    }
}
