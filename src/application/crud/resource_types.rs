//! Resource types are immutable after creation (spec §3); the only
//! operation is listing.

use crate::application::registry::Registry;
use crate::domain::error::Result;
use crate::domain::types::ResourceType;

pub struct ListResourceTypes<'a> {
    registry: &'a Registry,
}

impl<'a> ListResourceTypes<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self) -> Result<Vec<ResourceType>> {
        self.registry.resource_type_store.list().await
    }
}
