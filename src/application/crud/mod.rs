//! Synchronous use cases that are not part of either pipeline (spec §4.2
//! "Synchronous operations"): CRUD, listings, and query polling.

pub mod collections;
pub mod queries;
pub mod resource_types;
pub mod resources;
pub mod subscriptions;
