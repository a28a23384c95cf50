//! Domain layer: entities, value objects, and port contracts (spec §3, §4.1).
//!
//! This layer depends on nothing outside the standard library plus
//! serialization/error crates — every external system is reached through a
//! trait defined in [`ports`].

pub mod error;
pub mod ports;
pub mod types;
