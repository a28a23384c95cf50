//! Layered configuration (spec §6, §9 "Global configuration").

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::Config;
