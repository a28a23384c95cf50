//! Shared application state handed to every axum handler via the `State`
//! extractor (grounded on `parallax-labs-context-harness`'s `AppState`).

use crate::application::registry::Registry;
use crate::infrastructure::config::Config;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(registry: Registry, config: Config) -> Self {
        Self {
            registry: Arc::new(registry),
            config: Arc::new(config),
        }
    }

    /// Builds from an already-shared registry, e.g. one also handed to a
    /// background dispatcher worker (spec §5 "the registry itself is
    /// immutable after startup" — cheap to share, never mutated in place).
    pub fn from_shared(registry: Arc<Registry>, config: Config) -> Self {
        Self {
            registry,
            config: Arc::new(config),
        }
    }
}
