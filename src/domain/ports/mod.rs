//! Domain port interfaces (spec §4.1): the boundary contracts between the
//! application layer and every external system.
//!
//! ## Organization
//!
//! - **stores.rs** - relational CRUD: subscriptions, collections, resources, resource types
//! - **search_store.rs** - `SearchRequest`/`SearchResult` CRUD
//! - **graph.rs** - the property graph: node/edge shape, chunk similarity
//! - **dispatch.rs** - hand-off between pipeline stages
//! - **file_manager.rs** - MIME detection, format validation, markdown extraction
//! - **antivirus.rs** - virus scanning and quarantine
//! - **language_model.rs** - embedding, RAG generation, credential issuance
//! - **chunker.rs** - markdown-to-chunks strategies
//! - **webhook.rs** - fan-out event delivery

pub mod antivirus;
pub mod chunker;
pub mod dispatch;
pub mod file_manager;
pub mod graph;
pub mod language_model;
pub mod search_store;
pub mod stores;
pub mod webhook;

pub use antivirus::{AntivirusScanner, Quarantine, ScanResult, SharedAntivirusScanner, SharedQuarantine};
pub use chunker::{Chunker, SharedChunker};
pub use dispatch::{DispatchMessage, IngestStage, SearchStage, SharedTaskDispatch, TaskDispatch};
pub use file_manager::{FileManager, SharedFileManager};
pub use graph::{GraphStore, SearchScope, SharedGraphStore};
pub use language_model::{LanguageModel, SharedLanguageModel};
pub use search_store::{SearchStore, SharedSearchStore};
pub use stores::{
    CollectionStore, ResourceStore, ResourceTypeStore, SharedCollectionStore,
    SharedResourceStore, SharedResourceTypeStore, SharedSubscriptionStore, SubscriptionStore,
};
pub use webhook::{SharedWebhookClient, WebhookClient, WebhookEvent};
