//! Default in-memory/deterministic adapters for every port (spec §9
//! "test doubles are adapters with in-memory state"). Every adapter here
//! is production-usable for a single-process deployment and is what
//! `infrastructure::bootstrap` wires up unless a real backend is
//! configured.

pub mod antivirus;
pub mod chunker;
pub mod file_manager;
pub mod graph;
pub mod language_model;
pub mod search_store;
pub mod stores;

pub use antivirus::{InMemoryQuarantine, MarkerAntivirusScanner};
pub use chunker::MarkdownParagraphChunker;
pub use file_manager::PlainTextFileManager;
pub use graph::InMemoryGraphStore;
pub use language_model::DeterministicLanguageModel;
pub use search_store::InMemorySearchStore;
pub use stores::{
    InMemoryCollectionStore, InMemoryResourceStore, InMemoryResourceTypeStore,
    InMemorySubscriptionStore,
};
