//! The ingest pipeline (spec §4.2): one use case per stage, each a pure
//! function of `(registry, resource_id) -> Result<()>` that performs exactly
//! one transformation and enqueues the single next stage.

mod chunk_resource_text;
mod extract_plain_text;
mod initialise_resource_graph;
mod initiate_processing;
mod notifications;
mod update_chunks_with_embeddings;
mod ventilate_resource_processing;

pub use chunk_resource_text::ChunkResourceText;
pub use extract_plain_text::ExtractPlainText;
pub use initialise_resource_graph::InitialiseResourceGraph;
pub use initiate_processing::InitiateProcessing;
pub use notifications::{SendQuarantineNotification, SendValidationErrorNotification};
pub use update_chunks_with_embeddings::UpdateChunksWithEmbeddings;
pub use ventilate_resource_processing::VentilateResourceProcessing;
