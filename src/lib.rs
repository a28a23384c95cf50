//! Knowledge Service: a multi-tenant RAG knowledge base over a property
//! graph (spec §1). The core is the asynchronous resource-ingestion and
//! query pipelines (`application`) built against abstract capability
//! contracts (`domain::ports`); `infrastructure` supplies the default
//! adapters and the startup routine; `server` is the HTTP façade adapter.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod server;

pub use domain::error::{Error, Result};
