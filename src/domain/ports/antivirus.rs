//! The `AntivirusScanner` and `Quarantine` ports (spec §4.1, §4.2 stage 1).

use crate::domain::error::Result;
use crate::domain::types::Resource;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanResult {
    Clean,
    Infected,
    /// The scan engine itself failed; treated as retryable (spec §4.2
    /// stage 1, `RetryClass::Retryable`).
    Error,
}

#[async_trait]
pub trait AntivirusScanner: Send + Sync {
    async fn scan(&self, resource: &Resource) -> Result<ScanResult>;
}
pub type SharedAntivirusScanner = Arc<dyn AntivirusScanner>;

#[async_trait]
pub trait Quarantine: Send + Sync {
    /// Moves the resource's file bytes out of normal storage. Implementations
    /// must leave `resource.file` cleared afterwards (spec §3 invariant on
    /// `Quarantined` resources never retaining file bytes).
    async fn quarantine(&self, resource: &Resource) -> Result<()>;

    async fn is_quarantined(&self, resource_id: Uuid) -> Result<bool>;
}
pub type SharedQuarantine = Arc<dyn Quarantine>;
