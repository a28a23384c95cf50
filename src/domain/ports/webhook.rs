//! The `WebhookClient` port (spec §4.1, §6 "Webhook payloads"): fan-out
//! notification delivery with deduplication of identical URLs within one
//! invocation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Payload body for a fan-out POST, tagged by `event_type` (spec §6).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type")]
pub enum WebhookEvent {
    #[serde(rename = "resource.ready")]
    ResourceReady {
        resource_id: Uuid,
        status: String,
        timestamp: DateTime<Utc>,
        message: Option<String>,
    },
    #[serde(rename = "search.ready")]
    SearchReady {
        search_id: Uuid,
        status: String,
        timestamp: DateTime<Utc>,
        message: Option<String>,
    },
}

/// Best-effort fan-out: individual URL failures are logged by the
/// implementation and retried, since webhook delivery is not on the
/// pipeline's critical path (spec §4.2 stage 6/12 "ventilate"). The
/// enclosing stage only fails when *every* callback fails (spec §4.4) —
/// callers inspect the returned flag to decide that.
#[async_trait]
pub trait WebhookClient: Send + Sync {
    /// Returns `true` unless `urls` was non-empty and every delivery failed.
    async fn notify(&self, urls: &[String], event: WebhookEvent) -> bool;
}
pub type SharedWebhookClient = Arc<dyn WebhookClient>;
