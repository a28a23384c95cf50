//! The default `WebhookClient` adapter (spec §4.4): concurrent POST
//! delivery with URL deduplication, bounded concurrency, per-request
//! timeout, and per-URL retry. Never fails the caller — delivery is
//! best-effort and off the pipeline's critical path.

use crate::domain::ports::{WebhookClient, WebhookEvent};
use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use std::collections::HashSet;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct FanoutPolicy {
    pub concurrency: usize,
    pub timeout: Duration,
    pub max_attempts: u32,
}

impl Default for FanoutPolicy {
    fn default() -> Self {
        Self {
            concurrency: 8,
            timeout: Duration::from_secs(30),
            max_attempts: 3,
        }
    }
}

pub struct ReqwestWebhookClient {
    client: reqwest::Client,
    policy: FanoutPolicy,
}

impl ReqwestWebhookClient {
    pub fn new(policy: FanoutPolicy) -> Self {
        let client = reqwest::Client::builder()
            .timeout(policy.timeout)
            .build()
            .unwrap_or_default();
        Self { client, policy }
    }

    async fn deliver_one(&self, url: &str, body: &serde_json::Value) -> bool {
        for attempt in 1..=self.policy.max_attempts {
            match self.client.post(url).json(body).send().await {
                Ok(resp) if resp.status().is_success() => return true,
                Ok(resp) => {
                    tracing::warn!(url, status = %resp.status(), attempt, "webhook delivery rejected");
                }
                Err(e) => {
                    tracing::warn!(url, %e, attempt, "webhook delivery failed");
                }
            }
        }
        false
    }
}

#[async_trait]
impl WebhookClient for ReqwestWebhookClient {
    async fn notify(&self, urls: &[String], event: WebhookEvent) -> bool {
        let deduped: Vec<&String> = urls.iter().collect::<HashSet<_>>().into_iter().collect();
        if deduped.is_empty() {
            return true;
        }
        let body = match serde_json::to_value(&event) {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(%e, "failed to serialize webhook payload");
                return false;
            }
        };

        let results: Vec<bool> = stream::iter(deduped.iter())
            .map(|url| self.deliver_one(url, &body))
            .buffer_unordered(self.policy.concurrency)
            .collect()
            .await;

        let any_ok = results.iter().any(|ok| *ok);
        if !any_ok {
            tracing::error!(urls = ?deduped, "all webhook deliveries failed");
        }
        any_ok
    }
}
