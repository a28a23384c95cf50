//! The default `TaskDispatch` adapter (spec §4.3): an in-process
//! `tokio::mpsc` queue standing in for a Celery-style broker. Delivery is
//! at-least-once; retryable failures are redelivered with exponential
//! backoff up to a configured bound, then the message is dead-lettered.

use crate::domain::error::{Result, RetryClass};
use crate::domain::ports::{DispatchMessage, IngestStage, SearchStage, TaskDispatch};
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Backoff parameters (spec §4.3: "default: 5 attempts, base 1 s, factor 2,
/// cap 60 s").
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base: Duration,
    pub cap: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base: Duration::from_secs(1),
            cap: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base.saturating_mul(factor).min(self.cap)
    }
}

struct Envelope {
    message: DispatchMessage,
    attempt: u32,
}

/// A message that exhausted its retry budget, or that failed with a fatal
/// error kind. Surfaced here rather than silently dropped so the worker
/// binary can log/metric it (spec §4.3 "poison messages go to a
/// dead-letter sink").
#[derive(Debug, Clone)]
pub struct DeadLetter {
    pub message: DispatchMessage,
    pub attempts: u32,
    pub last_error: String,
}

pub struct InMemoryDispatcher {
    sender: mpsc::UnboundedSender<Envelope>,
    receiver: tokio::sync::Mutex<Option<mpsc::UnboundedReceiver<Envelope>>>,
    policy: RetryPolicy,
}

impl InMemoryDispatcher {
    pub fn new(policy: RetryPolicy) -> Arc<Self> {
        let (sender, receiver) = mpsc::unbounded_channel();
        Arc::new(Self {
            sender,
            receiver: tokio::sync::Mutex::new(Some(receiver)),
            policy,
        })
    }

    /// Drives the queue until the channel closes (every sender dropped).
    /// `handle` is the worker's stage dispatch table; its `Err` is
    /// classified via [`crate::domain::error::Error::retry_class`] to
    /// decide redelivery vs dead-lettering.
    pub async fn run<F>(self: Arc<Self>, handle: F, dead_letters: mpsc::UnboundedSender<DeadLetter>)
    where
        F: Fn(DispatchMessage) -> Pin<Box<dyn Future<Output = Result<()>> + Send>> + Send + Sync + 'static,
    {
        let mut receiver = self
            .receiver
            .lock()
            .await
            .take()
            .expect("InMemoryDispatcher::run called more than once");

        while let Some(envelope) = receiver.recv().await {
            let Envelope { message, attempt } = envelope;
            match handle(message.clone()).await {
                Ok(()) => {}
                Err(e) if e.retry_class() == RetryClass::Retryable && attempt < self.policy.max_attempts => {
                    let delay = self.policy.backoff(attempt);
                    let sender = self.sender.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let _ = sender.send(Envelope {
                            message,
                            attempt: attempt + 1,
                        });
                    });
                }
                Err(e) => {
                    let _ = dead_letters.send(DeadLetter {
                        message,
                        attempts: attempt,
                        last_error: e.to_string(),
                    });
                }
            }
        }
    }
}

#[async_trait]
impl TaskDispatch for InMemoryDispatcher {
    async fn enqueue(&self, stage: IngestStage, resource_id: Uuid) -> Result<()> {
        let _ = self.sender.send(Envelope {
            message: DispatchMessage::Ingest { stage, resource_id },
            attempt: 1,
        });
        Ok(())
    }

    async fn enqueue_search_stage(&self, stage: SearchStage, search_id: Uuid) -> Result<()> {
        let _ = self.sender.send(Envelope {
            message: DispatchMessage::Search { stage, search_id },
            attempt: 1,
        });
        Ok(())
    }
}

/// Maps a dispatched message onto the use case that realises its stage
/// (spec §4.2). This is the one place that knows every stage's successor
/// wiring at the process level; each use case itself only knows the single
/// next stage it enqueues.
async fn invoke_stage(registry: &crate::application::registry::Registry, message: DispatchMessage) -> Result<()> {
    let deadline = registry.stage_deadline;
    match tokio::time::timeout(deadline, invoke_stage_inner(registry, message.clone())).await {
        Ok(result) => result,
        Err(_) => Err(crate::domain::error::Error::timeout(format!(
            "stage invocation for {message:?} exceeded its {deadline:?} deadline"
        ))),
    }
}

/// Dispatch table proper, run under the deadline enforced by [`invoke_stage`].
async fn invoke_stage_inner(registry: &crate::application::registry::Registry, message: DispatchMessage) -> Result<()> {
    use crate::application::ingest::{
        ChunkResourceText, ExtractPlainText, InitialiseResourceGraph, InitiateProcessing,
        SendQuarantineNotification, SendValidationErrorNotification, UpdateChunksWithEmbeddings,
        VentilateResourceProcessing,
    };
    use crate::application::query::{
        ExecuteTheRagPrompt, IdentifyRelatedContent, InitiateSearchRequest, IssueCredentials,
        VentilateSearchResults, VectoriseTheSearchQuery,
    };

    match message {
        DispatchMessage::Ingest { stage, resource_id } => match stage {
            IngestStage::InitiateProcessing => InitiateProcessing::new(registry).execute(resource_id).await,
            IngestStage::InitialiseResourceGraph => {
                InitialiseResourceGraph::new(registry).execute(resource_id).await
            }
            IngestStage::ExtractPlainText => ExtractPlainText::new(registry).execute(resource_id).await,
            IngestStage::ChunkResourceText => ChunkResourceText::new(registry).execute(resource_id).await,
            IngestStage::UpdateChunksWithEmbeddings => {
                UpdateChunksWithEmbeddings::new(registry).execute(resource_id).await
            }
            IngestStage::VentilateResourceProcessing => {
                VentilateResourceProcessing::new(registry).execute(resource_id).await
            }
            IngestStage::QuarantineNotification => {
                SendQuarantineNotification::new(registry).execute(resource_id).await
            }
            IngestStage::ValidationErrorNotification => {
                SendValidationErrorNotification::new(registry).execute(resource_id).await
            }
        },
        DispatchMessage::Search { stage, search_id } => match stage {
            SearchStage::InitiateSearchRequest => InitiateSearchRequest::new(registry).execute(search_id).await,
            SearchStage::VectoriseTheSearchQuery => {
                VectoriseTheSearchQuery::new(registry).execute(search_id).await
            }
            SearchStage::IdentifyRelatedContent => {
                IdentifyRelatedContent::with_top_k(registry, registry.top_k_default)
                    .execute(search_id)
                    .await
            }
            SearchStage::ExecuteTheRagPrompt => ExecuteTheRagPrompt::new(registry).execute(search_id).await,
            SearchStage::IssueCredentials => IssueCredentials::new(registry).execute(search_id).await,
            SearchStage::VentilateSearchResults => VentilateSearchResults::new(registry).execute(search_id).await,
        },
    }
}

/// Spawns the background task that drains `dispatcher` against `registry`,
/// logging dead-lettered messages (spec §4.3 "poison messages go to a
/// dead-letter sink; the entity is marked `failed` with the last error
/// kind" — the entity-side marking happens inside each use case; this loop
/// only surfaces the event for operational visibility).
pub fn spawn_stage_worker(
    dispatcher: Arc<InMemoryDispatcher>,
    registry: Arc<crate::application::registry::Registry>,
) -> tokio::task::JoinHandle<()> {
    let (dead_letter_tx, mut dead_letter_rx) = mpsc::unbounded_channel::<DeadLetter>();

    tokio::spawn(async move {
        while let Some(dead_letter) = dead_letter_rx.recv().await {
            tracing::error!(
                message = ?dead_letter.message,
                attempts = dead_letter.attempts,
                error = %dead_letter.last_error,
                "stage invocation dead-lettered"
            );
        }
    });

    tokio::spawn(async move {
        dispatcher
            .run(
                move |message| {
                    let registry = registry.clone();
                    Box::pin(async move { invoke_stage(&registry, message).await })
                },
                dead_letter_tx,
            )
            .await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_per_attempt_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_secs(1));
        assert_eq!(policy.backoff(2), Duration::from_secs(2));
        assert_eq!(policy.backoff(3), Duration::from_secs(4));
        assert_eq!(policy.backoff(10), policy.cap);
    }
}
