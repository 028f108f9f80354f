//! Sync dispatcher: maps a webhook action onto an index write.

use std::sync::Arc;
use std::time::Duration;

use super::SearchIndex;
use crate::errors::AppError;
use crate::models::{SyncPayload, WebhookAction};

/// Attempts and backoff applied to each index write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// One attempt, no retry.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
        }
    }

    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay before retry number `attempt` (1-based): `base * 2^(attempt-1)`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// Mirrors one record's lifecycle event into the search index.
#[derive(Clone)]
pub struct SyncDispatcher {
    index: Arc<dyn SearchIndex>,
    retry: RetryPolicy,
}

enum IndexOp<'a> {
    Upsert(&'a crate::models::IndexRecord),
    Delete(&'a str),
}

impl SyncDispatcher {
    pub fn new(index: Arc<dyn SearchIndex>, retry: RetryPolicy) -> Self {
        Self { index, retry }
    }

    /// `published` upserts the full record; `unpublished` and `deleted` delete by `objectID`.
    pub async fn dispatch(
        &self,
        action: WebhookAction,
        payload: &SyncPayload,
    ) -> Result<(), AppError> {
        let op = match (action, payload) {
            (WebhookAction::Published, SyncPayload::Record(record)) => IndexOp::Upsert(record),
            (WebhookAction::Published, SyncPayload::ObjectId(id)) => {
                return Err(AppError::Internal(format!(
                    "Cannot publish story {} without a full record",
                    id
                )));
            }
            (WebhookAction::Unpublished | WebhookAction::Deleted, payload) => {
                IndexOp::Delete(payload.object_id())
            }
        };

        let mut attempt = 1;
        loop {
            let result = match &op {
                IndexOp::Upsert(record) => self.index.upsert(record).await,
                IndexOp::Delete(object_id) => self.index.delete(object_id).await,
            };

            match result {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.retry.max_attempts => {
                    let delay = self.retry.delay_for(attempt);
                    tracing::warn!(
                        object_id = %payload.object_id(),
                        %action,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Index write failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::warn!(object_id = %payload.object_id(), %action, attempt, error = %e, "Giving up on index write");
                    return Err(e);
                }
            }
        }
    }
}
