//! Search index module.
//!
//! The index is a hosted service; this module holds the write-side seam, its
//! Algolia implementation, and the dispatcher that maps webhook actions onto it.

mod algolia;
mod dispatcher;

pub use algolia::AlgoliaIndex;
pub use dispatcher::{RetryPolicy, SyncDispatcher};

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::IndexRecord;

/// Write operations against a search index, keyed by `objectID`.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Add or replace the record stored under its `objectID`.
    async fn upsert(&self, record: &IndexRecord) -> Result<(), AppError>;

    /// Remove the record stored under `object_id`.
    async fn delete(&self, object_id: &str) -> Result<(), AppError>;
}
