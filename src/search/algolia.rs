//! Algolia REST client for single-object writes.

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::SearchIndex;
use crate::config::AlgoliaConfig;
use crate::errors::AppError;
use crate::models::IndexRecord;

const API_KEY_HEADER: &str = "X-Algolia-API-Key";
const APP_ID_HEADER: &str = "X-Algolia-Application-Id";

/// Algolia index addressed through `/1/indexes/{index}/{objectID}`.
#[derive(Clone)]
pub struct AlgoliaIndex {
    http_client: Client,
    config: AlgoliaConfig,
}

impl AlgoliaIndex {
    pub fn new(http_client: Client, config: AlgoliaConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// App id and admin key, both required for writes.
    fn credentials(&self) -> Result<(&str, &str), AppError> {
        let app_id = self
            .config
            .app_id
            .as_deref()
            .ok_or_else(|| AppError::Config("ALGOLIA_APP_ID not configured".into()))?;
        let admin_key = self
            .config
            .admin_api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("ALGOLIA_ADMIN_API_KEY not configured".into()))?;
        Ok((app_id, admin_key))
    }

    fn object_url(&self, app_id: &str, object_id: &str) -> Result<Url, AppError> {
        let host = self
            .config
            .host
            .clone()
            .unwrap_or_else(|| format!("https://{}-dsn.algolia.net", app_id));

        let mut url = Url::parse(&host)
            .map_err(|e| AppError::Config(format!("Invalid Algolia host {}: {}", host, e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("Invalid Algolia host {}", host)))?
            .pop_if_empty()
            .extend(["1", "indexes", self.config.index_name.as_str(), object_id]);
        Ok(url)
    }
}

#[async_trait]
impl SearchIndex for AlgoliaIndex {
    async fn upsert(&self, record: &IndexRecord) -> Result<(), AppError> {
        let (app_id, admin_key) = self.credentials()?;
        let url = self.object_url(app_id, &record.object_id)?;

        let response = self
            .http_client
            .put(url)
            .header(API_KEY_HEADER, admin_key)
            .header(APP_ID_HEADER, app_id)
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(object_id = %record.object_id, %status, %body, "Algolia sync error");
            return Err(AppError::Upstream(format!(
                "Algolia sync failed: {} {}",
                status, body
            )));
        }

        tracing::info!("Successfully synced story {} to Algolia", record.object_id);
        Ok(())
    }

    async fn delete(&self, object_id: &str) -> Result<(), AppError> {
        let (app_id, admin_key) = self.credentials()?;
        let url = self.object_url(app_id, object_id)?;

        let response = self
            .http_client
            .delete(url)
            .header(API_KEY_HEADER, admin_key)
            .header(APP_ID_HEADER, app_id)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(%object_id, %status, %body, "Algolia deletion error");
            return Err(AppError::Upstream(format!(
                "Algolia deletion failed: {} {}",
                status, body
            )));
        }

        tracing::info!("Successfully deleted story {} from Algolia", object_id);
        Ok(())
    }
}
