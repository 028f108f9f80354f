//! Analyzer seam used by the transformer.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::analysis;
use crate::errors::{self, AppError};
use crate::models::ContentAnalysis;

/// Anything that can derive [`ContentAnalysis`] for a document.
#[async_trait]
pub trait ContentAnalyzer: Send + Sync {
    async fn analyze(&self, content: &str, title: &str) -> ContentAnalysis;
}

/// Runs the entity extractor in-process.
#[derive(Debug, Default, Clone)]
pub struct LocalAnalyzer;

#[async_trait]
impl ContentAnalyzer for LocalAnalyzer {
    async fn analyze(&self, content: &str, title: &str) -> ContentAnalysis {
        analysis::analyze(content, title)
    }
}

#[derive(Deserialize)]
struct RemoteAnalysisResponse {
    analysis: ContentAnalysis,
}

/// Calls the analysis endpoint over HTTP, falling back to the in-process
/// extractor whenever the call fails.
#[derive(Clone)]
pub struct RemoteAnalyzer {
    http_client: Client,
    endpoint: String,
    token: Option<String>,
}

impl RemoteAnalyzer {
    pub fn new(http_client: Client, endpoint: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
            token,
        }
    }

    async fn request(&self, content: &str, title: &str) -> Result<ContentAnalysis, AppError> {
        let body = json!({
            "content": content,
            "title": title,
            "metadata": {
                "source": "storyblok",
                "timestamp": errors::timestamp(),
            }
        });

        let mut request = self.http_client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "Content analysis endpoint returned {}",
                status
            )));
        }

        let parsed: RemoteAnalysisResponse = response
            .json()
            .await
            .map_err(|e| AppError::Parse(format!("Invalid analysis response: {}", e)))?;

        Ok(parsed.analysis)
    }
}

#[async_trait]
impl ContentAnalyzer for RemoteAnalyzer {
    async fn analyze(&self, content: &str, title: &str) -> ContentAnalysis {
        match self.request(content, title).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(error = %e, endpoint = %self.endpoint, "AI analysis failed, using local heuristics");
                analysis::analyze(content, title)
            }
        }
    }
}
