//! Standalone content analysis endpoint.

use std::time::Instant;

use axum::{body::Bytes, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::parse_body;
use crate::analysis;
use crate::errors::{timestamp, AppError, Failure};
use crate::models::ContentAnalysis;

const ANALYSIS_VERSION: &str = "1.0.0";

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisMetadata {
    pub timestamp: String,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub success: bool,
    pub analysis: ContentAnalysis,
    /// Milliseconds spent analyzing
    pub processing_time: u64,
    pub metadata: AnalysisMetadata,
}

/// POST /ai-content-analysis - Run the entity extractor over a document.
pub async fn analyze_content(body: Bytes) -> Result<Json<AnalysisResponse>, Failure> {
    let started = Instant::now();

    let request: AnalysisRequest = parse_body(&body).map_err(|e| {
        tracing::error!(error = %e, "Content analysis error");
        Failure(e)
    })?;

    let (content, title) = match (request.content.as_deref(), request.title.as_deref()) {
        (Some(c), Some(t)) if !c.is_empty() && !t.is_empty() => (c, t),
        _ => {
            return Err(Failure(AppError::Validation(
                "Content and title are required".into(),
            )))
        }
    };

    tracing::info!(title, has_metadata = request.metadata.is_some(), "Analyzing content");

    let analysis = analysis::analyze(content, title);
    let processing_time = started.elapsed().as_millis() as u64;

    tracing::info!(title, processing_time, "Content analysis completed");

    Ok(Json(AnalysisResponse {
        success: true,
        analysis,
        processing_time,
        metadata: AnalysisMetadata {
            timestamp: timestamp(),
            version: ANALYSIS_VERSION,
        },
    }))
}
