//! CMS webhook endpoint.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::parse_body;
use crate::auth;
use crate::errors::{AppError, Failure};
use crate::models::{SyncPayload, WebhookAction, WebhookEvent};
use crate::transform::transform_story;
use crate::AppState;

/// Body returned for every processed delivery.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub success: bool,
    pub message: String,
    pub action: WebhookAction,
    pub story_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algolia_object_id: Option<String>,
}

/// POST /storyblok-webhook - Mirror one story lifecycle event into the index.
pub async fn storyblok_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = auth::signature_from_headers(&headers);
    let verified = auth::verify_signature(
        state.config.signature_mode,
        state.config.storyblok.webhook_secret.as_deref(),
        &body,
        signature,
    );

    match verified {
        Ok(()) => {}
        Err(AppError::Unauthorized(_)) => {
            tracing::warn!("Invalid webhook signature");
            return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Webhook processing error");
            return Failure(e).into_response();
        }
    }

    match process_event(&state, &body).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            tracing::error!(error = %e, code = e.error_code(), "Webhook processing error");
            Failure(e).into_response()
        }
    }
}

async fn process_event(state: &AppState, body: &[u8]) -> Result<WebhookResponse, AppError> {
    let event: WebhookEvent = parse_body(body)?;
    let WebhookEvent {
        action,
        story_id,
        space_id,
        story: snapshot,
    } = event;

    tracing::info!(
        %action,
        %story_id,
        %space_id,
        has_snapshot = snapshot.is_some(),
        "Processing webhook"
    );

    let story = state.cms.fetch_story(&space_id, &story_id).await?;

    if action.is_removal() {
        let payload = SyncPayload::ObjectId(story_id.clone());
        state.dispatcher.dispatch(action, &payload).await?;

        return Ok(WebhookResponse {
            success: true,
            message: format!("Story {} removed from index", story_id),
            action,
            story_id,
            algolia_object_id: None,
        });
    }

    if story.is_indexable() {
        let record = transform_story(&story, state.analyzer.as_ref()).await;
        let object_id = record.object_id.clone();
        state
            .dispatcher
            .dispatch(action, &SyncPayload::from(record))
            .await?;

        tracing::info!(%action, %story_id, "Successfully processed webhook");

        return Ok(WebhookResponse {
            success: true,
            message: format!("Story {} {} successfully", story_id, action),
            action,
            story_id,
            algolia_object_id: Some(object_id),
        });
    }

    tracing::info!(%action, %story_id, published = story.published, "Story not indexable, skipping");

    Ok(WebhookResponse {
        success: false,
        message: "Story not published or no content".to_string(),
        action,
        story_id,
        algolia_object_id: None,
    })
}
