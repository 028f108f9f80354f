//! CMS management API proxy.

use axum::{body::Bytes, extract::State, Json};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::parse_body;
use crate::errors::{AppError, ProxyFailure};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ProxyRequest {
    pub action: String,
    #[serde(default)]
    pub params: Map<String, Value>,
}

/// Read-only management API call selected by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyAction {
    GetSpaces,
    GetSpace { space_id: String },
    GetStories { space_id: String },
    GetStory { space_id: String, story_id: String },
    SearchStories {
        space_id: String,
        query: Vec<(String, String)>,
    },
    GetComponents { space_id: String },
}

/// Render a parameter as a path or query value; absent, null, empty, false and 0 yield `None`.
fn param(params: &Map<String, Value>, key: &str) -> Option<String> {
    match params.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".into()),
        _ => None,
    }
}

fn required(params: &Map<String, Value>, key: &str) -> Result<String, AppError> {
    param(params, key).ok_or_else(|| AppError::Internal(format!("Missing parameter: {}", key)))
}

impl ProxyAction {
    pub fn parse(action: &str, params: &Map<String, Value>) -> Result<Self, AppError> {
        let action = match action {
            "getSpaces" => ProxyAction::GetSpaces,
            "getSpace" => ProxyAction::GetSpace {
                space_id: required(params, "spaceId")?,
            },
            "getStories" => ProxyAction::GetStories {
                space_id: required(params, "spaceId")?,
            },
            "getStory" => ProxyAction::GetStory {
                space_id: required(params, "spaceId")?,
                story_id: required(params, "storyId")?,
            },
            "searchStories" => ProxyAction::SearchStories {
                space_id: required(params, "spaceId")?,
                query: ["search", "per_page", "page"]
                    .into_iter()
                    .filter_map(|key| param(params, key).map(|v| (key.to_string(), v)))
                    .collect(),
            },
            "getComponents" => ProxyAction::GetComponents {
                space_id: required(params, "spaceId")?,
            },
            other => return Err(AppError::Internal(format!("Unknown action: {}", other))),
        };
        Ok(action)
    }

    /// Path segments relative to the management API base; ids stay single segments.
    pub fn path(&self) -> Vec<&str> {
        match self {
            ProxyAction::GetSpaces => vec!["spaces"],
            ProxyAction::GetSpace { space_id } => vec!["spaces", space_id.as_str()],
            ProxyAction::GetStories { space_id } | ProxyAction::SearchStories { space_id, .. } => {
                vec!["spaces", space_id.as_str(), "stories"]
            }
            ProxyAction::GetStory { space_id, story_id } => {
                vec!["spaces", space_id.as_str(), "stories", story_id.as_str()]
            }
            ProxyAction::GetComponents { space_id } => {
                vec!["spaces", space_id.as_str(), "components"]
            }
        }
    }

    pub fn query(&self) -> &[(String, String)] {
        match self {
            ProxyAction::SearchStories { query, .. } => query,
            _ => &[],
        }
    }
}

/// POST /storyblok-api - Forward a named read to the management API.
pub async fn storyblok_api(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ProxyFailure> {
    forward(&state, &body).await.map(Json).map_err(|e| {
        tracing::error!(error = %e, "Storyblok API function error");
        ProxyFailure(e)
    })
}

async fn forward(state: &AppState, body: &[u8]) -> Result<Value, AppError> {
    let request: ProxyRequest = parse_body(body)?;
    let action = ProxyAction::parse(&request.action, &request.params)?;
    state
        .cms_proxy
        .get_json(&action.path(), action.query())
        .await
}
