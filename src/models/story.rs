//! CMS story and webhook event models matching the Storyblok payloads.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Lifecycle event delivered by the CMS webhook.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WebhookAction {
    Published,
    Unpublished,
    Deleted,
}

impl WebhookAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookAction::Published => "published",
            WebhookAction::Unpublished => "unpublished",
            WebhookAction::Deleted => "deleted",
        }
    }

    /// Whether the event removes the story from the index.
    pub fn is_removal(&self) -> bool {
        matches!(self, WebhookAction::Unpublished | WebhookAction::Deleted)
    }
}

impl std::fmt::Display for WebhookAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inbound webhook body.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    pub action: WebhookAction,
    #[serde(deserialize_with = "id_as_string")]
    pub story_id: String,
    #[serde(deserialize_with = "id_as_string")]
    pub space_id: String,
    /// Snapshot sent along with the event; the pipeline re-fetches instead.
    #[serde(default)]
    pub story: Option<Value>,
}

/// A story as returned by the CMS management API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Story {
    /// Whether the story carries a non-empty content tree.
    pub fn has_content(&self) -> bool {
        match &self.content {
            None | Some(Value::Null) => false,
            Some(Value::Object(map)) => !map.is_empty(),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(_) => true,
        }
    }

    /// Whether the story should be mirrored into the index.
    pub fn is_indexable(&self) -> bool {
        self.published && self.has_content()
    }
}

/// Accept ids sent either as JSON numbers or strings.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}
