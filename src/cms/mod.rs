//! Storyblok management API client.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::Story;

/// Read access to the CMS management API.
#[async_trait]
pub trait CmsApi: Send + Sync {
    /// GET the resource under the API base named by `path`, one element per
    /// path segment, with the given query pairs.
    async fn get_json(&self, path: &[&str], query: &[(String, String)]) -> Result<Value, AppError>;

    /// Fetch the authoritative version of a story.
    async fn fetch_story(&self, space_id: &str, story_id: &str) -> Result<Story, AppError> {
        let mut data = self
            .get_json(&["spaces", space_id, "stories", story_id], &[])
            .await?;

        let story = data
            .get_mut("story")
            .map(Value::take)
            .ok_or_else(|| AppError::Parse("Storyblok API response has no story".into()))?;

        serde_json::from_value(story)
            .map_err(|e| AppError::Parse(format!("Invalid story payload: {}", e)))
    }
}

/// Storyblok client bound to one access token.
#[derive(Clone)]
pub struct StoryblokClient {
    http_client: Client,
    base_url: String,
    token: Option<String>,
    /// Env var named in the error when the token is missing
    token_name: &'static str,
}

impl StoryblokClient {
    pub fn new(
        http_client: Client,
        base_url: impl Into<String>,
        token: Option<String>,
        token_name: &'static str,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            token_name,
        }
    }

    /// Base URL with each element of `path` appended as one escaped segment.
    fn resource_url(&self, path: &[&str]) -> Result<Url, AppError> {
        if let Some(segment) = path.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(AppError::Internal(format!(
                "Invalid Storyblok path segment: {:?}",
                segment
            )));
        }

        let mut url = Url::parse(&self.base_url).map_err(|e| {
            AppError::Config(format!("Invalid Storyblok API URL {}: {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("Invalid Storyblok API URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(path);
        Ok(url)
    }
}

#[async_trait]
impl CmsApi for StoryblokClient {
    async fn get_json(&self, path: &[&str], query: &[(String, String)]) -> Result<Value, AppError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| AppError::Config(format!("{} not configured", self.token_name)))?;

        let url = self.resource_url(path)?;
        tracing::info!("Making Storyblok API call: GET {}", url);

        let mut request = self
            .http_client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, token)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(%status, %body, "Storyblok API error");
            return Err(AppError::Upstream(format!(
                "Storyblok API error: {} {}",
                status.as_u16(),
                body
            )));
        }

        let data: Value = response.json().await?;
        tracing::debug!(?path, "Storyblok API success");
        Ok(data)
    }
}
