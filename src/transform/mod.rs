//! Content transformer.
//!
//! Converts a CMS story into the record stored in the search index.

mod analyzer;

pub use analyzer::*;

use serde_json::Value;

use crate::analysis::dedupe;
use crate::models::{AiAnalysisFields, IndexRecord, Story};

/// Content type used when a story has no component name.
pub const DEFAULT_CONTENT_TYPE: &str = "article";

/// Flatten a rich-text tree into space-separated plain text.
///
/// Only the node's `content` children are visited: a child with non-empty `text`
/// contributes it, a child with nested `content` is flattened recursively, anything
/// else contributes nothing.
pub fn rich_text_to_plain(node: &Value) -> String {
    let Some(children) = node.get("content").and_then(Value::as_array) else {
        return String::new();
    };

    let parts: Vec<String> = children
        .iter()
        .map(|child| match child.get("text").and_then(Value::as_str) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ if child.get("content").is_some() => rich_text_to_plain(child),
            _ => String::new(),
        })
        .collect();

    collapse_whitespace(&parts.join(" "))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The rich-text body of a story: `long_text`, else `content`.
pub fn body_field(content: &Value) -> Option<&Value> {
    let truthy = |v: &&Value| !v.is_null() && v.as_str() != Some("");
    content
        .get("long_text")
        .filter(truthy)
        .or_else(|| content.get("content").filter(truthy))
}

/// `featured_image.filename`, else `image.filename`, else empty.
pub fn image_url(content: &Value) -> String {
    ["featured_image", "image"]
        .iter()
        .filter_map(|field| {
            content
                .get(field)
                .and_then(|image| image.get("filename"))
                .and_then(Value::as_str)
        })
        .find(|filename| !filename.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Component name of the story's root block.
pub fn component_type(content: &Value) -> String {
    content
        .get("component")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string()
}

/// Tags authored on the story itself.
fn story_tags(content: &Value) -> Vec<String> {
    content
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Build the index record for a story, analyzing its body with `analyzer`.
pub async fn transform_story(story: &Story, analyzer: &dyn ContentAnalyzer) -> IndexRecord {
    let content = story.content.clone().unwrap_or(Value::Null);
    let content_text = body_field(&content)
        .map(rich_text_to_plain)
        .unwrap_or_default();

    let analysis = analyzer.analyze(&content_text, &story.name).await;

    let content_type = component_type(&content);
    let mut tags = story_tags(&content);
    tags.extend(analysis.key_topics.iter().cloned());
    tags.push(content_type.clone());
    let tags = dedupe(tags);

    tracing::debug!(
        story_id = %story.id,
        words = analysis.word_count,
        topics = analysis.key_topics.len(),
        sentiment = analysis.sentiment.as_str(),
        "Transformed story"
    );

    IndexRecord {
        object_id: story.id.clone(),
        title: story.name.clone(),
        slug: story.slug.clone(),
        image: image_url(&content),
        published_at: story.published_at.clone(),
        created_at: story.created_at.clone(),
        updated_at: story.updated_at.clone(),
        content_type,
        ai_analysis_fields: AiAnalysisFields::new(&story.name, &content_text, tags.clone(), analysis),
        content_text,
        tags,
    }
}
