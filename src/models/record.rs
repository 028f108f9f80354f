//! Search index record model.

use serde::{Deserialize, Serialize};

use super::{Complexity, ContentAnalysis, Sentiment};

/// Searchable copy of a published story, keyed by `objectID`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexRecord {
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub title: String,
    pub content_text: String,
    pub slug: String,
    pub tags: Vec<String>,
    pub image: String,
    pub published_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub content_type: String,
    #[serde(rename = "_ai_analysis_fields")]
    pub ai_analysis_fields: AiAnalysisFields,
}

/// Analysis block nested in every record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysisFields {
    pub title: String,
    pub text: String,
    pub tags: Vec<String>,
    pub summary: String,
    pub key_topics: Vec<String>,
    pub sentiment: Sentiment,
    pub complexity: Complexity,
    pub entities: Vec<String>,
    pub readability_score: u32,
    pub seo_score: u32,
    pub estimated_read_time: u32,
    pub word_count: usize,
}

impl AiAnalysisFields {
    pub fn new(title: &str, text: &str, tags: Vec<String>, analysis: ContentAnalysis) -> Self {
        Self {
            title: title.to_string(),
            text: text.to_string(),
            tags,
            summary: analysis.summary,
            key_topics: analysis.key_topics,
            sentiment: analysis.sentiment,
            complexity: analysis.complexity,
            entities: analysis.entities,
            readability_score: analysis.readability_score,
            seo_score: analysis.seo_score,
            estimated_read_time: analysis.estimated_read_time,
            word_count: analysis.word_count,
        }
    }
}

/// What the dispatcher sends to the index.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncPayload {
    /// Full record for an upsert.
    Record(Box<IndexRecord>),
    /// Bare key for a delete.
    ObjectId(String),
}

impl SyncPayload {
    pub fn object_id(&self) -> &str {
        match self {
            SyncPayload::Record(record) => &record.object_id,
            SyncPayload::ObjectId(id) => id,
        }
    }
}

impl From<IndexRecord> for SyncPayload {
    fn from(record: IndexRecord) -> Self {
        SyncPayload::Record(Box::new(record))
    }
}
