//! Entity extractor.
//!
//! Deterministic keyword heuristics that turn a title and a block of plain text
//! into topics, entities, tags, sentiment, complexity and scoring metadata. Every
//! function accepts any string, including the empty one.

mod keywords;
mod metrics;

pub use metrics::{
    calculate_readability_score, calculate_seo_score, estimate_read_time,
    generate_summary, word_count, SUMMARY_MAX_LENGTH,
};

use std::collections::HashSet;

use crate::models::{Complexity, ContentAnalysis, Sentiment};
use keywords::*;

/// Lowercased `title content`, the haystack for substring heuristics.
fn haystack(content: &str, title: &str) -> String {
    format!("{} {}", title, content).to_lowercase()
}

/// Plurality vote of positive against negative tokens.
pub fn analyze_sentiment(content: &str) -> Sentiment {
    let lower = content.to_lowercase();
    let (mut positive, mut negative) = (0usize, 0usize);

    for word in lower.split_whitespace() {
        if POSITIVE_WORDS.contains(&word) {
            positive += 1;
        }
        if NEGATIVE_WORDS.contains(&word) {
            negative += 1;
        }
    }

    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

/// Beginner phrases against advanced phrases; each phrase counts at most once.
pub fn determine_complexity(content: &str, title: &str) -> Complexity {
    let text = haystack(content, title);
    let beginner = BEGINNER_PHRASES.iter().filter(|p| text.contains(**p)).count();
    let advanced = ADVANCED_PHRASES.iter().filter(|p| text.contains(**p)).count();

    match beginner.cmp(&advanced) {
        std::cmp::Ordering::Greater => Complexity::Beginner,
        std::cmp::Ordering::Less => Complexity::Advanced,
        std::cmp::Ordering::Equal => Complexity::Intermediate,
    }
}

/// Topic categories whose keywords occur in the text, in category order.
pub fn extract_key_topics(content: &str, title: &str) -> Vec<String> {
    let text = haystack(content, title);
    TOPIC_KEYWORDS
        .iter()
        .filter(|(_, triggers)| triggers.iter().any(|k| text.contains(k)))
        .map(|(topic, _)| topic.to_string())
        .collect()
}

/// Known technology and brand names mentioned in the text, in list order.
pub fn extract_entities(content: &str, title: &str) -> Vec<String> {
    let text = haystack(content, title);
    KNOWN_ENTITIES
        .iter()
        .filter(|entity| text.contains(&entity.to_lowercase()))
        .map(|entity| entity.to_string())
        .collect()
}

/// Topics plus content-type, technology and complexity tags, without duplicates.
pub fn generate_tags(content: &str, title: &str, topics: &[String]) -> Vec<String> {
    let text = haystack(content, title);
    let mut tags: Vec<String> = topics.to_vec();

    for (tag, triggers) in CONTENT_TYPE_TAGS.iter().chain(TECHNOLOGY_TAGS) {
        if triggers.iter().any(|t| text.contains(t)) {
            tags.push(tag.to_string());
        }
    }

    tags.push(determine_complexity(content, title).as_str().to_string());

    dedupe(tags)
}

/// Drop repeated entries, keeping the first occurrence.
pub fn dedupe(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Run every heuristic over one document.
pub fn analyze(content: &str, title: &str) -> ContentAnalysis {
    let key_topics = extract_key_topics(content, title);
    let tags = generate_tags(content, title, &key_topics);

    ContentAnalysis {
        summary: generate_summary(content, SUMMARY_MAX_LENGTH),
        entities: extract_entities(content, title),
        sentiment: analyze_sentiment(content),
        complexity: determine_complexity(content, title),
        readability_score: calculate_readability_score(content),
        seo_score: calculate_seo_score(content, title),
        estimated_read_time: estimate_read_time(content),
        word_count: word_count(content),
        key_topics,
        tags,
    }
}
