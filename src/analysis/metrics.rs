//! Readability, SEO, reading-time and summary scoring.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Average reading speed in words per minute.
const WORDS_PER_MINUTE: usize = 200;

/// Default summary length in characters.
pub const SUMMARY_MAX_LENGTH: usize = 200;

/// Flesch score for text with no sentences or no words.
const NEUTRAL_READABILITY: u32 = 50;

static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence boundary pattern is valid"));

/// Non-blank sentences, untrimmed.
fn sentences(content: &str) -> Vec<&str> {
    SENTENCE_BOUNDARY
        .split(content)
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// Number of whitespace-separated tokens.
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Count syllables in a word (simplified).
pub fn count_syllables(word: &str) -> u32 {
    let lower = word.to_lowercase();
    let mut count = 0u32;
    let mut previous_was_vowel = false;

    for c in lower.chars() {
        let is_vowel = "aeiouy".contains(c);
        if is_vowel && !previous_was_vowel {
            count += 1;
        }
        previous_was_vowel = is_vowel;
    }

    // Silent trailing 'e'
    if lower.ends_with('e') && count > 1 {
        count -= 1;
    }

    count.max(1)
}

/// Simplified Flesch Reading Ease, rounded and clamped to `0..=100`.
pub fn calculate_readability_score(content: &str) -> u32 {
    let sentence_count = sentences(content).len();
    let words: Vec<&str> = content.split_whitespace().collect();

    if sentence_count == 0 || words.is_empty() {
        return NEUTRAL_READABILITY;
    }

    let syllables: u32 = words.iter().map(|w| count_syllables(w)).sum();
    let avg_words_per_sentence = words.len() as f64 / sentence_count as f64;
    let avg_syllables_per_word = syllables as f64 / words.len() as f64;

    let score = 206.835 - 1.015 * avg_words_per_sentence - 84.6 * avg_syllables_per_word;

    score.round().clamp(0.0, 100.0) as u32
}

/// Additive SEO rubric, capped at 100.
pub fn calculate_seo_score(content: &str, title: &str) -> u32 {
    let mut score = 0u32;

    // 50-60 characters is the optimal title length
    let title_len = title.chars().count();
    score += if (50..=60).contains(&title_len) {
        20
    } else if (30..=70).contains(&title_len) {
        15
    } else {
        10
    };

    let words = word_count(content);
    score += if words >= 300 {
        20
    } else if words >= 150 {
        15
    } else {
        10
    };

    let density = title_keyword_density(content, title);
    score += if density > 0.3 {
        15
    } else if density > 0.2 {
        10
    } else {
        5
    };

    // Headings, lists, emphasis
    if content.contains('#') || content.contains('*') || content.contains('-') {
        score += 15;
    }

    let lower = content.to_lowercase();
    if lower.contains("meta") || lower.contains("description") {
        score += 10;
    }

    score.min(100)
}

/// Share of title words (longer than three characters) that also occur in the content.
fn title_keyword_density(content: &str, title: &str) -> f64 {
    let title_lower = title.to_lowercase();
    let title_words: Vec<&str> = title_lower.split_whitespace().collect();
    if title_words.is_empty() {
        return 0.0;
    }

    let content_lower = content.to_lowercase();
    let content_words: HashSet<&str> = content_lower.split_whitespace().collect();

    let matches = title_words
        .iter()
        .filter(|w| w.chars().count() > 3 && content_words.contains(*w))
        .count();

    matches as f64 / title_words.len() as f64
}

/// Whole minutes needed to read the content; empty content takes zero minutes.
pub fn estimate_read_time(content: &str) -> u32 {
    word_count(content).div_ceil(WORDS_PER_MINUTE) as u32
}

/// Leading sentences that fit in `max_length`, or a truncated prefix with `...`.
pub fn generate_summary(content: &str, max_length: usize) -> String {
    let mut summary = String::new();

    for sentence in sentences(content) {
        if summary.chars().count() + sentence.chars().count() > max_length {
            break;
        }
        summary.push_str(sentence.trim());
        summary.push_str(". ");
    }

    let summary = summary.trim();
    if summary.is_empty() {
        let prefix: String = content.chars().take(max_length).collect();
        format!("{}...", prefix)
    } else {
        summary.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syllables() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("water"), 2);
        assert_eq!(count_syllables("beautiful"), 3);
        // silent e
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("the"), 1);
        // y is a vowel; a word without vowels still has one syllable
        assert_eq!(count_syllables("rhythm"), 1);
        assert_eq!(count_syllables("ppp"), 1);
    }

    #[test]
    fn test_readability_degenerate_input() {
        assert_eq!(calculate_readability_score(""), 50);
        assert_eq!(calculate_readability_score("   "), 50);
        assert_eq!(calculate_readability_score("...!!"), 50);
    }

    #[test]
    fn test_readability_simple_text_scores_high() {
        // 6 words, 1 sentence, 6 syllables: 206.835 - 6.09 - 84.6 = 116.1 -> 100
        assert_eq!(calculate_readability_score("The cat sat on the mat."), 100);
    }

    #[test]
    fn test_readability_dense_text_clamped_to_zero() {
        let text = "Internationalization institutionalization characterization \
                    electroencephalography incomprehensibilities";
        assert_eq!(calculate_readability_score(text), 0);
    }

    #[test]
    fn test_read_time() {
        assert_eq!(estimate_read_time(""), 0);
        assert_eq!(estimate_read_time("one"), 1);
        assert_eq!(estimate_read_time(&"word ".repeat(200)), 1);
        assert_eq!(estimate_read_time(&"word ".repeat(201)), 2);
    }

    #[test]
    fn test_summary_empty_falls_back() {
        assert_eq!(generate_summary("", SUMMARY_MAX_LENGTH), "...");
    }

    #[test]
    fn test_summary_takes_whole_sentences() {
        let text = "First sentence here. Second one! Third?";
        assert_eq!(
            generate_summary(text, SUMMARY_MAX_LENGTH),
            "First sentence here. Second one. Third."
        );
        assert_eq!(generate_summary(text, 25), "First sentence here.");
    }

    #[test]
    fn test_summary_long_first_sentence_truncates() {
        let text = "a".repeat(300);
        let summary = generate_summary(&text, 200);
        assert_eq!(summary.len(), 203);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn test_summary_handles_multibyte_text() {
        let text = "ü".repeat(250);
        let summary = generate_summary(&text, 200);
        assert_eq!(summary.chars().count(), 203);
    }

    #[test]
    fn test_seo_minimum_rubric() {
        // short title (+10), few words (+10), no density (+5)
        assert_eq!(calculate_seo_score("", ""), 25);
    }

    #[test]
    fn test_seo_maximum_rubric() {
        let title = "Headless content modelling with Storyblok components";
        assert_eq!(title.chars().count(), 52);
        let body = format!(
            "# Meta description\n{}",
            "headless content modelling with storyblok components ".repeat(60)
        );
        assert_eq!(calculate_seo_score(&body, title), 80);
    }
}
