use crate::constants::{MAX_KEYWORD_LABELS, MIN_KEYWORD_LEN};

use super::category::NEGATIVE_LABELS;

/// Filler words that never make useful visual labels.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "are", "was", "were", "been", "being", "have", "has", "had",
    "does", "did", "will", "would", "could", "should", "may", "might", "must", "can", "from",
    "into", "onto", "through", "during", "before", "after", "above", "below", "between", "under",
    "again", "then", "once", "here", "there", "when", "where", "why", "how", "all", "each", "few",
    "more", "most", "other", "some", "such", "nor", "not", "only", "own", "same", "than", "too",
    "very", "just", "but", "because", "until", "while", "what", "which", "who", "whom", "this",
    "that", "these", "those", "its", "our", "your", "their", "they", "them", "please",
    "near", "next", "also", "any", "about", "since", "still", "really",
];

/// Extracts up to [`MAX_KEYWORD_LABELS`] keywords from a free-text description.
///
/// Lower-cases, blanks out punctuation, splits on whitespace, then drops short tokens,
/// stop words, repeats, and anything that collides with a negative label. Order of first
/// appearance is kept.
pub fn extract_keywords(description: &str) -> Vec<String> {
    let cleaned: String = description
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let mut keywords: Vec<String> = Vec::with_capacity(MAX_KEYWORD_LABELS);
    for token in cleaned.split_whitespace() {
        if keywords.len() == MAX_KEYWORD_LABELS {
            break;
        }
        if token.chars().count() < MIN_KEYWORD_LEN
            || STOP_WORDS.contains(&token)
            || NEGATIVE_LABELS.contains(&token)
            || keywords.iter().any(|k| k == token)
        {
            continue;
        }
        keywords.push(token.to_string());
    }
    keywords
}
