//! Auto-naming heuristic for uploaded content
//!
//! Pulls one or two meaningful words out of the beginning of the uploaded
//! text so a fresh project gets a better label than "Untitled".

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::models::DEFAULT_PROJECT_NAME;

/// Common words that never make a good project name
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
        "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "shall",
        "can", "need", "dare", "ought", "used", "to", "of", "in", "for", "on", "with", "at", "by",
        "from", "as", "into", "through", "during", "before", "after", "above", "below", "between",
        "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
        "how", "all", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
        "only", "own", "same", "so", "than", "too", "very", "s", "t", "just", "don", "now", "and",
        "but", "or", "because", "until", "while", "this", "that", "these", "those", "am", "it",
        "its", "itself", "they", "them", "their", "what", "which", "who", "whom", "about", "also",
        "we", "you", "he", "she",
    ]
    .into_iter()
    .collect()
});

static NON_ALPHA: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z\s]").expect("valid regex"));

/// Suggest a project name from uploaded content.
///
/// Looks at the first 500 characters, keeps words longer than three letters
/// that are not stopwords, and returns the first one or two of them
/// capitalized. Returns "Untitled" when nothing qualifies.
pub fn suggest_project_name(content: &str) -> String {
    let head: String = content.chars().take(500).collect();
    let head = head.to_lowercase();
    let cleaned = NON_ALPHA.replace_all(&head, " ");

    let words: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|w| w.len() > 3 && !STOP_WORDS.contains(w))
        .collect();

    match words.as_slice() {
        [] => DEFAULT_PROJECT_NAME.to_string(),
        [first] => capitalize(first),
        [first, second, ..] => format!("{} {}", capitalize(first), capitalize(second)),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_meaningful_words() {
        let name = suggest_project_name(
            "The history of quantum computing is a fascinating subject to explore.",
        );
        assert_eq!(name, "History Quantum");
    }

    #[test]
    fn test_single_meaningful_word() {
        assert_eq!(suggest_project_name("The archaeology!"), "Archaeology");
    }

    #[test]
    fn test_stopwords_and_short_words_only() {
        assert_eq!(suggest_project_name("it is the and a to we you"), "Untitled");
        assert_eq!(suggest_project_name(""), "Untitled");
        assert_eq!(suggest_project_name("cat dog owl"), "Untitled");
    }

    #[test]
    fn test_punctuation_and_digits_are_stripped() {
        assert_eq!(
            suggest_project_name("2024: neural-networks, explained!"),
            "Neural Networks"
        );
    }

    #[test]
    fn test_only_looks_at_the_head_of_the_content() {
        let mut content = "the ".repeat(200);
        content.push_str("blockchain fundamentals");
        assert_eq!(suggest_project_name(&content), "Untitled");
    }
}
