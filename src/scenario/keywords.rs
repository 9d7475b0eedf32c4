use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref KEYWORD: Regex = Regex::new(r"\b[a-z]{3,}\b").expect("static regex");

    static ref STOPWORDS: HashSet<&'static str> = [
        "i", "a", "the", "to", "in", "at", "my", "me", "and", "for", "with",
        "of", "on", "is", "it", "an", "want", "need", "going", "will", "be",
        "have", "about", "that", "this", "how", "would", "can", "when", "do",
    ]
    .into_iter()
    .collect();
}


pub const DEFAULT_MAX_KEYWORDS: usize = 8;


/// Salient lowercase English words of three or more letters, in text order.
///
/// Words glued to accented letters ("camión") are skipped entirely.
pub fn extract_keywords(text: &str, max_keywords: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    KEYWORD
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|w| !STOPWORDS.contains(w))
        .take(max_keywords)
        .map(str::to_string)
        .collect()
}
