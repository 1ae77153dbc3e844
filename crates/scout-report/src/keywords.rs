//! Keyword extraction for free-text area and task queries.

/// Filler words that carry no signal about which files a task touches.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "to", "for", "in", "on", "at", "add", "create", "update", "fix",
    "implement", "new", "and", "or", "is", "are", "was", "were",
];

/// Split a query into lowercase keywords, dropping stop words and words of
/// two characters or fewer.
///
/// # Examples
///
/// ```
/// use scout_report::keywords::extract_keywords;
///
/// let words = extract_keywords("fix the payment retry bug");
/// assert_eq!(words, vec!["payment", "retry", "bug"]);
/// ```
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split_whitespace()
        .map(|word| word.trim_matches(|c| ",.!?".contains(c)))
        .filter(|word| word.len() > 2 && !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_words_and_short_words_are_dropped() {
        assert_eq!(
            extract_keywords("add a new auth token"),
            vec!["auth", "token"]
        );
        assert!(extract_keywords("fix the a an to").is_empty());
    }

    #[test]
    fn punctuation_is_stripped() {
        assert_eq!(extract_keywords("payments, refunds!"), vec!["payments", "refunds"]);
    }

    #[test]
    fn keywords_are_lowercased() {
        assert_eq!(extract_keywords("Authentication Flow"), vec!["authentication", "flow"]);
    }
}
