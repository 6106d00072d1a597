use once_cell::sync::Lazy;
use regex::Regex;

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "can", "did", "do", "does", "for", "from",
    "how", "in", "is", "it", "me", "much", "of", "on", "or", "show", "tell", "that", "the",
    "there", "this", "to", "was", "what", "when", "where", "which", "who", "why", "with", "you",
];

/// Lowercase word tokens of a query, excluding pure numbers, single characters and stop words
pub fn extract_keywords(query: &str) -> Vec<String> {
    let lower = query.to_lowercase();
    let mut keywords: Vec<String> = Vec::new();

    for token in WORD_PATTERN.find_iter(&lower).map(|m| m.as_str()) {
        if token.chars().count() < 2
            || token.chars().all(|c| c.is_ascii_digit())
            || STOP_WORDS.contains(&token)
        {
            continue;
        }

        if !keywords.iter().any(|k| k == token) {
            keywords.push(token.to_string());
        }
    }

    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_keywords() {
        assert_eq!(
            extract_keywords("What was the Gold price in 2023?"),
            vec!["gold", "price"]
        );
    }

    #[test]
    fn test_duplicates_removed() {
        assert_eq!(extract_keywords("gold gold GOLD"), vec!["gold"]);
    }

    #[test]
    fn test_only_stop_words_and_numbers() {
        assert!(extract_keywords("what is 42").is_empty());
        assert!(extract_keywords("").is_empty());
    }
}
