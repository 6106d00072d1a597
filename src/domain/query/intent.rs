/// Phrases answered with a canned reply, matched against the whole query
const GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "hi there",
    "hello there",
    "good morning",
    "good afternoon",
    "good evening",
];

/// Whole-query match against the greeting list, ignoring case and trailing punctuation
pub fn is_greeting(query: &str) -> bool {
    let normalized = query
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_punctuation())
        .trim()
        .to_lowercase();

    GREETINGS.contains(&normalized.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greetings() {
        assert!(is_greeting("hi"));
        assert!(is_greeting("Hello"));
        assert!(is_greeting("  hey!  "));
        assert!(is_greeting("Good Morning."));
    }

    #[test]
    fn test_greeting_must_be_whole_query() {
        assert!(!is_greeting("hi, what was the gold price in 2023?"));
        assert!(!is_greeting("hello world"));
        assert!(!is_greeting(""));
    }
}
