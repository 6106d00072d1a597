use once_cell::sync::Lazy;
use regex::Regex;

/// Digits, currency symbols, percent signs or unit words
static NUMERIC_QUERY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\d|[₹$€£%]|\b(lakh|lakhs|crore|crores|percent|inr|usd|eur|kg|kilogram|kilograms|gram|grams|tonnes?)\b",
    )
    .unwrap()
});

/// Whether a query asks for a number and should take the numeric extraction path
pub fn is_numeric_query(query: &str) -> bool {
    NUMERIC_QUERY_PATTERN.is_match(query)
}

/// Reduce a model reply to a single value line
///
/// Returns `None` unless the first non-empty line contains a digit.
pub fn normalize_numeric_answer(raw: &str) -> Option<String> {
    let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;

    let cleaned = line
        .trim_matches(|c: char| c == '*' || c == '`' || c == '"' || c == '\'')
        .trim()
        .trim_end_matches('.')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if cleaned.chars().any(|c| c.is_ascii_digit()) {
        Some(cleaned)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_queries() {
        assert!(is_numeric_query("gold price on 2024-01-05"));
        assert!(is_numeric_query("price in ₹ for silver"));
        assert!(is_numeric_query("how many crore was raised"));
        assert!(is_numeric_query("what percent grew"));
    }

    #[test]
    fn test_non_numeric_queries() {
        assert!(!is_numeric_query("who is the supplier for gold"));
        assert!(!is_numeric_query("describe the dataset"));
    }

    #[test]
    fn test_normalize_numeric_answer() {
        assert_eq!(
            normalize_numeric_answer("**62,450 INR**\nper 10 grams"),
            Some("62,450 INR".to_string())
        );
        assert_eq!(
            normalize_numeric_answer("  \n  74000   INR per kg.  "),
            Some("74000 INR per kg".to_string())
        );
    }

    #[test]
    fn test_normalize_rejects_text_without_digits() {
        assert_eq!(normalize_numeric_answer("Not available"), None);
        assert_eq!(normalize_numeric_answer(""), None);
    }
}
