//! Verifier verdicts
//!
//! Parsing is fail-closed: anything the model says outside the expected
//! vocabulary is treated as [`Verdict::Fail`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// How well an answer is supported by its evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Strong,
    Weak,
    Fail,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strong => "STRONG",
            Self::Weak => "WEAK",
            Self::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token set the verifier model is asked to answer with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictVocabulary {
    /// STRONG / WEAK / FAIL
    #[default]
    Graded,
    /// YES / NO
    Binary,
}

impl VerdictVocabulary {
    /// Tokens listed in the verifier prompt
    pub fn tokens(&self) -> &'static [&'static str] {
        match self {
            Self::Graded => &["STRONG", "WEAK", "FAIL"],
            Self::Binary => &["YES", "NO"],
        }
    }

    /// Parse the first word of a model reply; unknown tokens fail closed
    pub fn parse(&self, raw: &str) -> Verdict {
        let token: String = raw
            .trim_start_matches(|c: char| !c.is_alphabetic())
            .chars()
            .take_while(|c| c.is_alphabetic())
            .collect::<String>()
            .to_uppercase();

        match (self, token.as_str()) {
            (Self::Graded, "STRONG") => Verdict::Strong,
            (Self::Graded, "WEAK") => Verdict::Weak,
            (Self::Binary, "YES") => Verdict::Strong,
            _ => Verdict::Fail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graded_vocabulary() {
        let vocab = VerdictVocabulary::Graded;
        assert_eq!(vocab.parse("STRONG"), Verdict::Strong);
        assert_eq!(vocab.parse("  weak\n"), Verdict::Weak);
        assert_eq!(vocab.parse("**Strong**. The evidence states it."), Verdict::Strong);
        assert_eq!(vocab.parse("FAIL"), Verdict::Fail);
    }

    #[test]
    fn test_binary_vocabulary() {
        let vocab = VerdictVocabulary::Binary;
        assert_eq!(vocab.parse("YES"), Verdict::Strong);
        assert_eq!(vocab.parse("no"), Verdict::Fail);
    }

    #[test]
    fn test_out_of_vocabulary_fails_closed() {
        assert_eq!(VerdictVocabulary::Graded.parse("MAYBE"), Verdict::Fail);
        assert_eq!(VerdictVocabulary::Graded.parse("YES"), Verdict::Fail);
        assert_eq!(VerdictVocabulary::Binary.parse("STRONG"), Verdict::Fail);
        assert_eq!(VerdictVocabulary::Graded.parse(""), Verdict::Fail);
        assert_eq!(VerdictVocabulary::Graded.parse("STRONGLY supported"), Verdict::Fail);
    }

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&Verdict::Weak).unwrap(), "\"WEAK\"");
        let vocab: VerdictVocabulary = serde_json::from_str("\"binary\"").unwrap();
        assert_eq!(vocab, VerdictVocabulary::Binary);
    }
}
