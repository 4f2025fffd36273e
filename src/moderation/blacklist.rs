//! Blacklist matcher.
//!
//! Compiles the forbidden-word list into a single regex once at startup.
//! A word counts as present only as a whole word: preceded by start of
//! text or whitespace, followed by end of text, whitespace, or one of
//! `, . ! ?`. Comparison is case-insensitive.

use std::fs;

use regex::Regex;
use tracing::info;

use crate::error::ModerationError;

/// Read the blocklist file: one word per line, blanks skipped.
pub fn load_blocklist(path: &str) -> Result<Vec<String>, ModerationError> {
    info!("Reading blocklist from {}", path);
    let raw = fs::read_to_string(path).map_err(|e| {
        ModerationError::Configuration(format!("cannot read blocklist file {}: {}", path, e))
    })?;

    let words = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    Ok(words)
}

/// Whole-word matcher over the loaded word list.
///
/// Built once and shared; evaluation is read-only and safe to run from
/// concurrent handlers.
#[derive(Debug)]
pub struct Blacklist {
    pattern: Regex,
    word_count: usize,
}

impl Blacklist {
    /// Compile the word list into a matcher.
    ///
    /// Fails with a configuration error on an empty list or on a token
    /// that corrupts the combined pattern, so a broken blocklist is
    /// caught before the first message arrives.
    pub fn from_words(words: &[String]) -> Result<Self, ModerationError> {
        if words.is_empty() {
            return Err(ModerationError::Configuration(
                "the blocklist is empty, refusing to moderate with no words".to_string(),
            ));
        }

        let alternation = words.join("|");
        let pattern = format!(r"(?i)(?:^|\s)(?:{})(?:$|\s|[,.!?])", alternation);

        let pattern = Regex::new(&pattern).map_err(|e| {
            ModerationError::Configuration(format!(
                "blocklist does not compile into a matcher: {}",
                e
            ))
        })?;

        Ok(Self {
            pattern,
            word_count: words.len(),
        })
    }

    /// Whether the text contains any forbidden word.
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Number of words the matcher was built from.
    pub fn word_count(&self) -> usize {
        self.word_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blacklist(words: &[&str]) -> Blacklist {
        let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        Blacklist::from_words(&words).unwrap()
    }

    #[test]
    fn matches_whole_word() {
        let bl = blacklist(&["spam"]);
        assert!(bl.matches("this is spam"));
    }

    #[test]
    fn rejects_substring_of_larger_word() {
        let bl = blacklist(&["spam"]);
        assert!(!bl.matches("spammer"));
        assert!(!bl.matches("antispam"));
    }

    #[test]
    fn case_insensitive_with_punctuation_boundary() {
        let bl = blacklist(&["spam"]);
        assert!(bl.matches("SPAM!"));
        assert!(bl.matches("Spam, again"));
        assert!(bl.matches("was that spam?"));
    }

    #[test]
    fn word_at_start_and_end_of_text() {
        let bl = blacklist(&["spam"]);
        assert!(bl.matches("spam is everywhere"));
        assert!(bl.matches("everywhere is spam"));
    }

    #[test]
    fn any_word_of_the_list_matches() {
        let bl = blacklist(&["spam", "scam"]);
        assert!(bl.matches("such a scam"));
        assert!(bl.matches("such a spam"));
        assert!(!bl.matches("such a sham"));
    }

    #[test]
    fn other_punctuation_is_not_a_leading_boundary() {
        // Only start of text or whitespace may precede the word
        let bl = blacklist(&["spam"]);
        assert!(!bl.matches("foo,spam bar"));
    }

    #[test]
    fn empty_list_is_a_configuration_error() {
        let err = Blacklist::from_words(&[]).unwrap_err();
        assert!(matches!(err, ModerationError::Configuration(_)));
    }

    #[test]
    fn broken_token_fails_at_construction() {
        let words = vec!["ba(".to_string()];
        let err = Blacklist::from_words(&words).unwrap_err();
        assert!(matches!(err, ModerationError::Configuration(_)));
    }
}
