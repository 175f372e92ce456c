//! Deterministic text metrics for listings
//!
//! Word count and a coarse reading-level bucket, computed locally so the
//! verdict never depends on what the producer claims about the text.
//!
//! The reading level is a fixed heuristic (average sentence length and
//! average word length against two threshold pairs), not a readability
//! formula. Sentences are period-delimited segments; words are
//! whitespace-delimited tokens and their length is counted in characters.

use std::fmt;

use crate::constants::reading_level as rl;

/// Coarse reading-level bucket, ordered from easiest to hardest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReadingLevel {
    Grade8OrBelow,
    Grade10To12,
    Grade12Plus,
}

impl ReadingLevel {
    /// First match wins: advanced thresholds are checked before intermediate ones
    pub fn classify(avg_sentence_len: f64, avg_word_len: f64) -> Self {
        if avg_sentence_len > rl::ADVANCED_SENTENCE_LEN || avg_word_len > rl::ADVANCED_WORD_LEN {
            ReadingLevel::Grade12Plus
        } else if avg_sentence_len > rl::INTERMEDIATE_SENTENCE_LEN
            || avg_word_len > rl::INTERMEDIATE_WORD_LEN
        {
            ReadingLevel::Grade10To12
        } else {
            ReadingLevel::Grade8OrBelow
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingLevel::Grade8OrBelow => rl::GRADE_8_OR_BELOW,
            ReadingLevel::Grade10To12 => rl::GRADE_10_12,
            ReadingLevel::Grade12Plus => rl::GRADE_12_PLUS,
        }
    }
}

impl fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metrics snapshot for a piece of listing text
#[derive(Debug, Clone, PartialEq)]
pub struct TextMetrics {
    pub word_count: usize,
    /// Period-delimited segments that contain something besides whitespace
    pub sentence_count: usize,
    /// Total characters across all words
    pub word_chars: usize,
}

impl TextMetrics {
    pub fn compute(text: &str) -> Self {
        let (word_count, word_chars) = text
            .split_whitespace()
            .fold((0usize, 0usize), |(count, chars), word| {
                (count + 1, chars + word.chars().count())
            });

        let sentence_count = text.split('.').filter(|s| !s.trim().is_empty()).count();

        Self {
            word_count,
            sentence_count,
            word_chars,
        }
    }

    /// Average words per sentence, `None` when there are no sentences or words
    pub fn avg_sentence_len(&self) -> Option<f64> {
        (self.sentence_count > 0 && self.word_count > 0)
            .then(|| self.word_count as f64 / self.sentence_count as f64)
    }

    /// Average characters per word, `None` when there are no words
    pub fn avg_word_len(&self) -> Option<f64> {
        (self.word_count > 0).then(|| self.word_chars as f64 / self.word_count as f64)
    }

    /// `None` means the level cannot be estimated
    pub fn reading_level(&self) -> Option<ReadingLevel> {
        let avg_sentence = self.avg_sentence_len()?;
        let avg_word = self.avg_word_len()?;
        Some(ReadingLevel::classify(avg_sentence, avg_word))
    }
}

/// Count of whitespace-delimited tokens
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Reading-level label, or "Unknown" when the text has no sentences or no words
pub fn estimate_reading_level(text: &str) -> String {
    TextMetrics::compute(text)
        .reading_level()
        .map(|level| level.as_str().to_string())
        .unwrap_or_else(|| rl::UNKNOWN.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t "), 0);
        assert_eq!(word_count("one"), 1);
        assert_eq!(word_count("  Get 0% APR\tfor\n12 months!  "), 6);
        assert_eq!(
            word_count("Get 0% APR for 12 months! Apply now and enjoy amazing rewards!"),
            12
        );
    }

    #[test]
    fn test_unknown_without_words_or_sentences() {
        assert_eq!(estimate_reading_level(""), "Unknown");
        assert_eq!(estimate_reading_level("   "), "Unknown");
        // Words exist but every period-delimited segment is empty
        assert_eq!(estimate_reading_level("..."), "Unknown");
        assert_eq!(estimate_reading_level(" . . "), "Unknown");
    }

    #[test]
    fn test_short_plain_text() {
        // 12 words, 1 sentence, short words
        assert_eq!(
            estimate_reading_level("Get 0% APR for 12 months! Apply now and enjoy amazing rewards!"),
            "Grade 8 or below"
        );
        assert_eq!(estimate_reading_level("No annual fee. Earn cash back."), "Grade 8 or below");
    }

    #[test]
    fn test_long_words_are_advanced() {
        // average word length well above six characters
        assert_eq!(
            estimate_reading_level("Comprehensive creditworthiness documentation requirements."),
            "Grade 12+"
        );
    }

    #[test]
    fn test_intermediate_word_length() {
        // 4 words, 24 chars: average 6.0 is not above the advanced threshold
        let metrics = TextMetrics::compute("Annual balance fees waived.");
        assert_eq!(metrics.word_count, 4);
        assert_eq!(metrics.sentence_count, 1);
        assert_eq!(metrics.reading_level(), Some(ReadingLevel::Grade10To12));
    }

    #[test]
    fn test_long_sentence_is_advanced() {
        let sentence = vec!["card"; 21].join(" ");
        assert_eq!(estimate_reading_level(&sentence), "Grade 12+");

        let medium = vec!["card"; 16].join(" ");
        assert_eq!(estimate_reading_level(&medium), "Grade 10-12");

        let boundary = vec!["card"; 15].join(" ");
        assert_eq!(estimate_reading_level(&boundary), "Grade 8 or below");
    }

    #[test]
    fn test_word_length_counts_characters() {
        // "é" is one character but two bytes
        let metrics = TextMetrics::compute("café");
        assert_eq!(metrics.word_chars, 4);
    }

    #[test]
    fn test_text_without_period_is_one_sentence() {
        let metrics = TextMetrics::compute("Apply today");
        assert_eq!(metrics.sentence_count, 1);
        assert_eq!(metrics.reading_level(), Some(ReadingLevel::Grade8OrBelow));
    }

    proptest! {
        #[test]
        fn prop_word_count_matches_tokens(
            words in prop::collection::vec("[A-Za-z0-9%$!,]{1,12}", 0..40),
            seps in prop::collection::vec(prop::sample::select(vec![" ", "  ", "\t", "\n", " \r\n "]), 40),
        ) {
            let mut text = String::from(seps[0]);
            for (word, sep) in words.iter().zip(seps.iter().cycle().skip(1)) {
                text.push_str(word);
                text.push_str(sep);
            }
            prop_assert_eq!(word_count(&text), words.len());
            prop_assert_eq!(TextMetrics::compute(&text).word_count, words.len());
        }

        #[test]
        fn prop_classification_is_monotonic(
            sentence_len in 0.0f64..40.0,
            word_len in 0.0f64..12.0,
            d_sentence in 0.0f64..20.0,
            d_word in 0.0f64..6.0,
        ) {
            let base = ReadingLevel::classify(sentence_len, word_len);
            prop_assert!(ReadingLevel::classify(sentence_len + d_sentence, word_len) >= base);
            prop_assert!(ReadingLevel::classify(sentence_len, word_len + d_word) >= base);
            prop_assert!(
                ReadingLevel::classify(sentence_len + d_sentence, word_len + d_word) >= base
            );
        }

        #[test]
        fn prop_periodless_or_empty_never_panics(text in "\\PC{0,200}") {
            let level = estimate_reading_level(&text);
            prop_assert!(!level.is_empty());
        }
    }
}
