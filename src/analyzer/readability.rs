//! Flesch reading-ease calculation

use super::clean::is_too_short;
use crate::nlp::syllables;
use crate::{Readability, ReadingLevel, TextStats};

/// Scores below this produce the "simplify" suggestion
pub const READABILITY_TARGET: f64 = 60.0;

const BASE: f64 = 206.835;
const SENTENCE_LENGTH_WEIGHT: f64 = 1.015;
const SYLLABLE_WEIGHT: f64 = 84.6;

/// Word, sentence and syllable counts of cleaned text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadabilityCounts {
    pub words: usize,
    pub sentences: usize,
    pub syllables: usize,
}

impl ReadabilityCounts {
    /// Sentences are the non-empty fragments between `.`, `!` and `?`;
    /// whitespace-only fragments still count.
    pub fn from_cleaned(cleaned: &str) -> Self {
        let sentences = cleaned
            .split(['.', '!', '?'])
            .filter(|s| !s.is_empty())
            .count();
        Self {
            words: cleaned.split_whitespace().count(),
            sentences,
            syllables: syllables::count_text(cleaned),
        }
    }
}

/// Calculator for reading-ease scores
pub struct ReadabilityCalculator;

impl ReadabilityCalculator {
    /// `206.835 - 1.015 * words/sentences - 84.6 * syllables/words`, where a
    /// ratio with a zero denominator is 1. The result is not clamped.
    pub fn flesch_kincaid(counts: &ReadabilityCounts) -> f64 {
        let words_per_sentence = if counts.sentences > 0 {
            counts.words as f64 / counts.sentences as f64
        } else {
            1.0
        };
        let syllables_per_word = if counts.words > 0 {
            counts.syllables as f64 / counts.words as f64
        } else {
            1.0
        };
        BASE - SENTENCE_LENGTH_WEIGHT * words_per_sentence - SYLLABLE_WEIGHT * syllables_per_word
    }

    /// Score cleaned text, or report it as too short
    pub fn calculate(cleaned: &str) -> Readability {
        if is_too_short(cleaned) {
            return Readability::TooShort;
        }
        let counts = ReadabilityCounts::from_cleaned(cleaned);
        Readability::Score(Self::flesch_kincaid(&counts))
    }

    /// Build document statistics from cleaned text and the original line count
    pub fn stats(cleaned: &str, lines: usize) -> TextStats {
        let counts = ReadabilityCounts::from_cleaned(cleaned);
        TextStats {
            lines,
            words: counts.words,
            sentences: counts.sentences,
            syllables: counts.syllables,
        }
    }

    /// Get a description of the reading level
    pub fn level_description(level: ReadingLevel) -> &'static str {
        match level {
            ReadingLevel::VeryEasy => "Very easy to read - short sentences and words",
            ReadingLevel::Easy => "Easy to read - conversational text",
            ReadingLevel::FairlyEasy => "Fairly easy to read",
            ReadingLevel::Standard => "Plain English - readable by most adults",
            ReadingLevel::FairlyDifficult => "Fairly difficult to read",
            ReadingLevel::Difficult => "Difficult - long sentences or many long words",
            ReadingLevel::VeryConfusing => {
                "Very confusing - likely garbled recognition or dense text"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_zero_denominators_default_to_one() {
        let counts = ReadabilityCounts::default();
        let score = ReadabilityCalculator::flesch_kincaid(&counts);
        // 206.835 - 1.015 - 84.6
        assert!(approx(score, 121.22));
        assert!(score.is_finite());
    }

    #[test]
    fn test_zero_sentences_only() {
        let counts = ReadabilityCounts {
            words: 4,
            sentences: 0,
            syllables: 8,
        };
        let score = ReadabilityCalculator::flesch_kincaid(&counts);
        assert!(approx(score, 206.835 - 1.015 - 84.6 * 2.0));
    }

    #[test]
    fn test_known_score() {
        // 5 words, 1 sentence, 5 syllables: 206.835 - 5.075 - 84.6
        let score = ReadabilityCalculator::calculate("The quick brown fox jumps.");
        assert_eq!(score, Readability::Score(206.835 - 1.015 * 5.0 - 84.6));
    }

    #[test]
    fn test_too_short() {
        assert_eq!(
            ReadabilityCalculator::calculate("Cats run fast."),
            Readability::TooShort
        );
        assert_eq!(ReadabilityCalculator::calculate(""), Readability::TooShort);
    }

    #[test]
    fn test_scores_are_not_clamped() {
        let dense = "Internationalization responsibilities notwithstanding, \
                     organizational considerations predominate unquestionably.";
        let score = ReadabilityCalculator::calculate(dense).score().unwrap();
        assert!(score < 0.0, "expected negative score, got {}", score);
    }

    #[test]
    fn test_whitespace_fragments_count_as_sentences() {
        let counts = ReadabilityCounts::from_cleaned("One two. . three four five.");
        // "One two", " ", " three four five"
        assert_eq!(counts.sentences, 3);
        assert_eq!(counts.words, 6);
    }

    #[test]
    fn test_stats_keep_line_count() {
        let stats = ReadabilityCalculator::stats("Hello there. General Kenobi.", 2);
        assert_eq!(stats.lines, 2);
        assert_eq!(stats.words, 4);
        assert_eq!(stats.sentences, 2);
    }

    #[test]
    fn test_level_description_all_levels() {
        assert!(ReadabilityCalculator::level_description(ReadingLevel::VeryEasy).contains("Very easy"));
        assert!(ReadabilityCalculator::level_description(ReadingLevel::Standard).contains("Plain"));
        assert!(ReadabilityCalculator::level_description(ReadingLevel::VeryConfusing)
            .contains("confusing"));
    }
}
