//! Text quality checks over a pluggable tagger

use super::clean::{self, is_too_short};
use super::readability::{ReadabilityCalculator, ReadabilityCounts};
use super::suggestions;
use crate::nlp::{LexiconTagger, Tagger};
use crate::{Language, QualityReport, Readability, TextInput};
use std::collections::HashSet;
use tracing::debug;

/// Noun share above which text is considered English
pub const ENGLISH_NOUN_RATIO: f64 = 0.7;

/// Runs the individual text checks. Every operation is a pure function of
/// its input and never fails: degenerate input yields false, Unknown or the
/// too-short sentinel.
#[derive(Debug, Clone, Default)]
pub struct TextAnalyzer<T = LexiconTagger> {
    tagger: T,
}

impl TextAnalyzer {
    /// Analyzer backed by the built-in lexicon tagger
    pub fn new() -> Self {
        Self {
            tagger: LexiconTagger::new(),
        }
    }
}

impl<T: Tagger> TextAnalyzer<T> {
    /// Analyzer backed by a custom tagger
    pub fn with_tagger(tagger: T) -> Self {
        Self { tagger }
    }

    pub fn tagger(&self) -> &T {
        &self.tagger
    }

    pub fn clean(&self, input: &TextInput) -> String {
        clean::clean(input)
    }

    /// Has a sentence, a verb, and at least five space-separated tokens.
    /// A noise gate, not a grammar check.
    pub fn is_well_formed(&self, input: &TextInput) -> bool {
        let cleaned = self.clean(input);
        if cleaned.is_empty() {
            return false;
        }

        let has_sentences = !self.tagger.tag_sentences(&cleaned).is_empty();
        let has_verbs = !self.tagger.tag_verbs(&cleaned).is_empty();
        let too_short = is_too_short(&cleaned);

        debug!(has_sentences, has_verbs, too_short, "well-formedness");
        has_sentences && has_verbs && !too_short
    }

    /// Noun density as a rough English check: more than 70% of the
    /// whitespace tokens must tag as nouns on their own.
    pub fn detect_language(&self, input: &TextInput) -> Language {
        let cleaned = self.clean(input);
        if cleaned.is_empty() {
            return Language::Unknown;
        }

        let words: Vec<&str> = cleaned.split_whitespace().collect();
        let nouns = words
            .iter()
            .filter(|word| !self.tagger.tag_nouns(word).is_empty())
            .count();
        let ratio = if words.is_empty() {
            0.0
        } else {
            nouns as f64 / words.len() as f64
        };

        debug!(words = words.len(), nouns, ratio, "language detection");
        if ratio > ENGLISH_NOUN_RATIO {
            Language::English
        } else {
            Language::NonEnglish
        }
    }

    /// True when the same sentence occurs more than once (exact match)
    pub fn check_redundancy(&self, input: &TextInput) -> bool {
        let cleaned = self.clean(input);
        if cleaned.is_empty() {
            return false;
        }

        let sentences = self.tagger.tag_sentences(&cleaned);
        let unique: HashSet<&str> = sentences.iter().map(String::as_str).collect();

        debug!(sentences = sentences.len(), unique = unique.len(), "redundancy");
        unique.len() != sentences.len()
    }

    /// Flesch reading-ease score of the cleaned text
    pub fn readability(&self, input: &TextInput) -> Readability {
        let cleaned = self.clean(input);
        let readability = ReadabilityCalculator::calculate(&cleaned);
        if !readability.is_too_short() {
            let counts = ReadabilityCounts::from_cleaned(&cleaned);
            debug!(
                words = counts.words,
                sentences = counts.sentences,
                syllables = counts.syllables,
                score = %readability,
                "readability"
            );
        }
        readability
    }

    /// Improvement suggestions, each check re-run on the input
    pub fn suggest(&self, input: &TextInput) -> Vec<String> {
        let readability = self.readability(input);
        let is_redundant = self.check_redundancy(input);
        let language = self.detect_language(input);
        suggestions::collect(readability, is_redundant, language)
    }

    /// Full quality report
    pub fn analyze(&self, input: &TextInput) -> QualityReport {
        QualityReport {
            is_valid: self.is_well_formed(input),
            language: self.detect_language(input),
            is_redundant: self.check_redundancy(input),
            readability: self.readability(input),
            suggestions: self.suggest(input),
        }
    }
}
