//! Improvement suggestions derived from the individual checks

use super::readability::READABILITY_TARGET;
use crate::{Language, Readability};

pub const SIMPLIFY_SENTENCES: &str = "Simplify the sentences to improve readability.";
pub const REMOVE_REDUNDANCY: &str = "Remove redundant sentences to make the text concise.";
pub const ENSURE_ENGLISH: &str = "Ensure the text is in English for better analysis.";

/// Build the suggestion list. Order is fixed: readability, redundancy, language.
pub fn collect(readability: Readability, is_redundant: bool, language: Language) -> Vec<String> {
    let mut suggestions = Vec::new();

    if readability
        .score()
        .is_some_and(|score| score < READABILITY_TARGET)
    {
        suggestions.push(SIMPLIFY_SENTENCES.to_string());
    }
    if is_redundant {
        suggestions.push(REMOVE_REDUNDANCY.to_string());
    }
    if language != Language::English {
        suggestions.push(ENSURE_ENGLISH.to_string());
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_suggestions() {
        assert!(collect(Readability::Score(75.0), false, Language::English).is_empty());
        assert!(collect(Readability::TooShort, false, Language::English).is_empty());
    }

    #[test]
    fn test_all_suggestions_in_order() {
        let s = collect(Readability::Score(12.0), true, Language::NonEnglish);
        assert_eq!(s, vec![SIMPLIFY_SENTENCES, REMOVE_REDUNDANCY, ENSURE_ENGLISH]);
    }

    #[test]
    fn test_order_holds_for_subsets() {
        assert_eq!(
            collect(Readability::Score(30.0), false, Language::Unknown),
            vec![SIMPLIFY_SENTENCES, ENSURE_ENGLISH]
        );
        assert_eq!(
            collect(Readability::TooShort, true, Language::Unknown),
            vec![REMOVE_REDUNDANCY, ENSURE_ENGLISH]
        );
    }

    #[test]
    fn test_target_boundary() {
        assert!(collect(Readability::Score(60.0), false, Language::English).is_empty());
        assert_eq!(
            collect(Readability::Score(59.999), false, Language::English),
            vec![SIMPLIFY_SENTENCES]
        );
    }

    #[test]
    fn test_too_short_never_suggests_simplify() {
        let s = collect(Readability::TooShort, false, Language::NonEnglish);
        assert!(!s.iter().any(|x| x == SIMPLIFY_SENTENCES));
    }
}
