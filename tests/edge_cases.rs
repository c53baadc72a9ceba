//! Edge case tests: degenerate inputs must not panic.

use legible::analyzer::{AnalysisEngine, LineNoiseValidator, TextAnalyzer};
use legible::{Readability, SourceKind, TextInput};
use proptest::prelude::*;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn analyze_bytes(bytes: &[u8]) -> anyhow::Result<legible::AnalysisResult> {
    let mut file = NamedTempFile::with_suffix(".txt").unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    AnalysisEngine::new().analyze(file.path(), None)
}

#[test]
fn empty_file_no_panic() {
    let result = analyze_bytes(b"").unwrap();
    assert_eq!(result.stats.lines, 0);
    assert_eq!(result.report.readability, Readability::TooShort);
    assert!(result.noise_free, "an empty document has no noisy line");
    assert!(!result.report.is_valid);
}

#[test]
fn whitespace_only_file() {
    let result = analyze_bytes(b"   \n\t\n   \n").unwrap();
    assert_eq!(result.stats.lines, 0);
    assert_eq!(result.stats.words, 0);
}

#[test]
fn invalid_utf8_is_an_error() {
    let err = analyze_bytes(&[0xff, 0xfe, 0x00, 0x41]).unwrap_err();
    assert!(err.to_string().contains("Failed to read text file"));
}

#[test]
fn only_punctuation() {
    let engine = AnalysisEngine::new();
    let result = engine.analyze_source("... !!! ??? ,,,", Path::new("p.txt"), SourceKind::Text);
    assert!(!result.report.is_valid);
    // four tokens survive cleaning
    assert_eq!(result.report.readability, Readability::TooShort);
    assert_eq!(result.stats.words, 4);
}

#[test]
fn unicode_text_is_cleaned_away() {
    let analyzer = TextAnalyzer::new();
    let input = TextInput::from("Привет мир, как дела сегодня?");
    let cleaned = analyzer.clean(&input);
    assert!(cleaned.chars().all(|c| c.is_ascii()));
    assert!(!analyzer.is_well_formed(&input));
}

#[test]
fn crlf_line_endings() {
    let result = analyze_bytes(b"The quick brown fox jumps over the lazy dog.\r\nAnother fine line here.\r\n")
        .unwrap();
    assert_eq!(result.stats.lines, 2);
    assert!(result.noise_free);
}

#[test]
fn very_long_line() {
    let line = "word ".repeat(20_000);
    let engine = AnalysisEngine::new();
    let result = engine.analyze_source(&line, Path::new("long.txt"), SourceKind::Text);
    assert_eq!(result.stats.words, 20_000);
    assert_eq!(result.stats.sentences, 1);
}

#[test]
fn noise_validator_accepts_string_and_str_slices() {
    let owned = vec!["Fine text here".to_string()];
    let borrowed = ["Fine text here"];
    let v = LineNoiseValidator::new();
    assert_eq!(v.is_noise_free(&owned), v.is_noise_free(&borrowed));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn analyze_never_panics(text in "\\PC{0,200}") {
        let engine = AnalysisEngine::new();
        let result = engine.analyze_source(&text, Path::new("fuzz.txt"), SourceKind::Text);
        prop_assert!(result.stats.lines <= text.lines().count());
    }

    #[test]
    fn lines_never_panic(lines in proptest::collection::vec("[ -~]{0,40}", 0..8)) {
        let analyzer = TextAnalyzer::new();
        let input = TextInput::from(lines.clone());
        let report = analyzer.analyze(&input);
        if let Readability::Score(score) = report.readability {
            prop_assert!(score.is_finite());
        }
        let _ = LineNoiseValidator::new().find_noise(&lines);
    }
}
