//! Legible: Text Quality Analyzer for OCR output
//!
//! This library scores recognized text (typically the line output of an OCR
//! engine) and reports whether it looks like meaningful English prose, how
//! readable it is, and what could be improved.

pub mod analyzer;
pub mod cache;
pub mod config;
pub mod nlp;
pub mod ocr;
pub mod reporter;
pub mod watcher;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::PathBuf;

/// Text handed to the analyzer: one string or an ordered sequence of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInput {
    /// A single string (passed through as-is when cleaning)
    Text(String),
    /// Lines in reading order (joined with a single space when cleaning)
    Lines(Vec<String>),
    /// A payload that is neither a string nor a sequence of strings
    Unsupported,
}

impl TextInput {
    /// Split raw recognized text into non-empty lines, the way OCR output is
    /// handed over before analysis.
    pub fn from_raw(text: &str) -> Self {
        TextInput::Lines(split_lines(text))
    }

    /// Convert a JSON payload. Strings become `Text`, arrays become `Lines`
    /// with each item rendered as a string (nested arrays comma-joined,
    /// objects as `[object Object]`, null empty), anything else is
    /// `Unsupported`.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => TextInput::Text(s.clone()),
            serde_json::Value::Array(items) => {
                TextInput::Lines(items.iter().map(json_item_text).collect())
            }
            _ => TextInput::Unsupported,
        }
    }

    /// The text as one string, or None when the input is unsupported
    pub fn joined(&self) -> Option<String> {
        match self {
            TextInput::Text(s) => Some(s.clone()),
            TextInput::Lines(lines) => Some(lines.join(" ")),
            TextInput::Unsupported => None,
        }
    }

    /// Lines of the input (a single string is one line)
    pub fn lines(&self) -> Vec<&str> {
        match self {
            TextInput::Text(s) => vec![s.as_str()],
            TextInput::Lines(lines) => lines.iter().map(String::as_str).collect(),
            TextInput::Unsupported => Vec::new(),
        }
    }
}

/// Split text on newlines, dropping blank lines. Kept lines are not trimmed,
/// so trailing spacing still reaches the noise checks.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// String form of a JSON array item, as script runtimes render array elements
fn json_item_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => json_number_text(n),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => String::new(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(json_item_text)
            .collect::<Vec<_>>()
            .join(","),
        serde_json::Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Integral floats print without a fractional part (`3.0` -> `3`)
fn json_number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

impl From<&str> for TextInput {
    fn from(s: &str) -> Self {
        TextInput::Text(s.to_string())
    }
}

impl From<String> for TextInput {
    fn from(s: String) -> Self {
        TextInput::Text(s)
    }
}

impl From<Vec<String>> for TextInput {
    fn from(lines: Vec<String>) -> Self {
        TextInput::Lines(lines)
    }
}

impl From<Vec<&str>> for TextInput {
    fn from(lines: Vec<&str>) -> Self {
        TextInput::Lines(lines.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for TextInput {
    fn from(lines: &[&str]) -> Self {
        TextInput::Lines(lines.iter().map(|l| l.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for TextInput {
    fn from(lines: [&str; N]) -> Self {
        TextInput::Lines(lines.iter().map(|l| l.to_string()).collect())
    }
}

/// Detected language class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    English,
    #[serde(rename = "Non-English")]
    NonEnglish,
    Unknown,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::English => write!(f, "English"),
            Language::NonEnglish => write!(f, "Non-English"),
            Language::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Flesch reading-ease result. Scores are not clamped and may fall outside 0-100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Readability {
    Score(f64),
    /// Fewer than five tokens after cleaning
    TooShort,
}

pub const TOO_SHORT_LABEL: &str = "too-short";

impl Readability {
    pub fn score(&self) -> Option<f64> {
        match self {
            Readability::Score(s) => Some(*s),
            Readability::TooShort => None,
        }
    }

    pub fn is_too_short(&self) -> bool {
        matches!(self, Readability::TooShort)
    }

    /// Reading level band for numeric scores
    pub fn level(&self) -> Option<ReadingLevel> {
        self.score().map(ReadingLevel::from_score)
    }
}

impl std::fmt::Display for Readability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Readability::Score(s) => write!(f, "{:.2}", s),
            Readability::TooShort => write!(f, "Text is too short to calculate readability."),
        }
    }
}

impl Serialize for Readability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Readability::Score(s) => serializer.serialize_f64(*s),
            Readability::TooShort => serializer.serialize_str(TOO_SHORT_LABEL),
        }
    }
}

impl<'de> Deserialize<'de> for Readability {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Score(f64),
            Label(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Score(s) => Ok(Readability::Score(s)),
            Raw::Label(label) if label == TOO_SHORT_LABEL => Ok(Readability::TooShort),
            Raw::Label(other) => Err(serde::de::Error::custom(format!(
                "expected a number or \"{}\", got \"{}\"",
                TOO_SHORT_LABEL, other
            ))),
        }
    }
}

/// Standard interpretation bands of the Flesch reading-ease score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingLevel {
    VeryEasy,
    Easy,
    FairlyEasy,
    Standard,
    FairlyDifficult,
    Difficult,
    VeryConfusing,
}

impl ReadingLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            ReadingLevel::VeryEasy
        } else if score >= 80.0 {
            ReadingLevel::Easy
        } else if score >= 70.0 {
            ReadingLevel::FairlyEasy
        } else if score >= 60.0 {
            ReadingLevel::Standard
        } else if score >= 50.0 {
            ReadingLevel::FairlyDifficult
        } else if score >= 30.0 {
            ReadingLevel::Difficult
        } else {
            ReadingLevel::VeryConfusing
        }
    }
}

impl std::fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadingLevel::VeryEasy => write!(f, "Very Easy"),
            ReadingLevel::Easy => write!(f, "Easy"),
            ReadingLevel::FairlyEasy => write!(f, "Fairly Easy"),
            ReadingLevel::Standard => write!(f, "Standard"),
            ReadingLevel::FairlyDifficult => write!(f, "Fairly Difficult"),
            ReadingLevel::Difficult => write!(f, "Difficult"),
            ReadingLevel::VeryConfusing => write!(f, "Very Confusing"),
        }
    }
}

/// Structured quality report for one piece of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    /// Text has a sentence, a verb and at least five tokens
    pub is_valid: bool,
    /// Language class from noun density
    pub language: Language,
    /// At least one sentence appears twice
    pub is_redundant: bool,
    /// Flesch reading-ease score or the too-short sentinel
    pub readability: Readability,
    /// Improvement hints, in fixed order
    pub suggestions: Vec<String>,
}

/// Where an analyzed document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Plain text file
    #[default]
    Text,
    /// Image run through OCR
    Image,
    /// Standard input
    Stdin,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Text => write!(f, "Text"),
            SourceKind::Image => write!(f, "Image (OCR)"),
            SourceKind::Stdin => write!(f, "Stdin"),
        }
    }
}

/// Counts gathered while scoring a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStats {
    /// Non-empty input lines
    pub lines: usize,
    /// Whitespace-delimited words of the cleaned text
    pub words: usize,
    /// Fragments between sentence terminators
    pub sentences: usize,
    /// Estimated syllables across all words
    pub syllables: usize,
}

/// The result of analyzing one document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Path to the analyzed document
    pub file_path: PathBuf,
    /// How the text was obtained
    #[serde(default)]
    pub source_kind: SourceKind,
    /// Quality report
    pub report: QualityReport,
    /// Every line passed the noise filter
    pub noise_free: bool,
    /// First noisy line, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise: Option<analyzer::noise::NoiseFinding>,
    /// Reading level band (absent for too-short text)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_level: Option<ReadingLevel>,
    /// Statistics about the text
    pub stats: TextStats,
}

impl AnalysisResult {
    /// Passed both the well-formedness check and the noise filter
    pub fn is_clean(&self) -> bool {
        self.report.is_valid && self.noise_free
    }
}

/// Public API: analyze a single document (text file or image).
///
/// * `path` - path to the document
/// * `work_dir` - directory where the config search starts
/// * `config_path` - optional path to .legiblerc.json; if None, searches from work_dir
pub fn analyze_file(
    path: &std::path::Path,
    work_dir: &std::path::Path,
    config_path: Option<&std::path::Path>,
) -> anyhow::Result<AnalysisResult> {
    let config = crate::config::load_config(work_dir, config_path).ok();
    let engine = crate::analyzer::engine::AnalysisEngine::new();
    engine.analyze(path, config.as_ref())
}
