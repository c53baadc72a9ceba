//! Line-level noise filter for raw OCR output
//!
//! A stricter pass/fail gate than the text checks: a single suspicious line
//! rejects the whole document. It does not use the tagger.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Why a line was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoiseKind {
    /// Character outside letters, digits, whitespace and `, . ! ?`
    UnexpectedCharacter,
    /// Isolated one- or two-letter word
    ShortWord,
    /// Four or more digits in a row
    LongDigitRun,
    /// Same word twice in a row
    RepeatedWord,
    /// Three or more whitespace characters in a row
    ExcessiveSpacing,
}

impl std::fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoiseKind::UnexpectedCharacter => write!(f, "unexpected character"),
            NoiseKind::ShortWord => write!(f, "isolated one- or two-letter word"),
            NoiseKind::LongDigitRun => write!(f, "long run of digits"),
            NoiseKind::RepeatedWord => write!(f, "repeated word"),
            NoiseKind::ExcessiveSpacing => write!(f, "excessive spacing"),
        }
    }
}

/// First noisy line found in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoiseFinding {
    /// Line number (1-indexed)
    pub line: usize,
    pub kind: NoiseKind,
    /// Offending text
    pub excerpt: String,
}

fn patterns() -> &'static [(NoiseKind, Regex)] {
    static PATTERNS: OnceLock<Vec<(NoiseKind, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            (NoiseKind::UnexpectedCharacter, Regex::new(r"[^a-zA-Z0-9\s,.!?]").unwrap()),
            (NoiseKind::ShortWord, Regex::new(r"\b[a-zA-Z]{1,2}\b").unwrap()),
            (NoiseKind::LongDigitRun, Regex::new(r"\d{4,}").unwrap()),
            (NoiseKind::ExcessiveSpacing, Regex::new(r"\s{3,}").unwrap()),
        ]
    })
}

fn words() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+").unwrap())
}

/// Validator that rejects documents containing noisy lines
#[derive(Debug, Clone, Copy, Default)]
pub struct LineNoiseValidator;

impl LineNoiseValidator {
    pub fn new() -> Self {
        Self
    }

    /// True when no line matches any noise pattern. An empty document is noise free.
    pub fn is_noise_free<S: AsRef<str>>(&self, lines: &[S]) -> bool {
        self.find_noise(lines).is_none()
    }

    /// Locate the first noisy line and the first pattern it trips
    pub fn find_noise<S: AsRef<str>>(&self, lines: &[S]) -> Option<NoiseFinding> {
        lines.iter().enumerate().find_map(|(idx, line)| {
            let line = line.as_ref();
            Self::check_line(line).map(|(kind, excerpt)| NoiseFinding {
                line: idx + 1,
                kind,
                excerpt,
            })
        })
    }

    fn check_line(line: &str) -> Option<(NoiseKind, String)> {
        let pattern_hit = |kind: NoiseKind| {
            patterns()
                .iter()
                .find(|(k, _)| *k == kind)
                .and_then(|(_, re)| re.find(line))
                .map(|m| (kind, m.as_str().to_string()))
        };

        pattern_hit(NoiseKind::UnexpectedCharacter)
            .or_else(|| pattern_hit(NoiseKind::ShortWord))
            .or_else(|| pattern_hit(NoiseKind::LongDigitRun))
            .or_else(|| repeated_word(line).map(|w| (NoiseKind::RepeatedWord, w)))
            .or_else(|| pattern_hit(NoiseKind::ExcessiveSpacing))
    }
}

/// Two identical words separated only by whitespace ("the the")
fn repeated_word(line: &str) -> Option<String> {
    let matches: Vec<regex::Match<'_>> = words().find_iter(line).collect();
    matches.windows(2).find_map(|pair| {
        let gap = &line[pair[0].end()..pair[1].start()];
        let separated_by_space = !gap.is_empty() && gap.chars().all(char::is_whitespace);
        if separated_by_space && pair[0].as_str() == pair[1].as_str() {
            Some(line[pair[0].start()..pair[1].end()].to_string())
        } else {
            None
        }
    })
}

/// True when no line of `lines` looks like recognition noise
pub fn is_noise_free<S: AsRef<str>>(lines: &[S]) -> bool {
    LineNoiseValidator::new().is_noise_free(lines)
}
