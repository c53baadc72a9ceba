//! Sentence boundary detection

use unicode_segmentation::UnicodeSegmentation;

/// Abbreviations whose trailing period does not end a sentence
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "approx", "dept",
];

/// Split text on Unicode sentence boundaries, then rejoin segments that were
/// cut after an abbreviation. Sentences are trimmed; fragments without any
/// letter or digit are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();
    for segment in text.unicode_sentences() {
        match segments.last_mut() {
            Some(prev) if ends_with_abbreviation(prev) => prev.push_str(segment),
            _ => segments.push(segment.to_string()),
        }
    }

    segments
        .iter()
        .map(|s| s.trim())
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .map(str::to_string)
        .collect()
}

/// Whether `segment` ends in a single period that belongs to an abbreviation
fn ends_with_abbreviation(segment: &str) -> bool {
    let segment = segment.trim_end();
    let Some(stem) = segment.strip_suffix('.') else {
        return false;
    };
    if stem.ends_with(['.', '!', '?']) {
        return false;
    }
    let last = stem.rsplit(char::is_whitespace).next().unwrap_or("");
    let last = last
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    ABBREVIATIONS.contains(&last.as_str())
}
