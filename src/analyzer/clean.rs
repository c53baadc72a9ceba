//! Text cleaning shared by every check

use crate::TextInput;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Inputs with fewer space-separated tokens than this are too short to judge
pub const MIN_TOKENS: usize = 5;

fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z\s.,!?']").unwrap())
}

/// Join lines with a single space, drop every character that is not a Latin
/// letter, whitespace or one of `. , ! ? '`, then trim.
///
/// Unsupported input cleans to the empty string.
pub fn clean(input: &TextInput) -> String {
    let Some(raw) = input.joined() else {
        debug!("unsupported input: expected a string or a sequence of strings");
        return String::new();
    };
    disallowed_chars().replace_all(&raw, "").trim().to_string()
}

/// Number of pieces when splitting on the space character (empty pieces count)
pub fn token_count(cleaned: &str) -> usize {
    cleaned.split(' ').count()
}

pub fn is_too_short(cleaned: &str) -> bool {
    token_count(cleaned) < MIN_TOKENS
}
