//! Syllable estimation for English words

fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u' | b'y')
}

/// Estimate the number of syllables in a word. Non-letters are ignored; a
/// token without letters has zero syllables.
pub fn count(word: &str) -> usize {
    let w: Vec<u8> = word
        .bytes()
        .filter(u8::is_ascii_alphabetic)
        .map(|b| b.to_ascii_lowercase())
        .collect();
    let n = w.len();
    if n == 0 {
        return 0;
    }
    if n <= 3 {
        return 1;
    }

    let mut groups = 0usize;
    let mut prev_vowel = false;
    for &b in &w {
        let vowel = is_vowel(b);
        if vowel && !prev_vowel {
            groups += 1;
        }
        prev_vowel = vowel;
    }

    let last = w[n - 1];
    let before = w[n - 2];
    if last == b'e' {
        // silent final e, but "-le" after a consonant is voiced (table)
        let consonant_le = before == b'l' && !is_vowel(w[n - 3]);
        if !is_vowel(before) && !consonant_le {
            groups = groups.saturating_sub(1);
        }
    } else if last == b'd' && before == b'e' {
        let stem_end = w[n - 3];
        if !is_vowel(stem_end) && stem_end != b't' && stem_end != b'd' {
            groups = groups.saturating_sub(1);
        }
    } else if last == b's' && before == b'e' {
        let stem_end = w[n - 3];
        if !is_vowel(stem_end) && !matches!(stem_end, b's' | b'x' | b'z' | b'h' | b'c' | b'g') {
            groups = groups.saturating_sub(1);
        }
    }

    groups.max(1)
}

/// Total syllables across whitespace-delimited words
pub fn count_text(text: &str) -> usize {
    text.split_whitespace().map(count).sum()
}
