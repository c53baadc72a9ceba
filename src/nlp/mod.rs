//! Natural-language tagging used by the text checks
//!
//! The analyzer only needs three capabilities (sentence segmentation, verb
//! tagging, noun tagging), expressed by the [`Tagger`] trait so that another
//! tagging backend can be plugged in without touching the checks.

pub mod lexicon;
pub mod sentences;
pub mod syllables;

pub use lexicon::WordClass;

/// Part-of-speech capabilities required by the analyzer
pub trait Tagger {
    /// Split text into sentences, in order, trimmed
    fn tag_sentences(&self, text: &str) -> Vec<String>;

    /// Tokens of `text` tagged as verbs (auxiliaries included)
    fn tag_verbs(&self, text: &str) -> Vec<String>;

    /// Tokens of `text` tagged as nouns, pronouns included
    fn tag_nouns(&self, text: &str) -> Vec<String>;
}

impl<T: Tagger + ?Sized> Tagger for &T {
    fn tag_sentences(&self, text: &str) -> Vec<String> {
        (**self).tag_sentences(text)
    }

    fn tag_verbs(&self, text: &str) -> Vec<String> {
        (**self).tag_verbs(text)
    }

    fn tag_nouns(&self, text: &str) -> Vec<String> {
        (**self).tag_nouns(text)
    }
}

/// A token together with its assigned word class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    /// Token with surrounding punctuation removed
    pub text: String,
    pub class: WordClass,
}

/// Rule-based English tagger backed by closed word lists and suffix rules.
/// Unknown words are tagged as nouns.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconTagger;

impl LexiconTagger {
    pub fn new() -> Self {
        Self
    }

    /// Tag every whitespace-delimited token of `text`. Tokens without letters
    /// or digits are skipped.
    pub fn tag(&self, text: &str) -> Vec<TaggedToken> {
        let mut tagged: Vec<TaggedToken> = Vec::new();
        for raw in text.split_whitespace() {
            let Some(word) = lexicon::normalize(raw) else {
                continue;
            };
            let mut class = lexicon::classify(&word);

            // "the run", "my walk": base verbs right after an article or possessive
            if class == WordClass::Verb && lexicon::is_base_verb(&word) {
                if let Some(prev) = tagged.last() {
                    if lexicon::introduces_noun(&prev.text.to_lowercase()) {
                        class = WordClass::Noun;
                    }
                }
            }

            tagged.push(TaggedToken {
                text: display_form(raw),
                class,
            });
        }
        tagged
    }
}

/// Strip surrounding punctuation but keep the original casing
fn display_form(raw: &str) -> String {
    raw.trim_matches(|c: char| !c.is_alphanumeric()).to_string()
}

impl Tagger for LexiconTagger {
    fn tag_sentences(&self, text: &str) -> Vec<String> {
        sentences::split_sentences(text)
    }

    fn tag_verbs(&self, text: &str) -> Vec<String> {
        self.tag(text)
            .into_iter()
            .filter(|t| t.class.is_verb())
            .map(|t| t.text)
            .collect()
    }

    fn tag_nouns(&self, text: &str) -> Vec<String> {
        self.tag(text)
            .into_iter()
            .filter(|t| lexicon::is_nominal(&t.text.to_lowercase(), t.class))
            .map(|t| t.text)
            .collect()
    }
}
