//! Closed word lists and suffix rules for English word classes

use serde::Serialize;

/// Coarse part-of-speech classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WordClass {
    Noun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Determiner,
    Pronoun,
    Preposition,
    Conjunction,
    Interjection,
    Number,
}

impl WordClass {
    /// Verbs and auxiliaries/modals
    pub fn is_verb(self) -> bool {
        matches!(self, WordClass::Verb | WordClass::Auxiliary)
    }
}

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "another", "either", "neither", "all", "both", "half", "such", "what", "which", "whose", "my",
    "your", "his", "her", "its", "our", "their",
];

/// Words after which a base-form verb reads as a noun
const NOUN_INTRODUCERS: &[&str] = &[
    "the", "a", "an", "this", "these", "those", "my", "your", "his", "its", "our", "their",
];

/// Possessive determiners, counted with the nouns like the pronouns they stem from
const POSSESSIVES: &[&str] = &["my", "your", "his", "her", "its", "our", "their"];

const PRONOUNS: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself", "yourself",
    "himself", "herself", "itself", "ourselves", "yourselves", "themselves", "mine", "yours",
    "hers", "ours", "theirs", "who", "whom", "whoever", "whatever", "someone", "somebody",
    "something", "anyone", "anybody", "anything", "everyone", "everybody", "everything", "nobody",
    "nothing",
];

const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "to", "from", "up", "down", "over", "under",
    "across", "along", "among", "around", "behind", "beside", "besides", "beyond", "despite",
    "except", "inside", "near", "off", "onto", "outside", "since", "than", "toward", "towards",
    "upon", "via", "within", "without", "per", "amid",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "so", "yet", "because", "although", "though", "while", "whereas",
    "unless", "until", "if", "whether", "once",
];

const AUXILIARIES: &[&str] = &[
    "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had", "having", "do",
    "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
    "ain't", "cannot",
];

const ADVERBS: &[&str] = &[
    "not", "very", "too", "also", "just", "only", "really", "quite", "rather", "almost", "always",
    "never", "often", "sometimes", "usually", "here", "there", "now", "then", "today",
    "tomorrow", "yesterday", "soon", "still", "already", "even", "ever", "again", "away", "back",
    "perhaps", "maybe", "well", "how", "when", "where", "why", "instead", "together", "later",
];

const INTERJECTIONS: &[&str] = &[
    "hello", "hi", "hey", "oh", "ah", "wow", "yes", "okay", "ok", "please", "thanks", "goodbye",
    "bye", "alas", "oops",
];

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "twenty", "thirty", "hundred", "thousand", "million", "billion", "first",
    "second", "third",
];

const ADJECTIVES: &[&str] = &[
    "good", "bad", "new", "old", "big", "small", "large", "little", "great", "high", "low",
    "long", "short", "young", "early", "late", "important", "public", "able", "right", "wrong",
    "same", "different", "other", "next", "last", "few", "many", "much", "more", "most", "less",
    "least", "own", "sure", "clear", "full", "free", "hot", "cold", "easy", "hard", "fast",
    "slow", "quick", "brown", "red", "blue", "green", "black", "white", "happy", "sad", "simple",
    "strong", "weak", "real", "true", "false", "whole", "best", "better", "worse", "nice", "fine",
    "dark", "lazy", "ready", "possible", "main", "open", "certain", "several", "various", "final",
];

/// Base forms of common verbs (their -s forms are recognized by stem)
const BASE_VERBS: &[&str] = &[
    "go", "run", "come", "see", "get", "make", "take", "know", "think", "say", "tell", "give",
    "find", "want", "use", "work", "call", "seem", "feel", "try", "leave", "put", "mean", "keep",
    "let", "begin", "show", "help", "talk", "turn", "start", "hear", "play", "move", "live",
    "believe", "bring", "happen", "write", "sit", "stand", "lose", "pay", "meet", "include",
    "continue", "learn", "change", "lead", "understand", "watch", "follow", "stop", "create",
    "speak", "read", "spend", "grow", "walk", "win", "offer", "remember", "love", "consider",
    "appear", "buy", "wait", "serve", "die", "send", "expect", "build", "stay", "fall", "cut",
    "reach", "kill", "remain", "suggest", "raise", "pass", "sell", "require", "decide", "pull",
    "jump", "eat", "sleep", "look", "need", "like", "become", "fly", "swim", "sing", "drive",
    "ask", "add", "check", "scan", "print", "improve", "ensure", "remove", "simplify", "contain",
];

/// Irregular inflected forms
const VERB_FORMS: &[&str] = &[
    "went", "gone", "ran", "came", "saw", "seen", "got", "made", "took", "taken", "knew",
    "known", "thought", "said", "told", "gave", "given", "found", "felt", "left", "meant", "kept",
    "began", "begun", "brought", "wrote", "written", "sat", "stood", "lost", "paid", "met", "led",
    "understood", "spoke", "spoken", "spent", "grew", "grown", "won", "bought", "sent", "built",
    "fell", "fallen", "sold", "ate", "eaten", "slept", "became", "flew", "flown", "swam", "sang",
    "drove", "driven", "goes", "does", "flies", "tries",
];

const NOUNS_ENDING_LY: &[&str] = &[
    "family", "italy", "july", "reply", "supply", "belly", "jelly", "rally", "ally", "bully",
    "assembly", "anomaly", "monopoly",
];

const NOUNS_ENDING_ING: &[&str] = &[
    "thing", "things", "king", "ring", "spring", "string", "morning", "evening", "ceiling", "wing",
    "sibling", "pudding", "wedding", "ping",
];

const WORDS_ENDING_ED: &[&str] = &[
    "speed", "greed", "breed", "creed", "sacred", "naked", "wicked", "kindred", "indeed",
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ical"];

/// Lowercase a raw token and strip surrounding punctuation. Returns None for
/// tokens without letters or digits.
pub fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim_matches(|c: char| !c.is_alphanumeric());
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// True for words after which a base-form verb is read as a noun
pub fn introduces_noun(word: &str) -> bool {
    NOUN_INTRODUCERS.contains(&word)
}

/// Nouns in the broad sense: common nouns, pronouns and possessive determiners
pub fn is_nominal(word: &str, class: WordClass) -> bool {
    match class {
        WordClass::Noun | WordClass::Pronoun => true,
        WordClass::Determiner => POSSESSIVES.contains(&word),
        _ => false,
    }
}

/// True for base-form verbs from the lexicon (not inflected)
pub fn is_base_verb(word: &str) -> bool {
    BASE_VERBS.contains(&word)
}

/// Assign a word class to a normalized (lowercase, trimmed) word
pub fn classify(word: &str) -> WordClass {
    if word.chars().all(|c| c.is_ascii_digit()) {
        return WordClass::Number;
    }
    if word.ends_with("n't") {
        return WordClass::Auxiliary;
    }
    // Possessive or contracted forms take the class of their stem
    let word = strip_clitic(word);

    if let Some(class) = closed_class(word) {
        return class;
    }
    if BASE_VERBS.contains(&word) || VERB_FORMS.contains(&word) || is_third_person(word) {
        return WordClass::Verb;
    }
    suffix_class(word).unwrap_or(WordClass::Noun)
}

fn strip_clitic(word: &str) -> &str {
    for clitic in ["'s", "'re", "'ve", "'ll", "'d", "'m"] {
        if let Some(stem) = word.strip_suffix(clitic) {
            if !stem.is_empty() {
                return stem;
            }
        }
    }
    word
}

fn closed_class(word: &str) -> Option<WordClass> {
    let lists: [(&[&str], WordClass); 9] = [
        (AUXILIARIES, WordClass::Auxiliary),
        (DETERMINERS, WordClass::Determiner),
        (PRONOUNS, WordClass::Pronoun),
        (PREPOSITIONS, WordClass::Preposition),
        (CONJUNCTIONS, WordClass::Conjunction),
        (INTERJECTIONS, WordClass::Interjection),
        (NUMBER_WORDS, WordClass::Number),
        (ADVERBS, WordClass::Adverb),
        (ADJECTIVES, WordClass::Adjective),
    ];
    lists
        .iter()
        .find(|(list, _)| list.contains(&word))
        .map(|(_, class)| *class)
}

/// "runs", "watches": third person singular of a known base verb
fn is_third_person(word: &str) -> bool {
    if let Some(stem) = word.strip_suffix("es") {
        if BASE_VERBS.contains(&stem) {
            return true;
        }
    }
    match word.strip_suffix('s') {
        Some(stem) => BASE_VERBS.contains(&stem),
        None => false,
    }
}

fn suffix_class(word: &str) -> Option<WordClass> {
    let len = word.chars().count();
    if len > 4 && word.ends_with("ly") && !NOUNS_ENDING_LY.contains(&word) {
        return Some(WordClass::Adverb);
    }
    if len > 4 && word.ends_with("ing") && !NOUNS_ENDING_ING.contains(&word) {
        return Some(WordClass::Verb);
    }
    if len > 4 && word.ends_with("ed") {
        return if WORDS_ENDING_ED.contains(&word) {
            None
        } else {
            Some(WordClass::Verb)
        };
    }
    if len > 5
        && ADJECTIVE_SUFFIXES
            .iter()
            .any(|suffix| word.ends_with(suffix))
    {
        return Some(WordClass::Adjective);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("\"Hello,"), Some("hello".to_string()));
        assert_eq!(normalize("don't."), Some("don't".to_string()));
        assert_eq!(normalize("..."), None);
    }

    #[test]
    fn test_closed_classes() {
        assert_eq!(classify("the"), WordClass::Determiner);
        assert_eq!(classify("they"), WordClass::Pronoun);
        assert_eq!(classify("under"), WordClass::Preposition);
        assert_eq!(classify("because"), WordClass::Conjunction);
        assert_eq!(classify("might"), WordClass::Auxiliary);
        assert_eq!(classify("hello"), WordClass::Interjection);
        assert_eq!(classify("seven"), WordClass::Number);
        assert_eq!(classify("2024"), WordClass::Number);
    }

    #[test]
    fn test_verbs() {
        assert_eq!(classify("run"), WordClass::Verb);
        assert_eq!(classify("runs"), WordClass::Verb);
        assert_eq!(classify("watches"), WordClass::Verb);
        assert_eq!(classify("went"), WordClass::Verb);
        assert_eq!(classify("jumped"), WordClass::Verb);
        assert_eq!(classify("scanning"), WordClass::Verb);
        assert_eq!(classify("isn't"), WordClass::Auxiliary);
    }

    #[test]
    fn test_suffix_rules_with_exceptions() {
        assert_eq!(classify("quickly"), WordClass::Adverb);
        assert_eq!(classify("family"), WordClass::Noun);
        assert_eq!(classify("morning"), WordClass::Noun);
        assert_eq!(classify("speed"), WordClass::Noun);
        assert_eq!(classify("dangerous"), WordClass::Adjective);
        assert_eq!(classify("table"), WordClass::Noun);
    }

    #[test]
    fn test_clitics_take_stem_class() {
        assert_eq!(classify("it's"), WordClass::Pronoun);
        assert_eq!(classify("cat's"), WordClass::Noun);
        assert_eq!(classify("we're"), WordClass::Pronoun);
    }

    #[test]
    fn test_pronouns_and_possessives_are_nominal() {
        assert!(is_nominal("they", classify("they")));
        assert!(is_nominal("my", classify("my")));
        assert!(is_nominal("cats", classify("cats")));
        assert!(!is_nominal("the", classify("the")));
        assert!(!is_nominal("run", classify("run")));
    }

    #[test]
    fn test_default_is_noun() {
        assert_eq!(classify("cats"), WordClass::Noun);
        assert_eq!(classify("document"), WordClass::Noun);
        assert_eq!(classify("xq"), WordClass::Noun);
    }
}
