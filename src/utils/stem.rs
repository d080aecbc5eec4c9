use once_cell::sync::Lazy;
use rust_stemmers::{Algorithm, Stemmer};

static STEMMER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::English));

/// Canonical form of a single word: lowercased, stripped of leading and
/// trailing punctuation, then Porter2-stemmed. Returns an empty string for
/// words with no alphanumeric content.
pub fn stem(word: &str) -> String {
    let lowercase = word.to_lowercase();
    let trimmed = lowercase.trim_matches(|c: char| !c.is_alphanumeric());
    if trimmed.is_empty() {
        return String::new();
    }
    STEMMER.stem(trimmed).into_owned()
}

pub fn normalize_words(phrase: &str) -> Vec<String> {
    phrase
        .split_whitespace()
        .map(stem)
        .filter(|word| !word.is_empty())
        .collect()
}

/// Every stored concept name and every lookup selector goes through here.
pub fn normalize_phrase(phrase: &str) -> String {
    normalize_words(phrase).join(" ")
}
