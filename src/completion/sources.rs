//! Candidate sources
//!
//! Where the raw candidate pool comes from, behind a trait so the engine
//! does not care whether candidates are static keywords, buffer words, or
//! (eventually) language-server symbols.

/// Supplies the unranked candidate pool for one completion pass.
pub trait CandidateSource: Send + Sync {
    fn candidates(&self) -> Vec<String>;
}

/// Static keyword pool.
// TODO: combine with a language-server semantic source and merge the pools
// before ranking.
pub struct KeywordSource {
    words: Vec<String>,
}

const KEYWORDS: &[&str] = &[
    "saveUserAccount",
    "suave",
    "getUserVar",
    "gurilla",
    "geuro",
    "guvion",
    "yoda",
    "obi-wan",
    "luke",
    "anakin",
    "qui-gon",
    "leia",
    "rey",
    "padme",
    "vader",
    "emperor",
    "jar-jar",
    "han",
    "threepio",
    "artoo",
    "lando",
    "porkins",
    "error",
];

impl KeywordSource {
    pub fn new() -> Self {
        Self { words: KEYWORDS.iter().map(|w| w.to_string()).collect() }
    }

    pub fn with_words(words: Vec<String>) -> Self {
        Self { words }
    }
}

impl Default for KeywordSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateSource for KeywordSource {
    fn candidates(&self) -> Vec<String> {
        self.words.clone()
    }
}
