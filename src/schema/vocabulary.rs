use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// The word categories a vocabulary is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Nouns,
    Adjectives,
    Verbs,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 3] = [Self::Nouns, Self::Adjectives, Self::Verbs];

    /// Parse a category name ("nouns", "adjectives", "verbs").
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "nouns" | "noun" => Some(Self::Nouns),
            "adjectives" | "adjective" => Some(Self::Adjectives),
            "verbs" | "verb" => Some(Self::Verbs),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Nouns => "nouns",
            Self::Adjectives => "adjectives",
            Self::Verbs => "verbs",
        }
    }
}

/// Words available to one generation request, per category.
///
/// Lists keep insertion order so that a seeded generator draws the same
/// words every run; duplicates are never stored twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub nouns: Vec<String>,
    pub adjectives: Vec<String>,
    pub verbs: Vec<String>,
}

impl Vocabulary {
    pub fn words(&self, pos: PartOfSpeech) -> &[String] {
        match pos {
            PartOfSpeech::Nouns => &self.nouns,
            PartOfSpeech::Adjectives => &self.adjectives,
            PartOfSpeech::Verbs => &self.verbs,
        }
    }

    fn words_mut(&mut self, pos: PartOfSpeech) -> &mut Vec<String> {
        match pos {
            PartOfSpeech::Nouns => &mut self.nouns,
            PartOfSpeech::Adjectives => &mut self.adjectives,
            PartOfSpeech::Verbs => &mut self.verbs,
        }
    }

    /// Append words to one category, skipping any already present.
    pub fn extend<'a, I>(&mut self, pos: PartOfSpeech, words: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let list = self.words_mut(pos);
        let mut seen: FxHashSet<String> = list.iter().cloned().collect();
        for word in words {
            if seen.insert(word.to_string()) {
                list.push(word.to_string());
            }
        }
    }

    /// Append a comma-separated list of user words to every category.
    ///
    /// Entries are trimmed and blank entries dropped: `"griffin, , zephyrine"`
    /// adds two words.
    pub fn with_custom_words(mut self, custom: &str) -> Self {
        let words = parse_custom_words(custom);
        if words.is_empty() {
            return self;
        }
        for pos in PartOfSpeech::ALL {
            self.extend(pos, words.iter().map(String::as_str));
        }
        self
    }

    /// True if `word` is listed under any category.
    pub fn contains(&self, word: &str) -> bool {
        PartOfSpeech::ALL
            .iter()
            .any(|pos| self.words(*pos).iter().any(|w| w == word))
    }

    pub fn is_empty(&self) -> bool {
        self.nouns.is_empty() && self.adjectives.is_empty() && self.verbs.is_empty()
    }
}

/// Split a comma-separated custom word list into trimmed, non-empty words.
pub fn parse_custom_words(custom: &str) -> Vec<String> {
    custom
        .split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}
