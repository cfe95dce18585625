/// Lexicon — themed word banks, mood words, rhyme index and archaic forms.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::schema::options::Complexity;
use crate::schema::vocabulary::{PartOfSpeech, Vocabulary};

/// Word banks compiled into the crate.
pub const BUILTIN_LEXICON: &str = include_str!("../../data/lexicon.ron");

/// Theme whose titles are used when a theme has none of its own.
const FALLBACK_TITLE_THEME: &str = "love";
const UNTITLED: &str = "Untitled Sonnet";

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Simple and advanced word lists for one category of a theme.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordTier {
    pub simple: Vec<String>,
    #[serde(default)]
    pub advanced: Vec<String>,
}

impl WordTier {
    /// The advanced tier when asked for and present, else the simple one.
    /// An omitted `advanced` list and an explicit `advanced: []` behave the
    /// same: both fall back to `simple`.
    pub fn for_complexity(&self, complexity: Complexity) -> &[String] {
        match complexity {
            Complexity::Advanced if !self.advanced.is_empty() => &self.advanced,
            _ => &self.simple,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeWords {
    #[serde(default)]
    pub nouns: WordTier,
    #[serde(default)]
    pub adjectives: WordTier,
    #[serde(default)]
    pub verbs: WordTier,
}

impl ThemeWords {
    pub fn tier(&self, pos: PartOfSpeech) -> &WordTier {
        match pos {
            PartOfSpeech::Nouns => &self.nouns,
            PartOfSpeech::Adjectives => &self.adjectives,
            PartOfSpeech::Verbs => &self.verbs,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoodWords {
    #[serde(default)]
    pub nouns: Vec<String>,
    #[serde(default)]
    pub adjectives: Vec<String>,
    #[serde(default)]
    pub verbs: Vec<String>,
}

impl MoodWords {
    pub fn words(&self, pos: PartOfSpeech) -> &[String] {
        match pos {
            PartOfSpeech::Nouns => &self.nouns,
            PartOfSpeech::Adjectives => &self.adjectives,
            PartOfSpeech::Verbs => &self.verbs,
        }
    }
}

/// Words sharing an ending such as "ight".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RhymeEntry {
    pub pattern: String,
    pub words: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchaicCategory {
    Pronouns,
    Verbs,
    Conjunctions,
    Adverbs,
    Adjectives,
}

/// Modern → archaic substitutions ("you" → "thee", "often" → "oft").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchaicWords {
    #[serde(default)]
    pub pronouns: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub verbs: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub conjunctions: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub adverbs: HashMap<String, Vec<String>>,
    /// Adjectives that are already suitably old-fashioned.
    #[serde(default)]
    pub adjectives: Vec<String>,
}

impl ArchaicWords {
    fn table(&self, category: ArchaicCategory) -> Option<&HashMap<String, Vec<String>>> {
        match category {
            ArchaicCategory::Pronouns => Some(&self.pronouns),
            ArchaicCategory::Verbs => Some(&self.verbs),
            ArchaicCategory::Conjunctions => Some(&self.conjunctions),
            ArchaicCategory::Adverbs => Some(&self.adverbs),
            ArchaicCategory::Adjectives => None,
        }
    }
}

/// Read-only word banks queried during generation.
///
/// Unknown themes, moods and categories answer with empty lists; nothing
/// here fails after loading.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lexicon {
    #[serde(default)]
    pub themes: HashMap<String, ThemeWords>,
    #[serde(default)]
    pub moods: HashMap<String, MoodWords>,
    #[serde(default)]
    pub perfect_rhymes: Vec<RhymeEntry>,
    #[serde(default)]
    pub near_rhymes: Vec<RhymeEntry>,
    #[serde(default)]
    pub archaic: ArchaicWords,
    #[serde(default)]
    pub titles: HashMap<String, Vec<String>>,
}

impl Lexicon {
    /// The word banks shipped with the crate.
    pub fn builtin() -> Result<Lexicon, LexiconError> {
        Self::parse_ron(BUILTIN_LEXICON)
    }

    /// Load a lexicon from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Lexicon, LexiconError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<Lexicon, LexiconError> {
        Ok(ron::from_str(input)?)
    }

    /// Merge another lexicon into this one. Themes, moods, titles and
    /// archaic entries from `other` replace those of the same name; rhyme
    /// entries replace the entry with the same pattern or are appended.
    pub fn merge(&mut self, other: Lexicon) {
        for (name, theme) in other.themes {
            if self.themes.insert(name.clone(), theme).is_some() {
                tracing::debug!(theme = %name, "theme overridden");
            }
        }
        for (name, mood) in other.moods {
            if self.moods.insert(name.clone(), mood).is_some() {
                tracing::debug!(mood = %name, "mood overridden");
            }
        }
        self.titles.extend(other.titles);

        merge_rhymes(&mut self.perfect_rhymes, other.perfect_rhymes);
        merge_rhymes(&mut self.near_rhymes, other.near_rhymes);

        self.archaic.pronouns.extend(other.archaic.pronouns);
        self.archaic.verbs.extend(other.archaic.verbs);
        self.archaic.conjunctions.extend(other.archaic.conjunctions);
        self.archaic.adverbs.extend(other.archaic.adverbs);
        for adjective in other.archaic.adjectives {
            if !self.archaic.adjectives.contains(&adjective) {
                self.archaic.adjectives.push(adjective);
            }
        }
    }

    /// Theme words for one category at the requested tier.
    pub fn words_by_category(
        &self,
        theme: &str,
        pos: PartOfSpeech,
        complexity: Complexity,
    ) -> &[String] {
        self.themes
            .get(theme)
            .map(|t| t.tier(pos).for_complexity(complexity))
            .unwrap_or(&[])
    }

    pub fn mood_words(&self, mood: &str, pos: PartOfSpeech) -> &[String] {
        self.moods.get(mood).map(|m| m.words(pos)).unwrap_or(&[])
    }

    /// Theme words followed by mood words, per category, without duplicates.
    pub fn combined_vocabulary(
        &self,
        theme: &str,
        mood: &str,
        complexity: Complexity,
    ) -> Vocabulary {
        let mut vocabulary = Vocabulary::default();
        for pos in PartOfSpeech::ALL {
            let theme_words = self.words_by_category(theme, pos, complexity);
            let mood_words = self.mood_words(mood, pos);
            vocabulary.extend(pos, theme_words.iter().chain(mood_words).map(String::as_str));
        }
        vocabulary
    }

    /// Perfect rhymes for `word`, not including `word` itself.
    pub fn rhyming_words(&self, word: &str) -> Vec<String> {
        lookup_rhymes(&self.perfect_rhymes, word)
    }

    /// Near (slant) rhymes for `word`, not including `word` itself.
    pub fn near_rhymes(&self, word: &str) -> Vec<String> {
        lookup_rhymes(&self.near_rhymes, word)
    }

    /// An archaic form of `modern`, or `modern` unchanged when none is known.
    pub fn archaic_word<R: Rng + ?Sized>(
        &self,
        modern: &str,
        category: ArchaicCategory,
        rng: &mut R,
    ) -> String {
        self.archaic
            .table(category)
            .and_then(|table| table.get(modern))
            .and_then(|options| options.choose(rng))
            .cloned()
            .unwrap_or_else(|| modern.to_string())
    }

    /// Pick a title for a sonnet on `theme`.
    pub fn title_for<R: Rng + ?Sized>(&self, theme: &str, rng: &mut R) -> String {
        self.titles
            .get(theme)
            .filter(|t| !t.is_empty())
            .or_else(|| self.titles.get(FALLBACK_TITLE_THEME))
            .and_then(|titles| titles.choose(rng))
            .cloned()
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    /// The simple-tier nouns, adjectives and verbs of a theme, in that order.
    pub fn simple_theme_words(&self, theme: &str) -> Vec<&str> {
        PartOfSpeech::ALL
            .iter()
            .flat_map(|pos| self.words_by_category(theme, *pos, Complexity::Simple))
            .map(String::as_str)
            .collect()
    }

    /// Sorted theme names.
    pub fn theme_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Sorted mood names.
    pub fn mood_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.moods.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn merge_rhymes(into: &mut Vec<RhymeEntry>, from: Vec<RhymeEntry>) {
    for entry in from {
        match into.iter_mut().find(|e| e.pattern == entry.pattern) {
            Some(existing) => *existing = entry,
            None => into.push(entry),
        }
    }
}

/// The first entry whose pattern ends `word`, or that lists `word`, wins.
fn lookup_rhymes(entries: &[RhymeEntry], word: &str) -> Vec<String> {
    entries
        .iter()
        .find(|e| word.ends_with(e.pattern.as_str()) || e.words.iter().any(|w| w == word))
        .map(|e| e.words.iter().filter(|w| *w != word).cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn builtin() -> Lexicon {
        Lexicon::builtin().unwrap()
    }

    #[test]
    fn builtin_has_all_themes_and_moods() {
        let lex = builtin();
        assert_eq!(
            lex.theme_names(),
            vec!["beauty", "hope", "loss", "love", "nature", "seasons", "time"]
        );
        assert_eq!(
            lex.mood_names(),
            vec!["melancholic", "mysterious", "romantic", "uplifting"]
        );
        assert_eq!(lex.perfect_rhymes.len(), 15);
        assert_eq!(lex.near_rhymes.len(), 8);
    }

    #[test]
    fn tiers_by_complexity() {
        let lex = builtin();
        let simple = lex.words_by_category("love", PartOfSpeech::Nouns, Complexity::Simple);
        assert_eq!(simple[0], "heart");
        let advanced = lex.words_by_category("love", PartOfSpeech::Nouns, Complexity::Advanced);
        assert_eq!(advanced[0], "passion");
    }

    #[test]
    fn advanced_falls_back_to_simple() {
        let lex = Lexicon::parse_ron(
            r#"(themes: {"sea": (nouns: (simple: ["wave", "tide"]))})"#,
        )
        .unwrap();
        let words = lex.words_by_category("sea", PartOfSpeech::Nouns, Complexity::Advanced);
        assert_eq!(words, ["wave", "tide"]);
        assert!(lex
            .words_by_category("sea", PartOfSpeech::Verbs, Complexity::Simple)
            .is_empty());
    }

    #[test]
    fn explicit_empty_advanced_tier_falls_back_too() {
        let lex = Lexicon::parse_ron(
            r#"(themes: {"sea": (nouns: (simple: ["wave"], advanced: []))})"#,
        )
        .unwrap();
        let words = lex.words_by_category("sea", PartOfSpeech::Nouns, Complexity::Advanced);
        assert_eq!(words, ["wave"]);
    }

    #[test]
    fn unknown_keys_are_empty() {
        let lex = builtin();
        assert!(lex
            .words_by_category("war", PartOfSpeech::Nouns, Complexity::Simple)
            .is_empty());
        assert!(lex.mood_words("bored", PartOfSpeech::Verbs).is_empty());
        assert!(lex.combined_vocabulary("war", "bored", Complexity::Simple).is_empty());
    }

    #[test]
    fn combined_vocabulary_deduplicates() {
        let lex = builtin();
        let vocab = lex.combined_vocabulary("love", "romantic", Complexity::Simple);
        // "kiss" and "hold" are both love verbs and romantic verbs
        assert_eq!(vocab.verbs.iter().filter(|v| *v == "kiss").count(), 1);
        assert_eq!(vocab.verbs.iter().filter(|v| *v == "hold").count(), 1);
        assert_eq!(vocab.verbs[0], "love");
        assert!(vocab.adjectives.contains(&"gentle".to_string()));
    }

    #[test]
    fn combined_vocabulary_is_idempotent() {
        let lex = builtin();
        let a = lex.combined_vocabulary("nature", "mysterious", Complexity::Advanced);
        let b = lex.combined_vocabulary("nature", "mysterious", Complexity::Advanced);
        assert_eq!(a, b);
    }

    #[test]
    fn rhyming_words_exclude_self() {
        let lex = builtin();
        let rhymes = lex.rhyming_words("night");
        assert!(rhymes.contains(&"light".to_string()));
        assert!(!rhymes.contains(&"night".to_string()));

        // listed word without the pattern suffix
        let rhymes = lex.rhyming_words("hour");
        assert!(rhymes.contains(&"flower".to_string()));

        assert!(lex.rhyming_words("xylophone").is_empty());
    }

    #[test]
    fn near_rhymes_use_their_own_table() {
        let lex = builtin();
        let rhymes = lex.near_rhymes("delight");
        assert!(rhymes.contains(&"ignite".to_string()));
        assert!(!rhymes.contains(&"night".to_string()));
    }

    #[test]
    fn archaic_substitution() {
        let lex = builtin();
        let mut rng = StdRng::seed_from_u64(7);
        let word = lex.archaic_word("you", ArchaicCategory::Pronouns, &mut rng);
        assert!(["thee", "thou", "ye"].contains(&word.as_str()));
        assert_eq!(
            lex.archaic_word("often", ArchaicCategory::Adverbs, &mut rng),
            "oft"
        );
        assert_eq!(
            lex.archaic_word("fair", ArchaicCategory::Adjectives, &mut rng),
            "fair"
        );
        assert_eq!(
            lex.archaic_word("banana", ArchaicCategory::Verbs, &mut rng),
            "banana"
        );
        assert!(lex.archaic.adjectives.iter().any(|a| a == "beauteous"));
    }

    #[test]
    fn titles_fall_back_to_love() {
        let lex = builtin();
        let mut rng = StdRng::seed_from_u64(1);
        let title = lex.title_for("war", &mut rng);
        assert!(lex.titles["love"].contains(&title));
        let title = lex.title_for("seasons", &mut rng);
        assert!(lex.titles["seasons"].contains(&title));
        assert_eq!(Lexicon::default().title_for("love", &mut rng), "Untitled Sonnet");
    }

    #[test]
    fn merge_precedence() {
        let mut lex = builtin();
        let custom = Lexicon::parse_ron(
            r#"(
                themes: {
                    "love": (nouns: (simple: ["valentine"])),
                    "sea": (nouns: (simple: ["wave"])),
                },
                perfect_rhymes: [
                    (pattern: "ight", words: ["kite", "bite"]),
                    (pattern: "ave", words: ["wave", "cave"]),
                ],
            )"#,
        )
        .unwrap();
        lex.merge(custom);

        assert_eq!(
            lex.words_by_category("love", PartOfSpeech::Nouns, Complexity::Simple),
            ["valentine"]
        );
        assert!(lex.themes.contains_key("sea"));
        assert!(lex.themes.contains_key("nature"));
        assert_eq!(lex.rhyming_words("kite"), vec!["bite"]);
        assert_eq!(lex.rhyming_words("cave"), vec!["wave"]);
        assert_eq!(lex.perfect_rhymes.len(), 16);
    }
}
