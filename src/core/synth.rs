/// Line synthesis: template choice, rhyme forcing and syllable correction.

use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashMap;

use crate::core::lexicon::Lexicon;
use crate::core::prosody::{count_line_syllables, count_syllables, TRAILING_PUNCTUATION};
use crate::core::template::{SentenceMood, SlotTable, TemplateSet};
use crate::schema::options::Complexity;
use crate::schema::vocabulary::Vocabulary;

/// The first final word seen for each rhyme-scheme letter.
#[derive(Debug, Clone, Default)]
pub struct RhymeAnchors {
    words: FxHashMap<char, String>,
}

impl RhymeAnchors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, letter: char) -> Option<&str> {
        self.words.get(&letter).map(String::as_str)
    }

    /// Record `word` as the anchor for `letter` unless one is already set.
    /// Empty words are ignored. Returns true when the anchor was stored.
    pub fn record(&mut self, letter: char, word: &str) -> bool {
        if word.is_empty() || self.words.contains_key(&letter) {
            return false;
        }
        self.words.insert(letter, word.to_string());
        true
    }
}

/// Template bucket for a line position.
pub fn mood_for_line(line_index: usize) -> SentenceMood {
    match line_index {
        7 | 13 => SentenceMood::Exclamatory,
        3 | 11 => SentenceMood::Interrogative,
        _ => SentenceMood::Declarative,
    }
}

/// Produces one candidate line per call. Never fails: with no templates or
/// no vocabulary it still returns a (possibly empty) line.
pub struct LineSynthesizer<'a> {
    lexicon: &'a Lexicon,
    templates: &'a TemplateSet,
    target: usize,
}

impl<'a> LineSynthesizer<'a> {
    pub fn new(lexicon: &'a Lexicon, templates: &'a TemplateSet, target: usize) -> Self {
        Self {
            lexicon,
            templates,
            target,
        }
    }

    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        vocabulary: &Vocabulary,
        complexity: Complexity,
        letter: char,
        anchors: &RhymeAnchors,
        line_index: usize,
        rng: &mut R,
    ) -> String {
        let bucket = self.templates.bucket(mood_for_line(line_index));
        let template = match bucket.choose(rng) {
            Some(t) => t,
            None => return String::new(),
        };

        let table = SlotTable::build(vocabulary, complexity.is_archaic());
        let filled = normalize(&template.fill(&table, rng));

        if let Some(anchor) = anchors.get(letter) {
            let rhymes: Vec<String> = self
                .lexicon
                .rhyming_words(anchor)
                .into_iter()
                .filter(|w| vocabulary.contains(w))
                .collect();
            // A forced rhyme is final; syllable correction could displace it.
            if let Some(rhyme) = rhymes.choose(rng) {
                return replace_final_word(&filled, rhyme);
            }
        }

        self.adjust_syllables(&filled, vocabulary, rng)
    }

    /// Nudge a line toward the target syllable count.
    pub fn adjust_syllables<R: Rng + ?Sized>(
        &self,
        line: &str,
        vocabulary: &Vocabulary,
        rng: &mut R,
    ) -> String {
        let syllables = count_line_syllables(line);
        if syllables < self.target {
            expand_line(line, vocabulary, self.target - syllables, rng)
        } else if syllables > self.target {
            contract_line(line, syllables - self.target)
        } else {
            line.to_string()
        }
    }
}

/// Insert one adjective that fits within `deficit` syllables after the
/// first word.
pub fn expand_line<R: Rng + ?Sized>(
    line: &str,
    vocabulary: &Vocabulary,
    deficit: usize,
    rng: &mut R,
) -> String {
    let mut words: Vec<&str> = line.split_whitespace().collect();
    let fitting: Vec<&String> = vocabulary
        .adjectives
        .iter()
        .filter(|adj| count_syllables(adj) <= deficit)
        .collect();

    if let Some(adjective) = fitting.choose(rng) {
        words.insert(words.len().min(1), adjective.as_str());
    }
    words.join(" ")
}

/// Drop short words from the second-to-last position backwards until the
/// excess is used up. The final word is never removed.
pub fn contract_line(line: &str, excess: usize) -> String {
    let mut words: Vec<&str> = line.split_whitespace().collect();
    let mut remaining = excess;
    let mut i = words.len().saturating_sub(1);

    while i > 0 && remaining > 0 {
        i -= 1;
        let cost = count_syllables(words[i]);
        if cost <= remaining && words[i].chars().count() < 5 {
            words.remove(i);
            remaining -= cost;
        }
    }
    words.join(" ")
}

/// Swap the last word for `word`, keeping its trailing punctuation.
pub fn replace_final_word(line: &str, word: &str) -> String {
    let mut words: Vec<&str> = line.split_whitespace().collect();
    let last = match words.pop() {
        Some(last) => last,
        None => return word.to_string(),
    };
    let bare = last.trim_end_matches(TRAILING_PUNCTUATION);
    let punctuation = &last[bare.len()..];

    let mut out = words.join(" ");
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(word);
    out.push_str(punctuation);
    out
}

fn normalize(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn words(nouns: &[&str], adjectives: &[&str], verbs: &[&str]) -> Vocabulary {
        let own = |ws: &[&str]| ws.iter().map(|w| w.to_string()).collect();
        Vocabulary {
            nouns: own(nouns),
            adjectives: own(adjectives),
            verbs: own(verbs),
        }
    }

    #[test]
    fn line_moods() {
        assert_eq!(mood_for_line(0), SentenceMood::Declarative);
        assert_eq!(mood_for_line(8), SentenceMood::Declarative);
        assert_eq!(mood_for_line(7), SentenceMood::Exclamatory);
        assert_eq!(mood_for_line(13), SentenceMood::Exclamatory);
        assert_eq!(mood_for_line(3), SentenceMood::Interrogative);
        assert_eq!(mood_for_line(11), SentenceMood::Interrogative);
        assert_eq!(mood_for_line(5), SentenceMood::Declarative);
    }

    #[test]
    fn anchors_keep_first_word() {
        let mut anchors = RhymeAnchors::new();
        assert!(!anchors.record('A', ""));
        assert_eq!(anchors.get('A'), None);
        assert!(anchors.record('A', "night"));
        assert!(!anchors.record('A', "day"));
        assert_eq!(anchors.get('A'), Some("night"));
        assert_eq!(anchors.get('B'), None);
    }

    #[test]
    fn contract_removes_short_words_before_the_end() {
        assert_eq!(contract_line("I see the sun rise", 2), "I see rise");
        assert_eq!(contract_line("we hope", 5), "hope");
    }

    #[test]
    fn contract_skips_long_words() {
        assert_eq!(
            contract_line("beautiful wonderful sky", 5),
            "beautiful wonderful sky"
        );
        assert_eq!(contract_line("", 3), "");
    }

    #[test]
    fn expand_inserts_after_first_word() {
        let vocab = words(&[], &["red"], &[]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            expand_line("the rose fades", &vocab, 1, &mut rng),
            "the red rose fades"
        );
        assert_eq!(
            expand_line("the rose fades", &vocab, 0, &mut rng),
            "the rose fades"
        );
        assert_eq!(expand_line("", &vocab, 2, &mut rng), "red");
    }

    #[test]
    fn final_word_replacement_keeps_punctuation() {
        assert_eq!(
            replace_final_word("What can heal the heart?", "art"),
            "What can heal the art?"
        );
        assert_eq!(replace_final_word("O night", "light"), "O light");
        assert_eq!(replace_final_word("", "light"), "light");
    }

    #[test]
    fn anchored_line_ends_with_a_rhyme() {
        let lexicon = Lexicon::builtin().unwrap();
        let templates =
            TemplateSet::parse_ron(r#"(declarative: ["{ADJECTIVE} {NOUN} {VERB} at {TIME}"])"#)
                .unwrap();
        let synth = LineSynthesizer::new(&lexicon, &templates, 10);
        let vocab = words(&["bright"], &["slow"], &["sings"]);
        let mut anchors = RhymeAnchors::new();
        anchors.record('A', "night");

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let line = synth.synthesize(&vocab, Complexity::Simple, 'A', &anchors, 0, &mut rng);
            assert!(line.ends_with("bright"), "seed {}: {}", seed, line);
        }
    }

    #[test]
    fn forced_rhyme_skips_syllable_adjustment() {
        let lexicon = Lexicon::builtin().unwrap();
        let templates = TemplateSet::parse_ron(r#"(declarative: ["{NOUN}"])"#).unwrap();
        let synth = LineSynthesizer::new(&lexicon, &templates, 10);
        let vocab = words(&["bright"], &["slow"], &[]);
        let mut anchors = RhymeAnchors::new();
        anchors.record('A', "night");

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let line = synth.synthesize(&vocab, Complexity::Simple, 'A', &anchors, 2, &mut rng);
            assert_eq!(line, "bright", "seed {}", seed);
        }
    }

    #[test]
    fn unmatched_anchor_still_adjusts() {
        let lexicon = Lexicon::builtin().unwrap();
        let templates = TemplateSet::parse_ron(r#"(declarative: ["{NOUN}"])"#).unwrap();
        let synth = LineSynthesizer::new(&lexicon, &templates, 10);
        let vocab = words(&["rose"], &["slow"], &[]);
        let mut anchors = RhymeAnchors::new();
        anchors.record('A', "night");

        let mut rng = StdRng::seed_from_u64(4);
        let line = synth.synthesize(&vocab, Complexity::Simple, 'A', &anchors, 2, &mut rng);
        assert_eq!(line, "rose slow");
    }

    #[test]
    fn unanchored_letter_fills_normally() {
        let lexicon = Lexicon::builtin().unwrap();
        let templates = TemplateSet::parse_ron(r#"(declarative: ["The {NOUN} {VERB}"])"#).unwrap();
        let synth = LineSynthesizer::new(&lexicon, &templates, 3);
        let vocab = words(&["rose"], &[], &["glows"]);
        let mut rng = StdRng::seed_from_u64(9);
        let line = synth.synthesize(
            &vocab,
            Complexity::Simple,
            'B',
            &RhymeAnchors::new(),
            2,
            &mut rng,
        );
        assert_eq!(line, "The rose glows");
    }

    #[test]
    fn empty_inputs_never_panic() {
        let lexicon = Lexicon::default();
        let templates = TemplateSet::default();
        let synth = LineSynthesizer::new(&lexicon, &templates, 10);
        let mut rng = StdRng::seed_from_u64(0);
        let line = synth.synthesize(
            &Vocabulary::default(),
            Complexity::Advanced,
            'A',
            &RhymeAnchors::new(),
            0,
            &mut rng,
        );
        assert!(line.is_empty());
    }
}
