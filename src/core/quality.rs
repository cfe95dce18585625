/// Quality assessment for a finished set of lines.
///
/// Four sub-scores in `[0, 1]`: theme coherence, naive grammar, repetition
/// and metrical flow. The overall score is their plain mean.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::lexicon::Lexicon;
use crate::core::prosody::{check_rhythm, validate_line_length};

const AUXILIARY_VERBS: &[&str] = &[
    "is", "are", "was", "were", "be", "being", "been", "have", "has", "had", "do", "does", "did",
    "will", "would", "could", "should", "may", "might", "can",
];

const MIN_GRAMMAR_WORDS: usize = 3;
/// Words this short are never counted as repetition.
const REPETITION_MIN_LEN: usize = 4;
const REPETITION_MAX_USES: usize = 2;
const NATURAL_FLOW_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoherenceCheck {
    pub coherent: bool,
    pub score: f64,
    pub theme_words: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarCheck {
    pub valid: bool,
    pub reason: String,
    pub word_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repetition {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepetitionReport {
    pub has_repetition: bool,
    /// Flagged words, sorted alphabetically.
    pub repetitions: Vec<Repetition>,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowReport {
    pub score: f64,
    pub natural_rhythm: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityDetails {
    pub coherence: Vec<CoherenceCheck>,
    pub grammar: Vec<GrammarCheck>,
    pub repetition: RepetitionReport,
    pub flow: FlowReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityScore {
    pub overall: f64,
    pub coherence: f64,
    pub grammar: f64,
    pub repetition: f64,
    pub flow: f64,
    pub details: QualityDetails,
}

/// Passes when the line has at least three words and one of them looks
/// like a verb: an auxiliary, or a token ending in `ing`, `ed` or `s`.
pub fn check_grammar(line: &str) -> GrammarCheck {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() < MIN_GRAMMAR_WORDS {
        return GrammarCheck {
            valid: false,
            reason: "Too short".to_string(),
            word_count: words.len(),
        };
    }

    let has_verb = words.iter().any(|w| {
        AUXILIARY_VERBS.contains(&w.to_lowercase().as_str())
            || w.ends_with("ing")
            || w.ends_with("ed")
            || w.ends_with('s')
    });

    GrammarCheck {
        valid: has_verb,
        reason: if has_verb { "Good" } else { "No verb detected" }.to_string(),
        word_count: words.len(),
    }
}

/// Counts line words that overlap a theme word by substring, either way.
pub fn check_coherence(line: &str, theme_words: &[&str]) -> CoherenceCheck {
    let lowered = line.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let hits = words
        .iter()
        .filter(|w| {
            theme_words
                .iter()
                .any(|t| w.contains(t) || t.contains(*w))
        })
        .count();

    CoherenceCheck {
        coherent: hits > 0,
        score: hits as f64 / words.len().max(1) as f64,
        theme_words: hits,
    }
}

pub fn check_repetition<S: AsRef<str>>(lines: &[S]) -> RepetitionReport {
    let joined = lines
        .iter()
        .map(|l| l.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for word in joined.split_whitespace() {
        if word.chars().count() >= REPETITION_MIN_LEN {
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    let mut repetitions: Vec<Repetition> = counts
        .iter()
        .filter(|(_, count)| **count > REPETITION_MAX_USES)
        .map(|(word, count)| Repetition {
            word: word.to_string(),
            count: *count,
        })
        .collect();
    repetitions.sort_by(|a, b| a.word.cmp(&b.word));

    RepetitionReport {
        has_repetition: !repetitions.is_empty(),
        score: 1.0 - repetitions.len() as f64 / counts.len().max(1) as f64,
        repetitions,
    }
}

/// Half a point per line for good rhythm, half for hitting the syllable
/// target, averaged over the lines.
pub fn assess_flow<S: AsRef<str>>(lines: &[S], target: usize) -> FlowReport {
    if lines.is_empty() {
        return FlowReport {
            score: 0.0,
            natural_rhythm: false,
        };
    }

    let total: f64 = lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            let mut points = 0.0;
            if check_rhythm(line).is_good_rhythm {
                points += 0.5;
            }
            if validate_line_length(line, target).is_valid {
                points += 0.5;
            }
            points
        })
        .sum();

    let score = total / lines.len() as f64;
    FlowReport {
        score,
        natural_rhythm: score > NATURAL_FLOW_THRESHOLD,
    }
}

/// Scores lines against a theme from the lexicon.
pub struct QualityAssessor<'a> {
    lexicon: &'a Lexicon,
    target: usize,
}

impl<'a> QualityAssessor<'a> {
    pub fn new(lexicon: &'a Lexicon, target: usize) -> Self {
        Self { lexicon, target }
    }

    pub fn assess<S: AsRef<str>>(&self, lines: &[S], theme: &str) -> QualityScore {
        let theme_words = self.lexicon.simple_theme_words(theme);
        let coherence: Vec<CoherenceCheck> = lines
            .iter()
            .map(|l| check_coherence(l.as_ref(), &theme_words))
            .collect();
        let grammar: Vec<GrammarCheck> = lines.iter().map(|l| check_grammar(l.as_ref())).collect();
        let repetition = check_repetition(lines);
        let flow = assess_flow(lines, self.target);

        let denominator = lines.len().max(1) as f64;
        let coherence_score = coherence.iter().filter(|c| c.coherent).count() as f64 / denominator;
        let grammar_score = grammar.iter().filter(|g| g.valid).count() as f64 / denominator;
        let overall = (coherence_score + grammar_score + repetition.score + flow.score) / 4.0;

        QualityScore {
            overall,
            coherence: coherence_score,
            grammar: grammar_score,
            repetition: repetition.score,
            flow: flow.score,
            details: QualityDetails {
                coherence,
                grammar,
                repetition,
                flow,
            },
        }
    }
}
