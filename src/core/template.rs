/// Sentence templates — parsing, slot tables and substitution.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::vocabulary::Vocabulary;

/// Templates compiled into the crate.
pub const BUILTIN_TEMPLATES: &str = include_str!("../../data/templates.ron");

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template parse error: {0}")]
    Parse(String),
    #[error("unknown placeholder '{{{0}}}'")]
    UnknownSlot(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// A named hole in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    Article,
    Pronoun,
    Adjective,
    Noun,
    Verb,
    AbstractNoun,
    Adverb,
    Time,
    Place,
    TimePlace,
    TimeCondition,
    Emotion,
    Comparison,
    Condition,
    Object,
}

impl SlotKind {
    pub const ALL: [SlotKind; 15] = [
        Self::Article,
        Self::Pronoun,
        Self::Adjective,
        Self::Noun,
        Self::Verb,
        Self::AbstractNoun,
        Self::Adverb,
        Self::Time,
        Self::Place,
        Self::TimePlace,
        Self::TimeCondition,
        Self::Emotion,
        Self::Comparison,
        Self::Condition,
        Self::Object,
    ];

    /// The placeholder name as written between braces.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Article => "ARTICLE",
            Self::Pronoun => "PRONOUN",
            Self::Adjective => "ADJECTIVE",
            Self::Noun => "NOUN",
            Self::Verb => "VERB",
            Self::AbstractNoun => "ABSTRACT_NOUN",
            Self::Adverb => "ADVERB",
            Self::Time => "TIME",
            Self::Place => "PLACE",
            Self::TimePlace => "TIME_PLACE",
            Self::TimeCondition => "TIME_CONDITION",
            Self::Emotion => "EMOTION",
            Self::Comparison => "COMPARISON",
            Self::Condition => "CONDITION",
            Self::Object => "OBJECT",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.token() == token)
    }
}

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateSegment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// Placeholder filled from the slot table: `{NOUN}`.
    Slot(SlotKind),
}

/// Literal text interleaved with slots, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub segments: Vec<TemplateSegment>,
}

impl Template {
    /// Parse a template string into a sequence of segments.
    ///
    /// Syntax:
    /// - `{NAME}` → `Slot`, where NAME is one of the [`SlotKind`] tokens
    /// - `{{` / `}}` → literal `{` / `}`
    /// - Everything else → `Literal`
    pub fn parse(input: &str) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut literal_buf = String::new();
        let chars: Vec<char> = input.chars().collect();
        let len = chars.len();
        let mut i = 0;

        while i < len {
            match chars[i] {
                '{' if i + 1 < len && chars[i + 1] == '{' => {
                    literal_buf.push('{');
                    i += 2;
                }
                '{' => {
                    if !literal_buf.is_empty() {
                        segments.push(TemplateSegment::Literal(std::mem::take(&mut literal_buf)));
                    }

                    let start = i + 1;
                    let mut end = start;
                    while end < len && chars[end] != '}' {
                        if chars[end] == '{' {
                            return Err(TemplateError::Parse(
                                "nested braces are not allowed".to_string(),
                            ));
                        }
                        end += 1;
                    }
                    if end == len {
                        return Err(TemplateError::Parse("unclosed brace".to_string()));
                    }

                    let name: String = chars[start..end].iter().collect();
                    if name.is_empty() {
                        return Err(TemplateError::Parse("empty braces".to_string()));
                    }
                    let slot =
                        SlotKind::from_token(&name).ok_or(TemplateError::UnknownSlot(name))?;
                    segments.push(TemplateSegment::Slot(slot));
                    i = end + 1;
                }
                '}' if i + 1 < len && chars[i + 1] == '}' => {
                    literal_buf.push('}');
                    i += 2;
                }
                '}' => {
                    return Err(TemplateError::Parse(
                        "unmatched closing brace".to_string(),
                    ));
                }
                c => {
                    literal_buf.push(c);
                    i += 1;
                }
            }
        }

        if !literal_buf.is_empty() {
            segments.push(TemplateSegment::Literal(literal_buf));
        }

        Ok(Template { segments })
    }

    /// Distinct slots in order of first appearance.
    pub fn slots(&self) -> Vec<SlotKind> {
        let mut slots = Vec::new();
        for segment in &self.segments {
            if let TemplateSegment::Slot(kind) = segment {
                if !slots.contains(kind) {
                    slots.push(*kind);
                }
            }
        }
        slots
    }

    /// Fill every slot from `table`.
    ///
    /// Each distinct slot is drawn once, so a template that names `{VERB}`
    /// twice repeats the same verb. Slots with no candidates become empty.
    pub fn fill<R: Rng + ?Sized>(&self, table: &SlotTable<'_>, rng: &mut R) -> String {
        let choices: Vec<(SlotKind, &str)> = self
            .slots()
            .into_iter()
            .map(|kind| {
                let word = table
                    .candidates(kind)
                    .choose(rng)
                    .map(String::as_str)
                    .unwrap_or("");
                (kind, word)
            })
            .collect();

        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                TemplateSegment::Literal(text) => out.push_str(text),
                TemplateSegment::Slot(kind) => {
                    if let Some((_, word)) = choices.iter().find(|(k, _)| k == kind) {
                        out.push_str(word);
                    }
                }
            }
        }
        out
    }
}

/// Grammatical mood of a sentence template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentenceMood {
    Declarative,
    Interrogative,
    Exclamatory,
}

/// Templates grouped by grammatical mood.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSet {
    pub declarative: Vec<Template>,
    pub interrogative: Vec<Template>,
    pub exclamatory: Vec<Template>,
}

#[derive(Debug, Deserialize)]
struct RonTemplateSet {
    #[serde(default)]
    declarative: Vec<String>,
    #[serde(default)]
    interrogative: Vec<String>,
    #[serde(default)]
    exclamatory: Vec<String>,
}

impl TemplateSet {
    /// The templates shipped with the crate.
    pub fn builtin() -> Result<TemplateSet, TemplateError> {
        Self::parse_ron(BUILTIN_TEMPLATES)
    }

    /// Load a template set from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<TemplateSet, TemplateError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a template set from a RON string.
    pub fn parse_ron(input: &str) -> Result<TemplateSet, TemplateError> {
        let raw: RonTemplateSet = ron::from_str(input)?;
        Ok(TemplateSet {
            declarative: parse_all(&raw.declarative)?,
            interrogative: parse_all(&raw.interrogative)?,
            exclamatory: parse_all(&raw.exclamatory)?,
        })
    }

    /// Templates for one mood. An empty interrogative or exclamatory bucket
    /// yields the declarative templates instead.
    pub fn bucket(&self, mood: SentenceMood) -> &[Template] {
        let templates = match mood {
            SentenceMood::Declarative => &self.declarative,
            SentenceMood::Interrogative => &self.interrogative,
            SentenceMood::Exclamatory => &self.exclamatory,
        };
        if templates.is_empty() {
            &self.declarative
        } else {
            templates
        }
    }

    /// Append the templates of `other` to this set.
    pub fn merge(&mut self, other: TemplateSet) {
        self.declarative.extend(other.declarative);
        self.interrogative.extend(other.interrogative);
        self.exclamatory.extend(other.exclamatory);
    }

    pub fn len(&self) -> usize {
        self.declarative.len() + self.interrogative.len() + self.exclamatory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_all(sources: &[String]) -> Result<Vec<Template>, TemplateError> {
    sources.iter().map(|s| Template::parse(s)).collect()
}

const ARTICLES: &[&str] = &["the", "a", "an"];
const ARCHAIC_PRONOUNS: &[&str] = &["thou", "thee", "I", "we"];
const MODERN_PRONOUNS: &[&str] = &["you", "I", "we", "they", "he", "she"];
const ADVERBS: &[&str] = &["softly", "gently", "sweetly", "deeply", "truly", "ever", "still"];
const TIMES: &[&str] = &["dawn", "dusk", "night", "day", "spring", "winter", "summer"];
const PLACES: &[&str] = &["garden", "meadow", "sky", "sea", "forest", "mountain"];
const TIME_PLACES: &[&str] = &[
    "the morning",
    "the evening",
    "the garden",
    "my heart",
    "the sky",
];
const TIME_CONDITIONS: &[&str] = &["dawn breaks", "night falls", "spring comes", "winter ends"];
const EMOTIONS: &[&str] = &["joy", "sorrow", "love", "hope", "longing", "peace"];
const COMPARISONS: &[&str] = &["a rose", "the wind", "a star", "the sun", "a dream"];
const CONDITIONS: &[&str] = &["love is near", "hope is lost", "time stands still"];
const OBJECTS: &[&str] = &["my heart", "thy hand", "the world", "this dream"];

/// Candidate words for every slot, built once per line attempt.
#[derive(Debug, Clone)]
pub struct SlotTable<'a> {
    vocabulary: &'a Vocabulary,
    pronouns: Vec<String>,
    closed: Vec<(SlotKind, Vec<String>)>,
}

impl<'a> SlotTable<'a> {
    /// Closed word lists plus the vocabulary's open categories. `archaic`
    /// swaps the modern pronoun set for thou/thee.
    pub fn build(vocabulary: &'a Vocabulary, archaic: bool) -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect::<Vec<_>>();
        let pronouns = if archaic {
            owned(ARCHAIC_PRONOUNS)
        } else {
            owned(MODERN_PRONOUNS)
        };
        let closed = vec![
            (SlotKind::Article, owned(ARTICLES)),
            (SlotKind::Adverb, owned(ADVERBS)),
            (SlotKind::Time, owned(TIMES)),
            (SlotKind::Place, owned(PLACES)),
            (SlotKind::TimePlace, owned(TIME_PLACES)),
            (SlotKind::TimeCondition, owned(TIME_CONDITIONS)),
            (SlotKind::Emotion, owned(EMOTIONS)),
            (SlotKind::Comparison, owned(COMPARISONS)),
            (SlotKind::Condition, owned(CONDITIONS)),
            (SlotKind::Object, owned(OBJECTS)),
        ];
        Self {
            vocabulary,
            pronouns,
            closed,
        }
    }

    pub fn candidates(&self, kind: SlotKind) -> &[String] {
        match kind {
            SlotKind::Adjective => &self.vocabulary.adjectives,
            SlotKind::Noun | SlotKind::AbstractNoun => &self.vocabulary.nouns,
            SlotKind::Verb => &self.vocabulary.verbs,
            SlotKind::Pronoun => &self.pronouns,
            _ => self
                .closed
                .iter()
                .find(|(k, _)| *k == kind)
                .map(|(_, words)| words.as_slice())
                .unwrap_or(&[]),
        }
    }
}
