/// Post-hoc analysis of a sonnet's structure, meter, rhyme, vocabulary,
/// themes, literary devices and emotional tone.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::prosody::{
    check_rhythm, count_line_syllables, is_iambic_pentameter, validate_rhyme_scheme,
    RhymeValidation, RhythmReport,
};
use crate::schema::options::SonnetType;
use crate::schema::scheme::RhymeScheme;
use crate::schema::sonnet::Sonnet;

const THEME_KEYWORDS: &[(&str, &[&str])] = &[
    ("love", &["love", "heart", "dear", "beloved", "passion", "romance", "kiss", "tender"]),
    ("nature", &["sun", "moon", "tree", "flower", "wind", "sea", "sky", "earth", "season"]),
    ("time", &["time", "age", "year", "day", "moment", "eternal", "forever", "fleeting"]),
    ("beauty", &["beauty", "fair", "lovely", "grace", "elegant", "divine", "radiant"]),
    ("loss", &["loss", "grief", "sorrow", "pain", "farewell", "memory", "absence"]),
];

const EMOTION_KEYWORDS: &[(&str, &[&str])] = &[
    ("joy", &["joy", "happy", "bright", "smile", "laugh", "delight", "glad", "cheer"]),
    ("melancholy", &["sad", "sorrow", "tear", "weep", "mourn", "lament", "grief", "dark"]),
    ("love", &["love", "adore", "cherish", "tender", "sweet", "dear", "beloved"]),
    ("wonder", &["wonder", "awe", "marvel", "mystery", "magic", "divine", "sublime"]),
    ("longing", &["yearn", "long", "desire", "wish", "dream", "hope", "seek"]),
];

const METAPHOR_MARKERS: &[&str] = &["like", "as", "is", "are", "becomes", "transforms"];
const DETECTED_THEME_LIMIT: usize = 3;
const REPETITION_RATIO: f64 = 0.1;
const REGULAR_SYLLABLES: std::ops::RangeInclusive<f64> = 9.0..=11.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Adherence {
    Good,
    NeedsImprovement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureAnalysis {
    pub line_count: usize,
    pub sonnet_type: SonnetType,
    pub rhyme_scheme: String,
    /// Rounded to one decimal.
    pub avg_words_per_line: f64,
    /// Rounded to one decimal.
    pub avg_syllables_per_line: f64,
    pub adherence: Adherence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RhythmAssessment {
    Excellent,
    Good,
    NeedsWork,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterAnalysis {
    pub syllable_counts: Vec<usize>,
    pub iambic_pentameter: Vec<bool>,
    pub rhythm: Vec<RhythmReport>,
    /// Fraction of lines that scan as iambic pentameter.
    pub compliance: f64,
    /// Percentage of lines with 9 to 11 syllables.
    pub rhythm_score: u32,
    pub assessment: RhythmAssessment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordStats {
    pub total_words: usize,
    pub unique_words: usize,
    pub average_words_per_line: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeHit {
    pub theme: String,
    pub count: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThematicRichness {
    Rich,
    Focused,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeAnalysis {
    pub primary: String,
    /// Up to three themes, most keyword hits first.
    pub detected: Vec<ThemeHit>,
    pub richness: ThematicRichness,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiteraryDevice {
    Alliteration(usize),
    Metaphor(usize),
    Repetition,
    DirectImagery,
}

impl fmt::Display for LiteraryDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alliteration(n) => write!(f, "Alliteration ({} instances)", n),
            Self::Metaphor(n) => write!(f, "Metaphorical language ({} indicators)", n),
            Self::Repetition => write!(f, "Repetition for emphasis"),
            Self::DirectImagery => write!(f, "Direct, clear imagery"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intensity {
    Subtle,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmotionalRange {
    Focused,
    Complex,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionAnalysis {
    /// `contemplative` when no emotion keyword appears.
    pub primary: String,
    pub intensity: Intensity,
    pub range: EmotionalRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SonnetAnalysis {
    pub structure: StructureAnalysis,
    pub meter: MeterAnalysis,
    pub rhyme: RhymeValidation,
    pub word_stats: WordStats,
    pub themes: ThemeAnalysis,
    pub devices: Vec<LiteraryDevice>,
    pub emotion: EmotionAnalysis,
}

pub fn analyze_sonnet(sonnet: &Sonnet) -> SonnetAnalysis {
    analyze_lines(&sonnet.lines, sonnet.sonnet_type, &sonnet.theme)
}

pub fn analyze_lines<S: AsRef<str>>(
    lines: &[S],
    sonnet_type: SonnetType,
    theme: &str,
) -> SonnetAnalysis {
    let lines: Vec<&str> = lines.iter().map(|l| l.as_ref()).collect();
    let text = lines.join(" ").to_lowercase();

    SonnetAnalysis {
        structure: analyze_structure(&lines, sonnet_type),
        meter: analyze_meter(&lines),
        rhyme: validate_rhyme_scheme(&lines, sonnet_type.name()),
        word_stats: word_stats(&lines),
        themes: analyze_themes(&text, theme),
        devices: literary_devices(&text),
        emotion: analyze_emotion(&text),
    }
}

fn per_line(total: usize, lines: usize) -> f64 {
    total as f64 / lines.max(1) as f64
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn analyze_structure(lines: &[&str], sonnet_type: SonnetType) -> StructureAnalysis {
    let words: usize = lines.iter().map(|l| l.split_whitespace().count()).sum();
    let syllables: usize = lines.iter().map(|l| count_line_syllables(l)).sum();
    let avg_syllables = per_line(syllables, lines.len());

    StructureAnalysis {
        line_count: lines.len(),
        sonnet_type,
        rhyme_scheme: RhymeScheme::for_type(sonnet_type).pattern(),
        avg_words_per_line: round_tenth(per_line(words, lines.len())),
        avg_syllables_per_line: round_tenth(avg_syllables),
        adherence: if REGULAR_SYLLABLES.contains(&avg_syllables) {
            Adherence::Good
        } else {
            Adherence::NeedsImprovement
        },
    }
}

pub fn analyze_meter(lines: &[&str]) -> MeterAnalysis {
    let syllable_counts: Vec<usize> = lines.iter().map(|l| count_line_syllables(l)).collect();
    let iambic_pentameter: Vec<bool> = lines.iter().map(|l| is_iambic_pentameter(l)).collect();
    let rhythm = lines.iter().map(|l| check_rhythm(l)).collect();

    let iambic = iambic_pentameter.iter().filter(|ok| **ok).count();
    let regular = syllable_counts
        .iter()
        .filter(|c| REGULAR_SYLLABLES.contains(&(**c as f64)))
        .count();
    let rhythm_score = (per_line(regular, lines.len()) * 100.0).round() as u32;

    MeterAnalysis {
        compliance: per_line(iambic, lines.len()),
        assessment: match rhythm_score {
            80.. => RhythmAssessment::Excellent,
            60..=79 => RhythmAssessment::Good,
            _ => RhythmAssessment::NeedsWork,
        },
        syllable_counts,
        iambic_pentameter,
        rhythm,
        rhythm_score,
    }
}

pub fn word_stats(lines: &[&str]) -> WordStats {
    let total_words: usize = lines.iter().map(|l| l.split_whitespace().count()).sum();
    let unique: FxHashSet<String> = lines
        .iter()
        .flat_map(|l| l.split_whitespace())
        .map(str::to_lowercase)
        .collect();

    WordStats {
        total_words,
        unique_words: unique.len(),
        average_words_per_line: per_line(total_words, lines.len()),
    }
}

/// Keyword hits per table entry, dropping zeros, most hits first. Ties keep
/// table order.
fn keyword_hits<'t>(text: &str, table: &[(&'t str, &[&str])]) -> Vec<(&'t str, usize, usize)> {
    let mut hits: Vec<(&str, usize, usize)> = table
        .iter()
        .map(|(name, words)| {
            let count = words.iter().filter(|w| text.contains(*w)).count();
            (*name, count, words.len())
        })
        .filter(|(_, count, _)| *count > 0)
        .collect();
    hits.sort_by(|a, b| b.1.cmp(&a.1));
    hits
}

/// `text` is the lowercased sonnet.
pub fn analyze_themes(text: &str, primary: &str) -> ThemeAnalysis {
    let hits = keyword_hits(text, THEME_KEYWORDS);
    let richness = if hits.len() >= 2 {
        ThematicRichness::Rich
    } else {
        ThematicRichness::Focused
    };

    ThemeAnalysis {
        primary: primary.to_string(),
        detected: hits
            .into_iter()
            .take(DETECTED_THEME_LIMIT)
            .map(|(theme, count, total)| ThemeHit {
                theme: theme.to_string(),
                count,
                percentage: (count as f64 / total as f64 * 100.0).round() as u32,
            })
            .collect(),
        richness,
    }
}

/// `text` is the lowercased sonnet.
pub fn literary_devices(text: &str) -> Vec<LiteraryDevice> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut devices = Vec::new();

    let alliteration = words
        .windows(2)
        .filter(|pair| pair[0].chars().next() == pair[1].chars().next())
        .count();
    if alliteration > 0 {
        devices.push(LiteraryDevice::Alliteration(alliteration));
    }

    let metaphors = METAPHOR_MARKERS
        .iter()
        .filter(|m| text.contains(*m))
        .count();
    if metaphors > 0 {
        devices.push(LiteraryDevice::Metaphor(metaphors));
    }

    let unique: FxHashSet<&str> = words.iter().copied().collect();
    let ratio = (words.len() - unique.len()) as f64 / words.len().max(1) as f64;
    if ratio > REPETITION_RATIO {
        devices.push(LiteraryDevice::Repetition);
    }

    if devices.is_empty() {
        devices.push(LiteraryDevice::DirectImagery);
    }
    devices
}

/// `text` is the lowercased sonnet.
pub fn analyze_emotion(text: &str) -> EmotionAnalysis {
    let hits = keyword_hits(text, EMOTION_KEYWORDS);
    let intensity: usize = hits.iter().map(|(_, count, _)| count).sum();

    EmotionAnalysis {
        primary: hits
            .first()
            .map(|(name, _, _)| name.to_string())
            .unwrap_or_else(|| "contemplative".to_string()),
        intensity: match intensity {
            0..=1 => Intensity::Subtle,
            2..=3 => Intensity::Moderate,
            _ => Intensity::High,
        },
        range: if hits.len() > 2 {
            EmotionalRange::Complex
        } else {
            EmotionalRange::Focused
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alliteration_and_metaphor() {
        let devices = literary_devices("sweet summer sun shines like gold");
        assert_eq!(devices[0], LiteraryDevice::Alliteration(3));
        assert_eq!(devices[1], LiteraryDevice::Metaphor(1));
        assert_eq!(devices[0].to_string(), "Alliteration (3 instances)");
    }

    #[test]
    fn plain_text_is_direct_imagery() {
        assert_eq!(
            literary_devices("grey cold rock"),
            vec![LiteraryDevice::DirectImagery]
        );
        assert_eq!(
            literary_devices("stone upon stone"),
            vec![LiteraryDevice::Repetition]
        );
        assert_eq!(literary_devices(""), vec![LiteraryDevice::DirectImagery]);
    }

    #[test]
    fn emotion_defaults_to_contemplative() {
        let emotion = analyze_emotion("grey cold rock");
        assert_eq!(emotion.primary, "contemplative");
        assert_eq!(emotion.intensity, Intensity::Subtle);
        assert_eq!(emotion.range, EmotionalRange::Focused);
    }

    #[test]
    fn mixed_emotions() {
        let emotion = analyze_emotion("sweet love and bright joy, i yearn to dream");
        assert_eq!(emotion.primary, "joy");
        assert_eq!(emotion.intensity, Intensity::High);
        assert_eq!(emotion.range, EmotionalRange::Complex);
    }

    #[test]
    fn themes_ranked_by_hits() {
        let themes = analyze_themes("my heart and love beneath the sky and sun", "love");
        assert_eq!(themes.primary, "love");
        assert_eq!(themes.richness, ThematicRichness::Rich);
        assert_eq!(themes.detected.len(), 2);
        assert_eq!(themes.detected[0].theme, "love");
        assert_eq!(themes.detected[0].percentage, 25);
        assert_eq!(themes.detected[1].theme, "nature");
        assert_eq!(themes.detected[1].percentage, 22);
    }

    #[test]
    fn structure_of_short_lines() {
        let structure = analyze_structure(&["the rose", "a cat sat"], SonnetType::Shakespearean);
        assert_eq!(structure.line_count, 2);
        assert_eq!(structure.avg_words_per_line, 2.5);
        assert_eq!(structure.adherence, Adherence::NeedsImprovement);
        assert_eq!(structure.rhyme_scheme, "A B A B C D C D E F E F G G");
    }

    const TEN: &str = "the cat sat on the mat and ran far off";
    const EIGHT: &str = "the cat sat on the mat and ran";
    const FIVE: &str = "the cat sat on it";

    #[test]
    fn structure_adherence_bounds() {
        let structure = analyze_structure(&[TEN, TEN], SonnetType::Shakespearean);
        assert_eq!(structure.avg_syllables_per_line, 10.0);
        assert_eq!(structure.adherence, Adherence::Good);

        // average of exactly nine still counts
        let structure = analyze_structure(&[TEN, EIGHT], SonnetType::Petrarchan);
        assert_eq!(structure.adherence, Adherence::Good);

        let structure = analyze_structure(&[TEN, FIVE], SonnetType::Petrarchan);
        assert_eq!(structure.adherence, Adherence::NeedsImprovement);
    }

    #[test]
    fn meter_assessment_grades() {
        let meter = analyze_meter(&[TEN, TEN, TEN]);
        assert_eq!(meter.rhythm_score, 100);
        assert_eq!(meter.compliance, 1.0);
        assert_eq!(meter.assessment, RhythmAssessment::Excellent);

        let meter = analyze_meter(&[TEN, TEN, TEN, TEN, FIVE]);
        assert_eq!(meter.rhythm_score, 80);
        assert_eq!(meter.assessment, RhythmAssessment::Excellent);

        let meter = analyze_meter(&[TEN, TEN, TEN, FIVE, FIVE]);
        assert_eq!(meter.rhythm_score, 60);
        assert_eq!(meter.assessment, RhythmAssessment::Good);

        let meter = analyze_meter(&[TEN, TEN, FIVE, FIVE, FIVE]);
        assert_eq!(meter.rhythm_score, 40);
        assert_eq!(meter.assessment, RhythmAssessment::NeedsWork);
    }

    #[test]
    fn empty_sonnet_analysis() {
        let analysis = analyze_lines::<&str>(&[], SonnetType::Petrarchan, "love");
        assert_eq!(analysis.structure.line_count, 0);
        assert_eq!(analysis.meter.compliance, 0.0);
        assert_eq!(analysis.meter.assessment, RhythmAssessment::NeedsWork);
        assert_eq!(analysis.word_stats.total_words, 0);
        assert!(!analysis.rhyme.is_valid);
    }

    #[test]
    fn unique_words_ignore_case() {
        let stats = word_stats(&["Love love", "LOVE rose"]);
        assert_eq!(stats.total_words, 4);
        assert_eq!(stats.unique_words, 2);
        assert_eq!(stats.average_words_per_line, 2.0);
    }
}
