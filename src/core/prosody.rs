/// Prosody heuristics — syllables, stress, meter and suffix rhyme.
///
/// None of this is phonetic. Syllables are vowel groups with a few ending
/// corrections, stress is guessed from word length, and two words rhyme when
/// they share a known suffix pattern or, failing that, their last letters.

use serde::{Deserialize, Serialize};

use crate::schema::scheme::{RhymeScheme, SONNET_LINES};

/// Syllable target for a line of iambic pentameter.
pub const PENTAMETER_SYLLABLES: usize = 10;

/// Fraction of syllables that must match the iambic alternation.
const GOOD_RHYTHM_THRESHOLD: f64 = 0.6;

const VOWELS: &str = "aeiouy";

/// Contractions whose syllable count the vowel-group rule gets wrong.
const CONTRACTIONS: &[(&str, usize)] = &[
    ("don't", 1),
    ("can't", 1),
    ("won't", 1),
    ("shouldn't", 2),
    ("wouldn't", 2),
    ("couldn't", 2),
    ("isn't", 2),
    ("wasn't", 2),
    ("aren't", 2),
    ("weren't", 2),
    ("haven't", 2),
    ("hasn't", 2),
    ("hadn't", 2),
    ("doesn't", 2),
    ("didn't", 2),
    ("they're", 1),
    ("we're", 1),
    ("you're", 1),
    ("it's", 1),
    ("that's", 1),
    ("there's", 1),
    ("here's", 1),
    ("what's", 1),
    ("let's", 1),
    ("i'm", 1),
    ("i'll", 1),
    ("i'd", 1),
    ("i've", 1),
];

/// Known rhyme endings, tested in order; the first suffix match wins.
pub const RHYME_PATTERNS: &[&str] = &[
    "ight", "ay", "ove", "art", "ead", "ime", "eal", "ound", "ace", "ire", "ower", "eauty",
    "orrow", "ever", "onder",
];

/// Trailing punctuation dropped from a line's final word.
pub const TRAILING_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

/// Count the syllables in a single word.
///
/// Returns 0 only for empty input; every other word has at least one.
pub fn count_syllables(word: &str) -> usize {
    let word = word.trim().to_lowercase();
    if word.is_empty() {
        return 0;
    }

    if let Some((_, count)) = CONTRACTIONS.iter().find(|(c, _)| *c == word) {
        return *count;
    }

    let letters: Vec<char> = word.chars().filter(|c| c.is_ascii_lowercase()).collect();
    if letters.len() <= 3 {
        return 1;
    }

    let mut syllables = 0usize;
    let mut previous_was_vowel = false;
    for c in &letters {
        let is_vowel = VOWELS.contains(*c);
        if is_vowel && !previous_was_vowel {
            syllables += 1;
        }
        previous_was_vowel = is_vowel;
    }

    let len = letters.len();
    let last = letters[len - 1];
    let before_last_two = letters[len - 3];

    // Silent final 'e'
    if last == 'e' && syllables > 1 {
        syllables -= 1;
    }

    // "-ed" only sounds as its own syllable after 't' or 'd'
    if last == 'd' && letters[len - 2] == 'e' && syllables > 1 && !"td".contains(before_last_two)
    {
        syllables -= 1;
    }

    // "-le" after a consonant: "gentle", "table"
    if last == 'e' && letters[len - 2] == 'l' && !"aeiou".contains(before_last_two) {
        syllables += 1;
    }

    syllables.max(1)
}

/// Split a line into lowercase words, treating everything except word
/// characters, whitespace and apostrophes as a separator.
pub fn line_words(line: &str) -> Vec<String> {
    let cleaned: String = line
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '\'' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Total syllables in a line. Blank lines count zero.
pub fn count_line_syllables(line: &str) -> usize {
    line_words(line).iter().map(|w| count_syllables(w)).sum()
}

/// Result of comparing a line's syllable count against a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineLength {
    pub is_valid: bool,
    pub actual: usize,
    pub target: usize,
    /// `actual - target`; negative when the line is short.
    pub difference: i64,
}

pub fn validate_line_length(line: &str, target: usize) -> LineLength {
    let actual = count_line_syllables(line);
    LineLength {
        is_valid: actual == target,
        actual,
        target,
        difference: actual as i64 - target as i64,
    }
}

/// Any ten-syllable line is accepted as pentameter; stress is judged
/// separately by [`check_rhythm`].
pub fn is_iambic_pentameter(line: &str) -> bool {
    count_line_syllables(line) == PENTAMETER_SYLLABLES
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stress {
    Unstressed,
    Stressed,
}

impl Stress {
    pub fn symbol(&self) -> char {
        match self {
            Self::Unstressed => 'U',
            Self::Stressed => 'S',
        }
    }
}

/// Guess a stress for every syllable of the line.
///
/// One-syllable words longer than three letters are stressed. Longer words
/// stress their first syllable when they have three or more, otherwise their
/// second.
pub fn analyze_stress_pattern(line: &str) -> Vec<Stress> {
    let mut pattern = Vec::new();
    for word in line_words(line) {
        let syllables = count_syllables(&word);
        if syllables == 1 {
            pattern.push(if word.len() > 3 {
                Stress::Stressed
            } else {
                Stress::Unstressed
            });
            continue;
        }
        for i in 0..syllables {
            let stressed = (i == 0 && syllables > 2) || (i == 1 && syllables <= 2);
            pattern.push(if stressed {
                Stress::Stressed
            } else {
                Stress::Unstressed
            });
        }
    }
    pattern
}

/// How closely a line follows the unstressed/stressed alternation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhythmReport {
    /// Stress symbols joined with dashes, e.g. `U-S-U-S`.
    pub pattern: String,
    pub iambic_score: usize,
    pub naturalness: f64,
    pub is_good_rhythm: bool,
}

pub fn check_rhythm(line: &str) -> RhythmReport {
    let stresses = analyze_stress_pattern(line);
    let iambic_score = stresses
        .iter()
        .enumerate()
        .filter(|(i, s)| {
            let expected = if i % 2 == 0 {
                Stress::Unstressed
            } else {
                Stress::Stressed
            };
            **s == expected
        })
        .count();

    let pattern = stresses
        .iter()
        .map(|s| s.symbol().to_string())
        .collect::<Vec<_>>()
        .join("-");

    RhythmReport {
        pattern,
        iambic_score,
        naturalness: iambic_score as f64 / stresses.len().max(1) as f64,
        is_good_rhythm: iambic_score as f64 >= stresses.len() as f64 * GOOD_RHYTHM_THRESHOLD,
    }
}

/// The ending a word is rhymed on.
pub fn rhyme_sound(word: &str) -> String {
    let letters: String = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();

    if let Some(pattern) = RHYME_PATTERNS.iter().find(|p| letters.ends_with(*p)) {
        return pattern.to_string();
    }

    let keep = letters.len().min(3);
    letters[letters.len() - keep..].to_string()
}

/// Two words rhyme when they share a non-empty rhyme sound.
pub fn words_rhyme(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    let sound = rhyme_sound(a);
    !sound.is_empty() && sound == rhyme_sound(b)
}

/// The last word of a line with trailing punctuation removed.
pub fn final_word(line: &str) -> String {
    line.split_whitespace()
        .last()
        .map(|w| w.trim_end_matches(TRAILING_PUNCTUATION).to_string())
        .unwrap_or_default()
}

/// One line's position and final word inside a rhyme group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RhymeMember {
    pub index: usize,
    pub word: String,
}

/// All lines sharing one scheme letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RhymeGroup {
    pub letter: char,
    pub members: Vec<RhymeMember>,
}

/// Outcome of checking a poem's line endings against a rhyme scheme.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RhymeValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub groups: Vec<RhymeGroup>,
    pub scheme: Vec<char>,
    pub last_words: Vec<String>,
}

impl RhymeValidation {
    fn rejected(error: String) -> Self {
        Self {
            is_valid: false,
            errors: vec![error],
            ..Self::default()
        }
    }
}

/// Check that the lines sharing a scheme letter end in rhyming words.
///
/// Every member of a group is compared with the group's first line; each
/// failing pair produces one message.
pub fn validate_rhyme_scheme<S: AsRef<str>>(lines: &[S], scheme_name: &str) -> RhymeValidation {
    if lines.is_empty() {
        return RhymeValidation::rejected("No lines provided".to_string());
    }

    let Some(scheme) = RhymeScheme::by_name(scheme_name) else {
        return RhymeValidation::rejected("Unknown rhyme scheme".to_string());
    };

    if lines.len() != SONNET_LINES {
        return RhymeValidation::rejected(format!(
            "Expected {} lines, got {}",
            SONNET_LINES,
            lines.len()
        ));
    }

    let last_words: Vec<String> = lines.iter().map(|l| final_word(l.as_ref())).collect();

    let mut groups: Vec<RhymeGroup> = Vec::new();
    for (index, letter) in scheme.letters.iter().enumerate() {
        let member = RhymeMember {
            index,
            word: last_words[index].clone(),
        };
        match groups.iter_mut().find(|g| g.letter == *letter) {
            Some(group) => group.members.push(member),
            None => groups.push(RhymeGroup {
                letter: *letter,
                members: vec![member],
            }),
        }
    }

    let mut errors = Vec::new();
    for group in &groups {
        let Some((first, rest)) = group.members.split_first() else {
            continue;
        };
        for other in rest {
            if !words_rhyme(&first.word, &other.word) {
                errors.push(format!(
                    "Lines {} and {} should rhyme ({}): \"{}\" and \"{}\"",
                    first.index + 1,
                    other.index + 1,
                    group.letter,
                    first.word,
                    other.word
                ));
            }
        }
    }

    RhymeValidation {
        is_valid: errors.is_empty(),
        errors,
        groups,
        scheme: scheme.letters.to_vec(),
        last_words,
    }
}
