/// Sonnet integration tests — options in, scored 14-line sonnet out.

use sonnet_engine::core::analysis::analyze_sonnet;
use sonnet_engine::core::composer::{SonnetEngine, DEFAULT_MAX_ATTEMPTS};
use sonnet_engine::core::lexicon::Lexicon;
use sonnet_engine::core::prosody::{
    count_line_syllables, count_syllables, validate_rhyme_scheme, words_rhyme,
};
use sonnet_engine::core::template::TemplateSet;
use sonnet_engine::schema::options::{Complexity, GenerationOptions, SonnetType};
use sonnet_engine::schema::scheme::{RhymeScheme, SONNET_LINES};
use sonnet_engine::schema::vocabulary::PartOfSpeech;

const THEMES: [&str; 7] = ["love", "nature", "time", "beauty", "loss", "hope", "seasons"];
const MOODS: [&str; 4] = ["romantic", "melancholic", "uplifting", "mysterious"];

fn seeded(seed: u64) -> SonnetEngine {
    SonnetEngine::builder().seed(seed).build().unwrap()
}

#[test]
fn every_theme_mood_and_form_yields_fourteen_lines() {
    let mut engine = seeded(2024);
    for theme in THEMES {
        for mood in MOODS {
            for sonnet_type in SonnetType::ALL {
                let options = GenerationOptions::new(theme, mood).sonnet_type(sonnet_type.name());
                let sonnet = engine.generate(&options);
                assert_eq!(sonnet.lines.len(), SONNET_LINES, "{theme}/{mood}");
                assert_eq!(
                    sonnet.rhyme_scheme,
                    RhymeScheme::for_type(sonnet_type).letters
                );
                assert_eq!(sonnet.theme, theme);
                assert_eq!(sonnet.mood, mood);
            }
        }
    }
}

#[test]
fn prosody_reference_values() {
    assert_eq!(count_syllables("cat"), 1);
    assert!(count_syllables("beautiful") >= 3);
    assert_eq!(count_syllables("don't"), 1);
    assert_eq!(count_line_syllables(""), 0);
    assert!(words_rhyme("light", "night"));
    assert!(!words_rhyme("light", "spoon"));
}

#[test]
fn light_and_night_satisfy_lines_one_and_three() {
    let mut lines: Vec<String> = (0..SONNET_LINES).map(|i| format!("line number {i}")).collect();
    lines[0] = "The candle gives its gentle light".to_string();
    lines[2] = "And stars keep watch across the night".to_string();

    let validation = validate_rhyme_scheme(&lines, "shakespearean");
    assert!(validation
        .errors
        .iter()
        .all(|e| !e.starts_with("Lines 1 and 3 ")));
    assert_eq!(validation.last_words[0], "light");
    assert_eq!(validation.last_words[2], "night");
}

#[test]
fn combined_vocabulary_is_idempotent() {
    let lexicon = Lexicon::builtin().unwrap();
    let first = lexicon.combined_vocabulary("nature", "mysterious", Complexity::Advanced);
    let second = lexicon.combined_vocabulary("nature", "mysterious", Complexity::Advanced);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn custom_words_join_every_category() {
    let lexicon = Lexicon::builtin().unwrap();
    let vocabulary = lexicon
        .combined_vocabulary("love", "romantic", Complexity::Simple)
        .with_custom_words("griffin, zephyrine");
    for pos in PartOfSpeech::ALL {
        let words = vocabulary.words(pos);
        assert!(words.iter().any(|w| w == "griffin"), "{}", pos.name());
        assert!(words.iter().any(|w| w == "zephyrine"), "{}", pos.name());
    }
}

#[test]
fn seeded_engines_agree() {
    let options = GenerationOptions::new("loss", "melancholic")
        .complexity(Complexity::Advanced)
        .sonnet_type("petrarchan")
        .custom_words("ember, ash");
    let a = seeded(77).generate(&options);
    let b = seeded(77).generate(&options);
    assert_eq!(a, b);
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn injected_rng_is_reproducible() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let engine = SonnetEngine::builder().build().unwrap();
    let options = GenerationOptions::default();
    let a = engine.generate_with_rng(&options, &mut StdRng::seed_from_u64(5));
    let b = engine.generate_with_rng(&options, &mut StdRng::seed_from_u64(5));
    assert_eq!(a, b);
}

#[test]
fn unsatisfiable_gate_still_completes() {
    let templates = TemplateSet::parse_ron(r#"(declarative: ["{NOUN}"])"#).unwrap();
    let mut engine = SonnetEngine::builder()
        .seed(1)
        .with_templates(templates)
        .build()
        .unwrap();
    let sonnet = engine.generate(&GenerationOptions::new("nothing", "nothing"));
    assert_eq!(sonnet.lines.len(), SONNET_LINES);
    assert!(sonnet
        .line_outcomes
        .iter()
        .all(|o| o.attempts == DEFAULT_MAX_ATTEMPTS && !o.passed_gate));
    assert_eq!(sonnet.gated_lines(), 0);
}

#[test]
fn scores_stay_in_bounds() {
    let mut engine = seeded(8);
    for theme in THEMES {
        let q = engine.generate(&GenerationOptions::new(theme, "uplifting")).quality;
        for score in [q.overall, q.coherence, q.grammar, q.repetition, q.flow] {
            assert!((0.0..=1.0).contains(&score), "{theme}: {score}");
        }
        let mean = (q.coherence + q.grammar + q.repetition + q.flow) / 4.0;
        assert!((q.overall - mean).abs() < 1e-9);
        assert_eq!(q.details.coherence.len(), SONNET_LINES);
    }
}

#[test]
fn metadata_matches_lines() {
    let sonnet = seeded(31).generate(&GenerationOptions::new("beauty", "romantic"));
    let counts: Vec<usize> = sonnet.lines.iter().map(|l| count_line_syllables(l)).collect();
    assert_eq!(sonnet.metadata.syllable_counts, counts);
    let words: usize = sonnet.lines.iter().map(|l| l.split_whitespace().count()).sum();
    assert_eq!(sonnet.metadata.total_words, words);
    assert_eq!(sonnet.metadata.rhyme_validation.last_words.len(), SONNET_LINES);
}

#[test]
fn gated_lines_meet_the_target() {
    let sonnet = seeded(12).generate(&GenerationOptions::new("nature", "uplifting"));
    for outcome in sonnet.line_outcomes.iter().filter(|o| o.passed_gate) {
        assert_eq!(count_line_syllables(&outcome.text), 10, "{}", outcome.text);
    }
}

#[test]
fn rendered_sonnet_has_title_and_lines() {
    let sonnet = seeded(3).generate(&GenerationOptions::new("hope", "uplifting"));
    let rendered = sonnet.to_string();
    let mut lines = rendered.lines();
    assert_eq!(lines.next(), Some(sonnet.title.as_str()));
    assert_eq!(lines.next(), Some(""));
    assert_eq!(lines.count(), SONNET_LINES);
}

#[test]
fn analysis_of_a_generated_sonnet() {
    let sonnet = seeded(6).generate(&GenerationOptions::new("love", "romantic"));
    let analysis = analyze_sonnet(&sonnet);
    assert_eq!(analysis.structure.line_count, SONNET_LINES);
    assert_eq!(analysis.meter.syllable_counts, sonnet.metadata.syllable_counts);
    assert!((0.0..=1.0).contains(&analysis.meter.compliance));
    assert!(!analysis.devices.is_empty());
    assert_eq!(analysis.themes.primary, "love");
    assert_eq!(analysis.rhyme, sonnet.metadata.rhyme_validation);
}

#[test]
fn custom_lexicon_overrides_theme() {
    let extra = Lexicon::parse_ron(
        r#"(themes: {"sea": (
            nouns: (simple: ["wave", "tide", "shore"]),
            adjectives: (simple: ["salt", "grey"]),
            verbs: (simple: ["rolls", "breaks"]),
        )})"#,
    )
    .unwrap();
    let mut lexicon = Lexicon::builtin().unwrap();
    lexicon.merge(extra);
    let mut engine = SonnetEngine::builder()
        .seed(19)
        .with_lexicon(lexicon)
        .build()
        .unwrap();
    let sonnet = engine.generate(&GenerationOptions::new("sea", "melancholic"));
    assert_eq!(sonnet.lines.len(), SONNET_LINES);
    assert!(engine.lexicon().theme_names().contains(&"sea"));
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_every_sonnet_is_complete(
            seed in any::<u64>(),
            theme in 0usize..THEMES.len(),
            mood in 0usize..MOODS.len(),
            form in 0usize..2,
        ) {
            let options = GenerationOptions::new(THEMES[theme], MOODS[mood])
                .sonnet_type(SonnetType::ALL[form].name());
            let sonnet = seeded(seed).generate(&options);
            prop_assert_eq!(sonnet.lines.len(), SONNET_LINES);
            prop_assert!(sonnet
                .line_outcomes
                .iter()
                .all(|o| o.attempts >= 1 && o.attempts <= DEFAULT_MAX_ATTEMPTS));
            let q = &sonnet.quality;
            for score in [q.overall, q.coherence, q.grammar, q.repetition, q.flow] {
                prop_assert!((0.0..=1.0).contains(&score));
            }
        }

        #[test]
        fn prop_seed_determines_output(seed in any::<u64>()) {
            let options = GenerationOptions::default();
            prop_assert_eq!(seeded(seed).generate(&options), seeded(seed).generate(&options));
        }

        #[test]
        fn prop_nonempty_words_have_a_syllable(word in "[a-z']{1,14}") {
            prop_assert!(count_syllables(&word) >= 1);
        }
    }
}
