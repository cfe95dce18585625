/// The sonnet pipeline: options → vocabulary → 14 gated lines → scored sonnet.
///
/// Wires together the lexicon, template engine, line synthesizer, prosody
/// checks and quality assessor.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::lexicon::{Lexicon, LexiconError};
use crate::core::prosody::{
    count_line_syllables, final_word, validate_line_length, validate_rhyme_scheme,
    PENTAMETER_SYLLABLES,
};
use crate::core::quality::{check_grammar, QualityAssessor};
use crate::core::synth::{LineSynthesizer, RhymeAnchors};
use crate::core::template::{TemplateError, TemplateSet};
use crate::schema::options::{Complexity, GenerationOptions, SonnetType};
use crate::schema::scheme::RhymeScheme;
use crate::schema::sonnet::{LineOutcome, Sonnet, SonnetMetadata};
use crate::schema::vocabulary::Vocabulary;

/// Attempts per line before the last one is kept regardless.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Themes a batch may swap in.
pub const BATCH_THEMES: &[&str] = &["love", "nature", "time", "beauty", "loss", "hope"];
const BATCH_THEME_SWAP_CHANCE: f64 = 0.3;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("lexicon error: {0}")]
    Lexicon(#[from] LexiconError),
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
    #[error("invalid engine configuration: {0}")]
    Config(String),
}

/// The top-level sonnet engine. Built via `SonnetEngine::builder()`.
pub struct SonnetEngine {
    lexicon: Lexicon,
    templates: TemplateSet,
    seed: Option<u64>,
    generation_count: u64,
    max_attempts: u32,
    target_syllables: usize,
}

/// Builder for constructing a `SonnetEngine`.
pub struct SonnetEngineBuilder {
    seed: Option<u64>,
    max_attempts: u32,
    target_syllables: usize,
    lexicon_path: Option<String>,
    templates_path: Option<String>,
    /// Directly provided lexicon, replacing the built-in one.
    lexicon: Option<Lexicon>,
    /// Directly provided templates, replacing the built-in ones.
    templates: Option<TemplateSet>,
}

impl SonnetEngine {
    pub fn builder() -> SonnetEngineBuilder {
        SonnetEngineBuilder {
            seed: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            target_syllables: PENTAMETER_SYLLABLES,
            lexicon_path: None,
            templates_path: None,
            lexicon: None,
            templates: None,
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    pub fn target_syllables(&self) -> usize {
        self.target_syllables
    }

    /// Generate one sonnet using the engine's own random source.
    pub fn generate(&mut self, options: &GenerationOptions) -> Sonnet {
        let mut rng = self.next_rng();
        self.generate_with_rng(options, &mut rng)
    }

    /// Generate `count` sonnets. Each has a 30% chance of trading its theme
    /// for one of [`BATCH_THEMES`].
    pub fn generate_batch(&mut self, options: &GenerationOptions, count: usize) -> Vec<Sonnet> {
        let mut rng = self.next_rng();
        let mut sonnets = Vec::with_capacity(count);
        for _ in 0..count {
            let mut opts = options.clone();
            if rng.gen_bool(BATCH_THEME_SWAP_CHANCE) {
                if let Some(theme) = BATCH_THEMES.choose(&mut rng) {
                    opts.theme = theme.to_string();
                }
            }
            sonnets.push(self.generate_with_rng(&opts, &mut rng));
        }
        sonnets
    }

    /// Generate one sonnet drawing every random choice from `rng`.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        options: &GenerationOptions,
        rng: &mut R,
    ) -> Sonnet {
        let complexity = options.complexity;
        let vocabulary = self
            .lexicon
            .combined_vocabulary(&options.theme, &options.mood, complexity)
            .with_custom_words(&options.custom_words);

        let sonnet_type = SonnetType::from_name(&options.sonnet_type).unwrap_or_else(|| {
            warn!(
                sonnet_type = %options.sonnet_type,
                "unknown sonnet type, using shakespearean"
            );
            SonnetType::Shakespearean
        });
        let scheme = RhymeScheme::for_type(sonnet_type);

        let synth = LineSynthesizer::new(&self.lexicon, &self.templates, self.target_syllables);
        let mut anchors = RhymeAnchors::new();
        let mut line_outcomes = Vec::with_capacity(scheme.letters.len());

        for (index, letter) in scheme.letters.iter().enumerate() {
            let outcome =
                self.compose_line(&synth, &vocabulary, complexity, *letter, &anchors, index, rng);
            if !outcome.passed_gate {
                debug!(
                    line = index,
                    attempts = outcome.attempts,
                    text = %outcome.text,
                    "keeping line that missed the quality gate"
                );
            }
            anchors.record(*letter, &final_word(&outcome.text));
            line_outcomes.push(outcome);
        }

        let lines: Vec<String> = line_outcomes.iter().map(|o| o.text.clone()).collect();
        let quality =
            QualityAssessor::new(&self.lexicon, self.target_syllables).assess(&lines, &options.theme);
        let title = self.lexicon.title_for(&options.theme, rng);

        let metadata = SonnetMetadata {
            syllable_counts: lines.iter().map(|l| count_line_syllables(l)).collect(),
            rhyme_validation: validate_rhyme_scheme(&lines, sonnet_type.name()),
            total_words: lines.iter().map(|l| l.split_whitespace().count()).sum(),
        };

        let sonnet = Sonnet {
            title,
            lines,
            theme: options.theme.clone(),
            mood: options.mood.clone(),
            sonnet_type,
            rhyme_scheme: scheme.letters,
            quality,
            line_outcomes,
            metadata,
        };

        info!(
            theme = %sonnet.theme,
            mood = %sonnet.mood,
            sonnet_type = sonnet_type.name(),
            overall = sonnet.quality.overall,
            degraded = sonnet.is_degraded(),
            "generated sonnet"
        );
        sonnet
    }

    /// Synthesize until a line passes the gate or the attempts run out.
    #[allow(clippy::too_many_arguments)]
    fn compose_line<R: Rng + ?Sized>(
        &self,
        synth: &LineSynthesizer<'_>,
        vocabulary: &Vocabulary,
        complexity: Complexity,
        letter: char,
        anchors: &RhymeAnchors,
        index: usize,
        rng: &mut R,
    ) -> LineOutcome {
        let mut text = String::new();
        for attempt in 1..=self.max_attempts {
            text = synth.synthesize(vocabulary, complexity, letter, anchors, index, rng);
            if self.passes_gate(&text) {
                return LineOutcome {
                    text,
                    passed_gate: true,
                    attempts: attempt,
                };
            }
        }
        LineOutcome {
            text,
            passed_gate: false,
            attempts: self.max_attempts,
        }
    }

    fn passes_gate(&self, line: &str) -> bool {
        validate_line_length(line, self.target_syllables).is_valid && check_grammar(line).valid
    }

    fn next_rng(&mut self) -> StdRng {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(self.generation_count)),
            None => StdRng::from_entropy(),
        };
        self.generation_count += 1;
        rng
    }
}

impl SonnetEngineBuilder {
    /// Fix the random seed; engines with equal seeds generate equal sonnets.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn target_syllables(mut self, syllables: usize) -> Self {
        self.target_syllables = syllables;
        self
    }

    /// Merge a RON lexicon file over the base lexicon.
    pub fn lexicon_path(mut self, path: &str) -> Self {
        self.lexicon_path = Some(path.to_string());
        self
    }

    /// Append templates from a RON file to the base set.
    pub fn templates_path(mut self, path: &str) -> Self {
        self.templates_path = Some(path.to_string());
        self
    }

    /// Provide a lexicon directly (for testing without files).
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = Some(lexicon);
        self
    }

    /// Provide templates directly (for testing without files).
    pub fn with_templates(mut self, templates: TemplateSet) -> Self {
        self.templates = Some(templates);
        self
    }

    pub fn build(self) -> Result<SonnetEngine, EngineError> {
        if self.max_attempts == 0 {
            return Err(EngineError::Config(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        let mut lexicon = match self.lexicon {
            Some(lexicon) => lexicon,
            None => Lexicon::builtin()?,
        };
        if let Some(ref path) = self.lexicon_path {
            warn!(path = %path, "merging custom lexicon over the base word banks");
            lexicon.merge(Lexicon::load_from_ron(Path::new(path))?);
        }

        let mut templates = match self.templates {
            Some(templates) => templates,
            None => TemplateSet::builtin()?,
        };
        if let Some(ref path) = self.templates_path {
            warn!(path = %path, "adding custom sentence templates");
            templates.merge(TemplateSet::load_from_ron(Path::new(path))?);
        }

        Ok(SonnetEngine {
            lexicon,
            templates,
            seed: self.seed,
            generation_count: 0,
            max_attempts: self.max_attempts,
            target_syllables: self.target_syllables,
        })
    }
}
