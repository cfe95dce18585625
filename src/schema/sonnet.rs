use serde::{Deserialize, Serialize};
use std::fmt;

use super::options::SonnetType;
use super::scheme::SONNET_LINES;
use crate::core::prosody::RhymeValidation;
use crate::core::quality::QualityScore;

/// How one line slot was filled.
///
/// `passed_gate` is false when every attempt missed the syllable or grammar
/// check and the last attempt was kept anyway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineOutcome {
    pub text: String,
    pub passed_gate: bool,
    pub attempts: u32,
}

/// Figures derived from the finished lines for the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SonnetMetadata {
    pub syllable_counts: Vec<usize>,
    pub rhyme_validation: RhymeValidation,
    pub total_words: usize,
}

/// A finished sonnet. Built once by the composer and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sonnet {
    pub title: String,
    pub lines: Vec<String>,
    pub theme: String,
    pub mood: String,
    pub sonnet_type: SonnetType,
    pub rhyme_scheme: [char; SONNET_LINES],
    pub quality: QualityScore,
    pub line_outcomes: Vec<LineOutcome>,
    pub metadata: SonnetMetadata,
}

impl Sonnet {
    /// Number of lines whose first acceptable attempt came within the
    /// retry bound.
    pub fn gated_lines(&self) -> usize {
        self.line_outcomes.iter().filter(|o| o.passed_gate).count()
    }

    /// True when some line had to be accepted without passing the gate.
    pub fn is_degraded(&self) -> bool {
        self.gated_lines() < self.line_outcomes.len()
    }
}

impl fmt::Display for Sonnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f)?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
