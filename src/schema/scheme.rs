use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::options::SonnetType;

/// Number of lines in every sonnet.
pub const SONNET_LINES: usize = 14;

const SHAKESPEAREAN: [char; SONNET_LINES] = [
    'A', 'B', 'A', 'B', 'C', 'D', 'C', 'D', 'E', 'F', 'E', 'F', 'G', 'G',
];
const PETRARCHAN: [char; SONNET_LINES] = [
    'A', 'B', 'B', 'A', 'A', 'B', 'B', 'A', 'C', 'D', 'E', 'C', 'D', 'E',
];

/// A named run of consecutive lines: a quatrain, couplet, octave or sestet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stanza {
    pub name: String,
    pub lines: Range<usize>,
}

/// Which lines rhyme with which, plus the stanza grouping of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RhymeScheme {
    pub sonnet_type: SonnetType,
    pub letters: [char; SONNET_LINES],
    pub structure: Vec<Stanza>,
}

impl RhymeScheme {
    pub fn for_type(sonnet_type: SonnetType) -> Self {
        match sonnet_type {
            SonnetType::Shakespearean => Self {
                sonnet_type,
                letters: SHAKESPEAREAN,
                structure: vec![
                    stanza("quatrain1", 0..4),
                    stanza("quatrain2", 4..8),
                    stanza("quatrain3", 8..12),
                    stanza("couplet", 12..14),
                ],
            },
            SonnetType::Petrarchan => Self {
                sonnet_type,
                letters: PETRARCHAN,
                structure: vec![stanza("octave", 0..8), stanza("sestet", 8..14)],
            },
        }
    }

    /// Look up a scheme by sonnet-type name.
    pub fn by_name(name: &str) -> Option<Self> {
        SonnetType::from_name(name).map(Self::for_type)
    }


    /// The scheme rendered as space-separated letters, e.g. `A B A B ...`.
    pub fn pattern(&self) -> String {
        self.letters
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn stanza(name: &str, lines: Range<usize>) -> Stanza {
    Stanza {
        name: name.to_string(),
        lines,
    }
}
