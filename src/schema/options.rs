use serde::{Deserialize, Serialize};

/// Vocabulary tier selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    #[default]
    Simple,
    Advanced,
}

impl Complexity {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "simple" => Some(Self::Simple),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }

    /// Advanced sonnets address the reader with archaic pronouns.
    pub fn is_archaic(&self) -> bool {
        matches!(self, Self::Advanced)
    }
}

/// The sonnet forms the composer knows how to rhyme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SonnetType {
    #[default]
    Shakespearean,
    Petrarchan,
}

impl SonnetType {
    pub const ALL: [SonnetType; 2] = [Self::Shakespearean, Self::Petrarchan];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "shakespearean" => Some(Self::Shakespearean),
            "petrarchan" => Some(Self::Petrarchan),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Shakespearean => "shakespearean",
            Self::Petrarchan => "petrarchan",
        }
    }
}

/// A generation request as handed over by the caller.
///
/// `sonnet_type` stays a free-form name: unrecognised names fall back to
/// Shakespearean when the request is composed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub theme: String,
    pub mood: String,
    pub complexity: Complexity,
    pub sonnet_type: String,
    /// Comma-separated words merged into every vocabulary category.
    pub custom_words: String,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            theme: "love".to_string(),
            mood: "romantic".to_string(),
            complexity: Complexity::Simple,
            sonnet_type: SonnetType::Shakespearean.name().to_string(),
            custom_words: String::new(),
        }
    }
}

impl GenerationOptions {
    pub fn new(theme: &str, mood: &str) -> Self {
        Self {
            theme: theme.to_string(),
            mood: mood.to_string(),
            ..Self::default()
        }
    }

    pub fn complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn sonnet_type(mut self, sonnet_type: &str) -> Self {
        self.sonnet_type = sonnet_type.to_string();
        self
    }

    pub fn custom_words(mut self, words: &str) -> Self {
        self.custom_words = words.to_string();
        self
    }
}
