//! WASM bindings for sonnet-engine — JSON in, JSON out, for the browser front end.

use wasm_bindgen::prelude::*;

use sonnet_engine::core::analysis::{analyze_lines, SonnetAnalysis};
use sonnet_engine::core::composer::SonnetEngine;
use sonnet_engine::core::lexicon::Lexicon;
use sonnet_engine::schema::options::{Complexity, GenerationOptions, SonnetType};
use sonnet_engine::schema::sonnet::Sonnet;
use sonnet_engine::schema::vocabulary::PartOfSpeech;

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------

/// Lines to analyze. A serialized `Sonnet` also fits this shape.
#[derive(serde::Deserialize)]
struct AnalyzeInput {
    lines: Vec<String>,
    #[serde(default)]
    sonnet_type: String,
    #[serde(default)]
    theme: String,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------
fn parse_options(options_json: &str) -> Result<GenerationOptions, String> {
    if options_json.trim().is_empty() {
        return Ok(GenerationOptions::default());
    }
    serde_json::from_str(options_json).map_err(|e| format!("Invalid options JSON: {e}"))
}

fn analyze_json(input_json: &str) -> Result<SonnetAnalysis, String> {
    let input: AnalyzeInput =
        serde_json::from_str(input_json).map_err(|e| format!("Invalid sonnet JSON: {e}"))?;
    let sonnet_type = SonnetType::from_name(&input.sonnet_type).unwrap_or_default();
    Ok(analyze_lines(&input.lines, sonnet_type, &input.theme))
}

fn category_words<'a>(
    lexicon: &'a Lexicon,
    theme: &str,
    category: &str,
    complexity: &str,
) -> Result<&'a [String], String> {
    let pos = PartOfSpeech::from_name(category)
        .ok_or_else(|| format!("Unknown category: {category}"))?;
    let complexity = Complexity::from_name(complexity)
        .ok_or_else(|| format!("Unknown complexity: {complexity}"))?;
    Ok(lexicon.words_by_category(theme, pos, complexity))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

fn build_engine(seed: Option<u64>) -> Result<SonnetEngine, String> {
    let mut builder = SonnetEngine::builder();
    if let Some(seed) = seed {
        builder = builder.seed(seed);
    }
    builder
        .build()
        .map_err(|e| format!("Engine build error: {e}"))
}

// ---------------------------------------------------------------------------
// SonnetStudio — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct SonnetStudio {
    engine: SonnetEngine,
}

#[wasm_bindgen]
impl SonnetStudio {
    /// Create an engine. Without a seed every call draws fresh randomness.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> Result<SonnetStudio, JsError> {
        let engine = build_engine(seed).map_err(|e| JsError::new(&e))?;
        Ok(SonnetStudio { engine })
    }

    /// Generate one sonnet from a JSON `GenerationOptions` object. Missing
    /// fields take their defaults; an empty string means all defaults.
    pub fn generate(&mut self, options_json: &str) -> Result<String, JsError> {
        let options = parse_options(options_json).map_err(|e| JsError::new(&e))?;
        let sonnet: Sonnet = self.engine.generate(&options);
        to_json(&sonnet)
    }

    /// Generate `count` sonnets as a JSON array, with occasional theme swaps.
    pub fn generate_batch(&mut self, options_json: &str, count: usize) -> Result<String, JsError> {
        let options = parse_options(options_json).map_err(|e| JsError::new(&e))?;
        to_json(&self.engine.generate_batch(&options, count))
    }

    /// Analyze `{ lines, sonnet_type?, theme? }` or a full sonnet object.
    pub fn analyze(&self, sonnet_json: &str) -> Result<String, JsError> {
        let analysis = analyze_json(sonnet_json).map_err(|e| JsError::new(&e))?;
        to_json(&analysis)
    }

    /// Return JSON array of theme names.
    pub fn available_themes(&self) -> String {
        serde_json::to_string(&self.engine.lexicon().theme_names())
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Return JSON array of the theme's words for one category ("nouns",
    /// "adjectives", "verbs") at "simple" or "advanced" complexity.
    pub fn theme_words(
        &self,
        theme: &str,
        category: &str,
        complexity: &str,
    ) -> Result<String, JsError> {
        let words = category_words(self.engine.lexicon(), theme, category, complexity)
            .map_err(|e| JsError::new(&e))?;
        to_json(&words)
    }

    /// Return JSON array of mood names.
    pub fn available_moods(&self) -> String {
        serde_json::to_string(&self.engine.lexicon().mood_names())
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Return JSON array of sonnet type names.
    pub fn sonnet_types() -> String {
        let names: Vec<&str> = SonnetType::ALL.iter().map(|t| t.name()).collect();
        serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
    }

    /// Replace the engine with a freshly seeded one.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<(), JsError> {
        self.engine = build_engine(seed).map_err(|e| JsError::new(&e))?;
        Ok(())
    }
}
