/// Sonnet Preview — generate sonnets from the command line and inspect them.
///
/// Usage: sonnet_preview [--theme <t>] [--mood <m>] [--complexity <c>] [--type <t>]
///                       [--words <a,b>] [--seed <n>] [--count <n>] [--analyze]

use clap::Parser;
use rustc_hash::{FxHashMap, FxHashSet};
use sonnet_engine::core::analysis::analyze_sonnet;
use sonnet_engine::core::composer::SonnetEngine;
use sonnet_engine::schema::options::{Complexity, GenerationOptions};
use sonnet_engine::schema::sonnet::Sonnet;
use std::process;

#[derive(Parser)]
#[command(name = "sonnet_preview")]
#[command(about = "Generate sonnets and print their quality report")]
#[command(version)]
struct Args {
    /// Theme word bank (love, nature, time, beauty, loss, hope, seasons)
    #[arg(short, long, default_value = "love")]
    theme: String,

    /// Mood word bank (romantic, melancholic, uplifting, mysterious)
    #[arg(short, long, default_value = "romantic")]
    mood: String,

    /// simple, or advanced for the richer tier and archaic pronouns
    #[arg(short = 'x', long, default_value = "simple")]
    complexity: String,

    /// shakespearean or petrarchan
    #[arg(long = "type", default_value = "shakespearean")]
    sonnet_type: String,

    /// Comma-separated words added to every category
    #[arg(short, long, default_value = "")]
    words: String,

    /// Seed for reproducible output
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of sonnets; more than one also prints variety stats
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Let batch generation swap themes
    #[arg(long)]
    batch: bool,

    /// Print the full analysis for each sonnet
    #[arg(long)]
    analyze: bool,

    /// RON lexicon merged over the built-in word banks
    #[arg(long)]
    lexicon: Option<String>,

    /// RON templates appended to the built-in set
    #[arg(long)]
    templates: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let mut builder = SonnetEngine::builder();
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    if let Some(ref path) = args.lexicon {
        builder = builder.lexicon_path(path);
    }
    if let Some(ref path) = args.templates {
        builder = builder.templates_path(path);
    }
    let mut engine = match builder.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    let complexity = match Complexity::from_name(&args.complexity) {
        Some(complexity) => complexity,
        None => {
            eprintln!(
                "ERROR: unknown complexity '{}' (expected simple or advanced)",
                args.complexity
            );
            process::exit(1);
        }
    };
    let options = GenerationOptions::new(&args.theme, &args.mood)
        .complexity(complexity)
        .sonnet_type(&args.sonnet_type)
        .custom_words(&args.words);

    let sonnets: Vec<Sonnet> = if args.batch {
        engine.generate_batch(&options, args.count)
    } else {
        (0..args.count).map(|_| engine.generate(&options)).collect()
    };

    for sonnet in &sonnets {
        print_sonnet(sonnet);
        if args.analyze {
            print_analysis(sonnet);
        }
    }

    if sonnets.len() > 1 {
        print_variety(&sonnets);
    }
}

fn print_sonnet(sonnet: &Sonnet) {
    println!("{}", sonnet);
    println!(
        "[{} | {} | {}]",
        sonnet.theme,
        sonnet.mood,
        sonnet.sonnet_type.name()
    );
    let q = &sonnet.quality;
    println!(
        "Quality: {:.2} (coherence {:.2}, grammar {:.2}, repetition {:.2}, flow {:.2})",
        q.overall, q.coherence, q.grammar, q.repetition, q.flow
    );
    println!(
        "Lines passing the gate: {} / {}",
        sonnet.gated_lines(),
        sonnet.line_outcomes.len()
    );
    for error in &sonnet.metadata.rhyme_validation.errors {
        println!("  rhyme: {}", error);
    }
    println!();
}

fn print_analysis(sonnet: &Sonnet) {
    let analysis = analyze_sonnet(sonnet);
    let s = &analysis.structure;
    println!("=== Analysis ===");
    println!(
        "Structure: {} lines, {:.1} words/line, {:.1} syllables/line ({:?})",
        s.line_count, s.avg_words_per_line, s.avg_syllables_per_line, s.adherence
    );
    println!("Scheme:    {}", s.rhyme_scheme);
    println!(
        "Meter:     {:.0}% iambic, rhythm score {} ({:?})",
        analysis.meter.compliance * 100.0,
        analysis.meter.rhythm_score,
        analysis.meter.assessment
    );
    println!(
        "Words:     {} total, {} unique",
        analysis.word_stats.total_words, analysis.word_stats.unique_words
    );
    let themes: Vec<String> = analysis
        .themes
        .detected
        .iter()
        .map(|t| format!("{} ({}%)", t.theme, t.percentage))
        .collect();
    println!(
        "Themes:    {} [{:?}]",
        if themes.is_empty() {
            "none".to_string()
        } else {
            themes.join(", ")
        },
        analysis.themes.richness
    );
    let devices: Vec<String> = analysis.devices.iter().map(|d| d.to_string()).collect();
    println!("Devices:   {}", devices.join("; "));
    println!(
        "Emotion:   {} ({:?}, {:?})",
        analysis.emotion.primary, analysis.emotion.intensity, analysis.emotion.range
    );
    println!();
}

fn print_variety(sonnets: &[Sonnet]) {
    println!("=== Variety: {} sonnets ===\n", sonnets.len());

    let openings: FxHashSet<&str> = sonnets
        .iter()
        .filter_map(|s| s.lines.first().map(String::as_str))
        .collect();
    println!("Unique opening lines: {} / {}", openings.len(), sonnets.len());

    let avg_quality =
        sonnets.iter().map(|s| s.quality.overall).sum::<f64>() / sonnets.len() as f64;
    println!("Average quality: {:.2}", avg_quality);

    let degraded = sonnets.iter().filter(|s| s.is_degraded()).count();
    println!("Sonnets with degraded lines: {}", degraded);

    let mut word_counts: FxHashMap<String, u32> = FxHashMap::default();
    for sonnet in sonnets {
        for word in sonnet.lines.iter().flat_map(|l| l.split_whitespace()) {
            let clean = word
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if clean.len() > 3 {
                *word_counts.entry(clean).or_insert(0) += 1;
            }
        }
    }
    let mut word_freq: Vec<(String, u32)> = word_counts.into_iter().collect();
    word_freq.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    println!("\nTop 10 words:");
    for (word, count) in word_freq.iter().take(10) {
        println!("  {}: {}", word, count);
    }
    println!();
}
