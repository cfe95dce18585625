/// Lexicon Linter — validates word-bank and template coverage.
///
/// Usage: lexicon_linter [--lexicon <file>] [--templates <file>] [--overlay]

use clap::Parser;
use sonnet_engine::core::lexicon::Lexicon;
use sonnet_engine::core::template::{SentenceMood, TemplateSet};
use sonnet_engine::schema::options::Complexity;
use sonnet_engine::schema::vocabulary::PartOfSpeech;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "lexicon_linter")]
#[command(about = "Validate sonnet word banks and sentence templates")]
#[command(version)]
struct Args {
    /// Lexicon RON file; the built-in lexicon when omitted
    #[arg(long, value_name = "FILE")]
    lexicon: Option<PathBuf>,

    /// Template RON file; the built-in templates when omitted
    #[arg(long, value_name = "FILE")]
    templates: Option<PathBuf>,

    /// Merge the given files over the built-ins instead of linting them alone
    #[arg(long)]
    overlay: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let lexicon = match load_lexicon(&args) {
        Ok(lexicon) => lexicon,
        Err(e) => {
            eprintln!("ERROR: Failed to load lexicon: {}", e);
            process::exit(1);
        }
    };
    let templates = match load_templates(&args) {
        Ok(templates) => templates,
        Err(e) => {
            eprintln!("ERROR: Failed to load templates: {}", e);
            process::exit(1);
        }
    };

    println!(
        "Loaded {} themes, {} moods, {} rhyme groups, {} templates",
        lexicon.themes.len(),
        lexicon.moods.len(),
        lexicon.perfect_rhymes.len(),
        templates.len()
    );

    let (errors, warnings) = lint(&lexicon, &templates);

    println!("\n=== Lexicon Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if !errors.is_empty() {
        process::exit(1);
    }
}

fn load_lexicon(args: &Args) -> Result<Lexicon, Box<dyn std::error::Error>> {
    let custom = match args.lexicon {
        Some(ref path) => Some(Lexicon::load_from_ron(path)?),
        None => None,
    };
    Ok(match custom {
        Some(custom) if args.overlay => {
            let mut base = Lexicon::builtin()?;
            base.merge(custom);
            base
        }
        Some(custom) => custom,
        None => Lexicon::builtin()?,
    })
}

fn load_templates(args: &Args) -> Result<TemplateSet, Box<dyn std::error::Error>> {
    let custom = match args.templates {
        Some(ref path) => Some(TemplateSet::load_from_ron(path)?),
        None => None,
    };
    Ok(match custom {
        Some(custom) if args.overlay => {
            let mut base = TemplateSet::builtin()?;
            base.merge(custom);
            base
        }
        Some(custom) => custom,
        None => TemplateSet::builtin()?,
    })
}

fn lint(lexicon: &Lexicon, templates: &TemplateSet) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if templates.declarative.is_empty() {
        errors.push("No declarative templates".to_string());
    }
    for (mood, bucket) in [
        (SentenceMood::Interrogative, &templates.interrogative),
        (SentenceMood::Exclamatory, &templates.exclamatory),
    ] {
        if bucket.is_empty() {
            warnings.push(format!(
                "No {:?} templates; declarative ones will be used",
                mood
            ));
        }
    }

    for theme in lexicon.theme_names() {
        for pos in PartOfSpeech::ALL {
            if lexicon
                .words_by_category(theme, pos, Complexity::Simple)
                .is_empty()
            {
                errors.push(format!(
                    "Theme '{}' has no simple {}",
                    theme,
                    pos.name()
                ));
            }
            let advanced = lexicon.themes.get(theme).map(|t| t.tier(pos).advanced.len());
            if advanced == Some(0) {
                warnings.push(format!(
                    "Theme '{}' has no advanced {}; simple words will be used",
                    theme,
                    pos.name()
                ));
            }
        }
        if lexicon.titles.get(theme).map_or(true, |t| t.is_empty()) {
            warnings.push(format!("Theme '{}' has no titles", theme));
        }
    }

    for mood in lexicon.mood_names() {
        for pos in PartOfSpeech::ALL {
            if lexicon.mood_words(mood, pos).is_empty() {
                warnings.push(format!("Mood '{}' has no {}", mood, pos.name()));
            }
        }
    }

    for (table, entries) in [
        ("perfect", &lexicon.perfect_rhymes),
        ("near", &lexicon.near_rhymes),
    ] {
        for entry in entries.iter() {
            if entry.pattern.is_empty() {
                errors.push(format!("Empty {} rhyme pattern", table));
            }
            if entry.words.len() < 2 {
                errors.push(format!(
                    "{} rhyme group '{}' has {} words (at least 2 needed)",
                    table,
                    entry.pattern,
                    entry.words.len()
                ));
            }
        }
    }

    if lexicon.perfect_rhymes.is_empty() {
        errors.push("No perfect rhyme groups".to_string());
    }

    (errors, warnings)
}
