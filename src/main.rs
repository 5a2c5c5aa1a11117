use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use lead_score::batch;
use lead_score::output;
use lead_score::scoring::ScoringEngine;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a single entity
    Score {
        /// Entity display name (legal suffixes like "A.Ş." count)
        name: String,

        /// Attribute as KEY=VALUE (repeatable), e.g. -a employees=250 -a city=Izmir
        #[arg(short = 'a', long = "attr", value_parser = batch::parse_attribute)]
        attributes: Vec<(String, Value)>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Score every entity in a JSON file, ranked by final score
    Batch {
        /// JSON array, or object with an "entities"/"companies" array
        file: PathBuf,

        /// Print results and summary as JSON
        #[arg(long, conflicts_with = "tsv")]
        json: bool,

        /// Print tab-separated rows for scripting
        #[arg(long)]
        tsv: bool,

        /// Number of top targets listed in the summary
        #[arg(long, default_value_t = output::DEFAULT_TOP_TARGETS)]
        top: usize,
    },
    /// List the industry profiles and their multipliers
    Industries,
    /// Write the built-in scoring tables to the config file
    Init {
        /// Overwrite an existing file without asking
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "lead-score")]
#[command(about = "Rule-based B2B lead scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/lead-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Log to stderr; RUST_LOG overrides the --verbose default.
fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "lead_score=debug" } else { "lead_score=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("{}", e);
    }
    let config_path = cli.config.map(PathBuf::from);
    let use_colors = output::should_use_colors();

    match cli.command {
        Commands::Init { force } => {
            match lead_score::config::write_default_config(config_path, force) {
                Ok(Some(path)) => println!("Config written to {}", path.display()),
                Ok(None) => println!("Aborted."),
                Err(e) => {
                    eprintln!("Init failed: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }
        }
        Commands::Score {
            name,
            attributes,
            json,
        } => {
            let engine = load_engine(config_path);
            let attributes: Map<String, Value> = attributes.into_iter().collect();
            let result = match engine.score(&name, &attributes) {
                Ok(result) => result,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };
            if json {
                print_json(&result);
            } else {
                println!("{}", output::format_result_detail(&result, use_colors));
            }
        }
        Commands::Batch {
            file,
            json,
            tsv,
            top,
        } => {
            let engine = load_engine(config_path);
            let start_time = Instant::now();
            let entities = match batch::load_entities(&file) {
                Ok(entities) => entities,
                Err(e) => {
                    eprintln!("Input error: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };
            tracing::info!(count = entities.len(), file = %file.display(), "scoring batch");

            let mut outcomes = engine.score_all(entities);
            let summary = output::BatchSummary::from_outcomes(&outcomes, top);
            batch::rank_outcomes(&mut outcomes);

            if json {
                print_json(&serde_json::json!({
                    "results": outcomes,
                    "summary": summary,
                }));
            } else if tsv {
                let rows = output::format_tsv(&outcomes);
                if !rows.is_empty() {
                    println!("{}", rows);
                }
            } else {
                println!("{}", output::format_scored_table(&outcomes, use_colors));
                println!();
                println!("{}", summary.format(use_colors));
            }

            if cli.verbose {
                eprintln!();
                eprintln!("Total: {} entities in {:?}", outcomes.len(), start_time.elapsed());
            }
        }
        Commands::Industries => {
            let engine = load_engine(config_path);
            println!(
                "{}",
                output::format_industries(&engine.config().industries, use_colors)
            );
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Load config, then validate and compile the scoring tables. Exits with
/// EXIT_CONFIG on any problem.
fn load_engine(config_path: Option<PathBuf>) -> ScoringEngine {
    let config = match lead_score::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    match ScoringEngine::new(config.effective_scoring()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Scoring config errors:");
            for error in &e.errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(EXIT_CONFIG);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            std::process::exit(EXIT_INPUT);
        }
    }
}
