//! FeedFilter CLI
//!
//! CLI tool for checking filter patterns against recorded feed entries and
//! managing stored settings.

mod bench;
mod check;
mod entries;
mod tree;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use ff_core::settings::{migrate, save_settings, StoredSettings};
use tracing_subscriber::EnvFilter;

use crate::bench::BenchOptions;
use crate::check::CheckOptions;

#[derive(Parser)]
#[command(name = "ff-cli")]
#[command(about = "FeedFilter pattern checker and tools")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide recorded entries against a pattern file
    Check {
        /// Filter pattern file
        #[arg(short, long)]
        patterns: Option<PathBuf>,

        /// Entries, one JSON object per line
        #[arg(short, long)]
        entries: PathBuf,

        /// Stored settings file (any supported version)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Hide suggested entries when no pattern decides
        #[arg(long)]
        hide_suggested: bool,

        /// Hide entries with content credentials when no pattern decides
        #[arg(long)]
        hide_content_credentials: bool,

        /// Print one JSON decision per line
        #[arg(long)]
        json: bool,
    },

    /// Show how a pattern file is parsed and compiled
    Tree {
        /// Filter pattern file
        #[arg(short, long)]
        patterns: PathBuf,

        /// Print the indentation blocks instead of the compiled tree
        #[arg(long)]
        blocks: bool,
    },

    /// Upgrade a stored settings file to the current version
    Migrate {
        /// Stored settings file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Time pattern compilation and decisions
    Bench {
        /// Filter pattern file
        #[arg(short, long)]
        patterns: PathBuf,

        /// Entries, one JSON object per line
        #[arg(short, long)]
        entries: PathBuf,

        /// Passes over the entries
        #[arg(short, long, default_value_t = 1000)]
        iterations: usize,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            patterns,
            entries,
            settings,
            hide_suggested,
            hide_content_credentials,
            json,
        } => check::run_check(CheckOptions {
            patterns,
            entries,
            settings,
            hide_suggested,
            hide_content_credentials,
            json,
        })
        .map(|_| ()),
        Commands::Tree { patterns, blocks } => tree::run_tree(&patterns, blocks),
        Commands::Migrate { input, output } => cmd_migrate(&input, output.as_deref()),
        Commands::Bench {
            patterns,
            entries,
            iterations,
        } => bench::run_bench(BenchOptions {
            patterns,
            entries,
            iterations,
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "warn" };
        EnvFilter::new(level)
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn cmd_migrate(input: &Path, output: Option<&Path>) -> Result<(), String> {
    let raw = fs::read_to_string(input)
        .map_err(|e| format!("Failed to read '{}': {}", input.display(), e))?;

    let stored = StoredSettings::from_json(&raw)
        .map_err(|e| format!("Invalid settings '{}': {}", input.display(), e))?;
    let from_version = stored.version();

    let settings = migrate(stored);
    let json = save_settings(&settings).map_err(|e| format!("Failed to encode settings: {}", e))?;

    match output {
        Some(path) => {
            fs::write(path, &json)
                .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;
            println!(
                "Migrated '{}' from version {} to {}",
                input.display(),
                from_version,
                ff_core::settings::SETTINGS_VERSION
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
