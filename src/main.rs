//! Traitlens - peer feedback to personality traits
//!
//! Command-line entry point. Results are written to stdout as JSON; logs go
//! to stderr.

mod cli;

use clap::{Parser, Subcommand};
use cli::index::IndexAction;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;
use traitlens_core::error::Result;

#[derive(Parser)]
#[command(name = "traitlens")]
#[command(about = "Turn peer feedback into ranked personality traits", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Set log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Configuration file (TOML); TRAITLENS__* environment variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a trait profile from a candidate's submissions
    Profile {
        /// JSON array or JSON lines of {"vote", "comment"}; `-` reads stdin
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Traits to keep per polarity (defaults to pipeline.top_k)
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Show clauses and resolved trait mentions for one comment
    Analyze {
        /// Vote attached to the comment: -1, 0 or 1
        #[arg(short, long, allow_hyphen_values = true)]
        vote: i64,

        /// Comment text
        comment: String,
    },

    /// Print the canonical label of each phrase
    Canonicalize {
        #[arg(required = true)]
        phrases: Vec<String>,
    },

    /// Vector index maintenance
    Index {
        #[command(subcommand)]
        action: IndexAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // model downloads and HTTP clients are noisy below warn
    let filter = EnvFilter::new(format!(
        "traitlens={level},traitlens_core={level},ort=warn,hf_hub=warn,reqwest=warn",
        level = level.as_str().to_lowercase()
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("Traitlens v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = cli::helpers::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Profile { input, top_k } => cli::profile::handle(&config, &input, top_k).await,
        Commands::Analyze { vote, comment } => cli::analyze::handle(&config, vote, &comment).await,
        Commands::Canonicalize { phrases } => cli::canonicalize::handle(&config, &phrases),
        Commands::Index { action } => cli::index::handle(&config, action).await,
    }
}
