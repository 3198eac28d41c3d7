//! signout CLI — serve the hand-off API or score submissions offline.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "signout", version, about = "Clinical hand-off rubric scoring")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Listen address, overrides the config (e.g. "0.0.0.0:8000")
        #[arg(long)]
        bind: Option<String>,
    },

    /// Score a hand-off JSON file against the rubric
    Score {
        /// Path to the submission JSON
        #[arg(long)]
        submission: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate a hand-off JSON file and show its normalized lists
    Validate {
        /// Path to the submission JSON
        #[arg(long)]
        submission: PathBuf,
    },

    /// Create starter config and a sample submission
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("signout=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { config, bind } => commands::serve::execute(config, bind).await,
        Commands::Score { submission, format } => commands::score::execute(submission, format),
        Commands::Validate { submission } => commands::validate::execute(submission),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
