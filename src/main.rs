//! steward - auto-approve and merge dependency update pull requests

mod cli;

use clap::{Parser, Subcommand, ValueEnum};
use cli::{EvaluateOptions, run_evaluate};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Policy-gated auto-merge for dependency update pull requests
#[derive(Parser)]
#[command(name = "steward", version)]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a check_suite delivery and merge the pull request if eligible
    Evaluate {
        /// Path to the JSON delivery body, or - for stdin
        #[arg(long)]
        event: PathBuf,

        /// GitHub token (falls back to `gh auth token`)
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// GitHub REST API base URL
        #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
        api_url: String,

        /// Evaluate only; do not approve or merge
        #[arg(long)]
        dry_run: bool,
    },
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("steward=info,dependabot_steward=info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry.with(fmt::layer().with_writer(std::io::stderr)).init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let result = match cli.command {
        Commands::Evaluate {
            event,
            token,
            api_url,
            dry_run,
        } => run_evaluate(&event, &api_url, EvaluateOptions { dry_run, token }).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "evaluation aborted");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
