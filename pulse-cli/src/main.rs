mod render;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pulse_client::{CsvUpload, PulseClient};
use pulse_core::insights::SortDirection;
use pulse_core::upload::EXPECTED_COLUMNS;
use pulse_core::{submit, ApiConfig, MemoryStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pulse", about = "Churn insights from the DecisionPulse analytics API")]
struct Cli {
    /// Base URL of the analytics API
    #[arg(long, global = true, env = "DECISIONPULSE_API_URL")]
    api_url: Option<String>,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a behavior CSV and print the analysis
    Upload {
        /// CSV file with the expected feature columns
        csv: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// List lowest churn probability first
        #[arg(long)]
        ascending: bool,
    },
    /// Check that the API is reachable
    Health,
    /// Print the CSV header the API expects
    Columns,
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

fn setup_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(io::stderr)
        .init();
}

fn build_client(cli: &Cli) -> Result<PulseClient> {
    let config = ApiConfig::from_override(cli.api_url.as_deref());
    match cli.timeout_secs {
        Some(secs) => Ok(PulseClient::with_timeout(config, Duration::from_secs(secs))?),
        None => Ok(PulseClient::new(config)),
    }
}

async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Upload { csv, format, ascending } => {
            let upload = CsvUpload::read(csv)
                .await
                .with_context(|| format!("Failed to read {}", csv.display()))?;
            let client = build_client(&cli)?;
            let store = MemoryStore::new();

            eprintln!("Uploading {} to {}...", upload.file_name, client.config().base_url());
            let result = submit(&store, &client, client.config(), Some(&upload))
                .await
                .map_err(|e| {
                    log::error!("{e}");
                    anyhow::anyhow!(e.user_message().unwrap_or_else(|| e.to_string()))
                })?;

            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(result.as_ref())?);
                }
                OutputFormat::Table => {
                    let direction = if *ascending {
                        SortDirection::Ascending
                    } else {
                        SortDirection::Descending
                    };
                    println!("{}", render::render_summary(&result));
                    if result.is_empty() {
                        println!("No users in the uploaded file");
                    } else {
                        println!("{}", render::render_table(&result, direction));
                    }
                }
            }
        }
        Commands::Health => {
            let client = build_client(&cli)?;
            let health = client
                .health()
                .await
                .with_context(|| format!("{} is unreachable", client.config().health_url()))?;
            if !health.is_ok() {
                anyhow::bail!("API reported status '{}'", health.status);
            }
            println!("{}: {}", client.config().base_url(), health.status);
        }
        Commands::Columns => {
            println!("{}", EXPECTED_COLUMNS.join(","));
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
