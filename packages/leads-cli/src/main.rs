//! Lead discovery CLI.
//!
//! Runs discovery or a full allocation for a topic and prints JSON on
//! stdout. Logs go to stderr.

mod config;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lead_discovery::{
    AllocationPolicy, AllocationRequest, DiscoveryConfig, DiscoveryError, KnownIdentitySet,
    LeadAllocator, LeadDiscovery, SerpApiSearcher,
};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "leads")]
#[command(about = "Discover contactable Instagram leads for a topic")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Race the query set for a topic and print unique candidates
    Discover {
        topic: String,
        #[arg(long, default_value_t = 15)]
        quota: usize,
    },

    /// Discover under the daily budget and drop already-saved identities
    Allocate {
        topic: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        campaign: Option<String>,
        /// Leads already allocated today
        #[arg(long, default_value_t = 0)]
        used_today: usize,
        /// File of already-saved identities, one per line
        #[arg(long)]
        known_file: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    #[serde(rename = "type")]
    kind: &'static str,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,lead_discovery=debug,serpapi_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let response = error_response(&e);
            tracing::error!(error = %response.error, "Command failed");
            if let Ok(json) = serde_json::to_string_pretty(&response) {
                println!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

/// Map a failed command onto the JSON error body. A missing provider key
/// gets a setup hint instead of the raw error.
fn error_response(err: &anyhow::Error) -> ErrorResponse {
    match err.downcast_ref::<DiscoveryError>() {
        Some(DiscoveryError::NotConfigured { provider }) => ErrorResponse {
            success: false,
            error: format!(
                "Search engine offline: set SERPAPI_API_KEY to enable the {} provider.",
                provider
            ),
            kind: "config_missing",
        },
        Some(DiscoveryError::DailyLimitReached { .. }) => ErrorResponse {
            success: false,
            error: "Daily lead limit reached".to_string(),
            kind: "limit_reached",
        },
        _ => ErrorResponse {
            success: false,
            error: format!("{:#}", err),
            kind: "error",
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    let searcher = SerpApiSearcher::new(config.serpapi_api_key.clone(), config.serpapi_timeout);
    let discovery = LeadDiscovery::new(searcher).with_config(
        DiscoveryConfig::default().with_request_timeout(config.serpapi_timeout),
    );

    match cli.command {
        Commands::Discover { topic, quota } => {
            let run = discovery.discover_with_report(&topic, quota).await?;
            print_json(&run)
        }
        Commands::Allocate {
            topic,
            location,
            campaign,
            used_today,
            known_file,
        } => {
            let known = match known_file {
                Some(path) => load_known(&path)?,
                None => KnownIdentitySet::new(),
            };

            let allocator = LeadAllocator::new(discovery).with_policy(
                AllocationPolicy::default().with_daily_limit(config.daily_lead_limit),
            );
            let request = AllocationRequest {
                topic,
                location,
                campaign,
            };

            let allocation = allocator.allocate(&request, used_today, &known).await?;
            print_json(&allocation)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Read identities one per line, ignoring blanks and `#` comments.
fn load_known(path: &Path) -> Result<KnownIdentitySet> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read known identities from {}", path.display()))?;
    Ok(parse_known(&contents))
}

fn parse_known(contents: &str) -> KnownIdentitySet {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.trim_start_matches('@').to_string())
        .collect::<HashSet<_>>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_parse_known_skips_blanks_and_comments() {
        let known = parse_known("janebakes\n\n# saved last week\n@fitwithsam\n  studio9  \n");
        assert_eq!(known.len(), 3);
        assert!(known.contains("janebakes"));
        assert!(known.contains("fitwithsam"));
        assert!(known.contains("studio9"));
    }

    #[test]
    fn test_load_known_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a\nb").unwrap();

        let known = load_known(file.path()).unwrap();
        assert_eq!(known.len(), 2);
    }

    #[test]
    fn test_load_known_missing_file_is_error() {
        assert!(load_known(Path::new("/nonexistent/known.txt")).is_err());
    }

    #[test]
    fn test_not_configured_prints_setup_hint() {
        let err = anyhow::Error::from(DiscoveryError::NotConfigured { provider: "serpapi" });
        let response = error_response(&err);

        assert!(!response.success);
        assert_eq!(response.kind, "config_missing");
        assert!(response.error.contains("SERPAPI_API_KEY"));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "config_missing");
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn test_unconfigured_discover_maps_to_config_missing() {
        let discovery = LeadDiscovery::new(SerpApiSearcher::new(None, Duration::from_secs(1)));
        let err = discovery.discover("Fitness", 5).await.unwrap_err();

        let response = error_response(&anyhow::Error::from(err).context("discover failed"));
        assert_eq!(response.kind, "config_missing");
    }

    #[test]
    fn test_limit_and_other_errors() {
        let limit = anyhow::Error::from(DiscoveryError::DailyLimitReached { limit: 1000 });
        assert_eq!(error_response(&limit).kind, "limit_reached");

        let other = anyhow::anyhow!("network down");
        let response = error_response(&other);
        assert_eq!(response.kind, "error");
        assert_eq!(response.error, "network down");
    }

    #[test]
    fn test_cli_parses_allocate() {
        let cli = Cli::try_parse_from([
            "leads",
            "allocate",
            "Fitness",
            "--location",
            "Austin",
            "--used-today",
            "12",
        ])
        .unwrap();

        match cli.command {
            Commands::Allocate {
                topic,
                location,
                used_today,
                ..
            } => {
                assert_eq!(topic, "Fitness");
                assert_eq!(location.as_deref(), Some("Austin"));
                assert_eq!(used_today, 12);
            }
            Commands::Discover { .. } => panic!("expected allocate"),
        }
    }
}
