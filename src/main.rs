//! fipebot - WhatsApp vehicle catalog bot
//!
//! Dual-mode application:
//! - Server mode (default): Meta webhook server answering WhatsApp messages
//!   with FIPE catalog lookups
//! - CLI mode: direct catalog queries for local testing (`search`, `brands`,
//!   `categories`, `quotas`)

mod catalog;
mod cli;
mod config;
mod error;
mod format;
mod http;
mod nlp;
mod search;
mod whatsapp;

use anyhow::{Context, Result};
use catalog::{load_catalog, CatalogIndex};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use nlp::ExtractionClient;
use search::SearchEngine;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use whatsapp::{router, AppState, WhatsAppClient};

/// Timeout for outbound API calls (delivery and extraction)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    let mut config = Config::from_env();
    if let Some(path) = cli.catalog {
        config.catalog_path = path;
    }

    // The catalog is loaded and indexed once; every mode shares the result.
    // A missing or malformed catalog is fatal at startup.
    let records = load_catalog(&config.catalog_path).with_context(|| {
        format!("Failed to load catalog from {}", config.catalog_path.display())
    })?;
    let index = Arc::new(CatalogIndex::build(records));
    if index.is_empty() {
        tracing::warn!("Catalog is empty; every query will return no results");
    }

    match cli.command {
        None => run_server(config, index, None).await,
        Some(Commands::Serve(args)) => run_server(config, index, args.port).await,
        Some(Commands::Search(args)) => {
            let result = execute_search(&index, &args);
            print_result(result)
        }
        Some(Commands::Brands) => print_result(Ok(index.all_brands().join("\n"))),
        Some(Commands::Categories) => print_result(Ok(index.all_categories().join("\n"))),
        Some(Commands::Quotas) => print_result(Ok(index.all_quotas().join("\n"))),
    }
}

/// Run the webhook server until interrupted
async fn run_server(config: Config, index: Arc<CatalogIndex>, port: Option<u16>) -> Result<()> {
    let port = port.unwrap_or(config.port);
    let http_client = http::client_with_timeout(HTTP_TIMEOUT);

    let state = AppState {
        engine: Arc::new(SearchEngine::new(index.clone())),
        index,
        whatsapp: Arc::new(WhatsAppClient::new(http_client.clone(), &config.whatsapp)),
        extraction: Arc::new(ExtractionClient::new(http_client, &config.extraction)),
        verify_token: config.whatsapp.verify_token.clone(),
    };

    if !state.whatsapp.is_configured() {
        tracing::warn!("WhatsApp credentials not configured; replies will be logged, not sent");
    }

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;

    info!("Webhook server listening on port {}", port);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Execute a catalog search in CLI mode
fn execute_search(index: &Arc<CatalogIndex>, args: &cli::SearchArgs) -> Result<String> {
    let query = error::normalize_text(&args.query);
    error::validate_query(&query).map_err(|e| anyhow::anyhow!(e.message()))?;

    let engine = SearchEngine::new(index.clone());
    let results = engine.search(&query);

    if args.json {
        serde_json::to_string_pretty(&results).context("Failed to serialize results")
    } else {
        Ok(format::format_reply(&results))
    }
}

/// Print a command result and exit non-zero on failure
fn print_result(result: Result<String>) -> Result<()> {
    match result {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

/// Map errors to exit codes. CLI mode never touches the network and an
/// empty result is a normal reply, so the only distinction that matters is
/// bad input versus everything else.
fn get_exit_code(err: &anyhow::Error) -> i32 {
    let err_str = err.to_string().to_lowercase();

    if err_str.contains("invalid") || err_str.contains("usage") {
        1 // Invalid arguments or usage error
    } else {
        5 // Other application errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_for_invalid_input() {
        let err = anyhow::anyhow!("Invalid input: Query cannot be empty");
        assert_eq!(get_exit_code(&err), 1);
    }

    #[test]
    fn test_exit_code_for_other_errors() {
        let err = anyhow::anyhow!("Failed to serialize results");
        assert_eq!(get_exit_code(&err), 5);
    }
}
