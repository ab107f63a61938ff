//! Command-line interface
//!
//! The webhook server is the default mode; the remaining subcommands query
//! the catalog directly for local testing and data inspection.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fipebot CLI
#[derive(Parser)]
#[command(name = "fipebot")]
#[command(about = "WhatsApp vehicle catalog search bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Path to the vehicle catalog JSON file
    #[arg(short, long, global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the WhatsApp webhook server (default)
    Serve(ServeArgs),
    /// Search the catalog from the command line
    Search(SearchArgs),
    /// List all brands in the catalog
    Brands,
    /// List all vehicle categories
    Categories,
    /// List all quota classes
    Quotas,
}

/// Server arguments
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on (overrides the PORT environment variable)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Search arguments
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Free-form query text (FIPE code, brand, model, year)
    pub query: String,

    /// Print matching records as JSON instead of the reply text
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_server_mode() {
        let cli = Cli::parse_from(["fipebot"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_search_subcommand() {
        let cli = Cli::parse_from(["fipebot", "search", "Toyota Hilux 2015", "--json"]);
        match cli.command {
            Some(Commands::Search(args)) => {
                assert_eq!(args.query, "Toyota Hilux 2015");
                assert!(args.json);
            }
            _ => panic!("expected search subcommand"),
        }
    }

    #[test]
    fn test_global_catalog_flag_after_subcommand() {
        let cli = Cli::parse_from(["fipebot", "brands", "--catalog", "/tmp/db.json"]);
        assert_eq!(cli.catalog.as_deref(), Some(std::path::Path::new("/tmp/db.json")));
    }

    #[test]
    fn test_serve_port_override() {
        let cli = Cli::parse_from(["fipebot", "serve", "--port", "9000"]);
        match cli.command {
            Some(Commands::Serve(args)) => assert_eq!(args.port, Some(9000)),
            _ => panic!("expected serve subcommand"),
        }
    }
}
