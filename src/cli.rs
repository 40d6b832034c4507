//! Command-line interface definition for Toplist
//!
//! This module defines the CLI structure using clap's derive API.
//! The binary has a single job (serve the list API), so there are no
//! subcommands, only startup overrides.

use clap::Parser;

/// Toplist - backend service for AI-curated top 10 lists
///
/// Accepts a topic prompt, asks a generative model for a ranked list,
/// and enriches each item with image and reference links from web search.
#[derive(Parser, Debug, Clone)]
#[command(name = "toplist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["toplist"]);
        assert!(cli.config.is_none());
        assert!(cli.port.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from(["toplist", "--config", "custom.yaml", "--port", "9000", "-v"]);
        assert_eq!(cli.config.as_deref(), Some("custom.yaml"));
        assert_eq!(cli.port, Some(9000));
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_rejects_invalid_port() {
        let result = Cli::try_parse_from(["toplist", "--port", "99999"]);
        assert!(result.is_err());
    }
}
