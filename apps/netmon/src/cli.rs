use std::path::PathBuf;

use clap::Parser;

/// Check that a handful of URLs are reachable and keep the history
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Check only this URL instead of the configured targets
    #[arg(long, conflicts_with = "serve")]
    pub url: Option<String>,

    /// Serve the recent history on localhost:<PORT> instead of checking
    #[arg(long, value_name = "PORT")]
    pub serve: Option<u16>,

    /// Config file (default: $XDG_CONFIG_HOME/netmon/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Database file, overriding the config file (default: ~/netmon.db)
    #[arg(long, value_name = "FILE")]
    pub database: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, error::ErrorKind};

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_batch_with_url_override() {
        let cli = Cli::try_parse_from(["netmon", "--url", "https://example.org/"]).unwrap();
        assert_eq!(cli.url.as_deref(), Some("https://example.org/"));
        assert_eq!(cli.serve, None);
    }

    #[test]
    fn test_serve_port() {
        let cli = Cli::try_parse_from(["netmon", "--serve", "8080"]).unwrap();
        assert_eq!(cli.serve, Some(8080));
    }

    #[test]
    fn test_serve_and_url_conflict() {
        let error = Cli::try_parse_from(["netmon", "--serve", "8080", "--url", "https://example.org/"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let error = Cli::try_parse_from(["netmon", "--serve", "http"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ValueValidation);
    }
}
