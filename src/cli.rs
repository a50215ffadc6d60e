//! Command-line interface definition for Courier
//!
//! This module defines the CLI structure using clap's derive API,
//! providing the driver-facing commands: sign-in, delivery lookups, and
//! session management.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Courier - delivery driver companion CLI
///
/// Sign in with an emailed magic link, then browse your assigned
/// deliveries from the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "courier")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults to the platform config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the API base URL from config
    #[arg(long, env = "COURIER_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Courier
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Request a magic sign-in link by email
    Login {
        /// Email address your driver account is registered under
        email: String,
    },

    /// Exchange the token from an emailed link for a session
    Exchange {
        /// The one-time token from the magic link
        token: String,
    },

    /// List your assigned deliveries
    Deliveries {
        /// Only deliveries scheduled on this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Only deliveries in this status (pending, in_transit, ...)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Show full detail for one delivery
    Delivery {
        /// Delivery identifier from the list view
        id: String,
    },

    /// Check that the API server is reachable
    Ping,

    /// Show the signed-in driver
    Whoami,

    /// Sign out and clear stored credentials
    Logout,
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
    fn test_parses_login_command() {
        let cli = Cli::try_parse_from(["courier", "login", "sam@example.com"]).unwrap();
        match cli.command {
            Commands::Login { email } => assert_eq!(email, "sam@example.com"),
            other => panic!("expected Login, got {other:?}"),
        }
    }

    #[test]
    fn test_parses_deliveries_filters() {
        let cli = Cli::try_parse_from([
            "courier",
            "deliveries",
            "--date",
            "2026-08-06",
            "--status",
            "pending",
        ])
        .unwrap();
        match cli.command {
            Commands::Deliveries { date, status } => {
                assert_eq!(date.as_deref(), Some("2026-08-06"));
                assert_eq!(status.as_deref(), Some("pending"));
            }
            other => panic!("expected Deliveries, got {other:?}"),
        }
    }

    #[test]
    fn test_base_url_override_flag() {
        let cli =
            Cli::try_parse_from(["courier", "--base-url", "https://api.example.com", "ping"])
                .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("https://api.example.com"));
    }

    #[test]
    fn test_requires_a_subcommand() {
        assert!(Cli::try_parse_from(["courier"]).is_err());
    }
}
