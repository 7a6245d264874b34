//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// Seqlab API - sequencing lab backend
#[derive(Parser, Debug)]
#[command(name = "seqlab-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Wait for the database, create missing tables, then serve HTTP
    Serve(ServeArgs),

    /// Create missing tables and exit
    InitDb,

    /// Poll the database until it answers or the retry budget runs out
    WaitForDb(WaitArgs),

    /// Probe the database once; exit code 0 when it answers
    Probe,
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long, env = "SERVER_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SERVER_PORT")]
    pub port: Option<u16>,

    /// Start without waiting for the database to become ready
    #[arg(long)]
    pub skip_wait: bool,
}

/// Arguments for the wait-for-db command
#[derive(Parser, Debug)]
pub struct WaitArgs {
    /// Seconds between probes
    #[arg(long)]
    pub interval: Option<u64>,

    /// Failed probes tolerated before giving up
    #[arg(long)]
    pub retries: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["seqlab-api", "serve", "--port", "9000", "--skip-wait"])
            .unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(9000));
                assert!(args.skip_wait);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_wait_for_db() {
        let cli = Cli::try_parse_from(["seqlab-api", "-v", "wait-for-db", "--retries", "3"])
            .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::WaitForDb(args) => {
                assert_eq!(args.retries, Some(3));
                assert_eq!(args.interval, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_init_db() {
        let cli = Cli::try_parse_from(["seqlab-api", "init-db"]).unwrap();
        assert!(matches!(cli.command, Commands::InitDb));
    }
}
