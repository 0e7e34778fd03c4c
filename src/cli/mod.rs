//! Command-line interface for gb
//!
//! clap parses the arguments, configuration is loaded once, and each
//! subcommand lives in its own module under [`commands`].

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;
pub mod output;

pub use output::Output;

use crate::config::Config;
use commands::{backup, restore, version};

/// Create and restore git bundles
#[derive(Parser)]
#[command(
    name = "gb",
    version = env!("CARGO_PKG_VERSION"),
    about = "Create and restore git bundles",
    long_about = "A high-performance tool for creating and restoring git bundles with parallel processing.\n\n\
                  Git bundles are portable archives containing git repository data that can be used for \
                  backup, transfer, or distribution. Repositories are discovered automatically and \
                  processed in parallel.\n\n\
                  Default behavior (no command specified): creates bundles of all repositories.",
    propagate_version = true
)]
pub struct Cli {
    /// Enable verbose output (per-repository trace lines on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output (also traces every git command)
    #[arg(short = 'x', long, global = true)]
    pub debug: bool,

    /// Use custom configuration file instead of the user config
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create bundles of all repositories
    #[command(visible_alias = "b", long_about = backup::LONG_ABOUT)]
    Backup(backup::BackupArgs),
    /// Restore repositories from a directory of bundles
    #[command(visible_alias = "r", long_about = restore::LONG_ABOUT)]
    Restore(restore::RestoreArgs),
    /// Show version and build information
    Version,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.debug);

        let output = Output::new();
        let load_config = || Config::load_with_custom_config(self.config.as_deref());

        match self.command {
            Some(Commands::Backup(args)) => backup::execute(args, &load_config()?, &output).await,
            Some(Commands::Restore(args)) => restore::execute(args, &load_config()?, &output).await,
            Some(Commands::Version) => version::execute(&output).await,
            None => backup::execute(backup::BackupArgs::default(), &load_config()?, &output).await,
        }
    }
}

fn setup_logging(verbose: bool, debug: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            tracing_subscriber::EnvFilter::new("gb=trace")
        } else if verbose {
            tracing_subscriber::EnvFilter::new("gb=debug")
        } else {
            tracing_subscriber::EnvFilter::new("warn")
        }
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_backup() {
        let cli = Cli::try_parse_from(["gb", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_restore_arguments() {
        let cli = Cli::try_parse_from(["gb", "r", "/backups", "/restored", "-f", "-x"]).unwrap();
        assert!(cli.debug);
        match cli.command {
            Some(Commands::Restore(args)) => {
                assert!(args.force);
                assert_eq!(args.bundle_dir, Some(PathBuf::from("/backups")));
                assert_eq!(args.dest_dir, Some(PathBuf::from("/restored")));
            }
            _ => panic!("expected restore"),
        }
    }

    #[test]
    fn test_restore_accepts_at_most_two_paths() {
        assert!(Cli::try_parse_from(["gb", "restore", "a", "b", "c"]).is_err());
    }

    #[test]
    fn test_force_is_restore_only() {
        assert!(Cli::try_parse_from(["gb", "backup", "--force"]).is_err());
    }
}
