//! CLI command definitions and argument parsing.

use crate::output::OutputFormat;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Wedlock - Inspect and administer a world's marriage data.
#[derive(Debug, Parser)]
#[command(name = "wedlock")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Snapshot file (default: the configured save file in the current directory)
    #[arg(short, long, global = true, env = "WEDLOCK_FILE")]
    pub file: Option<PathBuf>,

    /// Host configuration file (TOML)
    #[arg(short, long, global = true, env = "WEDLOCK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (ids only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every couple and its color
    List,

    /// Show a player's partner and couple color
    Show(ShowArgs),

    /// Divorce a couple without either player's consent
    Divorce(DivorceArgs),

    /// Validate the snapshot file
    Check,

    /// Simulate players in an interactive session
    Play,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Player UUID or offline-mode name
    pub player: String,
}

/// Arguments for the divorce command.
#[derive(Debug, Parser)]
pub struct DivorceArgs {
    /// One partner (UUID or offline-mode name)
    pub first: String,

    /// The other partner (UUID or offline-mode name)
    pub second: String,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl Cli {
    /// Log filter implied by `-v`, used when `RUST_LOG` is unset
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Quiet => OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_play() {
        let cli = Cli::parse_from(["wedlock"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn test_divorce_command() {
        let cli = Cli::parse_from([
            "wedlock", "divorce", "Steve", "Alex", "--yes", "-f", "w.json",
        ]);
        match cli.command {
            Some(Command::Divorce(args)) => {
                assert_eq!(args.first, "Steve");
                assert_eq!(args.second, "Alex");
                assert!(args.yes);
            }
            _ => panic!("Expected Divorce command"),
        }
        assert_eq!(cli.file, Some(PathBuf::from("w.json")));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["wedlock", "list", "--format", "json", "-vv", "--no-color"]);
        assert!(matches!(cli.command, Some(Command::List)));
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.no_color);
        assert_eq!(cli.log_level(), "debug");
    }

    #[test]
    fn test_format_conversion() {
        let format: OutputFormat = CliFormat::Quiet.into();
        assert_eq!(format, OutputFormat::Quiet);
    }
}
