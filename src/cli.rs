//! CLI interface for adstat
//!
//! Running `adstat` with no arguments produces the weekly report using the
//! default configuration file. Subcommands and flags only refine that.
//!
//! # Example
//!
//! ```bash
//! # Weekly report into the configured spreadsheet
//! adstat
//!
//! # Show what would be written, without touching the spreadsheet
//! adstat run --dry-run
//!
//! # Rebuild the report as it would have been produced on 2024-01-08
//! adstat run --as-of 2024-01-08T06:00:00 --keep-going
//!
//! # List the campaigns visible to each configured account
//! adstat campaigns --json
//! ```

use crate::runner::FailurePolicy;
use adstat_core::error::{AdstatError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Weekly advertising spend report
#[derive(Parser, Debug, Clone)]
#[command(name = "adstat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', env = "ADSTAT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Only show warnings and errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Timezone used to evaluate the current date (e.g. "Europe/Paris")
    #[arg(long, short = 'z', global = true)]
    pub timezone: Option<String>,

    /// Evaluate the current date in UTC (overrides --timezone)
    #[arg(long, global = true)]
    pub utc: bool,

    /// Subcommand to execute; defaults to `run`
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Arguments for the report run
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Collect rows in memory and print them instead of writing the spreadsheet
    #[arg(long)]
    pub dry_run: bool,

    /// Skip campaigns whose statistics cannot be fetched instead of aborting
    #[arg(long, short = 'k')]
    pub keep_going: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Compute the reporting window as of this local date or date-time
    /// (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS) instead of now
    #[arg(long)]
    pub as_of: Option<String>,
}

impl RunArgs {
    /// Failure policy selected by the flags
    pub fn failure_policy(&self) -> FailurePolicy {
        if self.keep_going {
            FailurePolicy::SkipCampaign
        } else {
            FailurePolicy::Abort
        }
    }

    /// Progress lines go to stdout, so they are suppressed for JSON output
    pub fn show_progress(&self) -> bool {
        !self.json
    }
}

/// Arguments for listing campaigns
#[derive(Args, Debug, Clone)]
pub struct CampaignsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch statistics and append this week's rows (default)
    Run(RunArgs),
    /// List the campaigns visible to each configured account
    Campaigns(CampaignsArgs),
}

/// Parse an `--as-of` value into a local date-time
///
/// A bare date means midnight at the start of that day.
pub fn parse_as_of(value: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AdstatError::InvalidDate(format!(
            "'{value}'. Use YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS"
        ))
    })?;
    date.and_hms_opt(0, 0, 0)
        .ok_or_else(|| AdstatError::InvalidDate(format!("Invalid date: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_means_default_run() {
        let cli = Cli::try_parse_from(["adstat"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.quiet);
    }

    #[test]
    fn test_run_flags() {
        let cli = Cli::try_parse_from([
            "adstat",
            "run",
            "--dry-run",
            "--keep-going",
            "--as-of",
            "2024-01-08",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Run(args)) => {
                assert!(args.dry_run);
                assert_eq!(args.failure_policy(), FailurePolicy::SkipCampaign);
                assert_eq!(args.as_of.as_deref(), Some("2024-01-08"));
            }
            other => panic!("expected run command, got {other:?}"),
        }
    }

    #[test]
    fn test_json_output_suppresses_progress() {
        let cli = Cli::try_parse_from(["adstat", "run", "--dry-run", "--json"]).unwrap();
        match cli.command {
            Some(Command::Run(args)) => assert!(!args.show_progress()),
            other => panic!("expected run command, got {other:?}"),
        }
        assert!(RunArgs::default().show_progress());
    }

    #[test]
    fn test_default_policy_aborts() {
        assert_eq!(RunArgs::default().failure_policy(), FailurePolicy::Abort);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["adstat", "campaigns", "--json", "--utc", "-c", "x.toml"])
            .unwrap();
        assert!(cli.utc);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(
            cli.command,
            Some(Command::Campaigns(CampaignsArgs { json: true }))
        ));
    }

    #[test]
    fn test_parse_as_of() {
        let dt = parse_as_of("2024-01-08T06:30:00").unwrap();
        assert_eq!(dt.to_string(), "2024-01-08 06:30:00");

        let dt = parse_as_of("2024-01-08").unwrap();
        assert_eq!(dt.to_string(), "2024-01-08 00:00:00");

        assert!(matches!(
            parse_as_of("08/01/2024"),
            Err(AdstatError::InvalidDate(_))
        ));
    }
}
