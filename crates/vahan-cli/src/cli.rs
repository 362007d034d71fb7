//! CLI definition using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
pub use vahan_types::OutputFormat;

#[derive(Parser)]
#[command(name = "vahan-checker")]
#[command(version)]
#[command(about = "Find fancy vehicle registration numbers and check whether they are taken")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Which numbers to generate. Unset values come from the config.
#[derive(Args, Debug, Clone)]
pub struct RangeArgs {
    /// Registration series prepended to each number (e.g. "TN09DE")
    #[arg(long, short = 'p')]
    pub prefix: Option<String>,

    /// First number of the range (1-9999)
    #[arg(long, short = 's', allow_negative_numbers = true)]
    pub start: Option<i64>,

    /// Last number of the range, inclusive (1-9999)
    #[arg(long, short = 'e', allow_negative_numbers = true)]
    pub end: Option<i64>,

    /// Also list numbers that match no fancy pattern (after all fancy ones)
    #[arg(long, conflicts_with = "fancy_only")]
    pub include_others: bool,

    /// Only list numbers that match a fancy pattern
    #[arg(long)]
    pub fancy_only: bool,
}

impl RangeArgs {
    pub fn include_others(&self) -> Option<bool> {
        if self.include_others {
            Some(true)
        } else if self.fancy_only {
            Some(false)
        } else {
            None
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List fancy registration candidates, fanciest first
    Generate {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Check candidates against the registry and write a CSV report
    Check {
        #[command(flatten)]
        range: RangeArgs,

        /// Ignore cached statuses and query the registry again
        #[arg(long)]
        refresh: bool,

        /// Only check the first N candidates
        #[arg(long, short = 'n')]
        limit: Option<usize>,

        /// CSV report path. Uses config value if not specified.
        #[arg(long, short = 'o')]
        report: Option<PathBuf>,

        /// Status cache file. Uses config value if not specified.
        #[arg(long)]
        cache: Option<PathBuf>,

        /// Registry lookup command (candidate is appended as last argument)
        #[arg(long)]
        lookup_cmd: Option<String>,

        /// Pause between registry lookups in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default registration prefix
        #[arg(long)]
        set_prefix: Option<String>,

        /// Set default range start
        #[arg(long, allow_negative_numbers = true)]
        set_start: Option<i64>,

        /// Set default range end
        #[arg(long, allow_negative_numbers = true)]
        set_end: Option<i64>,

        /// Include non-fancy numbers by default
        #[arg(long)]
        set_include_others: Option<bool>,

        /// Set registry lookup command
        #[arg(long)]
        set_lookup_cmd: Option<String>,

        /// Set pause between lookups in milliseconds
        #[arg(long)]
        set_delay_ms: Option<u64>,

        /// Set status cache file
        #[arg(long)]
        set_cache_path: Option<PathBuf>,

        /// Set CSV report path
        #[arg(long)]
        set_report_path: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },

    /// Manage the status cache
    Cache {
        /// Remove all cached statuses
        #[arg(long)]
        clear: bool,

        /// Show cache statistics
        #[arg(long)]
        stats: bool,

        /// Show the cached status of one candidate
        #[arg(long)]
        get: Option<String>,

        /// Forget the cached status of one candidate
        #[arg(long)]
        forget: Option<String>,

        /// Status cache file. Uses config value if not specified.
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from([
            "vahan-checker",
            "check",
            "--prefix",
            "TN09DE",
            "--start",
            "1200",
            "--end",
            "2300",
            "--refresh",
            "-n",
            "10",
            "-f",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Commands::Check {
                range,
                refresh,
                limit,
                ..
            } => {
                assert_eq!(range.prefix.as_deref(), Some("TN09DE"));
                assert_eq!((range.start, range.end), (Some(1200), Some(2300)));
                assert_eq!(range.include_others(), None);
                assert!(refresh);
                assert_eq!(limit, Some(10));
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_negative_start_is_parsed() {
        let cli = Cli::try_parse_from(["vahan-checker", "generate", "--start", "-5"]).unwrap();
        match cli.command {
            Commands::Generate { range } => assert_eq!(range.start, Some(-5)),
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_include_flags_conflict() {
        assert!(Cli::try_parse_from([
            "vahan-checker",
            "generate",
            "--include-others",
            "--fancy-only"
        ])
        .is_err());

        let cli = Cli::try_parse_from(["vahan-checker", "generate", "--fancy-only"]).unwrap();
        match cli.command {
            Commands::Generate { range } => assert_eq!(range.include_others(), Some(false)),
            _ => panic!("expected generate"),
        }
    }
}
