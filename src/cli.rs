//! Command-line interface argument parsing.

use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

pub const DEFAULT_INPUT: &str = "personality_datasert.csv";

/// Behavioral Personality Dashboard
///
/// Cleans a personality survey CSV, aggregates it by personality type and
/// shows a nine-panel dashboard window.
///
/// Examples:
///   persona-dash
///   persona-dash survey.csv --verbose
///   persona-dash survey.csv --config dashboard.json --width 1200 --height 900
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Survey CSV file with a header row
    #[arg(
        value_name = "CSV",
        default_value = DEFAULT_INPUT,
        env = "PERSONA_DASH_INPUT"
    )]
    pub input: PathBuf,

    /// JSON file with canvas and palette settings
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Canvas width in pixels (overrides the config file)
    #[arg(long, value_name = "PX")]
    pub width: Option<u32>,

    /// Canvas height in pixels (overrides the config file)
    #[arg(long, value_name = "PX")]
    pub height: Option<u32>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log level selected by --verbose / --quiet.
    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::WARN
        } else {
            Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_input_and_flags() {
        let args = Args::try_parse_from([
            "persona-dash",
            "survey.csv",
            "--width",
            "1200",
            "--height",
            "900",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.input, PathBuf::from("survey.csv"));
        assert_eq!(args.width, Some(1200));
        assert_eq!(args.height, Some(900));
        assert!(args.config.is_none());
        assert_eq!(args.log_level(), Level::DEBUG);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["persona-dash", "x.csv", "-v", "-q"]).is_err());

        let args = Args::try_parse_from(["persona-dash", "x.csv", "--quiet"]).unwrap();
        assert_eq!(args.log_level(), Level::WARN);
    }

    #[test]
    fn test_default_log_level() {
        let args = Args::try_parse_from(["persona-dash", "x.csv"]).unwrap();
        assert_eq!(args.log_level(), Level::INFO);
    }
}
