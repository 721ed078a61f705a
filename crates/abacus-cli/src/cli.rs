//! CLI argument definitions for the abacus trainer.

use std::path::PathBuf;

use abacus_model::Operation;
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

/// Default location of the progress file, relative to the working directory.
pub const DEFAULT_PROGRESS_FILE: &str = "abacus-progress.json";

#[derive(Parser)]
#[command(
    name = "abacus",
    version,
    about = "Abacus trainer - track mastery and unlock practice levels",
    long_about = "Track a learner's progress through the abacus curriculum.\n\n\
                  Levels are grouped by operation, complement technique and digit count.\n\
                  Mastering a level unlocks the next one in its chain."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Progress file to read and update.
    #[arg(
        long = "progress-file",
        value_name = "PATH",
        default_value = DEFAULT_PROGRESS_FILE,
        global = true
    )]
    pub progress_file: PathBuf,

    /// TOML file with mastery and unlock settings.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List levels with their statistics and lock state.
    Levels(LevelsArgs),

    /// Record answer outcomes for a level.
    Record(RecordArgs),

    /// Choose the level to practise.
    Select(SelectArgs),

    /// Show completion per section, per operation and overall.
    Summary,

    /// Suggest the next level to practise.
    Next(NextArgs),
}

#[derive(Parser)]
pub struct LevelsArgs {
    /// Only list levels of this operation.
    #[arg(long = "operation", value_enum)]
    pub operation: Option<OperationArg>,
}

#[derive(Parser)]
#[command(group(
    ArgGroup::new("outcome")
        .required(true)
        .args(["correct", "incorrect"])
))]
pub struct RecordArgs {
    /// Level identifier, e.g. `addition/small-friend/double`.
    #[arg(value_name = "LEVEL_ID")]
    pub level: String,

    /// The answers were correct.
    #[arg(long = "correct")]
    pub correct: bool,

    /// The answers were wrong.
    #[arg(long = "incorrect")]
    pub incorrect: bool,

    /// Number of answers with this outcome.
    #[arg(
        long = "count",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub count: u32,
}

impl RecordArgs {
    pub fn was_correct(&self) -> bool {
        self.correct && !self.incorrect
    }
}

#[derive(Parser)]
pub struct SelectArgs {
    /// Level identifier, e.g. `subtraction/none/single`.
    #[arg(value_name = "LEVEL_ID")]
    pub level: String,
}

#[derive(Parser)]
pub struct NextArgs {
    /// Only suggest a level for this operation.
    #[arg(long = "operation", value_enum)]
    pub operation: Option<OperationArg>,
}

/// CLI operation choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum OperationArg {
    Addition,
    Subtraction,
    Mixed,
}

impl From<OperationArg> for Operation {
    fn from(arg: OperationArg) -> Self {
        match arg {
            OperationArg::Addition => Operation::Addition,
            OperationArg::Subtraction => Operation::Subtraction,
            OperationArg::Mixed => Operation::Mixed,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn record_requires_an_outcome() {
        assert!(Cli::try_parse_from(["abacus", "record", "addition/none/single"]).is_err());
        assert!(
            Cli::try_parse_from([
                "abacus",
                "record",
                "addition/none/single",
                "--correct",
                "--incorrect"
            ])
            .is_err()
        );
    }

    #[test]
    fn record_parses_count_and_global_flags() {
        let cli = Cli::try_parse_from([
            "abacus",
            "record",
            "addition/none/single",
            "--incorrect",
            "--count",
            "3",
            "--progress-file",
            "ana.json",
        ])
        .unwrap();
        assert_eq!(cli.progress_file, PathBuf::from("ana.json"));
        let Command::Record(args) = cli.command else {
            panic!("expected record command");
        };
        assert_eq!(args.count, 3);
        assert!(!args.was_correct());
    }

    #[test]
    fn zero_count_is_rejected() {
        assert!(
            Cli::try_parse_from([
                "abacus",
                "record",
                "addition/none/single",
                "--correct",
                "--count",
                "0"
            ])
            .is_err()
        );
    }

    #[test]
    fn progress_file_has_a_default() {
        let cli = Cli::try_parse_from(["abacus", "summary"]).unwrap();
        assert_eq!(cli.progress_file, PathBuf::from(DEFAULT_PROGRESS_FILE));
        assert!(cli.config.is_none());
    }
}
