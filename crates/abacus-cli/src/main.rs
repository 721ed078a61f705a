//! Abacus trainer CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

use abacus_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use abacus_cli::commands::{
    SelectOutcome, Session, run_levels, run_next, run_record, run_select,
};
use abacus_cli::logging::{LogConfig, LogFormat, init_logging};
use abacus_cli::summary::{
    format_next, format_select_outcome, print_levels, print_progress_summary,
    print_record_report,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let mut session = Session::open(&cli.progress_file, cli.config.as_deref())?;
    match &cli.command {
        Command::Levels(args) => {
            let views = run_levels(&session, args.operation.map(Into::into));
            print_levels(&views);
        }
        Command::Record(args) => {
            let report = run_record(&mut session, args)?;
            print_record_report(&report);
        }
        Command::Select(args) => {
            let outcome = run_select(&mut session, args)?;
            let message = format_select_outcome(&outcome);
            if matches!(outcome, SelectOutcome::Locked { .. }) {
                eprintln!("{message}");
                return Ok(1);
            }
            println!("{message}");
        }
        Command::Summary => print_progress_summary(&session.store().summary()),
        Command::Next(args) => println!("{}", format_next(&run_next(&session, args))),
    }
    Ok(0)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
