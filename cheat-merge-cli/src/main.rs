//! cheat-merge CLI
//!
//! Merge libretro-database Game Boy Advance cheats into an EZ-Flash Omega
//! cheat library.

mod cli_types;
mod commands;
mod error;

use std::io::Write;
use std::path::Path;

use clap::Parser;
use env_logger::{Target, WriteStyle};
use log::{Level, LevelFilter};

use cli_types::{Cli, Commands, ConfigAction};
use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to set up logging: {e}");
        std::process::exit(2);
    }

    let outcome = match cli.command {
        Commands::Patch {
            corpus,
            dry_run,
            report,
        } => commands::patch::run_patch(corpus, dry_run, report, cli.quiet),
        Commands::Correlate { corpus } => commands::correlate::run_correlate(corpus).map(|_| 0),
        Commands::Everdrive { in_tsv, out_dir } => {
            commands::everdrive::run_everdrive(&in_tsv, &out_dir).map(|_| 0)
        }
        Commands::Config { action } => match action {
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(0)
            }
            ConfigAction::Show => commands::config::run_config_show().map(|_| 0),
            ConfigAction::SetPath { key, value } => {
                commands::config::run_config_set_path(&key, value.as_deref()).map(|_| 0)
            }
        },
    };

    match outcome {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}

fn level_for(quiet: bool, verbose: u8) -> LevelFilter {
    if quiet {
        return LevelFilter::Warn;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Route `log` output to the terminal (or `logfile`).
///
/// Info lines are printed bare so normal output reads like plain text;
/// other levels carry a prefix, plus a timestamp with `-v`. `RUST_LOG`
/// refines the level chosen by the flags.
fn init_logging(quiet: bool, verbose: u8, logfile: Option<&Path>) -> Result<(), CliError> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level_for(quiet, verbose));
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    let timestamps = verbose > 0;
    builder.format(move |buf, record| {
        match (record.level(), timestamps) {
            (Level::Info, false) => writeln!(buf, "{}", record.args()),
            (level, false) => writeln!(buf, "{level}: {}", record.args()),
            (level, true) => writeln!(buf, "{} {:<5} {}", buf.timestamp(), level, record.args()),
        }
    });

    match logfile {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            owo_colors::set_override(false);
            builder
                .target(Target::Pipe(Box::new(file)))
                .write_style(WriteStyle::Never);
        }
        None => {
            builder.target(Target::Stdout);
        }
    }

    builder
        .try_init()
        .map_err(|e| CliError::other(e.to_string()))
}
