//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cheat-merge")]
#[command(
    about = "Merge libretro-database GBA cheats into an EZ-Flash Omega cheat library",
    long_about = None
)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// More logging; repeat for more (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Write log output to a file instead of the terminal (no colors)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the catalog and both corpora live. Unset values come from settings.toml.
#[derive(Args, Clone, Default)]
pub(crate) struct CorpusArgs {
    /// EZ-Flash `CHEATS` folder (the one holding GameID2cht.bin)
    #[arg(long)]
    pub vendor_dir: Option<PathBuf>,

    /// No-Intro Game Boy Advance DAT file
    #[arg(long)]
    pub dat: Option<PathBuf>,

    /// libretro-database checkout
    #[arg(long)]
    pub libretro_database: Option<PathBuf>,

    /// Cheat folder inside the database (default: cht/Nintendo - Game Boy Advance)
    #[arg(long)]
    pub system: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Append community cheats to matching vendor cheat files
    Patch {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Show what would be added without writing any file
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Write a JSON report of every file's verdict and counts
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Show how each vendor file pairs with the community files (never writes)
    Correlate {
        #[command(flatten)]
        corpus: CorpusArgs,
    },

    /// Export an EverDrive GBX7 cheat sheet (TSV) to per-effect text files
    Everdrive {
        /// Tab-separated cheat sheet
        #[arg(short, long)]
        in_tsv: PathBuf,

        /// Output folder; one subfolder per game
        #[arg(short, long)]
        out_dir: PathBuf,
    },

    /// Show or edit saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print the settings file path
    Path,

    /// Print the current settings file
    Show,

    /// Save a path setting (omit the value to clear it)
    SetPath {
        /// One of paths.vendor_dir, paths.dat, paths.libretro_database
        key: String,

        value: Option<PathBuf>,
    },
}
