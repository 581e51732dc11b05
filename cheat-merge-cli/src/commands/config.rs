use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cheat_merge_lib::settings::{load_settings_string, set_path, settings_path};

use crate::error::CliError;

/// Print the settings file path (raw, for scripting).
pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}

/// Print the settings file, or a hint when there is none.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = settings_path();
    log::info!(
        "{}",
        "cheat-merge settings".if_supports_color(Stdout, |t| t.bold()),
    );
    match load_settings_string(&path)? {
        Some(contents) => {
            log::info!(
                "  File: {} {}",
                path.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
            log::info!("");
            for line in contents.lines() {
                log::info!("  {line}");
            }
        }
        None => {
            log::info!(
                "  File: {} {}",
                path.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
            log::info!("");
            log::info!(
                "  Save paths with {}",
                "cheat-merge config set-path paths.vendor_dir /path/to/CHEATS"
                    .if_supports_color(Stdout, |t| t.bold()),
            );
        }
    }
    Ok(())
}

/// Save or clear one path setting.
pub(crate) fn run_config_set_path(key: &str, value: Option<&Path>) -> Result<(), CliError> {
    let path = settings_path();
    set_path(&path, key, value)?;
    match value {
        Some(v) => log::info!(
            "  {} {} = {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            key,
            v.display().if_supports_color(Stdout, |t| t.cyan()),
        ),
        None => log::info!(
            "  {} {} cleared",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            key,
        ),
    }
    Ok(())
}
