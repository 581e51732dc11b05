use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;

pub(crate) fn run_everdrive(in_tsv: &Path, out_dir: &Path) -> Result<(), CliError> {
    log::info!(
        "Exporting {} to {}",
        in_tsv.display().if_supports_color(Stdout, |t| t.cyan()),
        out_dir.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    let written = cheat_merge_lib::export_everdrive(in_tsv, out_dir)?;
    log::info!(
        "  {} {} cheat files written",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        written,
    );
    Ok(())
}
