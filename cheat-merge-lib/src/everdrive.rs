//! EverDrive GBX7 export: turn a tab-separated cheat sheet into one text
//! file per effect, `<out>/<Game>/<Effect>.txt`, one code per line.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::EverdriveError;
use crate::util::write_bytes_atomically;

const GAME_COLUMN: &str = "Game";
const EFFECT_COLUMN: &str = "Effect…";
const CODES_COLUMN: &str = "Key in…";

/// Lines before the header row.
const PREAMBLE_LINES: usize = 2;

/// Export every row of the sheet at `in_tsv` under `out_dir`.
///
/// Returns the number of files written.
pub fn export_everdrive(in_tsv: &Path, out_dir: &Path) -> Result<usize, EverdriveError> {
    let text = fs::read_to_string(in_tsv)?;
    fs::create_dir_all(out_dir)?;
    export_everdrive_str(&text, out_dir)
}

/// Like [`export_everdrive`], from sheet text already in memory.
pub fn export_everdrive_str(text: &str, out_dir: &Path) -> Result<usize, EverdriveError> {
    let body: String = text
        .split_inclusive('\n')
        .skip(PREAMBLE_LINES)
        .collect();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = reader.headers()?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(EverdriveError::MissingColumn(name))
    };
    let game_col = column(GAME_COLUMN)?;
    let effect_col = column(EFFECT_COLUMN)?;
    let codes_col = column(CODES_COLUMN)?;

    let mut written = 0;
    for record in reader.records() {
        let record = record?;
        let game = record.get(game_col).unwrap_or_default();
        let effect = record.get(effect_col).unwrap_or_default();
        let codes = record.get(codes_col).unwrap_or_default();
        if game.trim().is_empty() || effect.trim().is_empty() {
            log::debug!("Skipping incomplete row {:?}", record.position().map(|p| p.line()));
            continue;
        }

        let path = effect_path(out_dir, game, effect);
        let mut content = codes
            .split('+')
            .map(str::trim)
            .collect::<Vec<_>>()
            .join("\n");
        content.push('\n');

        write_bytes_atomically(&path, content.as_bytes())?;
        log::debug!("Wrote {}", path.display());
        written += 1;
    }

    Ok(written)
}

fn effect_path(out_dir: &Path, game: &str, effect: &str) -> PathBuf {
    let file_name = path_component(&effect.trim().replace(' ', "_"));
    out_dir
        .join(path_component(game))
        .join(format!("{file_name}.txt"))
}

/// A single path component: separators replaced, and never `.` or `..`.
fn path_component(name: &str) -> String {
    let name = name.replace(['/', '\\'], "_");
    if name.chars().all(|c| c == '.') {
        "_".repeat(name.len())
    } else {
        name
    }
}
