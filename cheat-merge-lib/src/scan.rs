//! Corpus discovery on disk.
//!
//! The vendor corpus is an EZ-Flash Omega `CHEATS` folder. When it carries
//! `GameID2cht.bin`, that map is the authority on which files exist and which
//! serial each belongs to; otherwise every `.cht` file below the folder is
//! taken. The community corpus is one libretro-database system folder.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use cheat_merge_cht::{GAME_ID_MAP_FILENAME, VendorCheatFile, parse_game_id_map};
use cheat_merge_dat::IdentityCatalog;

use crate::error::ScanError;
use crate::index::CorpusEntry;

const CHT_EXTENSION: &str = "cht";

/// Discover vendor cheat files under `vendor_dir`, sorted by path.
pub fn scan_vendor_corpus(
    vendor_dir: &Path,
    catalog: &IdentityCatalog,
) -> Result<Vec<CorpusEntry>, ScanError> {
    let map_path = vendor_dir.join(GAME_ID_MAP_FILENAME);
    let mut entries = if map_path.is_file() {
        scan_with_game_id_map(vendor_dir, &map_path, catalog)?
    } else {
        log::debug!(
            "No {} in {}, walking for .cht files",
            GAME_ID_MAP_FILENAME,
            vendor_dir.display()
        );
        let mut files = Vec::new();
        collect_cht_files(vendor_dir, &mut files)?;
        files
            .into_iter()
            .map(|path| {
                let title = header_title(&path).unwrap_or_else(|| file_stem(&path));
                CorpusEntry::vendor(title, path)
            })
            .collect()
    };

    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

fn scan_with_game_id_map(
    vendor_dir: &Path,
    map_path: &Path,
    catalog: &IdentityCatalog,
) -> Result<Vec<CorpusEntry>, ScanError> {
    let bytes = fs::read(map_path).map_err(|e| ScanError::io(map_path, e))?;
    let records = parse_game_id_map(&bytes)?;
    log::debug!("{} lists {} games", GAME_ID_MAP_FILENAME, records.len());

    let mut seen_paths: HashSet<PathBuf> = HashSet::new();
    let mut entries = Vec::with_capacity(records.len());
    for record in records {
        let path = record.cheat_path(vendor_dir);
        if !seen_paths.insert(path.clone()) {
            log::debug!(
                "Serial {} shares {} with an earlier serial; skipping",
                record.serial,
                path.display()
            );
            continue;
        }

        let title = match catalog.by_serial(&record.serial) {
            Some(identity) => identity.source_key.clone(),
            None => match header_title(&path) {
                Some(title) => title,
                None => {
                    log::warn!(
                        "Serial {} is not in the catalog and {} has no title; skipping",
                        record.serial,
                        path.display()
                    );
                    continue;
                }
            },
        };
        entries.push(CorpusEntry::vendor(title, path).with_serial(record.serial));
    }
    Ok(entries)
}

/// Discover community cheat files directly inside `system_dir`, sorted by path.
pub fn scan_community_corpus(system_dir: &Path) -> Result<Vec<CorpusEntry>, ScanError> {
    let read_dir = fs::read_dir(system_dir).map_err(|e| ScanError::io(system_dir, e))?;
    let mut entries: Vec<CorpusEntry> = read_dir
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_cht(p))
        .map(|path| CorpusEntry::community(file_stem(&path), path))
        .collect();
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

fn collect_cht_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), ScanError> {
    let read_dir = fs::read_dir(dir).map_err(|e| ScanError::io(dir, e))?;
    for entry in read_dir.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_cht_files(&path, out)?;
        } else if is_cht(&path) {
            out.push(path);
        }
    }
    Ok(())
}

fn is_cht(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(CHT_EXTENSION))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `Name=` from a vendor file's header, if the file exists and parses.
fn header_title(path: &Path) -> Option<String> {
    let bytes = fs::read(path).ok()?;
    match VendorCheatFile::parse(&bytes) {
        Ok(file) => file.title().map(str::to_string),
        Err(err) => {
            log::debug!("Could not read title from {}: {}", path.display(), err);
            None
        }
    }
}
