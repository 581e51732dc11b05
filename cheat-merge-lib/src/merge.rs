//! Merge engine: append community cheats to a vendor cheat file.
//!
//! One call handles one vendor file as a single transaction. Everything is
//! read and decided in memory first; the file is only touched by the final
//! atomic replace, so any failure leaves it byte-for-byte as it was.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cheat_merge_cht::{
    CheatEntry, ChtError, EntryKey, VendorCheatFile, convert_codebreaker, parse_libretro,
    patch_text,
};
use cheat_merge_core::normalize::normalize;

use crate::correlate::{Confidence, Correspondence};
use crate::error::MergeError;
use crate::util::write_bytes_atomically;

/// Suffix appended to imported cheat descriptions.
pub const DEFAULT_ATTRIBUTION: &str = "LRDB";

/// Options controlling merge behavior.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Tag appended to imported descriptions, e.g. `Infinite Health(LRDB)`
    pub attribution: String,
    /// Compute results without writing anything
    pub dry_run: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            dry_run: false,
        }
    }
}

/// Outcome of merging into one vendor file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchStatus {
    /// New entries were appended (or would be, in a dry run)
    Success,
    /// Every community entry was already present; file not written
    NoNewEntries,
    /// Verdict was Ambiguous or Unmatched; file not touched
    Skipped,
    /// This file failed; the run carries on
    Failure(MergeError),
}

impl PatchStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::NoNewEntries => "no-new-entries",
            Self::Skipped => "skipped",
            Self::Failure(_) => "failed",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

/// Per-file merge result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchResult {
    pub file_path: PathBuf,
    pub confidence: Confidence,
    /// The community file merged from, for Exact and Fuzzy verdicts
    pub community_path: Option<PathBuf>,
    pub entries_added: usize,
    pub entries_skipped_as_duplicate: usize,
    /// Community cheats whose code type has no vendor equivalent
    pub entries_unsupported: usize,
    pub status: PatchStatus,
}

impl PatchResult {
    fn new(file_path: &Path, confidence: Confidence, community_path: Option<PathBuf>) -> Self {
        Self {
            file_path: file_path.to_path_buf(),
            confidence,
            community_path,
            entries_added: 0,
            entries_skipped_as_duplicate: 0,
            entries_unsupported: 0,
            status: PatchStatus::Skipped,
        }
    }

    fn fail(mut self, err: MergeError) -> Self {
        log::warn!("{}: {}", self.file_path.display(), err);
        self.entries_added = 0;
        self.status = PatchStatus::Failure(err);
        self
    }
}

/// Community entries that are new to a vendor file.
#[derive(Debug, Default)]
struct Selection {
    new_entries: Vec<CheatEntry>,
    duplicates: usize,
    unsupported: usize,
}

/// Merge the community file of `correspondence` into its vendor file.
///
/// Ambiguous and Unmatched verdicts return [`PatchStatus::Skipped`] without
/// touching the vendor file.
pub fn merge(correspondence: &Correspondence, options: &MergeOptions) -> PatchResult {
    let vendor = &correspondence.vendor;
    let community = correspondence.verdict.community();
    let result = PatchResult::new(
        &vendor.path,
        correspondence.confidence(),
        community.map(|c| c.path.clone()),
    );

    let Some(community) = community else {
        log::debug!(
            "{}: {} verdict, not merging",
            vendor.file_name(),
            correspondence.confidence()
        );
        return result;
    };

    let original = match read_vendor_text(&vendor.path) {
        Ok(text) => text,
        Err(err) => return result.fail(err),
    };
    let parsed = match VendorCheatFile::parse_str(&original) {
        Ok(parsed) => parsed,
        Err(err) => return result.fail(MergeError::Parse(err)),
    };

    let community_entries = load_community(&community.path);
    let selection = select_new_entries(&parsed.entries, &community_entries, &options.attribution);

    let mut result = PatchResult {
        entries_skipped_as_duplicate: selection.duplicates,
        entries_unsupported: selection.unsupported,
        ..result
    };

    if selection.new_entries.is_empty() {
        log::debug!("{}: nothing new", vendor.file_name());
        result.status = PatchStatus::NoNewEntries;
        return result;
    }

    let title = parsed
        .title()
        .map(str::to_string)
        .unwrap_or_else(|| header_title(&vendor.raw_title));

    let patched = match patch_text(&original, &title, &selection.new_entries) {
        Ok(text) => text,
        Err(err) => return result.fail(MergeError::Parse(err)),
    };

    if options.dry_run {
        log::debug!(
            "{}: would add {} entries (dry run)",
            vendor.file_name(),
            selection.new_entries.len()
        );
    } else if let Err(err) = write_bytes_atomically(&vendor.path, patched.as_bytes()) {
        return result.fail(MergeError::write(err.to_string()));
    }

    result.entries_added = selection.new_entries.len();
    result.status = PatchStatus::Success;
    log::debug!(
        "{}: added {}, {} duplicate, {} unsupported",
        vendor.file_name(),
        result.entries_added,
        result.entries_skipped_as_duplicate,
        result.entries_unsupported
    );
    result
}

/// Read a vendor file as text. A file that does not exist yet reads as empty.
fn read_vendor_text(path: &Path) -> Result<String, MergeError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(String::new()),
        Err(err) => return Err(MergeError::read(err.to_string())),
    };
    String::from_utf8(bytes).map_err(|_| MergeError::Parse(ChtError::Encoding))
}

/// Read and parse a community file. Failures contribute no entries.
fn load_community(path: &Path) -> Vec<CheatEntry> {
    let parsed = fs::read(path)
        .map_err(|e| e.to_string())
        .and_then(|bytes| parse_libretro(&bytes).map_err(|e| e.to_string()));
    match parsed {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!(
                "Ignoring community file {}: {}",
                path.display(),
                err
            );
            Vec::new()
        }
    }
}

/// Convert community cheats and keep those not already in `existing`,
/// in community order.
fn select_new_entries(
    existing: &[CheatEntry],
    community: &[CheatEntry],
    attribution: &str,
) -> Selection {
    let mut seen: HashSet<EntryKey> = existing.iter().map(|e| e.key(attribution)).collect();
    let mut selection = Selection::default();

    for entry in community {
        match convert_codebreaker(entry, attribution) {
            Ok(converted) => {
                if seen.insert(converted.key(attribution)) {
                    selection.new_entries.push(converted);
                } else {
                    selection.duplicates += 1;
                }
            }
            Err(err) => {
                log::warn!("Skipping cheat '{}': {}", entry.description, err);
                selection.unsupported += 1;
            }
        }
    }

    selection
}

/// `Name=` value for a vendor file that has no header yet.
fn header_title(raw_title: &str) -> String {
    let title = normalize(raw_title).title;
    if title.is_empty() {
        raw_title.trim().to_string()
    } else {
        title
    }
}

#[cfg(test)]
#[path = "tests/merge_tests.rs"]
mod tests;
