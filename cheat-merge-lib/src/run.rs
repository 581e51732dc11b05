//! Whole-run entry point: catalog → indices → verdicts → merges → tally.

use serde::Serialize;

use cheat_merge_dat::{CatalogError, CatalogRecord, IdentityCatalog, build_catalog};

use crate::correlate::{Confidence, Correspondence, correlate};
use crate::index::{CorpusEntry, CorpusFormat, index_corpus};
use crate::merge::{MergeOptions, PatchResult, PatchStatus, merge};

/// Progress update sent during a merge run.
#[derive(Debug, Clone)]
pub enum MergeProgress {
    /// Every vendor file has a verdict
    Correlated { total: usize },
    /// About to merge one vendor file
    Merging {
        file_name: String,
        index: usize,
        total: usize,
    },
    /// Finished all files
    Done,
}

/// Final tally of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    pub patched: usize,
    pub no_new_entries: usize,
    /// Files merged on a title-only match, worth a look
    pub fuzzy: usize,
    pub ambiguous: usize,
    pub unmatched: usize,
    pub failed: usize,
    pub entries_added: usize,
}

impl MergeSummary {
    pub fn record(&mut self, result: &PatchResult) {
        match result.confidence {
            Confidence::Fuzzy => self.fuzzy += 1,
            Confidence::Ambiguous => self.ambiguous += 1,
            Confidence::Unmatched => self.unmatched += 1,
            Confidence::Exact => {}
        }
        match result.status {
            PatchStatus::Success => self.patched += 1,
            PatchStatus::NoNewEntries => self.no_new_entries += 1,
            PatchStatus::Failure(_) => self.failed += 1,
            PatchStatus::Skipped => {}
        }
        self.entries_added += result.entries_added;
    }

    pub fn from_results(results: &[PatchResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            summary.record(result);
        }
        summary
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Results of a full run.
#[derive(Debug, Clone)]
pub struct MergeRun {
    /// One per vendor file, in vendor path order
    pub results: Vec<PatchResult>,
    pub summary: MergeSummary,
}

/// Index both corpora and correlate every vendor entry.
pub fn correlate_corpora(
    catalog: &IdentityCatalog,
    vendor_entries: Vec<CorpusEntry>,
    community_entries: Vec<CorpusEntry>,
) -> Vec<Correspondence> {
    let vendor = index_corpus(CorpusFormat::Vendor, vendor_entries);
    let community = index_corpus(CorpusFormat::Community, community_entries);
    log::debug!(
        "Indexed {} vendor files ({} titles), {} community files ({} titles)",
        vendor.len(),
        vendor.key_count(),
        community.len(),
        community.key_count()
    );
    correlate(&vendor, &community, catalog)
}

/// Build the catalog from `catalog_records` and run a full merge.
///
/// Only catalog failures abort the run; every per-file problem ends up in
/// that file's [`PatchResult`].
pub fn run_merge<I>(
    catalog_records: I,
    vendor_entries: Vec<CorpusEntry>,
    community_entries: Vec<CorpusEntry>,
    options: &MergeOptions,
    progress: &dyn Fn(MergeProgress),
) -> Result<MergeRun, CatalogError>
where
    I: IntoIterator<Item = CatalogRecord>,
{
    let catalog = build_catalog(catalog_records)?;
    Ok(run_merge_with_catalog(
        &catalog,
        vendor_entries,
        community_entries,
        options,
        progress,
    ))
}

/// Run a full merge against an already built catalog.
pub fn run_merge_with_catalog(
    catalog: &IdentityCatalog,
    vendor_entries: Vec<CorpusEntry>,
    community_entries: Vec<CorpusEntry>,
    options: &MergeOptions,
    progress: &dyn Fn(MergeProgress),
) -> MergeRun {
    let correspondences = correlate_corpora(catalog, vendor_entries, community_entries);
    let total = correspondences.len();
    progress(MergeProgress::Correlated { total });

    let mut summary = MergeSummary::default();
    let mut results = Vec::with_capacity(total);
    for (index, correspondence) in correspondences.iter().enumerate() {
        progress(MergeProgress::Merging {
            file_name: correspondence.vendor.file_name(),
            index,
            total,
        });
        let result = merge(correspondence, options);
        summary.record(&result);
        results.push(result);
    }

    progress(MergeProgress::Done);
    MergeRun { results, summary }
}
