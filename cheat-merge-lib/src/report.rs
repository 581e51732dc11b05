//! Machine-readable JSON report of a merge run.

use std::path::Path;

use serde::Serialize;

use crate::correlate::Confidence;
use crate::error::ReportError;
use crate::merge::{PatchResult, PatchStatus};
use crate::run::{MergeRun, MergeSummary};
use crate::util::write_atomically;

#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    /// RFC 3339 time the report was produced
    pub generated_at: String,
    pub dry_run: bool,
    pub summary: MergeSummary,
    pub files: Vec<FileReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub verdict: Confidence,
    pub community_path: Option<String>,
    pub added: usize,
    pub skipped: usize,
    pub unsupported: usize,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<&PatchResult> for FileReport {
    fn from(result: &PatchResult) -> Self {
        Self {
            path: result.file_path.display().to_string(),
            verdict: result.confidence,
            community_path: result
                .community_path
                .as_ref()
                .map(|p| p.display().to_string()),
            added: result.entries_added,
            skipped: result.entries_skipped_as_duplicate,
            unsupported: result.entries_unsupported,
            status: result.status.label(),
            reason: match &result.status {
                PatchStatus::Failure(err) => Some(err.to_string()),
                _ => None,
            },
        }
    }
}

impl MergeReport {
    pub fn new(run: &MergeRun, dry_run: bool) -> Self {
        Self {
            generated_at: chrono::Local::now().to_rfc3339(),
            dry_run,
            summary: run.summary.clone(),
            files: run.results.iter().map(FileReport::from).collect(),
        }
    }
}

/// Write the report as pretty JSON, atomically.
pub fn write_report(path: &Path, report: &MergeReport) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(report)?;
    write_atomically(path, |out| {
        out.write_all(json.as_bytes())?;
        out.write_all(b"\n")
    })?;
    Ok(())
}
