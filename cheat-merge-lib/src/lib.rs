//! Correlate vendor and community cheat corpora and merge the community
//! cheats into the vendor files.

pub mod correlate;
pub mod error;
pub mod everdrive;
pub mod index;
pub mod merge;
pub mod report;
pub mod run;
pub mod scan;
pub mod settings;
pub mod util;

pub use correlate::{Confidence, Correspondence, Verdict, correlate, correlate_entry};
pub use error::{EverdriveError, MergeError, ReportError, ScanError, SettingsError};
pub use everdrive::export_everdrive;
pub use index::{CorpusEntry, CorpusFormat, CorpusIndex, index_corpus};
pub use merge::{DEFAULT_ATTRIBUTION, MergeOptions, PatchResult, PatchStatus, merge};
pub use report::{MergeReport, write_report};
pub use run::{
    MergeProgress, MergeRun, MergeSummary, correlate_corpora, run_merge, run_merge_with_catalog,
};
pub use scan::{scan_community_corpus, scan_vendor_corpus};
pub use settings::{Settings, load_settings, settings_path};
