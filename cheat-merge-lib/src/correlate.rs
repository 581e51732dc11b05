//! Vendor ↔ community correspondence.
//!
//! For every vendor file, find the community file for the same release:
//!
//! 1. Resolve the vendor entry's identity (title key + disambiguators),
//!    bridging through the identity catalog by serial or by a unique title.
//! 2. Look up community files under the same key, drop those written for a
//!    cheat device other than Code Breaker, and resolve the rest the same way.
//! 3. One candidate: `Exact` if the disambiguators agree, `Fuzzy` otherwise.
//! 4. Several: a single exact agreement wins, then a single best partial
//!    overlap (`Fuzzy`); anything else is `Ambiguous` and never merged.
//! 5. None: `Unmatched`.
//!
//! Candidates are sorted before comparison so verdicts never depend on the
//! order the corpora were read in.

use std::collections::BTreeSet;

use serde::Serialize;

use cheat_merge_core::normalize::{Disambiguator, TitleKey, normalize};
use cheat_merge_dat::IdentityCatalog;

use crate::index::{CorpusEntry, CorpusIndex};

/// How confidently a vendor file was paired with a community file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Confidence {
    /// Title and disambiguators agree
    Exact,
    /// Title agrees, disambiguators disagree or only partly overlap
    Fuzzy,
    /// Several community files fit equally well
    Ambiguous,
    /// No usable community file has this title
    Unmatched,
}

impl Confidence {
    /// Whether this verdict allows writing to the vendor file.
    pub fn allows_merge(&self) -> bool {
        match self {
            Self::Exact | Self::Fuzzy => true,
            Self::Ambiguous | Self::Unmatched => false,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fuzzy => "fuzzy",
            Self::Ambiguous => "ambiguous",
            Self::Unmatched => "unmatched",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The correlator's decision for one vendor file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Exact(CorpusEntry),
    Fuzzy(CorpusEntry),
    /// The tied candidates, in sorted order
    Ambiguous(Vec<CorpusEntry>),
    Unmatched,
}

impl Verdict {
    pub fn confidence(&self) -> Confidence {
        match self {
            Self::Exact(_) => Confidence::Exact,
            Self::Fuzzy(_) => Confidence::Fuzzy,
            Self::Ambiguous(_) => Confidence::Ambiguous,
            Self::Unmatched => Confidence::Unmatched,
        }
    }

    /// The paired community file, for mergeable verdicts.
    pub fn community(&self) -> Option<&CorpusEntry> {
        match self {
            Self::Exact(entry) | Self::Fuzzy(entry) => Some(entry),
            Self::Ambiguous(_) | Self::Unmatched => None,
        }
    }
}

/// A vendor file paired (or not) with a community file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correspondence {
    pub vendor: CorpusEntry,
    pub verdict: Verdict,
    /// Every community file sharing the title, sorted
    pub candidates: Vec<CorpusEntry>,
}

impl Correspondence {
    pub fn confidence(&self) -> Confidence {
        self.verdict.confidence()
    }
}

/// Resolved identity of a corpus entry.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Identity {
    key: TitleKey,
    disambiguators: BTreeSet<Disambiguator>,
}

fn resolve_identity(entry: &CorpusEntry, catalog: &IdentityCatalog) -> Identity {
    // A serial the catalog knows is authoritative for both title and release
    if let Some(record) = entry.serial.as_deref().and_then(|s| catalog.by_serial(s)) {
        return Identity {
            key: normalize(&record.source_key).key,
            disambiguators: record.disambiguators.clone(),
        };
    }

    let normalized = normalize(&entry.raw_title);
    let disambiguators = if !normalized.disambiguators.is_empty() {
        normalized.disambiguators
    } else if let Some(record) = catalog.sole_record(&normalized.key) {
        record.disambiguators.clone()
    } else {
        BTreeSet::new()
    };

    Identity {
        key: normalized.key,
        disambiguators,
    }
}

/// Stable ordering for candidates: lowercase title, then title, then path.
fn candidate_order(a: &CorpusEntry, b: &CorpusEntry) -> std::cmp::Ordering {
    a.raw_title
        .to_lowercase()
        .cmp(&b.raw_title.to_lowercase())
        .then_with(|| a.raw_title.cmp(&b.raw_title))
        .then_with(|| a.path.cmp(&b.path))
}

/// Correlate a single vendor entry against the community index.
pub fn correlate_entry(
    vendor: &CorpusEntry,
    community: &CorpusIndex,
    catalog: &IdentityCatalog,
) -> Correspondence {
    let identity = resolve_identity(vendor, catalog);

    let mut candidates: Vec<CorpusEntry> = community.lookup(&identity.key).to_vec();
    candidates.sort_by(candidate_order);

    // Only Code Breaker codes convert; other devices' files are never merge sources
    let resolved: Vec<(&CorpusEntry, BTreeSet<Disambiguator>)> = candidates
        .iter()
        .filter(|c| {
            let other_device = normalize(&c.raw_title).names_other_device();
            if other_device {
                log::debug!("Skipping {}: not Code Breaker codes", c.file_name());
            }
            !other_device
        })
        .map(|c| (c, resolve_identity(c, catalog).disambiguators))
        .collect();

    let verdict = decide(&identity.disambiguators, &resolved);

    log::debug!(
        "{} [{}] → {} ({} candidate(s))",
        vendor.file_name(),
        identity.key,
        verdict.confidence(),
        candidates.len()
    );

    Correspondence {
        vendor: vendor.clone(),
        verdict,
        candidates,
    }
}

fn decide(
    wanted: &BTreeSet<Disambiguator>,
    candidates: &[(&CorpusEntry, BTreeSet<Disambiguator>)],
) -> Verdict {
    match candidates {
        [] => Verdict::Unmatched,
        [(only, theirs)] => {
            if theirs == wanted {
                Verdict::Exact((*only).clone())
            } else {
                Verdict::Fuzzy((*only).clone())
            }
        }
        _ => {
            let exact: Vec<&CorpusEntry> = candidates
                .iter()
                .filter(|(_, theirs)| theirs == wanted)
                .map(|(c, _)| *c)
                .collect();
            match exact.as_slice() {
                [one] => return Verdict::Exact((*one).clone()),
                [] => {}
                tied => return Verdict::Ambiguous(tied.iter().map(|c| (*c).clone()).collect()),
            }

            let overlap = |theirs: &BTreeSet<Disambiguator>| theirs.intersection(wanted).count();
            let best = candidates
                .iter()
                .map(|(_, theirs)| overlap(theirs))
                .max()
                .unwrap_or(0);
            let leaders: Vec<&CorpusEntry> = candidates
                .iter()
                .filter(|(_, theirs)| overlap(theirs) == best)
                .map(|(c, _)| *c)
                .collect();

            match leaders.as_slice() {
                [one] if best > 0 => Verdict::Fuzzy((*one).clone()),
                tied => Verdict::Ambiguous(tied.iter().map(|c| (*c).clone()).collect()),
            }
        }
    }
}

/// Correlate every vendor entry, in path order.
pub fn correlate(
    vendor: &CorpusIndex,
    community: &CorpusIndex,
    catalog: &IdentityCatalog,
) -> Vec<Correspondence> {
    vendor
        .entries()
        .into_iter()
        .map(|entry| correlate_entry(entry, community, catalog))
        .collect()
}

#[cfg(test)]
#[path = "tests/correlate_tests.rs"]
mod tests;
