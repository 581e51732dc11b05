//! Per-corpus title index.
//!
//! Each corpus is indexed on its own; the two indices only meet in the
//! correlator. Like the identity catalog, a key maps to a list so colliding
//! titles are all kept.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use cheat_merge_core::normalize::{TitleKey, normalize};

/// Which corpus a cheat file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CorpusFormat {
    /// Device vendor library; the write target
    Vendor,
    /// Community database; read-only
    Community,
}

/// One cheat file in a corpus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorpusEntry {
    /// Title as the corpus spells it (file stem, header name, or catalog name).
    pub raw_title: String,
    pub path: PathBuf,
    pub format: CorpusFormat,
    /// Internal serial, when the corpus records one.
    pub serial: Option<String>,
}

impl CorpusEntry {
    pub fn vendor(raw_title: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            raw_title: raw_title.into(),
            path: path.into(),
            format: CorpusFormat::Vendor,
            serial: None,
        }
    }

    pub fn community(raw_title: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            raw_title: raw_title.into(),
            path: path.into(),
            format: CorpusFormat::Community,
            serial: None,
        }
    }

    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    /// File name for display, falling back to the full path.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Index of one corpus by normalized title.
#[derive(Debug)]
pub struct CorpusIndex {
    format: CorpusFormat,
    /// Normalized title → entries in insertion order
    by_key: HashMap<TitleKey, Vec<CorpusEntry>>,
    len: usize,
}

impl CorpusIndex {
    /// Index `entries`. Entries belonging to the other corpus are dropped with a warning.
    pub fn build<I>(format: CorpusFormat, entries: I) -> Self
    where
        I: IntoIterator<Item = CorpusEntry>,
    {
        let mut by_key: HashMap<TitleKey, Vec<CorpusEntry>> = HashMap::new();
        let mut len = 0;

        for entry in entries {
            if entry.format != format {
                log::warn!(
                    "Ignoring {:?} entry {} while indexing the {:?} corpus",
                    entry.format,
                    entry.path.display(),
                    format
                );
                continue;
            }
            let key = normalize(&entry.raw_title).key;
            by_key.entry(key).or_default().push(entry);
            len += 1;
        }

        Self {
            format,
            by_key,
            len,
        }
    }

    pub fn format(&self) -> CorpusFormat {
        self.format
    }

    /// Entries filed under `key`, in insertion order.
    pub fn lookup(&self, key: &TitleKey) -> &[CorpusEntry] {
        self.by_key.get(key).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Every entry, sorted by path then title.
    pub fn entries(&self) -> Vec<&CorpusEntry> {
        let mut all: Vec<&CorpusEntry> = self.by_key.values().flatten().collect();
        all.sort_by(|a, b| {
            a.path
                .cmp(&b.path)
                .then_with(|| a.raw_title.cmp(&b.raw_title))
        });
        all
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct normalized titles.
    pub fn key_count(&self) -> usize {
        self.by_key.len()
    }
}

/// Build the index for one corpus.
pub fn index_corpus<I>(format: CorpusFormat, entries: I) -> CorpusIndex
where
    I: IntoIterator<Item = CorpusEntry>,
{
    CorpusIndex::build(format, entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> TitleKey {
        normalize(raw).key
    }

    #[test]
    fn test_collisions_keep_every_entry() {
        let index = index_corpus(
            CorpusFormat::Community,
            vec![
                CorpusEntry::community("Super Game (USA)", "/lr/Super Game (USA).cht"),
                CorpusEntry::community("Super Game (Europe)", "/lr/Super Game (Europe).cht"),
                CorpusEntry::community("Other Game (USA)", "/lr/Other Game (USA).cht"),
            ],
        );
        assert_eq!(index.len(), 3);
        assert_eq!(index.key_count(), 2);

        let hits = index.lookup(&key("super game"));
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].raw_title, "Super Game (USA)");
        assert_eq!(hits[1].raw_title, "Super Game (Europe)");
    }

    #[test]
    fn test_wrong_format_is_dropped() {
        let index = index_corpus(
            CorpusFormat::Vendor,
            vec![
                CorpusEntry::vendor("Super Game", "/v/supergame.cht"),
                CorpusEntry::community("Super Game (USA)", "/lr/Super Game (USA).cht"),
            ],
        );
        assert_eq!(index.len(), 1);
        assert_eq!(index.format(), CorpusFormat::Vendor);
        assert_eq!(index.lookup(&key("Super Game"))[0].format, CorpusFormat::Vendor);
    }

    #[test]
    fn test_entries_are_sorted_by_path() {
        let index = index_corpus(
            CorpusFormat::Vendor,
            vec![
                CorpusEntry::vendor("Zeta", "/v/0002.cht"),
                CorpusEntry::vendor("Alpha", "/v/0003.cht"),
                CorpusEntry::vendor("Beta", "/v/0001.cht"),
            ],
        );
        let paths: Vec<_> = index.entries().iter().map(|e| e.file_name()).collect();
        assert_eq!(paths, vec!["0001.cht", "0002.cht", "0003.cht"]);
    }

    #[test]
    fn test_missing_key() {
        let index = index_corpus(CorpusFormat::Community, Vec::new());
        assert!(index.is_empty());
        assert!(index.lookup(&key("anything")).is_empty());
    }
}
