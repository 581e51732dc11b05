//! Identity catalog: canonical ROM identities keyed by normalized title.
//!
//! Several regional releases normalize to the same key ("Super Game (USA)" and
//! "Super Game (Europe)" both become `super game`), so every key maps to a
//! list of records. Nothing is ever overwritten on collision.

use std::collections::{BTreeSet, HashMap};

use cheat_merge_core::normalize::{Disambiguator, TitleKey, normalize, region_to_slug};
use cheat_merge_core::region::Region;

use crate::dat::DatGame;
use crate::error::CatalogError;

/// One entry from the naming catalog, as handed over by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRecord {
    /// Full catalog name, tags included.
    pub name: String,
    /// Region string supplied outside the name, if any.
    pub region: Option<String>,
    /// Internal serial (e.g., "AXVE").
    pub serial: Option<String>,
}

impl CatalogRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: None,
            serial: None,
        }
    }

    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

impl From<DatGame> for CatalogRecord {
    fn from(game: DatGame) -> Self {
        Self {
            name: game.name,
            region: game.region,
            serial: game.serial,
        }
    }
}

/// A canonical ROM release. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    /// Title without tags (e.g., "Super Game").
    pub canonical_title: String,
    /// First recognized region.
    pub region: Region,
    /// Region, revision, language and flag tags.
    pub disambiguators: BTreeSet<Disambiguator>,
    /// The full catalog name; unique within one DAT.
    pub source_key: String,
    /// Internal serial, if the catalog has one.
    pub serial: Option<String>,
}

/// Normalize a serial number for matching: uppercase, spaces removed.
pub fn normalize_serial(serial: &str) -> String {
    serial.trim().to_uppercase().replace(' ', "")
}

/// Read-only index of the naming catalog.
#[derive(Debug)]
pub struct IdentityCatalog {
    /// Normalized title → every release under that title, in catalog order
    by_key: HashMap<TitleKey, Vec<IdentityRecord>>,
    /// Normalized serial → (title key, index into that key's list)
    by_serial: HashMap<String, (TitleKey, usize)>,
    record_count: usize,
}

impl IdentityCatalog {
    /// Build the catalog from loader records.
    ///
    /// Fails with [`CatalogError::Empty`] when there are no records at all.
    pub fn build<I>(records: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = CatalogRecord>,
    {
        let mut by_key: HashMap<TitleKey, Vec<IdentityRecord>> = HashMap::new();
        let mut by_serial = HashMap::new();
        let mut record_count = 0;

        for record in records {
            let normalized = normalize(&record.name);
            let mut disambiguators = normalized.disambiguators;
            let mut region = normalized.region;

            if let Some(ref extra) = record.region {
                for part in extra.split(',') {
                    let slug = region_to_slug(part);
                    if slug == "unknown" {
                        continue;
                    }
                    if region == Region::Unknown {
                        region = Region::from_name(part);
                    }
                    disambiguators.insert(Disambiguator::Region(slug.to_string()));
                }
            }

            let identity = IdentityRecord {
                canonical_title: normalized.title,
                region,
                disambiguators,
                source_key: record.name,
                serial: record.serial.filter(|s| !s.trim().is_empty()),
            };

            let list = by_key.entry(normalized.key.clone()).or_default();
            if let Some(ref serial) = identity.serial {
                let norm = normalize_serial(serial);
                if by_serial.contains_key(&norm) {
                    log::warn!(
                        "Serial {} appears more than once in the catalog; keeping the first ({})",
                        serial,
                        identity.source_key
                    );
                } else {
                    by_serial.insert(norm, (normalized.key, list.len()));
                }
            }
            list.push(identity);
            record_count += 1;
        }

        if record_count == 0 {
            return Err(CatalogError::Empty);
        }

        log::debug!(
            "Identity catalog: {} records under {} titles, {} serials",
            record_count,
            by_key.len(),
            by_serial.len()
        );

        Ok(Self {
            by_key,
            by_serial,
            record_count,
        })
    }

    /// All releases sharing a normalized title, in catalog order.
    pub fn lookup(&self, key: &TitleKey) -> &[IdentityRecord] {
        self.by_key.get(key).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// The release under `key`, when there is exactly one.
    pub fn sole_record(&self, key: &TitleKey) -> Option<&IdentityRecord> {
        match self.lookup(key) {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Look up a release by its internal serial.
    pub fn by_serial(&self, serial: &str) -> Option<&IdentityRecord> {
        let (key, index) = self.by_serial.get(&normalize_serial(serial))?;
        self.by_key.get(key).and_then(|list| list.get(*index))
    }

    /// Number of records in the catalog.
    pub fn len(&self) -> usize {
        self.record_count
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Number of distinct normalized titles.
    pub fn title_count(&self) -> usize {
        self.by_key.len()
    }
}

/// Build the identity catalog from an ordered sequence of loader records.
pub fn build_catalog<I>(records: I) -> Result<IdentityCatalog, CatalogError>
where
    I: IntoIterator<Item = CatalogRecord>,
{
    IdentityCatalog::build(records)
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
