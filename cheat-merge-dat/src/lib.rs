//! Naming catalog: No-Intro DAT loading and the identity catalog built from it.

pub mod catalog;
pub mod dat;
pub mod error;

pub use catalog::{CatalogRecord, IdentityCatalog, IdentityRecord, build_catalog, normalize_serial};
pub use dat::{DatFile, DatGame, parse_dat, parse_dat_file};
pub use error::{CatalogError, DatError};
