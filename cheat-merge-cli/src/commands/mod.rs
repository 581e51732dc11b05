pub(crate) mod config;
pub(crate) mod correlate;
pub(crate) mod everdrive;
pub(crate) mod patch;

use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cheat_merge_dat::{CatalogError, CatalogRecord, IdentityCatalog, build_catalog, parse_dat_file};
use cheat_merge_lib::settings::resolve_path;
use cheat_merge_lib::{CorpusEntry, Settings, scan_community_corpus, scan_vendor_corpus};

use crate::cli_types::CorpusArgs;
use crate::error::CliError;

/// Fully resolved inputs for a run.
pub(crate) struct Inputs {
    pub vendor_dir: PathBuf,
    pub dat: PathBuf,
    pub community_dir: PathBuf,
    pub attribution: String,
}

/// Flags first, then settings.toml; anything still missing is an error.
pub(crate) fn resolve_inputs(args: CorpusArgs) -> Result<Inputs, CliError> {
    let settings = cheat_merge_lib::load_settings()?;
    resolve_inputs_with(args, &settings)
}

fn resolve_inputs_with(args: CorpusArgs, settings: &Settings) -> Result<Inputs, CliError> {
    let vendor_dir = resolve_path(args.vendor_dir, settings.paths.vendor_dir.as_deref())
        .ok_or_else(|| CliError::missing_path("vendor-dir", "paths.vendor_dir"))?;
    let dat = resolve_path(args.dat, settings.paths.dat.as_deref())
        .ok_or_else(|| CliError::missing_path("dat", "paths.dat"))?;
    let community_dir = settings
        .community_dir(args.libretro_database.as_deref(), args.system.as_deref())
        .ok_or_else(|| CliError::missing_path("libretro-database", "paths.libretro_database"))?;

    Ok(Inputs {
        vendor_dir,
        dat,
        community_dir,
        attribution: settings.merge.attribution.clone(),
    })
}

/// Load the DAT and build the identity catalog from it.
pub(crate) fn load_catalog(dat: &Path) -> Result<IdentityCatalog, CliError> {
    let dat_file = parse_dat_file(dat).map_err(CatalogError::Load)?;
    let without_serial = dat_file.games.iter().filter(|g| g.serial.is_none()).count();
    if without_serial > 0 {
        log::debug!("{without_serial} DAT entries have no serial; matching those by name only");
    }
    let catalog = build_catalog(dat_file.games.into_iter().map(CatalogRecord::from))?;

    log::info!(
        "Catalog: {} {}",
        dat.display().if_supports_color(Stdout, |t| t.cyan()),
        format!("({} releases, {} titles)", catalog.len(), catalog.title_count())
            .if_supports_color(Stdout, |t| t.dimmed()),
    );
    Ok(catalog)
}

/// Discover both corpora.
pub(crate) fn scan_corpora(
    inputs: &Inputs,
    catalog: &IdentityCatalog,
) -> Result<(Vec<CorpusEntry>, Vec<CorpusEntry>), CliError> {
    let vendor = scan_vendor_corpus(&inputs.vendor_dir, catalog)?;
    log::info!(
        "Vendor cheats: {} {}",
        inputs.vendor_dir.display().if_supports_color(Stdout, |t| t.cyan()),
        format!("({} files)", vendor.len()).if_supports_color(Stdout, |t| t.dimmed()),
    );

    let community = scan_community_corpus(&inputs.community_dir)?;
    log::info!(
        "Community cheats: {} {}",
        inputs.community_dir.display().if_supports_color(Stdout, |t| t.cyan()),
        format!("({} files)", community.len()).if_supports_color(Stdout, |t| t.dimmed()),
    );
    Ok((vendor, community))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_settings() {
        let mut settings = Settings::default();
        settings.paths.vendor_dir = Some(PathBuf::from("/saved/CHEATS"));
        settings.paths.dat = Some(PathBuf::from("/saved/gba.dat"));
        settings.paths.libretro_database = Some(PathBuf::from("/saved/db"));

        let args = CorpusArgs {
            dat: Some(PathBuf::from("/flag/gba.dat")),
            system: Some("cht/Custom".into()),
            ..CorpusArgs::default()
        };
        let inputs = resolve_inputs_with(args, &settings).unwrap();
        assert_eq!(inputs.vendor_dir, PathBuf::from("/saved/CHEATS"));
        assert_eq!(inputs.dat, PathBuf::from("/flag/gba.dat"));
        assert_eq!(inputs.community_dir, PathBuf::from("/saved/db/cht/Custom"));
        assert_eq!(inputs.attribution, "LRDB");
    }

    #[test]
    fn test_missing_path_names_the_flag() {
        let err = resolve_inputs_with(CorpusArgs::default(), &Settings::default())
            .err()
            .unwrap();
        assert!(matches!(
            err,
            CliError::MissingPath {
                flag: "vendor-dir",
                ..
            }
        ));
    }

    #[test]
    fn test_unreadable_dat_is_a_catalog_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(&dir.path().join("missing.dat")).err().unwrap();
        assert!(matches!(err, CliError::Catalog(CatalogError::Load(_))));
    }

    #[test]
    fn test_dat_without_games_is_an_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let dat = dir.path().join("gba.dat");
        std::fs::write(
            &dat,
            "<?xml version=\"1.0\"?>\n<datafile>\n<header><name>GBA</name></header>\n</datafile>\n",
        )
        .unwrap();
        let err = load_catalog(&dat).err().unwrap();
        assert!(matches!(err, CliError::Catalog(_)));
    }
}
