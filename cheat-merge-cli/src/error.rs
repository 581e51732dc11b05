use thiserror::Error;

/// Errors that abort a CLI command.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// A required path was given neither as a flag nor in settings.toml
    #[error("Missing --{flag} (or set {key} with `cheat-merge config set-path`)")]
    MissingPath { flag: &'static str, key: &'static str },

    /// Catalog could not be built
    #[error("Catalog error: {0}")]
    Catalog(#[from] cheat_merge_dat::CatalogError),

    /// Corpus folder could not be read
    #[error("Scan error: {0}")]
    Scan(#[from] cheat_merge_lib::ScanError),

    /// Settings file error
    #[error("Config error: {0}")]
    Settings(#[from] cheat_merge_lib::SettingsError),

    /// Report could not be written
    #[error("Report error: {0}")]
    Report(#[from] cheat_merge_lib::ReportError),

    /// EverDrive export failed
    #[error("Export error: {0}")]
    Everdrive(#[from] cheat_merge_lib::EverdriveError),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn missing_path(flag: &'static str, key: &'static str) -> Self {
        Self::MissingPath { flag, key }
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
