use thiserror::Error;

use cheat_merge_cht::ChtError;

/// Why a single vendor file could not be merged. The run continues past these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// The vendor file exists but could not be read
    #[error("Failed to read vendor file: {0}")]
    Read(String),

    /// The vendor file could not be parsed; it was left untouched
    #[error("Vendor file parse error: {0}")]
    Parse(#[from] ChtError),

    /// Writing the patched file failed; the original is intact
    #[error("Write failed: {0}")]
    Write(String),
}

impl MergeError {
    pub fn read(msg: impl Into<String>) -> Self {
        Self::Read(msg.into())
    }

    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }
}

/// Errors discovering corpus files on disk.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("I/O error scanning {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    GameIdMap(#[from] ChtError),
}

impl ScanError {
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Errors reading or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Unknown setting: {0}")]
    UnknownKey(String),
}

/// Errors writing the JSON merge report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors exporting an EverDrive cheat sheet.
#[derive(Debug, Error)]
pub enum EverdriveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column '{0}' in cheat sheet")]
    MissingColumn(&'static str),
}
