use thiserror::Error;

/// Errors reading a cheat file. Cloneable so they can be carried in per-file results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChtError {
    /// The file is not UTF-8 text
    #[error("File is not valid UTF-8 text")]
    Encoding,

    /// A line could not be parsed
    #[error("Line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// Community file without a `cheats = N` line
    #[error("Missing cheat count (`cheats = N`)")]
    MissingCount,

    /// Declared cheat count disagrees with the cheats found
    #[error("Expected {expected} cheats, found {found}")]
    CountMismatch { expected: usize, found: usize },

    /// A community cheat lacks a required field
    #[error("Cheat {index} is missing its `{field}` field")]
    MissingField { index: u32, field: &'static str },

    /// Malformed `GameID2cht.bin`
    #[error("Invalid game ID map: {0}")]
    GameIdMap(String),
}

impl ChtError {
    pub fn syntax(line: usize, msg: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: msg.into(),
        }
    }

    pub fn game_id_map(msg: impl Into<String>) -> Self {
        Self::GameIdMap(msg.into())
    }
}

/// Why a community cheat could not be converted to the vendor format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The input is malformed (or this converter misreads it)
    #[error("Malformed cheat code: {0}")]
    Malformed(String),

    /// The input is valid but the vendor kernel cannot express it
    #[error("Unsupported cheat code: {0}")]
    Unsupported(String),
}

impl ConvertError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }
}
