/// A single cheat: a description and the code lines that implement it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheatEntry {
    pub description: String,
    /// Code lines in file order. Vendor: `;`-separated directives; community: `+`-separated tokens.
    pub code_lines: Vec<String>,
    /// Format-specific fields, in file order (e.g., `enable = false`).
    pub metadata: Vec<(String, String)>,
}

impl CheatEntry {
    pub fn new<I, S>(description: impl Into<String>, code_lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            description: description.into(),
            code_lines: code_lines.into_iter().map(Into::into).collect(),
            metadata: Vec::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    /// First metadata value for `key` (case-insensitive).
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Deduplication identity of this entry.
    ///
    /// `attribution` is the tag appended to imported descriptions (e.g., "LRDB"),
    /// so an imported copy compares equal to the cheat it was imported from.
    pub fn key(&self, attribution: &str) -> EntryKey {
        EntryKey {
            description: normalize_description(&self.description, attribution),
            code_lines: self
                .code_lines
                .iter()
                .map(|line| line.trim().to_uppercase())
                .filter(|line| !line.is_empty())
                .collect(),
        }
    }
}

/// Equality key for deduplication: normalized description plus code lines.
///
/// Identical codes under different descriptions are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryKey {
    pub description: String,
    pub code_lines: Vec<String>,
}

/// Trim, drop a trailing `(attribution)` suffix, collapse whitespace, lowercase.
pub fn normalize_description(description: &str, attribution: &str) -> String {
    let mut desc = description.trim();
    if !attribution.is_empty() {
        let suffix = format!("({attribution})");
        if desc.len() >= suffix.len()
            && desc.is_char_boundary(desc.len() - suffix.len())
            && desc[desc.len() - suffix.len()..].eq_ignore_ascii_case(&suffix)
        {
            desc = &desc[..desc.len() - suffix.len()];
        }
    }
    desc.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
