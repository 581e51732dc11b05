//! libretro-database cheat files (`.cht`).
//!
//! ```text
//! cheats = 2
//!
//! cheat0_desc = "Infinite Health"
//! cheat0_code = "82003228+0063"
//! cheat0_enable = false
//! ```
//!
//! This module only reads the file into [`CheatEntry`] values; converting
//! the codes themselves is the job of [`crate::codebreaker`].

use std::collections::BTreeMap;

use crate::entry::CheatEntry;
use crate::error::ChtError;

/// Parse a libretro cheat file from raw bytes.
pub fn parse_libretro(bytes: &[u8]) -> Result<Vec<CheatEntry>, ChtError> {
    let text = std::str::from_utf8(bytes).map_err(|_| ChtError::Encoding)?;
    parse_libretro_str(text)
}

/// Parse a libretro cheat file. Cheats are returned in index order.
pub fn parse_libretro_str(text: &str) -> Result<Vec<CheatEntry>, ChtError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut expected_count: Option<usize> = None;
    // Cheat index → fields in file order
    let mut records: BTreeMap<u32, Vec<(String, String)>> = BTreeMap::new();

    for (i, raw_line) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(ChtError::syntax(
                line_no,
                format!("expected `key = value`, found '{line}'"),
            ));
        };
        let key = key.trim();
        let value = unquote(value.trim());

        if key == "cheats" {
            let count = value
                .parse()
                .map_err(|_| ChtError::syntax(line_no, format!("invalid cheat count '{value}'")))?;
            expected_count = Some(count);
            continue;
        }

        // Seen in the wild instead of cheatN_enable; carries nothing useful
        if key == "cheat_enable" {
            continue;
        }

        let (index, field) = split_cheat_key(key)
            .ok_or_else(|| ChtError::syntax(line_no, format!("unexpected key '{key}'")))?;
        records
            .entry(index)
            .or_default()
            .push((field.to_string(), value.to_string()));
    }

    let expected = expected_count.ok_or(ChtError::MissingCount)?;
    if records.len() != expected {
        return Err(ChtError::CountMismatch {
            expected,
            found: records.len(),
        });
    }

    records
        .into_iter()
        .map(|(index, fields)| build_entry(index, fields))
        .collect()
}

fn build_entry(index: u32, fields: Vec<(String, String)>) -> Result<CheatEntry, ChtError> {
    let mut description = None;
    let mut code = None;
    let mut metadata = Vec::new();

    for (field, value) in fields {
        match field.as_str() {
            "desc" => description = Some(value),
            "code" => code = Some(value),
            _ => metadata.push((field, value)),
        }
    }

    let description = description.ok_or(ChtError::MissingField {
        index,
        field: "desc",
    })?;
    let code = code.ok_or(ChtError::MissingField {
        index,
        field: "code",
    })?;

    Ok(CheatEntry {
        description,
        code_lines: code
            .split('+')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        metadata,
    })
}

/// Split `cheat12_desc` into `(12, "desc")`. Field names may contain further underscores.
fn split_cheat_key(key: &str) -> Option<(u32, &str)> {
    let (name, field) = key.split_once('_')?;
    let index = name.strip_prefix("cheat")?.parse().ok()?;
    if field.is_empty() {
        return None;
    }
    Some((index, field))
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

#[cfg(test)]
#[path = "tests/libretro_tests.rs"]
mod tests;
