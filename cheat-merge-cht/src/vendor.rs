//! EZ-Flash Omega cheat files.
//!
//! ```text
//! [GameInfo]
//! Name=Super Game
//! System=GBA
//! Text=
//!
//! [Infinite Lives]
//! ON=41234,63;41236,00,01
//! ```
//!
//! Every file starts with a `[GameInfo]` block. Each other section is one
//! cheat; its `ON=` value holds `;`-separated write directives.

use crate::entry::CheatEntry;
use crate::error::ChtError;

/// Name of the mandatory header section.
pub const GAME_INFO_SECTION: &str = "GameInfo";

/// Section name given to a cheat whose description is blank.
pub const UNNAMED_CHEAT: &str = "Unnamed Cheat";

const BOM: char = '\u{feff}';

/// Line terminator used by a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// Detect the terminator from existing text; defaults to LF.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::CrLf
        } else {
            Self::Lf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// A parsed vendor cheat file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorCheatFile {
    /// `[GameInfo]` fields, or `None` when the file lacks the header.
    pub game_info: Option<Vec<(String, String)>>,
    /// Cheats in file order.
    pub entries: Vec<CheatEntry>,
    pub line_ending: LineEnding,
}

enum Section {
    GameInfo,
    Cheat(CheatEntry, usize),
}

impl VendorCheatFile {
    /// Parse raw file bytes. Non-UTF-8 content is rejected rather than guessed at.
    pub fn parse(bytes: &[u8]) -> Result<Self, ChtError> {
        let text = std::str::from_utf8(bytes).map_err(|_| ChtError::Encoding)?;
        Self::parse_str(text)
    }

    pub fn parse_str(text: &str) -> Result<Self, ChtError> {
        let line_ending = LineEnding::detect(text);
        let text = text.strip_prefix(BOM).unwrap_or(text);

        let mut game_info: Option<Vec<(String, String)>> = None;
        let mut entries = Vec::new();
        let mut current: Option<Section> = None;

        for (i, raw_line) in text.lines().enumerate() {
            let line_no = i + 1;
            let line = raw_line.trim();

            if line.is_empty() || line.starts_with("//") {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') && line.len() >= 2 {
                finish_section(current.take(), &mut entries)?;

                let name = line[1..line.len() - 1].trim();
                if name.is_empty() {
                    return Err(ChtError::syntax(line_no, "empty section name"));
                }
                if name.eq_ignore_ascii_case(GAME_INFO_SECTION) {
                    if game_info.is_some() {
                        return Err(ChtError::syntax(line_no, "duplicate [GameInfo] section"));
                    }
                    game_info = Some(Vec::new());
                    current = Some(Section::GameInfo);
                } else {
                    current = Some(Section::Cheat(
                        CheatEntry::new(name, Vec::<String>::new()),
                        line_no,
                    ));
                }
                continue;
            }

            let Some(section) = current.as_mut() else {
                return Err(ChtError::syntax(line_no, "content before the first section"));
            };

            let Some((key, value)) = line.split_once('=') else {
                return Err(ChtError::syntax(
                    line_no,
                    format!("expected KEY=VALUE, found '{line}'"),
                ));
            };
            let (key, value) = (key.trim(), value.trim());

            match section {
                Section::GameInfo => {
                    if let Some(ref mut fields) = game_info {
                        fields.push((key.to_string(), value.to_string()));
                    }
                }
                Section::Cheat(entry, _) => {
                    if key.eq_ignore_ascii_case("ON") {
                        entry.code_lines.extend(
                            value
                                .split(';')
                                .map(str::trim)
                                .filter(|d| !d.is_empty())
                                .map(str::to_string),
                        );
                    } else {
                        entry.metadata.push((key.to_string(), value.to_string()));
                    }
                }
            }
        }

        finish_section(current, &mut entries)?;

        Ok(Self {
            game_info,
            entries,
            line_ending,
        })
    }

    pub fn has_game_info(&self) -> bool {
        self.game_info.is_some()
    }

    /// The `Name=` value from the header, if present and non-empty.
    pub fn title(&self) -> Option<&str> {
        self.game_info
            .as_ref()?
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("Name"))
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }
}

fn finish_section(section: Option<Section>, entries: &mut Vec<CheatEntry>) -> Result<(), ChtError> {
    if let Some(Section::Cheat(entry, line_no)) = section {
        if entry.code_lines.is_empty() && entry.metadata.is_empty() {
            return Err(ChtError::syntax(
                line_no,
                format!("cheat [{}] has no codes", entry.description),
            ));
        }
        entries.push(entry);
    }
    Ok(())
}

fn default_game_info(title: &str) -> Vec<(String, String)> {
    vec![
        ("Name".to_string(), title.to_string()),
        ("System".to_string(), "GBA".to_string()),
        ("Text".to_string(), String::new()),
    ]
}

fn render_game_info(fields: &[(String, String)], le: &str) -> String {
    let mut out = format!("[{GAME_INFO_SECTION}]{le}");
    for (key, value) in fields {
        out.push_str(&format!("{key}={value}{le}"));
    }
    out
}

/// Render a single cheat section, terminated by a line ending.
pub fn render_entry(entry: &CheatEntry, le: &str) -> String {
    let mut out = format!("[{}]{le}", cheat_section_name(&entry.description));
    if !entry.code_lines.is_empty() {
        out.push_str(&format!("ON={}{le}", entry.code_lines.join(";")));
    }
    for (key, value) in &entry.metadata {
        out.push_str(&format!("{key}={value}{le}"));
    }
    out
}

/// Section name for a cheat description.
///
/// Brackets and line breaks are replaced. A name that would be empty, or
/// would read back as the `[GameInfo]` header, is renamed.
pub fn cheat_section_name(description: &str) -> String {
    let name = sanitize_section_name(description);
    if name.is_empty() {
        UNNAMED_CHEAT.to_string()
    } else if name.eq_ignore_ascii_case(GAME_INFO_SECTION) {
        format!("{name} (cheat)")
    } else {
        name
    }
}

fn sanitize_section_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '[' => '(',
            ']' => ')',
            '\r' | '\n' => ' ',
            other => other,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Append `new_entries` to an existing vendor file without touching its bytes.
///
/// The original text is kept verbatim (BOM and line endings included). If it
/// has no `[GameInfo]` header, one naming `title` is inserted at the top. An
/// empty `original` produces a fresh file.
///
/// The result is parsed again before it is returned, so text this function
/// hands back always reads back as a vendor file.
pub fn patch_text(
    original: &str,
    title: &str,
    new_entries: &[CheatEntry],
) -> Result<String, ChtError> {
    let parsed = VendorCheatFile::parse_str(original)?;
    let le = parsed.line_ending.as_str();

    let (bom, body) = match original.strip_prefix(BOM) {
        Some(rest) => (BOM.to_string(), rest),
        None => (String::new(), original),
    };

    let mut blocks: Vec<String> = Vec::new();
    if !parsed.has_game_info() {
        blocks.push(render_game_info(&default_game_info(title), le));
    }

    let kept = body.trim_end();
    if !kept.is_empty() {
        blocks.push(format!("{kept}{le}"));
    }

    for entry in new_entries {
        blocks.push(render_entry(entry, le));
    }

    let patched = format!("{bom}{}", blocks.join(le));
    VendorCheatFile::parse_str(&patched)?;
    Ok(patched)
}

#[cfg(test)]
#[path = "tests/vendor_tests.rs"]
mod tests;
