use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::DatError;

/// A parsed No-Intro DAT file (Logiqx XML).
#[derive(Debug, Clone)]
pub struct DatFile {
    pub name: String,
    pub description: String,
    pub version: String,
    pub games: Vec<DatGame>,
}

/// A single game entry from a DAT file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatGame {
    /// Full No-Intro name, tags included (e.g., "Super Game (USA) (Rev 1)").
    pub name: String,
    /// Region string, if the DAT carries one outside the name.
    pub region: Option<String>,
    /// Serial of the first ROM that has one (e.g., "AXVE").
    pub serial: Option<String>,
}

/// Parse a Logiqx XML DAT file.
pub fn parse_dat<R: BufRead>(reader: R) -> Result<DatFile, DatError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut dat = DatFile {
        name: String::new(),
        description: String::new(),
        version: String::new(),
        games: Vec::new(),
    };

    let mut in_header = false;
    let mut current_tag = String::new();
    let mut current_game: Option<DatGame> = None;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match tag_name.as_str() {
                    "header" => in_header = true,
                    "game" | "machine" => current_game = Some(parse_game_attributes(e)?),
                    "rom" => {
                        if let Some(ref mut game) = current_game {
                            apply_rom_attributes(e, game)?;
                        }
                    }
                    _ => current_tag = tag_name,
                }
            }
            Event::Empty(ref e) => {
                if e.name().as_ref() == b"rom" {
                    if let Some(ref mut game) = current_game {
                        apply_rom_attributes(e, game)?;
                    }
                }
            }
            Event::Text(ref e) => {
                let text = e.unescape()?.to_string();
                if in_header {
                    match current_tag.as_str() {
                        "name" => dat.name = text,
                        "description" => dat.description = text,
                        "version" => dat.version = text,
                        _ => {}
                    }
                } else if current_tag == "region" {
                    if let Some(ref mut game) = current_game {
                        game.region = Some(text);
                    }
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"header" => in_header = false,
                b"game" | b"machine" => {
                    if let Some(game) = current_game.take() {
                        if game.serial.is_none() {
                            log::debug!("DAT game without serial: {}", game.name);
                        }
                        dat.games.push(game);
                    }
                }
                _ => current_tag.clear(),
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if dat.name.is_empty() && dat.games.is_empty() {
        return Err(DatError::invalid_dat(
            "No header or games found in XML DAT file",
        ));
    }

    Ok(dat)
}

/// Parse a DAT file from a file path.
pub fn parse_dat_file(path: &std::path::Path) -> Result<DatFile, DatError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    parse_dat(reader)
}

fn parse_game_attributes(e: &BytesStart<'_>) -> Result<DatGame, DatError> {
    let mut game = DatGame {
        name: String::new(),
        region: None,
        serial: None,
    };

    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?.to_string();
        match attr.key.as_ref() {
            b"name" => game.name = value,
            b"region" => game.region = Some(value),
            b"serial" if !value.is_empty() => game.serial = Some(value),
            _ => {}
        }
    }

    if game.name.is_empty() {
        return Err(DatError::invalid_dat("<game> element without a name"));
    }

    Ok(game)
}

fn apply_rom_attributes(e: &BytesStart<'_>, game: &mut DatGame) -> Result<(), DatError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"serial" && game.serial.is_none() {
            let value = attr.unescape_value()?;
            if !value.trim().is_empty() {
                game.serial = Some(value.trim().to_string());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/dat_tests.rs"]
mod tests;
