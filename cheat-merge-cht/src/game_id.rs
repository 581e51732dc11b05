//! `GameID2cht.bin`: the EZ-Flash serial → cheat file index.
//!
//! The file is a flat run of 8-byte records: 4 ASCII serial characters
//! followed by a 4-digit decimal id. Id `n` lives at
//! `Eng/<n rounded down to 200>/<n>.cht`, both zero-padded to 4 digits.

use std::path::{Path, PathBuf};

use crate::error::ChtError;

pub const GAME_ID_MAP_FILENAME: &str = "GameID2cht.bin";
pub const ENGLISH_CHEATS_DIRNAME: &str = "Eng";

const RECORD_LEN: usize = 8;
const BUCKET_SIZE: u32 = 200;

/// One record from `GameID2cht.bin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameIdEntry {
    /// 4-character game serial (e.g., "AXVE").
    pub serial: String,
    /// Numeric cheat file id.
    pub id: u32,
}

impl GameIdEntry {
    /// Path of this game's cheat file under the vendor cheat root.
    pub fn cheat_path(&self, vendor_root: &Path) -> PathBuf {
        let bucket = self.id - self.id % BUCKET_SIZE;
        vendor_root
            .join(ENGLISH_CHEATS_DIRNAME)
            .join(format!("{bucket:04}"))
            .join(format!("{:04}.cht", self.id))
    }
}

/// Parse the contents of `GameID2cht.bin`.
///
/// Trailing whitespace after the last record is tolerated; any other
/// partial record is an error.
pub fn parse_game_id_map(bytes: &[u8]) -> Result<Vec<GameIdEntry>, ChtError> {
    let chunks = bytes.chunks_exact(RECORD_LEN);
    let remainder = chunks.remainder();
    if !remainder.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(ChtError::game_id_map(format!(
            "trailing partial record of {} bytes",
            remainder.len()
        )));
    }

    chunks
        .enumerate()
        .map(|(i, record)| {
            let (serial, id) = record.split_at(4);
            if !serial.iter().all(|b| b.is_ascii_alphanumeric()) {
                return Err(ChtError::game_id_map(format!(
                    "record {i}: serial is not alphanumeric"
                )));
            }
            if !id.iter().all(|b| b.is_ascii_digit()) {
                return Err(ChtError::game_id_map(format!("record {i}: id is not numeric")));
            }
            // Both halves were checked as ASCII above
            let serial = String::from_utf8_lossy(serial).into_owned();
            let id = String::from_utf8_lossy(id)
                .parse()
                .map_err(|_| ChtError::game_id_map(format!("record {i}: invalid id")))?;
            Ok(GameIdEntry { serial, id })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records() {
        let entries = parse_game_id_map(b"AXVE0001BPEE2801").unwrap();
        assert_eq!(
            entries,
            vec![
                GameIdEntry {
                    serial: "AXVE".into(),
                    id: 1
                },
                GameIdEntry {
                    serial: "BPEE".into(),
                    id: 2801
                },
            ]
        );
    }

    #[test]
    fn test_trailing_newline_is_tolerated() {
        assert_eq!(parse_game_id_map(b"AXVE0001\n").unwrap().len(), 1);
    }

    #[test]
    fn test_partial_record_is_error() {
        assert!(parse_game_id_map(b"AXVE0001BPE").is_err());
    }

    #[test]
    fn test_non_numeric_id_is_error() {
        assert!(parse_game_id_map(b"AXVE00X1").is_err());
    }

    #[test]
    fn test_empty_map() {
        assert!(parse_game_id_map(b"").unwrap().is_empty());
    }

    #[test]
    fn test_cheat_path_buckets_by_200() {
        let root = Path::new("/sd/CHEATS");
        let entry = GameIdEntry {
            serial: "BPEE".into(),
            id: 2801,
        };
        assert_eq!(entry.cheat_path(root), root.join("Eng/2800/2801.cht"));

        let entry = GameIdEntry {
            serial: "AXVE".into(),
            id: 7,
        };
        assert_eq!(entry.cheat_path(root), root.join("Eng/0000/0007.cht"));
    }
}
