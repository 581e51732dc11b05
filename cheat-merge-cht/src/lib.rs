//! Cheat file formats: EZ-Flash Omega (vendor) and libretro (community).

pub mod codebreaker;
pub mod entry;
pub mod error;
pub mod game_id;
pub mod libretro;
pub mod vendor;

pub use codebreaker::convert_codebreaker;
pub use entry::{CheatEntry, EntryKey, normalize_description};
pub use error::{ChtError, ConvertError};
pub use game_id::{GAME_ID_MAP_FILENAME, GameIdEntry, parse_game_id_map};
pub use libretro::{parse_libretro, parse_libretro_str};
pub use vendor::{LineEnding, VendorCheatFile, patch_text};
