//! Code Breaker (libretro) → EZ-Flash Omega code conversion.
//!
//! The Omega kernel only pins addresses to fixed values, so only the
//! constant-write code types convert. See
//! <https://www.sappharad.com/gba/codes/codebreaker-code-creation> for the
//! Code Breaker code types, and the Omega kernel's `GBApatch.c` for the
//! leading `4` on target addresses.

use crate::entry::CheatEntry;
use crate::error::ConvertError;
use crate::vendor::cheat_section_name;

/// Convert one community cheat into a vendor cheat.
///
/// The description gains an `(attribution)` suffix so imported cheats are
/// recognizable in the vendor file. Metadata is not carried over.
pub fn convert_codebreaker(entry: &CheatEntry, attribution: &str) -> Result<CheatEntry, ConvertError> {
    if entry.code_lines.is_empty() {
        return Err(ConvertError::malformed("no code tokens"));
    }
    if entry.code_lines.len() % 2 != 0 {
        return Err(ConvertError::malformed(
            "unexpected number of tokens in Code Breaker cheat",
        ));
    }

    let mut directives = Vec::with_capacity(entry.code_lines.len() / 2);
    for pair in entry.code_lines.chunks_exact(2) {
        directives.push(convert_pair(&pair[0], &pair[1])?);
    }

    let description = cheat_section_name(&entry.description);
    let description = if attribution.is_empty() {
        description
    } else {
        format!("{description}({attribution})")
    };

    Ok(CheatEntry::new(description, directives))
}

fn convert_pair(addr: &str, value: &str) -> Result<String, ConvertError> {
    let addr = addr.trim().to_uppercase();
    let value = value.trim().to_uppercase();

    if addr.len() != 8 || !addr.is_ascii() {
        return Err(ConvertError::malformed(format!(
            "expected cheat target address of len 8, got len {} for address {addr}",
            addr.len()
        )));
    }

    if value.is_empty() || !value.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConvertError::unsupported(format!(
            "value is not hexadecimal ({value})"
        )));
    }

    let target = &addr[addr.len() - 4..];
    match addr.as_bytes()[0] {
        // 8-bit constant write
        b'3' => {
            if value.len() > 4 {
                return Err(ConvertError::malformed(format!("8-bit value too long ({value})")));
            }
            let byte = &value[value.len().saturating_sub(2)..];
            Ok(format!("4{target},{byte}"))
        }
        // 16-bit constant write, stored little-endian
        b'8' => {
            if value.len() != 4 {
                return Err(ConvertError::malformed(format!(
                    "16-bit value must be 4 digits ({value})"
                )));
            }
            Ok(format!("4{target},{},{}", &value[2..], &value[..2]))
        }
        b'0' | b'9' => Err(ConvertError::unsupported(format!(
            "Code Breaker master code (type {}) is not used by the Omega kernel",
            addr.as_bytes()[0] as char
        ))),
        t @ (b'4' | b'6' | b'7' | b'A' | b'D') => Err(ConvertError::unsupported(format!(
            "Code Breaker cheat type {} is not supported",
            t as char
        ))),
        t => Err(ConvertError::malformed(format!(
            "unknown Code Breaker cheat code type of '{}'",
            t as char
        ))),
    }
}
