use super::*;

const SAMPLE_CHT: &str = "[GameInfo]
Name=Super Game
System=GBA
Text=

[Infinite Lives]
ON=41234,63

[Max Money]
ON=41240,FF;41241,FF,0F
";

#[test]
fn test_parse_sample() {
    let file = VendorCheatFile::parse_str(SAMPLE_CHT).unwrap();
    assert!(file.has_game_info());
    assert_eq!(file.title(), Some("Super Game"));
    assert_eq!(file.line_ending, LineEnding::Lf);
    assert_eq!(
        file.entries,
        vec![
            CheatEntry::new("Infinite Lives", ["41234,63"]),
            CheatEntry::new("Max Money", ["41240,FF", "41241,FF,0F"]),
        ]
    );
}

#[test]
fn test_parse_crlf_and_bom() {
    let text = format!("\u{feff}{}", SAMPLE_CHT.replace('\n', "\r\n"));
    let file = VendorCheatFile::parse(text.as_bytes()).unwrap();
    assert_eq!(file.line_ending, LineEnding::CrLf);
    assert_eq!(file.title(), Some("Super Game"));
    assert_eq!(file.entries.len(), 2);
}

#[test]
fn test_parse_keeps_extra_keys_as_metadata() {
    let text = "[GameInfo]\nName=X\n\n[Speed]\nx1=41234,01\nx2=41234,02\n";
    let file = VendorCheatFile::parse_str(text).unwrap();
    let speed = &file.entries[0];
    assert!(speed.code_lines.is_empty());
    assert_eq!(speed.metadata("x2"), Some("41234,02"));
}

#[test]
fn test_parse_skips_comments_and_blank_lines() {
    let text = "// exported\n\n[GameInfo]\nName=X\n\n\n// note\n[A]\nON=41234,01\n";
    let file = VendorCheatFile::parse_str(text).unwrap();
    assert_eq!(file.entries.len(), 1);
}

#[test]
fn test_file_without_game_info() {
    let text = "[Infinite Lives]\nON=41234,63\n";
    let file = VendorCheatFile::parse_str(text).unwrap();
    assert!(!file.has_game_info());
    assert_eq!(file.title(), None);
    assert_eq!(file.entries.len(), 1);
}

#[test]
fn test_empty_file_parses() {
    let file = VendorCheatFile::parse_str("").unwrap();
    assert!(!file.has_game_info());
    assert!(file.entries.is_empty());
}

#[test]
fn test_invalid_utf8_is_encoding_error() {
    let bytes = [b'[', 0xC4, 0xE3, b']'];
    assert_eq!(VendorCheatFile::parse(&bytes), Err(ChtError::Encoding));
}

#[test]
fn test_content_before_section_is_error() {
    let err = VendorCheatFile::parse_str("Name=X\n[GameInfo]\n").unwrap_err();
    assert!(matches!(err, ChtError::Syntax { line: 1, .. }));
}

#[test]
fn test_line_without_equals_is_error() {
    let err = VendorCheatFile::parse_str("[GameInfo]\nName=X\n[A]\n41234,63\n").unwrap_err();
    assert!(matches!(err, ChtError::Syntax { line: 4, .. }));
}

#[test]
fn test_cheat_without_codes_is_error() {
    let err = VendorCheatFile::parse_str("[GameInfo]\nName=X\n[Empty]\n[B]\nON=41234,01\n").unwrap_err();
    assert!(matches!(err, ChtError::Syntax { line: 3, .. }));
}

#[test]
fn test_empty_section_name_is_error() {
    assert!(VendorCheatFile::parse_str("[]\nON=1\n").is_err());
}

#[test]
fn test_duplicate_game_info_is_error() {
    assert!(VendorCheatFile::parse_str("[GameInfo]\nName=X\n[GameInfo]\nName=Y\n").is_err());
}

#[test]
fn test_render_entry_sanitizes_brackets() {
    let entry = CheatEntry::new("Have [All] Items", ["41234,63"]);
    assert_eq!(render_entry(&entry, "\n"), "[Have (All) Items]\nON=41234,63\n");
}

#[test]
fn test_render_entry_never_writes_reserved_names() {
    let blank = CheatEntry::new(" \r\n ", ["41234,63"]);
    assert_eq!(render_entry(&blank, "\n"), "[Unnamed Cheat]\nON=41234,63\n");
    let header = CheatEntry::new("GAMEINFO", ["41234,63"]);
    assert_eq!(render_entry(&header, "\n"), "[GAMEINFO (cheat)]\nON=41234,63\n");
}

// -- Patching --

#[test]
fn test_patch_appends_after_original_bytes() {
    let new = [CheatEntry::new("Walk Through Walls(LRDB)", ["41300,01"])];
    let patched = patch_text(SAMPLE_CHT, "Super Game", &new).unwrap();

    assert!(patched.starts_with(SAMPLE_CHT.trim_end()));
    assert!(patched.ends_with("\n\n[Walk Through Walls(LRDB)]\nON=41300,01\n"));

    let reparsed = VendorCheatFile::parse_str(&patched).unwrap();
    assert_eq!(reparsed.entries.len(), 3);
    assert_eq!(reparsed.entries[2].description, "Walk Through Walls(LRDB)");
}

#[test]
fn test_patch_preserves_crlf_and_bom() {
    let original = format!("\u{feff}{}", SAMPLE_CHT.replace('\n', "\r\n"));
    let new = [CheatEntry::new("Walk Through Walls(LRDB)", ["41300,01"])];
    let patched = patch_text(&original, "Super Game", &new).unwrap();

    assert!(patched.starts_with(original.trim_end()));
    assert!(patched.ends_with("\r\n\r\n[Walk Through Walls(LRDB)]\r\nON=41300,01\r\n"));
    assert!(!patched.replace("\r\n", "").contains('\n'));
}

#[test]
fn test_patch_inserts_missing_game_info() {
    let original = "[Infinite Lives]\nON=41234,63\n";
    let new = [CheatEntry::new("Max Money(LRDB)", ["41240,FF"])];
    let patched = patch_text(original, "Super Game", &new).unwrap();

    let reparsed = VendorCheatFile::parse_str(&patched).unwrap();
    assert_eq!(reparsed.title(), Some("Super Game"));
    assert_eq!(reparsed.entries.len(), 2);
    assert!(patched.starts_with("[GameInfo]\n"));
}

#[test]
fn test_patch_empty_original_creates_file() {
    let new = [
        CheatEntry::new("A(LRDB)", ["41234,01"]),
        CheatEntry::new("B(LRDB)", ["41235,02"]),
    ];
    let patched = patch_text("", "Super Game", &new).unwrap();
    assert_eq!(
        patched,
        "[GameInfo]\nName=Super Game\nSystem=GBA\nText=\n\n[A(LRDB)]\nON=41234,01\n\n[B(LRDB)]\nON=41235,02\n"
    );
}

#[test]
fn test_patch_rejects_unparseable_original() {
    assert!(patch_text("garbage\n", "Super Game", &[]).is_err());
}

#[test]
fn test_patch_output_always_reads_back() {
    let new = [
        CheatEntry::new("", ["41300,01"]),
        CheatEntry::new("GameInfo", ["41301,01"]),
    ];
    let patched = patch_text(SAMPLE_CHT, "Super Game", &new).unwrap();
    let reparsed = VendorCheatFile::parse_str(&patched).unwrap();
    let names: Vec<_> = reparsed.entries.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(
        names,
        vec!["Infinite Lives", "Max Money", "Unnamed Cheat", "GameInfo (cheat)"]
    );
}

#[test]
fn test_patch_rejects_entries_that_would_not_read_back() {
    let new = [CheatEntry::new("No Codes", Vec::<String>::new())];
    let err = patch_text(SAMPLE_CHT, "Super Game", &new).unwrap_err();
    assert!(matches!(err, ChtError::Syntax { .. }));
}
