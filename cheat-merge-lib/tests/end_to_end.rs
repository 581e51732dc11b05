use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use cheat_merge_dat::CatalogRecord;
use cheat_merge_lib::{
    Confidence, CorpusEntry, MergeOptions, MergeProgress, PatchStatus, run_merge,
    scan_community_corpus,
};

const COMMUNITY_CHT: &str = "cheats = 3

cheat0_desc = \"Infinite Health\"
cheat0_code = \"32003228+0063\"
cheat0_enable = false

cheat1_desc = \"Max Money\"
cheat1_code = \"82003230+1234\"
cheat1_enable = false

cheat2_desc = \"Walk Through Walls\"
cheat2_code = \"32004000+0001\"
cheat2_enable = false
";

const VENDOR_CHT: &str = "[GameInfo]
Name=Super Game
System=GBA
Text=

[Infinite Lives]
ON=41234,63
";

struct Corpora {
    dir: tempfile::TempDir,
}

impl Corpora {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("vendor")).unwrap();
        fs::create_dir_all(dir.path().join("community")).unwrap();
        Self { dir }
    }

    fn vendor_file(&self, name: &str, text: &str) -> PathBuf {
        let path = self.dir.path().join("vendor").join(name);
        fs::write(&path, text).unwrap();
        path
    }

    fn community_file(&self, title: &str, text: &str) {
        fs::write(
            self.dir.path().join("community").join(format!("{title}.cht")),
            text,
        )
        .unwrap();
    }

    fn community_entries(&self) -> Vec<CorpusEntry> {
        scan_community_corpus(&self.dir.path().join("community")).unwrap()
    }
}

fn records(names: &[&str]) -> Vec<CatalogRecord> {
    names.iter().map(|n| CatalogRecord::new(*n)).collect()
}

fn run(
    catalog: &[&str],
    vendor: Vec<CorpusEntry>,
    community: Vec<CorpusEntry>,
) -> cheat_merge_lib::MergeRun {
    run_merge(records(catalog), vendor, community, &MergeOptions::default(), &|_| {}).unwrap()
}

fn descriptions(path: &Path) -> Vec<String> {
    let bytes = fs::read(path).unwrap();
    cheat_merge_cht::VendorCheatFile::parse(&bytes)
        .unwrap()
        .entries
        .into_iter()
        .map(|e| e.description)
        .collect()
}

#[test]
fn test_single_release_merges_all_new_entries() {
    let corpora = Corpora::new();
    let vendor_path = corpora.vendor_file("supergame.cht", VENDOR_CHT);
    corpora.community_file("Super Game (USA)", COMMUNITY_CHT);

    let result = run(
        &["Super Game (USA)"],
        vec![CorpusEntry::vendor("Super Game", &vendor_path)],
        corpora.community_entries(),
    );

    assert_eq!(result.results.len(), 1);
    let patch = &result.results[0];
    assert_eq!(patch.confidence, Confidence::Exact);
    assert_eq!(patch.status, PatchStatus::Success);
    assert_eq!(patch.entries_added, 3);
    assert_eq!(result.summary.patched, 1);
    assert_eq!(result.summary.entries_added, 3);
    assert_eq!(descriptions(&vendor_path).len(), 4);
}

#[test]
fn test_two_releases_and_bare_vendor_title_write_nothing() {
    let corpora = Corpora::new();
    let vendor_path = corpora.vendor_file("supergame.cht", VENDOR_CHT);
    corpora.community_file("Super Game (USA)", COMMUNITY_CHT);
    corpora.community_file("Super Game (Europe)", COMMUNITY_CHT);

    let result = run(
        &["Super Game (USA)", "Super Game (Europe)"],
        vec![CorpusEntry::vendor("Super Game", &vendor_path)],
        corpora.community_entries(),
    );

    let patch = &result.results[0];
    assert_eq!(patch.confidence, Confidence::Ambiguous);
    assert_eq!(patch.status, PatchStatus::Skipped);
    assert_eq!(patch.entries_added, 0);
    assert_eq!(result.summary.ambiguous, 1);
    assert_eq!(fs::read_to_string(&vendor_path).unwrap(), VENDOR_CHT);
}

#[test]
fn test_already_merged_file_reports_no_new_entries() {
    let corpora = Corpora::new();
    let already = format!(
        "{VENDOR_CHT}\n[Infinite Health]\nON=43228,63\n\n[Max Money]\nON=43230,34,12\n\n[Walk Through Walls(LRDB)]\nON=44000,01\n"
    );
    let vendor_path = corpora.vendor_file("supergame.cht", &already);
    corpora.community_file("Super Game (USA)", COMMUNITY_CHT);

    let result = run(
        &["Super Game (USA)"],
        vec![CorpusEntry::vendor("Super Game", &vendor_path)],
        corpora.community_entries(),
    );

    let patch = &result.results[0];
    assert_eq!(patch.confidence, Confidence::Exact);
    assert_eq!(patch.entries_added, 0);
    assert_eq!(patch.entries_skipped_as_duplicate, 3);
    assert_eq!(patch.status, PatchStatus::NoNewEntries);
    assert_eq!(fs::read_to_string(&vendor_path).unwrap(), already);
}

#[test]
fn test_second_run_is_a_no_op() {
    let corpora = Corpora::new();
    let vendor_path = corpora.vendor_file("supergame.cht", VENDOR_CHT);
    corpora.community_file("Super Game (USA)", COMMUNITY_CHT);
    let vendor = vec![CorpusEntry::vendor("Super Game", &vendor_path)];

    run(&["Super Game (USA)"], vendor.clone(), corpora.community_entries());
    let after_first = fs::read(&vendor_path).unwrap();

    let second = run(&["Super Game (USA)"], vendor, corpora.community_entries());
    assert_eq!(second.summary.entries_added, 0);
    assert_eq!(second.summary.no_new_entries, 1);
    assert_eq!(fs::read(&vendor_path).unwrap(), after_first);
}

#[test]
fn test_one_bad_file_does_not_stop_the_run() {
    let corpora = Corpora::new();
    let broken = corpora.vendor_file("a_broken.cht", "ON=orphan\n");
    let good = corpora.vendor_file("b_good.cht", VENDOR_CHT);
    corpora.community_file("Broken Game (USA)", COMMUNITY_CHT);
    corpora.community_file("Super Game (USA)", COMMUNITY_CHT);

    let result = run(
        &["Super Game (USA)", "Broken Game (USA)"],
        vec![
            CorpusEntry::vendor("Broken Game", &broken),
            CorpusEntry::vendor("Super Game", &good),
        ],
        corpora.community_entries(),
    );

    assert!(result.results[0].status.is_failure());
    assert_eq!(result.results[1].status, PatchStatus::Success);
    assert_eq!(result.summary.failed, 1);
    assert_eq!(result.summary.patched, 1);
    assert!(result.summary.has_failures());
    assert_eq!(fs::read_to_string(&broken).unwrap(), "ON=orphan\n");
}

#[test]
fn test_progress_events() {
    let corpora = Corpora::new();
    let vendor_path = corpora.vendor_file("supergame.cht", VENDOR_CHT);
    corpora.community_file("Super Game (USA)", COMMUNITY_CHT);

    let events = RefCell::new(Vec::new());
    run_merge(
        records(&["Super Game (USA)"]),
        vec![CorpusEntry::vendor("Super Game", &vendor_path)],
        corpora.community_entries(),
        &MergeOptions::default(),
        &|p| events.borrow_mut().push(p),
    )
    .unwrap();

    let events = events.into_inner();
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], MergeProgress::Correlated { total: 1 }));
    assert!(matches!(
        &events[1],
        MergeProgress::Merging { file_name, index: 0, total: 1 } if file_name == "supergame.cht"
    ));
    assert!(matches!(events[2], MergeProgress::Done));
}
