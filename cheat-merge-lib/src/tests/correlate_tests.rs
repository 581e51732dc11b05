use super::*;
use crate::index::{CorpusFormat, index_corpus};
use cheat_merge_dat::{CatalogRecord, build_catalog};

fn catalog(names: &[&str]) -> IdentityCatalog {
    build_catalog(names.iter().map(|n| CatalogRecord::new(*n))).unwrap()
}

fn vendor(entries: Vec<CorpusEntry>) -> CorpusIndex {
    index_corpus(CorpusFormat::Vendor, entries)
}

fn community(titles: &[&str]) -> CorpusIndex {
    index_corpus(
        CorpusFormat::Community,
        titles
            .iter()
            .map(|t| CorpusEntry::community(*t, format!("/lr/{t}.cht"))),
    )
}

fn single(vendor_title: &str, community_titles: &[&str], catalog_names: &[&str]) -> Correspondence {
    let entry = CorpusEntry::vendor(vendor_title, "/v/0001.cht");
    correlate_entry(&entry, &community(community_titles), &catalog(catalog_names))
}

#[test]
fn test_unique_catalog_title_bridges_bare_vendor_title() {
    let c = single("Super Game", &["Super Game (USA)"], &["Super Game (USA)"]);
    assert_eq!(c.confidence(), Confidence::Exact);
    assert_eq!(
        c.verdict.community().map(|e| e.raw_title.as_str()),
        Some("Super Game (USA)")
    );
}

#[test]
fn test_two_regional_releases_are_ambiguous_for_bare_title() {
    let c = single(
        "Super Game",
        &["Super Game (USA)", "Super Game (Europe)"],
        &["Super Game (USA)", "Super Game (Europe)"],
    );
    assert_eq!(c.confidence(), Confidence::Ambiguous);
    match &c.verdict {
        Verdict::Ambiguous(tied) => {
            let titles: Vec<_> = tied.iter().map(|e| e.raw_title.as_str()).collect();
            assert_eq!(titles, vec!["Super Game (Europe)", "Super Game (USA)"]);
        }
        other => panic!("expected ambiguous, got {other:?}"),
    }
    assert!(!c.confidence().allows_merge());
}

#[test]
fn test_region_in_vendor_title_picks_exact_candidate() {
    let c = single(
        "Super Game (Europe)",
        &["Super Game (USA)", "Super Game (Europe)"],
        &["Super Game (USA)", "Super Game (Europe)"],
    );
    assert_eq!(c.confidence(), Confidence::Exact);
    assert_eq!(
        c.verdict.community().unwrap().raw_title,
        "Super Game (Europe)"
    );
}

#[test]
fn test_single_candidate_with_other_region_is_fuzzy() {
    let c = single("Super Game (Japan)", &["Super Game (USA)"], &["Other (USA)"]);
    assert_eq!(c.confidence(), Confidence::Fuzzy);
    assert!(c.confidence().allows_merge());
}

#[test]
fn test_best_partial_overlap_is_fuzzy() {
    let c = single(
        "Super Game (USA) (Rev 1)",
        &["Super Game (USA)", "Super Game (Europe)"],
        &["Other (USA)"],
    );
    assert_eq!(c.confidence(), Confidence::Fuzzy);
    assert_eq!(c.verdict.community().unwrap().raw_title, "Super Game (USA)");
}

#[test]
fn test_no_overlap_with_several_candidates_is_ambiguous() {
    let c = single(
        "Super Game (Japan)",
        &["Super Game (USA)", "Super Game (Europe)"],
        &["Other (USA)"],
    );
    assert_eq!(c.confidence(), Confidence::Ambiguous);
}

#[test]
fn test_no_candidates_is_unmatched() {
    let c = single("Lonely Game", &["Super Game (USA)"], &["Super Game (USA)"]);
    assert_eq!(c.confidence(), Confidence::Unmatched);
    assert!(c.candidates.is_empty());
    assert!(c.verdict.community().is_none());
}

#[test]
fn test_serial_selects_release() {
    let catalog = build_catalog(vec![
        CatalogRecord::new("Super Game (USA)").with_serial("ASGE"),
        CatalogRecord::new("Super Game (Europe)").with_serial("ASGP"),
    ])
    .unwrap();
    let entry = CorpusEntry::vendor("SUPER GAME", "/v/0001.cht").with_serial("asgp");
    let c = correlate_entry(
        &entry,
        &community(&["Super Game (USA)", "Super Game (Europe)"]),
        &catalog,
    );
    assert_eq!(c.confidence(), Confidence::Exact);
    assert_eq!(
        c.verdict.community().unwrap().raw_title,
        "Super Game (Europe)"
    );
}

#[test]
fn test_article_and_punctuation_variants_correlate() {
    let c = single(
        "Legend of Zelda, The - A Link to the Past",
        &["The Legend of Zelda - A Link to the Past (USA)"],
        &["Legend of Zelda, The - A Link to the Past & Four Swords (USA)"],
    );
    assert_eq!(c.confidence(), Confidence::Fuzzy);
}

#[test]
fn test_verdicts_do_not_depend_on_input_order() {
    let titles = ["Super Game (USA)", "Super Game (Europe)", "Super Game (Japan)"];
    let mut reversed = titles;
    reversed.reverse();
    let catalog = catalog(&titles);

    let vendor_entries = || {
        vec![
            CorpusEntry::vendor("Super Game", "/v/0002.cht"),
            CorpusEntry::vendor("Super Game (USA)", "/v/0001.cht"),
        ]
    };
    let mut backwards = vendor_entries();
    backwards.reverse();

    let a = correlate(&vendor(vendor_entries()), &community(&titles), &catalog);
    let b = correlate(&vendor(backwards), &community(&reversed), &catalog);
    assert_eq!(a, b);
    assert_eq!(a[0].vendor.file_name(), "0001.cht");
    assert_eq!(a[0].confidence(), Confidence::Exact);
    assert_eq!(a[1].confidence(), Confidence::Ambiguous);
}

#[test]
fn test_confidence_labels() {
    assert_eq!(Confidence::Exact.to_string(), "exact");
    assert_eq!(Confidence::Unmatched.label(), "unmatched");
}

#[test]
fn test_code_breaker_file_wins_over_other_device() {
    let c = single(
        "Super Game (USA)",
        &["Super Game (USA) (Code Breaker)", "Super Game (USA) (GameShark)"],
        &["Super Game (USA)"],
    );
    assert_eq!(c.confidence(), Confidence::Exact);
    assert_eq!(
        c.verdict.community().unwrap().raw_title,
        "Super Game (USA) (Code Breaker)"
    );
    assert_eq!(c.candidates.len(), 2);
}

#[test]
fn test_lone_other_device_file_is_never_merged() {
    let c = single(
        "Super Game (USA)",
        &["Super Game (USA) (Action Replay)"],
        &["Super Game (USA)"],
    );
    assert_eq!(c.confidence(), Confidence::Unmatched);
    assert!(!c.confidence().allows_merge());
    assert_eq!(c.candidates.len(), 1);
}
