//! End-to-end tree scenarios: build from records, check derived state.
//!
//! No network access; every test injects its own "today".

use chrono::{Duration, NaiveDate};

use exchange_versions::{
    build_forest, collect_alive, forest_from_document, HierarchyBuilder, LivenessPolicy,
    ReleaseDate, ScanConfig, ScanError, VersionRecord, VersionTree,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record(code: &str, name: &str, release: ReleaseDate) -> VersionRecord {
    VersionRecord::new(name, code.parse().unwrap(), release)
}

fn find<'a>(forest: &'a [VersionTree], path: &[u32]) -> &'a VersionTree {
    exchange_versions::Walk::new(forest)
        .map(|(_, node)| node)
        .find(|node| node.path() == path)
        .unwrap_or_else(|| panic!("no node at {:?}", path))
}

#[test]
fn test_old_family_is_dead() {
    let records = vec![
        record("15.2.100", "CU100", ReleaseDate::Exact(date(2023, 1, 10))),
        record("15.2.50", "CU50", ReleaseDate::Exact(date(2022, 6, 1))),
    ];
    let forest = build_forest(records, &ScanConfig::default(), date(2026, 1, 1)).unwrap();

    let family = find(&forest, &[15, 2]);
    assert_eq!(family.name(), "Exchange Server 2019");
    assert_eq!(family.latest_release(), Some(date(2023, 1, 10)));

    let newest = find(&forest, &[15, 2, 100]);
    assert_eq!(newest.latest_release(), Some(date(2023, 1, 10)));

    let nodes: Vec<&VersionTree> = exchange_versions::Walk::new(&forest)
        .map(|(_, node)| node)
        .collect();
    assert!(nodes.iter().all(|node| node.alive() == Some(false)));
    assert_eq!(collect_alive(&forest).count(), 0);
}

#[test]
fn test_record_lagging_its_family_is_dead() {
    let today = date(2024, 6, 1);
    let records = vec![
        record("15.2.30", "fresh", ReleaseDate::Exact(today - Duration::days(10))),
        record("15.2.20", "lag 31", ReleaseDate::Exact(today - Duration::days(41))),
        record("15.2.10", "lag 32", ReleaseDate::Exact(today - Duration::days(42))),
    ];
    let forest = build_forest(records, &ScanConfig::default(), today).unwrap();

    assert!(find(&forest, &[15, 2]).is_alive());
    assert!(find(&forest, &[15, 2, 30]).is_alive());
    assert!(find(&forest, &[15, 2, 20]).is_alive());
    assert!(!find(&forest, &[15, 2, 10]).is_alive());

    let alive: Vec<String> = collect_alive(&forest)
        .map(|r| r.code().to_string())
        .collect();
    assert_eq!(alive, vec!["15.2.30", "15.2.20"]);
}

#[test]
fn test_duplicate_code_aborts_build() {
    let records = vec![
        record("14", "Exchange Server 2010", ReleaseDate::Exact(date(2009, 11, 9))),
        record("14", "Exchange Server 2010", ReleaseDate::Exact(date(2009, 11, 9))),
    ];
    let err = build_forest(records, &ScanConfig::default(), date(2024, 1, 1)).unwrap_err();
    match err {
        ScanError::DuplicateVersion { code, .. } => assert_eq!(code.to_string(), "14"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_month_only_date_is_not_exact() {
    let today = date(2024, 6, 20);
    let records = vec![record("6.5.7654.4", "post-SP2", ReleaseDate::parse("May 2024"))];
    let forest = build_forest(records, &ScanConfig::default(), today).unwrap();

    let build = find(&forest, &[6, 5, 7654, 4]);
    let rec = build.record().unwrap();
    assert_eq!(rec.date(), None);
    assert_eq!(rec.date_string(), "2024-05");
    assert_eq!(build.latest_release(), None);

    let family = find(&forest, &[6, 5]);
    assert_eq!(family.name(), "Exchange Server 2003");
    assert_eq!(family.latest_release(), None);
    assert!(!family.is_alive());
}

#[test]
fn test_seeded_family_without_records() {
    let forest = build_forest(Vec::new(), &ScanConfig::default(), date(2024, 1, 1)).unwrap();
    assert_eq!(forest.len(), 10);
    for tree in &forest {
        assert!(!tree.name().is_empty());
        assert_eq!(tree.latest_release(), None);
        assert_eq!(tree.alive(), Some(false));
    }
}

#[test]
fn test_custom_thresholds() {
    let today = date(2024, 6, 1);
    let mut config = ScanConfig::default();
    config.liveness = LivenessPolicy {
        max_age_days: 30,
        max_family_lag_days: 5,
    };
    let records = vec![
        record("15.2.2", "new", ReleaseDate::Exact(today - Duration::days(3))),
        record("15.2.1", "older", ReleaseDate::Exact(today - Duration::days(10))),
    ];
    let forest = build_forest(records, &config, today).unwrap();
    assert!(find(&forest, &[15, 2, 2]).is_alive());
    assert!(!find(&forest, &[15, 2, 1]).is_alive());
}

#[test]
fn test_builder_used_directly() {
    let mut builder = HierarchyBuilder::new();
    builder.seed_name(&[16], "Exchange Server SE");
    builder
        .insert_record(record("16.0.1.0", "RTM", ReleaseDate::Exact(date(2025, 7, 1))))
        .unwrap();
    let forest = builder.build(&LivenessPolicy::default(), date(2025, 8, 1));
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].children()[0].path(), &[16, 0, 1, 0]);
    assert!(forest[0].children()[0].is_alive());
}

#[test]
fn test_fixture_document() {
    let text = include_str!("fixtures/build-numbers.md");
    let forest = forest_from_document(text, &ScanConfig::default(), date(2024, 8, 1)).unwrap();

    let top: Vec<&str> = forest.iter().map(|t| t.name()).collect();
    assert_eq!(top[0], "Exchange Server 2019");
    assert_eq!(top[1], "Exchange Server 2016");

    let alive: Vec<String> = collect_alive(&forest)
        .map(|r| r.code().to_string())
        .collect();
    assert_eq!(alive, vec!["15.2.1544.11", "15.2.1258.34", "15.1.2507.39"]);

    // linked names survive into the tree
    let jul = find(&forest, &[15, 2, 1544, 11]).record().unwrap();
    assert!(jul.html_name().unwrap().starts_with("<a href=\"https://support.microsoft.com/help/5040434\">"));

    // the month-only 2003 build leaves its family without a latest release
    let e2003 = find(&forest, &[6, 5]);
    assert_eq!(e2003.latest_release(), None);
    assert_eq!(
        find(&forest, &[6, 5, 7654, 4]).record().unwrap().name(),
        "Exchange Server 2003 post-SP2"
    );
}
