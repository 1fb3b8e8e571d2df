//! Structural properties of built forests over random record sets.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use exchange_versions::{
    HierarchyBuilder, LivenessPolicy, ReleaseDate, ScanError, VersionCode, VersionRecord,
    VersionTree, Walk,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// code -> days before today (`None` = month precision only)
fn arb_records() -> impl Strategy<Value = BTreeMap<Vec<u32>, Option<i64>>> {
    prop::collection::btree_map(
        prop::collection::vec(0u32..4, 1..5),
        prop::option::weighted(0.85, 0i64..400),
        0..40,
    )
}

fn arb_families() -> impl Strategy<Value = BTreeMap<Vec<u32>, String>> {
    prop::collection::btree_map(
        prop::collection::vec(0u32..4, 1..3),
        "[A-Z][a-z]{2,8}",
        0..4,
    )
}

fn build(
    families: &BTreeMap<Vec<u32>, String>,
    records: &BTreeMap<Vec<u32>, Option<i64>>,
) -> Vec<VersionTree> {
    let mut builder = HierarchyBuilder::new();
    for (path, name) in families {
        builder.seed_name(path, name.clone());
    }
    for (path, age) in records {
        let release = match age {
            Some(days) => ReleaseDate::Exact(today() - Duration::days(*days)),
            None => ReleaseDate::Month {
                year: 2024,
                month: 1,
            },
        };
        let code = VersionCode::new(path.clone()).unwrap();
        let name = format!("build {}", code);
        builder
            .insert_record(VersionRecord::new(name, code, release))
            .unwrap();
    }
    builder.build(&LivenessPolicy::default(), today())
}

fn nodes(forest: &[VersionTree]) -> Vec<&VersionTree> {
    Walk::new(forest).map(|(_, node)| node).collect()
}

/// Every contributing leaf carries a record with an exact date
fn fully_dated(node: &VersionTree) -> bool {
    let own = node.record().map_or(true, |r| r.date().is_some());
    if node.children().is_empty() {
        own && node.record().is_some()
    } else {
        own && node.children().iter().all(fully_dated)
    }
}

fn max_record_date(node: &VersionTree) -> Option<NaiveDate> {
    node.walk()
        .filter_map(|(_, n)| n.record().and_then(|r| r.date()))
        .max()
}

fn assert_alive_under_alive_parent(node: &VersionTree) {
    for child in node.children() {
        if child.is_alive() {
            assert!(node.is_alive(), "alive {:?} under dead {:?}", child.path(), node.path());
        }
        assert_alive_under_alive_parent(child);
    }
}

proptest! {
    #[test]
    fn children_are_strictly_descending(families in arb_families(), records in arb_records()) {
        let forest = build(&families, &records);
        for node in nodes(&forest) {
            let keys: Vec<u32> = node
                .children()
                .iter()
                .map(|c| c.path()[node.path().len()])
                .collect();
            prop_assert!(keys.windows(2).all(|w| w[0] > w[1]), "{:?}", keys);
        }
    }

    #[test]
    fn no_bare_single_child_wrappers(families in arb_families(), records in arb_records()) {
        let forest = build(&families, &records);
        for node in nodes(&forest) {
            let bare = node.record().is_none() && node.name().is_empty();
            prop_assert!(!(bare && node.children().len() == 1), "{:?}", node.path());
        }
    }

    #[test]
    fn every_node_is_classified(families in arb_families(), records in arb_records()) {
        let forest = build(&families, &records);
        for node in nodes(&forest) {
            prop_assert!(node.alive().is_some());
        }
        for tree in &forest {
            assert_alive_under_alive_parent(tree);
        }
    }

    #[test]
    fn latest_release_is_exact_only_when_fully_dated(
        families in arb_families(),
        records in arb_records(),
    ) {
        let forest = build(&families, &records);
        for node in nodes(&forest) {
            prop_assert_eq!(node.latest_release().is_some(), fully_dated(node));
            if let Some(latest) = node.latest_release() {
                prop_assert_eq!(Some(latest), max_record_date(node));
            }
        }
    }

    #[test]
    fn fix_up_and_liveness_are_idempotent(families in arb_families(), records in arb_records()) {
        let forest = build(&families, &records);
        let mut again = forest.clone();
        for tree in &mut again {
            tree.fix_up();
            tree.compute_liveness(&LivenessPolicy::default(), today());
        }
        prop_assert_eq!(forest, again);
    }

    #[test]
    fn duplicate_code_is_always_rejected(records in arb_records()) {
        prop_assume!(!records.is_empty());
        let mut builder = HierarchyBuilder::new();
        let mut first = None;
        for path in records.keys() {
            let code = VersionCode::new(path.clone()).unwrap();
            first.get_or_insert_with(|| code.clone());
            builder
                .insert_record(VersionRecord::new("x", code, ReleaseDate::Exact(today())))
                .unwrap();
        }
        let code = first.unwrap();
        let err = builder
            .insert_record(VersionRecord::new("y", code, ReleaseDate::Exact(today())))
            .unwrap_err();
        let is_duplicate = matches!(err, ScanError::DuplicateVersion { .. });
        prop_assert!(is_duplicate);
    }
}
