//! End-to-end search and inheritance scenarios over small dumps

use dumpspace::{
    Dataset, Direction, EngineConfig, EntityId, EntityKind, GroupLabel, MatchDetail, MatchReason,
    RawDataset, ScopedMatchKind, ScopedQuery, SearchFilters, SearchOptions,
};
use serde_json::{Value, json};
use std::collections::BTreeSet;

fn build(classes: Vec<Value>) -> Dataset {
    let raw = RawDataset::new().with_records(EntityKind::Class, classes);
    Dataset::build_sync(&raw, EngineConfig::default())
}

/// UObject <- UActor, one member each
fn object_actor() -> Dataset {
    build(vec![
        json!({"UObject": [{"Flags": [["uint32", "", "", []], 0, 4]}]}),
        json!({"UActor": [
            {"__InheritInfo": ["UObject"]},
            {"Health": [["float", "", "", []], 4, 4]}
        ]}),
    ])
}

#[test]
fn test_ancestors_and_descendants() {
    let dataset = object_actor();
    let ancestors: Vec<_> = dataset.ancestors("UActor").into_iter().collect();
    assert_eq!(ancestors, vec!["UObject"]);
    assert!(dataset.descendants("UObject").contains("UActor"));
    assert!(dataset.ancestors("UObject").is_empty());
}

#[test]
fn test_member_name_hit() {
    let dataset = object_actor();
    let outcome = dataset.search("Health", &SearchFilters::default(), &SearchOptions::default());

    let hit = outcome.hit("UActor").expect("UActor should match on its member");
    assert_eq!(hit.reason, MatchReason::Member);
    assert_eq!(
        hit.detail,
        Some(MatchDetail::Member {
            name: "Health".to_string(),
            type_name: "float".to_string(),
        })
    );
    assert!(outcome.hit("UObject").is_none());
}

#[test]
fn test_name_and_inheritance_hits() {
    let dataset = object_actor();
    let outcome = dataset.search("UObject", &SearchFilters::default(), &SearchOptions::default());

    assert_eq!(outcome.hits.len(), 2);
    assert_eq!(outcome.hits[0].name, "UObject");
    assert_eq!(outcome.hits[0].reason, MatchReason::NameExact);
    assert_eq!(outcome.hits[1].name, "UActor");
    assert_eq!(outcome.hits[1].reason, MatchReason::Inheritance);
    assert_eq!(outcome.hits[1].reason.as_str(), "inheritance-chain");
}

#[tokio::test]
async fn test_scoped_search_up_labels_path() {
    let dataset = object_actor();
    let outcome = dataset
        .scoped_search(&ScopedQuery::new("UActor", Direction::Up, "flags"))
        .await
        .unwrap();

    assert_eq!(outcome.groups.len(), 1);
    let group = outcome.group("UObject").expect("UObject group");
    assert_eq!(
        group.label,
        GroupLabel::Path(vec!["UActor".to_string(), "UObject".to_string()])
    );
    assert!(matches!(
        &group.matches[0].kind,
        ScopedMatchKind::Member { name, offset: 0, size: 4, .. } if name == "Flags"
    ));
    assert!(!outcome.truncated);
}

#[test]
fn test_truncation_and_superset() {
    let classes: Vec<Value> = (0..30)
        .map(|i| json!({ format!("UWidget{:02}", i): [] }))
        .collect();
    let dataset = build(classes);
    let filters = SearchFilters::default();

    let small = dataset.search(
        "widget",
        &filters,
        &SearchOptions {
            max_results: Some(10),
            ..SearchOptions::default()
        },
    );
    assert_eq!(small.hits.len(), 10);
    assert!(small.truncated);
    assert_eq!(small.total_matches, 30);

    let large = dataset.search(
        "widget",
        &filters,
        &SearchOptions {
            max_results: Some(20),
            ..SearchOptions::default()
        },
    );
    assert_eq!(large.hits.len(), 20);
    assert!(small.hits.iter().all(|hit| large.hits.contains(hit)));
    assert!(large.hits.len() > small.hits.len());
}

#[test]
fn test_every_name_is_indexed() {
    let dataset = object_actor();
    for (id, entity) in dataset.store().iter() {
        assert!(
            dataset.indexes().name.contains(&entity.name().to_lowercase(), id),
            "{} missing from the name index",
            entity.name()
        );
    }
}

fn posting_names(dataset: &Dataset, ids: &BTreeSet<EntityId>) -> Vec<String> {
    let mut names: Vec<String> = ids
        .iter()
        .filter_map(|id| dataset.entity(*id).map(|e| e.name().to_string()))
        .collect();
    names.sort();
    names
}

#[test]
fn test_rebuild_is_idempotent() {
    let classes = vec![
        json!({"UObject": []}),
        json!({"UActor": [
            {"__InheritInfo": ["UObject"]},
            {"Health": [["float", "", "", []], 4, 4]}
        ]}),
        json!({"UPawn": [{"__InheritInfo": ["UActor", "UObject"]}]}),
    ];
    let first = build(classes.clone());
    let mut reversed = classes;
    reversed.reverse();
    let second = build(reversed);

    assert_eq!(first.indexes().name.term_count(), second.indexes().name.term_count());
    for (term, ids) in first.indexes().name.iter() {
        let other = second.indexes().name.get(term).expect("term present in both builds");
        assert_eq!(
            posting_names(&first, ids),
            posting_names(&second, other),
            "postings differ for {}",
            term
        );
    }

    let again = build(vec![
        json!({"UObject": []}),
        json!({"UActor": [
            {"__InheritInfo": ["UObject"]},
            {"Health": [["float", "", "", []], 4, 4]}
        ]}),
        json!({"UPawn": [{"__InheritInfo": ["UActor", "UObject"]}]}),
    ]);
    assert!(first.indexes() == again.indexes());
}

#[test]
fn test_cyclic_ancestry_terminates() {
    let dataset = build(vec![
        json!({"A": [{"__InheritInfo": ["B"]}]}),
        json!({"B": [{"__InheritInfo": ["A"]}]}),
    ]);

    let a = dataset.ancestors("A");
    let b = dataset.ancestors("B");
    assert!(a.contains("B"));
    assert!(b.contains("A"));
    assert!(a.len() <= 2 && b.len() <= 2);
    assert_eq!(dataset.path_between("A", "B"), vec!["A", "B"]);
}

#[test]
fn test_path_between_is_symmetric() {
    let dataset = build(vec![
        json!({"UObject": []}),
        json!({"UActor": [{"__InheritInfo": ["UObject"]}]}),
        json!({"UPawn": [{"__InheritInfo": ["UActor", "UObject"]}]}),
        json!({"UComponent": [{"__InheritInfo": ["UObject"]}]}),
    ]);
    let names = ["UObject", "UActor", "UPawn", "UComponent"];

    for a in names {
        assert_eq!(dataset.path_between(a, a), vec![a]);
        for b in names {
            let mut back = dataset.path_between(b, a);
            back.reverse();
            assert_eq!(dataset.path_between(a, b), back, "{} -> {}", a, b);
        }
    }
    assert_eq!(dataset.path_between("UPawn", "UComponent").len(), 3);
}
