//! Tests for inheritance closures and path queries

use super::*;
use crate::model::{ClassEntity, Entity};
use crate::store::EntityStore;
use std::collections::BTreeSet;

fn class(name: &str, ancestors: &[&str]) -> Entity {
    Entity::Class(ClassEntity {
        name: name.to_string(),
        members: Vec::new(),
        direct_ancestors: ancestors.iter().map(|a| a.to_string()).collect(),
    })
}

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// UObject <- AActor <- APawn <- ACharacter, AActor <- AInfo
fn actor_graph() -> InheritanceGraph {
    let mut store = EntityStore::new();
    store.insert(class("UObject", &[]));
    store.insert(class("AActor", &["UObject"]));
    store.insert(class("APawn", &["AActor", "UObject"]));
    store.insert(class("ACharacter", &["APawn", "AActor", "UObject"]));
    store.insert(class("AInfo", &["AActor", "UObject"]));
    InheritanceGraph::from_store(&store)
}

#[test]
fn test_ancestors_match_listed_chain() {
    let graph = actor_graph();
    assert_eq!(
        graph.ancestors("ACharacter"),
        set(&["APawn", "AActor", "UObject"])
    );
    assert_eq!(graph.ancestors("aactor"), set(&["UObject"]));
    assert!(graph.ancestors("UObject").is_empty());
    assert!(graph.ancestors("Unknown").is_empty());
}

#[test]
fn test_descendants_are_transitive() {
    let graph = actor_graph();
    assert_eq!(
        graph.descendants("AActor"),
        set(&["APawn", "ACharacter", "AInfo"])
    );
    assert!(graph.descendants("UObject").contains("ACharacter"));
    assert!(graph.descendants("ACharacter").is_empty());
}

#[test]
fn test_closures_are_memoized() {
    let graph = actor_graph();
    assert_eq!(graph.cached_closures(), 0);
    graph.ancestors("ACharacter");
    assert_eq!(graph.cached_closures(), 1);
    graph.ancestors("ACharacter");
    assert_eq!(graph.cached_closures(), 1);
    graph.ancestors("APawn");
    assert_eq!(graph.cached_closures(), 2);
}

#[test]
fn test_direct_children_sorted() {
    let graph = actor_graph();
    assert_eq!(
        graph.direct_children("AActor"),
        vec!["ACharacter", "AInfo", "APawn"]
    );
    assert_eq!(graph.direct_parents("APawn"), vec!["AActor", "UObject"]);
}

#[test]
fn test_cycle_terminates_with_finite_sets() {
    let mut store = EntityStore::new();
    store.insert(class("A", &["B"]));
    store.insert(class("B", &["A"]));
    store.insert(class("C", &["A"]));
    let graph = InheritanceGraph::from_store(&store);

    assert_eq!(graph.ancestors("A"), set(&["B"]));
    assert_eq!(graph.ancestors("B"), set(&["A"]));
    assert_eq!(graph.ancestors("C"), set(&["A", "B"]));
    assert_eq!(graph.descendants("A"), set(&["B", "C"]));
}

/// R0 <-> R1 cycle at the root, then C0..C{depth-1} where every Ck lists
/// its whole chain `[C(k-1), ..., C0, R0]` the way dumps do
fn deep_cyclic_graph(depth: usize) -> InheritanceGraph {
    let mut store = EntityStore::new();
    store.insert(class("R0", &["R1"]));
    store.insert(class("R1", &["R0"]));
    for k in 0..depth {
        let mut chain: Vec<String> = (0..k).rev().map(|i| format!("C{}", i)).collect();
        chain.push("R0".to_string());
        let chain: Vec<&str> = chain.iter().map(String::as_str).collect();
        store.insert(class(&format!("C{}", k), &chain));
    }
    InheritanceGraph::from_store(&store)
}

#[test]
fn test_deep_chain_over_cycle_is_cached() {
    let depth = 48;
    let graph = deep_cyclic_graph(depth);

    let deepest = format!("C{}", depth - 1);
    let ancestors = graph.ancestors(&deepest);
    assert_eq!(ancestors.len(), depth - 1 + 2);
    assert!(ancestors.contains("R0") && ancestors.contains("R1"));
    assert_eq!(graph.cached_closures(), 1);

    for k in 0..depth {
        graph.warm(&format!("C{}", k));
    }
    graph.warm("R0");
    graph.warm("R1");
    assert_eq!(graph.cached_closures(), depth + 2);
    assert_eq!(graph.ancestors(&deepest), ancestors);
    assert_eq!(graph.ancestors("R0"), set(&["R1"]));
    assert_eq!(graph.descendants("R1").len(), depth + 1);
}

#[test]
fn test_missing_ancestor_kept_as_name_only_node() {
    let mut store = EntityStore::new();
    store.insert(class("UWidget", &["UVisual"]));
    let graph = InheritanceGraph::from_store(&store);

    assert_eq!(graph.ancestors("UWidget"), set(&["UVisual"]));
    assert_eq!(graph.display_name("uvisual"), Some("UVisual"));
}

#[test]
fn test_lineage_orders_nearest_first() {
    let graph = actor_graph();
    assert_eq!(
        graph.lineage("ACharacter", Direction::Up),
        vec!["APawn", "AActor", "UObject"]
    );
    assert_eq!(
        graph.lineage("AActor", Direction::Down),
        vec!["APawn", "ACharacter", "AInfo"]
    );

    let both = graph.lineage("APawn", Direction::Both);
    assert_eq!(both, vec!["AActor", "UObject", "ACharacter"]);
}

#[test]
fn test_path_between_self_and_disconnected() {
    let graph = actor_graph();
    assert_eq!(graph.path_between("APawn", "apawn"), vec!["APawn"]);

    let mut store = EntityStore::new();
    store.insert(class("A", &[]));
    store.insert(class("B", &[]));
    let islands = InheritanceGraph::from_store(&store);
    assert!(islands.path_between("A", "B").is_empty());
    assert!(islands.path_between("A", "Missing").is_empty());
}

#[test]
fn test_path_between_is_shortest_and_symmetric() {
    let graph = actor_graph();
    assert_eq!(
        graph.path_between("ACharacter", "UObject"),
        vec!["ACharacter", "UObject"]
    );
    assert_eq!(graph.path_between("AInfo", "ACharacter").len(), 3);

    let names = ["UObject", "AActor", "APawn", "ACharacter", "AInfo"];
    for a in names {
        for b in names {
            let mut back = graph.path_between(b, a);
            back.reverse();
            assert_eq!(graph.path_between(a, b), back, "{} -> {}", a, b);
        }
    }
}

#[test]
fn test_direction_parsing() {
    assert_eq!("UP".parse::<Direction>(), Ok(Direction::Up));
    assert_eq!("both".parse::<Direction>(), Ok(Direction::Both));
    assert!("sideways".parse::<Direction>().is_err());
}
