//! Tests for the entity normalizer

use super::records::{parse_type, parse_u64};
use super::*;
use crate::model::TypeCategory;
use serde_json::json;

fn class_record() -> Value {
    json!({
        "AActor": [
            {"__InheritInfo": ["UObject"]},
            {"__MDKClassSize": 0x2a0},
            {"RootComponent": [["USceneComponent", "C", "*", []], 0x130, 8]},
            {"Tags": [["TArray", "C", "", [["FName", "S", "", []]]], 0x138, 16]}
        ]
    })
}

#[test]
fn test_class_extracts_inherit_info_and_drops_size() {
    let mut normalizer = Normalizer::new();
    normalizer.ingest(EntityKind::Class, &class_record());
    let (store, report) = normalizer.finish();

    let id = store.find(EntityKind::Class, "AActor").unwrap();
    let class = store.get(id).and_then(Entity::as_class).unwrap();
    assert_eq!(class.direct_ancestors, vec!["UObject".to_string()]);

    let names: Vec<_> = class.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["RootComponent", "Tags"]);
    assert!(class.members[0].ty.pointer);
    assert_eq!(class.members[0].offset, 0x130);
    assert_eq!(class.members[1].ty.display(), "TArray<FName>");
    assert_eq!(report.total_skipped(), 0);
    assert_eq!(report.accepted.get(&EntityKind::Class), Some(&1));
}

#[test]
fn test_functions_are_flattened_per_owner() {
    let record = json!({
        "AActor": [
            {"K2_DestroyActor": [["void", "D", "", []], [], "0x1234", "Final|Native|Public"]},
            {"SetOwner": [
                ["void", "D", "", []],
                [[["AActor", "C", "*", []], "", "NewOwner"]],
                4660,
                ["BlueprintCallable"]
            ]}
        ]
    });

    let mut normalizer = Normalizer::new();
    normalizer.ingest(EntityKind::Function, &record);
    let (store, report) = normalizer.finish();

    assert_eq!(store.count(EntityKind::Function), 2);
    let destroy = store
        .find(EntityKind::Function, "aactor::k2_destroyactor")
        .and_then(|id| store.get(id))
        .and_then(Entity::as_function)
        .unwrap();
    assert_eq!(destroy.offset, 0x1234);
    assert!(destroy.flags.contains("Native"));
    assert_eq!(destroy.flags.len(), 3);

    let set_owner = store.functions_of("AActor")[1];
    assert_eq!(set_owner.params[0].name, "NewOwner");
    assert_eq!(set_owner.params[0].ty.display(), "AActor*");
    assert_eq!(set_owner.offset, 4660);
    assert_eq!(report.total_skipped(), 0);
}

#[test]
fn test_enum_and_offset_records() {
    let mut normalizer = Normalizer::new();
    normalizer.ingest(
        EntityKind::Enum,
        &json!({"ENetRole": [[{"ROLE_None": 0}, {"ROLE_Authority": 3}], "uint8"]}),
    );
    normalizer.ingest(EntityKind::Enum, &json!({"EBare": [[{"A": 1}]]}));
    normalizer.ingest(EntityKind::Offset, &json!(["OFFSET_GOBJECTS", 0x8a3c2f0]));
    normalizer.ingest(EntityKind::Offset, &json!(["OFFSET_GNAMES", "0x10"]));
    let (store, report) = normalizer.finish();

    let role = store
        .find(EntityKind::Enum, "ENetRole")
        .and_then(|id| store.get(id))
        .and_then(Entity::as_enum)
        .unwrap();
    assert_eq!(role.values.len(), 2);
    assert_eq!(role.values[1].value, 3);

    let bare = store
        .find(EntityKind::Enum, "EBare")
        .and_then(|id| store.get(id))
        .and_then(Entity::as_enum)
        .unwrap();
    assert_eq!(bare.underlying_type, "uint8");

    assert!(store.contains(EntityKind::Offset, "offset_gnames"));
    assert_eq!(report.total_accepted(), 4);
}

#[test]
fn test_malformed_records_are_skipped_and_counted() {
    let mut normalizer = Normalizer::new();
    normalizer.ingest(EntityKind::Class, &json!("not an object"));
    normalizer.ingest(EntityKind::Class, &json!({"UBroken": {"oops": true}}));
    normalizer.ingest(EntityKind::Struct, &json!({"FShort": [{"X": [["float", "D"]]}]}));
    normalizer.ingest(EntityKind::Function, &json!({"AActor": [{"Tick": [["void"], []]}]}));
    normalizer.ingest(EntityKind::Offset, &json!(["OFFSET_NEGATIVE", -1]));
    normalizer.ingest(EntityKind::Class, &json!({"UGood": []}));
    let (store, report) = normalizer.finish();

    assert_eq!(report.skipped_of(EntityKind::Class), 2);
    assert_eq!(report.skipped_of(EntityKind::Struct), 1);
    assert_eq!(report.skipped_of(EntityKind::Function), 1);
    assert_eq!(report.skipped_of(EntityKind::Offset), 1);
    assert_eq!(report.total_skipped(), 5);
    assert_eq!(report.issues[1].key.as_deref(), Some("UBroken"));
    assert_eq!(store.len(), 1);
    assert!(store.contains(EntityKind::Class, "UGood"));
}

#[test]
fn test_one_bad_function_does_not_drop_its_siblings() {
    let record = json!({
        "APawn": [
            {"GetController": [["AController", "C", "*", []], [], 16]},
            {"Broken": "nope"}
        ]
    });
    let mut normalizer = Normalizer::new();
    normalizer.ingest(EntityKind::Function, &record);
    let (store, report) = normalizer.finish();

    assert_eq!(store.count(EntityKind::Function), 1);
    assert_eq!(report.skipped_of(EntityKind::Function), 1);
    assert_eq!(report.issues[0].key.as_deref(), Some("APawn::Broken"));
}

#[test]
fn test_duplicate_names_are_reported() {
    let raw = RawDataset::new().with_records(
        EntityKind::Struct,
        vec![json!({"FVector": []}), json!({"fvector": []})],
    );
    let (store, report) = Normalizer::normalize_all(&raw);
    assert_eq!(store.count(EntityKind::Struct), 1);
    assert_eq!(report.duplicates, 1);
}

#[test]
fn test_issue_list_is_capped() {
    let mut normalizer = Normalizer::new();
    for _ in 0..MAX_RECORDED_ISSUES + 10 {
        normalizer.ingest(EntityKind::Enum, &json!(42));
    }
    let report = normalizer.report();
    assert_eq!(report.total_skipped(), MAX_RECORDED_ISSUES + 10);
    assert_eq!(report.issues.len(), MAX_RECORDED_ISSUES);
}

#[test]
fn test_parse_type_shapes() {
    assert_eq!(parse_type(&json!([])).unwrap(), crate::model::TypeDescriptor::unknown());

    let map = parse_type(&json!([
        "TMap", "C", "", [["FName", "S", "", []], ["UObject", "C", "*", []]]
    ]))
    .unwrap();
    assert_eq!(map.display(), "TMap<FName, UObject*>");
    assert_eq!(map.category, TypeCategory::Class);

    let pointer = parse_type(&json!(["UClass", "*"])).unwrap();
    assert!(pointer.pointer);

    assert!(parse_type(&json!([12, "C"])).is_err());
    assert!(parse_type(&json!({"name": "x"})).is_err());
}

#[test]
fn test_parse_u64_accepts_hex_and_rejects_negative() {
    assert_eq!(parse_u64(&json!("0x1F"), "offset").unwrap(), 31);
    assert_eq!(parse_u64(&json!("42"), "offset").unwrap(), 42);
    assert_eq!(parse_u64(&json!(8.0), "offset").unwrap(), 8);
    assert!(parse_u64(&json!(-3), "offset").is_err());
    assert!(parse_u64(&json!("0xZZ"), "offset").is_err());
    assert!(parse_u64(&json!(null), "offset").is_err());
}

#[test]
fn test_set_document_unwraps_data() {
    let mut raw = RawDataset::new();
    raw.set_document(EntityKind::Class, json!({"data": [{"UObject": []}]}))
        .unwrap();
    raw.set_document(EntityKind::Offset, json!([["GWorld", 1]]))
        .unwrap();
    assert_eq!(raw.total_records(), 2);

    let err = raw
        .set_document(EntityKind::Enum, json!({"version": 3}))
        .unwrap_err();
    assert_eq!(err.error_code(), "DUMP_INVALID_INPUT");
}
