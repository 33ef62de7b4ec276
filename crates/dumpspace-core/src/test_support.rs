//! Shared fixtures for unit tests

use crate::config::EngineConfig;
use crate::dataset::Dataset;
use crate::model::EntityKind;
use crate::normalize::RawDataset;
use serde_json::json;

/// A small engine-like dump:
///
/// ```text
/// UObject <- AActor <- APawn <- ACharacter
///         <- UActorComponent <- USceneComponent
/// FVector, FHitResult (structs)
/// ```
pub fn sample_raw() -> RawDataset {
    let classes = vec![
        json!({"UObject": [
            {"__MDKClassSize": 40},
            {"ObjectFlags": [["EObjectFlags", "E", "", []], 8, 4]},
            {"ClassPrivate": [["UClass", "C", "*", []], 16, 8]}
        ]}),
        json!({"AActor": [
            {"__InheritInfo": ["UObject"]},
            {"RootComponent": [["USceneComponent", "C", "*", []], 304, 8]},
            {"Tags": [["TArray", "C", "", [["FName", "S", "", []]]], 312, 16]},
            {"InstanceComponents": [
                ["TArray", "C", "", [["UActorComponent", "C", "*", []]]],
                328,
                16
            ]}
        ]}),
        json!({"APawn": [
            {"__InheritInfo": ["AActor", "UObject"]},
            {"Controller": [["AController", "C", "*", []], 704, 8]},
            {"BaseEyeHeight": [["float", "D", "", []], 712, 4]}
        ]}),
        json!({"ACharacter": [
            {"__InheritInfo": ["APawn", "AActor", "UObject"]},
            {"Mesh": [["USkeletalMeshComponent", "C", "*", []], 1024, 8]},
            {"CrouchedEyeHeight": [["float", "D", "", []], 1032, 4]}
        ]}),
        json!({"UActorComponent": [
            {"__InheritInfo": ["UObject"]},
            {"ComponentTags": [["TArray", "C", "", [["FName", "S", "", []]]], 160, 16]}
        ]}),
        json!({"USceneComponent": [
            {"__InheritInfo": ["UActorComponent", "UObject"]},
            {"RelativeLocation": [["FVector", "S", "", []], 300, 24]},
            {"AttachParent": [["USceneComponent", "C", "*", []], 324, 8]}
        ]}),
    ];

    let structs = vec![
        json!({"FVector": [
            {"X": [["double", "D", "", []], 0, 8]},
            {"Y": [["double", "D", "", []], 8, 8]},
            {"Z": [["double", "D", "", []], 16, 8]}
        ]}),
        json!({"FHitResult": [
            {"Location": [["FVector", "S", "", []], 0, 24]},
            {"HitActor": [["AActor", "C", "*", []], 24, 8]}
        ]}),
    ];

    let functions = vec![
        json!({"AActor": [
            {"K2_DestroyActor": [
                ["void", "D", "", []],
                [],
                "0x2a10",
                "Final|Native|Public|BlueprintCallable"
            ]},
            {"GetActorLocation": [
                ["FVector", "S", "", []],
                [],
                "0x2b00",
                "Final|Native|Public|BlueprintPure|Const"
            ]},
            {"K2_SetActorLocation": [
                ["bool", "D", "", []],
                [
                    [["FVector", "S", "", []], "", "NewLocation"],
                    [["bool", "D", "", []], "", "bSweep"],
                    [["FHitResult", "S", "", []], "&", "SweepHitResult"]
                ],
                "0x2c40",
                "Final|Native|Public|HasOutParms|BlueprintCallable"
            ]}
        ]}),
        json!({"APawn": [
            {"GetController": [
                ["AController", "C", "*", []],
                [],
                "0x3100",
                "Final|Native|Public|BlueprintPure|Const"
            ]}
        ]}),
    ];

    let enums = vec![
        json!({"ENetRole": [
            [
                {"ROLE_None": 0},
                {"ROLE_SimulatedProxy": 1},
                {"ROLE_AutonomousProxy": 2},
                {"ROLE_Authority": 3}
            ],
            "uint8"
        ]}),
        json!({"ECollisionChannel": [[{"ECC_WorldStatic": 0}, {"ECC_Pawn": 3}], "uint8"]}),
    ];

    let offsets = vec![
        json!(["OFFSET_GOBJECTS", "0x8a3c2f0"]),
        json!(["OFFSET_GNAMES", 145_000_000]),
        json!(["OFFSET_GWORLD", "0x8c1e7a8"]),
    ];

    RawDataset::new()
        .with_records(EntityKind::Class, classes)
        .with_records(EntityKind::Struct, structs)
        .with_records(EntityKind::Function, functions)
        .with_records(EntityKind::Enum, enums)
        .with_records(EntityKind::Offset, offsets)
}

/// Fully indexed sample dataset with default configuration
pub fn sample_dataset() -> Dataset {
    Dataset::build_sync(&sample_raw(), EngineConfig::default())
}
