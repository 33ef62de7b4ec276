//! Link resolution for type names shown in rendered types

use crate::model::{EntityId, EntityKind};
use crate::store::EntityStore;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Identifiers that look like engine type names (`UObject`, `FVector`,
/// `AActor`, `ENetRole`, `TArray`)
static TYPE_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[UFAET][A-Z][A-Za-z0-9_]*\b").expect("type name pattern is valid")
});

/// Entity a type name links to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkTarget {
    pub id: EntityId,
    pub kind: EntityKind,
    pub name: String,
}

/// Piece of a rendered type string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "segment", rename_all = "snake_case")]
pub enum LinkSegment {
    Text { text: String },
    Link { text: String, target: LinkTarget },
}

/// Resolve a type name against classes, then structs, then enums
pub fn resolve_link(store: &EntityStore, name: &str) -> Option<LinkTarget> {
    [EntityKind::Class, EntityKind::Struct, EntityKind::Enum]
        .into_iter()
        .find_map(|kind| {
            let id = store.find(kind, name)?;
            let entity = store.get(id)?;
            Some(LinkTarget {
                id,
                kind,
                name: entity.name().to_string(),
            })
        })
}

/// Split a rendered type such as `TMap<FName, UObject*>` into plain text and
/// links to known types
pub fn linkify(store: &EntityStore, text: &str) -> Vec<LinkSegment> {
    let mut segments = Vec::new();
    let mut plain_start = 0;

    for found in TYPE_NAME_PATTERN.find_iter(text) {
        let Some(target) = resolve_link(store, found.as_str()) else {
            continue;
        };
        if found.start() > plain_start {
            segments.push(LinkSegment::Text {
                text: text[plain_start..found.start()].to_string(),
            });
        }
        segments.push(LinkSegment::Link {
            text: found.as_str().to_string(),
            target,
        });
        plain_start = found.end();
    }

    if plain_start < text.len() {
        segments.push(LinkSegment::Text {
            text: text[plain_start..].to_string(),
        });
    }
    segments
}
