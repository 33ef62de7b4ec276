//! Query inputs and results

use crate::model::{EntityId, EntityKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an entity matched, strongest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchReason {
    /// The entity's name equals the query
    #[serde(rename = "name")]
    NameExact,
    /// The entity's name contains the query
    NamePartial,
    /// A member name contains the query
    Member,
    /// A member's type name contains the query
    MemberType,
    /// A parameter name or type contains the query
    Param,
    /// An ancestor's name contains the query
    #[serde(rename = "inheritance-chain")]
    Inheritance,
}

impl MatchReason {
    /// Lower value wins
    pub fn priority(&self) -> u8 {
        match self {
            Self::NameExact => 0,
            Self::NamePartial => 1,
            Self::Member => 2,
            Self::MemberType => 3,
            Self::Param => 4,
            Self::Inheritance => 5,
        }
    }

    pub fn is_stronger_than(&self, other: MatchReason) -> bool {
        self.priority() < other.priority()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NameExact => "name",
            Self::NamePartial => "name-partial",
            Self::Member => "member",
            Self::MemberType => "member-type",
            Self::Param => "param",
            Self::Inheritance => "inheritance-chain",
        }
    }

    /// Name-based reason for a name compared against a lowercase query
    pub fn for_name(name_lower: &str, query_lower: &str) -> Self {
        if name_lower == query_lower {
            Self::NameExact
        } else {
            Self::NamePartial
        }
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of a parameter matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamMatch {
    Name,
    Type,
}

/// What inside an entity produced its match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "via", rename_all = "snake_case")]
pub enum MatchDetail {
    Member { name: String, type_name: String },
    MemberType { name: String, type_name: String },
    Param { name: String, type_name: String, matched: ParamMatch },
    EnumValue { name: String, value: i64 },
    Ancestor { name: String },
}

/// Entity categories taking part in a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    pub classes: bool,
    pub structs: bool,
    pub functions: bool,
    pub enums: bool,
    pub offsets: bool,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            classes: true,
            structs: true,
            functions: true,
            enums: true,
            offsets: true,
        }
    }
}

impl SearchFilters {
    /// Only the given categories
    pub fn only(kinds: &[EntityKind]) -> Self {
        Self {
            classes: kinds.contains(&EntityKind::Class),
            structs: kinds.contains(&EntityKind::Struct),
            functions: kinds.contains(&EntityKind::Function),
            enums: kinds.contains(&EntityKind::Enum),
            offsets: kinds.contains(&EntityKind::Offset),
        }
    }

    pub fn allows(&self, kind: EntityKind) -> bool {
        match kind {
            EntityKind::Class => self.classes,
            EntityKind::Struct => self.structs,
            EntityKind::Function => self.functions,
            EntityKind::Enum => self.enums,
            EntityKind::Offset => self.offsets,
        }
    }
}

/// Search behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Match member types instead of member names
    pub type_search_mode: bool,
    /// Count parameter name/type matches as hits on the owning function
    pub include_function_params: bool,
    /// Overrides the configured result cap
    pub max_results: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            type_search_mode: false,
            include_function_params: true,
            max_results: None,
        }
    }
}

/// One ranked result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hit {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Display name; qualified for functions
    pub name: String,
    pub reason: MatchReason,
    pub detail: Option<MatchDetail>,
}

/// Ranked, capped search result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub query: String,
    pub hits: Vec<Hit>,
    /// Matches found before the cap was applied
    pub total_matches: usize,
    pub truncated: bool,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Hit for an entity name, if present
    pub fn hit(&self, name: &str) -> Option<&Hit> {
        self.hits.iter().find(|hit| hit.name.eq_ignore_ascii_case(name))
    }

    /// Hits grouped per category, in category order, each keeping rank order
    pub fn grouped_by_kind(&self) -> Vec<(EntityKind, Vec<&Hit>)> {
        EntityKind::ALL
            .iter()
            .filter_map(|kind| {
                let hits: Vec<&Hit> = self.hits.iter().filter(|hit| hit.kind == *kind).collect();
                (!hits.is_empty()).then_some((*kind, hits))
            })
            .collect()
    }
}
