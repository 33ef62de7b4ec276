//! Scoped search inputs and results

use crate::inheritance::Direction;
use crate::model::EntityKind;
use serde::{Deserialize, Serialize};

/// Fields examined on every candidate type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopedSearchTypes {
    /// Member names and member types
    pub members: bool,
    /// Names of functions owned by the type
    pub functions: bool,
    /// Parameter names and types of functions owned by the type
    pub function_params: bool,
    /// The candidate's own name, when it is a class
    pub classes: bool,
    /// The candidate's own name, when it is a struct
    pub structs: bool,
}

impl Default for ScopedSearchTypes {
    fn default() -> Self {
        Self {
            members: true,
            functions: true,
            function_params: false,
            classes: false,
            structs: false,
        }
    }
}

impl ScopedSearchTypes {
    pub fn members_only() -> Self {
        Self {
            members: true,
            functions: false,
            function_params: false,
            classes: false,
            structs: false,
        }
    }

    pub fn all() -> Self {
        Self {
            members: true,
            functions: true,
            function_params: true,
            classes: true,
            structs: true,
        }
    }

    pub fn any(&self) -> bool {
        self.members || self.functions || self.function_params || self.classes || self.structs
    }
}

/// Search restricted to the inheritance neighbourhood of a focal type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedQuery {
    pub focal: String,
    pub direction: Direction,
    pub query: String,
    pub search_types: ScopedSearchTypes,
    /// Overrides the configured result cap
    pub max_results: Option<usize>,
    /// Overrides the configured type-reference hop budget
    pub child_depth: Option<u32>,
}

impl ScopedQuery {
    pub fn new(focal: impl Into<String>, direction: Direction, query: impl Into<String>) -> Self {
        Self {
            focal: focal.into(),
            direction,
            query: query.into(),
            search_types: ScopedSearchTypes::default(),
            max_results: None,
            child_depth: None,
        }
    }

    pub fn with_search_types(mut self, search_types: ScopedSearchTypes) -> Self {
        self.search_types = search_types;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn with_child_depth(mut self, child_depth: u32) -> Self {
        self.child_depth = Some(child_depth);
        self
    }
}

/// Member through which a type outside the lineage was reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeReference {
    pub referenced_from: String,
    pub referenced_via: String,
}

/// What matched inside a candidate type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "match", rename_all = "snake_case")]
pub enum ScopedMatchKind {
    Member {
        name: String,
        type_name: String,
        offset: u64,
        size: u64,
    },
    Function {
        name: String,
    },
    Param {
        function: String,
        name: String,
        type_name: String,
    },
    /// The candidate's own name matched
    Type {
        kind: EntityKind,
    },
}

/// One match, attributed to the type it was found in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopedMatch {
    pub owner: String,
    #[serde(flatten)]
    pub kind: ScopedMatchKind,
    pub reference: Option<TypeReference>,
}

/// Heading shown for a group of matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "label", content = "value", rename_all = "snake_case")]
pub enum GroupLabel {
    /// Inheritance path from the focal type to the owner
    Path(Vec<String>),
    /// Member edge that led to a type outside the lineage
    Reference(TypeReference),
    /// The owner's bare name
    Bare(String),
}

/// Matches of one owning type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopedGroup {
    pub owner: String,
    pub label: GroupLabel,
    pub matches: Vec<ScopedMatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScopedOutcome {
    pub focal: String,
    /// Groups in order of first appearance
    pub groups: Vec<ScopedGroup>,
    pub total_matches: usize,
    /// The cap was reached before every candidate was examined
    pub truncated: bool,
    /// Candidate types whose fields were examined
    pub searched_types: usize,
}

impl ScopedOutcome {
    pub fn group(&self, owner: &str) -> Option<&ScopedGroup> {
        self.groups
            .iter()
            .find(|group| group.owner.eq_ignore_ascii_case(owner))
    }

    pub fn matches(&self) -> impl Iterator<Item = &ScopedMatch> {
        self.groups.iter().flat_map(|group| group.matches.iter())
    }
}
