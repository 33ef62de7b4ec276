//! Engine tuning knobs
//!
//! Every field has a default, so a config file only needs to name the
//! values it overrides.

use super::logging_config::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Index build settings
    pub index: IndexConfig,
    /// Global search settings
    pub search: SearchConfig,
    /// Scoped (inheritance-restricted) search settings
    pub scoped: ScopedConfig,
    /// Logging settings, consumed by the host when it installs a subscriber
    pub logging: LoggingConfig,
}

/// Index build configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Entities processed between two yield points
    pub batch_size: usize,
    /// Shortest camel-case word that gets its own name-index term
    pub min_word_len: usize,
    /// Shortest name prefix stored in the name index
    pub prefix_min: usize,
    /// Longest name prefix stored in the name index
    pub prefix_max: usize,
    /// Index every class/struct under the names of its whole ancestor chain
    pub fold_ancestor_names: bool,
    /// Index enums under the names of their values
    pub index_enum_values: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            batch_size: 500,
            min_word_len: 2,
            prefix_min: 3,
            prefix_max: 6,
            fold_ancestor_names: true,
            index_enum_values: true,
        }
    }
}

/// Global search configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Result cap applied when the caller does not pass one
    pub max_results: usize,
    /// Queries shorter than this skip the prefix-bucket lookup
    pub min_query_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 1000,
            min_query_len: 3,
        }
    }
}

/// Which members of a searched class may open a hop into a referenced type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceScope {
    /// Only members that matched the query
    #[default]
    MatchingMembers,
    /// Every member whose type resolves to a known class or struct
    AllMembers,
}

/// Scoped search configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopedConfig {
    /// Candidate classes processed between two yield points
    pub batch_size: usize,
    /// Result cap applied when the caller does not pass one
    pub max_results: usize,
    /// How many type-reference hops are followed beyond the lineage
    pub child_depth: u32,
    /// Which members contribute type references
    pub reference_scope: ReferenceScope,
}

impl Default for ScopedConfig {
    fn default() -> Self {
        Self {
            batch_size: 50,
            max_results: 500,
            child_depth: 1,
            reference_scope: ReferenceScope::default(),
        }
    }
}
