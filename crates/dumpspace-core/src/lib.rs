//! Dumpspace Core Library
//!
//! Loads reflection dumps (classes, structs, functions, enums and offsets),
//! normalizes them into a uniform entity model and answers name, member and
//! inheritance queries against an immutable, fully indexed dataset.

pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod index;
pub mod inheritance;
pub mod links;
pub mod model;
pub mod normalize;
pub mod progress;
pub mod query;
pub mod scheduler;
pub mod scoped;
pub mod store;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::{
    EngineConfig, IndexConfig, LoggingConfig, ReferenceScope, ScopedConfig, SearchConfig,
    load_from_file,
};
pub use dataset::{Dataset, DatasetStats, InheritedMember};
pub use engine::{LoadState, ReflectionEngine};
pub use error::{DumpError, DumpResult};
pub use inheritance::{Direction, InheritanceGraph};
pub use links::{LinkSegment, LinkTarget};
pub use model::*;
pub use normalize::{NormalizeReport, RawDataset, RecordIssue};
pub use progress::{BuildPhase, BuildProgress, NoopProgressSink, ProgressSink};
pub use query::{Hit, MatchDetail, MatchReason, SearchFilters, SearchOptions, SearchOutcome};
pub use scheduler::{InlineScheduler, Scheduler, TokioScheduler};
pub use scoped::{
    GroupLabel, ScopedGroup, ScopedMatch, ScopedMatchKind, ScopedOutcome, ScopedQuery,
    ScopedSearchTypes, TypeReference,
};
pub use store::EntityStore;
