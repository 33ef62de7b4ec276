//! Scoped search
//!
//! Restricts matching to a focal type and its ancestors and/or descendants,
//! optionally following member types into referenced classes and structs.

mod engine;
mod types;


pub use engine::ScopedSearch;
pub use types::{
    GroupLabel, ScopedGroup, ScopedMatch, ScopedMatchKind, ScopedOutcome, ScopedQuery,
    ScopedSearchTypes, TypeReference,
};
