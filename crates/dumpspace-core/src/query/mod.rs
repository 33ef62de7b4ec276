//! Query engine
//!
//! Searches the name, member and parameter indexes, keeps the strongest match
//! reason per entity, then ranks and caps the result.

mod engine;
mod rank;
mod types;


pub use engine::QueryEngine;
pub use types::{
    Hit, MatchDetail, MatchReason, ParamMatch, SearchFilters, SearchOptions, SearchOutcome,
};
