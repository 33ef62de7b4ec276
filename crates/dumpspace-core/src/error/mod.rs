//! Error types for Dumpspace
//!
//! Data-level problems in a dump (malformed records, dangling references,
//! inheritance cycles, result caps) never surface here: they degrade to
//! partial results and counters. `DumpError` covers the caller-facing
//! failures around loading, configuration and lookups.

mod constructors;
mod types;

pub use types::{DumpError, DumpResult};
