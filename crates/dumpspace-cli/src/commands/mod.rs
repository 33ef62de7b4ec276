//! Command implementations

pub mod hierarchy;
pub mod scoped;
pub mod search;
pub mod stats;
pub mod types;

use anyhow::Result;
use serde::Serialize;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
