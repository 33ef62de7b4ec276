//! Dumpspace
//!
//! Reflection index and inheritance-query engine for reverse-engineered type
//! dumps. Everything lives in [`dumpspace_core`]; this crate re-exports it.

pub use dumpspace_core::*;
