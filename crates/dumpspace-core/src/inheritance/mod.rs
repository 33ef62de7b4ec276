//! Inheritance closure engine
//!
//! Direct-parent edges come from every class/struct's ancestor list; each
//! listed ancestor is treated as an independent parent edge, so multiple
//! inheritance is representable. Transitive closures are memoized for the
//! lifetime of the dataset.

mod graph;

#[cfg(test)]
mod tests;

pub use graph::{Direction, InheritanceGraph};
