//! Inverted search indexes
//!
//! Four indexes, all keyed by lowercase term:
//!
//! - **name**: full names, camel-case words, 3..=6 character prefixes, the
//!   names of every ancestor of a class/struct and enum value names
//! - **member name**: member name to owning class/struct
//! - **member type**: base type name of a member to owning class/struct
//! - **function param**: parameter type base name and parameter name to the
//!   owning function

mod builder;
mod term_index;
pub mod tokenize;


pub use builder::IndexBuilder;
pub use term_index::TermIndex;

use serde::Serialize;

/// The four indexes of one dataset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndexes {
    pub name: TermIndex,
    pub member_name: TermIndex,
    pub member_type: TermIndex,
    pub function_param: TermIndex,
}

/// Term and posting counts per index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub name_terms: usize,
    pub member_name_terms: usize,
    pub member_type_terms: usize,
    pub function_param_terms: usize,
    pub postings: usize,
}

impl SearchIndexes {
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            name_terms: self.name.term_count(),
            member_name_terms: self.member_name.term_count(),
            member_type_terms: self.member_type.term_count(),
            function_param_terms: self.function_param.term_count(),
            postings: self.name.posting_count()
                + self.member_name.posting_count()
                + self.member_type.posting_count()
                + self.function_param.posting_count(),
        }
    }
}
