use crate::model::EntityId;
use std::collections::{BTreeSet, HashMap};

/// Inverted index from a lowercase term to the entities carrying it
///
/// Posting sets make re-inserting the same `(term, entity)` pair a no-op, so
/// the final contents do not depend on insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermIndex {
    terms: HashMap<String, BTreeSet<EntityId>>,
}

impl TermIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` under `term`; empty terms are ignored
    pub fn insert(&mut self, term: &str, id: EntityId) {
        if term.is_empty() {
            return;
        }
        match self.terms.get_mut(term) {
            Some(postings) => {
                postings.insert(id);
            }
            None => {
                self.terms.insert(term.to_string(), BTreeSet::from([id]));
            }
        }
    }

    pub fn get(&self, term: &str) -> Option<&BTreeSet<EntityId>> {
        self.terms.get(term)
    }

    pub fn contains(&self, term: &str, id: EntityId) -> bool {
        self.get(term).is_some_and(|postings| postings.contains(&id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<EntityId>)> {
        self.terms.iter().map(|(term, ids)| (term.as_str(), ids))
    }

    /// Entities under every term accepted by `matches`
    pub fn collect_matching(&self, matches: impl Fn(&str) -> bool) -> BTreeSet<EntityId> {
        self.iter()
            .filter(|&(term, _)| matches(term))
            .flat_map(|(_, ids)| ids.iter().copied())
            .collect()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn posting_count(&self) -> usize {
        self.terms.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
