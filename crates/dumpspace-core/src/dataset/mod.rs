//! One fully built, immutable dataset generation
//!
//! A [`Dataset`] owns the entity store, the inheritance graph and the search
//! indexes of one load. Every query operation is a method here; a reload
//! builds a new `Dataset` and replaces the old one wholesale.

mod builder;


pub(crate) use builder::{BuildContext, build_dataset};

use crate::config::EngineConfig;
use crate::error::{DumpError, DumpResult};
use crate::index::{IndexBuilder, IndexStats, SearchIndexes};
use crate::inheritance::{Direction, InheritanceGraph};
use crate::links::{self, LinkSegment, LinkTarget};
use crate::model::{Entity, EntityId, EntityKind, FunctionEntity, Member};
use crate::normalize::{NormalizeReport, Normalizer, RawDataset};
use crate::query::{QueryEngine, SearchFilters, SearchOptions, SearchOutcome};
use crate::scheduler::{InlineScheduler, Scheduler};
use crate::scoped::{ScopedOutcome, ScopedQuery, ScopedSearch};
use crate::store::EntityStore;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

/// Member listed on a type, with the type that declares it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InheritedMember<'a> {
    pub declared_in: &'a str,
    pub member: &'a Member,
}

/// Size and health figures for one dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub generation: u64,
    pub entities: BTreeMap<EntityKind, usize>,
    pub total_entities: usize,
    pub inheritance_nodes: usize,
    pub index: IndexStats,
    pub skipped_records: usize,
    pub duplicate_records: usize,
}

pub struct Dataset {
    generation: u64,
    config: EngineConfig,
    store: EntityStore,
    report: NormalizeReport,
    graph: InheritanceGraph,
    indexes: SearchIndexes,
    scheduler: Arc<dyn Scheduler>,
}

impl fmt::Debug for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dataset")
            .field("generation", &self.generation)
            .field("entities", &self.store.len())
            .field("skipped", &self.report.total_skipped())
            .finish_non_exhaustive()
    }
}

impl Dataset {
    pub(crate) fn from_parts(
        generation: u64,
        config: EngineConfig,
        store: EntityStore,
        report: NormalizeReport,
        graph: InheritanceGraph,
        indexes: SearchIndexes,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        Self {
            generation,
            config,
            store,
            report,
            graph,
            indexes,
            scheduler,
        }
    }

    /// Build a dataset in one go, without yielding or progress reporting
    pub fn build_sync(raw: &RawDataset, config: EngineConfig) -> Self {
        let (store, report) = Normalizer::normalize_all(raw);
        let graph = InheritanceGraph::from_store(&store);
        let mut builder = IndexBuilder::new(&config.index, &graph);
        for (id, entity) in store.iter() {
            builder.index_entity(id, entity);
        }
        let indexes = builder.finish();
        Self::from_parts(0, config, store, report, graph, indexes, Arc::new(InlineScheduler))
    }

    /// Load generation that produced this dataset
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn report(&self) -> &NormalizeReport {
        &self.report
    }

    pub fn graph(&self) -> &InheritanceGraph {
        &self.graph
    }

    pub fn indexes(&self) -> &SearchIndexes {
        &self.indexes
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.store.get(id)
    }

    pub fn find(&self, kind: EntityKind, name: &str) -> Option<&Entity> {
        self.store.find(kind, name).and_then(|id| self.store.get(id))
    }

    /// Ranked multi-facet search over the whole dataset
    pub fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
        options: &SearchOptions,
    ) -> SearchOutcome {
        QueryEngine::new(
            &self.store,
            &self.graph,
            &self.indexes,
            &self.config.index,
            &self.config.search,
        )
        .search(query, filters, options)
    }

    /// Search restricted to a focal type's inheritance neighbourhood
    pub async fn scoped_search(&self, query: &ScopedQuery) -> DumpResult<ScopedOutcome> {
        ScopedSearch::new(
            &self.store,
            &self.graph,
            &self.config.scoped,
            self.scheduler.as_ref(),
        )
        .run(query)
        .await
    }

    pub fn ancestors(&self, name: &str) -> BTreeSet<String> {
        self.graph.ancestors(name)
    }

    pub fn descendants(&self, name: &str) -> BTreeSet<String> {
        self.graph.descendants(name)
    }

    pub fn path_between(&self, a: &str, b: &str) -> Vec<String> {
        self.graph.path_between(a, b)
    }

    pub fn direct_children(&self, name: &str) -> Vec<String> {
        self.graph.direct_children(name)
    }

    /// Linear display chain `[root, ..., parent, name]`
    ///
    /// Starts from the type's own ancestor list and keeps going from the last
    /// listed ancestor while that one lists ancestors of its own.
    pub fn display_chain(&self, name: &str) -> DumpResult<Vec<String>> {
        let (_, class) = self
            .store
            .class_like(name)
            .ok_or_else(|| DumpError::entity_not_found("type", name))?;

        let mut chain = vec![class.name.clone()];
        let mut seen = HashSet::from([class.name.to_lowercase()]);
        let mut ancestors = class.direct_ancestors.clone();

        while !ancestors.is_empty() {
            let mut next = Vec::new();
            for ancestor in &ancestors {
                if !seen.insert(ancestor.to_lowercase()) {
                    continue;
                }
                chain.push(ancestor.clone());
                next = self
                    .store
                    .class_like(ancestor)
                    .map(|(_, c)| c.direct_ancestors.clone())
                    .unwrap_or_default();
            }
            ancestors = next;
        }

        chain.reverse();
        Ok(chain)
    }

    /// Own members followed by inherited ones, nearest ancestor first
    ///
    /// A member name already declared closer to the type hides the same name
    /// further up.
    pub fn members_with_inherited(&self, name: &str) -> DumpResult<Vec<InheritedMember<'_>>> {
        let (_, class) = self
            .store
            .class_like(name)
            .ok_or_else(|| DumpError::entity_not_found("type", name))?;

        let mut declared = HashSet::new();
        let mut members = Vec::new();
        let owners = std::iter::once(class.name.clone())
            .chain(self.graph.lineage(&class.name, Direction::Up));

        for owner in owners {
            let Some((_, declaring)) = self.store.class_like(&owner) else {
                continue;
            };
            for member in &declaring.members {
                if declared.insert(member.name.to_lowercase()) {
                    members.push(InheritedMember {
                        declared_in: &declaring.name,
                        member,
                    });
                }
            }
        }
        Ok(members)
    }

    pub fn functions_of(&self, class_name: &str) -> Vec<&FunctionEntity> {
        self.store.functions_of(class_name)
    }

    pub fn resolve_link(&self, name: &str) -> Option<LinkTarget> {
        links::resolve_link(&self.store, name)
    }

    pub fn linkify(&self, type_text: &str) -> Vec<LinkSegment> {
        links::linkify(&self.store, type_text)
    }

    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            generation: self.generation,
            entities: EntityKind::ALL
                .iter()
                .map(|kind| (*kind, self.store.count(*kind)))
                .collect(),
            total_entities: self.store.len(),
            inheritance_nodes: self.graph.node_count(),
            index: self.indexes.stats(),
            skipped_records: self.report.total_skipped(),
            duplicate_records: self.report.duplicates,
        }
    }
}
