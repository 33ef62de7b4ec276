use super::rank::{RankKey, normalize_reason};
use super::types::{
    Hit, MatchDetail, MatchReason, ParamMatch, SearchFilters, SearchOptions, SearchOutcome,
};
use crate::config::{IndexConfig, SearchConfig};
use crate::index::SearchIndexes;
use crate::index::tokenize::char_prefix;
use crate::inheritance::InheritanceGraph;
use crate::model::{ClassEntity, Entity, EntityId, FunctionEntity};
use crate::store::EntityStore;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

#[derive(Debug)]
struct Candidate {
    reason: MatchReason,
    detail: Option<MatchDetail>,
}

/// Best reason seen so far per entity
#[derive(Debug, Default)]
struct CandidateSet {
    best: BTreeMap<EntityId, Candidate>,
}

impl CandidateSet {
    /// Keep the stronger of the existing and the offered reason
    fn offer(
        &mut self,
        id: EntityId,
        reason: MatchReason,
        detail: impl FnOnce() -> Option<MatchDetail>,
    ) {
        match self.best.get_mut(&id) {
            Some(existing) if !reason.is_stronger_than(existing.reason) => {}
            Some(existing) => {
                existing.reason = reason;
                existing.detail = detail();
            }
            None => {
                self.best.insert(
                    id,
                    Candidate {
                        reason,
                        detail: detail(),
                    },
                );
            }
        }
    }
}

/// Read-only query executor over one dataset's store and indexes
pub struct QueryEngine<'a> {
    store: &'a EntityStore,
    graph: &'a InheritanceGraph,
    indexes: &'a SearchIndexes,
    index_config: &'a IndexConfig,
    config: &'a SearchConfig,
}

impl<'a> QueryEngine<'a> {
    pub fn new(
        store: &'a EntityStore,
        graph: &'a InheritanceGraph,
        indexes: &'a SearchIndexes,
        index_config: &'a IndexConfig,
        config: &'a SearchConfig,
    ) -> Self {
        Self {
            store,
            graph,
            indexes,
            index_config,
            config,
        }
    }

    /// Run a ranked, capped multi-facet search
    #[instrument(skip(self, filters, options), fields(type_mode = options.type_search_mode))]
    pub fn search(
        &self,
        text: &str,
        filters: &SearchFilters,
        options: &SearchOptions,
    ) -> SearchOutcome {
        let query = text.trim().to_lowercase();
        if query.is_empty() {
            return SearchOutcome::default();
        }

        let mut candidates = CandidateSet::default();
        self.collect_names(&query, filters, &mut candidates);
        if options.type_search_mode {
            self.collect_member_types(&query, filters, &mut candidates);
        } else {
            self.collect_member_names(&query, filters, &mut candidates);
        }
        if options.include_function_params && filters.functions {
            self.collect_params(&query, options.type_search_mode, &mut candidates);
        }

        let mut ranked: Vec<(RankKey, Hit)> = candidates
            .best
            .into_iter()
            .filter_map(|(id, candidate)| {
                let entity = self.store.get(id)?;
                let name_lower = entity.name().to_lowercase();
                let reason = normalize_reason(entity.kind(), &name_lower, &query, candidate.reason);
                let hit = Hit {
                    id,
                    kind: entity.kind(),
                    name: entity.display_name(),
                    reason,
                    detail: candidate.detail,
                };
                Some((RankKey::new(id, &name_lower, &query, reason), hit))
            })
            .collect();
        ranked.sort_by(|a, b| a.0.cmp(&b.0));

        let total_matches = ranked.len();
        let cap = options.max_results.unwrap_or(self.config.max_results);
        let truncated = total_matches > cap;
        let hits: Vec<Hit> = ranked.into_iter().take(cap).map(|(_, hit)| hit).collect();

        debug!(query = %query, total_matches, returned = hits.len(), truncated, "Search finished");
        SearchOutcome {
            query,
            hits,
            total_matches,
            truncated,
        }
    }

    /// Prefix bucket plus bidirectional containment over name-index terms
    fn collect_names(&self, query: &str, filters: &SearchFilters, candidates: &mut CandidateSet) {
        let min_len = self.config.min_query_len;
        let long_query = query.chars().count() >= min_len;

        let mut ids = if long_query {
            let bucket = char_prefix(query, self.index_config.prefix_max);
            self.indexes.name.get(bucket).cloned().unwrap_or_default()
        } else {
            Default::default()
        };
        ids.extend(self.indexes.name.collect_matching(|term| {
            (long_query && query.starts_with(term))
                || (term.chars().count() >= min_len && term.contains(query))
        }));

        for id in ids {
            let Some(entity) = self.store.get(id) else {
                continue;
            };
            if !filters.allows(entity.kind()) {
                continue;
            }

            let name_lower = entity.name().to_lowercase();
            if name_lower.contains(query) {
                candidates.offer(id, MatchReason::for_name(&name_lower, query), || None);
                continue;
            }

            match entity {
                Entity::Class(class) | Entity::Struct(class) => {
                    if let Some(ancestor) = self.matching_ancestor(class, query) {
                        candidates.offer(id, MatchReason::Inheritance, || {
                            Some(MatchDetail::Ancestor { name: ancestor })
                        });
                    }
                }
                Entity::Enum(enumeration) => {
                    if let Some(value) = enumeration
                        .values
                        .iter()
                        .find(|v| v.name.to_lowercase().contains(query))
                    {
                        candidates.offer(id, MatchReason::NamePartial, || {
                            Some(MatchDetail::EnumValue {
                                name: value.name.clone(),
                                value: value.value,
                            })
                        });
                    }
                }
                Entity::Function(_) | Entity::Offset(_) => {}
            }
        }
    }

    fn matching_ancestor(&self, class: &ClassEntity, query: &str) -> Option<String> {
        self.graph
            .ancestors(&class.name)
            .into_iter()
            .find(|ancestor| ancestor.to_lowercase().contains(query))
    }

    fn collect_member_names(
        &self,
        query: &str,
        filters: &SearchFilters,
        candidates: &mut CandidateSet,
    ) {
        let ids = self.indexes.member_name.collect_matching(|term| term.contains(query));
        for (id, class) in self.class_likes(ids, filters) {
            candidates.offer(id, MatchReason::Member, || {
                class
                    .members
                    .iter()
                    .find(|m| m.name.to_lowercase().contains(query))
                    .map(|m| MatchDetail::Member {
                        name: m.name.clone(),
                        type_name: m.ty.display(),
                    })
            });
        }
    }

    fn collect_member_types(
        &self,
        query: &str,
        filters: &SearchFilters,
        candidates: &mut CandidateSet,
    ) {
        let ids = self.indexes.member_type.collect_matching(|term| term.contains(query));
        for (id, class) in self.class_likes(ids, filters) {
            candidates.offer(id, MatchReason::MemberType, || {
                class
                    .members
                    .iter()
                    .find(|m| m.ty.base_name_lower().contains(query))
                    .map(|m| MatchDetail::MemberType {
                        name: m.name.clone(),
                        type_name: m.ty.display(),
                    })
            });
        }
    }

    fn collect_params(&self, query: &str, type_mode: bool, candidates: &mut CandidateSet) {
        let ids = self.indexes.function_param.collect_matching(|term| term.contains(query));
        for id in ids {
            let Some(function) = self.store.get(id).and_then(Entity::as_function) else {
                continue;
            };
            // The param index mixes names and types; keep only the side the mode asks for.
            if let Some(detail) = param_detail(function, query, type_mode) {
                candidates.offer(id, MatchReason::Param, || Some(detail));
            }
        }
    }

    fn class_likes(
        &self,
        ids: impl IntoIterator<Item = EntityId>,
        filters: &SearchFilters,
    ) -> Vec<(EntityId, &'a ClassEntity)> {
        let store = self.store;
        ids.into_iter()
            .filter_map(|id| {
                let entity = store.get(id)?;
                if !entity.kind().is_type_like() || !filters.allows(entity.kind()) {
                    return None;
                }
                entity.as_class().map(|class| (id, class))
            })
            .collect()
    }
}

/// First parameter whose type base name (type mode) or name contains the query
fn param_detail(function: &FunctionEntity, query: &str, type_mode: bool) -> Option<MatchDetail> {
    function
        .params
        .iter()
        .find(|param| {
            if type_mode {
                param.ty.base_name_lower().contains(query)
            } else {
                param.name.to_lowercase().contains(query)
            }
        })
        .map(|param| MatchDetail::Param {
            name: param.name.clone(),
            type_name: param.ty.display(),
            matched: if type_mode {
                ParamMatch::Type
            } else {
                ParamMatch::Name
            },
        })
}
