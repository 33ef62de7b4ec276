use super::types::{
    GroupLabel, ScopedGroup, ScopedMatch, ScopedMatchKind, ScopedOutcome, ScopedQuery,
    ScopedSearchTypes, TypeReference,
};
use crate::config::{ReferenceScope, ScopedConfig};
use crate::error::{DumpError, DumpResult};
use crate::inheritance::InheritanceGraph;
use crate::model::{ClassEntity, EntityKind};
use crate::scheduler::Scheduler;
use crate::store::EntityStore;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Collects matches up to the cap
struct Collector {
    max: usize,
    matches: Vec<ScopedMatch>,
    overflow: bool,
}

impl Collector {
    fn new(max: usize) -> Self {
        Self {
            max,
            matches: Vec::new(),
            overflow: false,
        }
    }

    fn is_full(&self) -> bool {
        self.matches.len() >= self.max
    }

    fn push(&mut self, owner: &str, kind: ScopedMatchKind, reference: Option<&TypeReference>) {
        if self.is_full() {
            self.overflow = true;
            return;
        }
        self.matches.push(ScopedMatch {
            owner: owner.to_string(),
            kind,
            reference: reference.cloned(),
        });
    }
}

/// A type reached through a member, waiting to be searched
#[derive(Debug, Clone)]
pub(super) struct PendingReference {
    pub(super) target: String,
    pub(super) reference: TypeReference,
}

/// Hop frontier in insertion order; the first reference to a target wins
#[derive(Debug, Default)]
pub(super) struct PendingQueue {
    items: Vec<PendingReference>,
    targets: HashSet<String>,
}

impl PendingQueue {
    pub(super) fn push(&mut self, hop: PendingReference) -> bool {
        if !self.targets.insert(hop.target.to_lowercase()) {
            return false;
        }
        self.items.push(hop);
        true
    }

    pub(super) fn extend(&mut self, hops: PendingQueue) {
        for hop in hops.items {
            self.push(hop);
        }
    }

    pub(super) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Take the current frontier, leaving an empty queue behind
    pub(super) fn take(&mut self) -> Vec<PendingReference> {
        self.targets.clear();
        std::mem::take(&mut self.items)
    }
}

/// One candidate type being searched
struct Candidate<'c> {
    owner: &'c str,
    class: &'c ClassEntity,
    kind: EntityKind,
    reference: Option<&'c TypeReference>,
}

/// Executes one [`ScopedQuery`] in scheduler-yielding batches
pub struct ScopedSearch<'a> {
    store: &'a EntityStore,
    graph: &'a InheritanceGraph,
    config: &'a ScopedConfig,
    scheduler: &'a dyn Scheduler,
}

impl<'a> ScopedSearch<'a> {
    pub fn new(
        store: &'a EntityStore,
        graph: &'a InheritanceGraph,
        config: &'a ScopedConfig,
        scheduler: &'a dyn Scheduler,
    ) -> Self {
        Self {
            store,
            graph,
            config,
            scheduler,
        }
    }

    #[instrument(skip(self), fields(focal = %query.focal, direction = query.direction.as_str()))]
    pub async fn run(&self, query: &ScopedQuery) -> DumpResult<ScopedOutcome> {
        let focal = self.resolve_focal(&query.focal)?;
        if !query.search_types.any() {
            return Err(DumpError::invalid_field(
                "search_types",
                "select at least one field to search",
            ));
        }

        let needle = query.query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(ScopedOutcome {
                focal,
                ..ScopedOutcome::default()
            });
        }

        let batch_size = self.config.batch_size.max(1);
        let max_depth = query.child_depth.unwrap_or(self.config.child_depth);
        let mut collector = Collector::new(query.max_results.unwrap_or(self.config.max_results));
        let mut visited: HashSet<String> = HashSet::new();
        let mut pending = PendingQueue::default();
        let mut searched = 0usize;
        let mut work_left = false;

        let mut lineage = vec![focal.clone()];
        lineage.extend(self.graph.lineage(&focal, query.direction));

        for (batch_index, batch) in lineage.chunks(batch_size).enumerate() {
            if collector.is_full() {
                work_left = true;
                break;
            }
            for name in batch {
                if collector.overflow {
                    break;
                }
                if !visited.insert(name.to_lowercase()) {
                    continue;
                }
                let Some((id, class)) = self.store.class_like(name) else {
                    continue;
                };
                let kind = self.store.get(id).map(|e| e.kind()).unwrap_or(EntityKind::Class);
                let candidate = Candidate {
                    owner: &class.name,
                    class,
                    kind,
                    reference: None,
                };
                self.search_candidate(
                    &candidate,
                    &needle,
                    query.search_types,
                    &mut collector,
                    &mut pending,
                );
                searched += 1;
            }
            debug!(batch = batch_index, matches = collector.matches.len(), "Scoped batch done");
            self.scheduler.yield_now().await;
        }

        if query.search_types.members {
            let mut depth = 1;
            while depth <= max_depth && !pending.is_empty() && !work_left {
                let frontier = pending.take();
                for batch in frontier.chunks(batch_size) {
                    if collector.is_full() {
                        work_left = true;
                        break;
                    }
                    for hop in batch {
                        if !visited.insert(hop.target.to_lowercase()) {
                            continue;
                        }
                        let Some((id, class)) = self.store.class_like(&hop.target) else {
                            continue;
                        };
                        let kind = self
                            .store
                            .get(id)
                            .map(|e| e.kind())
                            .unwrap_or(EntityKind::Class);
                        let candidate = Candidate {
                            owner: &class.name,
                            class,
                            kind,
                            reference: Some(&hop.reference),
                        };
                        let mut next = PendingQueue::default();
                        self.search_candidate(
                            &candidate,
                            &needle,
                            ScopedSearchTypes::members_only(),
                            &mut collector,
                            &mut next,
                        );
                        if depth < max_depth {
                            pending.extend(next);
                        }
                        searched += 1;
                    }
                    self.scheduler.yield_now().await;
                }
                depth += 1;
            }
        }

        let truncated = collector.overflow || (collector.is_full() && work_left);
        let total_matches = collector.matches.len();
        let groups = self.group(&focal, collector.matches);

        debug!(total_matches, searched, truncated, "Scoped search finished");
        Ok(ScopedOutcome {
            focal,
            groups,
            total_matches,
            truncated,
            searched_types: searched,
        })
    }

    fn resolve_focal(&self, name: &str) -> DumpResult<String> {
        if let Some((_, class)) = self.store.class_like(name) {
            return Ok(class.name.clone());
        }
        match EntityKind::ALL
            .into_iter()
            .find(|kind| self.store.contains(*kind, name))
        {
            Some(kind) => Err(DumpError::invalid_field(
                "focal",
                format!("'{}' is a {}, scoped search needs a class or struct", name, kind),
            )),
            None => Err(DumpError::entity_not_found("type", name)),
        }
    }

    fn search_candidate(
        &self,
        candidate: &Candidate<'_>,
        needle: &str,
        types: ScopedSearchTypes,
        collector: &mut Collector,
        pending: &mut PendingQueue,
    ) {
        let owner = candidate.owner;

        if types.members {
            for member in &candidate.class.members {
                let type_name = member.ty.display();
                let matched = member.name.to_lowercase().contains(needle)
                    || type_name.to_lowercase().contains(needle);
                if matched {
                    collector.push(
                        owner,
                        ScopedMatchKind::Member {
                            name: member.name.clone(),
                            type_name,
                            offset: member.offset,
                            size: member.size,
                        },
                        candidate.reference,
                    );
                }

                if matched || self.config.reference_scope == ReferenceScope::AllMembers {
                    let target = member.ty.referenced_type_name();
                    if !target.eq_ignore_ascii_case(owner) {
                        if let Some((_, referenced)) = self.store.class_like(target) {
                            pending.push(PendingReference {
                                target: referenced.name.clone(),
                                reference: TypeReference {
                                    referenced_from: owner.to_string(),
                                    referenced_via: member.name.clone(),
                                },
                            });
                        }
                    }
                }
            }
        }

        if types.functions || types.function_params {
            for function in self.store.functions_of(owner) {
                if types.functions && function.func_name.to_lowercase().contains(needle) {
                    collector.push(
                        owner,
                        ScopedMatchKind::Function {
                            name: function.func_name.clone(),
                        },
                        candidate.reference,
                    );
                }
                if types.function_params {
                    for param in &function.params {
                        let type_name = param.ty.display();
                        if param.name.to_lowercase().contains(needle)
                            || type_name.to_lowercase().contains(needle)
                        {
                            collector.push(
                                owner,
                                ScopedMatchKind::Param {
                                    function: function.func_name.clone(),
                                    name: param.name.clone(),
                                    type_name,
                                },
                                candidate.reference,
                            );
                        }
                    }
                }
            }
        }

        let own_name = match candidate.kind {
            EntityKind::Class => types.classes,
            EntityKind::Struct => types.structs,
            _ => false,
        };
        if own_name && owner.to_lowercase().contains(needle) {
            collector.push(
                owner,
                ScopedMatchKind::Type {
                    kind: candidate.kind,
                },
                candidate.reference,
            );
        }
    }

    /// Group by owner in first-appearance order and pick each group's label
    fn group(&self, focal: &str, matches: Vec<ScopedMatch>) -> Vec<ScopedGroup> {
        let mut groups: Vec<ScopedGroup> = Vec::new();
        for m in matches {
            match groups
                .iter_mut()
                .find(|group| group.owner.eq_ignore_ascii_case(&m.owner))
            {
                Some(group) => group.matches.push(m),
                None => groups.push(ScopedGroup {
                    owner: m.owner.clone(),
                    label: GroupLabel::Bare(m.owner.clone()),
                    matches: vec![m],
                }),
            }
        }

        for group in &mut groups {
            if group.owner.eq_ignore_ascii_case(focal) {
                continue;
            }
            let path = self.graph.path_between(focal, &group.owner);
            if path.len() > 1 {
                group.label = GroupLabel::Path(path);
            } else if let Some(reference) = group.matches.iter().find_map(|m| m.reference.clone()) {
                group.label = GroupLabel::Reference(reference);
            }
        }
        groups
    }
}
