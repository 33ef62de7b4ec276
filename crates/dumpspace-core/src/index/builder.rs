use super::SearchIndexes;
use super::tokenize::{camel_words, prefixes};
use crate::config::IndexConfig;
use crate::inheritance::InheritanceGraph;
use crate::model::{Entity, EntityId};

/// Populates [`SearchIndexes`] one entity at a time
///
/// The caller decides how entities are batched; indexing an entity twice
/// leaves the indexes unchanged.
#[derive(Debug)]
pub struct IndexBuilder<'a> {
    config: &'a IndexConfig,
    graph: &'a InheritanceGraph,
    indexes: SearchIndexes,
    indexed: usize,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(config: &'a IndexConfig, graph: &'a InheritanceGraph) -> Self {
        Self {
            config,
            graph,
            indexes: SearchIndexes::default(),
            indexed: 0,
        }
    }

    pub fn index_entity(&mut self, id: EntityId, entity: &Entity) {
        self.index_name(id, entity.name());

        match entity {
            Entity::Class(class) | Entity::Struct(class) => {
                for member in &class.members {
                    self.indexes
                        .member_name
                        .insert(&member.name.to_lowercase(), id);
                    self.indexes
                        .member_type
                        .insert(&member.ty.base_name_lower(), id);
                }

                if self.config.fold_ancestor_names {
                    for ancestor in self.graph.ancestors(&class.name) {
                        self.indexes.name.insert(&ancestor.to_lowercase(), id);
                    }
                }
            }
            Entity::Function(function) => {
                for param in &function.params {
                    let type_name = param.ty.base_name_lower();
                    if !type_name.trim().is_empty() {
                        self.indexes.function_param.insert(&type_name, id);
                    }
                    if !param.name.trim().is_empty() {
                        self.indexes
                            .function_param
                            .insert(&param.name.to_lowercase(), id);
                    }
                }
            }
            Entity::Enum(enumeration) if self.config.index_enum_values => {
                for value in &enumeration.values {
                    self.indexes.name.insert(&value.name.to_lowercase(), id);
                }
            }
            Entity::Enum(_) | Entity::Offset(_) => {}
        }

        self.indexed += 1;
    }

    fn index_name(&mut self, id: EntityId, name: &str) {
        let lower = name.to_lowercase();
        if lower.is_empty() {
            return;
        }
        self.indexes.name.insert(&lower, id);

        for word in camel_words(name, self.config.min_word_len) {
            self.indexes.name.insert(&word, id);
        }
        for prefix in prefixes(&lower, self.config.prefix_min, self.config.prefix_max) {
            self.indexes.name.insert(prefix, id);
        }
    }

    /// Entities indexed so far
    pub fn indexed(&self) -> usize {
        self.indexed
    }

    pub fn finish(self) -> SearchIndexes {
        self.indexes
    }
}
