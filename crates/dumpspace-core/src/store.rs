//! Entity store with per-category, case-insensitive name lookups

use crate::model::{ClassEntity, Entity, EntityId, EntityKind, FunctionEntity};
use std::collections::HashMap;

/// All entities of one loaded dataset
///
/// Names are unique within a category but not across categories, so each
/// category keeps its own lowercase name table. Functions are keyed by
/// `owner::function`.
#[derive(Debug, Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
    by_name: HashMap<EntityKind, HashMap<String, EntityId>>,
    functions_by_class: HashMap<String, Vec<EntityId>>,
    duplicates: usize,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity, replacing an earlier one with the same key
    ///
    /// Returns the id the entity is stored under.
    pub fn insert(&mut self, entity: Entity) -> EntityId {
        let kind = entity.kind();
        let key = Self::key_of(&entity);

        if let Some(&existing) = self.by_name.get(&kind).and_then(|names| names.get(&key)) {
            self.duplicates += 1;
            self.entities[existing.index()] = entity;
            return existing;
        }

        let id = EntityId(self.entities.len() as u32);
        if let Entity::Function(function) = &entity {
            self.functions_by_class
                .entry(function.owning_class.to_lowercase())
                .or_default()
                .push(id);
        }
        self.by_name.entry(kind).or_default().insert(key, id);
        self.entities.push(entity);
        id
    }

    fn key_of(entity: &Entity) -> String {
        match entity {
            Entity::Function(function) => function.qualified_name().to_lowercase(),
            other => other.name().to_lowercase(),
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    /// Look up an entity of one category by name, ignoring case
    pub fn find(&self, kind: EntityKind, name: &str) -> Option<EntityId> {
        self.by_name
            .get(&kind)
            .and_then(|names| names.get(&name.to_lowercase()))
            .copied()
    }

    /// Class first, then struct
    pub fn find_type(&self, name: &str) -> Option<EntityId> {
        self.find(EntityKind::Class, name)
            .or_else(|| self.find(EntityKind::Struct, name))
    }

    /// Class/struct payload for a name, class first
    pub fn class_like(&self, name: &str) -> Option<(EntityId, &ClassEntity)> {
        let id = self.find_type(name)?;
        self.get(id)
            .and_then(Entity::as_class)
            .map(|class| (id, class))
    }

    pub fn contains(&self, kind: EntityKind, name: &str) -> bool {
        self.find(kind, name).is_some()
    }

    /// Functions whose owning class has this name, in ingestion order
    pub fn functions_of(&self, class_name: &str) -> Vec<&FunctionEntity> {
        self.functions_by_class
            .get(&class_name.to_lowercase())
            .into_iter()
            .flatten()
            .filter_map(|id| self.get(*id).and_then(Entity::as_function))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(i, entity)| (EntityId(i as u32), entity))
    }

    /// All classes and structs
    pub fn class_likes(&self) -> impl Iterator<Item = (EntityId, &ClassEntity)> {
        self.iter()
            .filter_map(|(id, entity)| entity.as_class().map(|class| (id, class)))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.by_name.get(&kind).map(HashMap::len).unwrap_or(0)
    }

    /// Entities that replaced an earlier one with the same key
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OffsetEntity, TypeCategory, TypeDescriptor};
    use std::collections::BTreeSet;

    fn class(name: &str) -> Entity {
        Entity::Class(ClassEntity {
            name: name.to_string(),
            members: Vec::new(),
            direct_ancestors: Vec::new(),
        })
    }

    fn function(owner: &str, name: &str) -> Entity {
        Entity::Function(FunctionEntity {
            owning_class: owner.to_string(),
            func_name: name.to_string(),
            return_type: TypeDescriptor::named("void", TypeCategory::Primitive),
            params: Vec::new(),
            offset: 0,
            flags: BTreeSet::new(),
        })
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_per_kind() {
        let mut store = EntityStore::new();
        let class_id = store.insert(class("UObject"));
        let offset_id = store.insert(Entity::Offset(OffsetEntity {
            name: "UObject".to_string(),
            value: 0x10,
        }));

        assert_ne!(class_id, offset_id);
        assert_eq!(store.find(EntityKind::Class, "uobject"), Some(class_id));
        assert_eq!(store.find(EntityKind::Offset, "UOBJECT"), Some(offset_id));
        assert_eq!(store.find(EntityKind::Struct, "UObject"), None);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_duplicate_replaces_in_place() {
        let mut store = EntityStore::new();
        let first = store.insert(class("AActor"));
        let second = store.insert(class("AActor"));
        assert_eq!(first, second);
        assert_eq!(store.len(), 1);
        assert_eq!(store.duplicates(), 1);
    }

    #[test]
    fn test_functions_grouped_by_owner() {
        let mut store = EntityStore::new();
        store.insert(function("AActor", "GetOwner"));
        store.insert(function("AActor", "SetOwner"));
        store.insert(function("APawn", "GetController"));

        let names: Vec<_> = store
            .functions_of("aactor")
            .into_iter()
            .map(|f| f.func_name.as_str())
            .collect();
        assert_eq!(names, vec!["GetOwner", "SetOwner"]);
        assert!(store.find(EntityKind::Function, "AActor::GetOwner").is_some());
        assert!(store.functions_of("UObject").is_empty());
    }
}
