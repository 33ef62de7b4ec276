//! Entity normalizer
//!
//! Turns the five raw per-category collections of a dump into the uniform
//! entity model. Records are validated one at a time; a malformed record is
//! skipped and counted in the [`NormalizeReport`], never failing the load.

pub mod records;

#[cfg(test)]
mod tests;

use crate::error::{DumpError, DumpResult};
use crate::model::{Entity, EntityKind};
use crate::store::EntityStore;
use records::Malformed;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Skipped records whose reason is kept verbatim in the report
pub const MAX_RECORDED_ISSUES: usize = 64;

/// Raw, already-parsed collections as handed over by a dataset loader
#[derive(Debug, Clone, Default)]
pub struct RawDataset {
    pub classes: Vec<Value>,
    pub structs: Vec<Value>,
    pub functions: Vec<Value>,
    pub enums: Vec<Value>,
    pub offsets: Vec<Value>,
}

impl RawDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records of one category
    pub fn records(&self, kind: EntityKind) -> &[Value] {
        match kind {
            EntityKind::Class => &self.classes,
            EntityKind::Struct => &self.structs,
            EntityKind::Function => &self.functions,
            EntityKind::Enum => &self.enums,
            EntityKind::Offset => &self.offsets,
        }
    }

    fn records_mut(&mut self, kind: EntityKind) -> &mut Vec<Value> {
        match kind {
            EntityKind::Class => &mut self.classes,
            EntityKind::Struct => &mut self.structs,
            EntityKind::Function => &mut self.functions,
            EntityKind::Enum => &mut self.enums,
            EntityKind::Offset => &mut self.offsets,
        }
    }

    /// Attach one dump document, either `{"data": [...]}` or a bare array
    pub fn set_document(&mut self, kind: EntityKind, document: Value) -> DumpResult<()> {
        let records = match document {
            Value::Array(records) => records,
            Value::Object(mut object) => match object.remove("data") {
                Some(Value::Array(records)) => records,
                _ => {
                    return Err(DumpError::invalid_field(
                        "data",
                        format!("{} document has no 'data' array", kind),
                    ));
                }
            },
            _ => {
                return Err(DumpError::invalid_input(format!(
                    "{} document is neither an object nor an array",
                    kind
                )));
            }
        };
        *self.records_mut(kind) = records;
        Ok(())
    }

    /// Builder-style variant of [`RawDataset::set_document`] for bare record lists
    pub fn with_records(mut self, kind: EntityKind, records: Vec<Value>) -> Self {
        *self.records_mut(kind) = records;
        self
    }

    pub fn total_records(&self) -> usize {
        EntityKind::ALL
            .iter()
            .map(|kind| self.records(*kind).len())
            .sum()
    }
}

/// One skipped record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordIssue {
    pub kind: EntityKind,
    /// Name of the record when it could be read
    pub key: Option<String>,
    pub reason: String,
}

/// Outcome of normalizing one dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    pub accepted: BTreeMap<EntityKind, usize>,
    pub skipped: BTreeMap<EntityKind, usize>,
    /// First [`MAX_RECORDED_ISSUES`] skipped records
    pub issues: Vec<RecordIssue>,
    /// Records that replaced an earlier one with the same name
    pub duplicates: usize,
}

impl NormalizeReport {
    pub fn total_accepted(&self) -> usize {
        self.accepted.values().sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }

    pub fn skipped_of(&self, kind: EntityKind) -> usize {
        self.skipped.get(&kind).copied().unwrap_or(0)
    }

    fn record_skip(&mut self, issue: RecordIssue) {
        warn!(
            kind = %issue.kind,
            key = issue.key.as_deref().unwrap_or("<unnamed>"),
            reason = %issue.reason,
            "Skipping malformed record"
        );
        *self.skipped.entry(issue.kind).or_default() += 1;
        if self.issues.len() < MAX_RECORDED_ISSUES {
            self.issues.push(issue);
        }
    }
}

/// Incremental normalizer; feed records with [`Normalizer::ingest`]
#[derive(Debug, Default)]
pub struct Normalizer {
    store: EntityStore,
    report: NormalizeReport,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a whole dataset without yielding
    pub fn normalize_all(raw: &RawDataset) -> (EntityStore, NormalizeReport) {
        let mut normalizer = Self::new();
        for kind in EntityKind::ALL {
            for record in raw.records(kind) {
                normalizer.ingest(kind, record);
            }
        }
        normalizer.finish()
    }

    /// Normalize one raw record of the given category
    ///
    /// Class, struct and enum records are objects that may name several
    /// entities; a function record expands to every function of its owner.
    pub fn ingest(&mut self, kind: EntityKind, record: &Value) {
        if kind == EntityKind::Offset {
            let key = record
                .get(0)
                .and_then(Value::as_str)
                .map(str::to_string);
            let result = records::parse_offset(record).map(Entity::Offset);
            self.accept(kind, key, result);
            return;
        }

        let Some(object) = record.as_object() else {
            self.report.record_skip(RecordIssue {
                kind,
                key: None,
                reason: format!("{} record is not an object", kind),
            });
            return;
        };

        for (name, payload) in object {
            match kind {
                EntityKind::Class => {
                    let result = records::parse_class(name, payload).map(Entity::Class);
                    self.accept(kind, Some(name.clone()), result);
                }
                EntityKind::Struct => {
                    let result = records::parse_class(name, payload).map(Entity::Struct);
                    self.accept(kind, Some(name.clone()), result);
                }
                EntityKind::Enum => {
                    let result = records::parse_enum(name, payload).map(Entity::Enum);
                    self.accept(kind, Some(name.clone()), result);
                }
                EntityKind::Function => self.ingest_functions(name, payload),
                EntityKind::Offset => {}
            }
        }
    }

    fn ingest_functions(&mut self, owner: &str, payload: &Value) {
        let kind = EntityKind::Function;
        let Some(groups) = payload.as_array() else {
            self.report.record_skip(RecordIssue {
                kind,
                key: Some(owner.to_string()),
                reason: "function list is not an array".to_string(),
            });
            return;
        };

        for group in groups {
            let Some(functions) = group.as_object() else {
                self.report.record_skip(RecordIssue {
                    kind,
                    key: Some(owner.to_string()),
                    reason: "function entry is not an object".to_string(),
                });
                continue;
            };
            for (func_name, info) in functions {
                let result = records::parse_function(owner, func_name, info).map(Entity::Function);
                self.accept(kind, Some(format!("{}::{}", owner, func_name)), result);
            }
        }
    }

    fn accept(&mut self, kind: EntityKind, key: Option<String>, result: Result<Entity, Malformed>) {
        match result {
            Ok(entity) => {
                let before = self.store.duplicates();
                self.store.insert(entity);
                if self.store.duplicates() > before {
                    self.report.duplicates += 1;
                } else {
                    *self.report.accepted.entry(kind).or_default() += 1;
                }
            }
            Err(Malformed(reason)) => self.report.record_skip(RecordIssue { kind, key, reason }),
        }
    }

    pub fn report(&self) -> &NormalizeReport {
        &self.report
    }

    pub fn finish(self) -> (EntityStore, NormalizeReport) {
        (self.store, self.report)
    }
}
