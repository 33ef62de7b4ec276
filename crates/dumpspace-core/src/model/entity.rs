//! Entity variants produced by the normalizer

use super::type_descriptor::TypeDescriptor;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Dense identity of an entity inside one loaded dataset
///
/// Ids are only meaningful against the store that issued them; a reload
/// starts numbering from zero again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityId(pub u32);

impl EntityId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The five reflection categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Class,
    Struct,
    Function,
    Enum,
    Offset,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Class,
        EntityKind::Struct,
        EntityKind::Function,
        EntityKind::Enum,
        EntityKind::Offset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Function => "function",
            Self::Enum => "enum",
            Self::Offset => "offset",
        }
    }

    /// Classes and structs share a shape and take part in inheritance
    pub fn is_type_like(&self) -> bool {
        matches!(self, Self::Class | Self::Struct)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data member of a class or struct
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    pub offset: u64,
    pub size: u64,
}

/// Class or struct
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassEntity {
    pub name: String,
    pub members: Vec<Member>,
    /// Nearest ancestor first, root ancestor last
    pub direct_ancestors: Vec<String>,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    pub name: String,
}

/// Reflected function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionEntity {
    pub owning_class: String,
    pub func_name: String,
    pub return_type: TypeDescriptor,
    pub params: Vec<Param>,
    pub offset: u64,
    pub flags: BTreeSet<String>,
}

impl FunctionEntity {
    /// `Owner::Function`, the key functions are stored under
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.owning_class, self.func_name)
    }
}

/// Named enum value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

/// Reflected enum
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumEntity {
    pub name: String,
    pub underlying_type: String,
    pub values: Vec<EnumValue>,
}

/// Global offset (e.g. GObjects, GNames)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OffsetEntity {
    pub name: String,
    pub value: u64,
}

/// Tagged union over the five categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Class(ClassEntity),
    Struct(ClassEntity),
    Function(FunctionEntity),
    Enum(EnumEntity),
    Offset(OffsetEntity),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Class(_) => EntityKind::Class,
            Self::Struct(_) => EntityKind::Struct,
            Self::Function(_) => EntityKind::Function,
            Self::Enum(_) => EntityKind::Enum,
            Self::Offset(_) => EntityKind::Offset,
        }
    }

    /// Name matched by searches; for functions this is the bare function name
    pub fn name(&self) -> &str {
        match self {
            Self::Class(c) | Self::Struct(c) => &c.name,
            Self::Function(f) => &f.func_name,
            Self::Enum(e) => &e.name,
            Self::Offset(o) => &o.name,
        }
    }

    /// Name shown to users; functions are qualified by their owning class
    pub fn display_name(&self) -> String {
        match self {
            Self::Function(f) => f.qualified_name(),
            other => other.name().to_string(),
        }
    }

    /// Shared class/struct payload
    pub fn as_class(&self) -> Option<&ClassEntity> {
        match self {
            Self::Class(c) | Self::Struct(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionEntity> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumEntity> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }
}
