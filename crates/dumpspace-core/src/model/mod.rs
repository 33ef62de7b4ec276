//! Uniform entity model for reflection dumps
//!
//! Raw dump records are heterogeneous per category; the normalizer turns
//! them into the types defined here, which are immutable for the lifetime
//! of a loaded dataset.

mod entity;
mod type_descriptor;

pub use entity::{
    ClassEntity, Entity, EntityId, EntityKind, EnumEntity, EnumValue, FunctionEntity, Member,
    OffsetEntity, Param,
};
pub use type_descriptor::{TypeCategory, TypeDescriptor};
