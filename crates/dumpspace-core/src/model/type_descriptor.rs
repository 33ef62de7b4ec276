//! Recursive type descriptors for fields, parameters and return types

use serde::Serialize;
use std::fmt;

/// Kind of type a descriptor names, as recorded by the dumper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeCategory {
    Class,
    Struct,
    Enum,
    Primitive,
    Pointer,
    Unknown,
}

impl TypeCategory {
    /// Parse the dumper's category marker (`C`, `S`, `E`, `D`, `*`)
    pub fn from_marker(marker: &str) -> Self {
        match marker.trim() {
            "C" | "c" | "class" => Self::Class,
            "S" | "s" | "struct" => Self::Struct,
            "E" | "e" | "enum" => Self::Enum,
            "D" | "d" | "default" | "primitive" => Self::Primitive,
            "*" | "pointer" => Self::Pointer,
            _ => Self::Unknown,
        }
    }
}

/// Type of a member, parameter or return value
///
/// A non-empty `template_args` marks a container whose element type is
/// `template_args[0]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeDescriptor {
    pub base_name: String,
    pub category: TypeCategory,
    pub pointer: bool,
    pub template_args: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    /// Plain, non-pointer, non-container type
    pub fn named(base_name: impl Into<String>, category: TypeCategory) -> Self {
        Self {
            base_name: base_name.into(),
            category,
            pointer: false,
            template_args: Vec::new(),
        }
    }

    /// Placeholder for types the dump did not describe
    pub fn unknown() -> Self {
        Self::named("Unknown", TypeCategory::Unknown)
    }

    /// Mark as pointer
    pub fn with_pointer(mut self) -> Self {
        self.pointer = true;
        self
    }

    /// Attach template arguments
    pub fn with_args(mut self, args: Vec<TypeDescriptor>) -> Self {
        self.template_args = args;
        self
    }

    pub fn is_container(&self) -> bool {
        !self.template_args.is_empty()
    }

    /// Element type of a container, if any
    pub fn element(&self) -> Option<&TypeDescriptor> {
        self.template_args.first()
    }

    /// Lowercase base name, the key used by the member-type and param indexes
    pub fn base_name_lower(&self) -> String {
        self.base_name.to_lowercase()
    }

    /// Name of the type this descriptor ultimately refers to
    ///
    /// Containers are unwrapped through their element type, so
    /// `TArray<AActor*>` refers to `AActor`.
    pub fn referenced_type_name(&self) -> &str {
        match self.element() {
            Some(element) => element.referenced_type_name(),
            None => &self.base_name,
        }
    }

    /// Render for display, e.g. `TArray<UObject*>` or `FName`
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base_name)?;
        if self.is_container() {
            write!(f, "<")?;
            for (i, arg) in self.template_args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ">")?;
        }
        if self.pointer {
            write!(f, "*")?;
        }
        Ok(())
    }
}
