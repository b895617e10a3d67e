//! Value kinds the mapper can copy directly

use serde::{Deserialize, Serialize};
use std::any::TypeId;

/// Primitive kinds with a dedicated accessor and dispatch path.
///
/// The set is closed: a property whose declared type is not one of these
/// (or an `Option` of one of these) cannot be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    Char,
    F32,
    F64,
    /// High-precision fixed point (`rust_decimal::Decimal`)
    Decimal,
    Bool,
    String,
    /// UTC date-time (`chrono::DateTime<Utc>`)
    DateTime,
    /// 128-bit unique identifier (`uuid::Uuid`)
    Uuid,
}

impl ValueKind {
    /// Every supported kind, in declaration order
    pub const ALL: [ValueKind; 16] = [
        ValueKind::I8,
        ValueKind::I16,
        ValueKind::I32,
        ValueKind::I64,
        ValueKind::U8,
        ValueKind::U16,
        ValueKind::U32,
        ValueKind::U64,
        ValueKind::Char,
        ValueKind::F32,
        ValueKind::F64,
        ValueKind::Decimal,
        ValueKind::Bool,
        ValueKind::String,
        ValueKind::DateTime,
        ValueKind::Uuid,
    ];

    /// Short lowercase name used in error messages and plans
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::I8 => "i8",
            ValueKind::I16 => "i16",
            ValueKind::I32 => "i32",
            ValueKind::I64 => "i64",
            ValueKind::U8 => "u8",
            ValueKind::U16 => "u16",
            ValueKind::U32 => "u32",
            ValueKind::U64 => "u64",
            ValueKind::Char => "char",
            ValueKind::F32 => "f32",
            ValueKind::F64 => "f64",
            ValueKind::Decimal => "decimal",
            ValueKind::Bool => "bool",
            ValueKind::String => "string",
            ValueKind::DateTime => "datetime",
            ValueKind::Uuid => "uuid",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ValueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ValueKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == lower)
            .ok_or_else(|| format!("Unknown value kind: {}", s))
    }
}

/// Resolved type of a registered property: a kind plus its optionality.
///
/// `Option<Uuid>` and `Uuid` are distinct property types and never match
/// each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyType {
    pub kind: ValueKind,
    pub optional: bool,
}

impl PropertyType {
    /// A non-optional property of the given kind
    pub fn required(kind: ValueKind) -> Self {
        Self {
            kind,
            optional: false,
        }
    }

    /// An `Option`-wrapped property of the given kind
    pub fn optional(kind: ValueKind) -> Self {
        Self {
            kind,
            optional: true,
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.optional {
            write!(f, "Option<{}>", self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

/// Raw type identity of a declared property, as reported by the
/// introspection provider before it is resolved to a [`PropertyType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclaredType {
    type_id: TypeId,
    type_name: &'static str,
}

impl DeclaredType {
    /// Identity of `V`
    pub fn of<V: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<V>(),
            type_name: std::any::type_name::<V>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Compiler-provided name, e.g. `alloc::string::String`
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl std::fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name)
    }
}
