//! Typed accessor pairs, one variant per supported primitive kind

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::introspect::{Getter, Setter};
use crate::models::{PropertyType, ValueKind};

/// Which half of an accessor pair is being asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessKind {
    Get,
    Set,
}

impl std::fmt::Display for AccessKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessKind::Get => write!(f, "get"),
            AccessKind::Set => write!(f, "set"),
        }
    }
}

/// Getter and setter bound to one property of `T` with value type `V`.
///
/// Either half may be absent when the type was registered with partial
/// accessors allowed.
pub struct AccessorPair<T, V> {
    getter: Option<Getter<T, V>>,
    setter: Option<Setter<T, V>>,
}

impl<T, V> AccessorPair<T, V> {
    pub fn new(getter: Option<Getter<T, V>>, setter: Option<Setter<T, V>>) -> Self {
        Self { getter, setter }
    }

    pub fn getter(&self) -> Option<Getter<T, V>> {
        self.getter
    }

    pub fn setter(&self) -> Option<Setter<T, V>> {
        self.setter
    }

    pub fn is_complete(&self) -> bool {
        self.getter.is_some() && self.setter.is_some()
    }
}

impl<T, V> Clone for AccessorPair<T, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V> Copy for AccessorPair<T, V> {}

/// Accessors for a property that is either `V` or `Option<V>`
pub enum Slot<T, V> {
    Required(AccessorPair<T, V>),
    Optional(AccessorPair<T, Option<V>>),
}

impl<T, V> Slot<T, V> {
    pub fn is_optional(&self) -> bool {
        matches!(self, Slot::Optional(_))
    }

    pub fn has_getter(&self) -> bool {
        match self {
            Slot::Required(pair) => pair.getter().is_some(),
            Slot::Optional(pair) => pair.getter().is_some(),
        }
    }

    pub fn has_setter(&self) -> bool {
        match self {
            Slot::Required(pair) => pair.setter().is_some(),
            Slot::Optional(pair) => pair.setter().is_some(),
        }
    }
}

/// Accessors of one property, specialized to its primitive kind.
///
/// The variant is the dispatch tag: the mapping engine matches source and
/// destination variants pairwise and calls the typed accessors directly.
pub enum BoundAccessors<T> {
    I8(Slot<T, i8>),
    I16(Slot<T, i16>),
    I32(Slot<T, i32>),
    I64(Slot<T, i64>),
    U8(Slot<T, u8>),
    U16(Slot<T, u16>),
    U32(Slot<T, u32>),
    U64(Slot<T, u64>),
    Char(Slot<T, char>),
    F32(Slot<T, f32>),
    F64(Slot<T, f64>),
    Decimal(Slot<T, Decimal>),
    Bool(Slot<T, bool>),
    String(Slot<T, String>),
    DateTime(Slot<T, DateTime<Utc>>),
    Uuid(Slot<T, Uuid>),
}

/// Expand `$body` once with `$slot` bound to the inner slot of any variant
macro_rules! with_slot {
    ($accessors:expr, $slot:ident => $body:expr) => {
        match $accessors {
            BoundAccessors::I8($slot) => $body,
            BoundAccessors::I16($slot) => $body,
            BoundAccessors::I32($slot) => $body,
            BoundAccessors::I64($slot) => $body,
            BoundAccessors::U8($slot) => $body,
            BoundAccessors::U16($slot) => $body,
            BoundAccessors::U32($slot) => $body,
            BoundAccessors::U64($slot) => $body,
            BoundAccessors::Char($slot) => $body,
            BoundAccessors::F32($slot) => $body,
            BoundAccessors::F64($slot) => $body,
            BoundAccessors::Decimal($slot) => $body,
            BoundAccessors::Bool($slot) => $body,
            BoundAccessors::String($slot) => $body,
            BoundAccessors::DateTime($slot) => $body,
            BoundAccessors::Uuid($slot) => $body,
        }
    };
}

impl<T> BoundAccessors<T> {
    pub fn kind(&self) -> ValueKind {
        match self {
            BoundAccessors::I8(_) => ValueKind::I8,
            BoundAccessors::I16(_) => ValueKind::I16,
            BoundAccessors::I32(_) => ValueKind::I32,
            BoundAccessors::I64(_) => ValueKind::I64,
            BoundAccessors::U8(_) => ValueKind::U8,
            BoundAccessors::U16(_) => ValueKind::U16,
            BoundAccessors::U32(_) => ValueKind::U32,
            BoundAccessors::U64(_) => ValueKind::U64,
            BoundAccessors::Char(_) => ValueKind::Char,
            BoundAccessors::F32(_) => ValueKind::F32,
            BoundAccessors::F64(_) => ValueKind::F64,
            BoundAccessors::Decimal(_) => ValueKind::Decimal,
            BoundAccessors::Bool(_) => ValueKind::Bool,
            BoundAccessors::String(_) => ValueKind::String,
            BoundAccessors::DateTime(_) => ValueKind::DateTime,
            BoundAccessors::Uuid(_) => ValueKind::Uuid,
        }
    }

    pub fn property_type(&self) -> PropertyType {
        let optional = with_slot!(self, slot => slot.is_optional());
        PropertyType {
            kind: self.kind(),
            optional,
        }
    }

    pub fn has(&self, access: AccessKind) -> bool {
        match access {
            AccessKind::Get => with_slot!(self, slot => slot.has_getter()),
            AccessKind::Set => with_slot!(self, slot => slot.has_setter()),
        }
    }
}

impl<T> std::fmt::Debug for BoundAccessors<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundAccessors")
            .field("type", &self.property_type())
            .field("get", &self.has(AccessKind::Get))
            .field("set", &self.has(AccessKind::Set))
            .finish()
    }
}
