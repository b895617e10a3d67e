//! Accessor cache builder
//!
//! Turns the property list of a [`Mappable`] type into a
//! [`PropertyAccessorMap`], binding each property's accessors to the
//! variant of its primitive kind. Building is pure: nothing is registered.

use std::any::TypeId;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::trace;
use uuid::Uuid;

use super::accessor::{AccessorPair, BoundAccessors, Slot};
use super::map::{PropertyAccessorMap, PropertyEntry};
use crate::introspect::{self, Mappable, PropertyDescriptor};
use crate::mapping::{RegistrationError, RegistrationResult};

/// Builds accessor maps for registered types
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessorCacheBuilder {
    allow_partial_accessors: bool,
}

impl AccessorCacheBuilder {
    /// Builder that requires both a getter and a setter on every property
    pub fn new() -> Self {
        Self::default()
    }

    /// Record getter-only and setter-only properties instead of rejecting them
    pub fn with_partial_accessors(mut self, allowed: bool) -> Self {
        self.allow_partial_accessors = allowed;
        self
    }

    /// Build the accessor map of `T`
    pub fn build<T: Mappable>(&self) -> RegistrationResult<PropertyAccessorMap<T>> {
        let type_name = std::any::type_name::<T>();
        let props = introspect::describe::<T>();
        let mut map = PropertyAccessorMap::new(type_name);

        for descriptor in props.iter() {
            let Some(accessors) = bind(descriptor) else {
                return Err(RegistrationError::UnsupportedType {
                    type_name,
                    property: descriptor.name().to_string(),
                    declared_type: descriptor.declared_type().type_name().to_string(),
                });
            };

            if !self.allow_partial_accessors {
                if !descriptor.has_getter() {
                    return Err(RegistrationError::MissingGetter {
                        type_name,
                        property: descriptor.name().to_string(),
                    });
                }
                if !descriptor.has_setter() {
                    return Err(RegistrationError::MissingSetter {
                        type_name,
                        property: descriptor.name().to_string(),
                    });
                }
            }

            trace!(
                type_name,
                property = descriptor.name(),
                property_type = %accessors.property_type(),
                "Cached property accessors"
            );

            let entry = PropertyEntry::new(descriptor.name().to_string(), accessors);
            if !map.insert(entry) {
                return Err(RegistrationError::DuplicateProperty {
                    type_name,
                    property: descriptor.name().to_string(),
                });
            }
        }

        Ok(map)
    }
}

/// Bind typed accessors for one value type `V`.
///
/// Only called once the declared type is known to be `V`.
fn pair<T: 'static, V: 'static>(descriptor: &PropertyDescriptor<T>) -> AccessorPair<T, V> {
    AccessorPair::new(descriptor.getter::<V>(), descriptor.setter::<V>())
}

/// Match the declared type against each supported kind, plain and optional
macro_rules! bind_supported {
    ($descriptor:expr, $( $variant:ident => $value:ty ),+ $(,)?) => {{
        let id = $descriptor.declared_type().type_id();
        $(
            if id == TypeId::of::<$value>() {
                let accessors = pair::<_, $value>($descriptor);
                Some(BoundAccessors::$variant(Slot::Required(accessors)))
            } else if id == TypeId::of::<Option<$value>>() {
                let accessors = pair::<_, Option<$value>>($descriptor);
                Some(BoundAccessors::$variant(Slot::Optional(accessors)))
            } else
        )+
        {
            None
        }
    }};
}

/// Resolve a descriptor to its typed accessors; `None` for unsupported types
fn bind<T: 'static>(descriptor: &PropertyDescriptor<T>) -> Option<BoundAccessors<T>> {
    bind_supported!(descriptor,
        I8 => i8,
        I16 => i16,
        I32 => i32,
        I64 => i64,
        U8 => u8,
        U16 => u16,
        U32 => u32,
        U64 => u64,
        Char => char,
        F32 => f32,
        F64 => f64,
        Decimal => Decimal,
        Bool => bool,
        String => String,
        DateTime => DateTime<Utc>,
        Uuid => Uuid,
    )
}
