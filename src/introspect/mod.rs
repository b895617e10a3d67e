//! Introspection provider for mappable types
//!
//! Rust has no runtime reflection, so each type describes its own
//! properties through [`Mappable::describe`]. The [`mappable!`](crate::mappable)
//! macro generates that description for plain structs with a `Default`
//! constructor; types with unusual accessors implement the trait by hand.
//!
//! # Example
//!
//! ```rust
//! use property_mapper::introspect::{Mappable, PropertyList};
//! use property_mapper::ConstructionError;
//!
//! #[derive(Default)]
//! struct Counter {
//!     hits: u64,
//! }
//!
//! impl Mappable for Counter {
//!     fn construct() -> Result<Self, ConstructionError> {
//!         Ok(Counter::default())
//!     }
//!
//!     fn describe(props: &mut PropertyList<Self>) {
//!         props.read_write(
//!             "hits",
//!             |c: &Counter| c.hits,
//!             |c: &mut Counter, v| c.hits = v,
//!         );
//!     }
//! }
//! ```

use std::any::Any;
use std::marker::PhantomData;

use crate::mapping::ConstructionError;
use crate::models::DeclaredType;

/// Bound read accessor for one property
pub type Getter<T, V> = fn(&T) -> V;

/// Bound write accessor for one property
pub type Setter<T, V> = fn(&mut T, V);

/// A type whose properties can be enumerated and whose instances can be
/// default-constructed.
pub trait Mappable: Sized + Send + Sync + 'static {
    /// Produce a default-initialized instance used as a mapping destination
    fn construct() -> Result<Self, ConstructionError>;

    /// Declare every public property with its accessors
    fn describe(props: &mut PropertyList<Self>);
}

/// One declared property: name, declared type and the accessors that exist.
///
/// Accessors are stored type-erased until the cache builder binds them to
/// their primitive kind.
pub struct PropertyDescriptor<T> {
    name: String,
    declared_type: DeclaredType,
    getter: Option<Box<dyn Any + Send + Sync>>,
    setter: Option<Box<dyn Any + Send + Sync>>,
    _owner: PhantomData<fn() -> T>,
}

impl<T: 'static> PropertyDescriptor<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> DeclaredType {
        self.declared_type
    }

    pub fn has_getter(&self) -> bool {
        self.getter.is_some()
    }

    pub fn has_setter(&self) -> bool {
        self.setter.is_some()
    }

    /// Recover the typed getter.
    ///
    /// The erased getter was stored by [`PropertyList::property`] with the
    /// same `V` as the declared type, so it only fails to downcast when `V`
    /// is not the declared type.
    pub(crate) fn getter<V: 'static>(&self) -> Option<Getter<T, V>> {
        self.getter
            .as_ref()
            .and_then(|erased| erased.downcast_ref::<Getter<T, V>>())
            .copied()
    }

    /// Recover the typed setter. See [`PropertyDescriptor::getter`].
    pub(crate) fn setter<V: 'static>(&self) -> Option<Setter<T, V>> {
        self.setter
            .as_ref()
            .and_then(|erased| erased.downcast_ref::<Setter<T, V>>())
            .copied()
    }
}

impl<T> std::fmt::Debug for PropertyDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("declared_type", &self.declared_type)
            .field("getter", &self.getter.is_some())
            .field("setter", &self.setter.is_some())
            .finish()
    }
}

/// Ordered list of properties collected from [`Mappable::describe`]
pub struct PropertyList<T> {
    properties: Vec<PropertyDescriptor<T>>,
}

impl<T: 'static> PropertyList<T> {
    pub(crate) fn new() -> Self {
        Self {
            properties: Vec::new(),
        }
    }

    /// Declare a property with whichever accessors it exposes
    pub fn property<V: 'static>(
        &mut self,
        name: impl Into<String>,
        getter: Option<Getter<T, V>>,
        setter: Option<Setter<T, V>>,
    ) -> &mut Self {
        self.properties.push(PropertyDescriptor {
            name: name.into(),
            declared_type: DeclaredType::of::<V>(),
            getter: getter.map(|g| Box::new(g) as Box<dyn Any + Send + Sync>),
            setter: setter.map(|s| Box::new(s) as Box<dyn Any + Send + Sync>),
            _owner: PhantomData,
        });
        self
    }

    /// Declare a property with both a getter and a setter
    pub fn read_write<V: 'static>(
        &mut self,
        name: impl Into<String>,
        getter: Getter<T, V>,
        setter: Setter<T, V>,
    ) -> &mut Self {
        self.property(name, Some(getter), Some(setter))
    }

    /// Declare a property without a setter
    pub fn read_only<V: 'static>(
        &mut self,
        name: impl Into<String>,
        getter: Getter<T, V>,
    ) -> &mut Self {
        self.property(name, Some(getter), None)
    }

    /// Declare a property without a getter
    pub fn write_only<V: 'static>(
        &mut self,
        name: impl Into<String>,
        setter: Setter<T, V>,
    ) -> &mut Self {
        self.property(name, None, Some(setter))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyDescriptor<T>> {
        self.properties.iter()
    }
}

/// Collect the property list of `T`
pub fn describe<T: Mappable>() -> PropertyList<T> {
    let mut props = PropertyList::new();
    T::describe(&mut props);
    props
}

/// Implement [`Mappable`] for a struct with a `Default` constructor.
///
/// Each listed field becomes a read/write property named after the field.
/// Getters clone the field value.
///
/// ```rust
/// use property_mapper::mappable;
/// use uuid::Uuid;
///
/// #[derive(Debug, Default, Clone, PartialEq)]
/// pub struct Person {
///     pub id: Uuid,
///     pub first_name: String,
///     pub last_name: String,
/// }
///
/// mappable!(Person {
///     id: Uuid,
///     first_name: String,
///     last_name: String,
/// });
/// ```
#[macro_export]
macro_rules! mappable {
    ($owner:ty { $($field:ident : $value:ty),* $(,)? }) => {
        impl $crate::introspect::Mappable for $owner {
            fn construct() -> ::core::result::Result<Self, $crate::ConstructionError> {
                ::core::result::Result::Ok(<Self as ::core::default::Default>::default())
            }

            fn describe(props: &mut $crate::introspect::PropertyList<Self>) {
                $(
                    props.read_write::<$value>(
                        ::core::stringify!($field),
                        |owner: &Self| ::core::clone::Clone::clone(&owner.$field),
                        |owner: &mut Self, value: $value| owner.$field = value,
                    );
                )*
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Sample {
        id: u32,
        label: String,
    }

    impl Mappable for Sample {
        fn construct() -> Result<Self, ConstructionError> {
            Ok(Sample::default())
        }

        fn describe(props: &mut PropertyList<Self>) {
            props
                .read_write("id", |s: &Sample| s.id, |s: &mut Sample, v| s.id = v)
                .read_only("label", |s: &Sample| s.label.clone());
        }
    }

    #[test]
    fn test_describe_preserves_order() {
        let props = describe::<Sample>();
        let names: Vec<&str> = props.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["id", "label"]);
    }

    #[test]
    fn test_descriptor_accessors() {
        let props = describe::<Sample>();
        let label = props.iter().nth(1).unwrap();
        assert!(label.has_getter());
        assert!(!label.has_setter());
        assert_eq!(label.declared_type(), DeclaredType::of::<String>());
    }

    #[test]
    fn test_typed_accessor_recovery() {
        let props = describe::<Sample>();
        let id = props.iter().next().unwrap();

        let getter = id.getter::<u32>().unwrap();
        let sample = Sample {
            id: 7,
            label: String::new(),
        };
        assert_eq!(getter(&sample), 7);

        assert!(id.getter::<u64>().is_none());
        assert!(id.setter::<u32>().is_some());
    }
}
