//! Accessor cache
//!
//! For each registered type the cache holds a [`PropertyAccessorMap`]:
//! property name → access kind (get/set) → typed accessor. Maps are built
//! once by [`AccessorCacheBuilder`] and never re-derived.

mod accessor;
mod builder;
mod map;

pub use accessor::{AccessKind, AccessorPair, BoundAccessors, Slot};
pub use builder::AccessorCacheBuilder;
pub use map::{PropertyAccessorMap, PropertyEntry};
