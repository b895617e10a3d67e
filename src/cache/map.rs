//! Per-type property accessor map

use std::collections::HashMap;

use super::accessor::{AccessKind, BoundAccessors};
use crate::models::PropertyType;

/// A single cached property: its name and typed accessors
pub struct PropertyEntry<T> {
    name: String,
    accessors: BoundAccessors<T>,
}

impl<T> PropertyEntry<T> {
    pub(crate) fn new(name: String, accessors: BoundAccessors<T>) -> Self {
        Self { name, accessors }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property_type(&self) -> PropertyType {
        self.accessors.property_type()
    }

    pub fn accessors(&self) -> &BoundAccessors<T> {
        &self.accessors
    }

    pub fn has(&self, access: AccessKind) -> bool {
        self.accessors.has(access)
    }
}

/// All cached accessors of one type, keyed by property name.
///
/// Iteration follows declaration order. The map is immutable once built.
pub struct PropertyAccessorMap<T> {
    type_name: &'static str,
    entries: Vec<PropertyEntry<T>>,
    index: HashMap<String, usize>,
}

impl<T> PropertyAccessorMap<T> {
    pub(crate) fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Append an entry. Returns `false` if the name is already present.
    pub(crate) fn insert(&mut self, entry: PropertyEntry<T>) -> bool {
        if self.index.contains_key(entry.name()) {
            return false;
        }
        self.index.insert(entry.name.clone(), self.entries.len());
        self.entries.push(entry);
        true
    }

    /// Name of the type these accessors belong to
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&PropertyEntry<T>> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Resolved type of a property, if declared
    pub fn property_type(&self, name: &str) -> Option<PropertyType> {
        self.get(name).map(|entry| entry.property_type())
    }

    /// Whether `name` has the requested accessor cached
    pub fn has_accessor(&self, name: &str, access: AccessKind) -> bool {
        self.get(name).is_some_and(|entry| entry.has(access))
    }

    /// Property names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyEntry<T>> {
        self.entries.iter()
    }
}

impl<T> std::fmt::Debug for PropertyEntry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyEntry")
            .field("name", &self.name)
            .field("accessors", &self.accessors)
            .finish()
    }
}

impl<T> std::fmt::Debug for PropertyAccessorMap<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyAccessorMap")
            .field("type_name", &self.type_name)
            .field("entries", &self.entries)
            .finish()
    }
}
