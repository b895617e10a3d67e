//! Registered type table

use std::any::{Any, TypeId};
use std::sync::Arc;

use dashmap::DashMap;

use crate::cache::PropertyAccessorMap;

/// One registered type: its name and its type-erased accessor map
struct RegisteredType {
    type_name: &'static str,
    accessors: Arc<dyn Any + Send + Sync>,
}

/// Concurrent table from type identity to accessor map.
///
/// Entries are only ever inserted or replaced whole, so a reader sees
/// either the previous map or the new one.
#[derive(Default)]
pub struct TypeRegistry {
    types: DashMap<TypeId, RegisteredType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the map for `T`. Returns `true` if a previous map
    /// was replaced.
    pub fn insert<T: Send + Sync + 'static>(&self, map: PropertyAccessorMap<T>) -> bool {
        let entry = RegisteredType {
            type_name: map.type_name(),
            accessors: Arc::new(map),
        };
        self.types.insert(TypeId::of::<T>(), entry).is_some()
    }

    /// Snapshot of the map for `T`, if registered
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<Arc<PropertyAccessorMap<T>>> {
        let accessors = self
            .types
            .get(&TypeId::of::<T>())
            .map(|entry| Arc::clone(&entry.accessors))?;
        accessors.downcast::<PropertyAccessorMap<T>>().ok()
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.types.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Names of all registered types, sorted
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.types.iter().map(|entry| entry.type_name).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}
