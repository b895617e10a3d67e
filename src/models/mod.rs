//! Models module for the mapper
//!
//! Defines the value kinds and declared property types shared by the
//! accessor cache and the mapping engine.

pub mod value;

pub use value::{DeclaredType, PropertyType, ValueKind};
