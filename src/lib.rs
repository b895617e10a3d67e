//! Property Mapper - object-to-object property copying for registered types
//!
//! Provides:
//! - An introspection seam ([`Mappable`]) and a `mappable!` generator for plain structs
//! - A per-type accessor cache keyed by property name and access kind
//! - A mapping engine that copies same-named, same-typed properties through
//!   a dispatch specialized per primitive kind
//!
//! Supported property types are the signed and unsigned integers of four
//! widths, `char`, `f32`, `f64`, `rust_decimal::Decimal`, `bool`, `String`,
//! `chrono::DateTime<Utc>` and `uuid::Uuid`, each also as `Option<_>`.

pub mod cache;
pub mod introspect;
pub mod mapping;
pub mod models;

// Re-export commonly used types
pub use cache::{AccessKind, AccessorCacheBuilder, PropertyAccessorMap};
pub use introspect::{Mappable, PropertyList};
pub use mapping::{
    ConstructionError, Mapper, MapperConfig, MappingError, MappingPlan, MappingResult,
    RegistrationError, RegistrationResult,
};
pub use models::{PropertyType, ValueKind};
