//! Object-to-object mapping
//!
//! This module provides functionality to:
//! - Register types and cache their property accessors
//! - Copy same-named, same-typed properties from a source instance into a
//!   new or existing destination instance
//! - Inspect how two registered types line up before mapping
//!
//! # Example
//!
//! ```rust
//! use property_mapper::mapping::{Mapper, MapperConfig};
//! use property_mapper::mappable;
//!
//! #[derive(Debug, Default)]
//! struct Customer {
//!     id: u64,
//!     name: String,
//!     vip: bool,
//! }
//!
//! #[derive(Debug, Default)]
//! struct CustomerRow {
//!     id: u64,
//!     name: String,
//! }
//!
//! mappable!(Customer { id: u64, name: String, vip: bool });
//! mappable!(CustomerRow { id: u64, name: String });
//!
//! let mapper = Mapper::with_config(MapperConfig::new());
//! mapper.register::<Customer>()?;
//! mapper.register::<CustomerRow>()?;
//!
//! let customer = Customer { id: 7, name: "Grace".to_string(), vip: true };
//! let row: CustomerRow = mapper.map(&customer)?;
//! assert_eq!(row.id, 7);
//! assert_eq!(row.name, "Grace");
//!
//! let plan = mapper.plan::<Customer, CustomerRow>()?;
//! assert_eq!(plan.extras, vec!["vip"]);
//! # Ok::<(), property_mapper::mapping::MappingError>(())
//! ```

mod config;
mod engine;
mod error;
mod registry;
mod types;

pub use config::MapperConfig;
pub use engine::Mapper;
pub use error::{
    ConstructionError, MappingError, MappingResult, RegistrationError, RegistrationResult,
};
pub use registry::TypeRegistry;
pub use types::{MappingPlan, MappingStats, PropertyMapping, PropertyMismatch};
