//! Error types for registration and mapping operations

use thiserror::Error;

/// Errors raised while building the accessor cache for a type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// Property declared with a type outside the supported set
    #[error("Unsupported type '{declared_type}' for property '{property}' on {type_name}")]
    UnsupportedType {
        type_name: &'static str,
        property: String,
        declared_type: String,
    },

    /// Property has no public read accessor
    #[error("Property '{property}' on {type_name} has no getter")]
    MissingGetter {
        type_name: &'static str,
        property: String,
    },

    /// Property has no public write accessor
    #[error("Property '{property}' on {type_name} has no setter")]
    MissingSetter {
        type_name: &'static str,
        property: String,
    },

    /// Same property name declared more than once
    #[error("Property '{property}' is declared more than once on {type_name}")]
    DuplicateProperty {
        type_name: &'static str,
        property: String,
    },
}

/// Failure reported by a type's construction capability
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct ConstructionError {
    reason: String,
}

impl ConstructionError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Errors that can occur while mapping an instance
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Source or destination type was never registered
    #[error("Type {type_name} is not registered")]
    TypeNotRegistered { type_name: &'static str },

    /// Same property name, different declared types
    #[error(
        "Property '{property}' has type {source_type} on {source_type_name} but {destination_type} on {destination_type_name}"
    )]
    PropertyTypeMismatch {
        property: String,
        source_type_name: &'static str,
        source_type: String,
        destination_type_name: &'static str,
        destination_type: String,
    },

    /// No dispatch path for the pairing of source and destination types
    #[error("No dispatch for '{property}' on {type_name}: {source_type} to {destination_type}")]
    UnsupportedType {
        type_name: &'static str,
        property: String,
        source_type: String,
        destination_type: String,
    },

    /// Source property was registered without a getter
    #[error("Property '{property}' on {type_name} has no getter and cannot be read")]
    MissingGetter {
        type_name: &'static str,
        property: String,
    },

    /// Destination property was registered without a setter
    #[error("Property '{property}' on {type_name} has no setter and cannot be written")]
    MissingSetter {
        type_name: &'static str,
        property: String,
    },

    /// Source property has no counterpart on the destination (strict mode only)
    #[error("Property '{property}' from {source_type_name} is missing on {destination_type_name}")]
    PropertyNotFound {
        property: String,
        source_type_name: &'static str,
        destination_type_name: &'static str,
    },

    /// Destination instance could not be constructed
    #[error("Failed to construct {type_name}: {source}")]
    ConstructionFailure {
        type_name: &'static str,
        #[source]
        source: ConstructionError,
    },

    /// Registration error surfaced through a mapping call chain
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

/// Result type for registration operations
pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Result type for mapping operations
pub type MappingResult<T> = Result<T, MappingError>;
