//! Configuration for registration and mapping

use serde::{Deserialize, Serialize};

/// Configuration for a [`Mapper`](super::Mapper)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Record getter-only / setter-only properties at registration instead
    /// of rejecting the type. Using the missing half fails at map time.
    pub allow_partial_accessors: bool,
    /// Skip source properties that have no destination counterpart.
    /// When disabled, such a property fails the map call.
    pub skip_missing_destination: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            allow_partial_accessors: false,
            skip_missing_destination: true,
        }
    }
}

impl MapperConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a strict config (every source property must land on the destination)
    pub fn strict() -> Self {
        Self {
            allow_partial_accessors: false,
            skip_missing_destination: false,
        }
    }

    /// Enable/disable partial accessor pairs
    pub fn with_partial_accessors(mut self, allowed: bool) -> Self {
        self.allow_partial_accessors = allowed;
        self
    }

    /// Enable/disable skipping of source-only properties
    pub fn with_skip_missing_destination(mut self, skip: bool) -> Self {
        self.skip_missing_destination = skip;
        self
    }
}
