//! Types describing how two registered types line up

use serde::{Deserialize, Serialize};

use crate::models::PropertyType;

/// Property pairing between a source and a destination type, computed
/// from their accessor maps without touching any instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingPlan {
    /// Source type name
    pub source_type: String,
    /// Destination type name
    pub destination_type: String,
    /// Properties copied on every map call, in source order
    pub direct_mappings: Vec<PropertyMapping>,
    /// Same name, different declared type
    pub mismatches: Vec<PropertyMismatch>,
    /// Source properties with no destination counterpart
    pub extras: Vec<String>,
    /// Destination properties no source property writes
    pub gaps: Vec<String>,
    /// Summary statistics
    pub stats: MappingStats,
}

impl MappingPlan {
    pub(crate) fn new(source_type: impl Into<String>, destination_type: impl Into<String>) -> Self {
        Self {
            source_type: source_type.into(),
            destination_type: destination_type.into(),
            direct_mappings: Vec::new(),
            mismatches: Vec::new(),
            extras: Vec::new(),
            gaps: Vec::new(),
            stats: MappingStats::default(),
        }
    }

    /// A map call between these types cannot fail on property types
    pub fn is_compatible(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Names of the properties that will be copied
    pub fn mapped_properties(&self) -> Vec<&str> {
        self.direct_mappings.iter().map(|m| m.name.as_str()).collect()
    }
}

/// A property copied as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMapping {
    pub name: String,
    pub property_type: PropertyType,
}

/// A property whose declared types disagree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMismatch {
    pub name: String,
    pub source_type: PropertyType,
    pub destination_type: PropertyType,
}

/// Statistics about a plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingStats {
    /// Total source properties
    pub source_properties: usize,
    /// Total destination properties
    pub destination_properties: usize,
    /// Properties copied
    pub direct_mapped: usize,
    /// Properties with mismatched types
    pub mismatched: usize,
    /// Source-only properties
    pub extras_count: usize,
    /// Destination-only properties
    pub gaps_count: usize,
}

impl MappingStats {
    /// Share of destination properties written by a map call
    pub fn coverage(&self) -> f64 {
        if self.destination_properties == 0 {
            return 1.0;
        }
        self.direct_mapped as f64 / self.destination_properties as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValueKind;

    #[test]
    fn test_plan_compatibility() {
        let mut plan = MappingPlan::new("Src", "Dst");
        plan.direct_mappings.push(PropertyMapping {
            name: "a".to_string(),
            property_type: PropertyType::required(ValueKind::I32),
        });
        assert!(plan.is_compatible());
        assert_eq!(plan.mapped_properties(), vec!["a"]);

        plan.mismatches.push(PropertyMismatch {
            name: "b".to_string(),
            source_type: PropertyType::required(ValueKind::I32),
            destination_type: PropertyType::required(ValueKind::String),
        });
        assert!(!plan.is_compatible());
    }

    #[test]
    fn test_mapping_stats_coverage() {
        let stats = MappingStats {
            source_properties: 3,
            destination_properties: 4,
            direct_mapped: 3,
            mismatched: 0,
            extras_count: 0,
            gaps_count: 1,
        };
        assert!((stats.coverage() - 0.75).abs() < 0.001);
        assert_eq!(MappingStats::default().coverage(), 1.0);
    }

    #[test]
    fn test_plan_serializes() {
        let mut plan = MappingPlan::new("Src", "Dst");
        plan.extras.push("b".to_string());
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["extras"][0], "b");
        assert_eq!(json["source_type"], "Src");
    }
}
