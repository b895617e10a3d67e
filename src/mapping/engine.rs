//! Mapping engine: registration and property-by-property copying

use std::sync::Arc;

use tracing::{debug, info, trace};

use super::config::MapperConfig;
use super::error::{MappingError, MappingResult, RegistrationResult};
use super::registry::TypeRegistry;
use super::types::{MappingPlan, MappingStats, PropertyMapping, PropertyMismatch};
use crate::cache::{AccessorCacheBuilder, AccessorPair, PropertyAccessorMap, PropertyEntry, Slot};
use crate::introspect::Mappable;
use crate::models::PropertyType;

/// Copies same-named, same-typed properties between registered types.
///
/// Each mapper owns its own registry, so independent mappers can coexist
/// in one process.
#[derive(Debug, Default)]
pub struct Mapper {
    config: MapperConfig,
    registry: TypeRegistry,
}

impl Mapper {
    /// Create a mapper with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapper with custom config
    pub fn with_config(config: MapperConfig) -> Self {
        Self {
            config,
            registry: TypeRegistry::new(),
        }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Build and store the accessor map of `T`, replacing any previous one.
    ///
    /// On error nothing is stored.
    pub fn register<T: Mappable>(&self) -> RegistrationResult<()> {
        let map = AccessorCacheBuilder::new()
            .with_partial_accessors(self.config.allow_partial_accessors)
            .build::<T>()?;
        let type_name = map.type_name();
        let properties = map.len();

        if self.registry.insert(map) {
            info!(type_name, "Replaced existing accessor map");
        }
        debug!(type_name, properties, "Registered type");
        Ok(())
    }

    pub fn is_registered<T: 'static>(&self) -> bool {
        self.registry.contains::<T>()
    }

    /// Number of registered types
    pub fn registered_count(&self) -> usize {
        self.registry.len()
    }

    /// Names of all registered types, sorted
    pub fn registered_type_names(&self) -> Vec<&'static str> {
        self.registry.type_names()
    }

    /// Cached accessor map of `T`, if registered
    pub fn accessors<T: Mappable>(&self) -> Option<Arc<PropertyAccessorMap<T>>> {
        self.registry.get::<T>()
    }

    /// Construct a new `D` and copy every matching property of `source` into it
    pub fn map<S: Mappable, D: Mappable>(&self, source: &S) -> MappingResult<D> {
        let source_map = self.lookup::<S>()?;
        let destination_map = self.lookup::<D>()?;

        let mut destination = match D::construct() {
            Ok(destination) => destination,
            Err(source) => {
                return Err(MappingError::ConstructionFailure {
                    type_name: destination_map.type_name(),
                    source,
                });
            }
        };
        self.copy(&source_map, &destination_map, source, &mut destination)?;
        Ok(destination)
    }

    /// Copy every matching property of `source` into an existing destination.
    ///
    /// Returns the number of properties written. Not transactional: on error
    /// the properties written before the failing one stay written.
    pub fn map_into<S: Mappable, D: Mappable>(
        &self,
        source: &S,
        destination: &mut D,
    ) -> MappingResult<usize> {
        let source_map = self.lookup::<S>()?;
        let destination_map = self.lookup::<D>()?;
        self.copy(&source_map, &destination_map, source, destination)
    }

    /// Pair the properties of two registered types without mapping anything
    pub fn plan<S: Mappable, D: Mappable>(&self) -> MappingResult<MappingPlan> {
        let source_map = self.lookup::<S>()?;
        let destination_map = self.lookup::<D>()?;

        let mut plan = MappingPlan::new(source_map.type_name(), destination_map.type_name());

        for entry in source_map.iter() {
            match destination_map.get(entry.name()) {
                None => plan.extras.push(entry.name().to_string()),
                Some(target) if target.property_type() != entry.property_type() => {
                    plan.mismatches.push(PropertyMismatch {
                        name: entry.name().to_string(),
                        source_type: entry.property_type(),
                        destination_type: target.property_type(),
                    });
                }
                Some(_) => {
                    plan.direct_mappings.push(PropertyMapping {
                        name: entry.name().to_string(),
                        property_type: entry.property_type(),
                    });
                }
            }
        }

        plan.gaps = destination_map
            .names()
            .filter(|name| !source_map.contains(name))
            .map(String::from)
            .collect();

        plan.stats = MappingStats {
            source_properties: source_map.len(),
            destination_properties: destination_map.len(),
            direct_mapped: plan.direct_mappings.len(),
            mismatched: plan.mismatches.len(),
            extras_count: plan.extras.len(),
            gaps_count: plan.gaps.len(),
        };

        Ok(plan)
    }

    fn lookup<T: Mappable>(&self) -> MappingResult<Arc<PropertyAccessorMap<T>>> {
        self.registry
            .get::<T>()
            .ok_or(MappingError::TypeNotRegistered {
                type_name: std::any::type_name::<T>(),
            })
    }

    fn copy<S, D>(
        &self,
        source_map: &PropertyAccessorMap<S>,
        destination_map: &PropertyAccessorMap<D>,
        source: &S,
        destination: &mut D,
    ) -> MappingResult<usize> {
        let mut written = 0;

        for entry in source_map.iter() {
            let Some(target) = destination_map.get(entry.name()) else {
                if self.config.skip_missing_destination {
                    trace!(
                        property = entry.name(),
                        destination = destination_map.type_name(),
                        "Skipping property absent from destination"
                    );
                    continue;
                }
                return Err(MappingError::PropertyNotFound {
                    property: entry.name().to_string(),
                    source_type_name: source_map.type_name(),
                    destination_type_name: destination_map.type_name(),
                });
            };

            let pair = PropertyPair {
                name: entry.name(),
                source_type_name: source_map.type_name(),
                source_type: entry.property_type(),
                destination_type_name: destination_map.type_name(),
                destination_type: target.property_type(),
            };

            if pair.source_type != pair.destination_type {
                return Err(pair.mismatch());
            }

            dispatch(&pair, entry, target, source, destination)?;
            written += 1;
        }

        debug!(
            source = source_map.type_name(),
            destination = destination_map.type_name(),
            written,
            "Mapped instance"
        );
        Ok(written)
    }
}

/// One source/destination property pairing, as reported in errors
struct PropertyPair<'a> {
    name: &'a str,
    source_type_name: &'static str,
    source_type: PropertyType,
    destination_type_name: &'static str,
    destination_type: PropertyType,
}

impl PropertyPair<'_> {
    fn mismatch(&self) -> MappingError {
        MappingError::PropertyTypeMismatch {
            property: self.name.to_string(),
            source_type_name: self.source_type_name,
            source_type: self.source_type.to_string(),
            destination_type_name: self.destination_type_name,
            destination_type: self.destination_type.to_string(),
        }
    }

    fn unsupported(&self) -> MappingError {
        MappingError::UnsupportedType {
            type_name: self.source_type_name,
            property: self.name.to_string(),
            source_type: self.source_type.to_string(),
            destination_type: self.destination_type.to_string(),
        }
    }
}

/// Select the typed copy path for a matched property
fn dispatch<S, D>(
    pair: &PropertyPair<'_>,
    entry: &PropertyEntry<S>,
    target: &PropertyEntry<D>,
    source: &S,
    destination: &mut D,
) -> MappingResult<()> {
    use crate::cache::BoundAccessors as B;

    match (entry.accessors(), target.accessors()) {
        (B::I8(from), B::I8(to)) => copy_slot(pair, from, to, source, destination),
        (B::I16(from), B::I16(to)) => copy_slot(pair, from, to, source, destination),
        (B::I32(from), B::I32(to)) => copy_slot(pair, from, to, source, destination),
        (B::I64(from), B::I64(to)) => copy_slot(pair, from, to, source, destination),
        (B::U8(from), B::U8(to)) => copy_slot(pair, from, to, source, destination),
        (B::U16(from), B::U16(to)) => copy_slot(pair, from, to, source, destination),
        (B::U32(from), B::U32(to)) => copy_slot(pair, from, to, source, destination),
        (B::U64(from), B::U64(to)) => copy_slot(pair, from, to, source, destination),
        (B::Char(from), B::Char(to)) => copy_slot(pair, from, to, source, destination),
        (B::F32(from), B::F32(to)) => copy_slot(pair, from, to, source, destination),
        (B::F64(from), B::F64(to)) => copy_slot(pair, from, to, source, destination),
        (B::Decimal(from), B::Decimal(to)) => copy_slot(pair, from, to, source, destination),
        (B::Bool(from), B::Bool(to)) => copy_slot(pair, from, to, source, destination),
        (B::String(from), B::String(to)) => copy_slot(pair, from, to, source, destination),
        (B::DateTime(from), B::DateTime(to)) => copy_slot(pair, from, to, source, destination),
        (B::Uuid(from), B::Uuid(to)) => copy_slot(pair, from, to, source, destination),
        // Types were compared before dispatch; a new kind without an arm lands here.
        _ => Err(pair.unsupported()),
    }
}

fn copy_slot<S, D, V>(
    pair: &PropertyPair<'_>,
    from: &Slot<S, V>,
    to: &Slot<D, V>,
    source: &S,
    destination: &mut D,
) -> MappingResult<()> {
    match (from, to) {
        (Slot::Required(from), Slot::Required(to)) => {
            copy_value(pair, from, to, source, destination)
        }
        (Slot::Optional(from), Slot::Optional(to)) => {
            copy_value(pair, from, to, source, destination)
        }
        _ => Err(pair.unsupported()),
    }
}

fn copy_value<S, D, V>(
    pair: &PropertyPair<'_>,
    from: &AccessorPair<S, V>,
    to: &AccessorPair<D, V>,
    source: &S,
    destination: &mut D,
) -> MappingResult<()> {
    let Some(get) = from.getter() else {
        return Err(MappingError::MissingGetter {
            type_name: pair.source_type_name,
            property: pair.name.to_string(),
        });
    };
    let Some(set) = to.setter() else {
        return Err(MappingError::MissingSetter {
            type_name: pair.destination_type_name,
            property: pair.name.to_string(),
        });
    };
    set(destination, get(source));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspect::PropertyList;
    use crate::mapping::{ConstructionError, RegistrationError};
    use crate::models::ValueKind;
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Invoice {
        number: u32,
        total: Decimal,
        issued: DateTime<Utc>,
        paid: bool,
    }

    crate::mappable!(Invoice {
        number: u32,
        total: Decimal,
        issued: DateTime<Utc>,
        paid: bool,
    });

    #[derive(Debug, Default, Clone, PartialEq)]
    struct InvoiceSummary {
        number: u32,
        paid: bool,
        reference: Option<Uuid>,
    }

    crate::mappable!(InvoiceSummary {
        number: u32,
        paid: bool,
        reference: Option<Uuid>,
    });

    #[derive(Debug, Default)]
    struct WrongNumber {
        number: String,
    }

    crate::mappable!(WrongNumber { number: String });

    #[derive(Debug, Default)]
    struct Receipt {
        reference: Uuid,
    }

    crate::mappable!(Receipt { reference: Uuid });

    #[derive(Debug, Default)]
    struct Audit {
        number: u32,
        paid: bool,
    }

    impl Mappable for Audit {
        fn construct() -> Result<Self, ConstructionError> {
            Ok(Audit::default())
        }

        fn describe(props: &mut PropertyList<Self>) {
            props
                .write_only("number", |a: &mut Audit, v: u32| a.number = v)
                .read_only("paid", |a: &Audit| a.paid);
        }
    }

    #[derive(Debug)]
    struct Unbuildable {
        number: u32,
    }

    impl Mappable for Unbuildable {
        fn construct() -> Result<Self, ConstructionError> {
            Err(ConstructionError::new("requires a number range"))
        }

        fn describe(props: &mut PropertyList<Self>) {
            props.read_write(
                "number",
                |u: &Unbuildable| u.number,
                |u: &mut Unbuildable, v| u.number = v,
            );
        }
    }

    fn invoice() -> Invoice {
        Invoice {
            number: 42,
            total: Decimal::new(12_345, 2),
            issued: DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
            paid: true,
        }
    }

    #[test]
    fn test_register_and_map_same_type() {
        let mapper = Mapper::new();
        mapper.register::<Invoice>().unwrap();

        let source = invoice();
        let copy: Invoice = mapper.map(&source).unwrap();
        assert_eq!(copy, source);
    }

    #[test]
    fn test_partial_overlap_keeps_defaults() {
        let mapper = Mapper::new();
        mapper.register::<Invoice>().unwrap();
        mapper.register::<InvoiceSummary>().unwrap();

        let summary: InvoiceSummary = mapper.map(&invoice()).unwrap();
        assert_eq!(summary.number, 42);
        assert!(summary.paid);
        assert_eq!(summary.reference, None);
    }

    #[test]
    fn test_type_mismatch() {
        let mapper = Mapper::new();
        mapper.register::<Invoice>().unwrap();
        mapper.register::<WrongNumber>().unwrap();

        let err = mapper.map::<Invoice, WrongNumber>(&invoice()).unwrap_err();
        match err {
            MappingError::PropertyTypeMismatch {
                property,
                source_type,
                destination_type,
                ..
            } => {
                assert_eq!(property, "number");
                assert_eq!(source_type, "u32");
                assert_eq!(destination_type, "string");
            }
            other => panic!("Expected PropertyTypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_unregistered_source() {
        let mapper = Mapper::new();
        mapper.register::<InvoiceSummary>().unwrap();

        let err = mapper
            .map::<Invoice, InvoiceSummary>(&invoice())
            .unwrap_err();
        assert!(matches!(
            err,
            MappingError::TypeNotRegistered { type_name } if type_name.ends_with("Invoice")
        ));
    }

    #[test]
    fn test_construction_failure_surfaces() {
        let mapper = Mapper::new();
        mapper.register::<Invoice>().unwrap();
        mapper.register::<Unbuildable>().unwrap();

        let err = mapper.map::<Invoice, Unbuildable>(&invoice()).unwrap_err();
        match err {
            MappingError::ConstructionFailure { source, .. } => {
                assert_eq!(source.reason(), "requires a number range");
            }
            other => panic!("Expected ConstructionFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_partial_accessors_fail_at_map_time() {
        let mapper = Mapper::with_config(MapperConfig::new().with_partial_accessors(true));
        mapper.register::<Audit>().unwrap();
        mapper.register::<InvoiceSummary>().unwrap();

        // Audit.number has no getter
        let err = mapper
            .map::<Audit, InvoiceSummary>(&Audit::default())
            .unwrap_err();
        assert!(matches!(
            err,
            MappingError::MissingGetter { ref property, .. } if property == "number"
        ));

        // Audit.paid has no setter; number is written first
        let mut audit = Audit::default();
        let summary = InvoiceSummary {
            number: 9,
            paid: true,
            reference: None,
        };
        let err = mapper.map_into(&summary, &mut audit).unwrap_err();
        assert!(matches!(
            err,
            MappingError::MissingSetter { ref property, .. } if property == "paid"
        ));
        assert_eq!(audit.number, 9);
    }

    #[test]
    fn test_partial_accessors_rejected_by_default() {
        let mapper = Mapper::new();
        let err = mapper.register::<Audit>().unwrap_err();
        assert!(matches!(err, RegistrationError::MissingGetter { .. }));
        assert!(!mapper.is_registered::<Audit>());
    }

    #[test]
    fn test_strict_mode_rejects_source_only_property() {
        let mapper = Mapper::with_config(MapperConfig::strict());
        mapper.register::<Invoice>().unwrap();
        mapper.register::<InvoiceSummary>().unwrap();

        let err = mapper
            .map::<Invoice, InvoiceSummary>(&invoice())
            .unwrap_err();
        assert!(matches!(
            err,
            MappingError::PropertyNotFound { ref property, .. } if property == "total"
        ));
    }

    #[test]
    fn test_map_into_counts_written() {
        let mapper = Mapper::new();
        mapper.register::<Invoice>().unwrap();
        mapper.register::<InvoiceSummary>().unwrap();

        let mut summary = InvoiceSummary::default();
        let written = mapper.map_into(&invoice(), &mut summary).unwrap();
        assert_eq!(written, 2);
        assert_eq!(summary.number, 42);
    }

    #[test]
    fn test_plan() {
        let mapper = Mapper::new();
        mapper.register::<Invoice>().unwrap();
        mapper.register::<InvoiceSummary>().unwrap();
        mapper.register::<WrongNumber>().unwrap();

        let plan = mapper.plan::<Invoice, InvoiceSummary>().unwrap();
        assert!(plan.is_compatible());
        assert_eq!(plan.mapped_properties(), vec!["number", "paid"]);
        assert_eq!(plan.extras, vec!["total", "issued"]);
        assert_eq!(plan.gaps, vec!["reference"]);
        assert_eq!(plan.stats.direct_mapped, 2);

        let plan = mapper.plan::<Invoice, WrongNumber>().unwrap();
        assert!(!plan.is_compatible());
        assert_eq!(
            plan.mismatches[0].source_type,
            PropertyType::required(ValueKind::U32)
        );
        assert_eq!(
            plan.mismatches[0].destination_type,
            PropertyType::required(ValueKind::String)
        );
    }

    fn pair_of<'a, S, D>(from: &'a PropertyEntry<S>, to: &PropertyEntry<D>) -> PropertyPair<'a> {
        PropertyPair {
            name: from.name(),
            source_type_name: "source",
            source_type: from.property_type(),
            destination_type_name: "destination",
            destination_type: to.property_type(),
        }
    }

    #[test]
    fn test_dispatch_guard_reports_optionality() {
        let mapper = Mapper::new();
        mapper.register::<Receipt>().unwrap();
        mapper.register::<InvoiceSummary>().unwrap();

        let receipts = mapper.accessors::<Receipt>().unwrap();
        let summaries = mapper.accessors::<InvoiceSummary>().unwrap();
        let from = receipts.get("reference").unwrap();
        let to = summaries.get("reference").unwrap();

        let mut summary = InvoiceSummary::default();
        let receipt = Receipt {
            reference: Uuid::new_v4(),
        };
        let pair = pair_of(from, to);
        let result = dispatch(&pair, from, to, &receipt, &mut summary);
        match result.unwrap_err() {
            MappingError::UnsupportedType {
                property,
                source_type,
                destination_type,
                ..
            } => {
                assert_eq!(property, "reference");
                assert_eq!(source_type, "uuid");
                assert_eq!(destination_type, "Option<uuid>");
            }
            other => panic!("Expected UnsupportedType, got {:?}", other),
        }
        assert_eq!(summary.reference, None);
    }

    #[test]
    fn test_dispatch_guard_reports_both_kinds() {
        let mapper = Mapper::new();
        mapper.register::<Receipt>().unwrap();
        mapper.register::<WrongNumber>().unwrap();

        let receipts = mapper.accessors::<Receipt>().unwrap();
        let numbers = mapper.accessors::<WrongNumber>().unwrap();
        let from = receipts.get("reference").unwrap();
        let to = numbers.get("number").unwrap();

        let receipt = Receipt::default();
        let mut wrong = WrongNumber::default();
        let pair = pair_of(from, to);
        let result = dispatch(&pair, from, to, &receipt, &mut wrong);
        assert_eq!(
            result.unwrap_err().to_string(),
            "No dispatch for 'reference' on source: uuid to string"
        );
    }
}
