//! Nested Path Tests
//!
//! A field registered by dotted path behaves exactly like the same field
//! registered with a native accessor chain:
//! - Same kind and nullability
//! - Same filter results for every operator tried
//! - Absent optional objects read as null
//! - Bad paths fail at build time with the offending type named

mod common;

use aerofilter::{
    EngineConfig, FilterCriterion, FilterError, Operator, PathResolver, RegistryBuilder, ScalarKind,
    SortCriterion, SortEngine,
};
use common::{customers, filter_registry, owned_names, Customer};

// =============================================================================
// Helper Functions
// =============================================================================

fn paths_and_natives() -> RegistryBuilder<Customer> {
    let mut builder = RegistryBuilder::new();
    builder
        .register_path("brand", "car.brand.name")
        .register("brandNative", |c: &Customer| {
            c.car.as_ref().map(|car| car.brand.name.clone())
        })
        .register_path("carYear", "Car.Year")
        .register("carYearNative", |c: &Customer| c.car.as_ref().map(|car| car.year))
        .register_path("born", "bornDate")
        .register("bornNative", |c: &Customer| c.born_date);
    builder
}

fn run(field: &str, operator: Operator, value: &str) -> Vec<String> {
    let mut builder = paths_and_natives();
    builder
        .with_config(EngineConfig::default().with_empty_value_policy(
            aerofilter::EmptyValuePolicy::SkipUnlessStructural,
        ))
        .add_filter(FilterCriterion::new(field, operator, value));
    let registry = builder.build().unwrap();
    filter_registry(&registry).unwrap()
}

// =============================================================================
// Equivalence Tests
// =============================================================================

/// Path and native mappings infer the same kind and nullability.
#[test]
fn test_path_and_native_mappings_agree() {
    let registry = paths_and_natives().build().unwrap();

    for (path_key, native_key) in [
        ("brand", "brandNative"),
        ("carYear", "carYearNative"),
        ("born", "bornNative"),
    ] {
        let path = registry.lookup(path_key).unwrap();
        let native = registry.lookup(native_key).unwrap();
        assert_eq!(path.kind(), native.kind(), "{path_key}");
        assert_eq!(path.nullable(), native.nullable(), "{path_key}");
        assert!(path.path().is_some());
        assert!(native.path().is_none());
    }
}

/// Every operator selects the same customers through either mapping.
#[test]
fn test_path_and_native_filters_agree() {
    let cases = [
        ("brand", Operator::Equals, "Volvo"),
        ("brand", Operator::NotEquals, "Volvo"),
        ("brand", Operator::StartsWith, "A"),
        ("brand", Operator::In, "Audi,Saab"),
        ("brand", Operator::IsNull, ""),
        ("carYear", Operator::GreaterThan, "2016"),
        ("carYear", Operator::NotBetween, "2015,2019"),
        ("carYear", Operator::IsNotNull, ""),
        ("born", Operator::IsEqualToYear, "1990-01-01"),
        ("born", Operator::IsNull, ""),
    ];

    for (field, operator, value) in cases {
        let by_path = run(field, operator, value);
        let by_native = run(&format!("{field}Native"), operator, value);
        assert_eq!(by_path, by_native, "{field} {operator} {value:?}");
    }
}

/// Concrete results for the nested string path.
#[test]
fn test_nested_path_results() {
    assert_eq!(run("brand", Operator::Equals, "Volvo"), vec!["Alice", "Dave"]);
    // Charlie has no car; a missing object is null, not a match
    assert_eq!(run("brand", Operator::NotEquals, "Volvo"), vec!["Bob"]);
    assert_eq!(run("brand", Operator::IsNull, ""), vec!["Charlie"]);
}

/// Sorting by a path puts absent objects first in ascending order.
#[test]
fn test_sort_by_path() {
    let mut builder = paths_and_natives();
    builder.add_sort(SortCriterion::asc("carYear"));
    let registry = builder.build().unwrap();

    let sorted = SortEngine::apply(customers(), &registry).unwrap();
    assert_eq!(owned_names(sorted), vec!["Charlie", "Alice", "Bob", "Dave"]);
}

// =============================================================================
// Resolution Failure Tests
// =============================================================================

/// An unknown segment fails the build, naming the type it was looked up on.
#[test]
fn test_unknown_segment_fails_build() {
    let mut builder = RegistryBuilder::<Customer>::new();
    builder
        .register("name", |c: &Customer| c.name.clone())
        .register_path("engine", "car.engine.power");

    match builder.build().unwrap_err() {
        FilterError::PathResolutionError { path, entity, .. } => {
            assert_eq!(path, "car.engine.power");
            assert_eq!(entity, "Car");
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// A path must end at a scalar leaf.
#[test]
fn test_path_to_object_fails() {
    let err = PathResolver::resolve::<Customer>("car.brand").unwrap_err();
    assert_eq!(err.code(), "AERO_FILTER_PATH_UNRESOLVED");
}

/// Resolution reports the leaf kind and optional hops.
#[test]
fn test_resolution_metadata() {
    let resolved = PathResolver::resolve::<Customer>("CAR.brand.NAME").unwrap();
    assert_eq!(resolved.kind(), ScalarKind::String);
    assert!(resolved.nullable());
    assert_eq!(resolved.canonical(), "car.brand.name");

    let money = PathResolver::resolve::<Customer>("money").unwrap();
    assert!(!money.nullable());
}
