//! Sorting Tests
//!
//! Tests for multi-key ordering:
//! - Secondary keys only break ties
//! - Sorting is stable and deterministic across re-runs
//! - Zero sort criteria is an error, unknown fields are skipped

mod common;

use aerofilter::{
    EngineConfig, FilterCriterion, FilterError, Operator, QueryEngine, Registry, SortCriterion,
    SortEngine, UnknownFieldPolicy,
};
use common::{customers, names, owned_names, Customer};

// =============================================================================
// Helper Functions
// =============================================================================

fn registry_with(sorts: Vec<SortCriterion>, config: EngineConfig) -> Registry<Customer> {
    let mut builder = common::builder();
    builder.with_config(config).set_sorts(sorts);
    builder.build().unwrap()
}

fn sorted(sorts: Vec<SortCriterion>) -> Vec<String> {
    let registry = registry_with(sorts, EngineConfig::default());
    owned_names(SortEngine::apply(customers(), &registry).unwrap())
}

fn tied_customers() -> Vec<Customer> {
    let mut items = customers();
    // Give Alice and Dave the same money as Bob
    items[0].money = 200;
    items[3].money = 200;
    items
}

// =============================================================================
// Ordering Tests
// =============================================================================

/// Single key, both directions.
#[test]
fn test_single_key() {
    assert_eq!(
        sorted(vec![SortCriterion::asc("money")]),
        vec!["Charlie", "Alice", "Bob", "Dave"]
    );
    assert_eq!(
        sorted(vec![SortCriterion::desc("money")]),
        vec!["Dave", "Bob", "Alice", "Charlie"]
    );
}

/// money desc, then name asc on ties.
#[test]
fn test_secondary_key_breaks_ties() {
    let registry = registry_with(
        vec![SortCriterion::desc("money"), SortCriterion::asc("name")],
        EngineConfig::default(),
    );

    let mut items = tied_customers();
    items.reverse();
    let sorted = SortEngine::apply(items, &registry).unwrap();
    assert_eq!(owned_names(sorted), vec!["Alice", "Bob", "Dave", "Charlie"]);
}

/// Re-running the same compiled ordering gives the identical sequence.
#[test]
fn test_sort_is_deterministic() {
    let registry = registry_with(
        vec![SortCriterion::desc("money"), SortCriterion::asc("name")],
        EngineConfig::default(),
    );
    let items = tied_customers();

    let first = names(SortEngine::apply(&items, &registry).unwrap());
    for _ in 0..50 {
        let again = names(SortEngine::apply(&items, &registry).unwrap());
        assert_eq!(again, first);
    }
}

/// Items equal on every key keep their source order.
#[test]
fn test_sort_is_stable() {
    let registry = registry_with(vec![SortCriterion::asc("money")], EngineConfig::default());
    let items = tied_customers();

    let sorted = names(SortEngine::apply(&items, &registry).unwrap());
    assert_eq!(sorted, vec!["Charlie", "Alice", "Bob", "Dave"]);
}

/// Nulls first ascending, last descending.
#[test]
fn test_null_placement() {
    let asc = sorted(vec![SortCriterion::asc("bornDate")]);
    assert_eq!(asc, vec!["Charlie", "Bob", "Dave", "Alice"]);

    let desc = sorted(vec![SortCriterion::desc("bornDate")]);
    assert_eq!(desc, vec!["Alice", "Dave", "Bob", "Charlie"]);
}

/// Offset dates order by instant.
#[test]
fn test_offset_dates_order_by_instant() {
    assert_eq!(
        sorted(vec![SortCriterion::asc("lastSeen")]),
        vec!["Dave", "Charlie", "Alice", "Bob"]
    );
}

// =============================================================================
// Sort Criteria Tests
// =============================================================================

/// Sorting without criteria is an error.
#[test]
fn test_no_sorters_specified() {
    let registry = registry_with(vec![], EngineConfig::default());
    let err = SortEngine::apply(customers(), &registry).unwrap_err();
    assert_eq!(err, FilterError::NoSortersSpecified);
}

/// Unknown sort fields are skipped by default.
#[test]
fn test_unknown_sort_field_skipped() {
    assert_eq!(
        sorted(vec![SortCriterion::asc("shoeSize"), SortCriterion::asc("money")]),
        sorted(vec![SortCriterion::asc("money")])
    );
}

/// Under Throw an unknown sort field is rejected.
#[test]
fn test_unknown_sort_field_throws() {
    let registry = registry_with(
        vec![SortCriterion::asc("shoeSize")],
        EngineConfig::default().with_unknown_field_policy(UnknownFieldPolicy::Throw),
    );
    assert_eq!(
        SortEngine::compile(&registry).unwrap_err(),
        FilterError::UnknownField("shoeSize".into())
    );
}

// =============================================================================
// Pipeline Tests
// =============================================================================

/// Filter then sort in one call.
#[test]
fn test_query_pipeline() {
    let mut builder = common::builder();
    builder
        .add_filter(FilterCriterion::new("vip", Operator::Equals, "true"))
        .add_sort(SortCriterion::asc("money"));
    let registry = builder.build().unwrap();

    let items = customers();
    let kept = QueryEngine::apply(&items, &registry).unwrap();
    assert_eq!(names(kept), vec!["Alice", "Dave"]);
}

/// Compiled ordering compares directly.
#[test]
fn test_compiled_ordering_compare() {
    let registry = registry_with(vec![SortCriterion::desc("money")], EngineConfig::default());
    let ordering = SortEngine::compile(&registry).unwrap();
    let items = customers();

    let mut refs: Vec<&Customer> = items.iter().collect();
    refs.sort_by(|a, b| ordering.compare(a, b));
    assert_eq!(names(refs), vec!["Dave", "Bob", "Alice", "Charlie"]);
}
