//! Configuration Loading Tests
//!
//! Engine configuration is read from JSON files and changes how criteria
//! are compiled, without changing what is legal.

mod common;

use std::fs;

use aerofilter::{
    EmptyValuePolicy, EngineConfig, FilterCriterion, FilterError, Operator, TextMatching,
    UnknownFieldPolicy,
};
use common::filter_with;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_config(contents: &str) -> (TempDir, std::path::PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("engine.json");
    fs::write(&path, contents).unwrap();
    (tmp, path)
}

// =============================================================================
// Loading Tests
// =============================================================================

/// A full file overrides every default.
#[test]
fn test_load_full_config() {
    let (_tmp, path) = write_config(
        r#"{
            "unknown_field_policy": "throw",
            "text_matching": "ignore_case",
            "list_separator": "|",
            "empty_value_policy": "skip_unless_structural"
        }"#,
    );

    let config = EngineConfig::load(&path).unwrap();
    assert_eq!(config.unknown_field_policy, UnknownFieldPolicy::Throw);
    assert_eq!(config.text_matching, TextMatching::IgnoreCase);
    assert_eq!(config.list_separator, '|');
    assert_eq!(config.empty_value_policy, EmptyValuePolicy::SkipUnlessStructural);
}

/// An empty object yields the defaults.
#[test]
fn test_load_empty_object() {
    let (_tmp, path) = write_config("{}");
    assert_eq!(EngineConfig::load(&path).unwrap(), EngineConfig::default());
}

/// Missing files and malformed JSON are configuration errors.
#[test]
fn test_load_failures() {
    let tmp = TempDir::new().unwrap();
    let missing = EngineConfig::load(tmp.path().join("absent.json")).unwrap_err();
    assert!(matches!(missing, FilterError::Config(_)));

    let (_tmp, path) = write_config("{ not json");
    let malformed = EngineConfig::load(&path).unwrap_err();
    assert_eq!(malformed.code(), "AERO_FILTER_CONFIG_INVALID");
}

// =============================================================================
// Behavior Tests
// =============================================================================

/// A loaded configuration drives compilation.
#[test]
fn test_loaded_config_applies() {
    let (_tmp, path) = write_config(
        r#"{ "text_matching": "ignore_case", "list_separator": ";" }"#,
    );
    let config = EngineConfig::load(&path).unwrap();

    let names = filter_with(
        config.clone(),
        vec![FilterCriterion::new("name", Operator::In, "alice; DAVE")],
    )
    .unwrap();
    assert_eq!(names, vec!["Alice", "Dave"]);

    let ranged = filter_with(
        config,
        vec![FilterCriterion::new("money", Operator::Between, "100;200")],
    )
    .unwrap();
    assert_eq!(ranged, vec!["Alice", "Bob"]);
}

/// The comma is an ordinary character once the separator changes.
#[test]
fn test_custom_separator_rejects_commas_in_ranges() {
    let config = EngineConfig::default().with_list_separator(';');
    let err = filter_with(
        config,
        vec![FilterCriterion::new("money", Operator::Between, "100,200")],
    )
    .unwrap_err();
    assert!(matches!(err.root_cause(), FilterError::ArgumentError { .. }));
}
