//! Error types for registry construction and criterion compilation
//!
//! Error codes:
//! - AERO_FILTER_ALREADY_INITIALIZED (REJECT)
//! - AERO_FILTER_NOT_INITIALIZED (REJECT)
//! - AERO_FILTER_REQUIRED_MISSING (REJECT)
//! - AERO_FILTER_UNSUPPORTED_OPERATOR (REJECT)
//! - AERO_FILTER_PARSE_FAILED (REJECT)
//! - AERO_FILTER_INVALID_ARGUMENT (REJECT)
//! - AERO_FILTER_PATH_UNRESOLVED (REJECT)
//! - AERO_FILTER_NO_SORTERS (REJECT)
//! - AERO_FILTER_DUPLICATE_FIELD (REJECT)
//! - AERO_FILTER_UNKNOWN_FIELD (REJECT)
//! - AERO_FILTER_UNKNOWN_OPERATOR (REJECT)
//! - AERO_FILTER_CONFIG_INVALID (REJECT)
//!
//! Every error is raised before the data source is touched; there is no
//! partial application of a subset of criteria.

use thiserror::Error;

use crate::catalog::Operator;
use crate::model::ScalarKind;

/// Result type for filter and sort compilation
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors raised while building a registry or compiling its criteria
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// `build()` was called a second time on the same builder
    #[error("Registry has already been initialized")]
    AlreadyInitialized,

    /// The registry has no field mappings
    #[error("Registry has no field mappings")]
    NotInitialized,

    /// A required field has no criterion, or only an empty one
    #[error("Required filter '{0}' is missing or empty")]
    RequiredFilterMissing(String),

    /// The operator is not in the catalog for the field's type
    #[error(
        "Operator {operator} is not supported for {kind} fields (supported: {})",
        join_operators(.legal)
    )]
    UnsupportedOperatorForType {
        kind: ScalarKind,
        operator: Operator,
        legal: Vec<Operator>,
    },

    /// The raw value does not parse as the field's type
    #[error("Cannot parse '{value}' as {kind} for field '{field}'")]
    ParseError {
        field: String,
        value: String,
        kind: ScalarKind,
    },

    /// The raw value has the wrong shape for the operator
    #[error("Invalid argument for field '{field}': {reason}")]
    ArgumentError { field: String, reason: String },

    /// A dotted path does not resolve to a scalar leaf
    #[error("Cannot resolve path '{path}' on {entity}: {reason}")]
    PathResolutionError {
        path: String,
        entity: String,
        reason: String,
    },

    /// Sorting was requested without any sort criteria
    #[error("No sort criteria specified")]
    NoSortersSpecified,

    /// Two mappings share a key (case-insensitive)
    #[error("Field '{0}' is registered more than once")]
    DuplicateField(String),

    /// A criterion names a field absent from the registry under the `Throw` policy
    #[error("Unknown field '{0}'")]
    UnknownField(String),

    /// An operator name is not one of the known literals
    #[error("Unknown operator '{0}'")]
    UnknownOperator(String),

    /// Engine configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// A criterion failed to compile; wraps the underlying cause
    #[error("Filter on '{field}' with {operator} rejected: {source}")]
    InvalidCriterion {
        field: String,
        operator: Operator,
        #[source]
        source: Box<FilterError>,
    },
}

impl FilterError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            FilterError::AlreadyInitialized => "AERO_FILTER_ALREADY_INITIALIZED",
            FilterError::NotInitialized => "AERO_FILTER_NOT_INITIALIZED",
            FilterError::RequiredFilterMissing(_) => "AERO_FILTER_REQUIRED_MISSING",
            FilterError::UnsupportedOperatorForType { .. } => "AERO_FILTER_UNSUPPORTED_OPERATOR",
            FilterError::ParseError { .. } => "AERO_FILTER_PARSE_FAILED",
            FilterError::ArgumentError { .. } => "AERO_FILTER_INVALID_ARGUMENT",
            FilterError::PathResolutionError { .. } => "AERO_FILTER_PATH_UNRESOLVED",
            FilterError::NoSortersSpecified => "AERO_FILTER_NO_SORTERS",
            FilterError::DuplicateField(_) => "AERO_FILTER_DUPLICATE_FIELD",
            FilterError::UnknownField(_) => "AERO_FILTER_UNKNOWN_FIELD",
            FilterError::UnknownOperator(_) => "AERO_FILTER_UNKNOWN_OPERATOR",
            FilterError::Config(_) => "AERO_FILTER_CONFIG_INVALID",
            FilterError::InvalidCriterion { source, .. } => source.code(),
        }
    }

    /// Returns true if the error was caused by the request rather than
    /// by how the registry was set up
    pub fn is_client_error(&self) -> bool {
        match self {
            FilterError::RequiredFilterMissing(_)
            | FilterError::UnsupportedOperatorForType { .. }
            | FilterError::ParseError { .. }
            | FilterError::ArgumentError { .. }
            | FilterError::NoSortersSpecified
            | FilterError::UnknownField(_)
            | FilterError::UnknownOperator(_) => true,
            FilterError::InvalidCriterion { source, .. } => source.is_client_error(),
            _ => false,
        }
    }

    /// Returns the innermost error, unwrapping criterion context
    pub fn root_cause(&self) -> &FilterError {
        match self {
            FilterError::InvalidCriterion { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Wraps this error with the criterion that produced it
    pub(crate) fn in_criterion(self, field: impl Into<String>, operator: Operator) -> Self {
        FilterError::InvalidCriterion {
            field: field.into(),
            operator,
            source: Box::new(self),
        }
    }
}

fn join_operators(operators: &[Operator]) -> String {
    operators
        .iter()
        .map(|op| op.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
