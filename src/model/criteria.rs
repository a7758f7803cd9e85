//! Filter and sort criteria
//!
//! Criteria are plain `(field, operator, value)` triples as produced by a
//! transport layer. Fields are matched against registry keys
//! case-insensitively; values are untyped text whose grammar depends on
//! the resolved field's kind and the operator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Operator;
use crate::errors::{FilterError, FilterResult};

/// A single filter criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriterion {
    /// Registry key (case-insensitive)
    pub field: String,
    /// Comparison operator
    pub operator: Operator,
    /// Raw operand text
    #[serde(default)]
    pub value: String,
}

impl FilterCriterion {
    /// Create a new filter criterion
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Create a criterion for an operator that takes no operand
    pub fn structural(field: impl Into<String>, operator: Operator) -> Self {
        Self::new(field, operator, "")
    }

    /// Returns true if this criterion targets the given key
    pub fn targets(&self, key: &str) -> bool {
        self.field.trim().to_lowercase() == key.trim().to_lowercase()
    }

    /// Returns true if the criterion carries an operand
    pub fn has_value(&self) -> bool {
        !self.value.is_empty()
    }
}

impl fmt::Display for FilterCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:?}", self.field, self.operator, self.value)
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(FilterError::ArgumentError {
                field: "direction".into(),
                reason: format!("invalid sort direction '{}'", s),
            }),
        }
    }
}

impl TryFrom<String> for SortDirection {
    type Error = FilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single sort criterion; list position decides key priority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortCriterion {
    /// Registry key (case-insensitive)
    pub field: String,
    /// Sort direction
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortCriterion {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Wire-level request: filters plus optional sorts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub filters: Vec<FilterCriterion>,
    #[serde(default)]
    pub sorts: Vec<SortCriterion>,
}

#[derive(Deserialize)]
struct WireRequest {
    #[serde(default)]
    filters: Vec<WireFilter>,
    #[serde(default)]
    sorts: Vec<SortCriterion>,
}

#[derive(Deserialize)]
struct WireFilter {
    field: String,
    operator: String,
    #[serde(default)]
    value: String,
}

impl FilterRequest {
    /// Parse a request from its JSON representation.
    ///
    /// Operator names are resolved after the payload is decoded, so an
    /// unrecognized name is reported as `UnknownOperator` verbatim.
    pub fn from_json_str(json: &str) -> FilterResult<Self> {
        let wire: WireRequest =
            serde_json::from_str(json).map_err(|e| FilterError::ArgumentError {
                field: "request".into(),
                reason: e.to_string(),
            })?;

        let filters = wire
            .filters
            .into_iter()
            .map(|f| -> FilterResult<FilterCriterion> {
                Ok(FilterCriterion {
                    field: f.field,
                    operator: f.operator.parse()?,
                    value: f.value,
                })
            })
            .collect::<FilterResult<Vec<_>>>()?;

        Ok(Self {
            filters,
            sorts: wire.sorts,
        })
    }

    /// Adds a filter criterion
    pub fn filter(mut self, criterion: FilterCriterion) -> Self {
        self.filters.push(criterion);
        self
    }

    /// Adds a sort criterion
    pub fn sort(mut self, criterion: SortCriterion) -> Self {
        self.sorts.push(criterion);
        self
    }
}
