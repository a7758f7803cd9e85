//! Engine configuration
//!
//! Controls the policies the filter and sort engines apply to criteria
//! that are not errors in themselves: unknown fields, empty values, and
//! how text is compared.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::Operator;
use crate::errors::{FilterError, FilterResult};
use crate::observability::Event;

/// Behavior when a criterion references a key absent from the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFieldPolicy {
    /// Skip the criterion silently
    #[default]
    Ignore,
    /// Reject the request with `UnknownField`
    Throw,
}

/// How string operands are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextMatching {
    /// Exact, case-sensitive comparison
    #[default]
    Ordinal,
    /// Both sides are lowercased before comparing
    IgnoreCase,
}

impl TextMatching {
    /// Normalizes a string according to this matching mode.
    ///
    /// `Ordinal` borrows the input unchanged.
    pub fn fold<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            TextMatching::Ordinal => Cow::Borrowed(value),
            TextMatching::IgnoreCase => Cow::Owned(value.to_lowercase()),
        }
    }
}

/// Behavior when a criterion carries an empty value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyValuePolicy {
    /// Any criterion with an empty value is skipped
    #[default]
    SkipCriterion,
    /// Skip empty values, except for operators that take no operand
    /// (`IsNull`, `IsNotNull`, `IsEmpty`, `IsNotEmpty`)
    SkipUnlessStructural,
}

impl EmptyValuePolicy {
    /// Returns true if a criterion with an empty value is skipped
    pub fn skips(&self, operator: Operator) -> bool {
        match self {
            EmptyValuePolicy::SkipCriterion => true,
            EmptyValuePolicy::SkipUnlessStructural => !operator.is_structural(),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Unknown field handling (default: ignore)
    #[serde(default)]
    pub unknown_field_policy: UnknownFieldPolicy,

    /// Text comparison mode (default: ordinal)
    #[serde(default)]
    pub text_matching: TextMatching,

    /// Separator for `In`/`NotIn`/`Between` lists (default: ',')
    #[serde(default = "default_list_separator")]
    pub list_separator: char,

    /// Empty value handling (default: skip the criterion)
    #[serde(default)]
    pub empty_value_policy: EmptyValuePolicy,
}

fn default_list_separator() -> char {
    ','
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            unknown_field_policy: UnknownFieldPolicy::default(),
            text_matching: TextMatching::default(),
            list_separator: default_list_separator(),
            empty_value_policy: EmptyValuePolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Parse configuration from a JSON document
    pub fn from_json_str(json: &str) -> FilterResult<Self> {
        serde_json::from_str(json).map_err(|e| FilterError::Config(e.to_string()))
    }

    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> FilterResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| FilterError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json_str(&contents)?;

        tracing::debug!(
            event = %Event::ConfigLoaded,
            path = %path.display(),
            "engine configuration loaded"
        );

        Ok(config)
    }

    /// Set the unknown field policy
    pub fn with_unknown_field_policy(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_field_policy = policy;
        self
    }

    /// Set the text matching mode
    pub fn with_text_matching(mut self, matching: TextMatching) -> Self {
        self.text_matching = matching;
        self
    }

    /// Set the list separator
    pub fn with_list_separator(mut self, separator: char) -> Self {
        self.list_separator = separator;
        self
    }

    /// Set the empty value policy
    pub fn with_empty_value_policy(mut self, policy: EmptyValuePolicy) -> Self {
        self.empty_value_policy = policy;
        self
    }
}
