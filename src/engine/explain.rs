//! Explain output
//!
//! Produces deterministic, human-readable output describing what a
//! registry's criteria compile to, or why they were rejected.

use std::fmt;

use super::filter::{CompiledFilter, FilterEngine};
use super::sorter::{CompiledOrdering, SortEngine};
use crate::errors::FilterError;
use crate::model::Registry;

/// Explain output
#[derive(Debug, Clone, PartialEq)]
pub struct Explain {
    /// Whether compilation succeeded
    pub accepted: bool,
    /// Rendered composite predicate
    pub predicate: Option<String>,
    /// Number of criteria compiled into the predicate
    pub fragments: usize,
    /// Criteria skipped as no-ops
    pub skipped: Vec<String>,
    /// Sort keys in priority order
    pub sort: Vec<String>,
    /// Rejection reason (if rejected)
    pub rejection_reason: Option<String>,
    /// Rejection error code (if rejected)
    pub rejection_code: Option<String>,
}

impl Explain {
    /// Compiles the registry's filters and sorts and explains the result.
    ///
    /// Sorts are only compiled when the registry has any.
    pub fn of<T>(registry: &Registry<T>) -> Self {
        let filter = match FilterEngine::compile(registry) {
            Ok(filter) => filter,
            Err(err) => return Self::from_error(&err),
        };

        if registry.sorts().is_empty() {
            return Self::from_compiled(&filter, None);
        }

        match SortEngine::compile(registry) {
            Ok(ordering) => Self::from_compiled(&filter, Some(&ordering)),
            Err(err) => Self::from_error(&err),
        }
    }

    /// Creates an explanation from compiled parts
    pub fn from_compiled<T>(
        filter: &CompiledFilter<T>,
        ordering: Option<&CompiledOrdering<T>>,
    ) -> Self {
        Self {
            accepted: true,
            predicate: Some(filter.predicate().to_string()),
            fragments: filter.fragments(),
            skipped: filter.skipped().iter().map(|c| c.to_string()).collect(),
            sort: ordering.map(CompiledOrdering::describe).unwrap_or_default(),
            rejection_reason: None,
            rejection_code: None,
        }
    }

    /// Creates an explanation from a compilation error
    pub fn from_error(err: &FilterError) -> Self {
        Self {
            accepted: false,
            predicate: None,
            fragments: 0,
            skipped: Vec::new(),
            sort: Vec::new(),
            rejection_reason: Some(err.to_string()),
            rejection_code: Some(err.code().to_string()),
        }
    }
}

impl fmt::Display for Explain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLAIN ===")?;

        if self.accepted {
            writeln!(f, "Status: ACCEPTED")?;
            if let Some(predicate) = &self.predicate {
                writeln!(f, "Predicate: {}", predicate)?;
            }
            writeln!(f, "Fragments: {}", self.fragments)?;
            if !self.skipped.is_empty() {
                writeln!(f, "Skipped:")?;
                for criterion in &self.skipped {
                    writeln!(f, "  - {}", criterion)?;
                }
            }
            if !self.sort.is_empty() {
                writeln!(f, "Sort: {}", self.sort.join(", "))?;
            }
        } else {
            writeln!(f, "Status: REJECTED")?;
            if let Some(code) = &self.rejection_code {
                writeln!(f, "Error Code: {}", code)?;
            }
            if let Some(reason) = &self.rejection_reason {
                writeln!(f, "Reason: {}", reason)?;
            }
        }

        Ok(())
    }
}
