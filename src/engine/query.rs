//! Filter-then-sort pipeline

use std::borrow::Borrow;

use super::filter::FilterEngine;
use super::sorter::SortEngine;
use crate::errors::FilterResult;
use crate::model::Registry;

/// Applies a registry's filters and sorts to a data source
pub struct QueryEngine;

impl QueryEngine {
    /// Filters `source`, then sorts the survivors if the registry has
    /// sort criteria.
    ///
    /// Both stages compile before any item is read.
    pub fn apply<I, T>(source: I, registry: &Registry<T>) -> FilterResult<Vec<I::Item>>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let filter = FilterEngine::compile(registry)?;
        let ordering = if registry.sorts().is_empty() {
            None
        } else {
            Some(SortEngine::compile(registry)?)
        };

        let filtered = filter.apply(source);
        Ok(match ordering {
            Some(ordering) => ordering.sort(filtered),
            None => filtered.collect(),
        })
    }
}
