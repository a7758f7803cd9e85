//! Filter engine
//!
//! Validates the registry's criteria and AND-composes one predicate
//! fragment per criterion. Any failure aborts the whole compilation
//! before the data source is touched; there is no partial filter.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;

use crate::compiler::{Predicate, PredicateCompiler};
use crate::config::UnknownFieldPolicy;
use crate::errors::{FilterError, FilterResult};
use crate::model::{FilterCriterion, Registry};
use crate::observability::{log_rejection, Event};

/// Compiles registry filters into a composite predicate
pub struct FilterEngine;

impl FilterEngine {
    /// Compiles the registry's filter criteria
    pub fn compile<T>(registry: &Registry<T>) -> FilterResult<CompiledFilter<T>> {
        Self::compile_criteria(registry).map_err(|err| {
            log_rejection("filter", &err);
            err
        })
    }

    /// Compiles the filters and returns a lazy view over `source`
    pub fn apply<I, T>(
        source: I,
        registry: &Registry<T>,
    ) -> FilterResult<Filtered<I::IntoIter, T>>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        Ok(Self::compile(registry)?.apply(source))
    }

    fn compile_criteria<T>(registry: &Registry<T>) -> FilterResult<CompiledFilter<T>> {
        if !registry.is_initialized() {
            return Err(FilterError::NotInitialized);
        }

        let config = registry.config();
        let criteria = registry.filters();

        for mapping in registry.mappings().iter().filter(|m| m.required()) {
            let satisfied = criteria
                .iter()
                .any(|c| c.targets(mapping.key()) && !is_empty_skip(c, registry));
            if !satisfied {
                return Err(FilterError::RequiredFilterMissing(mapping.key().to_string()));
            }
        }

        let mut compiled = CompiledFilter::always();
        if criteria.is_empty() {
            return Ok(compiled);
        }

        for criterion in criteria {
            let Some(mapping) = registry.lookup(&criterion.field) else {
                match config.unknown_field_policy {
                    UnknownFieldPolicy::Ignore => {
                        tracing::debug!(
                            event = %Event::UnknownFieldIgnored,
                            field = %criterion.field,
                            "filter on unregistered field ignored"
                        );
                        compiled.skipped.push(criterion.clone());
                        continue;
                    }
                    UnknownFieldPolicy::Throw => {
                        return Err(FilterError::UnknownField(criterion.field.clone()));
                    }
                }
            };

            if is_empty_skip(criterion, registry) {
                tracing::debug!(
                    event = %Event::CriterionSkipped,
                    field = %criterion.field,
                    operator = %criterion.operator,
                    "filter with empty value skipped"
                );
                compiled.skipped.push(criterion.clone());
                continue;
            }

            let fragment =
                PredicateCompiler::compile(mapping, criterion.operator, &criterion.value, config)
                    .map_err(|err| err.in_criterion(mapping.key(), criterion.operator))?;

            compiled.predicate = compiled.predicate.and(fragment);
            compiled.fragments += 1;
        }

        tracing::debug!(
            event = %Event::FilterCompiled,
            fragments = compiled.fragments,
            skipped = compiled.skipped.len(),
            predicate = %compiled.predicate,
            "filter compiled"
        );

        Ok(compiled)
    }
}

fn is_empty_skip<T>(criterion: &FilterCriterion, registry: &Registry<T>) -> bool {
    !criterion.has_value()
        && registry
            .config()
            .empty_value_policy
            .skips(criterion.operator)
}

/// A composite predicate ready to be applied
pub struct CompiledFilter<T> {
    predicate: Predicate<T>,
    fragments: usize,
    skipped: Vec<FilterCriterion>,
}

impl<T> fmt::Debug for CompiledFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledFilter")
            .field("predicate", &self.predicate)
            .field("fragments", &self.fragments)
            .field("skipped", &self.skipped)
            .finish()
    }
}

impl<T> CompiledFilter<T> {
    fn always() -> Self {
        Self {
            predicate: Predicate::Always,
            fragments: 0,
            skipped: Vec::new(),
        }
    }

    /// Returns true if the entity passes every criterion
    pub fn matches(&self, entity: &T) -> bool {
        self.predicate.matches(entity)
    }

    pub fn predicate(&self) -> &Predicate<T> {
        &self.predicate
    }

    /// Number of criteria compiled into the predicate
    pub fn fragments(&self) -> usize {
        self.fragments
    }

    /// Criteria that were skipped (unknown field or empty value)
    pub fn skipped(&self) -> &[FilterCriterion] {
        &self.skipped
    }

    /// Returns true if the filter keeps every entity
    pub fn is_identity(&self) -> bool {
        self.predicate.is_always()
    }

    /// Returns a lazy view over the items that pass the filter
    pub fn apply<I>(self, source: I) -> Filtered<I::IntoIter, T>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        Filtered {
            inner: source.into_iter(),
            predicate: self.predicate,
            _entity: PhantomData,
        }
    }
}

/// Lazy filtered view over a data source
pub struct Filtered<I, T> {
    inner: I,
    predicate: Predicate<T>,
    _entity: PhantomData<fn(&T)>,
}

impl<I, T> Iterator for Filtered<I, T>
where
    I: Iterator,
    I::Item: Borrow<T>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let predicate = &self.predicate;
        self.inner.find(|item| predicate.matches(item.borrow()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}
