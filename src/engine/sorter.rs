//! Sort engine
//!
//! Compiles sort criteria into a multi-key ordering. The first key is the
//! primary ordering; later keys only break ties among items equal on all
//! earlier keys. Sorting is stable and deterministic.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use crate::compiler::FieldRef;
use crate::config::{TextMatching, UnknownFieldPolicy};
use crate::errors::{FilterError, FilterResult};
use crate::model::{Registry, Scalar, SortDirection};
use crate::observability::{log_rejection, Event};

/// Compiles registry sorts into an ordering
pub struct SortEngine;

impl SortEngine {
    /// Compiles the registry's sort criteria.
    ///
    /// Fails with `NoSortersSpecified` when there are none.
    pub fn compile<T>(registry: &Registry<T>) -> FilterResult<CompiledOrdering<T>> {
        Self::compile_keys(registry).map_err(|err| {
            log_rejection("sort", &err);
            err
        })
    }

    /// Compiles the sorts and returns the items of `source` in order
    pub fn apply<I, T>(source: I, registry: &Registry<T>) -> FilterResult<Vec<I::Item>>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        Ok(Self::compile(registry)?.sort(source))
    }

    fn compile_keys<T>(registry: &Registry<T>) -> FilterResult<CompiledOrdering<T>> {
        let criteria = registry.sorts();
        if criteria.is_empty() {
            return Err(FilterError::NoSortersSpecified);
        }

        let config = registry.config();
        let mut keys = Vec::with_capacity(criteria.len());

        for criterion in criteria {
            let Some(mapping) = registry.lookup(&criterion.field) else {
                match config.unknown_field_policy {
                    UnknownFieldPolicy::Ignore => {
                        tracing::debug!(
                            event = %Event::SortFieldIgnored,
                            field = %criterion.field,
                            "sort on unregistered field ignored"
                        );
                        continue;
                    }
                    UnknownFieldPolicy::Throw => {
                        return Err(FilterError::UnknownField(criterion.field.clone()));
                    }
                }
            };

            keys.push(SortKey {
                field: mapping.field_ref(),
                direction: criterion.direction,
                matching: config.text_matching,
            });
        }

        let ordering = CompiledOrdering { keys };

        tracing::debug!(
            event = %Event::SortCompiled,
            keys = ordering.keys.len(),
            ordering = %ordering,
            "ordering compiled"
        );

        Ok(ordering)
    }
}

struct SortKey<T> {
    field: FieldRef<T>,
    direction: SortDirection,
    matching: TextMatching,
}

impl<T> SortKey<T> {
    /// Reads the sort value, folding strings in `IgnoreCase` mode
    fn extract(&self, entity: &T) -> Scalar {
        match (self.field.read(entity), self.matching) {
            (Scalar::String(s), TextMatching::IgnoreCase) => Scalar::String(s.to_lowercase()),
            (value, _) => value,
        }
    }

    fn order(&self, a: &Scalar, b: &Scalar) -> Ordering {
        let ordering = a.total_compare(b);
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// A multi-key ordering over entities
pub struct CompiledOrdering<T> {
    keys: Vec<SortKey<T>>,
}

impl<T> CompiledOrdering<T> {
    /// Compares two entities key by key
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        for key in &self.keys {
            let ordering = key.order(&key.extract(a), &key.extract(b));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Number of keys after unknown fields were dropped
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Key descriptions in priority order, e.g. `money desc`
    pub fn describe(&self) -> Vec<String> {
        self.keys
            .iter()
            .map(|key| format!("{} {}", key.field.key(), key.direction.as_str()))
            .collect()
    }

    /// Sorts items stably. Each key is read once per item.
    pub fn sort<I>(&self, source: I) -> Vec<I::Item>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let mut decorated: Vec<(Vec<Scalar>, I::Item)> = source
            .into_iter()
            .map(|item| {
                let values = self
                    .keys
                    .iter()
                    .map(|key| key.extract(item.borrow()))
                    .collect();
                (values, item)
            })
            .collect();

        decorated.sort_by(|(a, _), (b, _)| {
            self.keys
                .iter()
                .zip(a.iter().zip(b.iter()))
                .map(|(key, (a, b))| key.order(a, b))
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });

        decorated.into_iter().map(|(_, item)| item).collect()
    }
}

impl<T> fmt::Display for CompiledOrdering<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe().join(", "))
    }
}

impl<T> fmt::Debug for CompiledOrdering<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompiledOrdering({})", self)
    }
}
