//! Field registry
//!
//! Maps logical field keys to typed accessors and carries the criteria
//! of one logical request. A builder produces exactly one registry; a
//! second `build()` on the same builder fails with `AlreadyInitialized`.
//! The built registry is read-only and can be shared across threads.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::criteria::{FilterCriterion, FilterRequest, SortCriterion};
use super::scalar::{Scalar, ScalarKind, ScalarValue};
use crate::compiler::FieldRef;
use crate::config::EngineConfig;
use crate::errors::{FilterError, FilterResult};
use crate::observability::Event;
use crate::path::{Navigable, PathResolver, ResolvedPath};

/// Reads one scalar field from an entity
pub type Accessor<T> = Arc<dyn Fn(&T) -> Scalar + Send + Sync>;

/// Association between a filter key and an entity accessor
pub struct FieldMapping<T> {
    key: String,
    kind: ScalarKind,
    nullable: bool,
    required: bool,
    path: Option<String>,
    accessor: Accessor<T>,
}

impl<T: 'static> FieldMapping<T> {
    /// Create a mapping from a native accessor.
    ///
    /// Kind and nullability are taken from the accessor's return type.
    pub fn new<V, F>(key: impl Into<String>, accessor: F, required: bool) -> Self
    where
        V: ScalarValue,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            kind: V::KIND,
            nullable: V::NULLABLE,
            required,
            path: None,
            accessor: Arc::new(move |entity: &T| accessor(entity).into_scalar()),
        }
    }
}

impl<T: Navigable> FieldMapping<T> {
    /// Create a mapping from a resolved dotted path
    pub fn from_path(key: impl Into<String>, resolved: &ResolvedPath, required: bool) -> Self {
        Self {
            key: key.into(),
            kind: resolved.kind(),
            nullable: resolved.nullable(),
            required,
            path: Some(resolved.canonical()),
            accessor: PathResolver::accessor::<T>(resolved),
        }
    }
}

impl<T> FieldMapping<T> {
    /// Returns the key as registered
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn required(&self) -> bool {
        self.required
    }

    /// Returns the canonical path when the mapping was registered by path
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Reads the field from an entity
    pub fn read(&self, entity: &T) -> Scalar {
        (self.accessor)(entity)
    }

    /// Returns a shareable reference for use in compiled predicates
    pub fn field_ref(&self) -> FieldRef<T> {
        FieldRef::new(self.key.clone(), Arc::clone(&self.accessor))
    }
}

impl<T> fmt::Debug for FieldMapping<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMapping")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("nullable", &self.nullable)
            .field("required", &self.required)
            .field("path", &self.path)
            .finish()
    }
}

/// Collects mappings and criteria, then freezes them into a [`Registry`]
pub struct RegistryBuilder<T> {
    mappings: Vec<FieldMapping<T>>,
    deferred: Vec<FilterError>,
    filters: Vec<FilterCriterion>,
    sorts: Vec<SortCriterion>,
    config: EngineConfig,
    initialized: bool,
}

impl<T> Default for RegistryBuilder<T> {
    fn default() -> Self {
        Self {
            mappings: Vec::new(),
            deferred: Vec::new(),
            filters: Vec::new(),
            sorts: Vec::new(),
            config: EngineConfig::default(),
            initialized: false,
        }
    }
}

impl<T: 'static> RegistryBuilder<T> {
    /// Registers an optional field with a native accessor
    pub fn register<V, F>(&mut self, key: impl Into<String>, accessor: F) -> &mut Self
    where
        V: ScalarValue,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.register_mapping(FieldMapping::new(key, accessor, false))
    }

    /// Registers a field that every request must filter on
    pub fn register_required<V, F>(&mut self, key: impl Into<String>, accessor: F) -> &mut Self
    where
        V: ScalarValue,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.register_mapping(FieldMapping::new(key, accessor, true))
    }
}

impl<T: Navigable> RegistryBuilder<T> {
    /// Registers an optional field by dotted path.
    ///
    /// Resolution errors are reported by `build()`.
    pub fn register_path(&mut self, key: impl Into<String>, path: &str) -> &mut Self {
        self.register_resolved(key.into(), path, false)
    }

    /// Registers a required field by dotted path
    pub fn register_required_path(&mut self, key: impl Into<String>, path: &str) -> &mut Self {
        self.register_resolved(key.into(), path, true)
    }

    fn register_resolved(&mut self, key: String, path: &str, required: bool) -> &mut Self {
        match PathResolver::resolve::<T>(path) {
            Ok(resolved) => self.register_mapping(FieldMapping::from_path(key, &resolved, required)),
            Err(err) => {
                self.deferred.push(err);
                self
            }
        }
    }
}

impl<T> RegistryBuilder<T> {
    /// Create an empty builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a prepared mapping
    pub fn register_mapping(&mut self, mapping: FieldMapping<T>) -> &mut Self {
        self.mappings.push(mapping);
        self
    }

    /// Replaces the filter criteria
    pub fn set_filters(&mut self, filters: Vec<FilterCriterion>) -> &mut Self {
        self.filters = filters;
        self
    }

    /// Appends one filter criterion
    pub fn add_filter(&mut self, filter: FilterCriterion) -> &mut Self {
        self.filters.push(filter);
        self
    }

    /// Replaces the sort criteria
    pub fn set_sorts(&mut self, sorts: Vec<SortCriterion>) -> &mut Self {
        self.sorts = sorts;
        self
    }

    /// Appends one sort criterion
    pub fn add_sort(&mut self, sort: SortCriterion) -> &mut Self {
        self.sorts.push(sort);
        self
    }

    /// Replaces filters and sorts with those of a wire request
    pub fn with_request(&mut self, request: FilterRequest) -> &mut Self {
        self.filters = request.filters;
        self.sorts = request.sorts;
        self
    }

    /// Sets the engine configuration
    pub fn with_config(&mut self, config: EngineConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// Returns true once `build()` has been attempted
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Freezes the collected state into a registry.
    ///
    /// Fails with `AlreadyInitialized` on every call after the first.
    pub fn build(&mut self) -> FilterResult<Registry<T>> {
        if self.initialized {
            return Err(FilterError::AlreadyInitialized);
        }
        self.initialized = true;

        if let Some(err) = self.deferred.drain(..).next() {
            return Err(err);
        }

        let mappings = std::mem::take(&mut self.mappings);
        let mut index = HashMap::with_capacity(mappings.len());
        for (position, mapping) in mappings.iter().enumerate() {
            if index.insert(normalize_key(mapping.key()), position).is_some() {
                return Err(FilterError::DuplicateField(mapping.key().to_string()));
            }
        }

        let registry = Registry {
            mappings,
            index,
            filters: std::mem::take(&mut self.filters),
            sorts: std::mem::take(&mut self.sorts),
            config: self.config.clone(),
        };

        tracing::debug!(
            event = %Event::RegistryBuilt,
            mappings = registry.mappings.len(),
            filters = registry.filters.len(),
            sorts = registry.sorts.len(),
            "registry built"
        );

        Ok(registry)
    }
}

/// Frozen field mappings plus the criteria of one request
pub struct Registry<T> {
    mappings: Vec<FieldMapping<T>>,
    index: HashMap<String, usize>,
    filters: Vec<FilterCriterion>,
    sorts: Vec<SortCriterion>,
    config: EngineConfig,
}

impl<T> Registry<T> {
    /// Create a builder
    pub fn builder() -> RegistryBuilder<T> {
        RegistryBuilder::new()
    }

    /// Finds a mapping by key, ignoring case
    pub fn lookup(&self, field: &str) -> Option<&FieldMapping<T>> {
        self.index
            .get(&normalize_key(field))
            .map(|&position| &self.mappings[position])
    }

    /// Returns all mappings in registration order
    pub fn mappings(&self) -> &[FieldMapping<T>] {
        &self.mappings
    }

    /// Returns the filter criteria in request order
    pub fn filters(&self) -> &[FilterCriterion] {
        &self.filters
    }

    /// Returns the sort criteria in priority order
    pub fn sorts(&self) -> &[SortCriterion] {
        &self.sorts
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns true if at least one field is mapped
    pub fn is_initialized(&self) -> bool {
        !self.mappings.is_empty()
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("mappings", &self.mappings)
            .field("filters", &self.filters)
            .field("sorts", &self.sorts)
            .field("config", &self.config)
            .finish()
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}
