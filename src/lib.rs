//! aerofilter - A strict, deterministic filter and sort compiler
//!
//! Compiles untyped `(field, operator, value)` criteria against a registry
//! of typed field accessors into a composite predicate and a multi-key
//! ordering that can be applied to any collection of entities.
//!
//! # Pipeline
//!
//! 1. Register field accessors (native closures or dotted paths)
//! 2. Attach filter and sort criteria, then `build()` the registry once
//! 3. `FilterEngine` validates and compiles the AND-composed predicate
//! 4. `SortEngine` compiles the ordering
//! 5. Both are applied, in that order, to the data source

pub mod catalog;
pub mod compiler;
pub mod config;
pub mod engine;
pub mod errors;
pub mod model;
pub mod observability;
pub mod path;

pub use catalog::{Operator, OperatorCatalog, OperatorClass};
pub use compiler::{CompareOp, FieldRef, Granularity, Predicate, PredicateCompiler, TextOp};
pub use config::{EmptyValuePolicy, EngineConfig, TextMatching, UnknownFieldPolicy};
pub use engine::{
    CompiledFilter, CompiledOrdering, Explain, FilterEngine, Filtered, QueryEngine, SortEngine,
};
pub use errors::{FilterError, FilterResult};
pub use model::{
    Accessor, FieldMapping, FilterCriterion, FilterRequest, Registry, RegistryBuilder, Scalar,
    ScalarKind, ScalarValue, SortCriterion, SortDirection,
};
pub use path::{Member, MemberShape, Navigable, PathResolver, ResolvedPath, TypeDescriptor};
