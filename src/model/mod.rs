//! Configuration model
//!
//! Passive data: the field registry (key → typed accessor) and the
//! ordered filter and sort criteria of one request.

mod criteria;
mod registry;
mod scalar;

pub use criteria::{FilterCriterion, FilterRequest, SortCriterion, SortDirection};
pub use registry::{Accessor, FieldMapping, Registry, RegistryBuilder};
pub use scalar::{Scalar, ScalarKind, ScalarValue};
