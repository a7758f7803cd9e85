//! Predicate compiler
//!
//! Turns one `(field, operator, raw value)` triple into a predicate
//! fragment. Legality is checked against the operator catalog before any
//! builder runs; the builder for the field's kind family then parses the
//! operand and emits the fragment.

mod boolean;
mod context;
mod numeric;
pub mod operands;
mod predicate;
mod temporal;
mod text;

pub use predicate::{CompareOp, FieldRef, Granularity, Predicate, TextOp};

use crate::catalog::{Operator, OperatorCatalog};
use crate::config::EngineConfig;
use crate::errors::FilterResult;
use crate::model::{FieldMapping, ScalarKind};
use context::Target;

/// Dispatches criteria to the builder for the field's kind
pub struct PredicateCompiler;

impl PredicateCompiler {
    /// Compiles a single criterion against a mapping
    pub fn compile<T>(
        mapping: &FieldMapping<T>,
        operator: Operator,
        raw: &str,
        config: &EngineConfig,
    ) -> FilterResult<Predicate<T>> {
        OperatorCatalog::global().check(mapping.kind(), operator)?;

        let target = Target::new(mapping, config);
        match mapping.kind() {
            ScalarKind::String => text::compile(&target, operator, raw),
            ScalarKind::Boolean => boolean::compile(&target, operator, raw),
            ScalarKind::Integer
            | ScalarKind::Long
            | ScalarKind::FixedPoint
            | ScalarKind::Float32
            | ScalarKind::Float64 => numeric::compile(&target, operator, raw),
            ScalarKind::Date | ScalarKind::DateWithOffset => {
                temporal::compile(&target, operator, raw)
            }
        }
    }
}
