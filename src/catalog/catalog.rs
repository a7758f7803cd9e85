//! Operator legality per operand kind
//!
//! The table is built once per process and never mutated. It is consulted
//! before any builder runs, and supplies the list of legal alternatives
//! for rejection messages.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::operator::Operator;
use crate::errors::{FilterError, FilterResult};
use crate::model::ScalarKind;

static CATALOG: OnceLock<OperatorCatalog> = OnceLock::new();

const STRING_OPERATORS: &[Operator] = &[
    Operator::Equals,
    Operator::NotEquals,
    Operator::StartsWith,
    Operator::EndsWith,
    Operator::Contains,
    Operator::NotContains,
    Operator::IsEmpty,
    Operator::IsNotEmpty,
    Operator::IsNull,
    Operator::IsNotNull,
    Operator::In,
    Operator::NotIn,
];

const BOOLEAN_OPERATORS: &[Operator] = &[
    Operator::Equals,
    Operator::NotEquals,
    Operator::IsNull,
    Operator::IsNotNull,
];

const NUMERIC_OPERATORS: &[Operator] = &[
    Operator::Equals,
    Operator::NotEquals,
    Operator::LessThan,
    Operator::LessThanOrEqual,
    Operator::GreaterThan,
    Operator::GreaterThanOrEqual,
    Operator::IsNull,
    Operator::IsNotNull,
    Operator::In,
    Operator::NotIn,
    Operator::Between,
    Operator::NotBetween,
];

const DATE_OPERATORS: &[Operator] = &[
    Operator::Equals,
    Operator::NotEquals,
    Operator::LessThan,
    Operator::LessThanOrEqual,
    Operator::GreaterThan,
    Operator::GreaterThanOrEqual,
    Operator::IsNull,
    Operator::IsNotNull,
    Operator::Between,
    Operator::NotBetween,
    Operator::IsEqualToYear,
    Operator::IsEqualToYearAndMonth,
    Operator::IsEqualToFullDate,
    Operator::IsBefore,
    Operator::IsAfter,
];

/// Read-only table of legal operators per kind
#[derive(Debug)]
pub struct OperatorCatalog {
    table: HashMap<ScalarKind, &'static [Operator]>,
}

impl OperatorCatalog {
    fn new() -> Self {
        let table = ScalarKind::ALL
            .iter()
            .map(|kind| {
                let operators = match kind {
                    ScalarKind::String => STRING_OPERATORS,
                    ScalarKind::Boolean => BOOLEAN_OPERATORS,
                    ScalarKind::Integer
                    | ScalarKind::Long
                    | ScalarKind::FixedPoint
                    | ScalarKind::Float32
                    | ScalarKind::Float64 => NUMERIC_OPERATORS,
                    ScalarKind::Date | ScalarKind::DateWithOffset => DATE_OPERATORS,
                };
                (*kind, operators)
            })
            .collect();

        Self { table }
    }

    /// Returns the process-wide catalog
    pub fn global() -> &'static OperatorCatalog {
        CATALOG.get_or_init(OperatorCatalog::new)
    }

    /// Returns true if the operator may be applied to fields of this kind
    pub fn is_legal(&self, kind: ScalarKind, operator: Operator) -> bool {
        self.legal_operators(kind).contains(&operator)
    }

    /// Returns the legal operators for a kind, in declaration order
    pub fn legal_operators(&self, kind: ScalarKind) -> &'static [Operator] {
        self.table.get(&kind).copied().unwrap_or(&[])
    }

    /// Rejects an illegal (kind, operator) pair
    pub fn check(&self, kind: ScalarKind, operator: Operator) -> FilterResult<()> {
        if self.is_legal(kind, operator) {
            return Ok(());
        }

        Err(FilterError::UnsupportedOperatorForType {
            kind,
            operator,
            legal: self.legal_operators(kind).to_vec(),
        })
    }
}
