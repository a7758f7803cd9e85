//! Per-criterion compile context shared by the type builders

use super::operands::{parse_scalar, split_list, split_range};
use super::predicate::{CompareOp, FieldRef, Predicate};
use crate::catalog::{Operator, OperatorCatalog};
use crate::config::EngineConfig;
use crate::errors::{FilterError, FilterResult};
use crate::model::{FieldMapping, Scalar, ScalarKind};

/// The field under compilation together with the active configuration
pub(crate) struct Target<'a, T> {
    pub field: FieldRef<T>,
    pub kind: ScalarKind,
    pub nullable: bool,
    pub config: &'a EngineConfig,
}

impl<'a, T> Target<'a, T> {
    pub fn new(mapping: &FieldMapping<T>, config: &'a EngineConfig) -> Self {
        Self {
            field: mapping.field_ref(),
            kind: mapping.kind(),
            nullable: mapping.nullable(),
            config,
        }
    }

    pub fn key(&self) -> &str {
        self.field.key()
    }

    /// Parses a single operand as the field's kind
    pub fn parse(&self, raw: &str) -> FilterResult<Scalar> {
        parse_scalar(self.kind, raw).ok_or_else(|| FilterError::ParseError {
            field: self.key().to_string(),
            value: raw.to_string(),
            kind: self.kind,
        })
    }

    /// Parses a list operand. Empty tokens are dropped.
    pub fn parse_list(&self, raw: &str) -> FilterResult<Vec<Scalar>> {
        split_list(raw, self.config.list_separator)
            .into_iter()
            .map(|token| self.parse(token))
            .collect()
    }

    /// Parses a two-token range operand
    pub fn parse_range(&self, raw: &str) -> FilterResult<(Scalar, Scalar)> {
        let tokens = split_range(raw, self.config.list_separator);
        if tokens.len() != 2 {
            return Err(FilterError::ArgumentError {
                field: self.key().to_string(),
                reason: format!(
                    "range needs exactly 2 values separated by '{}', got {}",
                    self.config.list_separator,
                    tokens.len()
                ),
            });
        }
        Ok((self.parse(tokens[0])?, self.parse(tokens[1])?))
    }

    pub fn compare(&self, op: CompareOp, operand: Scalar) -> Predicate<T> {
        Predicate::Compare {
            field: self.field.clone(),
            op,
            operand,
        }
    }

    /// Inclusive range check
    pub fn within(&self, raw: &str) -> FilterResult<Predicate<T>> {
        let (low, high) = self.parse_range(raw)?;
        Ok(Predicate::Within {
            field: self.field.clone(),
            low,
            high,
        })
    }

    /// Disjunction of equality checks; an empty list never matches
    pub fn one_of(&self, raw: &str) -> FilterResult<Predicate<T>> {
        let members = self
            .parse_list(raw)?
            .into_iter()
            .map(|operand| self.compare(CompareOp::Eq, operand))
            .collect();
        Ok(Predicate::Or(members))
    }

    /// Structural null test. Constant on non-nullable fields.
    pub fn null_check(&self, operator: Operator) -> Predicate<T> {
        let is_null = operator == Operator::IsNull;
        match (self.nullable, is_null) {
            (true, true) => Predicate::IsNull(self.field.clone()),
            (true, false) => Predicate::IsNotNull(self.field.clone()),
            (false, true) => Predicate::Never,
            (false, false) => Predicate::Always,
        }
    }

    /// Conjoins a not-null guard on nullable fields
    pub fn guarded(&self, predicate: Predicate<T>) -> Predicate<T> {
        if self.nullable {
            Predicate::IsNotNull(self.field.clone()).and(predicate)
        } else {
            predicate
        }
    }

    /// Error for an operator the builder has no rule for
    pub fn unsupported(&self, operator: Operator) -> FilterError {
        FilterError::UnsupportedOperatorForType {
            kind: self.kind,
            operator,
            legal: OperatorCatalog::global()
                .legal_operators(self.kind)
                .to_vec(),
        }
    }
}
