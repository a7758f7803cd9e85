//! Filter operators
//!
//! The operator set is closed. Wire names are the variant names
//! (`"Equals"`, `"GreaterThan"`, ...), matched case-insensitively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::FilterError;

/// Filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Operator {
    // Equality
    Equals,
    NotEquals,

    // Ordering
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,

    // Text
    StartsWith,
    EndsWith,
    Contains,
    NotContains,
    IsEmpty,
    IsNotEmpty,

    // Nullability
    IsNull,
    IsNotNull,

    // Set membership
    In,
    NotIn,

    // Range
    Between,
    NotBetween,

    // Date granularity
    IsEqualToYear,
    IsEqualToYearAndMonth,
    IsEqualToFullDate,

    // Date ordering aliases
    IsBefore,
    IsAfter,
}

/// How an operator uses its operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorClass {
    /// Parses one operand and compares against it
    Comparison,
    /// Uses the operand verbatim as text
    Textual,
    /// Takes no operand
    Structural,
    /// Parses a separated list of operands
    Set,
    /// Parses exactly two separated operands
    Range,
    /// Parses one date and compares a prefix of its components
    Granularity,
}

impl Operator {
    /// Every operator, in declaration order
    pub const ALL: [Operator; 23] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::LessThan,
        Operator::LessThanOrEqual,
        Operator::GreaterThan,
        Operator::GreaterThanOrEqual,
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
        Operator::Between,
        Operator::NotBetween,
        Operator::IsEqualToYear,
        Operator::IsEqualToYearAndMonth,
        Operator::IsEqualToFullDate,
        Operator::IsBefore,
        Operator::IsAfter,
    ];

    /// Returns the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "Equals",
            Operator::NotEquals => "NotEquals",
            Operator::LessThan => "LessThan",
            Operator::LessThanOrEqual => "LessThanOrEqual",
            Operator::GreaterThan => "GreaterThan",
            Operator::GreaterThanOrEqual => "GreaterThanOrEqual",
            Operator::StartsWith => "StartsWith",
            Operator::EndsWith => "EndsWith",
            Operator::Contains => "Contains",
            Operator::NotContains => "NotContains",
            Operator::IsEmpty => "IsEmpty",
            Operator::IsNotEmpty => "IsNotEmpty",
            Operator::IsNull => "IsNull",
            Operator::IsNotNull => "IsNotNull",
            Operator::In => "In",
            Operator::NotIn => "NotIn",
            Operator::Between => "Between",
            Operator::NotBetween => "NotBetween",
            Operator::IsEqualToYear => "IsEqualToYear",
            Operator::IsEqualToYearAndMonth => "IsEqualToYearAndMonth",
            Operator::IsEqualToFullDate => "IsEqualToFullDate",
            Operator::IsBefore => "IsBefore",
            Operator::IsAfter => "IsAfter",
        }
    }

    /// Returns how this operator consumes its operand
    pub fn class(&self) -> OperatorClass {
        match self {
            Operator::Equals
            | Operator::NotEquals
            | Operator::LessThan
            | Operator::LessThanOrEqual
            | Operator::GreaterThan
            | Operator::GreaterThanOrEqual
            | Operator::IsBefore
            | Operator::IsAfter => OperatorClass::Comparison,
            Operator::StartsWith
            | Operator::EndsWith
            | Operator::Contains
            | Operator::NotContains => OperatorClass::Textual,
            Operator::IsEmpty | Operator::IsNotEmpty | Operator::IsNull | Operator::IsNotNull => {
                OperatorClass::Structural
            }
            Operator::In | Operator::NotIn => OperatorClass::Set,
            Operator::Between | Operator::NotBetween => OperatorClass::Range,
            Operator::IsEqualToYear
            | Operator::IsEqualToYearAndMonth
            | Operator::IsEqualToFullDate => OperatorClass::Granularity,
        }
    }

    /// Returns true if the operator ignores its operand
    pub fn is_structural(&self) -> bool {
        self.class() == OperatorClass::Structural
    }
}

impl FromStr for Operator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Operator::ALL
            .iter()
            .copied()
            .find(|op| op.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| FilterError::UnknownOperator(name.to_string()))
    }
}

impl TryFrom<String> for Operator {
    type Error = FilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for op in Operator::ALL {
            assert_eq!(op.as_str().parse::<Operator>().unwrap(), op);
        }
    }

    #[test]
    fn test_names_case_insensitive() {
        assert_eq!("greaterthan".parse::<Operator>().unwrap(), Operator::GreaterThan);
        assert_eq!(" IsNull ".parse::<Operator>().unwrap(), Operator::IsNull);
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            "Like".parse::<Operator>().unwrap_err(),
            FilterError::UnknownOperator("Like".into())
        );
    }

    #[test]
    fn test_classes() {
        assert_eq!(Operator::IsBefore.class(), OperatorClass::Comparison);
        assert_eq!(Operator::Contains.class(), OperatorClass::Textual);
        assert_eq!(Operator::NotBetween.class(), OperatorClass::Range);
        assert_eq!(Operator::NotIn.class(), OperatorClass::Set);
        assert_eq!(
            Operator::IsEqualToYearAndMonth.class(),
            OperatorClass::Granularity
        );
        assert!(Operator::IsEmpty.is_structural());
        assert!(!Operator::Equals.is_structural());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let value = serde_json::to_value(Operator::GreaterThanOrEqual).unwrap();
        assert_eq!(value, serde_json::json!("GreaterThanOrEqual"));

        let parsed: Operator = serde_json::from_str("\"notbetween\"").unwrap();
        assert_eq!(parsed, Operator::NotBetween);
    }
}
