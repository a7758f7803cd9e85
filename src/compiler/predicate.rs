//! Compiled predicate AST
//!
//! A small tree of boolean nodes over field reads. Leaves hold the field's
//! accessor, so a compiled predicate is self-contained and can outlive the
//! registry it was compiled from. `Display` renders a deterministic
//! explanation of the tree.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use chrono::Datelike;

use crate::config::TextMatching;
use crate::model::{Accessor, Scalar};

/// A named field read
pub struct FieldRef<T> {
    key: Arc<str>,
    accessor: Accessor<T>,
}

impl<T> FieldRef<T> {
    pub fn new(key: impl Into<Arc<str>>, accessor: Accessor<T>) -> Self {
        Self {
            key: key.into(),
            accessor,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn read(&self, entity: &T) -> Scalar {
        (self.accessor)(entity)
    }
}

impl<T> Clone for FieldRef<T> {
    fn clone(&self) -> Self {
        Self {
            key: Arc::clone(&self.key),
            accessor: Arc::clone(&self.accessor),
        }
    }
}

impl<T> fmt::Debug for FieldRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldRef({})", self.key)
    }
}

/// Ordered comparison against a single operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// Returns true if an ordering of field vs operand satisfies this op
    pub fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

/// Textual match on string fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOp {
    Equals,
    Contains,
    StartsWith,
    EndsWith,
}

impl TextOp {
    pub fn name(&self) -> &'static str {
        match self {
            TextOp::Equals => "equals",
            TextOp::Contains => "contains",
            TextOp::StartsWith => "starts_with",
            TextOp::EndsWith => "ends_with",
        }
    }
}

/// Date components compared by granularity operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Year,
    YearAndMonth,
    FullDate,
}

impl Granularity {
    pub fn name(&self) -> &'static str {
        match self {
            Granularity::Year => "year",
            Granularity::YearAndMonth => "year_month",
            Granularity::FullDate => "date",
        }
    }

    /// Projects a date value onto (year, month, day), zeroing the
    /// components this granularity ignores
    fn project(&self, value: &Scalar) -> Option<(i32, u32, u32)> {
        let (year, month, day) = match value {
            Scalar::Date(d) => (d.year(), d.month(), d.day()),
            Scalar::DateWithOffset(d) => (d.year(), d.month(), d.day()),
            _ => return None,
        };

        Some(match self {
            Granularity::Year => (year, 0, 0),
            Granularity::YearAndMonth => (year, month, 0),
            Granularity::FullDate => (year, month, day),
        })
    }
}

/// Compiled predicate tree
pub enum Predicate<T> {
    /// Identity of AND; matches everything
    Always,
    /// Identity of OR; matches nothing
    Never,
    And(Vec<Predicate<T>>),
    Or(Vec<Predicate<T>>),
    Not(Box<Predicate<T>>),
    IsNull(FieldRef<T>),
    IsNotNull(FieldRef<T>),
    Compare {
        field: FieldRef<T>,
        op: CompareOp,
        operand: Scalar,
    },
    Text {
        field: FieldRef<T>,
        op: TextOp,
        /// Already folded according to `matching`
        operand: String,
        matching: TextMatching,
    },
    /// Inclusive range `low <= field <= high`
    Within {
        field: FieldRef<T>,
        low: Scalar,
        high: Scalar,
    },
    DatePart {
        field: FieldRef<T>,
        granularity: Granularity,
        operand: Scalar,
    },
}

impl<T> Predicate<T> {
    /// Evaluates the predicate against an entity
    pub fn matches(&self, entity: &T) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::Never => false,
            Predicate::And(parts) => parts.iter().all(|p| p.matches(entity)),
            Predicate::Or(parts) => parts.iter().any(|p| p.matches(entity)),
            Predicate::Not(inner) => !inner.matches(entity),
            Predicate::IsNull(field) => field.read(entity).is_null(),
            Predicate::IsNotNull(field) => !field.read(entity).is_null(),
            Predicate::Compare { field, op, operand } => field
                .read(entity)
                .partial_compare(operand)
                .is_some_and(|ordering| op.accepts(ordering)),
            Predicate::Text {
                field,
                op,
                operand,
                matching,
            } => match field.read(entity) {
                Scalar::String(value) => {
                    let folded = matching.fold(&value);
                    match op {
                        TextOp::Equals => folded.as_ref() == operand.as_str(),
                        TextOp::Contains => folded.contains(operand.as_str()),
                        TextOp::StartsWith => folded.starts_with(operand.as_str()),
                        TextOp::EndsWith => folded.ends_with(operand.as_str()),
                    }
                }
                _ => false,
            },
            Predicate::Within { field, low, high } => {
                let value = field.read(entity);
                let above = value
                    .partial_compare(low)
                    .is_some_and(|o| o != Ordering::Less);
                let below = value
                    .partial_compare(high)
                    .is_some_and(|o| o != Ordering::Greater);
                above && below
            }
            Predicate::DatePart {
                field,
                granularity,
                operand,
            } => {
                let value = field.read(entity);
                match (granularity.project(&value), granularity.project(operand)) {
                    (Some(actual), Some(expected)) => actual == expected,
                    _ => false,
                }
            }
        }
    }

    /// Conjoins two predicates, flattening nested ANDs and dropping `Always`
    pub fn and(self, other: Predicate<T>) -> Predicate<T> {
        match (self, other) {
            (Predicate::Always, p) | (p, Predicate::Always) => p,
            (Predicate::And(mut left), Predicate::And(right)) => {
                left.extend(right);
                Predicate::And(left)
            }
            (Predicate::And(mut left), p) => {
                left.push(p);
                Predicate::And(left)
            }
            (p, Predicate::And(mut right)) => {
                right.insert(0, p);
                Predicate::And(right)
            }
            (left, right) => Predicate::And(vec![left, right]),
        }
    }

    /// Negates a predicate
    pub fn negate(self) -> Predicate<T> {
        match self {
            Predicate::Always => Predicate::Never,
            Predicate::Never => Predicate::Always,
            Predicate::Not(inner) => *inner,
            other => Predicate::Not(Box::new(other)),
        }
    }

    /// Returns true for the always-true predicate
    pub fn is_always(&self) -> bool {
        matches!(self, Predicate::Always)
    }

    /// Returns the number of leaf conditions in the tree
    pub fn leaf_count(&self) -> usize {
        match self {
            Predicate::Always | Predicate::Never => 0,
            Predicate::And(parts) | Predicate::Or(parts) => {
                parts.iter().map(Predicate::leaf_count).sum()
            }
            Predicate::Not(inner) => inner.leaf_count(),
            _ => 1,
        }
    }
}

fn write_joined<T>(f: &mut fmt::Formatter<'_>, parts: &[Predicate<T>], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", sep)?;
        }
        write!(f, "{}", part)?;
    }
    write!(f, ")")
}

impl<T> fmt::Display for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Always => write!(f, "TRUE"),
            Predicate::Never => write!(f, "FALSE"),
            Predicate::And(parts) => write_joined(f, parts, "AND"),
            Predicate::Or(parts) if parts.is_empty() => write!(f, "FALSE"),
            Predicate::Or(parts) => write_joined(f, parts, "OR"),
            Predicate::Not(inner) => write!(f, "NOT {}", inner),
            Predicate::IsNull(field) => write!(f, "{} IS NULL", field.key()),
            Predicate::IsNotNull(field) => write!(f, "{} IS NOT NULL", field.key()),
            Predicate::Compare { field, op, operand } => {
                write!(f, "{} {} {}", field.key(), op.symbol(), operand)
            }
            Predicate::Text {
                field,
                op,
                operand,
                matching,
            } => {
                write!(f, "{} {} {:?}", field.key(), op.name(), operand)?;
                if *matching == TextMatching::IgnoreCase {
                    write!(f, " (ignore case)")?;
                }
                Ok(())
            }
            Predicate::Within { field, low, high } => {
                write!(f, "{} BETWEEN {} AND {}", field.key(), low, high)
            }
            Predicate::DatePart {
                field,
                granularity,
                operand,
            } => write!(f, "{} {} = {}", field.key(), granularity.name(), operand),
        }
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct Row {
        money: Option<i32>,
        name: String,
    }

    fn money() -> FieldRef<Row> {
        FieldRef::new("money", Arc::new(|r: &Row| match r.money {
            Some(m) => Scalar::Integer(m),
            None => Scalar::Null,
        }))
    }

    fn name() -> FieldRef<Row> {
        FieldRef::new("name", Arc::new(|r: &Row| Scalar::String(r.name.clone())))
    }

    fn row(money: Option<i32>, name: &str) -> Row {
        Row {
            money,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_compare() {
        let p = Predicate::Compare {
            field: money(),
            op: CompareOp::Gt,
            operand: Scalar::Integer(100),
        };
        assert!(p.matches(&row(Some(150), "a")));
        assert!(!p.matches(&row(Some(100), "a")));
        // Null never compares
        assert!(!p.matches(&row(None, "a")));
    }

    #[test]
    fn test_within_is_inclusive() {
        let p = Predicate::Within {
            field: money(),
            low: Scalar::Integer(10),
            high: Scalar::Integer(20),
        };
        assert!(p.matches(&row(Some(10), "a")));
        assert!(p.matches(&row(Some(20), "a")));
        assert!(!p.matches(&row(Some(21), "a")));
    }

    #[test]
    fn test_text_folding() {
        let p = Predicate::Text {
            field: name(),
            op: TextOp::StartsWith,
            operand: "bo".into(),
            matching: TextMatching::IgnoreCase,
        };
        assert!(p.matches(&row(None, "Bob")));

        let p = Predicate::Text {
            field: name(),
            op: TextOp::StartsWith,
            operand: "bo".into(),
            matching: TextMatching::Ordinal,
        };
        assert!(!p.matches(&row(None, "Bob")));
    }

    #[test]
    fn test_empty_or_matches_nothing() {
        let p: Predicate<Row> = Predicate::Or(vec![]);
        assert!(!p.matches(&row(Some(1), "a")));
        assert_eq!(p.to_string(), "FALSE");
    }

    #[test]
    fn test_and_flattens_and_drops_identity() {
        let p = Predicate::Always
            .and(Predicate::IsNotNull(money()))
            .and(Predicate::IsNull(money()).negate());
        assert_eq!(p.leaf_count(), 2);
        assert_eq!(p.to_string(), "(money IS NOT NULL AND NOT money IS NULL)");
    }

    #[test]
    fn test_negate_is_involutive() {
        let p = Predicate::IsNull(money()).negate().negate();
        assert_eq!(p.to_string(), "money IS NULL");
        assert!(!Predicate::<Row>::Always.negate().matches(&row(None, "x")));
    }

    #[test]
    fn test_granularity_projection() {
        let date = NaiveDate::from_ymd_opt(2021, 6, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let other = NaiveDate::from_ymd_opt(2021, 7, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        assert_eq!(
            Granularity::Year.project(&Scalar::Date(date)),
            Granularity::Year.project(&Scalar::Date(other))
        );
        assert_ne!(
            Granularity::YearAndMonth.project(&Scalar::Date(date)),
            Granularity::YearAndMonth.project(&Scalar::Date(other))
        );
        assert_eq!(Granularity::FullDate.project(&Scalar::Null), None);
    }

    #[test]
    fn test_display() {
        let p = Predicate::Compare {
            field: money(),
            op: CompareOp::Ge,
            operand: Scalar::Integer(5),
        }
        .and(Predicate::Text {
            field: name(),
            op: TextOp::Contains,
            operand: "a".into(),
            matching: TextMatching::Ordinal,
        });
        assert_eq!(p.to_string(), "(money >= 5 AND name contains \"a\")");
    }
}
