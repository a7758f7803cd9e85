//! Scalar operand types
//!
//! Supported kinds:
//! - string: UTF-8 string
//! - boolean: true/false
//! - integer: 32-bit signed integer
//! - long: 64-bit signed integer
//! - fixed_point: 96-bit decimal
//! - float32 / float64: IEEE 754 floating point
//! - date: calendar date and time without offset
//! - date_with_offset: calendar date and time with a UTC offset

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Operand type of a registered field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    String,
    Boolean,
    Integer,
    Long,
    FixedPoint,
    Float32,
    Float64,
    Date,
    DateWithOffset,
}

impl ScalarKind {
    /// Every supported kind, in declaration order
    pub const ALL: [ScalarKind; 9] = [
        ScalarKind::String,
        ScalarKind::Boolean,
        ScalarKind::Integer,
        ScalarKind::Long,
        ScalarKind::FixedPoint,
        ScalarKind::Float32,
        ScalarKind::Float64,
        ScalarKind::Date,
        ScalarKind::DateWithOffset,
    ];

    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Integer => "integer",
            ScalarKind::Long => "long",
            ScalarKind::FixedPoint => "fixed_point",
            ScalarKind::Float32 => "float32",
            ScalarKind::Float64 => "float64",
            ScalarKind::Date => "date",
            ScalarKind::DateWithOffset => "date_with_offset",
        }
    }

    /// Returns true for the five numeric kinds
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ScalarKind::Integer
                | ScalarKind::Long
                | ScalarKind::FixedPoint
                | ScalarKind::Float32
                | ScalarKind::Float64
        )
    }

    /// Returns true for the two date kinds
    pub fn is_temporal(&self) -> bool {
        matches!(self, ScalarKind::Date | ScalarKind::DateWithOffset)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// A single field value read from an entity
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    String(String),
    Boolean(bool),
    Integer(i32),
    Long(i64),
    FixedPoint(Decimal),
    Float32(f32),
    Float64(f64),
    Date(NaiveDateTime),
    DateWithOffset(DateTime<FixedOffset>),
}

impl Scalar {
    /// Returns the kind of this value, or `None` for null
    pub fn kind(&self) -> Option<ScalarKind> {
        match self {
            Scalar::Null => None,
            Scalar::String(_) => Some(ScalarKind::String),
            Scalar::Boolean(_) => Some(ScalarKind::Boolean),
            Scalar::Integer(_) => Some(ScalarKind::Integer),
            Scalar::Long(_) => Some(ScalarKind::Long),
            Scalar::FixedPoint(_) => Some(ScalarKind::FixedPoint),
            Scalar::Float32(_) => Some(ScalarKind::Float32),
            Scalar::Float64(_) => Some(ScalarKind::Float64),
            Scalar::Date(_) => Some(ScalarKind::Date),
            Scalar::DateWithOffset(_) => Some(ScalarKind::DateWithOffset),
        }
    }

    /// Returns true if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Returns the string content, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    /// Compares two values of the same kind.
    ///
    /// Returns `None` when either side is null, the kinds differ, or a
    /// float comparison involves NaN. Predicates treat `None` as no match.
    pub fn partial_compare(&self, other: &Scalar) -> Option<Ordering> {
        match (self, other) {
            (Scalar::String(a), Scalar::String(b)) => Some(a.cmp(b)),
            (Scalar::Boolean(a), Scalar::Boolean(b)) => Some(a.cmp(b)),
            (Scalar::Integer(a), Scalar::Integer(b)) => Some(a.cmp(b)),
            (Scalar::Long(a), Scalar::Long(b)) => Some(a.cmp(b)),
            (Scalar::FixedPoint(a), Scalar::FixedPoint(b)) => Some(a.cmp(b)),
            (Scalar::Float32(a), Scalar::Float32(b)) => a.partial_cmp(b),
            (Scalar::Float64(a), Scalar::Float64(b)) => a.partial_cmp(b),
            (Scalar::Date(a), Scalar::Date(b)) => Some(a.cmp(b)),
            (Scalar::DateWithOffset(a), Scalar::DateWithOffset(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Total ordering used for sorting.
    ///
    /// Null sorts before every value; floats use IEEE total ordering;
    /// mismatched kinds fall back to declaration order of the kinds.
    pub fn total_compare(&self, other: &Scalar) -> Ordering {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => Ordering::Equal,
            (Scalar::Null, _) => Ordering::Less,
            (_, Scalar::Null) => Ordering::Greater,
            (Scalar::Float32(a), Scalar::Float32(b)) => a.total_cmp(b),
            (Scalar::Float64(a), Scalar::Float64(b)) => a.total_cmp(b),
            (a, b) => match a.partial_compare(b) {
                Some(ordering) => ordering,
                None => kind_rank(a).cmp(&kind_rank(b)),
            },
        }
    }
}

fn kind_rank(value: &Scalar) -> usize {
    value
        .kind()
        .and_then(|kind| ScalarKind::ALL.iter().position(|k| *k == kind))
        .unwrap_or(0)
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::String(s) => write!(f, "{:?}", s),
            Scalar::Boolean(b) => write!(f, "{}", b),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Long(l) => write!(f, "{}", l),
            Scalar::FixedPoint(d) => write!(f, "{}", d),
            Scalar::Float32(x) => write!(f, "{}", x),
            Scalar::Float64(x) => write!(f, "{}", x),
            Scalar::Date(d) => write!(f, "{}", d.format("%Y-%m-%dT%H:%M:%S%.f")),
            Scalar::DateWithOffset(d) => write!(f, "{}", d.to_rfc3339()),
        }
    }
}

/// A Rust type that an accessor may return.
///
/// Fixes the field's kind and nullability at registration time.
/// `Option<V>` marks the field nullable.
pub trait ScalarValue {
    /// Operand kind of the field
    const KIND: ScalarKind;
    /// Whether the field can be null
    const NULLABLE: bool;

    /// Converts the value into a tagged scalar
    fn into_scalar(self) -> Scalar;
}

macro_rules! impl_scalar_value {
    ($ty:ty, $kind:ident) => {
        impl ScalarValue for $ty {
            const KIND: ScalarKind = ScalarKind::$kind;
            const NULLABLE: bool = false;

            fn into_scalar(self) -> Scalar {
                Scalar::$kind(self)
            }
        }

        impl ScalarValue for Option<$ty> {
            const KIND: ScalarKind = ScalarKind::$kind;
            const NULLABLE: bool = true;

            fn into_scalar(self) -> Scalar {
                self.map_or(Scalar::Null, Scalar::$kind)
            }
        }
    };
}

impl_scalar_value!(String, String);
impl_scalar_value!(bool, Boolean);
impl_scalar_value!(i32, Integer);
impl_scalar_value!(i64, Long);
impl_scalar_value!(Decimal, FixedPoint);
impl_scalar_value!(f32, Float32);
impl_scalar_value!(f64, Float64);
impl_scalar_value!(NaiveDateTime, Date);
impl_scalar_value!(DateTime<FixedOffset>, DateWithOffset);

impl ScalarValue for &'static str {
    const KIND: ScalarKind = ScalarKind::String;
    const NULLABLE: bool = false;

    fn into_scalar(self) -> Scalar {
        Scalar::String(self.to_string())
    }
}

impl ScalarValue for Option<&'static str> {
    const KIND: ScalarKind = ScalarKind::String;
    const NULLABLE: bool = true;

    fn into_scalar(self) -> Scalar {
        self.map_or(Scalar::Null, |s| Scalar::String(s.to_string()))
    }
}

impl ScalarValue for NaiveDate {
    const KIND: ScalarKind = ScalarKind::Date;
    const NULLABLE: bool = false;

    fn into_scalar(self) -> Scalar {
        Scalar::Date(self.and_time(NaiveTime::MIN))
    }
}

impl ScalarValue for Option<NaiveDate> {
    const KIND: ScalarKind = ScalarKind::Date;
    const NULLABLE: bool = true;

    fn into_scalar(self) -> Scalar {
        self.map_or(Scalar::Null, |d| d.into_scalar())
    }
}

impl ScalarValue for DateTime<Utc> {
    const KIND: ScalarKind = ScalarKind::DateWithOffset;
    const NULLABLE: bool = false;

    fn into_scalar(self) -> Scalar {
        Scalar::DateWithOffset(self.into())
    }
}

impl ScalarValue for Option<DateTime<Utc>> {
    const KIND: ScalarKind = ScalarKind::DateWithOffset;
    const NULLABLE: bool = true;

    fn into_scalar(self) -> Scalar {
        self.map_or(Scalar::Null, |d| d.into_scalar())
    }
}
