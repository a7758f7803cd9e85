//! Raw operand grammar
//!
//! Numbers, booleans and dates are trimmed before parsing. String operands
//! are used verbatim except when split into lists.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::model::{Scalar, ScalarKind};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f %:z"];

/// Parses a raw operand as the given kind; `None` if it does not parse
pub fn parse_scalar(kind: ScalarKind, raw: &str) -> Option<Scalar> {
    let text = raw.trim();

    match kind {
        ScalarKind::String => Some(Scalar::String(raw.to_string())),
        ScalarKind::Boolean => parse_bool(text).map(Scalar::Boolean),
        ScalarKind::Integer => text.parse().ok().map(Scalar::Integer),
        ScalarKind::Long => text.parse().ok().map(Scalar::Long),
        ScalarKind::FixedPoint => parse_decimal(text).map(Scalar::FixedPoint),
        ScalarKind::Float32 => text
            .parse::<f32>()
            .ok()
            .filter(|v| !v.is_nan())
            .map(Scalar::Float32),
        ScalarKind::Float64 => text
            .parse::<f64>()
            .ok()
            .filter(|v| !v.is_nan())
            .map(Scalar::Float64),
        ScalarKind::Date => parse_date(text).map(Scalar::Date),
        ScalarKind::DateWithOffset => parse_date_with_offset(text).map(Scalar::DateWithOffset),
    }
}

/// Strict boolean grammar: `true` or `false`, any case
pub fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Parses a date without offset. RFC 3339 input keeps its wall-clock time.
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Parses a date with offset. Input without an offset is taken as UTC.
pub fn parse_date_with_offset(text: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt);
    }

    OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(text, format).ok())
        .or_else(|| parse_date(text).map(|naive| naive.and_utc().fixed_offset()))
}

/// Splits a list operand, trimming tokens and dropping empty ones
pub fn split_list(raw: &str, separator: char) -> Vec<&str> {
    raw.split(separator)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Splits a range operand into its raw tokens without dropping any
pub fn split_range(raw: &str, separator: char) -> Vec<&str> {
    raw.split(separator).map(str::trim).collect()
}
