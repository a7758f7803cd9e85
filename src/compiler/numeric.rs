//! Numeric builder: Integer, Long, FixedPoint, Float32, Float64

use super::context::Target;
use super::predicate::{CompareOp, Predicate};
use crate::catalog::Operator;
use crate::errors::FilterResult;

pub(crate) fn compile<T>(
    target: &Target<'_, T>,
    operator: Operator,
    raw: &str,
) -> FilterResult<Predicate<T>> {
    let predicate = match operator {
        Operator::IsNull | Operator::IsNotNull => return Ok(target.null_check(operator)),
        Operator::Equals => target.compare(CompareOp::Eq, target.parse(raw)?),
        Operator::NotEquals => target.compare(CompareOp::Ne, target.parse(raw)?),
        Operator::LessThan => target.compare(CompareOp::Lt, target.parse(raw)?),
        Operator::LessThanOrEqual => target.compare(CompareOp::Le, target.parse(raw)?),
        Operator::GreaterThan => target.compare(CompareOp::Gt, target.parse(raw)?),
        Operator::GreaterThanOrEqual => target.compare(CompareOp::Ge, target.parse(raw)?),
        Operator::Between => target.within(raw)?,
        Operator::NotBetween => target.within(raw)?.negate(),
        Operator::In => target.one_of(raw)?,
        Operator::NotIn => target.one_of(raw)?.negate(),
        other => return Err(target.unsupported(other)),
    };

    Ok(target.guarded(predicate))
}
