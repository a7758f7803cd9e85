//! Date and date-with-offset builder
//!
//! `IsBefore` and `IsAfter` compile exactly like `LessThan` and
//! `GreaterThan`. Granularity operators compare calendar components of
//! the field value and the operand, each in its own offset.

use super::context::Target;
use super::predicate::{CompareOp, Granularity, Predicate};
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
        Operator::LessThan | Operator::IsBefore => {
            target.compare(CompareOp::Lt, target.parse(raw)?)
        }
        Operator::LessThanOrEqual => target.compare(CompareOp::Le, target.parse(raw)?),
        Operator::GreaterThan | Operator::IsAfter => {
            target.compare(CompareOp::Gt, target.parse(raw)?)
        }
        Operator::GreaterThanOrEqual => target.compare(CompareOp::Ge, target.parse(raw)?),
        Operator::Between => target.within(raw)?,
        Operator::NotBetween => target.within(raw)?.negate(),
        Operator::IsEqualToYear => date_part(target, Granularity::Year, raw)?,
        Operator::IsEqualToYearAndMonth => date_part(target, Granularity::YearAndMonth, raw)?,
        Operator::IsEqualToFullDate => date_part(target, Granularity::FullDate, raw)?,
        other => return Err(target.unsupported(other)),
    };

    Ok(target.guarded(predicate))
}

fn date_part<T>(
    target: &Target<'_, T>,
    granularity: Granularity,
    raw: &str,
) -> FilterResult<Predicate<T>> {
    Ok(Predicate::DatePart {
        field: target.field.clone(),
        granularity,
        operand: target.parse(raw)?,
    })
}
