//! Boolean builder

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
        other => return Err(target.unsupported(other)),
    };

    Ok(target.guarded(predicate))
}
