//! String builder

use super::context::Target;
use super::operands::split_list;
use super::predicate::{CompareOp, Predicate, TextOp};
use crate::catalog::Operator;
use crate::errors::FilterResult;
use crate::model::Scalar;

pub(crate) fn compile<T>(
    target: &Target<'_, T>,
    operator: Operator,
    raw: &str,
) -> FilterResult<Predicate<T>> {
    let predicate = match operator {
        Operator::IsNull | Operator::IsNotNull => return Ok(target.null_check(operator)),
        Operator::Equals => text(target, TextOp::Equals, raw),
        Operator::NotEquals => text(target, TextOp::Equals, raw).negate(),
        Operator::Contains => text(target, TextOp::Contains, raw),
        Operator::NotContains => text(target, TextOp::Contains, raw).negate(),
        Operator::StartsWith => text(target, TextOp::StartsWith, raw),
        Operator::EndsWith => text(target, TextOp::EndsWith, raw),
        Operator::IsEmpty => target.compare(CompareOp::Eq, Scalar::String(String::new())),
        Operator::IsNotEmpty => target.compare(CompareOp::Ne, Scalar::String(String::new())),
        Operator::In => one_of(target, raw),
        Operator::NotIn => one_of(target, raw).negate(),
        other => return Err(target.unsupported(other)),
    };

    Ok(target.guarded(predicate))
}

fn text<T>(target: &Target<'_, T>, op: TextOp, raw: &str) -> Predicate<T> {
    let matching = target.config.text_matching;
    Predicate::Text {
        field: target.field.clone(),
        op,
        operand: matching.fold(raw).into_owned(),
        matching,
    }
}

fn one_of<T>(target: &Target<'_, T>, raw: &str) -> Predicate<T> {
    Predicate::Or(
        split_list(raw, target.config.list_separator)
            .into_iter()
            .map(|token| text(target, TextOp::Equals, token))
            .collect(),
    )
}
