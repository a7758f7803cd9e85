//! Operator catalog
//!
//! Defines the closed operator set and, for each operand kind, which
//! operators are legal. Consulted both to reject illegal pairs before a
//! builder runs and to list alternatives in error messages.

mod catalog;
mod operator;

pub use catalog::OperatorCatalog;
pub use operator::{Operator, OperatorClass};
