//! Filter and sort engines
//!
//! Stateless compilers over a built registry. Compilation validates every
//! criterion up front; application is lazy for filters and a stable sort
//! for orderings.

mod explain;
mod filter;
mod query;
mod sorter;

pub use explain::Explain;
pub use filter::{CompiledFilter, FilterEngine, Filtered};
pub use query::QueryEngine;
pub use sorter::{CompiledOrdering, SortEngine};
