//! Path resolution for nested field mappings
//!
//! A field mapping can name its target as a dotted path (`car.brand.name`)
//! instead of a native accessor. The path is checked against the entity's
//! static description when registered; any segment that does not exist,
//! or a path that does not end at a scalar, fails with
//! `PathResolutionError`.

mod navigable;
mod resolver;

pub use navigable::{Member, MemberDescriptor, MemberShape, Navigable, TypeDescriptor};
pub use resolver::{PathResolver, ResolvedPath};
