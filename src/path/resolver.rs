//! Dotted path resolution
//!
//! Resolves `car.brand.name` against a navigable root type into a chain
//! of member names ending at a scalar leaf. Resolution is pure and happens
//! once, when the mapping is registered; reads walk the resolved chain.

use std::sync::Arc;

use super::navigable::{Member, MemberShape, Navigable, TypeDescriptor};
use crate::errors::{FilterError, FilterResult};
use crate::model::{Accessor, Scalar, ScalarKind};

/// A path resolved to a scalar leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Path as written by the caller
    path: String,
    /// Declared member names, root first
    segments: Vec<&'static str>,
    /// Kind of the leaf
    kind: ScalarKind,
    /// True if the leaf or any object on the way is optional
    nullable: bool,
}

impl ResolvedPath {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn segments(&self) -> &[&'static str] {
        &self.segments
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    /// Returns the canonical dotted form using declared member names
    pub fn canonical(&self) -> String {
        self.segments.join(".")
    }
}

/// Resolves dotted paths against navigable types
pub struct PathResolver;

impl PathResolver {
    /// Resolves a path on the root type `T`
    pub fn resolve<T: Navigable>(path: &str) -> FilterResult<ResolvedPath> {
        Self::resolve_from(T::descriptor(), path)
    }

    /// Resolves a path starting from an explicit descriptor
    pub fn resolve_from(root: TypeDescriptor, path: &str) -> FilterResult<ResolvedPath> {
        let fail = |entity: &str, reason: String| FilterError::PathResolutionError {
            path: path.to_string(),
            entity: entity.to_string(),
            reason,
        };

        if path.trim().is_empty() {
            return Err(fail(root.name(), "path is empty".into()));
        }

        let parts: Vec<&str> = path.split('.').map(str::trim).collect();
        let mut current = root;
        let mut segments = Vec::with_capacity(parts.len());
        let mut nullable = false;

        for (i, part) in parts.iter().enumerate() {
            let is_last = i + 1 == parts.len();

            if part.is_empty() {
                return Err(fail(current.name(), format!("segment {} is empty", i + 1)));
            }

            let member = current
                .find(part)
                .cloned()
                .ok_or_else(|| fail(current.name(), format!("no member named '{}'", part)))?;
            segments.push(member.name);

            match member.shape {
                MemberShape::Scalar {
                    kind,
                    nullable: leaf_nullable,
                } => {
                    if !is_last {
                        return Err(fail(
                            current.name(),
                            format!("'{}' is a scalar and has no members", member.name),
                        ));
                    }
                    return Ok(ResolvedPath {
                        path: path.to_string(),
                        segments,
                        kind,
                        nullable: nullable || leaf_nullable,
                    });
                }
                MemberShape::Object {
                    describe,
                    nullable: object_nullable,
                } => {
                    if is_last {
                        return Err(fail(
                            current.name(),
                            format!("'{}' is an object, not a scalar", member.name),
                        ));
                    }
                    nullable |= object_nullable;
                    current = describe();
                }
            }
        }

        // The loop returns on the last segment in every branch
        Err(fail(current.name(), "path does not end at a scalar".into()))
    }

    /// Builds an accessor that walks a resolved path
    pub fn accessor<T: Navigable>(resolved: &ResolvedPath) -> Accessor<T> {
        let segments = resolved.segments.clone();
        Arc::new(move |entity: &T| read_path(entity, &segments))
    }
}

/// Walks the member chain. An absent optional object reads as null.
fn read_path<'a>(root: &'a dyn Navigable, segments: &[&'static str]) -> Scalar {
    let mut current = root;

    for (i, segment) in segments.iter().enumerate() {
        let is_last = i + 1 == segments.len();

        match current.member(segment) {
            Some(Member::Scalar(value)) if is_last => return value,
            Some(Member::Object(Some(next))) if !is_last => current = next,
            Some(Member::Object(None)) => return Scalar::Null,
            // Descriptor and member() disagree; treat as absent
            _ => return Scalar::Null,
        }
    }

    Scalar::Null
}
