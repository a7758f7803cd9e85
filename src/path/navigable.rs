//! Navigable entity descriptions
//!
//! Types that can be addressed by dotted paths describe their members
//! statically (for resolution) and expose them dynamically (for reads).

use std::fmt;

use crate::model::{Scalar, ScalarKind, ScalarValue};

/// An entity whose members can be reached by name
pub trait Navigable: 'static {
    /// Static description of this type's members
    fn descriptor() -> TypeDescriptor
    where
        Self: Sized;

    /// Reads a member by its declared name
    fn member(&self, name: &str) -> Option<Member<'_>>;
}

/// A member value read from an entity
pub enum Member<'a> {
    /// Scalar leaf value
    Scalar(Scalar),
    /// Nested object, `None` when an optional object is absent
    Object(Option<&'a dyn Navigable>),
}

impl<'a> Member<'a> {
    /// Wraps a scalar member
    pub fn scalar(value: impl ScalarValue) -> Self {
        Member::Scalar(value.into_scalar())
    }

    /// Wraps a nested object member
    pub fn object<N: Navigable>(value: &'a N) -> Self {
        Member::Object(Some(value))
    }

    /// Wraps an optional nested object member
    pub fn optional<N: Navigable>(value: Option<&'a N>) -> Self {
        Member::Object(value.map(|v| v as &dyn Navigable))
    }
}

impl fmt::Debug for Member<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Scalar(value) => write!(f, "Scalar({})", value),
            Member::Object(Some(_)) => write!(f, "Object(..)"),
            Member::Object(None) => write!(f, "Object(None)"),
        }
    }
}

/// Shape of a declared member
#[derive(Clone, Copy)]
pub enum MemberShape {
    /// Scalar leaf
    Scalar { kind: ScalarKind, nullable: bool },
    /// Nested object; the descriptor is produced lazily to allow recursion
    Object {
        describe: fn() -> TypeDescriptor,
        nullable: bool,
    },
}

impl fmt::Debug for MemberShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberShape::Scalar { kind, nullable } => f
                .debug_struct("Scalar")
                .field("kind", kind)
                .field("nullable", nullable)
                .finish(),
            MemberShape::Object { nullable, .. } => f
                .debug_struct("Object")
                .field("nullable", nullable)
                .finish(),
        }
    }
}

/// A declared member
#[derive(Debug, Clone)]
pub struct MemberDescriptor {
    pub name: &'static str,
    pub shape: MemberShape,
}

/// Static description of a navigable type
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: &'static str,
    members: Vec<MemberDescriptor>,
}

impl TypeDescriptor {
    /// Create an empty descriptor for a named type
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            members: Vec::new(),
        }
    }

    /// Declares a scalar member; kind and nullability come from `V`
    pub fn scalar<V: ScalarValue>(mut self, name: &'static str) -> Self {
        self.members.push(MemberDescriptor {
            name,
            shape: MemberShape::Scalar {
                kind: V::KIND,
                nullable: V::NULLABLE,
            },
        });
        self
    }

    /// Declares a nested object member
    pub fn object<N: Navigable>(mut self, name: &'static str) -> Self {
        self.members.push(MemberDescriptor {
            name,
            shape: MemberShape::Object {
                describe: N::descriptor,
                nullable: false,
            },
        });
        self
    }

    /// Declares an optional nested object member
    pub fn optional_object<N: Navigable>(mut self, name: &'static str) -> Self {
        self.members.push(MemberDescriptor {
            name,
            shape: MemberShape::Object {
                describe: N::descriptor,
                nullable: true,
            },
        });
        self
    }

    /// Returns the type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the declared members
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// Finds a member by name, ignoring case
    pub fn find(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }
}
