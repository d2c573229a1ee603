//! Bridge types.
//!
//! A [`BridgeType`] is a tagged union over the type variants the consumer
//! API knows about. Every variant except the null sentinel wraps a host type
//! node through a registry handle.
//!
//! # Equality
//!
//! Bridge types compare and hash by a detached structural [`TypeKey`],
//! computed from the host when the type is built. Two independently built
//! bridges over equal host types are equal, and a bridge type can be used as
//! a map key regardless of what later happens to its handle.
//!
//! # Raw types
//!
//! The raw flag is carried unchanged into every derived child: array
//! components, intersection bounds, and type-variable bounds.
//!
//! # Variant accessors
//!
//! Variant-specific operations live on borrowed views obtained through
//! [`BridgeType::as_array`], [`BridgeType::as_intersection`],
//! [`BridgeType::as_type_variable`] and [`BridgeType::as_declared`].

mod construct;
mod visitor;

pub use visitor::TypeVisitor;

use std::hash::{Hash, Hasher};

use mirror_host::{NodeId, PrimitiveKind};

use crate::{
    Bridge, BridgeElement, BridgeError, HandleId, InternalConsistencyFailure, StaleReferenceError,
};

/// Kind tag of a bridge type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
    Void,
    /// The null type; also the "no lower bound" sentinel.
    Null,
    Array,
    Declared,
    Error,
    TypeVar,
    Intersection,
}

impl TypeKind {
    /// Check if this is a primitive kind.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            TypeKind::Boolean
                | TypeKind::Byte
                | TypeKind::Short
                | TypeKind::Int
                | TypeKind::Long
                | TypeKind::Char
                | TypeKind::Float
                | TypeKind::Double
        )
    }

    /// Get the name of this kind as a static string.
    pub const fn name(self) -> &'static str {
        match self {
            TypeKind::Boolean => "BOOLEAN",
            TypeKind::Byte => "BYTE",
            TypeKind::Short => "SHORT",
            TypeKind::Int => "INT",
            TypeKind::Long => "LONG",
            TypeKind::Char => "CHAR",
            TypeKind::Float => "FLOAT",
            TypeKind::Double => "DOUBLE",
            TypeKind::Void => "VOID",
            TypeKind::Null => "NULL",
            TypeKind::Array => "ARRAY",
            TypeKind::Declared => "DECLARED",
            TypeKind::Error => "ERROR",
            TypeKind::TypeVar => "TYPEVAR",
            TypeKind::Intersection => "INTERSECTION",
        }
    }
}

impl From<PrimitiveKind> for TypeKind {
    fn from(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Boolean => TypeKind::Boolean,
            PrimitiveKind::Byte => TypeKind::Byte,
            PrimitiveKind::Short => TypeKind::Short,
            PrimitiveKind::Int => TypeKind::Int,
            PrimitiveKind::Long => TypeKind::Long,
            PrimitiveKind::Char => TypeKind::Char,
            PrimitiveKind::Float => TypeKind::Float,
            PrimitiveKind::Double => TypeKind::Double,
        }
    }
}

/// Structural identity of a bridge type.
///
/// Holds only semantically relevant data, never a handle.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Primitive(PrimitiveKind),
    Void,
    Null,
    Error { text: String },
    /// `text` is the erased rendering when `raw` is set.
    Declared { text: String, raw: bool },
    Array { component: Box<TypeKey>, raw: bool },
    Intersection { bounds: Vec<TypeKey>, raw: bool },
    TypeVariable { parameter: NodeId, raw: bool },
}

#[derive(Clone, Debug)]
enum TypeRepr {
    Primitive {
        handle: HandleId,
        kind: PrimitiveKind,
    },
    Void {
        handle: HandleId,
    },
    /// No host node; never stale.
    Null,
    Error {
        handle: HandleId,
    },
    Declared {
        handle: HandleId,
    },
    Array {
        handle: HandleId,
    },
    /// Wraps either a host intersection type or a type parameter whose
    /// declared bounds form the intersection.
    Intersection {
        handle: HandleId,
    },
    TypeVariable {
        handle: HandleId,
        parameter: HandleId,
    },
}

/// A bridged type.
#[derive(Clone, Debug)]
pub struct BridgeType {
    repr: TypeRepr,
    raw: bool,
    key: TypeKey,
}

impl BridgeType {
    /// The sentinel returned for type variables without a lower bound.
    pub fn no_lower_bound() -> Self {
        BridgeType {
            repr: TypeRepr::Null,
            raw: false,
            key: TypeKey::Null,
        }
    }

    /// Kind tag.
    pub fn kind(&self) -> TypeKind {
        match &self.repr {
            TypeRepr::Primitive { kind, .. } => TypeKind::from(*kind),
            TypeRepr::Void { .. } => TypeKind::Void,
            TypeRepr::Null => TypeKind::Null,
            TypeRepr::Error { .. } => TypeKind::Error,
            TypeRepr::Declared { .. } => TypeKind::Declared,
            TypeRepr::Array { .. } => TypeKind::Array,
            TypeRepr::Intersection { .. } => TypeKind::Intersection,
            TypeRepr::TypeVariable { .. } => TypeKind::TypeVar,
        }
    }

    /// Whether this type (and everything derived from it) is a raw usage.
    pub fn is_raw(&self) -> bool {
        self.raw
    }

    /// Structural identity used for equality and hashing.
    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    fn handles(&self) -> impl Iterator<Item = HandleId> {
        let (first, second) = match self.repr {
            TypeRepr::Null => (None, None),
            TypeRepr::Primitive { handle, .. }
            | TypeRepr::Void { handle }
            | TypeRepr::Error { handle }
            | TypeRepr::Declared { handle }
            | TypeRepr::Array { handle }
            | TypeRepr::Intersection { handle } => (Some(handle), None),
            TypeRepr::TypeVariable { handle, parameter } => (Some(handle), Some(parameter)),
        };
        first.into_iter().chain(second)
    }

    /// Check that every handle of this type is live.
    pub fn check_live(&self, cx: &Bridge<'_>) -> Result<(), StaleReferenceError> {
        for handle in self.handles() {
            cx.node(handle)?;
        }
        Ok(())
    }

    /// The host's canonical rendering of this type.
    pub fn canonical_text(&self, cx: &Bridge<'_>) -> Result<String, StaleReferenceError> {
        let host = cx.host();
        match self.repr {
            TypeRepr::Null => Ok("null".to_owned()),
            TypeRepr::Primitive { handle, .. }
            | TypeRepr::Void { handle }
            | TypeRepr::Error { handle }
            | TypeRepr::Declared { handle }
            | TypeRepr::Array { handle } => {
                let node = cx.node(handle)?;
                Ok(construct::render_type(host, node, self.raw))
            }
            TypeRepr::Intersection { handle } => {
                let node = cx.node(handle)?;
                let bounds: Vec<String> = host
                    .super_types(node)
                    .into_iter()
                    .map(|bound| construct::render_type(host, bound, self.raw))
                    .collect();
                Ok(bounds.join("&"))
            }
            TypeRepr::TypeVariable { handle, parameter } => {
                cx.node(handle)?;
                let parameter = cx.node(parameter)?;
                Ok(host.name(parameter).unwrap_or_else(|| "<none>".to_owned()))
            }
        }
    }

    /// Dispatch to the visitor method for this type's variant.
    ///
    /// Dispatch reads only the variant tag; accessors called from the
    /// visitor check liveness themselves.
    pub fn accept<V: TypeVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self.repr {
            TypeRepr::Primitive { kind, .. } => visitor.visit_primitive(self, kind),
            TypeRepr::Void { .. } => visitor.visit_void(self),
            TypeRepr::Null => visitor.visit_null(self),
            TypeRepr::Error { .. } => visitor.visit_error(self),
            TypeRepr::Declared { handle } => {
                visitor.visit_declared(DeclaredType { ty: self, handle })
            }
            TypeRepr::Array { handle } => visitor.visit_array(ArrayType { ty: self, handle }),
            TypeRepr::Intersection { handle } => {
                visitor.visit_intersection(IntersectionType { ty: self, handle })
            }
            TypeRepr::TypeVariable { handle, parameter } => {
                visitor.visit_type_variable(TypeVariable {
                    ty: self,
                    handle,
                    parameter,
                })
            }
        }
    }

    /// View this type as an array type.
    pub fn as_array(&self) -> Option<ArrayType<'_>> {
        match self.repr {
            TypeRepr::Array { handle } => Some(ArrayType { ty: self, handle }),
            _ => None,
        }
    }

    /// View this type as an intersection type.
    pub fn as_intersection(&self) -> Option<IntersectionType<'_>> {
        match self.repr {
            TypeRepr::Intersection { handle } => Some(IntersectionType { ty: self, handle }),
            _ => None,
        }
    }

    /// View this type as a type variable.
    pub fn as_type_variable(&self) -> Option<TypeVariable<'_>> {
        match self.repr {
            TypeRepr::TypeVariable { handle, parameter } => Some(TypeVariable {
                ty: self,
                handle,
                parameter,
            }),
            _ => None,
        }
    }

    /// View this type as a declared type.
    pub fn as_declared(&self) -> Option<DeclaredType<'_>> {
        match self.repr {
            TypeRepr::Declared { handle } => Some(DeclaredType { ty: self, handle }),
            _ => None,
        }
    }

    /// Dispose this type's handles.
    ///
    /// Returns `true` if any handle was live. Disposing again is a no-op.
    pub fn dispose(&self, cx: &mut Bridge<'_>) -> bool {
        let mut disposed = false;
        for handle in self.handles() {
            disposed |= cx.dispose(handle);
        }
        disposed
    }
}

impl PartialEq for BridgeType {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for BridgeType {}

impl Hash for BridgeType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

/// An array type.
#[derive(Copy, Clone, Debug)]
pub struct ArrayType<'t> {
    ty: &'t BridgeType,
    handle: HandleId,
}

impl<'t> ArrayType<'t> {
    /// The viewed type.
    pub fn ty(self) -> &'t BridgeType {
        self.ty
    }

    /// Bridge the element type, keeping the raw flag.
    pub fn component_type(self, cx: &mut Bridge<'_>) -> Result<BridgeType, BridgeError> {
        let node = cx.node(self.handle)?;
        let host = cx.host();
        let component = host.component_type(node).ok_or_else(|| {
            InternalConsistencyFailure::MissingComponentType {
                text: host.canonical_text(node),
            }
        })?;
        cx.bridge_type(component, self.ty.raw)
    }
}

/// An intersection type.
#[derive(Copy, Clone, Debug)]
pub struct IntersectionType<'t> {
    ty: &'t BridgeType,
    handle: HandleId,
}

impl<'t> IntersectionType<'t> {
    /// The viewed type.
    pub fn ty(self) -> &'t BridgeType {
        self.ty
    }

    /// Bridge each bound in host declaration order, keeping the raw flag.
    pub fn bounds(self, cx: &mut Bridge<'_>) -> Result<Vec<BridgeType>, BridgeError> {
        let node = cx.node(self.handle)?;
        let host = cx.host();
        host.super_types(node)
            .into_iter()
            .map(|bound| cx.bridge_type(bound, self.ty.raw))
            .collect()
    }
}

/// A type variable.
#[derive(Copy, Clone, Debug)]
pub struct TypeVariable<'t> {
    ty: &'t BridgeType,
    handle: HandleId,
    parameter: HandleId,
}

impl<'t> TypeVariable<'t> {
    /// The viewed type.
    pub fn ty(self) -> &'t BridgeType {
        self.ty
    }

    /// Always the null sentinel; captured lower bounds are not supported.
    pub fn lower_bound(self, cx: &Bridge<'_>) -> Result<BridgeType, StaleReferenceError> {
        cx.node(self.handle)?;
        Ok(BridgeType::no_lower_bound())
    }

    /// The declared upper bound.
    ///
    /// - no declared bound: the universal top type
    /// - one bound: that bound's type, never a one-bound intersection
    /// - several bounds: an intersection over exactly those bounds, in order
    pub fn upper_bound(self, cx: &mut Bridge<'_>) -> Result<BridgeType, BridgeError> {
        cx.node(self.handle)?;
        let parameter = cx.node(self.parameter)?;
        let host = cx.host();
        match host.super_types(parameter).as_slice() {
            [] => cx.bridge_type(host.top_type(), self.ty.raw),
            [bound] => cx.bridge_type(*bound, self.ty.raw),
            _ => cx.bound_intersection(parameter, self.ty.raw),
        }
    }

    /// The declaring type parameter's element.
    pub fn as_element(self, cx: &mut Bridge<'_>) -> Result<BridgeElement, BridgeError> {
        cx.node(self.handle)?;
        let parameter = cx.node(self.parameter)?;
        cx.element(parameter)
    }
}

/// A class, interface, enum or annotation type usage.
#[derive(Copy, Clone, Debug)]
pub struct DeclaredType<'t> {
    ty: &'t BridgeType,
    handle: HandleId,
}

impl<'t> DeclaredType<'t> {
    /// The viewed type.
    pub fn ty(self) -> &'t BridgeType {
        self.ty
    }

    /// Bridge the type arguments. A raw usage has none.
    pub fn type_arguments(self, cx: &mut Bridge<'_>) -> Result<Vec<BridgeType>, BridgeError> {
        let node = cx.node(self.handle)?;
        if self.ty.raw {
            return Ok(Vec::new());
        }
        let host = cx.host();
        host.type_arguments(node)
            .into_iter()
            .map(|argument| cx.bridge_type(argument, false))
            .collect()
    }

    /// The declaration this type refers to, if the host can resolve it.
    pub fn as_element(self, cx: &mut Bridge<'_>) -> Result<Option<BridgeElement>, BridgeError> {
        let node = cx.node(self.handle)?;
        match cx.host().type_declaration(node) {
            Some(declaration) => cx.element(declaration).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests;
