//! Shape tags the host reports for its nodes.
//!
//! The bridge dispatches on these instead of downcasting host objects.

use std::fmt;

/// Primitive type kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

impl PrimitiveKind {
    /// All primitive kinds in declaration order.
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Char,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    /// Source keyword for this primitive.
    pub const fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Shape of a host type node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeShape {
    Primitive(PrimitiveKind),
    Void,
    /// The type of the null literal.
    Null,
    Array,
    Intersection,
    /// A class, interface, enum, or annotation type usage.
    Declared,
    /// A usage of a type parameter.
    TypeVariable,
    /// A type the host could not resolve.
    Error,
}

/// Shape of a host annotation-value node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueShape {
    Literal,
    Annotation,
    ArrayInitializer,
    ClassLiteral,
    Reference,
    /// Any other expression; the host may be able to fold it.
    Expression,
    /// Not an expression at all.
    Other,
}

/// Kind of a host declaration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymbolKind {
    Class,
    Interface,
    Enum,
    AnnotationType,
    EnumConstant,
    Field,
    Method,
    Constructor,
    TypeParameter,
    Other,
}

impl SymbolKind {
    /// Check if this symbol declares a type.
    #[inline]
    pub const fn is_type_declaration(self) -> bool {
        matches!(
            self,
            SymbolKind::Class
                | SymbolKind::Interface
                | SymbolKind::Enum
                | SymbolKind::AnnotationType
        )
    }
}
