//! The host query surface.

use crate::{Constant, NodeId, SymbolKind, TypeShape, ValueShape};

/// One member/value pair of an annotation, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    /// Member name.
    pub name: String,
    /// Host node of the written value.
    pub value: NodeId,
    /// Whether the member's declared type is an array type.
    pub expects_array: bool,
}

impl Attribute {
    /// A member whose declared type is not an array.
    pub fn new(name: impl Into<String>, value: NodeId) -> Self {
        Attribute {
            name: name.into(),
            value,
            expects_array: false,
        }
    }

    /// A member whose declared type is an array.
    pub fn array(name: impl Into<String>, value: NodeId) -> Self {
        Attribute {
            name: name.into(),
            value,
            expects_array: true,
        }
    }
}

/// Queries the bridge makes against the host's symbol model.
///
/// All methods are read-only and must not block. Calling any of them with a
/// node for which [`is_valid`](HostModel::is_valid) is false is allowed, but
/// the result is unspecified; the bridge checks validity first.
///
/// Queries that do not apply to a node's shape return `None`, an empty list,
/// or a neutral shape rather than panicking.
pub trait HostModel {
    /// Whether the node is still part of the host's current model.
    fn is_valid(&self, node: NodeId) -> bool;

    /// Verbatim source text of a node.
    fn source_text(&self, node: NodeId) -> String;

    // === Types ===

    /// Shape of a type node.
    fn type_shape(&self, ty: NodeId) -> TypeShape;

    /// The host's canonical rendering of a type.
    fn canonical_text(&self, ty: NodeId) -> String;

    /// Rendering of a type with its type arguments erased.
    fn erased_text(&self, ty: NodeId) -> String {
        let text = self.canonical_text(ty);
        match text.find('<') {
            Some(pos) => text[..pos].to_owned(),
            None => text,
        }
    }

    /// Element type of an array type.
    fn component_type(&self, ty: NodeId) -> Option<NodeId>;

    /// Conjuncts of an intersection type, or the declared bounds of a type
    /// parameter, in declaration order.
    fn super_types(&self, node: NodeId) -> Vec<NodeId>;

    /// Type arguments of a declared type usage.
    fn type_arguments(&self, ty: NodeId) -> Vec<NodeId>;

    /// Declaring type parameter of a type-variable usage.
    fn type_parameter(&self, ty: NodeId) -> Option<NodeId>;

    /// Declaration a declared type usage refers to.
    fn type_declaration(&self, ty: NodeId) -> Option<NodeId>;

    /// The universal top type.
    fn top_type(&self) -> NodeId;

    // === Symbols ===

    /// Kind of a declaration.
    fn symbol_kind(&self, symbol: NodeId) -> SymbolKind;

    /// Simple name of a declaration.
    fn name(&self, symbol: NodeId) -> Option<String>;

    /// Declaration that owns this one.
    fn owner(&self, symbol: NodeId) -> Option<NodeId>;

    /// Type of a field or enum constant, or the type variable of a type
    /// parameter.
    fn declared_type(&self, symbol: NodeId) -> Option<NodeId>;

    /// Initializer expression of a field.
    fn initializer(&self, field: NodeId) -> Option<NodeId>;

    // === Annotation values ===

    /// Shape of an annotation-value node.
    fn value_shape(&self, value: NodeId) -> ValueShape;

    /// Source-level node behind a value node. Hosts that wrap compiled or
    /// light-weight nodes map them back here.
    fn original(&self, value: NodeId) -> NodeId {
        value
    }

    /// Runtime value of a literal.
    fn literal_value(&self, literal: NodeId) -> Option<Constant>;

    /// Best-effort constant folding of an expression.
    fn constant_value(&self, expr: NodeId) -> Option<Constant>;

    /// Symbol a reference expression resolves to.
    fn resolve(&self, reference: NodeId) -> Option<NodeId>;

    /// Elements of an array initializer, in source order.
    fn array_elements(&self, initializer: NodeId) -> Vec<NodeId>;

    /// Operand type of a class literal.
    fn class_literal_operand(&self, value: NodeId) -> Option<NodeId>;

    /// Declared type of an annotation.
    fn annotation_type(&self, annotation: NodeId) -> Option<NodeId>;

    /// Written members of an annotation, in declaration order.
    fn annotation_attributes(&self, annotation: NodeId) -> Vec<Attribute>;
}
