//! Arena-backed in-memory host.
//!
//! Nodes live in a flat `Vec` indexed by [`NodeId`]. Builder methods append
//! nodes and return their ids; references can be retargeted after creation
//! so forward references and cycles can be expressed.
//!
//! [`MemoryHost::invalidate`] and [`MemoryHost::reparse`] reproduce what a
//! real host does when it throws away its model: old nodes stay addressable
//! but report `is_valid == false`.

use rustc_hash::FxHashMap;

use crate::{
    Attribute, Constant, HostModel, NodeId, PrimitiveKind, SymbolKind, TypeShape, ValueShape,
};

/// Name of the top type created by [`MemoryHost::new`].
const DEFAULT_TOP_TYPE: &str = "java.lang.Object";

#[derive(Clone, Debug)]
enum NodeData {
    // Types
    Primitive(PrimitiveKind),
    Void,
    Null,
    ErrorType,
    Array {
        component: NodeId,
    },
    Intersection {
        conjuncts: Vec<NodeId>,
    },
    Declared {
        declaration: NodeId,
        arguments: Vec<NodeId>,
    },
    TypeVariable {
        parameter: NodeId,
    },

    // Declarations
    Symbol {
        kind: SymbolKind,
        name: String,
        owner: Option<NodeId>,
        ty: Option<NodeId>,
        initializer: Option<NodeId>,
        bounds: Vec<NodeId>,
    },

    // Values
    Literal(Option<Constant>),
    Expression(Option<Constant>),
    Reference {
        target: Option<NodeId>,
    },
    ClassLiteral {
        operand: NodeId,
    },
    ArrayInitializer {
        elements: Vec<NodeId>,
    },
    Annotation {
        ty: NodeId,
        attributes: Vec<Attribute>,
    },
    Statement,
}

#[derive(Clone, Debug)]
struct Node {
    data: NodeData,
    /// Source text for values, canonical text for types, name for symbols.
    text: String,
    valid: bool,
}

/// In-memory [`HostModel`].
#[derive(Clone, Debug)]
pub struct MemoryHost {
    nodes: Vec<Node>,
    /// Type declarations by qualified name.
    declarations: FxHashMap<String, NodeId>,
    top_type: NodeId,
    top_type_name: String,
}

impl MemoryHost {
    /// Create a host whose top type is `java.lang.Object`.
    pub fn new() -> Self {
        Self::with_top_type(DEFAULT_TOP_TYPE)
    }

    /// Create a host with a custom top type name.
    pub fn with_top_type(name: &str) -> Self {
        let mut host = MemoryHost {
            nodes: Vec::with_capacity(64),
            declarations: FxHashMap::default(),
            top_type: NodeId::new(0),
            top_type_name: name.to_owned(),
        };
        host.declare_top_type();
        host
    }

    fn declare_top_type(&mut self) {
        let name = self.top_type_name.clone();
        let object = self.declaration(SymbolKind::Class, &name);
        self.top_type = self.declared_type_of(object, &[]);
    }

    /// Number of nodes ever created, valid or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if no nodes were created.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, data: NodeData, text: impl Into<String>) -> NodeId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "host models never approach u32::MAX nodes"
        )]
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(Node {
            data,
            text: text.into(),
            valid: true,
        });
        id
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.node(id).map(|node| &node.data)
    }

    fn text_of(&self, id: NodeId) -> String {
        self.node(id).map(|node| node.text.clone()).unwrap_or_default()
    }

    // === Types ===

    /// Create a primitive type usage.
    pub fn primitive_type(&mut self, kind: PrimitiveKind) -> NodeId {
        self.push(NodeData::Primitive(kind), kind.keyword())
    }

    /// Create the `void` pseudo-type.
    pub fn void_type(&mut self) -> NodeId {
        self.push(NodeData::Void, "void")
    }

    /// Create the type of the null literal.
    pub fn null_type(&mut self) -> NodeId {
        self.push(NodeData::Null, "null")
    }

    /// Create an unresolvable type usage rendered as `text`.
    pub fn error_type(&mut self, text: &str) -> NodeId {
        self.push(NodeData::ErrorType, text)
    }

    /// Create an array type with the given component.
    pub fn array_type(&mut self, component: NodeId) -> NodeId {
        let text = format!("{}[]", self.text_of(component));
        self.push(NodeData::Array { component }, text)
    }

    /// Create an intersection of the given conjuncts.
    pub fn intersection_type(&mut self, conjuncts: &[NodeId]) -> NodeId {
        let text = self.join_texts(conjuncts, " & ");
        self.push(
            NodeData::Intersection {
                conjuncts: conjuncts.to_vec(),
            },
            text,
        )
    }

    /// Create a usage of a type declaration with the given type arguments.
    pub fn declared_type_of(&mut self, declaration: NodeId, arguments: &[NodeId]) -> NodeId {
        let mut text = self.text_of(declaration);
        if !arguments.is_empty() {
            text.push('<');
            text.push_str(&self.join_texts(arguments, ","));
            text.push('>');
        }
        self.push(
            NodeData::Declared {
                declaration,
                arguments: arguments.to_vec(),
            },
            text,
        )
    }

    /// Create a fresh usage of a type parameter.
    pub fn type_variable(&mut self, parameter: NodeId) -> NodeId {
        let text = self.text_of(parameter);
        self.push(NodeData::TypeVariable { parameter }, text)
    }

    /// The host's top type.
    pub fn object_type(&self) -> NodeId {
        self.top_type
    }

    fn join_texts(&self, ids: &[NodeId], sep: &str) -> String {
        ids.iter()
            .map(|&id| self.text_of(id))
            .collect::<Vec<_>>()
            .join(sep)
    }

    // === Declarations ===

    /// Create a top-level type declaration.
    ///
    /// The declaration is also recorded by name for [`lookup`](Self::lookup).
    pub fn declaration(&mut self, kind: SymbolKind, qualified_name: &str) -> NodeId {
        let id = self.symbol(kind, qualified_name, None, None, None, Vec::new());
        self.declarations.insert(qualified_name.to_owned(), id);
        id
    }

    /// Look up a type declaration by qualified name.
    pub fn lookup(&self, qualified_name: &str) -> Option<NodeId> {
        self.declarations.get(qualified_name).copied()
    }

    /// Create a type parameter owned by `owner` with the given bounds.
    ///
    /// The parameter's declared type is a type variable usage of itself.
    pub fn declare_type_parameter(
        &mut self,
        owner: NodeId,
        name: &str,
        bounds: &[NodeId],
    ) -> NodeId {
        let parameter = self.symbol(
            SymbolKind::TypeParameter,
            name,
            Some(owner),
            None,
            None,
            bounds.to_vec(),
        );
        let variable = self.type_variable(parameter);
        self.set_symbol_type(parameter, variable);
        parameter
    }

    /// Create an enum constant of the enum `owner`.
    pub fn enum_constant(&mut self, owner: NodeId, name: &str) -> NodeId {
        let ty = self.declared_type_of(owner, &[]);
        self.symbol(SymbolKind::EnumConstant, name, Some(owner), Some(ty), None, Vec::new())
    }

    /// Create a field of `owner`.
    pub fn field(
        &mut self,
        owner: NodeId,
        name: &str,
        ty: NodeId,
        initializer: Option<NodeId>,
    ) -> NodeId {
        self.symbol(SymbolKind::Field, name, Some(owner), Some(ty), initializer, Vec::new())
    }

    /// Create a method of `owner`.
    pub fn method(&mut self, owner: NodeId, name: &str) -> NodeId {
        self.symbol(SymbolKind::Method, name, Some(owner), None, None, Vec::new())
    }

    fn symbol(
        &mut self,
        kind: SymbolKind,
        name: &str,
        owner: Option<NodeId>,
        ty: Option<NodeId>,
        initializer: Option<NodeId>,
        bounds: Vec<NodeId>,
    ) -> NodeId {
        self.push(
            NodeData::Symbol {
                kind,
                name: name.to_owned(),
                owner,
                ty,
                initializer,
                bounds,
            },
            name,
        )
    }

    fn set_symbol_type(&mut self, symbol: NodeId, new_ty: NodeId) {
        if let Some(Node {
            data: NodeData::Symbol { ty, .. },
            ..
        }) = self.nodes.get_mut(symbol.index())
        {
            *ty = Some(new_ty);
        }
    }

    // === Values ===

    /// Create a literal with a runtime value.
    pub fn literal(&mut self, text: &str, value: impl Into<Constant>) -> NodeId {
        self.push(NodeData::Literal(Some(value.into())), text)
    }

    /// Create a literal for which the host reports no runtime value.
    pub fn malformed_literal(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Literal(None), text)
    }

    /// Create a non-literal expression with its folded value, if any.
    pub fn expression(&mut self, text: &str, folded: Option<Constant>) -> NodeId {
        self.push(NodeData::Expression(folded), text)
    }

    /// Create a reference expression resolving to `target`.
    pub fn reference(&mut self, text: &str, target: Option<NodeId>) -> NodeId {
        self.push(NodeData::Reference { target }, text)
    }

    /// Retarget an existing reference expression.
    pub fn set_target(&mut self, reference: NodeId, new_target: Option<NodeId>) {
        if let Some(Node {
            data: NodeData::Reference { target },
            ..
        }) = self.nodes.get_mut(reference.index())
        {
            *target = new_target;
        }
    }

    /// Create a class literal `T.class` for the operand type.
    pub fn class_literal(&mut self, operand: NodeId) -> NodeId {
        let text = format!("{}.class", self.text_of(operand));
        self.push(NodeData::ClassLiteral { operand }, text)
    }

    /// Create an array initializer `{a, b, ...}`.
    pub fn array_initializer(&mut self, elements: &[NodeId]) -> NodeId {
        let text = format!("{{{}}}", self.join_texts(elements, ", "));
        self.push(
            NodeData::ArrayInitializer {
                elements: elements.to_vec(),
            },
            text,
        )
    }

    /// Create an annotation of the annotation type `ty`.
    pub fn annotation(&mut self, ty: NodeId, attributes: Vec<Attribute>) -> NodeId {
        let mut text = format!("@{}", self.text_of(ty));
        if !attributes.is_empty() {
            let members = attributes
                .iter()
                .map(|attr| format!("{} = {}", attr.name, self.text_of(attr.value)))
                .collect::<Vec<_>>()
                .join(", ");
            text.push('(');
            text.push_str(&members);
            text.push(')');
        }
        self.push(NodeData::Annotation { ty, attributes }, text)
    }

    /// Create a node that is not an expression.
    pub fn statement(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Statement, text)
    }

    // === Lifecycle ===

    /// Discard a single node.
    pub fn invalidate(&mut self, node: NodeId) {
        if let Some(node) = self.nodes.get_mut(node.index()) {
            node.valid = false;
        }
    }

    /// Discard every existing node, as a host does when it reparses.
    ///
    /// Nodes created afterwards are valid. Name lookups are forgotten and
    /// the top type is declared again in the new model.
    pub fn reparse(&mut self) {
        for node in &mut self.nodes {
            node.valid = false;
        }
        self.declarations.clear();
        self.declare_top_type();
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostModel for MemoryHost {
    fn is_valid(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|node| node.valid)
    }

    fn source_text(&self, node: NodeId) -> String {
        self.text_of(node)
    }

    fn type_shape(&self, ty: NodeId) -> TypeShape {
        match self.data(ty) {
            Some(NodeData::Primitive(kind)) => TypeShape::Primitive(*kind),
            Some(NodeData::Void) => TypeShape::Void,
            Some(NodeData::Null) => TypeShape::Null,
            Some(NodeData::Array { .. }) => TypeShape::Array,
            Some(NodeData::Intersection { .. }) => TypeShape::Intersection,
            Some(NodeData::Declared { .. }) => TypeShape::Declared,
            Some(NodeData::TypeVariable { .. }) => TypeShape::TypeVariable,
            _ => TypeShape::Error,
        }
    }

    fn canonical_text(&self, ty: NodeId) -> String {
        self.text_of(ty)
    }

    fn component_type(&self, ty: NodeId) -> Option<NodeId> {
        match self.data(ty) {
            Some(NodeData::Array { component }) => Some(*component),
            _ => None,
        }
    }

    fn super_types(&self, node: NodeId) -> Vec<NodeId> {
        match self.data(node) {
            Some(NodeData::Intersection { conjuncts }) => conjuncts.clone(),
            Some(NodeData::Symbol { bounds, .. }) => bounds.clone(),
            _ => Vec::new(),
        }
    }

    fn type_arguments(&self, ty: NodeId) -> Vec<NodeId> {
        match self.data(ty) {
            Some(NodeData::Declared { arguments, .. }) => arguments.clone(),
            _ => Vec::new(),
        }
    }

    fn type_parameter(&self, ty: NodeId) -> Option<NodeId> {
        match self.data(ty) {
            Some(NodeData::TypeVariable { parameter }) => Some(*parameter),
            _ => None,
        }
    }

    fn type_declaration(&self, ty: NodeId) -> Option<NodeId> {
        match self.data(ty) {
            Some(NodeData::Declared { declaration, .. }) => Some(*declaration),
            _ => None,
        }
    }

    fn top_type(&self) -> NodeId {
        self.top_type
    }

    fn symbol_kind(&self, symbol: NodeId) -> SymbolKind {
        match self.data(symbol) {
            Some(NodeData::Symbol { kind, .. }) => *kind,
            _ => SymbolKind::Other,
        }
    }

    fn name(&self, symbol: NodeId) -> Option<String> {
        match self.data(symbol) {
            Some(NodeData::Symbol { name, .. }) => Some(name.clone()),
            _ => None,
        }
    }

    fn owner(&self, symbol: NodeId) -> Option<NodeId> {
        match self.data(symbol) {
            Some(NodeData::Symbol { owner, .. }) => *owner,
            _ => None,
        }
    }

    fn declared_type(&self, symbol: NodeId) -> Option<NodeId> {
        match self.data(symbol) {
            Some(NodeData::Symbol { ty, .. }) => *ty,
            _ => None,
        }
    }

    fn initializer(&self, field: NodeId) -> Option<NodeId> {
        match self.data(field) {
            Some(NodeData::Symbol { initializer, .. }) => *initializer,
            _ => None,
        }
    }

    fn value_shape(&self, value: NodeId) -> ValueShape {
        match self.data(value) {
            Some(NodeData::Literal(_)) => ValueShape::Literal,
            Some(NodeData::Annotation { .. }) => ValueShape::Annotation,
            Some(NodeData::ArrayInitializer { .. }) => ValueShape::ArrayInitializer,
            Some(NodeData::ClassLiteral { .. }) => ValueShape::ClassLiteral,
            Some(NodeData::Reference { .. }) => ValueShape::Reference,
            Some(NodeData::Expression(_)) => ValueShape::Expression,
            _ => ValueShape::Other,
        }
    }

    fn literal_value(&self, literal: NodeId) -> Option<Constant> {
        match self.data(literal) {
            Some(NodeData::Literal(value)) => value.clone(),
            _ => None,
        }
    }

    fn constant_value(&self, expr: NodeId) -> Option<Constant> {
        match self.data(expr) {
            Some(NodeData::Expression(value) | NodeData::Literal(value)) => value.clone(),
            Some(NodeData::Reference {
                target: Some(target),
            }) => self
                .initializer(*target)
                .and_then(|init| self.constant_value(init)),
            _ => None,
        }
    }

    fn resolve(&self, reference: NodeId) -> Option<NodeId> {
        match self.data(reference) {
            Some(NodeData::Reference { target }) => *target,
            _ => None,
        }
    }

    fn array_elements(&self, initializer: NodeId) -> Vec<NodeId> {
        match self.data(initializer) {
            Some(NodeData::ArrayInitializer { elements }) => elements.clone(),
            _ => Vec::new(),
        }
    }

    fn class_literal_operand(&self, value: NodeId) -> Option<NodeId> {
        match self.data(value) {
            Some(NodeData::ClassLiteral { operand }) => Some(*operand),
            _ => None,
        }
    }

    fn annotation_type(&self, annotation: NodeId) -> Option<NodeId> {
        match self.data(annotation) {
            Some(NodeData::Annotation { ty, .. }) => Some(*ty),
            _ => None,
        }
    }

    fn annotation_attributes(&self, annotation: NodeId) -> Vec<Attribute> {
        match self.data(annotation) {
            Some(NodeData::Annotation { attributes, .. }) => attributes.clone(),
            _ => Vec::new(),
        }
    }
}
