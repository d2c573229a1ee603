//! Bridged declarations.

use std::hash::{Hash, Hasher};

use mirror_host::{Constant, NodeId, SymbolKind};

use crate::{Bridge, BridgeError, BridgeType, HandleId, StaleReferenceError};

/// Kind tag of a bridged declaration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
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

impl ElementKind {
    /// Check if this kind declares a type.
    pub const fn is_type(self) -> bool {
        matches!(
            self,
            ElementKind::Class
                | ElementKind::Interface
                | ElementKind::Enum
                | ElementKind::AnnotationType
        )
    }
}

impl From<SymbolKind> for ElementKind {
    fn from(kind: SymbolKind) -> Self {
        match kind {
            SymbolKind::Class => ElementKind::Class,
            SymbolKind::Interface => ElementKind::Interface,
            SymbolKind::Enum => ElementKind::Enum,
            SymbolKind::AnnotationType => ElementKind::AnnotationType,
            SymbolKind::EnumConstant => ElementKind::EnumConstant,
            SymbolKind::Field => ElementKind::Field,
            SymbolKind::Method => ElementKind::Method,
            SymbolKind::Constructor => ElementKind::Constructor,
            SymbolKind::TypeParameter => ElementKind::TypeParameter,
            SymbolKind::Other => ElementKind::Other,
        }
    }
}

/// A bridged host declaration.
///
/// Equal to another element when both wrap the same host declaration with
/// the same kind, whatever their handles.
#[derive(Clone, Debug)]
pub struct BridgeElement {
    handle: HandleId,
    kind: ElementKind,
    declaration: NodeId,
}

impl BridgeElement {
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn handle(&self) -> HandleId {
        self.handle
    }

    pub fn simple_name(&self, cx: &Bridge<'_>) -> Result<String, StaleReferenceError> {
        let node = cx.node(self.handle)?;
        Ok(cx.host().name(node).unwrap_or_default())
    }

    /// The declaration this one is nested in.
    pub fn enclosing_element(
        &self,
        cx: &mut Bridge<'_>,
    ) -> Result<Option<BridgeElement>, BridgeError> {
        let node = cx.node(self.handle)?;
        match cx.host().owner(node) {
            Some(owner) => cx.element(owner).map(Some),
            None => Ok(None),
        }
    }

    /// The type this declaration introduces or has.
    ///
    /// Fields and enum constants give their declared type, type parameters
    /// their type variable.
    pub fn as_type(&self, cx: &mut Bridge<'_>) -> Result<Option<BridgeType>, BridgeError> {
        let node = cx.node(self.handle)?;
        match cx.host().declared_type(node) {
            Some(ty) => cx.bridge_type(ty, false).map(Some),
            None => Ok(None),
        }
    }

    /// Declared bounds of a type parameter, in order. Empty for anything
    /// else.
    pub fn bounds(&self, cx: &mut Bridge<'_>) -> Result<Vec<BridgeType>, BridgeError> {
        let node = cx.node(self.handle)?;
        if self.kind != ElementKind::TypeParameter {
            return Ok(Vec::new());
        }
        let host = cx.host();
        host.super_types(node)
            .into_iter()
            .map(|bound| cx.bridge_type(bound, false))
            .collect()
    }

    /// The declaration that owns a type parameter.
    pub fn generic_element(
        &self,
        cx: &mut Bridge<'_>,
    ) -> Result<Option<BridgeElement>, BridgeError> {
        if self.kind != ElementKind::TypeParameter {
            cx.node(self.handle)?;
            return Ok(None);
        }
        self.enclosing_element(cx)
    }

    /// Compile-time value of a field whose initializer folds to a constant.
    pub fn constant_value(&self, cx: &Bridge<'_>) -> Result<Option<Constant>, StaleReferenceError> {
        let node = cx.node(self.handle)?;
        if self.kind != ElementKind::Field {
            return Ok(None);
        }
        let host = cx.host();
        Ok(host
            .initializer(node)
            .and_then(|initializer| host.constant_value(initializer)))
    }

    /// Dispatch to the visitor method for this element's kind.
    pub fn accept<V: ElementVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self.kind {
            ElementKind::Class
            | ElementKind::Interface
            | ElementKind::Enum
            | ElementKind::AnnotationType => visitor.visit_type(self),
            ElementKind::EnumConstant | ElementKind::Field => visitor.visit_variable(self),
            ElementKind::Method | ElementKind::Constructor => visitor.visit_executable(self),
            ElementKind::TypeParameter => visitor.visit_type_parameter(self),
            ElementKind::Other => visitor.visit_unknown(self),
        }
    }

    pub fn dispose(&self, cx: &mut Bridge<'_>) -> bool {
        cx.dispose(self.handle)
    }
}

impl PartialEq for BridgeElement {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.declaration == other.declaration
    }
}

impl Eq for BridgeElement {}

impl Hash for BridgeElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.declaration.hash(state);
    }
}

/// Per-kind callbacks for [`BridgeElement::accept`].
pub trait ElementVisitor {
    type Output;

    fn visit_default(&mut self, element: &BridgeElement) -> Self::Output;

    /// Classes, interfaces, enums and annotation types.
    fn visit_type(&mut self, element: &BridgeElement) -> Self::Output {
        self.visit_default(element)
    }

    /// Fields and enum constants.
    fn visit_variable(&mut self, element: &BridgeElement) -> Self::Output {
        self.visit_default(element)
    }

    /// Methods and constructors.
    fn visit_executable(&mut self, element: &BridgeElement) -> Self::Output {
        self.visit_default(element)
    }

    fn visit_type_parameter(&mut self, element: &BridgeElement) -> Self::Output {
        self.visit_default(element)
    }

    fn visit_unknown(&mut self, element: &BridgeElement) -> Self::Output {
        self.visit_default(element)
    }
}

impl Bridge<'_> {
    /// Bridge a host declaration.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn element(&mut self, declaration: NodeId) -> Result<BridgeElement, BridgeError> {
        self.check_node(declaration)?;
        let kind = ElementKind::from(self.host().symbol_kind(declaration));
        let handle = self.register(declaration);
        Ok(BridgeElement {
            handle,
            kind,
            declaration,
        })
    }
}
