//! Bridged annotation element values.
//!
//! [`Bridge::annotation_value`] classifies a host value node into exactly one
//! [`ValueKind`]:
//!
//! 1. literal: `Literal`, its runtime value read from the host on demand
//! 2. nested annotation: `NestedAnnotation`
//! 3. array initializer: `Array`, children classified in source order
//! 4. class literal: `ClassLiteral`, its value is the operand's type
//! 5. reference: an enum constant gives `EnumConstant`; a field with an
//!    initializer is replaced by the classification of that initializer;
//!    anything else is `Unresolved`, carrying the source text verbatim
//! 6. other expression: `ConstantExpression`, its value is whatever the host
//!    can fold, possibly nothing
//!
//! A node that is not an expression at all is a host contract violation.
//!
//! Resolution failures never make classification fail. They end in
//! `Unresolved`.

mod mirror;
mod visitor;

pub use mirror::{AnnotationMember, AnnotationMirror};
pub use visitor::AnnotationValueVisitor;

use mirror_host::{Constant, ConstantKind, HostModel, NodeId, SymbolKind, ValueShape};

use crate::stack::ensure_sufficient_stack;
use crate::{
    Bridge, BridgeElement, BridgeError, BridgeType, HandleId, InternalConsistencyFailure,
    StaleReferenceError,
};

/// Kind tag of an annotation value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueKind {
    Literal,
    NestedAnnotation,
    Array,
    /// A value written without array syntax for an array-typed member.
    SingletonArray,
    ClassLiteral,
    EnumConstant,
    ConstantExpression,
    Unresolved,
}

#[derive(Clone, Debug)]
enum ValueRepr {
    Literal,
    NestedAnnotation(AnnotationMirror),
    Array,
    SingletonArray,
    ClassLiteral(BridgeType),
    EnumConstant(BridgeElement),
    ConstantExpression,
    Unresolved(String),
}

/// The value of an annotation value, as the consumer API sees it.
#[derive(Clone, Debug, PartialEq)]
pub enum Value<'v> {
    Constant(Constant),
    /// A constant expression the host could not fold.
    Unknown,
    Annotation(&'v AnnotationMirror),
    EnumConstant(&'v BridgeElement),
    Type(&'v BridgeType),
    Array(&'v [AnnotationValue]),
    /// Source text of a reference that does not resolve to a constant.
    Unresolved(&'v str),
}

/// A classified annotation value.
#[derive(Clone, Debug)]
pub struct AnnotationValue {
    handle: HandleId,
    repr: ValueRepr,
    /// Elements of `Array`, or the single wrapped value of `SingletonArray`.
    children: Vec<AnnotationValue>,
}

/// Identity: the same bridge object, not the same source.
impl PartialEq for AnnotationValue {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl AnnotationValue {
    pub fn kind(&self) -> ValueKind {
        match self.repr {
            ValueRepr::Literal => ValueKind::Literal,
            ValueRepr::NestedAnnotation(_) => ValueKind::NestedAnnotation,
            ValueRepr::Array => ValueKind::Array,
            ValueRepr::SingletonArray => ValueKind::SingletonArray,
            ValueRepr::ClassLiteral(_) => ValueKind::ClassLiteral,
            ValueRepr::EnumConstant(_) => ValueKind::EnumConstant,
            ValueRepr::ConstantExpression => ValueKind::ConstantExpression,
            ValueRepr::Unresolved(_) => ValueKind::Unresolved,
        }
    }

    pub fn handle(&self) -> HandleId {
        self.handle
    }

    /// Child values of an array, in declaration order. Empty otherwise.
    pub fn children(&self) -> &[AnnotationValue] {
        &self.children
    }

    /// Verbatim source text of the wrapped node.
    pub fn source_text(&self, cx: &Bridge<'_>) -> Result<String, StaleReferenceError> {
        let node = cx.node(self.handle)?;
        Ok(cx.host().source_text(node))
    }

    /// The typed value.
    ///
    /// Literal and constant-expression values are read from the host, so
    /// this fails once the value is stale.
    pub fn value(&self, cx: &Bridge<'_>) -> Result<Value<'_>, BridgeError> {
        let node = cx.node(self.handle)?;
        let host = cx.host();
        Ok(match &self.repr {
            ValueRepr::Literal => Value::Constant(literal_constant(host, node)?),
            ValueRepr::ConstantExpression => match host.constant_value(node) {
                Some(Constant::Null) | None => Value::Unknown,
                Some(constant) => Value::Constant(constant),
            },
            ValueRepr::NestedAnnotation(mirror) => Value::Annotation(mirror),
            ValueRepr::Array | ValueRepr::SingletonArray => Value::Array(&self.children),
            ValueRepr::ClassLiteral(ty) => Value::Type(ty),
            ValueRepr::EnumConstant(constant) => Value::EnumConstant(constant),
            ValueRepr::Unresolved(text) => Value::Unresolved(text),
        })
    }

    /// Dispatch to the visitor method matching this value.
    ///
    /// Constants dispatch on their runtime kind. Unresolved references are
    /// visited as strings holding their source text.
    pub fn accept<V: AnnotationValueVisitor + ?Sized>(
        &self,
        visitor: &mut V,
        cx: &Bridge<'_>,
    ) -> Result<V::Output, BridgeError> {
        Ok(match self.value(cx)? {
            Value::Constant(constant) => match constant {
                Constant::String(s) => visitor.visit_string(&s, self),
                Constant::Int(v) => visitor.visit_int(v, self),
                Constant::Long(v) => visitor.visit_long(v, self),
                Constant::Short(v) => visitor.visit_short(v, self),
                Constant::Byte(v) => visitor.visit_byte(v, self),
                Constant::Boolean(v) => visitor.visit_boolean(v, self),
                Constant::Char(v) => visitor.visit_char(v, self),
                Constant::Float(v) => visitor.visit_float(v, self),
                Constant::Double(v) => visitor.visit_double(v, self),
                Constant::Null => visitor.visit_unknown(self),
            },
            Value::Unknown => visitor.visit_unknown(self),
            Value::Annotation(mirror) => visitor.visit_annotation(mirror, self),
            Value::EnumConstant(constant) => visitor.visit_enum_constant(constant, self),
            Value::Type(ty) => visitor.visit_type(ty, self),
            Value::Array(values) => visitor.visit_array(values, self),
            Value::Unresolved(text) => visitor.visit_string(text, self),
        })
    }

    /// Dispose this value and everything it owns.
    ///
    /// Returns `true` if any handle was live.
    pub fn dispose(&self, cx: &mut Bridge<'_>) -> bool {
        ensure_sufficient_stack(|| {
            let mut disposed = cx.dispose(self.handle);
            match &self.repr {
                ValueRepr::NestedAnnotation(mirror) => disposed |= mirror.dispose(cx),
                ValueRepr::ClassLiteral(ty) => disposed |= ty.dispose(cx),
                ValueRepr::EnumConstant(constant) => disposed |= constant.dispose(cx),
                _ => {}
            }
            for child in &self.children {
                disposed |= child.dispose(cx);
            }
            disposed
        })
    }
}

fn literal_constant(
    host: &dyn HostModel,
    literal: NodeId,
) -> Result<Constant, InternalConsistencyFailure> {
    match host.literal_value(literal) {
        Some(Constant::Null) => Err(InternalConsistencyFailure::BadValueKind {
            text: host.source_text(literal),
            kind: ConstantKind::Null,
        }),
        Some(constant) => Ok(constant),
        None => Err(InternalConsistencyFailure::MissingLiteralValue {
            text: host.source_text(literal),
        }),
    }
}

impl Bridge<'_> {
    /// Classify a host value node.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn annotation_value(&mut self, node: NodeId) -> Result<AnnotationValue, BridgeError> {
        ensure_sufficient_stack(|| self.classify(node))
    }

    /// Classify the value written for an annotation member.
    ///
    /// When the member is array-typed but the value was written without
    /// array syntax, the classified value is wrapped in a `SingletonArray`.
    pub fn member_value(
        &mut self,
        node: NodeId,
        expects_array: bool,
    ) -> Result<AnnotationValue, BridgeError> {
        let value = self.annotation_value(node)?;
        if !expects_array || value.kind() == ValueKind::Array {
            return Ok(value);
        }
        let written = self.host().original(node);
        let handle = self.register(written);
        Ok(AnnotationValue {
            handle,
            repr: ValueRepr::SingletonArray,
            children: vec![value],
        })
    }

    fn classify(&mut self, node: NodeId) -> Result<AnnotationValue, BridgeError> {
        self.check_node(node)?;
        let host = self.host();
        let node = host.original(node);
        self.check_node(node)?;

        let mut children = Vec::new();
        let repr = match host.value_shape(node) {
            ValueShape::Literal => ValueRepr::Literal,
            ValueShape::Annotation => ValueRepr::NestedAnnotation(self.annotation_mirror(node)?),
            ValueShape::ArrayInitializer => {
                children = host
                    .array_elements(node)
                    .into_iter()
                    .map(|element| self.annotation_value(element))
                    .collect::<Result<Vec<_>, BridgeError>>()?;
                ValueRepr::Array
            }
            ValueShape::ClassLiteral => {
                let operand = host.class_literal_operand(node).ok_or_else(|| {
                    InternalConsistencyFailure::MissingOperandType {
                        text: host.source_text(node),
                    }
                })?;
                ValueRepr::ClassLiteral(self.bridge_type(operand, false)?)
            }
            ValueShape::Reference => match host.resolve(node) {
                Some(target) if host.is_valid(target) => {
                    match (host.symbol_kind(target), host.initializer(target)) {
                        (SymbolKind::EnumConstant, _) => {
                            ValueRepr::EnumConstant(self.element(target)?)
                        }
                        (SymbolKind::Field, Some(initializer)) => {
                            tracing::trace!(?target, ?initializer, "inlining field constant");
                            return self.annotation_value(initializer);
                        }
                        _ => ValueRepr::Unresolved(host.source_text(node)),
                    }
                }
                _ => ValueRepr::Unresolved(host.source_text(node)),
            },
            ValueShape::Expression => ValueRepr::ConstantExpression,
            ValueShape::Other => {
                return Err(InternalConsistencyFailure::UnsupportedValue {
                    text: host.source_text(node),
                }
                .into());
            }
        };

        let handle = self.register(node);
        Ok(AnnotationValue {
            handle,
            repr,
            children,
        })
    }
}
