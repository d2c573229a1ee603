//! Annotation mirrors.

use mirror_host::{NodeId, ValueShape};

use super::AnnotationValue;
use crate::stack::ensure_sufficient_stack;
use crate::{
    Bridge, BridgeError, BridgeType, HandleId, InternalConsistencyFailure, StaleReferenceError,
};

/// One written member of an annotation.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationMember {
    name: String,
    value: AnnotationValue,
}

impl AnnotationMember {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &AnnotationValue {
        &self.value
    }
}

/// A bridged annotation: its type plus its written member values.
#[derive(Clone, Debug)]
pub struct AnnotationMirror {
    handle: HandleId,
    annotation_type: BridgeType,
    members: Vec<AnnotationMember>,
}

/// Identity: the same bridge object.
impl PartialEq for AnnotationMirror {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl AnnotationMirror {
    pub fn handle(&self) -> HandleId {
        self.handle
    }

    /// The annotation's declared type.
    pub fn annotation_type(&self, cx: &Bridge<'_>) -> Result<&BridgeType, StaleReferenceError> {
        cx.node(self.handle)?;
        Ok(&self.annotation_type)
    }

    /// Written members in declaration order.
    pub fn element_values(
        &self,
        cx: &Bridge<'_>,
    ) -> Result<&[AnnotationMember], StaleReferenceError> {
        cx.node(self.handle)?;
        Ok(&self.members)
    }

    /// The value written for member `name`, if any.
    pub fn element_value(
        &self,
        name: &str,
        cx: &Bridge<'_>,
    ) -> Result<Option<&AnnotationValue>, StaleReferenceError> {
        Ok(self
            .element_values(cx)?
            .iter()
            .find(|member| member.name == name)
            .map(AnnotationMember::value))
    }

    pub fn source_text(&self, cx: &Bridge<'_>) -> Result<String, StaleReferenceError> {
        let node = cx.node(self.handle)?;
        Ok(cx.host().source_text(node))
    }

    /// Dispose the mirror, its type, and every member value.
    pub fn dispose(&self, cx: &mut Bridge<'_>) -> bool {
        ensure_sufficient_stack(|| {
            let mut disposed = cx.dispose(self.handle);
            disposed |= self.annotation_type.dispose(cx);
            for member in &self.members {
                disposed |= member.value.dispose(cx);
            }
            disposed
        })
    }
}

impl Bridge<'_> {
    /// Bridge a host annotation node.
    ///
    /// Members whose declared type is an array but whose value was written
    /// without array syntax come back as `SingletonArray`.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn annotation_mirror(&mut self, node: NodeId) -> Result<AnnotationMirror, BridgeError> {
        self.check_node(node)?;
        let host = self.host();
        if host.value_shape(node) != ValueShape::Annotation {
            return Err(InternalConsistencyFailure::NotAnAnnotation {
                text: host.source_text(node),
            }
            .into());
        }
        let ty = host.annotation_type(node).ok_or_else(|| {
            InternalConsistencyFailure::MissingAnnotationType {
                text: host.source_text(node),
            }
        })?;

        let annotation_type = self.bridge_type(ty, false)?;
        let mut members = Vec::new();
        for attribute in host.annotation_attributes(node) {
            let value = self.member_value(attribute.value, attribute.expects_array)?;
            members.push(AnnotationMember {
                name: attribute.name,
                value,
            });
        }

        let handle = self.register(node);
        Ok(AnnotationMirror {
            handle,
            annotation_type,
            members,
        })
    }
}
