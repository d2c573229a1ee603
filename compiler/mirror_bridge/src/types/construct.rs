//! Type construction.
//!
//! Construction is two-phase: the structural key is computed from the host
//! first, then the wrapped nodes are registered, then the finished value is
//! returned. Nothing is registered for a node the host has already discarded.

use mirror_host::{HostModel, NodeId, TypeShape};

use super::{BridgeType, TypeKey, TypeRepr};
use crate::stack::ensure_sufficient_stack;
use crate::{Bridge, BridgeError};

/// Render a type the way the host does, erasing type arguments of raw
/// declared types.
pub(super) fn render_type(host: &dyn HostModel, ty: NodeId, raw: bool) -> String {
    match host.type_shape(ty) {
        TypeShape::Declared if raw => host.erased_text(ty),
        TypeShape::TypeVariable => host
            .type_parameter(ty)
            .and_then(|parameter| host.name(parameter))
            .unwrap_or_else(|| host.canonical_text(ty)),
        _ => host.canonical_text(ty),
    }
}

fn type_key(host: &dyn HostModel, ty: NodeId, raw: bool) -> TypeKey {
    match host.type_shape(ty) {
        TypeShape::Primitive(kind) => TypeKey::Primitive(kind),
        TypeShape::Void => TypeKey::Void,
        TypeShape::Null => TypeKey::Null,
        TypeShape::Error => TypeKey::Error {
            text: host.canonical_text(ty),
        },
        TypeShape::Declared => TypeKey::Declared {
            text: render_type(host, ty, raw),
            raw,
        },
        TypeShape::Array => {
            let component = match host.component_type(ty) {
                Some(component) => ensure_sufficient_stack(|| type_key(host, component, raw)),
                None => TypeKey::Error {
                    text: host.canonical_text(ty),
                },
            };
            TypeKey::Array {
                component: Box::new(component),
                raw,
            }
        }
        TypeShape::Intersection => TypeKey::Intersection {
            bounds: bound_keys(host, ty, raw),
            raw,
        },
        TypeShape::TypeVariable => match host.type_parameter(ty) {
            Some(parameter) => TypeKey::TypeVariable { parameter, raw },
            None => TypeKey::Error {
                text: host.canonical_text(ty),
            },
        },
    }
}

fn bound_keys(host: &dyn HostModel, node: NodeId, raw: bool) -> Vec<TypeKey> {
    host.super_types(node)
        .into_iter()
        .map(|bound| ensure_sufficient_stack(|| type_key(host, bound, raw)))
        .collect()
}

impl Bridge<'_> {
    /// Bridge a host type node.
    ///
    /// `raw` marks a raw usage and is inherited by every type derived from
    /// the result.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn bridge_type(&mut self, ty: NodeId, raw: bool) -> Result<BridgeType, BridgeError> {
        self.check_node(ty)?;
        let host = self.host();
        let key = type_key(host, ty, raw);

        let repr = match host.type_shape(ty) {
            TypeShape::Null => TypeRepr::Null,
            TypeShape::Primitive(kind) => TypeRepr::Primitive {
                handle: self.register(ty),
                kind,
            },
            TypeShape::Void => TypeRepr::Void {
                handle: self.register(ty),
            },
            TypeShape::Error => TypeRepr::Error {
                handle: self.register(ty),
            },
            TypeShape::Declared => TypeRepr::Declared {
                handle: self.register(ty),
            },
            TypeShape::Array => TypeRepr::Array {
                handle: self.register(ty),
            },
            TypeShape::Intersection => TypeRepr::Intersection {
                handle: self.register(ty),
            },
            TypeShape::TypeVariable => match host.type_parameter(ty) {
                Some(parameter) => {
                    self.check_node(parameter)?;
                    TypeRepr::TypeVariable {
                        handle: self.register(ty),
                        parameter: self.register(parameter),
                    }
                }
                None => {
                    tracing::debug!(?ty, "type variable without a declaring parameter");
                    TypeRepr::Error {
                        handle: self.register(ty),
                    }
                }
            },
        };

        Ok(BridgeType { repr, raw, key })
    }

    /// Build the intersection of a type parameter's declared bounds.
    pub(super) fn bound_intersection(
        &mut self,
        parameter: NodeId,
        raw: bool,
    ) -> Result<BridgeType, BridgeError> {
        self.check_node(parameter)?;
        let bounds = bound_keys(self.host(), parameter, raw);
        let handle = self.register(parameter);
        Ok(BridgeType {
            repr: TypeRepr::Intersection { handle },
            raw,
            key: TypeKey::Intersection { bounds, raw },
        })
    }
}
