//! Bridge failures.
//!
//! Only two things are errors here: touching a bridge object whose host node
//! is gone, and the host breaking its own contract. A reference that does not
//! resolve is *not* an error; it classifies to
//! [`ValueKind::Unresolved`](crate::ValueKind::Unresolved).

use mirror_host::{ConstantKind, NodeId};

use crate::HandleId;

/// Access to a bridge object whose host node is no longer available.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StaleReferenceError {
    /// The handle was disposed, individually or by a registry teardown.
    #[error("bridge handle {handle:?} was disposed")]
    Disposed { handle: HandleId },
    /// The host discarded the node (e.g. after a reparse).
    #[error("host node {node:?} was invalidated by the host")]
    HostInvalidated { node: NodeId },
}

/// The host reported something its contract rules out.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InternalConsistencyFailure {
    #[error("literal `{text}` has no runtime value")]
    MissingLiteralValue { text: String },
    #[error("bad annotation element value `{text}` of kind {kind:?}")]
    BadValueKind { text: String, kind: ConstantKind },
    #[error("unsupported annotation element value `{text}`")]
    UnsupportedValue { text: String },
    #[error("`{text}` is not an annotation")]
    NotAnAnnotation { text: String },
    #[error("annotation `{text}` has no annotation type")]
    MissingAnnotationType { text: String },
    #[error("array type `{text}` has no component type")]
    MissingComponentType { text: String },
    #[error("class literal `{text}` has no operand type")]
    MissingOperandType { text: String },
}

/// Any failure raised by the bridge.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Stale(#[from] StaleReferenceError),
    #[error("internal consistency failure: {0}")]
    Internal(#[from] InternalConsistencyFailure),
}

impl BridgeError {
    /// Check if this is a lifetime violation.
    pub fn is_stale(&self) -> bool {
        matches!(self, BridgeError::Stale(_))
    }
}
