//! Reflection-style bridge over a host symbol model.
//!
//! Wraps host type, declaration and annotation-value nodes in bridge objects
//! that a consumer written against a reflection API can query: kind tags,
//! visitor dispatch, structural type equality, canonical rendering.
//!
//! # Lifetimes
//!
//! Bridge objects hold registry handles, never host nodes. Every accessor
//! goes through a [`Bridge`] (a [`Session`] paired with the host's current
//! model) and fails with [`StaleReferenceError`] once the handle was disposed
//! or the host has discarded the node:
//!
//! - [`Session::dispose_all`] when the host model is invalidated
//! - `dispose()` on a single object, which is idempotent
//!
//! # Entry points
//!
//! - [`Bridge::bridge_type`]: host type node to [`BridgeType`]
//! - [`Bridge::element`]: host declaration to [`BridgeElement`]
//! - [`Bridge::annotation_value`] and [`Bridge::member_value`]: host value
//!   node to a classified [`AnnotationValue`]
//! - [`Bridge::annotation_mirror`]: host annotation to [`AnnotationMirror`]

mod annotation;
mod config;
mod element;
mod error;
mod registry;
mod session;
mod stack;
mod types;

pub use annotation::{
    AnnotationMember, AnnotationMirror, AnnotationValue, AnnotationValueVisitor, Value, ValueKind,
};
pub use config::SessionConfig;
pub use element::{BridgeElement, ElementKind, ElementVisitor};
pub use error::{BridgeError, InternalConsistencyFailure, StaleReferenceError};
pub use registry::{HandleId, Registry};
pub use session::{Bridge, Session};
pub use types::{
    ArrayType, BridgeType, DeclaredType, IntersectionType, TypeKey, TypeKind, TypeVariable,
    TypeVisitor,
};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debugging.
///
/// Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=mirror_bridge=trace`. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

// Handles are copied into every bridge object.
const _: () = assert!(std::mem::size_of::<HandleId>() == 8);
