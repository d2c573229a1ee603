//! Host symbol model for the mirror bridge.
//!
//! The bridge never parses or analyzes source itself. It consumes a host
//! compiler's symbol/syntax model through the small query surface defined
//! here:
//!
//! - [`NodeId`]: opaque handle to a host node (type, symbol, or value)
//! - [`HostModel`]: shape discrimination, structural queries, and rendering
//! - [`Constant`]: runtime-typed values the host reports for literals and
//!   folded expressions
//!
//! [`MemoryHost`] is an arena-backed implementation of [`HostModel`]. It is
//! what the bridge's own tests run against, and it supports invalidation so
//! the reparse/discard lifecycle of a real host can be reproduced.

mod constant;
mod memory;
mod model;
mod node_id;
mod shape;

pub use constant::{Constant, ConstantKind};
pub use memory::MemoryHost;
pub use model::{Attribute, HostModel};
pub use node_id::NodeId;
pub use shape::{PrimitiveKind, SymbolKind, TypeShape, ValueShape};
