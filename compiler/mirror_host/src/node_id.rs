//! Host node identifiers.

use std::fmt;

/// Index of a node in the host model.
///
/// The host decides what a node is (a type, a declaration, an expression).
/// The bridge only ever holds these through a registry handle, so a stale
/// `NodeId` is never dereferenced without a liveness check.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Create a `NodeId` from a raw index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// Index into the host's node storage.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

const _: () = assert!(std::mem::size_of::<NodeId>() == 4);
