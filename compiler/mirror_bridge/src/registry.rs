//! Disposal registry.
//!
//! Every bridge object holds one or more [`HandleId`]s instead of host nodes.
//! A handle is a generation-tagged slot index: disposing a handle empties its
//! slot and bumps the slot's generation, so every later lookup through the old
//! handle fails with [`StaleReferenceError::Disposed`], even after the slot is
//! reused for a new registration.
//!
//! # Layout
//!
//! - `slots`: one entry per slot ever allocated
//! - `free`: indices of empty slots available for reuse
//!
//! A slot whose generation reaches `u32::MAX` is retired instead of reused,
//! so generations never wrap.

use std::fmt;

use mirror_host::NodeId;

use crate::StaleReferenceError;

/// Handle to a registered host node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct HandleId {
    index: u32,
    generation: u32,
}

impl HandleId {
    /// Slot index of this handle.
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Generation the slot had when this handle was issued.
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HandleId({}v{})", self.index, self.generation)
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    /// `None` once disposed.
    node: Option<NodeId>,
}

/// Table of live bridge handles for one analysis session.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with room for `capacity` handles.
    pub fn with_capacity(capacity: usize) -> Self {
        Registry {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Register a host node and return its handle.
    ///
    /// The caller builds the bridge object completely before registering it,
    /// so a handle is never observable for a half-built object.
    pub fn register(&mut self, node: NodeId) -> HandleId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return HandleId {
                index,
                generation: slot.generation,
            };
        }

        #[expect(
            clippy::cast_possible_truncation,
            reason = "a session never registers u32::MAX handles"
        )]
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        HandleId {
            index,
            generation: 0,
        }
    }

    /// Get the host node behind a live handle.
    pub fn resolve(&self, handle: HandleId) -> Result<NodeId, StaleReferenceError> {
        match self.slots.get(handle.index as usize) {
            Some(Slot {
                generation,
                node: Some(node),
            }) if *generation == handle.generation => Ok(*node),
            _ => Err(StaleReferenceError::Disposed { handle }),
        }
    }

    /// Check if a handle is still live.
    pub fn is_live(&self, handle: HandleId) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Number of live handles.
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Dispose a handle.
    ///
    /// Returns `true` if this call disposed it, `false` if it was already
    /// disposed. Disposing twice is not an error.
    pub fn dispose(&mut self, handle: HandleId) -> bool {
        let Some(slot) = self.slots.get_mut(handle.index as usize) else {
            return false;
        };
        if slot.generation != handle.generation || slot.node.is_none() {
            return false;
        }
        slot.node = None;
        Self::retire_or_recycle(slot, handle.index, &mut self.free);
        self.live -= 1;
        true
    }

    /// Dispose every live handle.
    ///
    /// Slots are kept (with bumped generations) rather than dropped, so
    /// handles issued before the teardown stay stale afterwards.
    pub fn dispose_all(&mut self) -> usize {
        let mut disposed = 0;
        for (index, slot) in (0u32..).zip(self.slots.iter_mut()) {
            if slot.node.take().is_some() {
                Self::retire_or_recycle(slot, index, &mut self.free);
                disposed += 1;
            }
        }
        self.live = 0;
        tracing::debug!(disposed, "registry disposed all handles");
        disposed
    }

    fn retire_or_recycle(slot: &mut Slot, index: u32, free: &mut Vec<u32>) {
        if let Some(next) = slot.generation.checked_add(1) {
            slot.generation = next;
            if next != u32::MAX {
                free.push(index);
            }
        }
    }
}
