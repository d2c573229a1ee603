//! Analysis sessions and the bridge context.
//!
//! A [`Session`] lives for one analysis session and owns the disposal
//! registry. A [`Bridge`] is a short borrow that pairs the session with the
//! host's *current* model; every construction and accessor call goes
//! through one. Bridge objects themselves hold only handles, so they outlive
//! any particular `Bridge` and can be queried again after the host has
//! changed, at which point they fail with a [`StaleReferenceError`].
//!
//! ```text
//! let mut session = Session::new();
//! let ty = session.bridge(&host).bridge_type(node, false)?;
//! host.reparse();
//! ty.as_array().map(|a| a.component_type(&mut session.bridge(&host)));  // Err(Stale)
//! ```

use mirror_host::{HostModel, NodeId};

use crate::{HandleId, Registry, SessionConfig, StaleReferenceError};

/// One analysis session: a registry of live handles plus configuration.
#[derive(Debug)]
pub struct Session {
    registry: Registry,
    config: SessionConfig,
}

impl Session {
    /// Create a session with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Create a session with the given configuration.
    pub fn with_config(config: SessionConfig) -> Self {
        Session {
            registry: Registry::with_capacity(config.registry_capacity),
            config,
        }
    }

    /// Pair this session with the host's current model.
    pub fn bridge<'a>(&'a mut self, host: &'a dyn HostModel) -> Bridge<'a> {
        Bridge {
            host,
            session: self,
        }
    }

    /// The disposal registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Dispose every handle created in this session.
    ///
    /// Call this when the host model is invalidated.
    pub fn dispose_all(&mut self) -> usize {
        self.registry.dispose_all()
    }

    /// End the session, disposing every live handle.
    pub fn finish(mut self) -> usize {
        let disposed = self.dispose_all();
        tracing::debug!(disposed, "analysis session finished");
        disposed
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// A session bound to a host model.
pub struct Bridge<'a> {
    host: &'a dyn HostModel,
    session: &'a mut Session,
}

impl<'a> Bridge<'a> {
    /// The host model.
    pub fn host(&self) -> &'a dyn HostModel {
        self.host
    }

    /// The disposal registry.
    pub fn registry(&self) -> &Registry {
        &self.session.registry
    }

    /// Get the host node behind a handle.
    ///
    /// Fails if the handle was disposed or, when validity checks are on, if
    /// the host has discarded the node.
    pub fn node(&self, handle: HandleId) -> Result<NodeId, StaleReferenceError> {
        let node = self.session.registry.resolve(handle)?;
        self.check_node(node)?;
        Ok(node)
    }

    /// Check that a host node handed to the bridge is still valid.
    pub(crate) fn check_node(&self, node: NodeId) -> Result<(), StaleReferenceError> {
        if self.session.config.check_host_validity && !self.host.is_valid(node) {
            return Err(StaleReferenceError::HostInvalidated { node });
        }
        Ok(())
    }

    /// Register a host node. Only call this with a fully built object.
    pub(crate) fn register(&mut self, node: NodeId) -> HandleId {
        self.session.registry.register(node)
    }

    /// Dispose a single handle. Idempotent.
    pub fn dispose(&mut self, handle: HandleId) -> bool {
        self.session.registry.dispose(handle)
    }

    /// Dispose every handle in the session.
    pub fn dispose_all(&mut self) -> usize {
        self.session.dispose_all()
    }
}
