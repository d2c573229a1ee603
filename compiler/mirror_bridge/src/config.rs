//! Session configuration.

/// Configuration for an analysis [`Session`](crate::Session).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Initial capacity of the disposal registry.
    pub registry_capacity: usize,
    /// Ask the host whether a node is still valid on every dereference.
    ///
    /// With this off, only explicit disposal makes a handle stale; use it
    /// when the caller tears the session down on every host reparse.
    pub check_host_validity: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            registry_capacity: 256,
            check_host_validity: true,
        }
    }
}

impl SessionConfig {
    /// Set the initial registry capacity.
    #[must_use]
    pub fn with_registry_capacity(mut self, capacity: usize) -> Self {
        self.registry_capacity = capacity;
        self
    }

    /// Enable or disable host validity checks.
    #[must_use]
    pub fn with_host_validity_checks(mut self, enabled: bool) -> Self {
        self.check_host_validity = enabled;
        self
    }
}
