//! Plugin handles and liveness
//!
//! Every menu holder is owned by a plugin. The dispatcher drops signals for
//! holders whose plugin is no longer enabled, and holders emit proxy
//! signals through their plugin's bus.

use crate::bus::SignalBus;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Unique identifier for a plugin
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct PluginId {
    name: Box<str>,
}

impl PluginId {
    /// Create a new plugin ID
    pub fn new(name: &str) -> Self {
        Self { name: name.into() }
    }

    /// Get the plugin name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<&str> for PluginId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The current state of a plugin
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PluginStatus {
    /// Plugin is registered but not enabled
    Registered,
    /// Plugin is enabled and receiving signals
    Active,
    /// Plugin has been disabled
    Disabled,
    /// Plugin failed to enable
    Failed,
}

struct PluginShared {
    id: PluginId,
    status: Mutex<PluginStatus>,
    server: Arc<SignalBus>,
}

/// Cheaply cloneable handle to the plugin that owns a set of menus
#[derive(Clone)]
pub struct PluginHandle {
    shared: Arc<PluginShared>,
}

impl PluginHandle {
    /// Create a handle for an enabled plugin attached to the given bus
    pub fn new(name: &str, server: Arc<SignalBus>) -> Self {
        Self {
            shared: Arc::new(PluginShared {
                id: PluginId::new(name),
                status: Mutex::new(PluginStatus::Active),
                server,
            }),
        }
    }

    /// The plugin's identity
    pub fn id(&self) -> &PluginId {
        &self.shared.id
    }

    /// The plugin's name
    pub fn name(&self) -> &str {
        self.shared.id.name()
    }

    /// Current status
    pub fn status(&self) -> PluginStatus {
        *self.shared.status.lock()
    }

    /// Set the status
    pub fn set_status(&self, status: PluginStatus) {
        *self.shared.status.lock() = status;
    }

    /// Mark the plugin enabled
    pub fn enable(&self) {
        self.set_status(PluginStatus::Active);
    }

    /// Mark the plugin disabled; the dispatcher stops forwarding to it
    pub fn disable(&self) {
        self.set_status(PluginStatus::Disabled);
    }

    /// Whether signals should still be forwarded to this plugin's holders
    pub fn is_enabled(&self) -> bool {
        self.status() == PluginStatus::Active
    }

    /// The host pipeline this plugin emits signals through
    pub fn server(&self) -> &Arc<SignalBus> {
        &self.shared.server
    }
}

impl fmt::Debug for PluginHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginHandle")
            .field("id", &self.shared.id)
            .field("status", &self.status())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liveness() {
        let plugin = PluginHandle::new("menus", Arc::new(SignalBus::new()));
        assert!(plugin.is_enabled());
        assert_eq!(plugin.status(), PluginStatus::Active);

        plugin.disable();
        assert!(!plugin.is_enabled());

        plugin.enable();
        assert!(plugin.is_enabled());
    }

    #[test]
    fn test_clones_share_status() {
        let plugin = PluginHandle::new("menus", Arc::new(SignalBus::new()));
        let clone = plugin.clone();

        plugin.disable();
        assert!(!clone.is_enabled());
    }
}
