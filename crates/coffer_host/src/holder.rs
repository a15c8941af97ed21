//! The menu-holder seam
//!
//! A holder backs a host slot container with menu behavior. The dispatcher
//! resolves the holder for each incoming signal and invokes the matching
//! hook; all hooks default to no-ops.

use crate::inventory::InventoryHandle;
use crate::plugin::PluginHandle;
use crate::signal::{ClickSignal, CloseSignal, DragSignal, OpenSignal};

/// Backs a slot container with menu behavior
pub trait MenuHolder: Send + Sync {
    /// The plugin that owns this menu
    fn plugin(&self) -> &PluginHandle;

    /// The slot container displayed by this menu
    fn inventory(&self) -> &InventoryHandle;

    /// Called when the menu is opened
    fn on_open(&self, _signal: &OpenSignal) {}

    /// Called when a slot is clicked; the signal is already cancelled
    fn on_click(&self, _signal: &ClickSignal) {}

    /// Called when stacks are dragged; the signal is already cancelled
    fn on_drag(&self, _signal: &DragSignal) {}

    /// Called when the menu is closed
    fn on_close(&self, _signal: &CloseSignal) {}
}
