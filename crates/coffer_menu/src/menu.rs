//! Button menus
//!
//! `ButtonMenu` is the ordinary menu holder: it owns its container and a
//! slot-to-button map, and dispatches top-surface clicks to the bound
//! button. Pages of a paged menu are usually button menus.

use crate::button::{ButtonMap, MenuButton};
use coffer_host::holder::MenuHolder;
use coffer_host::inventory::InventoryHandle;
use coffer_host::plugin::PluginHandle;
use coffer_host::signal::{ClickSignal, SlotKind};
use std::sync::{Arc, Weak};

/// A menu holder with clickable buttons
pub struct ButtonMenu {
    plugin: PluginHandle,
    inventory: InventoryHandle,
    buttons: ButtonMap,
}

impl ButtonMenu {
    /// Create a menu with the given number of slots
    pub fn new(plugin: PluginHandle, size: usize) -> Arc<Self> {
        Self::from_inventory(plugin, InventoryHandle::new(size))
    }

    /// Create a titled menu
    pub fn with_title(plugin: PluginHandle, size: usize, title: impl Into<String>) -> Arc<Self> {
        Self::from_inventory(plugin, InventoryHandle::with_title(size, title))
    }

    fn from_inventory(plugin: PluginHandle, inventory: InventoryHandle) -> Arc<Self> {
        Arc::new_cyclic(|weak: &Weak<Self>| {
            inventory.attach_owner(weak.clone());
            Self {
                plugin,
                inventory,
                buttons: ButtonMap::new(),
            }
        })
    }

    /// Bind a button to a slot, placing its icon
    pub fn set_button(&self, slot: usize, button: Arc<dyn MenuButton>) {
        self.buttons.bind(&self.inventory, slot, button);
    }

    /// Remove the button bound to a slot, clearing its icon
    pub fn unset_button(&self, slot: usize) -> Option<Arc<dyn MenuButton>> {
        self.buttons.unbind(&self.inventory, slot)
    }

    /// The button bound to a slot
    pub fn button(&self, slot: usize) -> Option<Arc<dyn MenuButton>> {
        self.buttons.button(slot)
    }
}

impl MenuHolder for ButtonMenu {
    fn plugin(&self) -> &PluginHandle {
        &self.plugin
    }

    fn inventory(&self) -> &InventoryHandle {
        &self.inventory
    }

    fn on_click(&self, signal: &ClickSignal) {
        if signal.slot_kind() == SlotKind::Outside {
            return;
        }
        let slot = signal.raw_slot();
        if slot < self.inventory.size() {
            if let Some(button) = self.buttons.button(slot) {
                button.on_click(self, signal);
            }
        }
    }
}
