//! Menu buttons
//!
//! A button is an inert visual item plus an action invoked when its slot
//! is clicked. Buttons are shared as `Arc<dyn MenuButton>` so one instance
//! can appear in several menus.

use coffer_core::ItemStack;
use coffer_host::holder::MenuHolder;
use coffer_host::inventory::InventoryHandle;
use coffer_host::signal::{ClickSignal, OpenSignal};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A clickable cell of a menu
pub trait MenuButton: Send + Sync {
    /// Icon placed into the button's slot
    fn icon(&self) -> Option<ItemStack> {
        None
    }

    /// Invoked when the button's slot is clicked
    fn on_click(&self, _menu: &dyn MenuHolder, _signal: &ClickSignal) {}
}

/// An inert icon without behavior
pub struct ItemButton {
    icon: ItemStack,
}

impl ItemButton {
    /// Create an inert button
    pub fn new(icon: ItemStack) -> Self {
        Self { icon }
    }
}

impl MenuButton for ItemButton {
    fn icon(&self) -> Option<ItemStack> {
        Some(self.icon.clone())
    }
}

/// An icon with a zero-argument action
pub struct ActionButton {
    icon: ItemStack,
    action: Box<dyn Fn() + Send + Sync>,
}

impl ActionButton {
    /// Create a button running `action` on every click
    pub fn new(icon: ItemStack, action: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            icon,
            action: Box::new(action),
        }
    }
}

impl MenuButton for ActionButton {
    fn icon(&self) -> Option<ItemStack> {
        Some(self.icon.clone())
    }

    fn on_click(&self, _menu: &dyn MenuHolder, _signal: &ClickSignal) {
        (self.action)();
    }
}

/// A two-state button flipping between icons
pub struct ToggleButton {
    enabled_icon: ItemStack,
    disabled_icon: ItemStack,
    enabled: AtomicBool,
    on_toggle: Option<Box<dyn Fn(bool) + Send + Sync>>,
}

impl ToggleButton {
    /// Create a toggle, initially disabled
    pub fn new(enabled_icon: ItemStack, disabled_icon: ItemStack) -> Self {
        Self {
            enabled_icon,
            disabled_icon,
            enabled: AtomicBool::new(false),
            on_toggle: None,
        }
    }

    /// Run a callback with the new state after every flip
    pub fn with_callback(mut self, callback: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.on_toggle = Some(Box::new(callback));
        self
    }

    /// Start in the enabled state
    pub fn enabled(self) -> Self {
        self.enabled.store(true, Ordering::Release);
        self
    }

    /// Current state
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

impl MenuButton for ToggleButton {
    fn icon(&self) -> Option<ItemStack> {
        let icon = if self.is_enabled() {
            &self.enabled_icon
        } else {
            &self.disabled_icon
        };
        Some(icon.clone())
    }

    fn on_click(&self, menu: &dyn MenuHolder, signal: &ClickSignal) {
        let now_enabled = !self.enabled.fetch_xor(true, Ordering::AcqRel);
        // Refresh the icon in place
        menu.inventory().set_item(signal.raw_slot(), self.icon());
        if let Some(callback) = &self.on_toggle {
            callback(now_enabled);
        }
    }
}

/// A button that switches the player's view to another container
///
/// Clicking re-tops the click's view onto the target container and emits a
/// fresh open signal on the owning plugin's bus; the dispatcher then routes
/// it to the target's holder. An absent target is a silent no-op.
pub struct RedirectButton {
    icon: ItemStack,
    target: Box<dyn Fn() -> Option<InventoryHandle> + Send + Sync>,
}

impl RedirectButton {
    /// Create a redirect to whatever container `target` supplies
    pub fn new(
        icon: ItemStack,
        target: impl Fn() -> Option<InventoryHandle> + Send + Sync + 'static,
    ) -> Self {
        Self {
            icon,
            target: Box::new(target),
        }
    }
}

impl MenuButton for RedirectButton {
    fn icon(&self) -> Option<ItemStack> {
        Some(self.icon.clone())
    }

    fn on_click(&self, menu: &dyn MenuHolder, signal: &ClickSignal) {
        let Some(target) = (self.target)() else {
            return;
        };
        let view = signal.view().with_top(target);
        menu.plugin().server().call(&OpenSignal::new(view).into());
    }
}

/// Slot-to-button bindings shared by the concrete holders
pub struct ButtonMap {
    buttons: Mutex<BTreeMap<usize, Arc<dyn MenuButton>>>,
}

impl ButtonMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            buttons: Mutex::new(BTreeMap::new()),
        }
    }

    /// Bind a button to a slot, writing its icon into the container
    pub fn bind(&self, inventory: &InventoryHandle, slot: usize, button: Arc<dyn MenuButton>) {
        inventory.set_item(slot, button.icon());
        self.buttons.lock().insert(slot, button);
    }

    /// Remove the binding for a slot, clearing the container cell
    pub fn unbind(&self, inventory: &InventoryHandle, slot: usize) -> Option<Arc<dyn MenuButton>> {
        let removed = self.buttons.lock().remove(&slot);
        if removed.is_some() {
            inventory.set_item(slot, None);
        }
        removed
    }

    /// The button bound at a slot
    pub fn button(&self, slot: usize) -> Option<Arc<dyn MenuButton>> {
        self.buttons.lock().get(&slot).cloned()
    }

    /// Number of bound slots
    pub fn len(&self) -> usize {
        self.buttons.lock().len()
    }

    /// Whether no slot is bound
    pub fn is_empty(&self) -> bool {
        self.buttons.lock().is_empty()
    }
}

impl Default for ButtonMap {
    fn default() -> Self {
        Self::new()
    }
}
