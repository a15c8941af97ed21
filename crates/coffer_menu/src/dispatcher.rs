//! Signal routing to menu holders
//!
//! The dispatcher owns a weakly referencing registry from container
//! identity to menu holder and forwards each incoming signal to the
//! holder's hook. It is an explicitly constructed service: create one per
//! application and attach it to the host bus.
//!
//! The registry never extends a lifetime. Neither a container nor a holder
//! stays alive because it is registered; entries whose holder is gone are
//! treated as absent, and entries whose container is gone are expunged
//! opportunistically.

use coffer_host::bus::{Priority, SignalBus, SubscriberId};
use coffer_host::holder::MenuHolder;
use coffer_host::inventory::{InventoryHandle, WeakInventoryHandle};
use coffer_host::signal::MenuSignal;
use coffer_core::InventoryId;
use parking_lot::Mutex;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Weak};

struct RegistryEntry {
    inventory: WeakInventoryHandle,
    holder: Weak<dyn MenuHolder>,
}

/// Routes inventory signals to the menu holders that own them
pub struct MenuDispatcher {
    registry: Mutex<HashMap<InventoryId, RegistryEntry>>,
}

impl MenuDispatcher {
    /// Create a dispatcher with an empty registry
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(HashMap::new()),
        }
    }

    /// Associate a container with its menu holder
    ///
    /// Returns whether the association was stored. An existing entry for
    /// the container blocks registration regardless of whether its holder
    /// is still alive; the first owner wins.
    pub fn register(&self, holder: &Arc<dyn MenuHolder>, handle: &InventoryHandle) -> bool {
        let mut registry = self.registry.lock();
        // Expunge entries whose container is gone, like a weak-keyed map
        registry.retain(|_, entry| entry.inventory.is_alive());
        match registry.entry(handle.id()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(vacant) => {
                vacant.insert(RegistryEntry {
                    inventory: handle.downgrade(),
                    holder: Arc::downgrade(holder),
                });
                log::trace!("registered menu holder for {}", handle.id());
                true
            }
        }
    }

    /// The still-live holder registered for a container
    pub fn lookup(&self, handle: &InventoryHandle) -> Option<Arc<dyn MenuHolder>> {
        let registry = self.registry.lock();
        let entry = registry.get(&handle.id())?;
        if !entry.inventory.is_alive() {
            return None;
        }
        entry.holder.upgrade()
    }

    /// Whether the container is registered to exactly this holder instance
    pub fn is_registered_to(&self, holder: &Arc<dyn MenuHolder>, handle: &InventoryHandle) -> bool {
        self.lookup(handle)
            .is_some_and(|found| same_holder(&found, holder))
    }

    /// Number of registry entries, dead or alive
    pub fn len(&self) -> usize {
        self.registry.lock().len()
    }

    /// Whether the registry has no entries
    pub fn is_empty(&self) -> bool {
        self.registry.lock().is_empty()
    }

    /// Route one signal to the holder owning its top surface
    ///
    /// Click and drag signals are cancelled before forwarding, making the
    /// holder fully responsible for slot mutation. Signals without a
    /// resolvable holder, or whose owning plugin is disabled, are dropped
    /// silently.
    pub fn handle_signal(&self, signal: &MenuSignal) {
        let handle = signal.view().top();
        let holder = match self.resolve(handle) {
            Some(holder) => holder,
            None => {
                log::trace!("no holder for {}, dropping {} signal", handle.id(), signal.name());
                return;
            }
        };
        if !holder.plugin().is_enabled() {
            log::trace!(
                "plugin {} disabled, dropping {} signal",
                holder.plugin().name(),
                signal.name()
            );
            return;
        }

        match signal {
            MenuSignal::Open(open) => {
                if !open.is_cancelled() {
                    holder.on_open(open);
                }
            }
            MenuSignal::Click(click) => {
                if !click.is_cancelled() {
                    click.cancel();
                    holder.on_click(click);
                }
            }
            MenuSignal::Drag(drag) => {
                if !drag.is_cancelled() {
                    drag.cancel();
                    holder.on_drag(drag);
                }
            }
            MenuSignal::Close(close) => holder.on_close(close),
        }
    }

    /// Subscribe this dispatcher to a bus at high priority
    pub fn attach(self: &Arc<Self>, bus: &SignalBus) -> SubscriberId {
        let dispatcher = Arc::clone(self);
        bus.subscribe_with(Priority::High, true, move |signal| {
            dispatcher.handle_signal(signal)
        })
    }

    /// Resolve a holder: the container's attached owner first, then the
    /// registry.
    fn resolve(&self, handle: &InventoryHandle) -> Option<Arc<dyn MenuHolder>> {
        handle.owner().or_else(|| self.lookup(handle))
    }
}

impl Default for MenuDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity comparison on holder instances, ignoring vtables
fn same_holder(a: &Arc<dyn MenuHolder>, b: &Arc<dyn MenuHolder>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a).cast::<u8>(),
        Arc::as_ptr(b).cast::<u8>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use coffer_host::plugin::PluginHandle;
    use coffer_host::signal::{ClickAction, ClickKind, ClickSignal, OpenSignal, SlotKind};
    use coffer_host::view::View;
    use coffer_core::PlayerId;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingMenu {
        plugin: PluginHandle,
        inventory: InventoryHandle,
        opens: AtomicU32,
        clicks: AtomicU32,
    }

    impl CountingMenu {
        fn new(plugin: PluginHandle, size: usize) -> Arc<Self> {
            Arc::new(Self {
                plugin,
                inventory: InventoryHandle::new(size),
                opens: AtomicU32::new(0),
                clicks: AtomicU32::new(0),
            })
        }
    }

    impl MenuHolder for CountingMenu {
        fn plugin(&self) -> &PluginHandle {
            &self.plugin
        }

        fn inventory(&self) -> &InventoryHandle {
            &self.inventory
        }

        fn on_open(&self, _signal: &OpenSignal) {
            self.opens.fetch_add(1, Ordering::SeqCst);
        }

        fn on_click(&self, _signal: &ClickSignal) {
            self.clicks.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn test_plugin() -> PluginHandle {
        PluginHandle::new("test", Arc::new(SignalBus::new()))
    }

    fn view_of(menu: &Arc<CountingMenu>) -> View {
        View::new(
            menu.inventory.clone(),
            InventoryHandle::new(36),
            PlayerId::new(1),
        )
    }

    #[test]
    fn test_register_then_lookup() {
        let dispatcher = MenuDispatcher::new();
        let menu = CountingMenu::new(test_plugin(), 9);
        let holder: Arc<dyn MenuHolder> = menu.clone();

        assert!(dispatcher.register(&holder, &menu.inventory));
        let found = dispatcher.lookup(&menu.inventory).unwrap();
        assert!(dispatcher.is_registered_to(&holder, &menu.inventory));
        assert!(dispatcher.is_registered_to(&found, &menu.inventory));
    }

    #[test]
    fn test_first_owner_wins() {
        let dispatcher = MenuDispatcher::new();
        let plugin = test_plugin();
        let first = CountingMenu::new(plugin.clone(), 9);
        let second = CountingMenu::new(plugin, 9);
        let first_holder: Arc<dyn MenuHolder> = first.clone();
        let second_holder: Arc<dyn MenuHolder> = second.clone();

        assert!(dispatcher.register(&first_holder, &first.inventory));
        assert!(!dispatcher.register(&second_holder, &first.inventory));

        assert!(dispatcher.is_registered_to(&first_holder, &first.inventory));
        assert!(!dispatcher.is_registered_to(&second_holder, &first.inventory));
    }

    #[test]
    fn test_registry_does_not_keep_holder_alive() {
        let dispatcher = MenuDispatcher::new();
        let menu = CountingMenu::new(test_plugin(), 9);
        let inventory = menu.inventory.clone();
        let holder: Arc<dyn MenuHolder> = menu.clone();

        dispatcher.register(&holder, &inventory);
        drop(holder);
        drop(menu);

        assert!(dispatcher.lookup(&inventory).is_none());
        // The stale entry still blocks re-registration while the
        // container is alive; first owner wins.
        let other = CountingMenu::new(test_plugin(), 9);
        let other_holder: Arc<dyn MenuHolder> = other.clone();
        assert!(!dispatcher.register(&other_holder, &inventory));
    }

    #[test]
    fn test_dead_container_entries_expunged() {
        let dispatcher = MenuDispatcher::new();
        let menu = CountingMenu::new(test_plugin(), 9);
        let holder: Arc<dyn MenuHolder> = menu.clone();

        let short_lived = InventoryHandle::new(9);
        dispatcher.register(&holder, &short_lived);
        assert_eq!(dispatcher.len(), 1);
        drop(short_lived);

        // The next register sweeps the dead entry
        dispatcher.register(&holder, &menu.inventory);
        assert_eq!(dispatcher.len(), 1);
    }

    #[test]
    fn test_signal_forwarding() {
        let dispatcher = MenuDispatcher::new();
        let menu = CountingMenu::new(test_plugin(), 9);
        let holder: Arc<dyn MenuHolder> = menu.clone();
        dispatcher.register(&holder, &menu.inventory);

        dispatcher.handle_signal(&OpenSignal::new(view_of(&menu)).into());
        assert_eq!(menu.opens.load(Ordering::SeqCst), 1);

        let click = ClickSignal::new(
            view_of(&menu),
            SlotKind::Container,
            2,
            ClickKind::Left,
            ClickAction::PickupAll,
        );
        let signal: MenuSignal = click.into();
        dispatcher.handle_signal(&signal);
        assert_eq!(menu.clicks.load(Ordering::SeqCst), 1);
        // Default behavior suppressed before forwarding
        assert!(signal.is_cancelled());
    }

    #[test]
    fn test_disabled_plugin_drops_signals() {
        let dispatcher = MenuDispatcher::new();
        let menu = CountingMenu::new(test_plugin(), 9);
        let holder: Arc<dyn MenuHolder> = menu.clone();
        dispatcher.register(&holder, &menu.inventory);

        menu.plugin.disable();
        dispatcher.handle_signal(&OpenSignal::new(view_of(&menu)).into());
        assert_eq!(menu.opens.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unregistered_signal_dropped() {
        let dispatcher = MenuDispatcher::new();
        let menu = CountingMenu::new(test_plugin(), 9);

        dispatcher.handle_signal(&OpenSignal::new(view_of(&menu)).into());
        assert_eq!(menu.opens.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_attached_owner_beats_registry() {
        let dispatcher = MenuDispatcher::new();
        let plugin = test_plugin();
        let attached = CountingMenu::new(plugin.clone(), 9);
        let registered = CountingMenu::new(plugin, 9);

        // The container carries its own owner; a conflicting registry
        // entry is ignored.
        let inventory = attached.inventory.clone();
        let weak: Weak<CountingMenu> = Arc::downgrade(&attached);
        inventory.attach_owner(weak);
        let registered_holder: Arc<dyn MenuHolder> = registered.clone();
        dispatcher.register(&registered_holder, &inventory);

        let view = View::new(inventory, InventoryHandle::new(36), PlayerId::new(1));
        dispatcher.handle_signal(&OpenSignal::new(view).into());
        assert_eq!(attached.opens.load(Ordering::SeqCst), 1);
        assert_eq!(registered.opens.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_attach_to_bus() {
        let bus = Arc::new(SignalBus::new());
        let dispatcher = Arc::new(MenuDispatcher::new());
        dispatcher.attach(&bus);

        let menu = CountingMenu::new(test_plugin(), 9);
        let holder: Arc<dyn MenuHolder> = menu.clone();
        dispatcher.register(&holder, &menu.inventory);

        bus.call(&OpenSignal::new(view_of(&menu)).into());
        assert_eq!(menu.opens.load(Ordering::SeqCst), 1);

        // Already-cancelled signals never reach the dispatcher
        let open = OpenSignal::new(view_of(&menu));
        open.cancel();
        bus.call(&open.into());
        assert_eq!(menu.opens.load(Ordering::SeqCst), 1);
    }
}
