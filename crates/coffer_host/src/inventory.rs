//! Slot-container handles
//!
//! The host owns every slot container; this library only holds handles to
//! them. A strong handle keeps the container's storage alive, a weak handle
//! does not. Identity is the container's process-unique [`InventoryId`],
//! never its contents.

use crate::holder::MenuHolder;
use coffer_core::{InventoryId, ItemStack};
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};

struct InventoryData {
    id: InventoryId,
    size: usize,
    title: Option<String>,
    slots: Mutex<Vec<Option<ItemStack>>>,
    /// Owner attached by the holder that created this container, consulted
    /// by the dispatcher before its own registry.
    owner: Mutex<Option<Weak<dyn MenuHolder>>>,
}

/// Strong handle to a host slot container
#[derive(Clone)]
pub struct InventoryHandle {
    data: Arc<InventoryData>,
}

impl InventoryHandle {
    /// Create a container with the given number of slots
    pub fn new(size: usize) -> Self {
        Self {
            data: Arc::new(InventoryData {
                id: InventoryId::next(),
                size,
                title: None,
                slots: Mutex::new(vec![None; size]),
                owner: Mutex::new(None),
            }),
        }
    }

    /// Create a container with a title shown to the player
    pub fn with_title(size: usize, title: impl Into<String>) -> Self {
        Self {
            data: Arc::new(InventoryData {
                id: InventoryId::next(),
                size,
                title: Some(title.into()),
                slots: Mutex::new(vec![None; size]),
                owner: Mutex::new(None),
            }),
        }
    }

    /// The container's identity
    #[inline]
    pub fn id(&self) -> InventoryId {
        self.data.id
    }

    /// Number of slots
    #[inline]
    pub fn size(&self) -> usize {
        self.data.size
    }

    /// Title, if any
    pub fn title(&self) -> Option<&str> {
        self.data.title.as_deref()
    }

    /// Get the stack in a slot (out-of-range slots are empty)
    pub fn item(&self, slot: usize) -> Option<ItemStack> {
        self.data.slots.lock().get(slot)?.clone()
    }

    /// Put a stack into a slot; out-of-range slots are ignored
    pub fn set_item(&self, slot: usize, item: Option<ItemStack>) {
        let mut slots = self.data.slots.lock();
        if let Some(cell) = slots.get_mut(slot) {
            *cell = item;
        }
    }

    /// Clear every slot
    pub fn clear(&self) {
        let mut slots = self.data.slots.lock();
        for cell in slots.iter_mut() {
            *cell = None;
        }
    }

    /// Snapshot of all slot contents
    pub fn contents(&self) -> Vec<Option<ItemStack>> {
        self.data.slots.lock().clone()
    }

    /// Attach the holder that backs this container
    pub fn attach_owner(&self, owner: Weak<dyn MenuHolder>) {
        *self.data.owner.lock() = Some(owner);
    }

    /// The still-live holder backing this container, if one is attached
    pub fn owner(&self) -> Option<Arc<dyn MenuHolder>> {
        self.data.owner.lock().as_ref()?.upgrade()
    }

    /// Create a weak handle
    pub fn downgrade(&self) -> WeakInventoryHandle {
        WeakInventoryHandle {
            data: Arc::downgrade(&self.data),
        }
    }
}

impl PartialEq for InventoryHandle {
    fn eq(&self, other: &Self) -> bool {
        self.data.id == other.data.id
    }
}

impl Eq for InventoryHandle {}

impl std::hash::Hash for InventoryHandle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.data.id.hash(state);
    }
}

impl fmt::Debug for InventoryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InventoryHandle")
            .field("id", &self.data.id)
            .field("size", &self.data.size)
            .field("title", &self.data.title)
            .finish()
    }
}

/// Weak handle to a host slot container
///
/// Does not keep the container alive. Can be upgraded to a strong handle.
#[derive(Clone, Default)]
pub struct WeakInventoryHandle {
    data: Weak<InventoryData>,
}

impl WeakInventoryHandle {
    /// Try to upgrade to a strong handle
    pub fn upgrade(&self) -> Option<InventoryHandle> {
        self.data.upgrade().map(|data| InventoryHandle { data })
    }

    /// Check if the container is still alive
    pub fn is_alive(&self) -> bool {
        self.data.strong_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_access() {
        let inventory = InventoryHandle::with_title(9, "Chest");
        assert_eq!(inventory.size(), 9);
        assert_eq!(inventory.title(), Some("Chest"));
        assert_eq!(inventory.item(4), None);

        inventory.set_item(4, Some(ItemStack::single("sword")));
        assert_eq!(inventory.item(4).unwrap().item_id, "sword");

        // Out of range is ignored
        inventory.set_item(99, Some(ItemStack::single("sword")));
        assert_eq!(inventory.item(99), None);

        inventory.clear();
        assert_eq!(inventory.item(4), None);
    }

    #[test]
    fn test_identity() {
        let a = InventoryHandle::new(9);
        let b = InventoryHandle::new(9);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_weak_handle() {
        let inventory = InventoryHandle::new(9);
        let weak = inventory.downgrade();

        assert!(weak.is_alive());
        assert!(weak.upgrade().is_some());

        drop(inventory);
        assert!(!weak.is_alive());
        assert!(weak.upgrade().is_none());
    }
}
