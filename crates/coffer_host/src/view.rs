//! Inventory views
//!
//! A view is the pair of surfaces a player is looking at: the opened
//! container on top and the player's own inventory below. Views are
//! immutable value records; proxy signals are built by substituting the
//! top surface of an existing view.

use crate::inventory::InventoryHandle;
use coffer_core::PlayerId;

/// The surfaces a player is looking at
#[derive(Debug, Clone)]
pub struct View {
    top: InventoryHandle,
    bottom: InventoryHandle,
    player: PlayerId,
}

impl View {
    /// Create a view
    pub fn new(top: InventoryHandle, bottom: InventoryHandle, player: PlayerId) -> Self {
        Self {
            top,
            bottom,
            player,
        }
    }

    /// The opened container
    #[inline]
    pub fn top(&self) -> &InventoryHandle {
        &self.top
    }

    /// The player's own inventory
    #[inline]
    pub fn bottom(&self) -> &InventoryHandle {
        &self.bottom
    }

    /// The player looking at this view
    #[inline]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// A copy of this view with a different top surface
    pub fn with_top(&self, top: InventoryHandle) -> View {
        View {
            top,
            bottom: self.bottom.clone(),
            player: self.player,
        }
    }

    /// Whether a raw slot index falls inside the top surface
    #[inline]
    pub fn is_top_slot(&self, raw_slot: usize) -> bool {
        raw_slot < self.top.size()
    }

    /// Whether a raw slot index falls inside the bottom surface
    #[inline]
    pub fn is_bottom_slot(&self, raw_slot: usize) -> bool {
        raw_slot >= self.top.size() && raw_slot < self.top.size() + self.bottom.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_top() {
        let top = InventoryHandle::new(27);
        let bottom = InventoryHandle::new(36);
        let view = View::new(top.clone(), bottom.clone(), PlayerId::new(1));

        let other = InventoryHandle::new(9);
        let proxy = view.with_top(other.clone());

        assert_eq!(proxy.top(), &other);
        assert_eq!(proxy.bottom(), &bottom);
        assert_eq!(proxy.player(), view.player());
        // the source view is unchanged
        assert_eq!(view.top(), &top);
    }

    #[test]
    fn test_slot_ranges() {
        let view = View::new(
            InventoryHandle::new(27),
            InventoryHandle::new(36),
            PlayerId::new(1),
        );
        assert!(view.is_top_slot(0));
        assert!(view.is_top_slot(26));
        assert!(!view.is_top_slot(27));
        assert!(view.is_bottom_slot(27));
        assert!(view.is_bottom_slot(62));
        assert!(!view.is_bottom_slot(63));
    }
}
