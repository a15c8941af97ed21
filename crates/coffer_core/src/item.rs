//! Item stacks displayed in menu cells

use serde::{Deserialize, Serialize};

/// A stack of items occupying one menu cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item ID as known to the host
    pub item_id: String,
    /// Quantity (at least 1)
    pub quantity: u32,
    /// Display name shown to the player, falls back to the item ID
    pub display_name: Option<String>,
}

impl ItemStack {
    /// Create a new item stack
    pub fn new(item_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            item_id: item_id.into(),
            quantity: quantity.max(1),
            display_name: None,
        }
    }

    /// Create a single item
    pub fn single(item_id: impl Into<String>) -> Self {
        Self::new(item_id, 1)
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Set the quantity (clamped to at least 1)
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity.max(1);
        self
    }

    /// Name shown to the player
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.item_id)
    }
}
