//! Coffer Host - Inventory and Signal Surface
//!
//! This crate models the host server surface the menu toolkit plugs into.
//!
//! # Features
//!
//! - Strong/weak handles over host slot containers
//! - Immutable views pairing a top and bottom surface with a player
//! - Open/click/drag/close signals with cancellation
//! - A synchronous signal bus with priority-ordered delivery
//! - Plugin handles carrying liveness and the plugin's bus
//! - The `MenuHolder` seam that backs a container with menu behavior
//!
//! # Example
//!
//! ```ignore
//! use coffer_host::prelude::*;
//!
//! let bus = Arc::new(SignalBus::new());
//! let plugin = PluginHandle::new("my_plugin", bus.clone());
//!
//! let chest = InventoryHandle::with_title(27, "Loot");
//! let view = View::new(chest.clone(), player_inventory, PlayerId::new(1));
//! bus.call(&OpenSignal::new(view).into());
//! ```

pub mod bus;
pub mod holder;
pub mod inventory;
pub mod plugin;
pub mod signal;
pub mod view;

pub mod prelude {
    pub use crate::bus::{Priority, SignalBus, SubscriberId};
    pub use crate::holder::MenuHolder;
    pub use crate::inventory::{InventoryHandle, WeakInventoryHandle};
    pub use crate::plugin::{PluginHandle, PluginId, PluginStatus};
    pub use crate::signal::{
        ClickAction, ClickKind, ClickSignal, CloseSignal, DragSignal, MenuSignal, OpenSignal,
        SlotKind,
    };
    pub use crate::view::View;
    pub use coffer_core::prelude::*;
}

pub use prelude::*;
