//! Coffer Menu - Inventory-Backed Menus
//!
//! This crate builds graphical menus out of host slot containers.
//!
//! # Features
//!
//! - A dispatcher routing open/click/drag/close signals to registered
//!   menu holders through a weakly referencing registry
//! - A button toolkit (inert, action, toggle and redirect buttons)
//! - `ButtonMenu`, a holder with a slot-to-button map
//! - `PageMenu`, a composite menu splitting one logical surface across
//!   linked pages with a trailing navigation row
//!
//! # Example
//!
//! ```ignore
//! use coffer_menu::prelude::*;
//!
//! let bus = Arc::new(SignalBus::new());
//! let plugin = PluginHandle::new("shop", bus.clone());
//!
//! let dispatcher = Arc::new(MenuDispatcher::new());
//! dispatcher.attach(&bus);
//!
//! let pages = (0..3).map(|_| -> Arc<dyn MenuHolder> {
//!     ButtonMenu::new(plugin.clone(), 18)
//! });
//! let shop = PageMenu::chain(plugin, pages)?;
//! ```

pub mod button;
pub mod dispatcher;
pub mod error;
pub mod menu;
pub mod page;

pub mod prelude {
    pub use crate::button::{
        ActionButton, ButtonMap, ItemButton, MenuButton, RedirectButton, ToggleButton,
    };
    pub use crate::dispatcher::MenuDispatcher;
    pub use crate::error::MenuError;
    pub use crate::menu::ButtonMenu;
    pub use crate::page::{PageMenu, PageMenuBuilder, PageStyle, PageSupplier};
    pub use coffer_host::prelude::*;
}

pub use prelude::*;
