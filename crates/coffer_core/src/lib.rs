//! Coffer Core - Shared Primitives
//!
//! This crate provides the primitives the menu toolkit is built from.
//!
//! # Features
//!
//! - Process-unique identifiers for host-owned resources
//! - Item stacks used as menu cell contents and button icons
//! - Memoized lazy cells for deferred, compute-once linkage
//!
//! # Example
//!
//! ```ignore
//! use coffer_core::prelude::*;
//!
//! let icon = ItemStack::single("magenta_glazed_terracotta").with_name("Next");
//!
//! let page = Memo::new(|| expensive_page_construction());
//! let first = page.get();
//! let second = page.get(); // cached, same value
//! ```

pub mod id;
pub mod item;
pub mod memo;

pub mod prelude {
    pub use crate::id::{InventoryId, PlayerId};
    pub use crate::item::ItemStack;
    pub use crate::memo::Memo;
}

pub use prelude::*;
