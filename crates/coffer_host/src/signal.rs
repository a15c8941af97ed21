//! Inventory signals
//!
//! The host delivers four signal kinds: open, click, drag and close. Click
//! and drag (and open) carry a cancellation flag; cancelling suppresses the
//! host's default slot mutation, leaving the receiving holder fully
//! responsible for state changes.

use crate::inventory::InventoryHandle;
use crate::view::View;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// Classification of the slot a click landed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    /// A plain container slot
    Container,
    /// A hotbar slot of the player's inventory
    Quickbar,
    /// An armor slot of the player's inventory
    Armor,
    /// A crafting grid slot
    CraftingGrid,
    /// A crafting result slot
    Result,
    /// A fuel slot
    Fuel,
    /// Outside any surface
    Outside,
}

/// The physical input that produced a click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClickKind {
    Left,
    ShiftLeft,
    Right,
    ShiftRight,
    Middle,
    Double,
    Drop,
    ControlDrop,
    NumberKey,
}

/// What the host intends to do with the clicked stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClickAction {
    Nothing,
    PickupAll,
    PickupHalf,
    PlaceAll,
    PlaceOne,
    SwapWithCursor,
    HotbarSwap,
    MoveToOther,
    Collect,
    DropOne,
    DropAll,
}

/// A menu is being opened
#[derive(Debug)]
pub struct OpenSignal {
    view: View,
    cancelled: AtomicBool,
}

impl OpenSignal {
    /// Create an open signal
    pub fn new(view: View) -> Self {
        Self {
            view,
            cancelled: AtomicBool::new(false),
        }
    }

    /// The view being opened
    #[inline]
    pub fn view(&self) -> &View {
        &self.view
    }

    /// The affected container (the view's top surface)
    #[inline]
    pub fn handle(&self) -> &InventoryHandle {
        self.view.top()
    }

    /// Suppress the open
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether the signal has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// A slot was clicked
#[derive(Debug)]
pub struct ClickSignal {
    view: View,
    slot_kind: SlotKind,
    raw_slot: usize,
    click_kind: ClickKind,
    action: ClickAction,
    hotbar_button: Option<u8>,
    cancelled: AtomicBool,
}

impl ClickSignal {
    /// Create a click signal
    pub fn new(
        view: View,
        slot_kind: SlotKind,
        raw_slot: usize,
        click_kind: ClickKind,
        action: ClickAction,
    ) -> Self {
        Self {
            view,
            slot_kind,
            raw_slot,
            click_kind,
            action,
            hotbar_button: None,
            cancelled: AtomicBool::new(false),
        }
    }

    /// Set the hotbar key involved in a number-key click
    pub fn with_hotbar_button(mut self, button: u8) -> Self {
        self.hotbar_button = Some(button);
        self
    }

    /// The view the click happened in
    #[inline]
    pub fn view(&self) -> &View {
        &self.view
    }

    /// The affected container (the view's top surface)
    #[inline]
    pub fn handle(&self) -> &InventoryHandle {
        self.view.top()
    }

    /// Classification of the clicked slot
    #[inline]
    pub fn slot_kind(&self) -> SlotKind {
        self.slot_kind
    }

    /// Slot index counted across the whole view, top surface first
    ///
    /// Meaningless when the slot kind is [`SlotKind::Outside`].
    #[inline]
    pub fn raw_slot(&self) -> usize {
        self.raw_slot
    }

    /// The physical input
    #[inline]
    pub fn click_kind(&self) -> ClickKind {
        self.click_kind
    }

    /// The host's intended stack mutation
    #[inline]
    pub fn action(&self) -> ClickAction {
        self.action
    }

    /// The hotbar key for number-key clicks
    #[inline]
    pub fn hotbar_button(&self) -> Option<u8> {
        self.hotbar_button
    }

    /// Suppress the host's default slot mutation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether the signal has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Stacks are being dragged across slots
#[derive(Debug)]
pub struct DragSignal {
    view: View,
    cancelled: AtomicBool,
}

impl DragSignal {
    /// Create a drag signal
    pub fn new(view: View) -> Self {
        Self {
            view,
            cancelled: AtomicBool::new(false),
        }
    }

    /// The view the drag happened in
    #[inline]
    pub fn view(&self) -> &View {
        &self.view
    }

    /// The affected container (the view's top surface)
    #[inline]
    pub fn handle(&self) -> &InventoryHandle {
        self.view.top()
    }

    /// Suppress the host's default slot mutation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether the signal has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// A menu was closed
#[derive(Debug)]
pub struct CloseSignal {
    view: View,
}

impl CloseSignal {
    /// Create a close signal
    pub fn new(view: View) -> Self {
        Self { view }
    }

    /// The view being closed
    #[inline]
    pub fn view(&self) -> &View {
        &self.view
    }

    /// The affected container (the view's top surface)
    #[inline]
    pub fn handle(&self) -> &InventoryHandle {
        self.view.top()
    }
}

/// Any of the four inventory signals
#[derive(Debug)]
pub enum MenuSignal {
    Open(OpenSignal),
    Click(ClickSignal),
    Drag(DragSignal),
    Close(CloseSignal),
}

impl MenuSignal {
    /// The view the signal happened in
    pub fn view(&self) -> &View {
        match self {
            Self::Open(signal) => signal.view(),
            Self::Click(signal) => signal.view(),
            Self::Drag(signal) => signal.view(),
            Self::Close(signal) => signal.view(),
        }
    }

    /// The affected container (the view's top surface)
    pub fn handle(&self) -> &InventoryHandle {
        self.view().top()
    }

    /// Whether the signal has been cancelled (close signals never are)
    pub fn is_cancelled(&self) -> bool {
        match self {
            Self::Open(signal) => signal.is_cancelled(),
            Self::Click(signal) => signal.is_cancelled(),
            Self::Drag(signal) => signal.is_cancelled(),
            Self::Close(_) => false,
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Open(_) => "open",
            Self::Click(_) => "click",
            Self::Drag(_) => "drag",
            Self::Close(_) => "close",
        }
    }
}

impl From<OpenSignal> for MenuSignal {
    fn from(signal: OpenSignal) -> Self {
        Self::Open(signal)
    }
}

impl From<ClickSignal> for MenuSignal {
    fn from(signal: ClickSignal) -> Self {
        Self::Click(signal)
    }
}

impl From<DragSignal> for MenuSignal {
    fn from(signal: DragSignal) -> Self {
        Self::Drag(signal)
    }
}

impl From<CloseSignal> for MenuSignal {
    fn from(signal: CloseSignal) -> Self {
        Self::Close(signal)
    }
}
