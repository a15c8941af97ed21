//! Paged composite menus
//!
//! A `PageMenu` displays an inner page plus a trailing row of navigation
//! buttons. Signals landing on the page area are re-emitted as proxy
//! signals targeted at the inner page's container, and the page's cells are
//! copied back into the composite surface afterwards. Previous/next links
//! are pluggable suppliers; chain builders materialize an unbounded
//! sequence of pages lazily.

use crate::button::{ButtonMap, RedirectButton};
use crate::error::MenuError;
use coffer_core::{ItemStack, Memo};
use coffer_host::holder::MenuHolder;
use coffer_host::inventory::InventoryHandle;
use coffer_host::plugin::PluginHandle;
use coffer_host::signal::{ClickSignal, CloseSignal, OpenSignal, SlotKind};
use parking_lot::Mutex;
use std::iter::Peekable;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// Largest inner page a composite can display
pub const MAX_PAGE_SLOTS: usize = 45;
/// Width of the trailing navigation row
pub const NAV_ROW_SLOTS: usize = 9;

const PREVIOUS_OFFSET: usize = 2;
const NEXT_OFFSET: usize = 6;

/// Supplies a linked page menu; absent when the target is gone
pub type PageSupplier = Arc<dyn Fn() -> Option<Arc<PageMenu>> + Send + Sync>;

type SharedPages =
    Arc<Mutex<Peekable<Box<dyn Iterator<Item = Arc<dyn MenuHolder>> + Send>>>>;

/// Visual options for page menus
#[derive(Debug, Clone)]
pub struct PageStyle {
    title: Option<String>,
    previous_icon: ItemStack,
    next_icon: ItemStack,
}

impl Default for PageStyle {
    fn default() -> Self {
        Self {
            title: None,
            previous_icon: ItemStack::single("magenta_glazed_terracotta").with_name("Previous"),
            next_icon: ItemStack::single("magenta_glazed_terracotta").with_name("Next"),
        }
    }
}

impl PageStyle {
    /// Default icons, no title
    pub fn new() -> Self {
        Self::default()
    }

    /// Title shown on every page
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Icon for the previous-page button
    pub fn with_previous_icon(mut self, icon: ItemStack) -> Self {
        self.previous_icon = icon;
        self
    }

    /// Icon for the next-page button
    pub fn with_next_icon(mut self, icon: ItemStack) -> Self {
        self.next_icon = icon;
        self
    }
}

/// Builder for a single page menu
pub struct PageMenuBuilder {
    plugin: PluginHandle,
    page: Arc<dyn MenuHolder>,
    style: PageStyle,
    previous: Option<PageSupplier>,
    next: Option<PageSupplier>,
}

impl PageMenuBuilder {
    /// Replace all visual options at once
    pub fn style(mut self, style: PageStyle) -> Self {
        self.style = style;
        self
    }

    /// Title of the composite surface
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.style.title = Some(title.into());
        self
    }

    /// Icon for the previous-page button
    pub fn previous_icon(mut self, icon: ItemStack) -> Self {
        self.style.previous_icon = icon;
        self
    }

    /// Icon for the next-page button
    pub fn next_icon(mut self, icon: ItemStack) -> Self {
        self.style.next_icon = icon;
        self
    }

    /// Link to the previous page
    pub fn previous(mut self, supplier: PageSupplier) -> Self {
        self.previous = Some(supplier);
        self
    }

    /// Link to the next page
    pub fn next(mut self, supplier: PageSupplier) -> Self {
        self.next = Some(supplier);
        self
    }

    /// Validate the page size and build the menu
    pub fn build(self) -> Result<Arc<PageMenu>, MenuError> {
        let nav_row_start = padded_size(self.page.inventory().size())?;
        let total_size = nav_row_start + NAV_ROW_SLOTS;
        let inventory = match &self.style.title {
            Some(title) => InventoryHandle::with_title(total_size, title.clone()),
            None => InventoryHandle::new(total_size),
        };
        Ok(Arc::new_cyclic(|weak: &Weak<PageMenu>| {
            inventory.attach_owner(weak.clone());
            PageMenu {
                plugin: self.plugin,
                inventory,
                buttons: ButtonMap::new(),
                page: self.page,
                nav_row_start,
                style: self.style,
                previous: Mutex::new(self.previous),
                next: Mutex::new(self.next),
                opened: AtomicBool::new(false),
            }
        }))
    }
}

/// A menu composed of an inner page and a trailing navigation row
pub struct PageMenu {
    plugin: PluginHandle,
    inventory: InventoryHandle,
    buttons: ButtonMap,
    page: Arc<dyn MenuHolder>,
    /// Padded page size; first slot of the navigation row
    nav_row_start: usize,
    style: PageStyle,
    previous: Mutex<Option<PageSupplier>>,
    next: Mutex<Option<PageSupplier>>,
    /// One-way latch; navigation buttons are wired on the first open
    opened: AtomicBool,
}

impl PageMenu {
    /// Start building a page menu around an inner page
    pub fn builder(plugin: PluginHandle, page: Arc<dyn MenuHolder>) -> PageMenuBuilder {
        PageMenuBuilder {
            plugin,
            page,
            style: PageStyle::default(),
            previous: None,
            next: None,
        }
    }

    /// Build a page menu with defaults and no links
    pub fn new(plugin: PluginHandle, page: Arc<dyn MenuHolder>) -> Result<Arc<Self>, MenuError> {
        Self::builder(plugin, page).build()
    }

    /// The inner page
    pub fn page(&self) -> &Arc<dyn MenuHolder> {
        &self.page
    }

    /// Size of the inner page's container (unpadded)
    pub fn page_size(&self) -> usize {
        self.page.inventory().size()
    }

    /// First slot of the trailing navigation row
    pub fn navigation_row_start(&self) -> usize {
        self.nav_row_start
    }

    /// Slot of the previous-page button
    pub fn previous_slot(&self) -> usize {
        self.nav_row_start + PREVIOUS_OFFSET
    }

    /// Slot of the next-page button
    pub fn next_slot(&self) -> usize {
        self.nav_row_start + NEXT_OFFSET
    }

    /// Whether a previous page is linked
    pub fn has_previous_page(&self) -> bool {
        self.previous.lock().is_some()
    }

    /// Whether a next page is linked
    pub fn has_next_page(&self) -> bool {
        self.next.lock().is_some()
    }

    /// The supplier for the previous page, if linked
    pub fn previous_page_menu(&self) -> Option<PageSupplier> {
        self.previous.lock().clone()
    }

    /// The supplier for the next page, if linked
    pub fn next_page_menu(&self) -> Option<PageSupplier> {
        self.next.lock().clone()
    }

    pub(crate) fn set_next(&self, supplier: Option<PageSupplier>) {
        *self.next.lock() = supplier;
    }

    /// Build a chain of page menus from a sequence of pages
    ///
    /// The sequence may be infinite; menus are materialized lazily, one
    /// source element ahead of what has been requested, and memoized. The
    /// head menu is returned; it keeps every materialized successor alive,
    /// while previous links are weak.
    pub fn chain<I>(plugin: PluginHandle, pages: I) -> Result<Arc<Self>, MenuError>
    where
        I: IntoIterator<Item = Arc<dyn MenuHolder>>,
        I::IntoIter: Send + 'static,
    {
        Self::chain_with(plugin, pages, PageStyle::default())
    }

    /// Build a chain with explicit visual options
    pub fn chain_with<I>(
        plugin: PluginHandle,
        pages: I,
        style: PageStyle,
    ) -> Result<Arc<Self>, MenuError>
    where
        I: IntoIterator<Item = Arc<dyn MenuHolder>>,
        I::IntoIter: Send + 'static,
    {
        let boxed: Box<dyn Iterator<Item = Arc<dyn MenuHolder>> + Send> =
            Box::new(pages.into_iter());
        let shared: SharedPages = Arc::new(Mutex::new(boxed.peekable()));
        let first = { shared.lock().next() }.ok_or(MenuError::EmptyChain)?;
        Self::chain_link(plugin, style, shared, first, None)
    }

    fn chain_link(
        plugin: PluginHandle,
        style: PageStyle,
        pages: SharedPages,
        page: Arc<dyn MenuHolder>,
        previous: Option<PageSupplier>,
    ) -> Result<Arc<Self>, MenuError> {
        let mut builder = Self::builder(plugin.clone(), page).style(style.clone());
        if let Some(previous) = previous {
            builder = builder.previous(previous);
        }
        let menu = builder.build()?;

        let has_more = { pages.lock().peek().is_some() };
        if has_more {
            let back = Arc::downgrade(&menu);
            let memo = Arc::new(Memo::new(move || {
                let page = { pages.lock().next() }?;
                let previous: PageSupplier = Arc::new(move || back.upgrade());
                match Self::chain_link(plugin, style, pages, page, Some(previous)) {
                    Ok(next_menu) => Some(next_menu),
                    Err(error) => {
                        log::warn!("failed to materialize next page: {error}");
                        None
                    }
                }
            }));
            menu.set_next(Some(Arc::new(move || memo.get())));
        }
        Ok(menu)
    }

    /// Wire the navigation buttons for the links present
    fn wire_buttons(&self) {
        if let Some(next) = self.next_page_menu() {
            let button = RedirectButton::new(self.style.next_icon.clone(), move || {
                (*next)().map(|menu| menu.inventory().clone())
            });
            self.buttons
                .bind(&self.inventory, self.next_slot(), Arc::new(button));
        }
        if let Some(previous) = self.previous_page_menu() {
            let button = RedirectButton::new(self.style.previous_icon.clone(), move || {
                (*previous)().map(|menu| menu.inventory().clone())
            });
            self.buttons
                .bind(&self.inventory, self.previous_slot(), Arc::new(button));
        }
    }

    /// Copy the inner page's cells into the composite surface
    fn copy_page_cells(&self) {
        let page_inventory = self.page.inventory();
        for slot in 0..page_inventory.size() {
            self.inventory.set_item(slot, page_inventory.item(slot));
        }
    }
}

impl MenuHolder for PageMenu {
    fn plugin(&self) -> &PluginHandle {
        &self.plugin
    }

    fn inventory(&self) -> &InventoryHandle {
        &self.inventory
    }

    fn on_open(&self, signal: &OpenSignal) {
        // Buttons are wired lazily so both links can be supplied after
        // construction; the latch never resets.
        if !self.opened.swap(true, Ordering::AcqRel) {
            self.wire_buttons();
        }

        let proxy = OpenSignal::new(signal.view().with_top(self.page.inventory().clone()));
        self.plugin.server().call(&proxy.into());
        self.copy_page_cells();
    }

    fn on_click(&self, signal: &ClickSignal) {
        let raw_slot = signal.raw_slot();
        let in_nav_row = signal.slot_kind() != SlotKind::Outside
            && raw_slot >= self.nav_row_start
            && raw_slot < self.nav_row_start + NAV_ROW_SLOTS;

        if in_nav_row {
            if let Some(button) = self.buttons.button(raw_slot) {
                button.on_click(self, signal);
            }
            return;
        }

        // Re-target the click at the inner page. Outside and quickbar
        // classifications survive; anything else on the top surface
        // becomes a plain container slot. Bottom-surface raw slots shift
        // down by the navigation row width.
        let proxy_view = signal.view().with_top(self.page.inventory().clone());
        let slot_kind = match signal.slot_kind() {
            kind @ (SlotKind::Outside | SlotKind::Quickbar) => kind,
            _ => SlotKind::Container,
        };
        let proxy_slot = if signal.slot_kind() != SlotKind::Outside
            && signal.view().is_bottom_slot(raw_slot)
        {
            raw_slot - NAV_ROW_SLOTS
        } else {
            raw_slot
        };

        let mut proxy = ClickSignal::new(
            proxy_view,
            slot_kind,
            proxy_slot,
            signal.click_kind(),
            signal.action(),
        );
        if let Some(button) = signal.hotbar_button() {
            proxy = proxy.with_hotbar_button(button);
        }
        self.plugin.server().call(&proxy.into());
        self.copy_page_cells();
    }

    fn on_close(&self, signal: &CloseSignal) {
        let proxy = CloseSignal::new(signal.view().with_top(self.page.inventory().clone()));
        self.plugin.server().call(&proxy.into());
    }
}

impl std::fmt::Debug for PageMenu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageMenu")
            .field("inventory", &self.inventory)
            .field("page_size", &self.page_size())
            .field("has_previous", &self.has_previous_page())
            .field("has_next", &self.has_next_page())
            .finish()
    }
}

/// Round a page size up to a whole number of rows
///
/// Sizes outside (0, 45] are rejected.
fn padded_size(page_size: usize) -> Result<usize, MenuError> {
    if page_size == 0 || page_size > MAX_PAGE_SLOTS {
        return Err(MenuError::InvalidPageSize(page_size));
    }
    Ok(match page_size % 9 {
        0 => page_size,
        remainder => page_size + (9 - remainder),
    })
}
