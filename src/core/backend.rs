//! # Menu Backend
//!
//! Owns the item arena and the cursor. All navigation goes through here.
//!
//! ```text
//! MenuBackend
//! ├── items: Vec<MenuItem>          // arena, slot 0 is "MenuRoot"
//! ├── current: ItemId               // always a valid slot
//! ├── menu_use: Option<hook>        // global use hook
//! ├── menu_change: Option<hook>     // global change hook
//! └── item_change: Option<hook>     // global value-change hook
//! ```
//!
//! Every transition funnels through `set_current`, which fires hooks in a
//! fixed order and only then commits:
//!
//! ```text
//! from.on_change_from → to.on_change_to → menu_change → current = to
//! ```
//!
//! Moving where there is no neighbor, searching for something that is not
//! there, or passing a handle this backend does not know are all no-ops.
//!
//! Hooks run synchronously while the backend is borrowed. They must not try
//! to navigate the backend that invoked them.

use std::borrow::Cow;
use std::fmt;

use log::{debug, trace};

use crate::core::event::{
    ChangeCallback, ChangeEvent, ItemChangeCallback, ItemChangeEvent, MoveEvent, UseCallback,
    UseEvent,
};
use crate::core::item::{Direction, ItemId, MenuItem};
use crate::core::search::{self, StartNode};

/// Name of the item every backend is created with.
pub const ROOT_NAME: &str = "MenuRoot";

pub struct MenuBackend {
    items: Vec<MenuItem>,
    current: ItemId,
    menu_use: Option<UseCallback>,
    menu_change: Option<ChangeCallback>,
    item_change: Option<ItemChangeCallback>,
}

impl fmt::Debug for MenuBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuBackend")
            .field("items", &self.items)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl Default for MenuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuBackend {
    pub fn new() -> Self {
        let mut root = MenuItem::new(ROOT_NAME);
        root.id = ItemId(0);
        Self {
            items: vec![root],
            current: ItemId(0),
            menu_use: None,
            menu_change: None,
            item_change: None,
        }
    }

    /// A backend with its global use hook already installed.
    pub fn with_use_callback(cb: impl Fn(&UseEvent<'_>) + 'static) -> Self {
        let mut backend = Self::new();
        backend.on_menu_use(cb);
        backend
    }

    pub fn on_menu_use(&mut self, cb: impl Fn(&UseEvent<'_>) + 'static) -> &mut Self {
        self.menu_use = Some(Box::new(cb));
        self
    }

    pub fn on_menu_change(&mut self, cb: impl Fn(&ChangeEvent<'_>) + 'static) -> &mut Self {
        self.menu_change = Some(Box::new(cb));
        self
    }

    pub fn on_item_change(&mut self, cb: impl Fn(&ItemChangeEvent<'_>) + 'static) -> &mut Self {
        self.item_change = Some(Box::new(cb));
        self
    }

    // ── Arena ───────────────────────────────────────────────────────────────

    /// Moves `item` into the arena and returns its handle.
    pub fn insert(&mut self, mut item: MenuItem) -> ItemId {
        let id = ItemId(self.items.len());
        item.id = id;
        self.items.push(item);
        id
    }

    /// Inserts `item` and registers it, so value changes notify this backend.
    pub fn insert_registered(&mut self, item: MenuItem) -> ItemId {
        let id = self.insert(item);
        self.register_backend(id);
        id
    }

    /// Shorthand for a registered item with a name, level and shortkey.
    pub fn item_with(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        level: u8,
        shortkey: char,
    ) -> ItemId {
        self.insert_registered(MenuItem::new(name).with_level(level).with_shortkey(shortkey))
    }

    pub fn register_backend(&mut self, id: ItemId) {
        if let Some(item) = self.items.get_mut(id.0) {
            item.notify = true;
        }
    }

    pub fn item(&self, id: ItemId) -> Option<&MenuItem> {
        self.items.get(id.0)
    }

    /// Mutable access for hooks, level and back. Links stay private to the
    /// backend.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut MenuItem> {
        self.items.get_mut(id.0)
    }

    /// First item with exactly this name, in insertion order.
    pub fn find(&self, name: &str) -> Option<ItemId> {
        self.items.iter().find(|i| i.name() == name).map(|i| i.id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Never true: the root is always present.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn root(&self) -> ItemId {
        ItemId(0)
    }

    pub fn root_item(&self) -> &MenuItem {
        &self.items[0]
    }

    pub fn current(&self) -> ItemId {
        self.current
    }

    pub fn current_item(&self) -> &MenuItem {
        &self.items[self.current.0]
    }

    // ── Linking ─────────────────────────────────────────────────────────────

    /// Default vertical link; same as [`add_after`](Self::add_after).
    pub fn add(&mut self, anchor: ItemId, added: ItemId) -> ItemId {
        self.add_after(anchor, added)
    }

    pub fn add_before(&mut self, anchor: ItemId, added: ItemId) -> ItemId {
        self.link(anchor, added, Direction::Before)
    }

    pub fn add_after(&mut self, anchor: ItemId, added: ItemId) -> ItemId {
        self.link(anchor, added, Direction::After)
    }

    pub fn add_left(&mut self, anchor: ItemId, added: ItemId) -> ItemId {
        self.link(anchor, added, Direction::Left)
    }

    pub fn add_right(&mut self, anchor: ItemId, added: ItemId) -> ItemId {
        self.link(anchor, added, Direction::Right)
    }

    /// Sets the exit target of `anchor`. The exit item is not touched.
    pub fn add_exit(&mut self, anchor: ItemId, exit: ItemId) -> ItemId {
        if self.contains(exit)
            && let Some(item) = self.items.get_mut(anchor.0)
        {
            item.exit = Some(exit);
        }
        exit
    }

    /// `anchor.<direction> = added`, `added.<opposite> = anchor`, and `added`
    /// inherits `anchor.back` unless it already has a back.
    fn link(&mut self, anchor: ItemId, added: ItemId, direction: Direction) -> ItemId {
        if !self.contains(anchor) || !self.contains(added) {
            return added;
        }
        let anchor_back = self.items[anchor.0].back;
        self.items[anchor.0].set_neighbor(direction, Some(added));

        let item = &mut self.items[added.0];
        item.set_neighbor(direction.opposite(), Some(anchor));
        if item.back.is_none() {
            item.back = anchor_back;
        }
        added
    }

    fn contains(&self, id: ItemId) -> bool {
        id.0 < self.items.len()
    }

    // ── Move resolution ─────────────────────────────────────────────────────

    /// Neighbor of `from` in `direction`, stamping its back to `from`.
    fn resolve_move(&mut self, from: ItemId, direction: Direction) -> Option<ItemId> {
        let next = self.items.get(from.0)?.neighbor(direction)?;
        self.items.get_mut(next.0)?.back = Some(from);
        Some(next)
    }

    fn resolve_exit(&mut self, from: ItemId) -> Option<ItemId> {
        let next = self.items.get(from.0)?.exit?;
        self.items.get_mut(next.0)?.back = Some(from);
        Some(next)
    }

    fn resolve_back(&self, from: ItemId) -> Option<ItemId> {
        self.items.get(from.0)?.back
    }

    // ── Navigation ──────────────────────────────────────────────────────────

    pub fn move_up(&mut self) {
        self.move_direction(Direction::Before);
    }

    pub fn move_down(&mut self) {
        self.move_direction(Direction::After);
    }

    pub fn move_left(&mut self) {
        self.move_direction(Direction::Left);
    }

    pub fn move_right(&mut self) {
        self.move_direction(Direction::Right);
    }

    fn move_direction(&mut self, direction: Direction) {
        let current = self.current_item();
        if let Some(hook) = current.move_hook(direction) {
            hook(&MoveEvent { item: current });
        }
        let next = self.resolve_move(self.current, direction);
        if next.is_none() {
            trace!("No {:?} neighbor from '{}'", direction, self.current_item().name());
        }
        self.set_current(next);
    }

    /// Returns to the item the current one was last reached from.
    pub fn move_back(&mut self) {
        let current = self.current_item();
        if let Some(hook) = &current.hooks.back {
            hook(&MoveEvent { item: current });
        }
        let next = self.resolve_back(self.current);
        self.set_current(next);
    }

    /// Follows the exit link. No move hook fires for exits.
    pub fn move_exit(&mut self) {
        let next = self.resolve_exit(self.current);
        self.set_current(next);
    }

    /// Jumps directly to `id`, firing the change hooks.
    pub fn select(&mut self, id: ItemId) {
        self.set_current(Some(id));
    }

    fn set_current(&mut self, next: Option<ItemId>) {
        let Some(next) = next else {
            return;
        };
        let Some(to) = self.items.get(next.0) else {
            return;
        };
        let from = &self.items[self.current.0];

        let event = ChangeEvent { from, to };
        if let Some(hook) = &from.hooks.change_from {
            hook(&event);
        }
        if let Some(hook) = &to.hooks.change_to {
            hook(&event);
        }
        if let Some(hook) = &self.menu_change {
            hook(&event);
        }
        debug!("Menu change: '{}' -> '{}'", from.name(), to.name());

        self.current = next;
    }

    // ── Use ─────────────────────────────────────────────────────────────────

    /// Selects `id`, then uses it.
    pub fn use_item(&mut self, id: ItemId) {
        self.set_current(Some(id));
        self.use_current();
    }

    /// Finds the first item with `shortkey` (searching from the root) and
    /// makes it current without change hooks, then uses the current item.
    /// The found item's back is set to the previous current item, even when
    /// that is the item itself.
    ///
    /// `'\0'` is the "no shortkey" sentinel, so it finds the first item
    /// without a shortkey (normally the root). With no match the current
    /// item is used as-is.
    pub fn use_shortkey(&mut self, shortkey: char) {
        let wanted = (shortkey != '\0').then_some(shortkey);
        let found = search::depth_first(self.items(), self.root(), StartNode::Include, |item| {
            item.shortkey() == wanted
        });
        match found {
            Some(id) => self.found_shortkey_item(id),
            None => trace!("No item with shortkey {:?}", shortkey),
        }
        self.use_current();
    }

    fn found_shortkey_item(&mut self, id: ItemId) {
        self.items[id.0].back = Some(self.current);
        debug!("Shortkey hit: '{}'", self.items[id.0].name());
        self.current = id;
    }

    /// Fires the current item's use hook, then the global use hook.
    pub fn use_current(&self) {
        let item = self.current_item();
        let event = UseEvent { item };
        if let Some(hook) = &item.hooks.used {
            hook(&event);
        }
        if let Some(hook) = &self.menu_use {
            hook(&event);
        }
    }

    // ── Levels ──────────────────────────────────────────────────────────────

    /// Jumps to the first item at `level` reachable from the current one.
    /// The current item itself is never a match.
    pub fn move_to_level(&mut self, level: u8) {
        let found = search::depth_first(self.items(), self.current, StartNode::Skip, |item| {
            item.level() == level
        });
        match found {
            Some(id) => {
                debug!("Level jump to {} lands on '{}'", level, self.items[id.0].name());
                self.set_current(Some(id));
            }
            None => trace!("No item at level {} reachable", level),
        }
    }

    /// Jumps `delta` levels relative to the current item's level.
    /// A target below 0 or above 255 is ignored.
    pub fn move_relative_levels(&mut self, delta: i32) {
        let target = i32::from(self.current_item().level()) + delta;
        match u8::try_from(target) {
            Ok(level) => self.move_to_level(level),
            Err(_) => trace!("Relative level target {} out of range", target),
        }
    }

    // ── Values ──────────────────────────────────────────────────────────────

    /// Fires the global item-changed hook for `id`.
    pub fn fire_item_changed_event(&self, id: ItemId) {
        let (Some(item), Some(hook)) = (self.items.get(id.0), &self.item_change) else {
            return;
        };
        hook(&ItemChangeEvent { item });
    }

    pub fn set_value(&mut self, id: ItemId, value: i32) -> Option<i32> {
        self.update_value(id, |_| value)
    }

    pub fn increment(&mut self, id: ItemId) -> Option<i32> {
        self.increment_by(id, 1)
    }

    /// Adds `step` with wrapping arithmetic; there is no clamping.
    pub fn increment_by(&mut self, id: ItemId, step: i32) -> Option<i32> {
        self.update_value(id, |v| v.wrapping_add(step))
    }

    pub fn decrement(&mut self, id: ItemId) -> Option<i32> {
        self.decrement_by(id, 1)
    }

    pub fn decrement_by(&mut self, id: ItemId, step: i32) -> Option<i32> {
        self.update_value(id, |v| v.wrapping_sub(step))
    }

    fn update_value(&mut self, id: ItemId, f: impl FnOnce(i32) -> i32) -> Option<i32> {
        let item = self.items.get_mut(id.0)?;
        item.value = f(item.value);
        let (value, notify) = (item.value, item.notify);
        if notify {
            self.fire_item_changed_event(id);
        }
        Some(value)
    }
}
