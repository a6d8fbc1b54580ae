//! # Menu Items
//!
//! One node of the menu graph. An item carries a name, an optional mnemonic
//! shortkey, an integer value and a level tag, plus six relations:
//!
//! ```text
//!                 before
//!                   ▲
//!          left ◄── item ──► right        back: where we came from
//!                   ▼                     exit: "leave this submenu"
//!                 after
//! ```
//!
//! Relations are [`ItemId`] handles into the arena owned by a
//! [`MenuBackend`](crate::core::backend::MenuBackend). Linking touches both
//! ends of a relation, so it is done through the backend; the item itself
//! only exposes its data and its hooks.

use std::borrow::Cow;
use std::fmt;

use crate::core::event::{
    ChangeCallback, ChangeEvent, MoveCallback, MoveEvent, UseCallback, UseEvent,
};

/// Stable handle to an item inside one backend's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub(crate) usize);

impl ItemId {
    /// Placeholder carried by items that have not been inserted yet.
    pub(crate) const DETACHED: ItemId = ItemId(usize::MAX);

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The four directional neighbor slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Before,
    After,
    Left,
    Right,
}

impl Direction {
    /// The slot on the other end of a link in this direction.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Before => Direction::After,
            Direction::After => Direction::Before,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Default)]
pub(crate) struct Hooks {
    pub(crate) change_from: Option<ChangeCallback>,
    pub(crate) change_to: Option<ChangeCallback>,
    pub(crate) back: Option<MoveCallback>,
    pub(crate) up: Option<MoveCallback>,
    pub(crate) down: Option<MoveCallback>,
    pub(crate) left: Option<MoveCallback>,
    pub(crate) right: Option<MoveCallback>,
    pub(crate) used: Option<UseCallback>,
}

pub struct MenuItem {
    pub(crate) id: ItemId,
    name: Cow<'static, str>,
    shortkey: Option<char>,
    pub(crate) value: i32,
    level: u8,
    pub(crate) before: Option<ItemId>,
    pub(crate) after: Option<ItemId>,
    pub(crate) left: Option<ItemId>,
    pub(crate) right: Option<ItemId>,
    pub(crate) back: Option<ItemId>,
    pub(crate) exit: Option<ItemId>,
    /// True once registered with its backend; value changes then notify it.
    pub(crate) notify: bool,
    pub(crate) hooks: Hooks,
}

impl MenuItem {
    /// A plain item with a name and no shortkey.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            id: ItemId::DETACHED,
            name: name.into(),
            shortkey: None,
            value: 0,
            level: 0,
            before: None,
            after: None,
            left: None,
            right: None,
            back: None,
            exit: None,
            notify: false,
            hooks: Hooks::default(),
        }
    }

    /// Sets the mnemonic. `'\0'` means "no shortkey".
    pub fn with_shortkey(mut self, shortkey: char) -> Self {
        self.shortkey = (shortkey != '\0').then_some(shortkey);
        self
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn with_value(mut self, value: i32) -> Self {
        self.value = value;
        self
    }

    /// Handle of this item in its backend.
    ///
    /// Only meaningful after the item has been inserted; items reached
    /// through a backend or an event always carry their real handle.
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shortkey(&self) -> Option<char> {
        self.shortkey
    }

    pub fn has_shortkey(&self) -> bool {
        self.shortkey.is_some()
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn set_level(&mut self, level: u8) {
        self.level = level;
    }

    pub fn is_registered(&self) -> bool {
        self.notify
    }

    pub fn before(&self) -> Option<ItemId> {
        self.before
    }

    pub fn after(&self) -> Option<ItemId> {
        self.after
    }

    pub fn left(&self) -> Option<ItemId> {
        self.left
    }

    pub fn right(&self) -> Option<ItemId> {
        self.right
    }

    /// The item this one was most recently reached from.
    pub fn back(&self) -> Option<ItemId> {
        self.back
    }

    /// Overrides the historical back item.
    pub fn set_back(&mut self, back: Option<ItemId>) {
        self.back = back;
    }

    pub fn exit(&self) -> Option<ItemId> {
        self.exit
    }

    pub fn neighbor(&self, direction: Direction) -> Option<ItemId> {
        match direction {
            Direction::Before => self.before,
            Direction::After => self.after,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub(crate) fn set_neighbor(&mut self, direction: Direction, id: Option<ItemId>) {
        match direction {
            Direction::Before => self.before = id,
            Direction::After => self.after = id,
            Direction::Left => self.left = id,
            Direction::Right => self.right = id,
        }
    }

    /// True if any of the four directional neighbors is set.
    /// `back` and `exit` do not count.
    pub fn has_children(&self) -> bool {
        self.before.is_some() || self.right.is_some() || self.after.is_some() || self.left.is_some()
    }

    /// Same name (exact, case-sensitive) and same value.
    ///
    /// Shortkey, level and links are not compared.
    pub fn is_equal(&self, other: &MenuItem) -> bool {
        self.name == other.name && self.value == other.value
    }

    // ── Hooks ───────────────────────────────────────────────────────────────

    /// Fired when a transition leaves this item.
    pub fn on_change_from(&mut self, cb: impl Fn(&ChangeEvent<'_>) + 'static) -> &mut Self {
        self.hooks.change_from = Some(Box::new(cb));
        self
    }

    /// Fired when a transition enters this item.
    pub fn on_change_to(&mut self, cb: impl Fn(&ChangeEvent<'_>) + 'static) -> &mut Self {
        self.hooks.change_to = Some(Box::new(cb));
        self
    }

    pub fn on_back(&mut self, cb: impl Fn(&MoveEvent<'_>) + 'static) -> &mut Self {
        self.hooks.back = Some(Box::new(cb));
        self
    }

    pub fn on_up(&mut self, cb: impl Fn(&MoveEvent<'_>) + 'static) -> &mut Self {
        self.hooks.up = Some(Box::new(cb));
        self
    }

    pub fn on_down(&mut self, cb: impl Fn(&MoveEvent<'_>) + 'static) -> &mut Self {
        self.hooks.down = Some(Box::new(cb));
        self
    }

    pub fn on_left(&mut self, cb: impl Fn(&MoveEvent<'_>) + 'static) -> &mut Self {
        self.hooks.left = Some(Box::new(cb));
        self
    }

    pub fn on_right(&mut self, cb: impl Fn(&MoveEvent<'_>) + 'static) -> &mut Self {
        self.hooks.right = Some(Box::new(cb));
        self
    }

    pub fn on_use(&mut self, cb: impl Fn(&UseEvent<'_>) + 'static) -> &mut Self {
        self.hooks.used = Some(Box::new(cb));
        self
    }

    pub(crate) fn move_hook(&self, direction: Direction) -> Option<&MoveCallback> {
        match direction {
            Direction::Before => self.hooks.up.as_ref(),
            Direction::After => self.hooks.down.as_ref(),
            Direction::Left => self.hooks.left.as_ref(),
            Direction::Right => self.hooks.right.as_ref(),
        }
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("shortkey", &self.shortkey)
            .field("value", &self.value)
            .field("level", &self.level)
            .field("before", &self.before)
            .field("after", &self.after)
            .field("left", &self.left)
            .field("right", &self.right)
            .field("back", &self.back)
            .field("exit", &self.exit)
            .finish_non_exhaustive()
    }
}
