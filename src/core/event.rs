//! # Events
//!
//! Payloads handed to hooks. Every event borrows the items it talks about,
//! so a hook can read names, values and links but never mutate the graph.
//!
//! | Event             | Fired by                                   |
//! |-------------------|--------------------------------------------|
//! | `ChangeEvent`     | every committed transition                 |
//! | `UseEvent`        | `use_current` / `use_item` / `use_shortkey` |
//! | `ItemChangeEvent` | value mutation of a registered item        |
//! | `MoveEvent`       | directional and back moves, before resolve |

use crate::core::item::MenuItem;

/// A committed transition from one item to another.
#[derive(Debug, Clone, Copy)]
pub struct ChangeEvent<'a> {
    pub from: &'a MenuItem,
    pub to: &'a MenuItem,
}

/// An item was activated.
#[derive(Debug, Clone, Copy)]
pub struct UseEvent<'a> {
    pub item: &'a MenuItem,
}

/// An item's value changed.
#[derive(Debug, Clone, Copy)]
pub struct ItemChangeEvent<'a> {
    pub item: &'a MenuItem,
}

/// A move was requested while `item` was current.
#[derive(Debug, Clone, Copy)]
pub struct MoveEvent<'a> {
    pub item: &'a MenuItem,
}

pub type ChangeCallback = Box<dyn Fn(&ChangeEvent<'_>)>;
pub type UseCallback = Box<dyn Fn(&UseEvent<'_>)>;
pub type ItemChangeCallback = Box<dyn Fn(&ItemChangeEvent<'_>)>;
pub type MoveCallback = Box<dyn Fn(&MoveEvent<'_>)>;
