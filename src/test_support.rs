//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::backend::MenuBackend;
use crate::core::event::{ChangeEvent, ItemChangeEvent, MoveEvent, UseEvent};
use crate::core::item::{ItemId, MenuItem};

/// Collects hook invocations as `label:payload` strings, in firing order.
#[derive(Clone, Default)]
pub struct Recorder {
    log: Rc<RefCell<Vec<String>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// Records `label:from->to`.
    pub fn change(&self, label: &'static str) -> impl Fn(&ChangeEvent<'_>) + 'static {
        let log = self.log.clone();
        move |e| {
            log.borrow_mut()
                .push(format!("{label}:{}->{}", e.from.name(), e.to.name()))
        }
    }

    /// Records `label:item`.
    pub fn used(&self, label: &'static str) -> impl Fn(&UseEvent<'_>) + 'static {
        let log = self.log.clone();
        move |e| log.borrow_mut().push(format!("{label}:{}", e.item.name()))
    }

    /// Records `label:item`.
    pub fn moved(&self, label: &'static str) -> impl Fn(&MoveEvent<'_>) + 'static {
        let log = self.log.clone();
        move |e| log.borrow_mut().push(format!("{label}:{}", e.item.name()))
    }

    /// Records `label:item=value`.
    pub fn item_changed(&self, label: &'static str) -> impl Fn(&ItemChangeEvent<'_>) + 'static {
        let log = self.log.clone();
        move |e| {
            log.borrow_mut()
                .push(format!("{label}:{}={}", e.item.name(), e.item.value()))
        }
    }
}

/// Handles into the menu built by [`sample_menu`].
pub struct SampleIds {
    pub file: ItemId,
    pub edit: ItemId,
    pub new: ItemId,
    pub save: ItemId,
    pub copy: ItemId,
}

/// Builds a two-level menu:
///
/// ```text
/// MenuRoot(0)
///   └─after─► File(1,F) ─right─► New(2,N) ─after─► Save(2,S)
///               └─after─► Edit(1,E) ─right─► Copy(2,C)
/// ```
///
/// Level-2 items exit to their level-1 parent.
pub fn sample_menu() -> (MenuBackend, SampleIds) {
    let mut mb = MenuBackend::new();
    let root = mb.root();
    let file = mb.item_with("File", 1, 'F');
    let edit = mb.item_with("Edit", 1, 'E');
    let new = mb.item_with("New", 2, 'N');
    let save = mb.item_with("Save", 2, 'S');
    let copy = mb.insert(MenuItem::new("Copy").with_level(2).with_shortkey('C'));

    mb.add(root, file);
    mb.add(file, edit);
    mb.add_right(file, new);
    mb.add(new, save);
    mb.add_right(edit, copy);
    mb.add_exit(new, file);
    mb.add_exit(save, file);
    mb.add_exit(copy, edit);

    (
        mb,
        SampleIds {
            file,
            edit,
            new,
            save,
            copy,
        },
    )
}
