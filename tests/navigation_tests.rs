use std::cell::RefCell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use menu_backend::core::config::{build_backend, parse_config};
use menu_backend::{Action, ItemId, MenuBackend, MenuItem, update};

// ============================================================================
// Helper Functions
// ============================================================================

type Log = Rc<RefCell<Vec<String>>>;

fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

/// root → File(1) → Edit(1), File → right → Open(2, 'O') → after → Recent(2)
fn build_menu() -> (MenuBackend, [ItemId; 4]) {
    let mut mb = MenuBackend::new();
    let root = mb.root();
    let file = mb.insert(MenuItem::new("File").with_level(1).with_shortkey('F'));
    let edit = mb.insert(MenuItem::new("Edit").with_level(1).with_shortkey('E'));
    let open = mb.insert(MenuItem::new("Open").with_level(2).with_shortkey('O'));
    let recent = mb.insert(MenuItem::new("Recent").with_level(2));

    mb.add(root, file);
    mb.add_right(file, open);
    mb.add_after(file, edit);
    mb.add_after(open, recent);
    mb.add_exit(open, file);
    mb.add_exit(recent, file);
    (mb, [file, edit, open, recent])
}

// ============================================================================
// Linking
// ============================================================================

#[test]
fn test_add_after_is_symmetric() {
    let (mb, [file, edit, ..]) = build_menu();
    assert_eq!(mb.item(file).unwrap().after(), Some(edit));
    assert_eq!(mb.item(edit).unwrap().before(), Some(file));
}

#[test]
fn test_added_item_inherits_anchor_back() {
    let mut mb = MenuBackend::new();
    let root = mb.root();
    let a = mb.insert(MenuItem::new("a"));
    let b = mb.insert(MenuItem::new("b"));
    mb.add_after(root, a);
    mb.move_down();
    assert_eq!(mb.item(a).unwrap().back(), Some(root));

    mb.add_right(a, b);
    assert_eq!(mb.item(b).unwrap().back(), mb.item(a).unwrap().back());
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_walk_into_submenu_and_out() {
    let (mut mb, [file, _, open, recent]) = build_menu();
    mb.move_down();
    mb.move_right();
    mb.move_down();
    assert_eq!(mb.current(), recent);
    assert_eq!(mb.item(recent).unwrap().back(), Some(open));

    mb.move_exit();
    assert_eq!(mb.current(), file);
    assert_eq!(mb.item(file).unwrap().back(), Some(recent));
}

#[test]
fn test_back_retraces_single_step() {
    let (mut mb, _) = build_menu();
    let root = mb.root();
    mb.move_down();
    mb.move_back();
    assert_eq!(mb.current(), root);
}

#[test]
fn test_moving_off_edge_fires_nothing() {
    let log = new_log();
    let (mut mb, [_, edit, ..]) = build_menu();
    mb.select(edit);
    let sink = log.clone();
    mb.on_menu_change(move |e| sink.borrow_mut().push(e.to.name().to_string()));

    mb.move_down();
    mb.move_right();
    mb.move_left();
    assert_eq!(mb.current(), edit);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_change_hooks_run_before_commit() {
    let log = new_log();
    let (mut mb, [file, ..]) = build_menu();
    let root = mb.root();

    let sink = log.clone();
    mb.item_mut(root)
        .unwrap()
        .on_change_from(move |e| sink.borrow_mut().push(format!("from {}", e.to.name())));
    let sink = log.clone();
    mb.item_mut(file)
        .unwrap()
        .on_change_to(move |e| sink.borrow_mut().push(format!("to {}", e.to.name())));
    let sink = log.clone();
    mb.on_menu_change(move |e| {
        sink.borrow_mut().push(format!("global {}", e.to.name()));
        panic!("abort before commit");
    });

    // The last hook aborts the transition: every hook has run, nothing is
    // committed yet.
    let outcome = catch_unwind(AssertUnwindSafe(|| mb.move_down()));
    assert!(outcome.is_err());
    assert_eq!(mb.current(), root);
    assert_eq!(
        *log.borrow(),
        vec!["from File".to_string(), "to File".into(), "global File".into()]
    );

    mb.on_menu_change(|_| {});
    mb.move_down();
    assert_eq!(mb.current(), file);
}

// ============================================================================
// Shortkeys and levels
// ============================================================================

#[test]
fn test_shortkey_use_skips_change_hooks() {
    let log = new_log();
    let (mut mb, [_, _, open, _]) = build_menu();

    let sink = log.clone();
    mb.item_mut(open)
        .unwrap()
        .on_change_to(move |_| sink.borrow_mut().push("change".into()));
    let sink = log.clone();
    mb.item_mut(open)
        .unwrap()
        .on_use(move |e| sink.borrow_mut().push(format!("use {}", e.item.name())));
    let sink = log.clone();
    mb.on_menu_use(move |e| sink.borrow_mut().push(format!("menu {}", e.item.name())));

    mb.use_shortkey('O');
    assert_eq!(mb.current(), open);
    assert_eq!(mb.item(open).unwrap().back(), Some(mb.root()));
    assert_eq!(*log.borrow(), vec!["use Open".to_string(), "menu Open".into()]);
}

#[test]
fn test_level_jump_lands_on_first_match() {
    let log = new_log();
    let (mut mb, [_, _, open, _]) = build_menu();
    let sink = log.clone();
    mb.on_menu_change(move |e| {
        sink.borrow_mut()
            .push(format!("{}->{}", e.from.name(), e.to.name()))
    });

    mb.move_to_level(2);
    assert_eq!(mb.current(), open);
    assert_eq!(*log.borrow(), vec!["MenuRoot->Open".to_string()]);

    mb.move_relative_levels(-1);
    assert_eq!(mb.current_item().level(), 1);
}

// ============================================================================
// Values
// ============================================================================

#[test]
fn test_registered_item_reports_value_changes() {
    let log = new_log();
    let mut mb = MenuBackend::new();
    let sink = log.clone();
    mb.on_item_change(move |e| sink.borrow_mut().push(format!("{}", e.item.value())));
    let level = mb.item_with("Contrast", 1, 'C');

    mb.set_value(level, 3);
    assert_eq!(mb.increment_by(level, 5), Some(8));
    assert_eq!(mb.decrement(level), Some(7));
    assert_eq!(*log.borrow(), vec!["3".to_string(), "8".into(), "7".into()]);
}

#[test]
fn test_is_equal_between_items() {
    let a = MenuItem::new("Volume").with_value(2);
    let b = MenuItem::new("Volume").with_value(2);
    let c = MenuItem::new("Volume").with_value(1);
    assert!(a.is_equal(&b));
    assert!(!a.is_equal(&c));
}

// ============================================================================
// Config + actions
// ============================================================================

#[test]
fn test_scripted_session_over_config() {
    let toml_str = r#"
[[items]]
name = "Settings"
shortkey = "S"
level = 1

[[items]]
name = "Volume"
level = 2
value = 4
notify = true

[[links]]
from = "MenuRoot"
to = "Settings"
direction = "after"

[[links]]
from = "Settings"
to = "Volume"
direction = "right"

[[links]]
from = "Volume"
to = "Settings"
direction = "exit"
"#;
    let mut mb = build_backend(&parse_config(toml_str).unwrap()).unwrap();
    let changes = new_log();
    let sink = changes.clone();
    mb.on_item_change(move |e| sink.borrow_mut().push(format!("{}={}", e.item.name(), e.item.value())));

    for line in ["use S", "right", "inc 3", "dec", "exit"] {
        update(&mut mb, line.parse::<Action>().unwrap());
    }
    assert_eq!(mb.current_item().name(), "Settings");
    assert_eq!(
        *changes.borrow(),
        vec!["Volume=7".to_string(), "Volume=6".into()]
    );
}
