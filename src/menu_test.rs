use super::*;
use crate::fake::FakeNode;

fn menu() -> (MenuController<FakeNode>, FakeNode, FakeNode) {
    let toggle = FakeNode::new("menuToggle");
    let drawer = FakeNode::new("mobileDrawer");
    toggle.set_attribute("aria-expanded", "false");
    drawer.set_hidden(true);
    (MenuController::new(toggle.clone(), drawer.clone(), 720.0), toggle, drawer)
}

// =============================================================
// Toggle parity
// =============================================================

#[test]
fn odd_toggles_leave_menu_open() {
    let (menu, toggle, drawer) = menu();
    for _ in 0..3 {
        menu.toggle();
    }
    assert!(menu.is_open());
    assert_eq!(toggle.attr("aria-expanded").as_deref(), Some("true"));
    assert!(!drawer.is_hidden());
}

#[test]
fn even_toggles_leave_menu_closed() {
    let (menu, toggle, drawer) = menu();
    for _ in 0..4 {
        menu.toggle();
    }
    assert!(!menu.is_open());
    assert_eq!(toggle.attr("aria-expanded").as_deref(), Some("false"));
    assert!(drawer.is_hidden());
}

#[test]
fn missing_attribute_reads_as_closed() {
    let toggle = FakeNode::new("menuToggle");
    let drawer = FakeNode::new("mobileDrawer");
    let menu = MenuController::new(toggle, drawer.clone(), 720.0);
    assert!(!menu.is_open());
    menu.toggle();
    assert!(menu.is_open());
    assert!(!drawer.is_hidden());
}

#[test]
fn markup_open_state_is_respected() {
    let (menu, toggle, _drawer) = menu();
    toggle.set_attribute("aria-expanded", "true");
    menu.toggle();
    assert!(!menu.is_open());
}

// =============================================================
// Forced close
// =============================================================

#[test]
fn close_is_idempotent() {
    let (menu, _, drawer) = menu();
    menu.close();
    menu.close();
    assert!(!menu.is_open());
    assert!(drawer.is_hidden());
}

#[test]
fn escape_closes() {
    let (menu, _, _) = menu();
    menu.toggle();
    menu.on_key_down("Escape");
    assert!(!menu.is_open());
}

#[test]
fn other_keys_do_not_close() {
    let (menu, _, _) = menu();
    menu.toggle();
    for key in ["Enter", "Esc", "escape", "Tab"] {
        menu.on_key_down(key);
        assert!(menu.is_open(), "{key}");
    }
}

#[test]
fn resize_past_breakpoint_closes_open_menu() {
    let (menu, _, drawer) = menu();
    menu.toggle();
    menu.on_resize(1024.0);
    assert!(!menu.is_open());
    assert!(drawer.is_hidden());
}

#[test]
fn resize_at_breakpoint_keeps_menu_open() {
    let (menu, _, _) = menu();
    menu.toggle();
    menu.on_resize(720.0);
    assert!(menu.is_open());
}

#[test]
fn resize_while_closed_stays_closed() {
    let (menu, _, drawer) = menu();
    menu.on_resize(1280.0);
    assert!(!menu.is_open());
    assert!(drawer.is_hidden());
}
