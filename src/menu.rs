//! Mobile navigation drawer.
//!
//! The open/closed state lives on the toggle's `aria-expanded` attribute, not
//! in Rust. Every transition reads the attribute back, so markup that starts
//! with the drawer open is respected.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

use crate::consts::ARIA_EXPANDED;
use crate::dom::Node;

pub struct MenuController<N> {
    toggle: N,
    drawer: N,
    breakpoint: f64,
}

impl<N: Node> MenuController<N> {
    #[must_use]
    pub fn new(toggle: N, drawer: N, breakpoint: f64) -> Self {
        Self { toggle, drawer, breakpoint }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.toggle.attribute(ARIA_EXPANDED).as_deref() == Some("true")
    }

    pub fn set_open(&self, open: bool) {
        self.toggle.set_attribute(ARIA_EXPANDED, if open { "true" } else { "false" });
        self.drawer.set_hidden(!open);
    }

    pub fn toggle(&self) {
        self.set_open(!self.is_open());
    }

    pub fn close(&self) {
        self.set_open(false);
    }

    pub fn on_key_down(&self, key: &str) {
        if key == "Escape" {
            self.close();
        }
    }

    /// Widening past the breakpoint hides the mobile-only drawer.
    pub fn on_resize(&self, viewport_width: f64) {
        if viewport_width > self.breakpoint {
            self.close();
        }
    }
}
