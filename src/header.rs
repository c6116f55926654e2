//! Header "scrolled" styling.

#[cfg(test)]
#[path = "header_test.rs"]
mod header_test;

use crate::consts::SCROLLED_CLASS;
use crate::dom::Node;

/// Whether a vertical offset counts as scrolled past `threshold`.
#[must_use]
pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y >= threshold
}

/// Keeps the header's scrolled class in step with the page offset.
pub struct HeaderState<N> {
    header: N,
    threshold: f64,
}

impl<N: Node> HeaderState<N> {
    #[must_use]
    pub fn new(header: N, threshold: f64) -> Self {
        Self { header, threshold }
    }

    pub fn sync(&self, scroll_y: f64) {
        self.header.toggle_class(SCROLLED_CLASS, is_scrolled(scroll_y, self.threshold));
    }
}
