//! Footer copyright year.

use crate::dom::Node;

/// Write `year` into `node`, zero-padded to four digits.
pub fn stamp<N: Node>(node: &N, year: u32) {
    node.set_text(&format!("{year:04}"));
}
