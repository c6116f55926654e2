//! Active-section highlighting in the primary navigation.
//!
//! An intersection observer reports sections crossing a 20% visibility
//! threshold inside a viewport band shifted away from the edges. Each
//! intersecting report marks its nav link current.
//!
//! When one batch reports several intersecting sections, the last entry in
//! delivery order wins. Browsers deliver entries in observation order, which
//! is [`SECTION_IDS`] order, not visual order, so fast scrolling can briefly
//! highlight a section below the one in view. That behavior is kept as-is.

#[cfg(test)]
#[path = "sections_test.rs"]
mod sections_test;

use crate::consts::{ACTIVE_CLASS, ARIA_CURRENT, SECTION_IDS};
use crate::dom::Node;

/// Settings for registering an intersection observer.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: Option<String>,
}

/// One observer report, reduced to what the handlers read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub target_id: String,
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    #[must_use]
    pub fn new(target_id: &str, is_intersecting: bool) -> Self {
        Self { target_id: target_id.to_string(), is_intersecting }
    }
}

/// The tracked sections present on this page, in tracking order.
#[must_use]
pub fn present_sections(exists: impl Fn(&str) -> bool) -> Vec<&'static str> {
    SECTION_IDS.into_iter().filter(|id| exists(*id)).collect()
}

pub struct SectionTracker<N> {
    links: Vec<N>,
}

impl<N: Node> SectionTracker<N> {
    #[must_use]
    pub fn new(links: Vec<N>) -> Self {
        Self { links }
    }

    /// Mark the link pointing at `#id` current and clear every other link.
    pub fn mark_active(&self, id: &str) {
        let target = format!("#{id}");
        for link in &self.links {
            let active = link.attribute("href").as_deref() == Some(target.as_str());
            link.toggle_class(ACTIVE_CLASS, active);
            if active {
                link.set_attribute(ARIA_CURRENT, "page");
            } else {
                link.remove_attribute(ARIA_CURRENT);
            }
        }
    }

    pub fn on_intersections(&self, entries: &[IntersectionEntry]) {
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            self.mark_active(&entry.target_id);
        }
    }

    /// Id of the first link currently marked active.
    #[cfg(test)]
    pub(crate) fn active(&self) -> Option<String> {
        self.links
            .iter()
            .find(|l| l.attribute(ARIA_CURRENT).is_some())
            .and_then(|l| l.attribute("href"))
            .map(|href| href.trim_start_matches('#').to_string())
    }
}
