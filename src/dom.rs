//! Element capability consumed by every controller.
//!
//! The core never touches `web_sys` directly. It mutates pages through
//! [`Node`], which the browser adapter implements over `web_sys::Element`
//! and tests implement in memory.

/// A handle to one document element.
///
/// All methods take `&self`: element handles are shared references into a
/// document the handle does not own, the same way `web_sys::Element` works.
pub trait Node {
    /// The element's `id`, or an empty string.
    fn id(&self) -> String;

    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
    fn remove_attribute(&self, name: &str);

    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);

    /// Add `class` when `on` is true, remove it otherwise.
    fn toggle_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    fn set_hidden(&self, hidden: bool);
    fn set_text(&self, text: &str);
}
