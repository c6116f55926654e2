//! Light/"ink" theme toggle, persisted in local storage.
//!
//! Only the ink choice is stored. Returning to the default theme deletes the
//! key, so "no key" and "default theme" are the same state.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use crate::consts::{INK_VALUE, THEME_ATTR};
use crate::dom::Node;

/// Persistent key/value storage (`localStorage` in the browser).
pub trait ThemeStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Default,
    Ink,
}

impl Theme {
    /// Interpret a stored value. Anything but `"ink"` means default.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some(INK_VALUE) => Self::Ink,
            _ => Self::Default,
        }
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Default => Self::Ink,
            Self::Ink => Self::Default,
        }
    }
}

pub struct ThemeToggle<N> {
    root: N,
    store: Box<dyn ThemeStore>,
    key: String,
}

impl<N: Node> ThemeToggle<N> {
    /// `root` carries the theme attribute (the `<body>` element).
    pub fn new(root: N, store: Box<dyn ThemeStore>, key: impl Into<String>) -> Self {
        Self { root, store, key: key.into() }
    }

    /// Apply a persisted ink preference. A default preference leaves the
    /// markup untouched.
    pub fn restore(&self) {
        if Theme::from_stored(self.store.get(&self.key).as_deref()) == Theme::Ink {
            self.root.set_attribute(THEME_ATTR, INK_VALUE);
        }
    }

    /// Theme as currently rendered, read from the root attribute.
    #[must_use]
    pub fn current(&self) -> Theme {
        Theme::from_stored(self.root.attribute(THEME_ATTR).as_deref())
    }

    pub fn toggle(&self) -> Theme {
        let next = self.current().flipped();
        match next {
            Theme::Ink => {
                self.root.set_attribute(THEME_ATTR, INK_VALUE);
                self.store.set(&self.key, INK_VALUE);
            }
            Theme::Default => {
                self.root.remove_attribute(THEME_ATTR);
                self.store.remove(&self.key);
            }
        }
        next
    }
}
