//! Interactive behavior for the portfolio page.
//!
//! This crate is compiled to WebAssembly and loaded by the page as its only
//! script. On instantiation it wires up header styling, the mobile drawer,
//! active-section highlighting, the ink theme toggle, the decorative lottie
//! animations, and the footer year. Every feature degrades to a no-op when
//! its elements or browser capabilities are missing.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`site`] | Composition root and testable [`site::SiteCore`] |
//! | [`browser`] | `web-sys` adapters, listener wiring, wasm entry point |
//! | [`dom`] | The [`dom::Node`] element capability |
//! | [`header`] | Scrolled-header class |
//! | [`menu`] | Mobile drawer disclosure |
//! | [`sections`] | Active nav link from section visibility |
//! | [`theme`] | Ink theme toggle and its persistence |
//! | [`animation`] | Lottie slots with static fallback |
//! | [`year`] | Footer year stamp |
//! | [`config`] | Tunables with JSON overrides |
//! | [`error`] | Config and boot errors |
//! | [`consts`] | Element ids, class names, defaults |

pub mod animation;
pub mod browser;
pub mod config;
pub mod consts;
pub mod dom;
pub mod error;
pub mod header;
pub mod menu;
pub mod sections;
pub mod site;
pub mod theme;
pub mod year;

#[cfg(test)]
mod fake;
