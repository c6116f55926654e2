//! Page composition: runs every initializer once and routes browser events.
//!
//! [`SiteCore`] owns all UI state and is driven entirely through its
//! `on_*` handlers, so it runs without a browser. The `browser` module
//! collects real elements into a [`Page`], calls [`SiteCore::init`], and
//! registers exactly the listeners the returned [`Wiring`] asks for.

#[cfg(test)]
#[path = "site_test.rs"]
mod site_test;

use crate::animation::{AnimationRenderer, AnimationWiring, DecorLoader, MotionEnv, ObserverControl, Slot};
use crate::config::SiteConfig;
use crate::consts::DEFAULT_SECTION;
use crate::dom::Node;
use crate::header::HeaderState;
use crate::menu::MenuController;
use crate::sections::{IntersectionEntry, ObserverOptions, SectionTracker};
use crate::theme::{ThemeStore, ThemeToggle};
use crate::year;

/// Elements found in the document. Absent elements disable their feature.
pub struct Page<N> {
    pub header: Option<N>,
    pub menu_toggle: Option<N>,
    pub mobile_drawer: Option<N>,
    pub theme_toggle: Option<N>,
    /// Element carrying the theme attribute (`<body>`).
    pub theme_root: Option<N>,
    pub year: Option<N>,
    pub nav_links: Vec<N>,
    /// Tracked section ids that exist, in tracking order.
    pub sections: Vec<&'static str>,
    pub logo_slot: Option<N>,
    pub contact_slot: Option<N>,
}

impl<N> Default for Page<N> {
    fn default() -> Self {
        Self {
            header: None,
            menu_toggle: None,
            mobile_drawer: None,
            theme_toggle: None,
            theme_root: None,
            year: None,
            nav_links: Vec::new(),
            sections: Vec::new(),
            logo_slot: None,
            contact_slot: None,
        }
    }
}

/// Replaceable browser services.
pub struct Capabilities<N> {
    pub store: Box<dyn ThemeStore>,
    /// `None` when the renderer script is not on the page.
    pub renderer: Option<Box<dyn AnimationRenderer<N>>>,
}

/// Environment snapshot taken at script load.
#[derive(Debug, Clone, Copy, Default)]
pub struct Environment {
    pub scroll_y: f64,
    pub prefers_reduced_motion: bool,
    pub observer_available: bool,
    pub current_year: u32,
}

/// Listeners and observers the host must register after init.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wiring {
    pub scroll: bool,
    /// Toggle click, drawer link clicks, document keydown, window resize.
    pub menu: bool,
    pub theme_toggle: bool,
    pub section_observer: Option<ObserverOptions>,
    /// Section ids to observe with `section_observer`.
    pub observed_sections: Vec<&'static str>,
    pub animations: AnimationWiring,
}

pub struct SiteCore<N> {
    header: Option<HeaderState<N>>,
    menu: Option<MenuController<N>>,
    sections: SectionTracker<N>,
    theme: Option<ThemeToggle<N>>,
    decor: DecorLoader<N>,
}

impl<N: Node + 'static> SiteCore<N> {
    /// Initialize the page. Call once per document.
    pub fn init(page: Page<N>, caps: Capabilities<N>, env: Environment, cfg: &SiteConfig) -> (Self, Wiring) {
        let mut wiring = Wiring::default();

        if let Some(node) = &page.year {
            year::stamp(node, env.current_year);
        }

        let header = page.header.map(|node| HeaderState::new(node, cfg.scroll_threshold_px));
        if let Some(header) = &header {
            header.sync(env.scroll_y);
            wiring.scroll = true;
        }

        let sections = SectionTracker::new(page.nav_links);
        sections.mark_active(DEFAULT_SECTION);

        let menu = match (page.menu_toggle, page.mobile_drawer) {
            (Some(toggle), Some(drawer)) => {
                wiring.menu = true;
                Some(MenuController::new(toggle, drawer, cfg.mobile_breakpoint_px))
            }
            _ => None,
        };

        if !page.sections.is_empty() {
            if env.observer_available {
                wiring.section_observer = Some(ObserverOptions {
                    threshold: cfg.section_threshold,
                    root_margin: Some(cfg.section_root_margin.clone()),
                });
                wiring.observed_sections = page.sections;
            } else {
                log::debug!("no intersection observer; section tracking disabled");
            }
        }

        let theme = match (page.theme_toggle, page.theme_root) {
            (Some(_), Some(root)) => {
                let theme = ThemeToggle::new(root, caps.store, cfg.theme_storage_key.clone());
                theme.restore();
                wiring.theme_toggle = true;
                Some(theme)
            }
            _ => None,
        };

        let motion = MotionEnv {
            prefers_reduced_motion: env.prefers_reduced_motion,
            observer_available: env.observer_available,
        };
        let (decor, animations) =
            DecorLoader::start(page.logo_slot, page.contact_slot, caps.renderer.as_deref(), motion, cfg);
        wiring.animations = animations;

        (Self { header, menu, sections, theme, decor }, wiring)
    }

    // --- Header ---

    pub fn on_scroll(&self, scroll_y: f64) {
        if let Some(header) = &self.header {
            header.sync(scroll_y);
        }
    }

    // --- Menu ---

    pub fn on_menu_toggle_click(&self) {
        if let Some(menu) = &self.menu {
            menu.toggle();
        }
    }

    pub fn on_drawer_link_click(&self) {
        if let Some(menu) = &self.menu {
            menu.close();
        }
    }

    pub fn on_key_down(&self, key: &str) {
        if let Some(menu) = &self.menu {
            menu.on_key_down(key);
        }
    }

    pub fn on_resize(&self, viewport_width: f64) {
        if let Some(menu) = &self.menu {
            menu.on_resize(viewport_width);
        }
    }

    // --- Sections ---

    pub fn on_section_intersections(&self, entries: &[IntersectionEntry]) {
        self.sections.on_intersections(entries);
    }

    #[cfg(test)]
    pub(crate) fn active_section(&self) -> Option<String> {
        self.sections.active()
    }

    // --- Theme ---

    pub fn on_theme_toggle_click(&self) {
        if let Some(theme) = &self.theme {
            let next = theme.toggle();
            log::debug!("theme switched to {next:?}");
        }
    }

    // --- Animations ---

    pub fn on_animation_failed(&self, slot: Slot) {
        self.decor.on_failed(slot);
    }

    pub fn on_contact_intersections(&mut self, entries: &[IntersectionEntry]) -> ObserverControl {
        self.decor.on_contact_intersections(entries)
    }

    pub fn on_contact_hover(&self) {
        self.decor.on_contact_hover();
    }
}
