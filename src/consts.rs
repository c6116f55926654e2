//! Shared constants: element ids, class names, and default tunables.

// ── Element ids ─────────────────────────────────────────────────

pub const HEADER_ID: &str = "siteHeader";
pub const MENU_TOGGLE_ID: &str = "menuToggle";
pub const MOBILE_DRAWER_ID: &str = "mobileDrawer";
pub const THEME_TOGGLE_ID: &str = "themeToggle";
pub const YEAR_ID: &str = "currentYear";
pub const LOGO_SLOT_ID: &str = "logoSpark";
pub const CONTACT_SLOT_ID: &str = "contactLottie";
pub const CONFIG_BLOCK_ID: &str = "siteConfig";

/// Selector for primary navigation links.
pub const NAV_LINK_SELECTOR: &str = ".nav-link";

/// Tracked sections, in observation order.
pub const SECTION_IDS: [&str; 4] = ["projects", "gallery", "cv", "contact"];

/// Section marked active before any scrolling happens.
pub const DEFAULT_SECTION: &str = "projects";

// ── Classes and attributes ──────────────────────────────────────

pub const SCROLLED_CLASS: &str = "is-scrolled";
pub const ACTIVE_CLASS: &str = "is-active";
pub const FALLBACK_CLASS: &str = "lottie-fallback";
pub const ARIA_EXPANDED: &str = "aria-expanded";
pub const ARIA_CURRENT: &str = "aria-current";
pub const THEME_ATTR: &str = "data-theme";

// ── Defaults ────────────────────────────────────────────────────

/// Vertical offset in CSS pixels at which the header turns "scrolled".
pub const SCROLL_THRESHOLD_PX: f64 = 12.0;

/// Viewports wider than this are treated as desktop; the drawer closes.
pub const MOBILE_BREAKPOINT_PX: f64 = 720.0;

pub const THEME_STORAGE_KEY: &str = "martengous-theme";
pub const INK_VALUE: &str = "ink";

pub const SECTION_THRESHOLD: f64 = 0.2;
pub const SECTION_ROOT_MARGIN: &str = "-35% 0px -50% 0px";
pub const CONTACT_THRESHOLD: f64 = 0.45;

pub const LOGO_ASSET_PATH: &str = "assets/lottie/logo-spark.json";
pub const CONTACT_ASSET_PATH: &str = "assets/lottie/contact-accent.json";

/// Renderer event fired when an animation's data cannot be loaded.
pub const DATA_FAILED_EVENT: &str = "data_failed";
