//! Page tunables, overridable from an inline JSON block.
//!
//! Every field is optional in the JSON; missing fields take the defaults in
//! [`crate::consts`]. The browser adapter reads the block from
//! `<script type="application/json" id="siteConfig">` when it exists.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SiteConfig {
    pub scroll_threshold_px: f64,
    pub mobile_breakpoint_px: f64,
    pub theme_storage_key: String,
    pub section_threshold: f64,
    pub section_root_margin: String,
    pub contact_threshold: f64,
    pub logo_asset_path: String,
    pub contact_asset_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            scroll_threshold_px: consts::SCROLL_THRESHOLD_PX,
            mobile_breakpoint_px: consts::MOBILE_BREAKPOINT_PX,
            theme_storage_key: consts::THEME_STORAGE_KEY.to_string(),
            section_threshold: consts::SECTION_THRESHOLD,
            section_root_margin: consts::SECTION_ROOT_MARGIN.to_string(),
            contact_threshold: consts::CONTACT_THRESHOLD,
            logo_asset_path: consts::LOGO_ASSET_PATH.to_string(),
            contact_asset_path: consts::CONTACT_ASSET_PATH.to_string(),
        }
    }
}

impl SiteConfig {
    /// Parse a JSON override block.
    ///
    /// Thresholds are intersection ratios and must lie in `0.0..=1.0`. The
    /// root margin must be something `IntersectionObserver` accepts.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(raw)?;
        check_ratio("sectionThreshold", cfg.section_threshold)?;
        check_ratio("contactThreshold", cfg.contact_threshold)?;
        check_root_margin(&cfg.section_root_margin)?;
        Ok(cfg)
    }
}

/// One to four whitespace-separated offsets, each in `px` or `%`.
fn check_root_margin(margin: &str) -> Result<(), ConfigError> {
    let parts: Vec<&str> = margin.split_whitespace().collect();
    let valid = (1..=4).contains(&parts.len()) && parts.iter().all(|part| is_margin_offset(part));
    if valid { Ok(()) } else { Err(ConfigError::RootMargin(margin.to_string())) }
}

fn is_margin_offset(part: &str) -> bool {
    let number = part.strip_suffix("px").or_else(|| part.strip_suffix('%'));
    number.is_some_and(|n| !n.is_empty() && n.parse::<f64>().is_ok_and(f64::is_finite))
}

fn check_ratio(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}
