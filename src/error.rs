//! Error types for configuration and browser boot.
//!
//! None of these ever reach the visitor. Boot failures are logged and the
//! page keeps working without enhancements.

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed config block: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be within 0.0..=1.0, got {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("sectionRootMargin must be 1-4 px or % offsets, got {0:?}")]
    RootMargin(String),
}

#[derive(Debug, thiserror::Error)]
pub enum BootError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<wasm_bindgen::JsValue> for BootError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
