//! Decorative vector animations with a static fallback.
//!
//! Two slots: the logo spark plays once on load, the contact accent plays
//! once when scrolled into view and again on every hover. When the renderer
//! is missing or the visitor prefers reduced motion, both slots get the
//! fallback class and nothing is loaded. A slot whose data fails to load
//! falls back on its own; the other slot is unaffected.

#[cfg(test)]
#[path = "animation_test.rs"]
mod animation_test;

use serde::Serialize;

use crate::config::SiteConfig;
use crate::consts::{CONTACT_SLOT_ID, FALLBACK_CLASS, LOGO_SLOT_ID};
use crate::dom::Node;
use crate::sections::{IntersectionEntry, ObserverOptions};

/// A loaded animation instance.
pub trait AnimationHandle {
    /// Seek to `frame` and play. `is_frame` selects frames over milliseconds.
    fn go_to_and_play(&self, frame: f64, is_frame: bool);
}

/// The external vector-animation renderer (lottie-web in the browser).
pub trait AnimationRenderer<N> {
    /// Start loading into `container`. `None` when the renderer rejected the
    /// call outright; asynchronous data failures arrive later as events.
    fn load(&self, container: &N, config: &AnimationConfig) -> Option<Box<dyn AnimationHandle>>;
}

/// Load parameters handed to the renderer. The container element is passed
/// separately since it is not serializable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationConfig {
    pub renderer: String,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub autoplay: bool,
    pub path: String,
}

impl AnimationConfig {
    fn svg(path: &str, autoplay: bool) -> Self {
        Self { renderer: "svg".into(), looping: false, autoplay, path: path.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Logo,
    Contact,
}

impl Slot {
    /// Id of the element hosting this slot.
    #[must_use]
    pub fn container_id(self) -> &'static str {
        match self {
            Self::Logo => LOGO_SLOT_ID,
            Self::Contact => CONTACT_SLOT_ID,
        }
    }

    #[must_use]
    pub fn config(self, cfg: &SiteConfig) -> AnimationConfig {
        match self {
            Self::Logo => AnimationConfig::svg(&cfg.logo_asset_path, true),
            Self::Contact => AnimationConfig::svg(&cfg.contact_asset_path, false),
        }
    }
}

/// Whether an observer should keep delivering after a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverControl {
    Keep,
    Disconnect,
}

/// Environment facts the loader decides on.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionEnv {
    pub prefers_reduced_motion: bool,
    pub observer_available: bool,
}

/// Listeners the host must attach after [`DecorLoader::start`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationWiring {
    /// Slots that need a load-failure listener on their handle.
    pub failure_listeners: Vec<Slot>,
    /// One-shot visibility observer for the contact slot.
    pub contact_observer: Option<ObserverOptions>,
    /// Whether to listen for `mouseenter` on the contact container.
    pub contact_hover: bool,
}

struct Loaded<N> {
    container: N,
    handle: Box<dyn AnimationHandle>,
}

impl<N: Node> Loaded<N> {
    fn restart(&self) {
        self.handle.go_to_and_play(0.0, true);
    }
}

fn load_slot<N: Node>(
    renderer: &dyn AnimationRenderer<N>,
    container: N,
    slot: Slot,
    cfg: &SiteConfig,
    wiring: &mut AnimationWiring,
) -> Option<Loaded<N>> {
    if let Some(handle) = renderer.load(&container, &slot.config(cfg)) {
        wiring.failure_listeners.push(slot);
        Some(Loaded { container, handle })
    } else {
        log::warn!("renderer refused {slot:?} animation");
        container.add_class(FALLBACK_CLASS);
        None
    }
}

pub struct DecorLoader<N> {
    logo: Option<Loaded<N>>,
    contact: Option<Loaded<N>>,
    contact_played: bool,
}

impl<N: Node> DecorLoader<N> {
    /// Load both slots, or apply the fallback to both.
    ///
    /// `renderer` is `None` when the page did not ship the renderer script.
    pub fn start(
        logo: Option<N>,
        contact: Option<N>,
        renderer: Option<&dyn AnimationRenderer<N>>,
        env: MotionEnv,
        cfg: &SiteConfig,
    ) -> (Self, AnimationWiring) {
        let mut wiring = AnimationWiring::default();
        let renderer = match renderer {
            Some(r) if !env.prefers_reduced_motion => r,
            other => {
                log::debug!(
                    "static animation fallback (renderer present: {}, reduced motion: {})",
                    other.is_some(),
                    env.prefers_reduced_motion
                );
                for container in logo.iter().chain(contact.iter()) {
                    container.add_class(FALLBACK_CLASS);
                }
                return (Self { logo: None, contact: None, contact_played: false }, wiring);
            }
        };

        let logo = logo.and_then(|c| load_slot(renderer, c, Slot::Logo, cfg, &mut wiring));
        let contact = contact.and_then(|c| load_slot(renderer, c, Slot::Contact, cfg, &mut wiring));
        wiring.contact_hover = contact.is_some();

        let mut loader = Self { logo, contact, contact_played: false };
        if let Some(slot) = &loader.contact {
            if env.observer_available {
                wiring.contact_observer = Some(ObserverOptions { threshold: cfg.contact_threshold, root_margin: None });
            } else {
                log::debug!("no intersection observer; playing contact accent immediately");
                slot.restart();
                loader.contact_played = true;
            }
        }
        (loader, wiring)
    }

    /// The renderer reported that `slot` could not load its data.
    pub fn on_failed(&self, slot: Slot) {
        let loaded = match slot {
            Slot::Logo => &self.logo,
            Slot::Contact => &self.contact,
        };
        if let Some(loaded) = loaded {
            log::debug!("{slot:?} animation data failed to load");
            loaded.container.add_class(FALLBACK_CLASS);
        }
    }

    /// First visible report plays the accent and releases the observer.
    pub fn on_contact_intersections(&mut self, entries: &[IntersectionEntry]) -> ObserverControl {
        let Some(contact) = &self.contact else {
            return ObserverControl::Disconnect;
        };
        if self.contact_played {
            return ObserverControl::Disconnect;
        }
        if entries.iter().any(|e| e.is_intersecting) {
            self.contact_played = true;
            contact.restart();
            return ObserverControl::Disconnect;
        }
        ObserverControl::Keep
    }

    /// Hover replays regardless of the scroll latch.
    pub fn on_contact_hover(&self) {
        if let Some(contact) = &self.contact {
            contact.restart();
        }
    }

    #[cfg(test)]
    pub(crate) fn contact_played(&self) -> bool {
        self.contact_played
    }
}
