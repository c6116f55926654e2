//! `web-sys` implementations of the core's capabilities, plus listener wiring.
//!
//! Everything here is thin: look elements up, translate browser values into
//! core types, and forward events to [`SiteCore`]. Browser call failures are
//! logged at debug and otherwise ignored; the page still works without them.
//! A feature whose listeners cannot be registered is logged and skipped
//! while the remaining features are still wired.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, NodeList, Storage, Window,
};

use crate::animation::{AnimationConfig, AnimationHandle, AnimationRenderer, ObserverControl, Slot};
use crate::config::SiteConfig;
use crate::consts;
use crate::dom::Node;
use crate::error::BootError;
use crate::sections::{IntersectionEntry, ObserverOptions, present_sections};
use crate::site::{Capabilities, Environment, Page, SiteCore, Wiring};

#[cfg(test)]
#[path = "browser_test.rs"]
mod browser_test;

type Shared = Rc<RefCell<SiteCore<Element>>>;

fn report(op: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::debug!("{op} failed: {err:?}");
    }
}

// =============================================================
// Element
// =============================================================

impl Node for Element {
    fn id(&self) -> String {
        Element::id(self)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        report("setAttribute", Element::set_attribute(self, name, value));
    }

    fn remove_attribute(&self, name: &str) {
        report("removeAttribute", Element::remove_attribute(self, name));
    }

    fn add_class(&self, class: &str) {
        report("classList.add", self.class_list().add_1(class));
    }

    fn remove_class(&self, class: &str) {
        report("classList.remove", self.class_list().remove_1(class));
    }

    fn toggle_class(&self, class: &str, on: bool) {
        report("classList.toggle", self.class_list().toggle_with_force(class, on).map(drop));
    }

    fn set_hidden(&self, hidden: bool) {
        if let Some(el) = self.dyn_ref::<HtmlElement>() {
            el.set_hidden(hidden);
        } else if hidden {
            Node::set_attribute(self, "hidden", "");
        } else {
            Node::remove_attribute(self, "hidden");
        }
    }

    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }
}

// =============================================================
// Storage
// =============================================================

/// `localStorage`, or nothing when the browser denies access.
struct LocalStore(Option<Storage>);

impl LocalStore {
    fn open(window: &Window) -> Self {
        match window.local_storage() {
            Ok(storage) => Self(storage),
            Err(err) => {
                log::debug!("localStorage unavailable: {err:?}");
                Self(None)
            }
        }
    }
}

impl crate::theme::ThemeStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        let storage = self.0.as_ref()?;
        match storage.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("localStorage.getItem failed: {err:?}");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = &self.0 {
            report("localStorage.setItem", storage.set_item(key, value));
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = &self.0 {
            report("localStorage.removeItem", storage.remove_item(key));
        }
    }
}

// =============================================================
// Lottie
// =============================================================

#[wasm_bindgen]
extern "C" {
    /// The global `lottie` object from lottie-web.
    type Lottie;

    #[wasm_bindgen(method, catch, js_name = loadAnimation)]
    fn load_animation(this: &Lottie, params: &JsValue) -> Result<LottieAnimation, JsValue>;

    #[derive(Clone)]
    type LottieAnimation;

    #[wasm_bindgen(method, catch, js_name = addEventListener)]
    fn add_event_listener(this: &LottieAnimation, name: &str, callback: &js_sys::Function) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = goToAndPlay)]
    fn go_to_and_play(this: &LottieAnimation, value: f64, is_frame: bool);
}

impl AnimationHandle for LottieAnimation {
    fn go_to_and_play(&self, frame: f64, is_frame: bool) {
        LottieAnimation::go_to_and_play(self, frame, is_frame);
    }
}

/// Loaded animations by container id, for attaching failure listeners.
type Loaded = Rc<RefCell<HashMap<String, LottieAnimation>>>;

struct LottieRenderer {
    lottie: Lottie,
    loaded: Loaded,
}

impl LottieRenderer {
    /// The page's `window.lottie`, when the script was included.
    fn find(window: &Window) -> Option<Self> {
        let value = js_sys::Reflect::get(window, &JsValue::from_str("lottie")).unwrap_or(JsValue::UNDEFINED);
        if value.is_falsy() {
            log::debug!("lottie renderer not present");
            return None;
        }
        Some(Self { lottie: value.unchecked_into(), loaded: Rc::default() })
    }

    fn params(container: &Element, config: &AnimationConfig) -> Result<JsValue, JsValue> {
        let json = serde_json::to_string(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let params = js_sys::JSON::parse(&json)?;
        js_sys::Reflect::set(&params, &JsValue::from_str("container"), container)?;
        Ok(params)
    }
}

impl AnimationRenderer<Element> for LottieRenderer {
    fn load(&self, container: &Element, config: &AnimationConfig) -> Option<Box<dyn AnimationHandle>> {
        let params = match Self::params(container, config) {
            Ok(params) => params,
            Err(err) => {
                log::warn!("could not build lottie params for {}: {err:?}", container.id());
                return None;
            }
        };
        let anim = match self.lottie.load_animation(&params) {
            Ok(anim) => anim,
            Err(err) => {
                log::warn!("lottie rejected {}: {err:?}", container.id());
                return None;
            }
        };
        self.loaded.borrow_mut().insert(container.id(), anim.clone());
        Some(Box::new(anim))
    }
}

// =============================================================
// Listener plumbing
// =============================================================

/// Attach `handler` for the page's lifetime.
fn listen(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) -> Result<(), BootError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn listen_passive(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) -> Result<(), BootError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    closure.forget();
    Ok(())
}

/// Observe `targets`; the observer disconnects when `handler` says so.
fn observe(
    targets: &[Element],
    options: &ObserverOptions,
    mut handler: impl FnMut(&[IntersectionEntry]) -> ObserverControl + 'static,
) -> Result<(), BootError> {
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            let entries: Vec<IntersectionEntry> = entries
                .iter()
                .map(|value| {
                    let entry: IntersectionObserverEntry = value.unchecked_into();
                    IntersectionEntry { target_id: entry.target().id(), is_intersecting: entry.is_intersecting() }
                })
                .collect();
            if handler(&entries) == ObserverControl::Disconnect {
                observer.disconnect();
            }
        },
    );
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    if let Some(margin) = &options.root_margin {
        init.set_root_margin(margin);
    }
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    for target in targets {
        observer.observe(target);
    }
    callback.forget();
    Ok(())
}

/// Run `f` against the core unless a handler is already running.
fn with_site(site: &Shared, f: impl FnOnce(&mut SiteCore<Element>)) {
    match site.try_borrow_mut() {
        Ok(mut core) => f(&mut core),
        Err(_) => log::debug!("re-entrant event dropped"),
    }
}

// =============================================================
// Boot
// =============================================================

fn elements(list: Result<NodeList, JsValue>, selector: &str) -> Vec<Element> {
    let list = match list {
        Ok(list) => list,
        Err(err) => {
            log::debug!("querySelectorAll({selector}) failed: {err:?}");
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_ref::<Element>().cloned())
        .collect()
}

fn read_config(document: &Document) -> SiteConfig {
    let Some(raw) = document.get_element_by_id(consts::CONFIG_BLOCK_ID).and_then(|el| el.text_content()) else {
        return SiteConfig::default();
    };
    SiteConfig::from_json(&raw).unwrap_or_else(|err| {
        log::warn!("ignoring site config: {err}");
        SiteConfig::default()
    })
}

fn environment(window: &Window) -> Environment {
    let prefers_reduced_motion = match window.match_media("(prefers-reduced-motion: reduce)") {
        Ok(Some(query)) => query.matches(),
        _ => false,
    };
    Environment {
        scroll_y: window.scroll_y().unwrap_or(0.0),
        prefers_reduced_motion,
        observer_available: js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false),
        current_year: js_sys::Date::new_0().get_full_year(),
    }
}

/// Find the page's elements and initialize every feature.
pub fn boot() -> Result<(), BootError> {
    let window = web_sys::window().ok_or(BootError::NoWindow)?;
    let document = window.document().ok_or(BootError::NoDocument)?;
    let cfg = read_config(&document);
    let by_id = |id: &str| document.get_element_by_id(id);

    let drawer = by_id(consts::MOBILE_DRAWER_ID);
    let drawer_links = drawer.as_ref().map(|d| elements(d.query_selector_all("a"), "a")).unwrap_or_default();
    let section_ids = present_sections(|id| by_id(id).is_some());
    let section_elements: Vec<Element> = section_ids.iter().filter_map(|id| by_id(*id)).collect();
    let contact_slot = by_id(consts::CONTACT_SLOT_ID);
    let theme_toggle = by_id(consts::THEME_TOGGLE_ID);
    let menu_toggle = by_id(consts::MENU_TOGGLE_ID);

    let page = Page {
        header: by_id(consts::HEADER_ID),
        menu_toggle: menu_toggle.clone(),
        mobile_drawer: drawer,
        theme_toggle: theme_toggle.clone(),
        theme_root: document.body().map(Element::from),
        year: by_id(consts::YEAR_ID),
        nav_links: elements(document.query_selector_all(consts::NAV_LINK_SELECTOR), consts::NAV_LINK_SELECTOR),
        sections: section_ids,
        logo_slot: by_id(consts::LOGO_SLOT_ID),
        contact_slot: contact_slot.clone(),
    };

    let renderer = LottieRenderer::find(&window);
    let loaded = renderer.as_ref().map(|r| Rc::clone(&r.loaded)).unwrap_or_default();
    let caps = Capabilities {
        store: Box::new(LocalStore::open(&window)),
        renderer: renderer.map(|r| Box::new(r) as Box<dyn AnimationRenderer<Element>>),
    };

    let (core, wiring) = SiteCore::init(page, caps, environment(&window), &cfg);
    let site: Shared = Rc::new(RefCell::new(core));
    let targets = Targets {
        window: &window,
        document: &document,
        menu_toggle,
        drawer_links,
        theme_toggle,
        section_elements,
        contact_slot,
    };
    wire(&site, &wiring, &targets, &loaded);
    log::debug!("page initialized: {wiring:?}");
    Ok(())
}

struct Targets<'a> {
    window: &'a Window,
    document: &'a Document,
    menu_toggle: Option<Element>,
    drawer_links: Vec<Element>,
    theme_toggle: Option<Element>,
    section_elements: Vec<Element>,
    contact_slot: Option<Element>,
}

/// A registration step for one feature.
type Step<'a> = (&'static str, Box<dyn FnOnce() -> Result<(), BootError> + 'a>);

/// Run every step in order. A failed step is logged and skipped so one
/// feature never takes the others down with it. Returns the failed names.
fn run_steps(steps: Vec<Step<'_>>) -> Vec<&'static str> {
    let mut failed = Vec::new();
    for (feature, step) in steps {
        if let Err(err) = step() {
            log::warn!("{feature} disabled: {err}");
            failed.push(feature);
        }
    }
    failed
}

fn wire(site: &Shared, wiring: &Wiring, targets: &Targets<'_>, loaded: &Loaded) {
    let mut steps: Vec<Step<'_>> = Vec::new();
    if wiring.scroll {
        steps.push(("header", Box::new(|| wire_scroll(site, targets))));
    }
    if wiring.menu {
        steps.push(("menu", Box::new(|| wire_menu(site, targets))));
    }
    if let Some(options) = &wiring.section_observer {
        steps.push(("section tracking", Box::new(move || wire_sections(site, targets, options))));
    }
    if wiring.theme_toggle {
        steps.push(("theme toggle", Box::new(|| wire_theme(site, targets))));
    }
    for &slot in &wiring.animations.failure_listeners {
        steps.push(("animation fallback", Box::new(move || wire_failure(site, loaded, slot))));
    }
    if let Some(options) = &wiring.animations.contact_observer {
        steps.push(("contact animation", Box::new(move || wire_contact_observer(site, targets, options))));
    }
    if wiring.animations.contact_hover {
        steps.push(("contact hover", Box::new(|| wire_contact_hover(site, targets))));
    }
    run_steps(steps);
}

fn wire_scroll(site: &Shared, targets: &Targets<'_>) -> Result<(), BootError> {
    let s = Rc::clone(site);
    let window = targets.window.clone();
    listen_passive(targets.window, "scroll", move |_| {
        let y = window.scroll_y().unwrap_or(0.0);
        with_site(&s, |core| core.on_scroll(y));
    })
}

fn wire_menu(site: &Shared, targets: &Targets<'_>) -> Result<(), BootError> {
    if let Some(toggle) = &targets.menu_toggle {
        let s = Rc::clone(site);
        listen(toggle, "click", move |_| with_site(&s, |core| core.on_menu_toggle_click()))?;
    }
    for link in &targets.drawer_links {
        let s = Rc::clone(site);
        listen(link, "click", move |_| with_site(&s, |core| core.on_drawer_link_click()))?;
    }
    let s = Rc::clone(site);
    listen(targets.document, "keydown", move |event| {
        if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
            with_site(&s, |core| core.on_key_down(&key));
        }
    })?;
    let s = Rc::clone(site);
    let window = targets.window.clone();
    listen(targets.window, "resize", move |_| {
        let width = window.inner_width().map_or(0.0, |w| w.as_f64().unwrap_or(0.0));
        with_site(&s, |core| core.on_resize(width));
    })
}

fn wire_sections(site: &Shared, targets: &Targets<'_>, options: &ObserverOptions) -> Result<(), BootError> {
    let s = Rc::clone(site);
    observe(&targets.section_elements, options, move |entries| {
        with_site(&s, |core| core.on_section_intersections(entries));
        ObserverControl::Keep
    })
}

fn wire_theme(site: &Shared, targets: &Targets<'_>) -> Result<(), BootError> {
    let Some(toggle) = &targets.theme_toggle else {
        return Ok(());
    };
    let s = Rc::clone(site);
    listen(toggle, "click", move |_| with_site(&s, |core| core.on_theme_toggle_click()))
}

fn wire_failure(site: &Shared, loaded: &Loaded, slot: Slot) -> Result<(), BootError> {
    let Some(anim) = loaded.borrow().get(slot.container_id()).cloned() else {
        return Ok(());
    };
    let s = Rc::clone(site);
    let callback = Closure::<dyn FnMut()>::new(move || with_site(&s, |core| core.on_animation_failed(slot)));
    anim.add_event_listener(consts::DATA_FAILED_EVENT, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

fn wire_contact_observer(site: &Shared, targets: &Targets<'_>, options: &ObserverOptions) -> Result<(), BootError> {
    let Some(contact) = &targets.contact_slot else {
        return Ok(());
    };
    let s = Rc::clone(site);
    observe(std::slice::from_ref(contact), options, move |entries| {
        let mut control = ObserverControl::Disconnect;
        with_site(&s, |core| control = core.on_contact_intersections(entries));
        control
    })
}

fn wire_contact_hover(site: &Shared, targets: &Targets<'_>) -> Result<(), BootError> {
    let Some(contact) = &targets.contact_slot else {
        return Ok(());
    };
    let s = Rc::clone(site);
    listen(contact, "mouseenter", move |_| with_site(&s, |core| core.on_contact_hover()))
}

/// Debug builds log capability degradation; release builds stay quiet.
fn log_level() -> log::Level {
    if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info }
}

/// Entry point run when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log_level()) {
        web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
    }
    if let Err(err) = boot() {
        log::warn!("page enhancements disabled: {err}");
    }
}
