//! In-memory stand-ins for the browser, shared by unit tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use crate::animation::{AnimationConfig, AnimationHandle, AnimationRenderer};
use crate::dom::Node;
use crate::theme::ThemeStore;

#[derive(Debug, Default)]
pub struct NodeState {
    pub id: String,
    pub attrs: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
    pub hidden: bool,
    pub text: String,
}

/// Cloneable element handle; clones share state like real DOM references.
#[derive(Debug, Clone, Default)]
pub struct FakeNode(pub Rc<RefCell<NodeState>>);

impl FakeNode {
    pub fn new(id: &str) -> Self {
        let node = Self::default();
        node.0.borrow_mut().id = id.to_string();
        node
    }

    pub fn link(href: &str) -> Self {
        let node = Self::default();
        node.0.borrow_mut().attrs.insert("href".into(), href.into());
        node
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.contains(class)
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.0.borrow().attrs.get(name).cloned()
    }

    pub fn is_hidden(&self) -> bool {
        self.0.borrow().hidden
    }

    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }
}

impl Node for FakeNode {
    fn id(&self) -> String {
        self.0.borrow().id.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attr(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0.borrow_mut().attrs.insert(name.into(), value.into());
    }

    fn remove_attribute(&self, name: &str) {
        self.0.borrow_mut().attrs.remove(name);
    }

    fn add_class(&self, class: &str) {
        self.0.borrow_mut().classes.insert(class.into());
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.remove(class);
    }

    fn set_hidden(&self, hidden: bool) {
        self.0.borrow_mut().hidden = hidden;
    }

    fn set_text(&self, text: &str) {
        self.0.borrow_mut().text = text.into();
    }
}

/// `localStorage` substitute. Clones share one map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore(pub Rc<RefCell<HashMap<String, String>>>);

impl MemoryStore {
    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.0.borrow_mut().insert(key.into(), value.into());
        store
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }
}

impl ThemeStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.value(key)
    }

    fn set(&self, key: &str, value: &str) {
        self.0.borrow_mut().insert(key.into(), value.into());
    }

    fn remove(&self, key: &str) {
        self.0.borrow_mut().remove(key);
    }
}

/// One observable call made against the fake renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum RendererCall {
    Load { container: String, config: AnimationConfig },
    Play { container: String, frame: f64, is_frame: bool },
}

/// Records every load and playback call in arrival order.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer(pub Rc<RefCell<Vec<RendererCall>>>);

impl RecordingRenderer {
    pub fn calls(&self) -> Vec<RendererCall> {
        self.0.borrow().clone()
    }

    pub fn loads(&self) -> usize {
        self.0.borrow().iter().filter(|c| matches!(c, RendererCall::Load { .. })).count()
    }

    pub fn plays_of(&self, container: &str) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|c| matches!(c, RendererCall::Play { container: id, .. } if id == container))
            .count()
    }
}

struct RecordingHandle {
    container: String,
    log: Rc<RefCell<Vec<RendererCall>>>,
}

impl AnimationHandle for RecordingHandle {
    fn go_to_and_play(&self, frame: f64, is_frame: bool) {
        self.log.borrow_mut().push(RendererCall::Play { container: self.container.clone(), frame, is_frame });
    }
}

impl AnimationRenderer<FakeNode> for RecordingRenderer {
    fn load(&self, container: &FakeNode, config: &AnimationConfig) -> Option<Box<dyn AnimationHandle>> {
        let id = container.id();
        self.0.borrow_mut().push(RendererCall::Load { container: id.clone(), config: config.clone() });
        Some(Box::new(RecordingHandle { container: id, log: Rc::clone(&self.0) }))
    }
}

/// Renderer that rejects loads into the listed containers.
#[derive(Debug, Clone, Default)]
pub struct RefusingRenderer {
    pub inner: RecordingRenderer,
    pub refuse: Vec<String>,
}

impl AnimationRenderer<FakeNode> for RefusingRenderer {
    fn load(&self, container: &FakeNode, config: &AnimationConfig) -> Option<Box<dyn AnimationHandle>> {
        if self.refuse.contains(&container.id()) {
            return None;
        }
        self.inner.load(container, config)
    }
}
