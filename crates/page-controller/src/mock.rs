//! Mock document for testing without a browser
//!
//! [`MockDocument`] keeps a flat list of nodes, the registered listeners,
//! a virtual clock with pending timers and the active intersection
//! observers. Tests drive it by dispatching events, advancing the clock and
//! reporting intersections, then inspect the resulting node state.

use crate::dom::{
    Document, Element, EventKind, IntersectionCallback, IntersectionEntry, Listener,
    ListenerEvent, ReadyState, ScrollOptions, Selector, Task, Unobserve,
};
use crate::error::ControllerResult;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Builder for an element placed into a [`MockDocument`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MockNode {
    tag: String,
    attributes: HashMap<String, String>,
    classes: Vec<String>,
    value: String,
    text: String,
}

impl MockNode {
    /// Creates a node with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Sets the id attribute
    #[must_use]
    pub fn with_id(self, id: &str) -> Self {
        self.with_attr("id", id)
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Sets the form control value
    #[must_use]
    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }
}

#[derive(Debug)]
struct NodeData {
    node: MockNode,
    style: HashMap<String, String>,
    connected: bool,
}

impl NodeData {
    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Class(name) => self.node.classes.iter().any(|c| c == name),
            Selector::TagWithAttr { tag, attr } => {
                self.node.tag.eq_ignore_ascii_case(tag) && self.node.attributes.contains_key(attr)
            }
            Selector::TagWithAttrPrefix { tag, attr, prefix } => {
                self.node.tag.eq_ignore_ascii_case(tag)
                    && self
                        .node
                        .attributes
                        .get(attr)
                        .is_some_and(|v| v.starts_with(prefix.as_str()))
            }
        }
    }
}

struct ListenerSlot {
    node: usize,
    kind: EventKind,
    listener: Rc<RefCell<Listener>>,
}

struct PendingTimer {
    due_ms: u64,
    seq: u64,
    task: Task,
}

struct ObserverSlot {
    targets: Vec<usize>,
    callback: Rc<RefCell<IntersectionCallback<MockElement>>>,
}

#[derive(Default)]
struct MockState {
    nodes: Vec<NodeData>,
    body: Vec<usize>,
    listeners: Vec<ListenerSlot>,
    now_ms: u64,
    next_seq: u64,
    timers: Vec<PendingTimer>,
    observers: Vec<ObserverSlot>,
    navigations: Vec<String>,
    scrolls: Vec<(usize, ScrollOptions)>,
    focused: Option<usize>,
    ready_state: ReadyState,
    content_loaded: Vec<Task>,
}

impl MockState {
    fn node(&self, index: usize) -> &NodeData {
        &self.nodes[index]
    }

    fn node_mut(&mut self, index: usize) -> &mut NodeData {
        &mut self.nodes[index]
    }
}

/// In-memory document implementing [`Document`]
#[derive(Clone, Default)]
pub struct MockDocument {
    state: Rc<RefCell<MockState>>,
}

impl fmt::Debug for MockDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MockDocument")
            .field("nodes", &state.nodes.len())
            .field("listeners", &state.listeners.len())
            .field("now_ms", &state.now_ms)
            .field("pending_timers", &state.timers.len())
            .field("observers", &state.observers.len())
            .field("ready_state", &state.ready_state)
            .finish()
    }
}

impl MockDocument {
    /// Creates an empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document with the full site markup: menu, both search
    /// panels, spinner, three video cards, category links, an anchor and
    /// two lazy images
    #[must_use]
    pub fn site() -> Self {
        let doc = Self::new();

        doc.append(MockNode::new("button").with_id("mobile-menu-button"));
        doc.append(MockNode::new("nav").with_id("mobile-menu").with_class("hidden"));

        doc.append(MockNode::new("form").with_id("search-form"));
        doc.append(MockNode::new("input").with_id("search-input"));

        doc.append(MockNode::new("button").with_id("mobile-search-btn"));
        doc.append(MockNode::new("div").with_id("mobile-search").with_class("hidden"));
        doc.append(MockNode::new("form").with_id("mobile-search-form"));
        doc.append(MockNode::new("input").with_id("mobile-search-input"));

        doc.append(
            MockNode::new("div")
                .with_id("loading-spinner")
                .with_class("hidden"),
        );

        for (id, category) in [("card-1", "music"), ("card-2", "sports"), ("card-3", "music")] {
            doc.append(
                MockNode::new("div")
                    .with_id(id)
                    .with_class("video-card")
                    .with_attr("data-category", category),
            );
        }

        for category in ["all", "music", "sports"] {
            doc.append(
                MockNode::new("a")
                    .with_id(&format!("category-{category}"))
                    .with_class("category-link")
                    .with_attr("href", &format!("/category/{category}/"))
                    .with_attr("data-category", category),
            );
        }

        doc.append(
            MockNode::new("a")
                .with_id("jump-latest")
                .with_attr("href", "#latest"),
        );
        doc.append(MockNode::new("section").with_id("latest"));

        for (id, src) in [("thumb-1", "/media/t1.jpg"), ("thumb-2", "/media/t2.jpg")] {
            doc.append(
                MockNode::new("img")
                    .with_id(id)
                    .with_class("lazy")
                    .with_attr("data-src", src),
            );
        }

        doc
    }

    /// Puts the document back into the parsing phase
    #[must_use]
    pub fn loading(self) -> Self {
        self.state.borrow_mut().ready_state = ReadyState::Loading;
        self
    }

    /// Ends the parsing phase and runs content-loaded tasks in registration order
    ///
    /// Does nothing once the document has left the parsing phase.
    pub fn finish_parsing(&self) {
        let tasks = {
            let mut state = self.state.borrow_mut();
            if !state.ready_state.is_loading() {
                return;
            }
            state.ready_state = ReadyState::Interactive;
            std::mem::take(&mut state.content_loaded)
        };
        for task in tasks {
            task();
        }
    }

    /// Inserts a connected node and returns its handle
    pub fn append(&self, node: MockNode) -> MockElement {
        let index = self.push(node, true);
        self.handle(index)
    }

    fn push(&self, node: MockNode, connected: bool) -> usize {
        let mut state = self.state.borrow_mut();
        state.nodes.push(NodeData {
            node,
            style: HashMap::new(),
            connected,
        });
        state.nodes.len() - 1
    }

    fn handle(&self, index: usize) -> MockElement {
        MockElement {
            state: Rc::clone(&self.state),
            index,
        }
    }

    /// Dispatches an event to every listener registered for it on `target`,
    /// in registration order, and returns the event afterwards
    pub fn dispatch(&self, target: &MockElement, kind: EventKind) -> ListenerEvent {
        let listeners: Vec<Rc<RefCell<Listener>>> = self
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|slot| slot.node == target.index && slot.kind == kind)
            .map(|slot| Rc::clone(&slot.listener))
            .collect();

        let mut event = ListenerEvent::new(kind);
        for listener in listeners {
            (listener.borrow_mut())(&mut event);
        }
        event
    }

    /// Clicks `target`, returning whether the default action was suppressed
    pub fn click(&self, target: &MockElement) -> bool {
        self.dispatch(target, EventKind::Click).is_default_prevented()
    }

    /// Submits the form `target`, returning whether the default action was suppressed
    pub fn submit(&self, target: &MockElement) -> bool {
        self.dispatch(target, EventKind::Submit).is_default_prevented()
    }

    /// Number of listeners registered on `target` for `kind`
    #[must_use]
    pub fn listener_count(&self, target: &MockElement, kind: EventKind) -> usize {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|slot| slot.node == target.index && slot.kind == kind)
            .count()
    }

    /// Virtual time in milliseconds
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }

    /// Number of timers not yet fired
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Advances the virtual clock, firing due timers in due order
    ///
    /// Timers with equal due time fire in scheduling order. Timers scheduled
    /// by a firing task run in the same call when they fall due in the window.
    pub fn advance(&self, ms: u64) {
        let target = self.now_ms().saturating_add(ms);
        loop {
            let task = {
                let mut state = self.state.borrow_mut();
                let next = state
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due_ms <= target)
                    .min_by_key(|(_, timer)| (timer.due_ms, timer.seq))
                    .map(|(position, _)| position);
                match next {
                    Some(position) => {
                        let timer = state.timers.remove(position);
                        state.now_ms = timer.due_ms;
                        timer.task
                    }
                    None => break,
                }
            };
            task();
        }
        self.state.borrow_mut().now_ms = target;
    }

    /// Reports an intersection change for `target` to every observer watching it
    pub fn set_intersecting(&self, target: &MockElement, is_intersecting: bool) {
        let watching: Vec<(usize, Rc<RefCell<IntersectionCallback<MockElement>>>)> = self
            .state
            .borrow()
            .observers
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.targets.contains(&target.index))
            .map(|(observer, slot)| (observer, Rc::clone(&slot.callback)))
            .collect();

        for (observer, callback) in watching {
            let entries = [IntersectionEntry {
                target: target.clone(),
                is_intersecting,
            }];
            let unobserve = MockUnobserve {
                state: Rc::clone(&self.state),
                observer,
            };
            (callback.borrow_mut())(&entries, &unobserve);
        }
    }

    /// Whether any observer is watching `target`
    #[must_use]
    pub fn is_observed(&self, target: &MockElement) -> bool {
        self.state
            .borrow()
            .observers
            .iter()
            .any(|slot| slot.targets.contains(&target.index))
    }

    /// URLs navigated to, oldest first
    #[must_use]
    pub fn navigations(&self) -> Vec<String> {
        self.state.borrow().navigations.clone()
    }

    /// Elements scrolled into view with their options, oldest first
    #[must_use]
    pub fn scrolls(&self) -> Vec<(MockElement, ScrollOptions)> {
        let records: Vec<(usize, ScrollOptions)> = self.state.borrow().scrolls.clone();
        records
            .into_iter()
            .map(|(index, options)| (self.handle(index), options))
            .collect()
    }

    /// Currently focused element
    #[must_use]
    pub fn focused(&self) -> Option<MockElement> {
        let focused = self.state.borrow().focused;
        focused.map(|index| self.handle(index))
    }

    /// Connected children appended to the body, in insertion order
    #[must_use]
    pub fn body_children(&self) -> Vec<MockElement> {
        let body: Vec<usize> = self.state.borrow().body.clone();
        body.into_iter().map(|index| self.handle(index)).collect()
    }
}

impl Document for MockDocument {
    type Element = MockElement;

    fn element_by_id(&self, id: &str) -> Option<MockElement> {
        let index = self.state.borrow().nodes.iter().position(|data| {
            data.connected && data.node.attributes.get("id").is_some_and(|v| v == id)
        });
        index.map(|index| self.handle(index))
    }

    fn query_all(&self, selector: &Selector) -> Vec<MockElement> {
        let indices: Vec<usize> = self
            .state
            .borrow()
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, data)| data.connected && data.matches(selector))
            .map(|(index, _)| index)
            .collect();
        indices.into_iter().map(|index| self.handle(index)).collect()
    }

    fn create_element(&self, tag: &str) -> ControllerResult<MockElement> {
        let index = self.push(MockNode::new(tag), false);
        Ok(self.handle(index))
    }

    fn append_to_body(&self, element: &MockElement) -> ControllerResult<()> {
        let mut state = self.state.borrow_mut();
        state.body.retain(|&index| index != element.index);
        state.body.push(element.index);
        state.node_mut(element.index).connected = true;
        Ok(())
    }

    fn listen(
        &self,
        target: &MockElement,
        kind: EventKind,
        listener: Listener,
    ) -> ControllerResult<()> {
        self.state.borrow_mut().listeners.push(ListenerSlot {
            node: target.index,
            kind,
            listener: Rc::new(RefCell::new(listener)),
        });
        Ok(())
    }

    fn set_timeout(&self, delay: Duration, task: Task) -> ControllerResult<()> {
        let mut state = self.state.borrow_mut();
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        let due_ms = state.now_ms.saturating_add(delay_ms);
        let seq = state.next_seq;
        state.next_seq += 1;
        state.timers.push(PendingTimer { due_ms, seq, task });
        Ok(())
    }

    fn observe_intersections(
        &self,
        targets: &[MockElement],
        callback: IntersectionCallback<MockElement>,
    ) -> ControllerResult<()> {
        self.state.borrow_mut().observers.push(ObserverSlot {
            targets: targets.iter().map(|t| t.index).collect(),
            callback: Rc::new(RefCell::new(callback)),
        });
        Ok(())
    }

    fn navigate(&self, url: &str) -> ControllerResult<()> {
        self.state.borrow_mut().navigations.push(url.to_string());
        Ok(())
    }

    fn ready_state(&self) -> ReadyState {
        self.state.borrow().ready_state
    }

    fn on_content_loaded(&self, task: Task) -> ControllerResult<()> {
        self.state.borrow_mut().content_loaded.push(task);
        Ok(())
    }
}

struct MockUnobserve {
    state: Rc<RefCell<MockState>>,
    observer: usize,
}

impl Unobserve<MockElement> for MockUnobserve {
    fn unobserve(&self, target: &MockElement) {
        if let Some(slot) = self.state.borrow_mut().observers.get_mut(self.observer) {
            slot.targets.retain(|&index| index != target.index);
        }
    }
}

/// Handle to a node of a [`MockDocument`]
#[derive(Clone)]
pub struct MockElement {
    state: Rc<RefCell<MockState>>,
    index: usize,
}

impl PartialEq for MockElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state) && self.index == other.index
    }
}

impl Eq for MockElement {}

impl fmt::Debug for MockElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        let data = state.node(self.index);
        f.debug_struct("MockElement")
            .field("index", &self.index)
            .field("tag", &data.node.tag)
            .field("id", &data.node.attributes.get("id"))
            .finish()
    }
}

impl MockElement {
    /// Tag name
    #[must_use]
    pub fn tag(&self) -> String {
        self.state.borrow().node(self.index).node.tag.clone()
    }

    /// Classes in insertion order
    #[must_use]
    pub fn classes(&self) -> Vec<String> {
        self.state.borrow().node(self.index).node.classes.clone()
    }

    /// Class attribute text
    #[must_use]
    pub fn class_name(&self) -> String {
        self.classes().join(" ")
    }

    /// Inline style property
    #[must_use]
    pub fn style(&self, property: &str) -> Option<String> {
        self.state
            .borrow()
            .node(self.index)
            .style
            .get(property)
            .cloned()
    }

    /// Text content
    #[must_use]
    pub fn text(&self) -> String {
        self.state.borrow().node(self.index).node.text.clone()
    }

    /// Simulates the user typing into a form control
    pub fn set_value(&self, value: &str) {
        self.state.borrow_mut().node_mut(self.index).node.value = value.to_string();
    }

    /// Whether the node is part of the document
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state.borrow().node(self.index).connected
    }
}

impl Element for MockElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.state
            .borrow()
            .node(self.index)
            .node
            .attributes
            .get(name)
            .cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) -> ControllerResult<()> {
        self.state
            .borrow_mut()
            .node_mut(self.index)
            .node
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn has_class(&self, class: &str) -> bool {
        self.state
            .borrow()
            .node(self.index)
            .node
            .classes
            .iter()
            .any(|c| c == class)
    }

    fn add_class(&self, class: &str) -> ControllerResult<()> {
        let mut state = self.state.borrow_mut();
        let classes = &mut state.node_mut(self.index).node.classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&self, class: &str) -> ControllerResult<()> {
        self.state
            .borrow_mut()
            .node_mut(self.index)
            .node
            .classes
            .retain(|c| c != class);
        Ok(())
    }

    fn toggle_class(&self, class: &str) -> ControllerResult<bool> {
        if self.has_class(class) {
            self.remove_class(class)?;
            Ok(false)
        } else {
            self.add_class(class)?;
            Ok(true)
        }
    }

    fn set_style(&self, property: &str, value: &str) -> ControllerResult<()> {
        self.state
            .borrow_mut()
            .node_mut(self.index)
            .style
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    fn value(&self) -> String {
        self.state.borrow().node(self.index).node.value.clone()
    }

    fn set_text(&self, text: &str) {
        self.state.borrow_mut().node_mut(self.index).node.text = text.to_string();
    }

    fn focus(&self) -> ControllerResult<()> {
        self.state.borrow_mut().focused = Some(self.index);
        Ok(())
    }

    fn scroll_into_view(&self, options: ScrollOptions) {
        self.state.borrow_mut().scrolls.push((self.index, options));
    }

    fn remove(&self) {
        let mut state = self.state.borrow_mut();
        state.body.retain(|&index| index != self.index);
        state.node_mut(self.index).connected = false;
        if state.focused == Some(self.index) {
            state.focused = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_mock_node_builder() {
        let doc = MockDocument::new();
        let el = doc.append(
            MockNode::new("DIV")
                .with_id("box")
                .with_class("a")
                .with_class("a")
                .with_class("b")
                .with_attr("data-x", "1")
                .with_text("hello"),
        );
        assert_eq!(el.tag(), "div");
        assert_eq!(el.classes(), vec!["a", "b"]);
        assert_eq!(el.attribute("data-x").as_deref(), Some("1"));
        assert_eq!(el.text(), "hello");
        assert!(el.is_connected());
    }

    #[test]
    fn test_element_by_id() {
        let doc = MockDocument::site();
        assert!(doc.element_by_id("mobile-menu").is_some());
        assert!(doc.element_by_id("nope").is_none());
    }

    #[test]
    fn test_query_all_by_class_in_document_order() {
        let doc = MockDocument::site();
        let cards = doc.query_all(&Selector::class("video-card"));
        let ids: Vec<String> = cards.iter().filter_map(|c| c.attribute("id")).collect();
        assert_eq!(ids, vec!["card-1", "card-2", "card-3"]);
    }

    #[test]
    fn test_query_all_by_attr_prefix() {
        let doc = MockDocument::site();
        let anchors = doc.query_all(&Selector::tag_with_attr_prefix("a", "href", "#"));
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].attribute("id").as_deref(), Some("jump-latest"));
    }

    #[test]
    fn test_query_all_by_attr() {
        let doc = MockDocument::site();
        assert_eq!(doc.query_all(&Selector::tag_with_attr("img", "data-src")).len(), 2);
        assert!(doc.query_all(&Selector::tag_with_attr("video", "data-src")).is_empty());
    }

    #[test]
    fn test_class_operations() {
        let doc = MockDocument::new();
        let el = doc.append(MockNode::new("div"));
        el.add_class("x").unwrap();
        el.add_class("x").unwrap();
        assert_eq!(el.classes(), vec!["x"]);
        assert!(!el.toggle_class("x").unwrap());
        assert!(el.toggle_class("x").unwrap());
        el.remove_class("x").unwrap();
        el.remove_class("x").unwrap();
        assert!(!el.has_class("x"));
    }

    #[test]
    fn test_dispatch_runs_listeners_in_order() {
        let doc = MockDocument::new();
        let button = doc.append(MockNode::new("button"));
        let log = Rc::new(RefCell::new(Vec::new()));

        for n in 1..=2 {
            let log = Rc::clone(&log);
            doc.listen(
                &button,
                EventKind::Click,
                Box::new(move |_event| log.borrow_mut().push(n)),
            )
            .unwrap();
        }

        assert_eq!(doc.listener_count(&button, EventKind::Click), 2);
        assert!(!doc.click(&button));
        assert_eq!(*log.borrow(), vec![1, 2]);
        assert!(!doc.submit(&button));
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_dispatch_reports_prevent_default() {
        let doc = MockDocument::new();
        let form = doc.append(MockNode::new("form"));
        doc.listen(
            &form,
            EventKind::Submit,
            Box::new(|event: &mut ListenerEvent| event.prevent_default()),
        )
        .unwrap();
        assert!(doc.submit(&form));
    }

    #[test]
    fn test_listener_may_touch_document() {
        let doc = MockDocument::new();
        let button = doc.append(MockNode::new("button"));
        let inner = doc.clone();
        let target = button.clone();
        doc.listen(
            &button,
            EventKind::Click,
            Box::new(move |_event| {
                let _ = target.toggle_class("on");
                let _ = inner.navigate("/next");
            }),
        )
        .unwrap();
        doc.click(&button);
        assert!(button.has_class("on"));
        assert_eq!(doc.navigations(), vec!["/next"]);
    }

    #[test]
    fn test_timers_fire_in_due_order() {
        let doc = MockDocument::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for (delay, label) in [(300, "c"), (100, "a"), (100, "b")] {
            let log = Rc::clone(&log);
            doc.set_timeout(
                Duration::from_millis(delay),
                Box::new(move || log.borrow_mut().push(label)),
            )
            .unwrap();
        }

        doc.advance(99);
        assert!(log.borrow().is_empty());
        doc.advance(1);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        assert_eq!(doc.pending_timers(), 1);
        doc.advance(500);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(doc.now_ms(), 600);
    }

    #[test]
    fn test_content_loaded_fires_once() {
        let doc = MockDocument::new().loading();
        assert_eq!(doc.ready_state(), ReadyState::Loading);

        let fired = Rc::new(Cell::new(0));
        for _ in 0..2 {
            let counter = Rc::clone(&fired);
            doc.on_content_loaded(Box::new(move || counter.set(counter.get() + 1)))
                .unwrap();
        }
        assert_eq!(fired.get(), 0);

        doc.finish_parsing();
        assert_eq!(fired.get(), 2);
        assert_eq!(doc.ready_state(), ReadyState::Interactive);

        doc.finish_parsing();
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn test_new_document_is_parsed() {
        assert_eq!(MockDocument::new().ready_state(), ReadyState::Complete);
        assert_eq!(MockDocument::site().ready_state(), ReadyState::Complete);
    }

    #[test]
    fn test_timer_scheduled_by_timer() {
        let doc = MockDocument::new();
        let fired = Rc::new(Cell::new(0u64));
        let inner = doc.clone();
        let seen = Rc::clone(&fired);
        doc.set_timeout(
            Duration::from_millis(10),
            Box::new(move || {
                let clock = inner.clone();
                let _ = inner.set_timeout(
                    Duration::from_millis(10),
                    Box::new(move || seen.set(clock.now_ms())),
                );
            }),
        )
        .unwrap();
        doc.advance(25);
        assert_eq!(fired.get(), 20);
    }

    #[test]
    fn test_intersection_and_unobserve() {
        let doc = MockDocument::new();
        let img = doc.append(MockNode::new("img"));
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        doc.observe_intersections(
            std::slice::from_ref(&img),
            Box::new(
                move |entries: &[IntersectionEntry<MockElement>],
                      observer: &dyn Unobserve<MockElement>| {
                    for entry in entries {
                        counter.set(counter.get() + 1);
                        observer.unobserve(&entry.target);
                    }
                },
            ),
        )
        .unwrap();

        assert!(doc.is_observed(&img));
        doc.set_intersecting(&img, true);
        assert!(!doc.is_observed(&img));
        doc.set_intersecting(&img, true);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_create_append_remove() {
        let doc = MockDocument::new();
        let el = doc.create_element("div").unwrap();
        el.set_attribute("id", "fresh").unwrap();
        assert!(!el.is_connected());
        assert!(doc.element_by_id("fresh").is_none());

        doc.append_to_body(&el).unwrap();
        assert_eq!(doc.body_children(), vec![el.clone()]);
        assert!(doc.element_by_id("fresh").is_some());

        el.remove();
        assert!(doc.body_children().is_empty());
        assert!(doc.element_by_id("fresh").is_none());
    }

    #[test]
    fn test_focus_and_scroll_records() {
        let doc = MockDocument::new();
        let input = doc.append(MockNode::new("input").with_value("x"));
        assert_eq!(input.value(), "x");
        input.focus().unwrap();
        assert_eq!(doc.focused(), Some(input.clone()));
        input.scroll_into_view(ScrollOptions::SMOOTH_START);
        assert_eq!(doc.scrolls(), vec![(input, ScrollOptions::SMOOTH_START)]);
    }

    #[test]
    fn test_debug_output() {
        let doc = MockDocument::site();
        assert!(format!("{doc:?}").contains("MockDocument"));
        let el = doc.element_by_id("mobile-menu").unwrap();
        assert!(format!("{el:?}").contains("mobile-menu"));
    }
}
