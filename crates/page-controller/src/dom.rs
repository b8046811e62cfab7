//! Host document abstraction
//!
//! The controller never talks to a concrete DOM API. It works against the
//! [`Element`] and [`Document`] traits, implemented by the in-memory
//! [`MockDocument`](crate::mock::MockDocument) for tests and by the `web-sys`
//! backend in the browser.

use crate::error::ControllerResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// DOM events the controller listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer click
    Click,
    /// Form submission
    Submit,
    /// Pointer entered the element
    MouseEnter,
    /// Pointer left the element
    MouseLeave,
}

impl EventKind {
    /// DOM event type name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Submit => "submit",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event as seen by a listener
///
/// Listeners only need to know which event fired and whether to suppress the
/// default action; backends translate `default_prevented` back into the host
/// event after the listener returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerEvent {
    kind: EventKind,
    default_prevented: bool,
}

impl ListenerEvent {
    /// Create an event of the given kind
    #[must_use]
    pub const fn new(kind: EventKind) -> Self {
        Self {
            kind,
            default_prevented: false,
        }
    }

    /// Event kind
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// Suppress the host's default action (navigation, form submit)
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a listener suppressed the default action
    #[must_use]
    pub const fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Event listener callback
pub type Listener = Box<dyn FnMut(&mut ListenerEvent)>;

/// Deferred one-shot task
pub type Task = Box<dyn FnOnce()>;

/// Element query understood by every backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Elements carrying a class (`.name`)
    Class(String),
    /// Elements of a tag carrying an attribute (`tag[attr]`)
    TagWithAttr {
        /// Tag name
        tag: String,
        /// Attribute name
        attr: String,
    },
    /// Elements of a tag whose attribute starts with a prefix (`tag[attr^="prefix"]`)
    TagWithAttrPrefix {
        /// Tag name
        tag: String,
        /// Attribute name
        attr: String,
        /// Required value prefix
        prefix: String,
    },
}

impl Selector {
    /// Match by class
    #[must_use]
    pub fn class(name: &str) -> Self {
        Self::Class(name.to_string())
    }

    /// Match by tag and attribute presence
    #[must_use]
    pub fn tag_with_attr(tag: &str, attr: &str) -> Self {
        Self::TagWithAttr {
            tag: tag.to_string(),
            attr: attr.to_string(),
        }
    }

    /// Match by tag and attribute value prefix
    #[must_use]
    pub fn tag_with_attr_prefix(tag: &str, attr: &str, prefix: &str) -> Self {
        Self::TagWithAttrPrefix {
            tag: tag.to_string(),
            attr: attr.to_string(),
            prefix: prefix.to_string(),
        }
    }

    /// CSS selector text
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Class(name) => format!(".{name}"),
            Self::TagWithAttr { tag, attr } => format!("{tag}[{attr}]"),
            Self::TagWithAttrPrefix { tag, attr, prefix } => {
                let escaped = prefix.replace('\\', "\\\\").replace('"', "\\\"");
                format!("{tag}[{attr}^=\"{escaped}\"]")
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Scroll animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    /// Jump immediately
    #[default]
    Auto,
    /// Animate the scroll
    Smooth,
}

/// Vertical alignment of a scrolled element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBlock {
    /// Top edge to viewport top
    #[default]
    Start,
    /// Centered
    Center,
    /// Bottom edge to viewport bottom
    End,
    /// Minimal movement
    Nearest,
}

/// Options for [`Element::scroll_into_view`]; defaults to a smooth scroll
/// aligned to the top edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollOptions {
    /// Animation
    pub behavior: ScrollBehavior,
    /// Alignment
    pub block: ScrollBlock,
}

impl ScrollOptions {
    /// Smooth scroll, top edge aligned to the viewport top
    pub const SMOOTH_START: Self = Self {
        behavior: ScrollBehavior::Smooth,
        block: ScrollBlock::Start,
    };
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self::SMOOTH_START
    }
}

/// Parsing phase of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyState {
    /// Still parsing; content-loaded has not fired
    Loading,
    /// Parsed, subresources may still be loading
    Interactive,
    /// Fully loaded
    #[default]
    Complete,
}

impl ReadyState {
    /// Maps a `document.readyState` string; unknown values count as complete
    #[must_use]
    pub fn from_host(state: &str) -> Self {
        match state {
            "loading" => Self::Loading,
            "interactive" => Self::Interactive,
            _ => Self::Complete,
        }
    }

    /// Whether the structure is not yet available
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// One viewport intersection report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionEntry<E> {
    /// Observed element
    pub target: E,
    /// Whether any part of it is inside the viewport
    pub is_intersecting: bool,
}

/// Handle passed to intersection callbacks to stop observing a target
pub trait Unobserve<E> {
    /// Stop reporting intersections for `target`
    fn unobserve(&self, target: &E);
}

/// Intersection observer callback
pub type IntersectionCallback<E> = Box<dyn FnMut(&[IntersectionEntry<E>], &dyn Unobserve<E>)>;

/// Element handle capability
///
/// Handles are cheap to clone and refer to the same underlying node.
pub trait Element: Clone + 'static {
    /// Attribute value, if present
    fn attribute(&self, name: &str) -> Option<String>;

    /// Set an attribute
    ///
    /// # Errors
    ///
    /// Returns error if the host rejects the attribute
    fn set_attribute(&self, name: &str, value: &str) -> ControllerResult<()>;

    /// Whether the element carries a class
    fn has_class(&self, class: &str) -> bool;

    /// Add a class (no-op if present)
    ///
    /// # Errors
    ///
    /// Returns error if the host rejects the class token
    fn add_class(&self, class: &str) -> ControllerResult<()>;

    /// Remove a class (no-op if absent)
    ///
    /// # Errors
    ///
    /// Returns error if the host rejects the class token
    fn remove_class(&self, class: &str) -> ControllerResult<()>;

    /// Flip a class, returning whether it is present afterwards
    ///
    /// # Errors
    ///
    /// Returns error if the host rejects the class token
    fn toggle_class(&self, class: &str) -> ControllerResult<bool>;

    /// Set an inline style property
    ///
    /// # Errors
    ///
    /// Returns error if the element has no inline style or the host rejects it
    fn set_style(&self, property: &str, value: &str) -> ControllerResult<()>;

    /// Current value of a form control; empty for other elements
    fn value(&self) -> String;

    /// Replace the text content
    fn set_text(&self, text: &str);

    /// Move keyboard focus to the element
    ///
    /// # Errors
    ///
    /// Returns error if the element cannot take focus
    fn focus(&self) -> ControllerResult<()>;

    /// Scroll the element into the viewport
    fn scroll_into_view(&self, options: ScrollOptions);

    /// Detach the element from the document
    fn remove(&self);
}

/// Hosting document capability
pub trait Document: Clone + 'static {
    /// Element handle type
    type Element: Element;

    /// Element with the given id, if connected
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// All connected elements matching a selector, in document order
    fn query_all(&self, selector: &Selector) -> Vec<Self::Element>;

    /// Create a detached element
    ///
    /// # Errors
    ///
    /// Returns error if the host cannot create the element
    fn create_element(&self, tag: &str) -> ControllerResult<Self::Element>;

    /// Append an element to the document body
    ///
    /// # Errors
    ///
    /// Returns error if there is no body or the append fails
    fn append_to_body(&self, element: &Self::Element) -> ControllerResult<()>;

    /// Register an event listener for the lifetime of the page
    ///
    /// # Errors
    ///
    /// Returns error if the host refuses the listener
    fn listen(
        &self,
        target: &Self::Element,
        kind: EventKind,
        listener: Listener,
    ) -> ControllerResult<()>;

    /// Run `task` once after `delay`
    ///
    /// # Errors
    ///
    /// Returns error if the timer cannot be scheduled
    fn set_timeout(&self, delay: Duration, task: Task) -> ControllerResult<()>;

    /// Observe viewport intersections of `targets` with a single observer
    ///
    /// # Errors
    ///
    /// Returns error if the observer cannot be created
    fn observe_intersections(
        &self,
        targets: &[Self::Element],
        callback: IntersectionCallback<Self::Element>,
    ) -> ControllerResult<()>;

    /// Navigate the page to `url`
    ///
    /// # Errors
    ///
    /// Returns error if the host refuses the navigation
    fn navigate(&self, url: &str) -> ControllerResult<()>;

    /// Current parsing phase
    fn ready_state(&self) -> ReadyState;

    /// Run `task` once when parsing finishes
    ///
    /// # Errors
    ///
    /// Returns error if the host refuses the listener
    fn on_content_loaded(&self, task: Task) -> ControllerResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_names() {
        assert_eq!(EventKind::Click.as_str(), "click");
        assert_eq!(EventKind::Submit.as_str(), "submit");
        assert_eq!(EventKind::MouseEnter.to_string(), "mouseenter");
        assert_eq!(EventKind::MouseLeave.to_string(), "mouseleave");
    }

    #[test]
    fn test_listener_event_prevent_default() {
        let mut event = ListenerEvent::new(EventKind::Submit);
        assert_eq!(event.kind(), EventKind::Submit);
        assert!(!event.is_default_prevented());
        event.prevent_default();
        event.prevent_default();
        assert!(event.is_default_prevented());
    }

    #[test]
    fn test_selector_css() {
        assert_eq!(Selector::class("video-card").to_css(), ".video-card");
        assert_eq!(Selector::tag_with_attr("img", "data-src").to_css(), "img[data-src]");
        assert_eq!(
            Selector::tag_with_attr_prefix("a", "href", "#").to_string(),
            "a[href^=\"#\"]"
        );
    }

    #[test]
    fn test_selector_css_escapes_quotes() {
        let selector = Selector::tag_with_attr_prefix("a", "title", "say \"hi\"");
        assert_eq!(selector.to_css(), "a[title^=\"say \\\"hi\\\"\"]");
    }

    #[test]
    fn test_selector_css_escapes_backslash() {
        let selector = Selector::tag_with_attr_prefix("a", "href", "#dir\\");
        assert_eq!(selector.to_css(), "a[href^=\"#dir\\\\\"]");

        let selector = Selector::tag_with_attr_prefix("a", "href", "\\\"");
        assert_eq!(selector.to_css(), "a[href^=\"\\\\\\\"\"]");
    }

    #[test]
    fn test_scroll_options() {
        let options = ScrollOptions::default();
        assert_eq!(options, ScrollOptions::SMOOTH_START);
        assert_eq!(options.behavior, ScrollBehavior::Smooth);
        assert_eq!(options.block, ScrollBlock::Start);
        assert_eq!(ScrollBehavior::default(), ScrollBehavior::Auto);
    }

    #[test]
    fn test_scroll_options_from_json() {
        let options: ScrollOptions = serde_json::from_str(r#"{"block": "center"}"#).unwrap();
        assert_eq!(options.behavior, ScrollBehavior::Smooth);
        assert_eq!(options.block, ScrollBlock::Center);

        let options: ScrollOptions =
            serde_json::from_str(r#"{"behavior": "auto", "block": "nearest"}"#).unwrap();
        assert_eq!(options.behavior, ScrollBehavior::Auto);
        assert_eq!(options.block, ScrollBlock::Nearest);
        assert!(serde_json::from_str::<ScrollOptions>(r#"{"block": "middle"}"#).is_err());
    }

    #[test]
    fn test_ready_state_from_host() {
        assert_eq!(ReadyState::from_host("loading"), ReadyState::Loading);
        assert_eq!(ReadyState::from_host("interactive"), ReadyState::Interactive);
        assert_eq!(ReadyState::from_host("complete"), ReadyState::Complete);
        assert_eq!(ReadyState::from_host(""), ReadyState::Complete);
        assert!(ReadyState::Loading.is_loading());
        assert!(!ReadyState::Interactive.is_loading());
        assert!(!ReadyState::Complete.is_loading());
    }
}
