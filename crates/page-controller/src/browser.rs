//! Browser bindings
//!
//! Implements the document seam over `web-sys` and exports the WASM entry
//! points. Listener and observer closures are handed to the JS heap with
//! `Closure::forget`, since they live as long as the page. Log events go to
//! the devtools console.

// Note: This module is already conditionally compiled via #[cfg(feature = "wasm")] in lib.rs

use std::cell::RefCell;
use std::time::Duration;

use tracing::{warn, Level};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    console, HtmlElement, HtmlInputElement, IntersectionObserver, IntersectionObserverEntry,
};

use crate::config::ControllerConfig;
use crate::controller::PageController;
use crate::dom::{
    Document, Element, EventKind, IntersectionCallback, IntersectionEntry, Listener,
    ListenerEvent, ReadyState, ScrollBehavior, ScrollBlock, ScrollOptions, Selector, Task,
    Unobserve,
};
use crate::error::{ControllerError, ControllerResult};
use crate::logging::{self, LineWriter};
use crate::toast::ToastKind;

/// Id of the optional `<script type="application/json">` holding configuration
pub const CONFIG_ELEMENT_ID: &str = "page-controller-config";

thread_local! {
    static CONTROLLER: RefCell<Option<PageController<BrowserDocument>>> = const { RefCell::new(None) };
}

fn js_error(operation: &'static str, value: &JsValue) -> ControllerError {
    let message = value.as_string().unwrap_or_else(|| format!("{value:?}"));
    ControllerError::host(operation, message)
}

fn to_js(err: ControllerError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// The page's window and document
#[derive(Debug, Clone)]
pub struct BrowserDocument {
    window: web_sys::Window,
    document: web_sys::Document,
}

impl BrowserDocument {
    /// Binds to the global window
    ///
    /// # Errors
    ///
    /// Returns error when running outside a window with a document
    pub fn from_window() -> ControllerResult<Self> {
        let window = web_sys::window().ok_or(ControllerError::NoDocument)?;
        let document = window.document().ok_or(ControllerError::NoDocument)?;
        Ok(Self { window, document })
    }

    /// Reads the embedded JSON configuration, falling back to defaults
    ///
    /// # Errors
    ///
    /// Returns error if the embedded JSON is malformed
    pub fn read_config(&self) -> ControllerResult<ControllerConfig> {
        match self
            .document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|script| script.text_content())
        {
            Some(json) => ControllerConfig::from_json(&json),
            None => Ok(ControllerConfig::default()),
        }
    }
}

/// Handle to a DOM element
#[derive(Debug, Clone)]
pub struct BrowserElement(web_sys::Element);

impl BrowserElement {
    fn html(&self, operation: &'static str) -> ControllerResult<&HtmlElement> {
        self.0
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| ControllerError::host(operation, "not an HTML element"))
    }
}

impl Element for BrowserElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) -> ControllerResult<()> {
        self.0
            .set_attribute(name, value)
            .map_err(|e| js_error("setAttribute", &e))
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) -> ControllerResult<()> {
        self.0
            .class_list()
            .add_1(class)
            .map_err(|e| js_error("classList.add", &e))
    }

    fn remove_class(&self, class: &str) -> ControllerResult<()> {
        self.0
            .class_list()
            .remove_1(class)
            .map_err(|e| js_error("classList.remove", &e))
    }

    fn toggle_class(&self, class: &str) -> ControllerResult<bool> {
        self.0
            .class_list()
            .toggle(class)
            .map_err(|e| js_error("classList.toggle", &e))
    }

    fn set_style(&self, property: &str, value: &str) -> ControllerResult<()> {
        self.html("style")?
            .style()
            .set_property(property, value)
            .map_err(|e| js_error("style.setProperty", &e))
    }

    fn value(&self) -> String {
        self.0
            .dyn_ref::<HtmlInputElement>()
            .map(HtmlInputElement::value)
            .unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn focus(&self) -> ControllerResult<()> {
        self.html("focus")?
            .focus()
            .map_err(|e| js_error("focus", &e))
    }

    fn scroll_into_view(&self, options: ScrollOptions) {
        let host = web_sys::ScrollIntoViewOptions::new();
        host.set_behavior(match options.behavior {
            ScrollBehavior::Auto => web_sys::ScrollBehavior::Auto,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        host.set_block(match options.block {
            ScrollBlock::Start => web_sys::ScrollLogicalPosition::Start,
            ScrollBlock::Center => web_sys::ScrollLogicalPosition::Center,
            ScrollBlock::End => web_sys::ScrollLogicalPosition::End,
            ScrollBlock::Nearest => web_sys::ScrollLogicalPosition::Nearest,
        });
        self.0.scroll_into_view_with_scroll_into_view_options(&host);
    }

    fn remove(&self) {
        self.0.remove();
    }
}

struct BrowserUnobserve(IntersectionObserver);

impl Unobserve<BrowserElement> for BrowserUnobserve {
    fn unobserve(&self, target: &BrowserElement) {
        self.0.unobserve(&target.0);
    }
}

impl Document for BrowserDocument {
    type Element = BrowserElement;

    fn element_by_id(&self, id: &str) -> Option<BrowserElement> {
        self.document.get_element_by_id(id).map(BrowserElement)
    }

    fn query_all(&self, selector: &Selector) -> Vec<BrowserElement> {
        let list = match self.document.query_selector_all(&selector.to_css()) {
            Ok(list) => list,
            Err(e) => {
                warn!(%selector, error = ?e, "query failed");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(BrowserElement)
            .collect()
    }

    fn create_element(&self, tag: &str) -> ControllerResult<BrowserElement> {
        self.document
            .create_element(tag)
            .map(BrowserElement)
            .map_err(|e| js_error("createElement", &e))
    }

    fn append_to_body(&self, element: &BrowserElement) -> ControllerResult<()> {
        let body = self.document.body().ok_or(ControllerError::NoDocument)?;
        body.append_child(&element.0)
            .map_err(|e| js_error("appendChild", &e))?;
        Ok(())
    }

    fn listen(
        &self,
        target: &BrowserElement,
        kind: EventKind,
        mut listener: Listener,
    ) -> ControllerResult<()> {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let mut seen = ListenerEvent::new(kind);
            listener(&mut seen);
            if seen.is_default_prevented() {
                event.prevent_default();
            }
        });
        target
            .0
            .add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref())
            .map_err(|e| js_error("addEventListener", &e))?;
        closure.forget();
        Ok(())
    }

    fn set_timeout(&self, delay: Duration, task: Task) -> ControllerResult<()> {
        let callback = Closure::once_into_js(move || task());
        let delay_ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                delay_ms,
            )
            .map_err(|e| js_error("setTimeout", &e))?;
        Ok(())
    }

    fn observe_intersections(
        &self,
        targets: &[BrowserElement],
        mut callback: IntersectionCallback<BrowserElement>,
    ) -> ControllerResult<()> {
        let closure = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |records: js_sys::Array, observer: IntersectionObserver| {
                let entries: Vec<IntersectionEntry<BrowserElement>> = records
                    .iter()
                    .filter_map(|record| record.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| IntersectionEntry {
                        target: BrowserElement(entry.target()),
                        is_intersecting: entry.is_intersecting(),
                    })
                    .collect();
                callback(&entries, &BrowserUnobserve(observer));
            },
        );
        let observer = IntersectionObserver::new(closure.as_ref().unchecked_ref())
            .map_err(|e| js_error("IntersectionObserver", &e))?;
        for target in targets {
            observer.observe(&target.0);
        }
        closure.forget();
        Ok(())
    }

    fn navigate(&self, url: &str) -> ControllerResult<()> {
        self.window
            .location()
            .set_href(url)
            .map_err(|e| js_error("location.href", &e))
    }

    fn ready_state(&self) -> ReadyState {
        ReadyState::from_host(&self.document.ready_state())
    }

    fn on_content_loaded(&self, task: Task) -> ControllerResult<()> {
        let callback = Closure::once_into_js(move || task());
        self.document
            .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
            .map_err(|e| js_error("addEventListener", &e))
    }
}

fn console_line(line: &str) {
    console::log_1(&line.into());
}

fn install_console_logging() {
    let subscriber = logging::subscriber(|| LineWriter::new(console_line), Level::INFO);
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        console::warn_1(&"page controller: tracing subscriber already installed".into());
    }
}

fn with_controller<T>(
    f: impl FnOnce(&PageController<BrowserDocument>) -> ControllerResult<T>,
) -> Result<T, JsValue> {
    let installed = CONTROLLER.with(|slot| slot.borrow().clone());
    let controller = match installed {
        Some(controller) => controller,
        None => PageController::new(BrowserDocument::from_window().map_err(to_js)?),
    };
    f(&controller).map_err(to_js)
}

/// Wires the controller once the document structure is parsed
///
/// # Errors
///
/// Returns error if there is no document, the embedded configuration is
/// malformed, or initialization fails
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    install_console_logging();

    let doc = BrowserDocument::from_window().map_err(to_js)?;
    let config = doc.read_config().map_err(to_js)?;
    let controller = PageController::with_config(doc, config);
    CONTROLLER.with(|slot| *slot.borrow_mut() = Some(controller.clone()));

    controller.start().map_err(to_js)?;
    Ok(())
}

/// Shows the loading spinner
///
/// # Errors
///
/// Returns error if the spinner cannot be updated
#[wasm_bindgen(js_name = showLoading)]
pub fn show_loading() -> Result<(), JsValue> {
    with_controller(|c| c.show_loading().map(drop))
}

/// Hides the loading spinner
///
/// # Errors
///
/// Returns error if the spinner cannot be updated
#[wasm_bindgen(js_name = hideLoading)]
pub fn hide_loading() -> Result<(), JsValue> {
    with_controller(|c| c.hide_loading().map(drop))
}

/// Shows a toast; `kind` is `"info"` (default), `"success"` or `"error"`
///
/// # Errors
///
/// Returns error if the toast cannot be created or scheduled
#[wasm_bindgen(js_name = showToast)]
pub fn show_toast(message: &str, kind: Option<String>) -> Result<(), JsValue> {
    let kind = kind.as_deref().map_or(ToastKind::Info, ToastKind::from_tag);
    with_controller(|c| c.show_toast(message, kind).map(drop))
}

/// Filters video cards by category, returning how many remain visible
///
/// # Errors
///
/// Returns error if a card cannot be restyled
#[wasm_bindgen(js_name = filterVideosByCategory)]
pub fn filter_videos_by_category(category: Option<String>) -> Result<usize, JsValue> {
    with_controller(|c| c.filter_by_category(category.as_deref()))
}
