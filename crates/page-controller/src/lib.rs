//! Page Controller - Interactivity for the video listing site
//!
//! Wires the site's client-side behaviours onto the hosting document:
//! mobile menu and search panel toggles, search submission, category
//! filtering, card hover lift, smooth-scroll anchors, lazy images, the
//! loading spinner and toast notifications.
//!
//! All behaviour is written against the [`Document`](dom::Document) and
//! [`Element`](dom::Element) traits. The `wasm` feature provides the
//! `web-sys` backend and the module start hook; [`MockDocument`](mock::MockDocument)
//! runs the same logic natively for tests. Log events are emitted through
//! `tracing`; [`logging`] formats them for hosts without a terminal.
//!
//! # Example
//!
//! ```rust
//! use page_controller::prelude::*;
//!
//! let doc = MockDocument::site();
//! let controller = PageController::new(doc.clone());
//! let report = controller.init().unwrap();
//! assert!(report.menu_toggle);
//!
//! // Filter the listing down to one category
//! controller.filter_by_category(Some("sports")).unwrap();
//!
//! // Toasts disappear on their own
//! controller.show_toast("Saved!", ToastKind::Success).unwrap();
//! doc.advance(3000);
//! assert!(doc.body_children().is_empty());
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod filter;
pub mod lazy;
pub mod logging;
pub mod search;
pub mod toast;
pub mod visibility;

/// Mock document - always available so behaviour can be exercised without a browser
pub mod mock;

#[cfg(feature = "wasm")]
pub mod browser;

pub use error::{ControllerError, ControllerResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ControllerConfig, ElementIds, Markup};
    pub use crate::controller::{BindingReport, PageController};
    pub use crate::dom::{
        Document, Element, EventKind, IntersectionEntry, ListenerEvent, ReadyState,
        ScrollBehavior, ScrollBlock, ScrollOptions, Selector,
    };
    pub use crate::error::{ControllerError, ControllerResult};
    pub use crate::filter::CategoryFilter;
    pub use crate::mock::{MockDocument, MockElement, MockNode};
    pub use crate::toast::ToastKind;

    #[cfg(feature = "wasm")]
    pub use crate::browser::{BrowserDocument, BrowserElement};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let doc = MockDocument::site();
        let controller = PageController::new(doc);
        assert_eq!(controller.config(), &ControllerConfig::default());
    }

    #[test]
    fn test_controller_over_custom_markup() {
        let mut config = ControllerConfig::default();
        config.markup.card_class = "clip".to_string();
        config.markup.category_attr = "data-genre".to_string();

        let doc = MockDocument::new();
        let clip = doc.append(MockNode::new("div").with_class("clip").with_attr("data-genre", "news"));
        let controller = PageController::with_config(doc, config);
        assert_eq!(controller.filter_by_category(Some("news")).unwrap(), 1);
        assert_eq!(clip.style("display").as_deref(), Some("block"));
    }
}
