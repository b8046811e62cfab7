//! Controller configuration
//!
//! Every element id, class, attribute and timing constant the controller
//! depends on lives here. The defaults match the site markup; a page can
//! override any subset through JSON.

use crate::dom::ScrollOptions;
use crate::error::ControllerResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Element ids the controller looks up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    /// Button that opens the mobile menu
    pub menu_button: String,
    /// Mobile menu panel
    pub menu: String,
    /// Button that opens the mobile search panel
    pub mobile_search_button: String,
    /// Mobile search panel
    pub mobile_search: String,
    /// Mobile search text input
    pub mobile_search_input: String,
    /// Mobile search form
    pub mobile_search_form: String,
    /// Desktop search text input
    pub search_input: String,
    /// Desktop search form
    pub search_form: String,
    /// Loading spinner
    pub spinner: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            menu_button: "mobile-menu-button".to_string(),
            menu: "mobile-menu".to_string(),
            mobile_search_button: "mobile-search-btn".to_string(),
            mobile_search: "mobile-search".to_string(),
            mobile_search_input: "mobile-search-input".to_string(),
            mobile_search_form: "mobile-search-form".to_string(),
            search_input: "search-input".to_string(),
            search_form: "search-form".to_string(),
            spinner: "loading-spinner".to_string(),
        }
    }
}

/// Class names and attributes shared with the stylesheet and markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markup {
    /// Class whose presence hides an element
    pub hidden_class: String,
    /// Class carried by images that have not loaded yet
    pub lazy_class: String,
    /// Class of video cards
    pub card_class: String,
    /// Class of category filter links
    pub category_link_class: String,
    /// Attribute holding a category tag
    pub category_attr: String,
    /// Attribute holding a deferred image source
    pub deferred_src_attr: String,
    /// Category tag that matches every card
    pub all_category: String,
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            hidden_class: "hidden".to_string(),
            lazy_class: "lazy".to_string(),
            card_class: "video-card".to_string(),
            category_link_class: "category-link".to_string(),
            category_attr: "data-category".to_string(),
            deferred_src_attr: "data-src".to_string(),
            all_category: "all".to_string(),
        }
    }
}

/// Full controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Element ids
    pub ids: ElementIds,
    /// Classes and attributes
    pub markup: Markup,
    /// Path of the server-side search endpoint
    pub search_path: String,
    /// Name of the query parameter carrying the search text
    pub search_param: String,
    /// Delay before focusing the mobile search input (milliseconds)
    pub focus_delay_ms: u64,
    /// Lifetime of a toast notification (milliseconds)
    pub toast_duration_ms: u64,
    /// Transform applied to a hovered card
    pub hover_transform: String,
    /// Transform restored when the pointer leaves a card
    pub rest_transform: String,
    /// How in-page anchors scroll to their target
    pub scroll: ScrollOptions,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            ids: ElementIds::default(),
            markup: Markup::default(),
            search_path: "/search/".to_string(),
            search_param: "q".to_string(),
            focus_delay_ms: 100,
            toast_duration_ms: 3000,
            hover_transform: "translateY(-4px)".to_string(),
            rest_transform: "translateY(0)".to_string(),
            scroll: ScrollOptions::SMOOTH_START,
        }
    }
}

impl ControllerConfig {
    /// Create a config with site defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON; omitted fields keep their defaults
    ///
    /// # Errors
    ///
    /// Returns error if the JSON is malformed or has wrongly typed fields
    pub fn from_json(json: &str) -> ControllerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Focus delay as a duration
    #[must_use]
    pub const fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }

    /// Toast lifetime as a duration
    #[must_use]
    pub const fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}
