//! Page Interaction Controller
//!
//! Wires the site's independent behaviours onto a [`Document`] once its
//! structure is available. Each `bind_*` operation looks up its targets when
//! called; a missing target leaves that behaviour unbound without error.
//! Handlers cannot return errors to the host, so host failures inside them
//! are logged and dropped.

use crate::config::ControllerConfig;
use crate::dom::{
    Document, Element, EventKind, IntersectionEntry, ListenerEvent, Selector, Unobserve,
};
use crate::error::ControllerResult;
use crate::filter::CategoryFilter;
use crate::search;
use crate::toast::{self, ToastKind};
use crate::{lazy, visibility};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// What [`PageController::init`] managed to bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BindingReport {
    /// Mobile menu button and panel present
    pub menu_toggle: bool,
    /// Mobile search button and panel present
    pub search_toggle: bool,
    /// Desktop search form and input present
    pub desktop_search: bool,
    /// Mobile search form and input present
    pub mobile_search: bool,
    /// Video cards given hover handlers
    pub hover_cards: usize,
    /// Category links given filter handlers
    pub category_links: usize,
    /// In-page anchors given smooth-scroll handlers
    pub anchors: usize,
    /// Images registered for lazy loading
    pub lazy_images: usize,
}

/// Controller bound to one document
#[derive(Clone)]
pub struct PageController<D: Document> {
    doc: D,
    config: Rc<ControllerConfig>,
}

impl<D: Document> fmt::Debug for PageController<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageController")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<D: Document> PageController<D> {
    /// Creates a controller with site defaults
    #[must_use]
    pub fn new(doc: D) -> Self {
        Self::with_config(doc, ControllerConfig::default())
    }

    /// Creates a controller with a custom configuration
    #[must_use]
    pub fn with_config(doc: D, config: ControllerConfig) -> Self {
        Self {
            doc,
            config: Rc::new(config),
        }
    }

    /// Returns the document
    #[must_use]
    pub fn document(&self) -> &D {
        &self.doc
    }

    /// Returns the configuration
    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Initializes now if the document structure is available, otherwise
    /// once parsing finishes
    ///
    /// Returns the report when initialization ran immediately and `None`
    /// when it was deferred. A deferred initialization logs its outcome.
    ///
    /// # Errors
    ///
    /// Returns error if immediate initialization fails or the host refuses
    /// the content-loaded listener
    pub fn start(&self) -> ControllerResult<Option<BindingReport>> {
        if !self.doc.ready_state().is_loading() {
            return self.init().map(Some);
        }

        let controller = self.clone();
        self.doc.on_content_loaded(Box::new(move || {
            if let Err(err) = controller.init() {
                warn!(%err, "page controller initialization failed");
            }
        }))?;
        debug!("initialization deferred until content loaded");
        Ok(None)
    }

    /// Registers every behaviour whose targets exist
    ///
    /// # Errors
    ///
    /// Returns error if the host refuses a listener or observer
    pub fn init(&self) -> ControllerResult<BindingReport> {
        let ids = &self.config.ids;
        let report = BindingReport {
            menu_toggle: self.bind_menu_toggle()?,
            search_toggle: self.bind_search_toggle()?,
            desktop_search: self.bind_search_submit(&ids.search_form, &ids.search_input)?,
            mobile_search: self
                .bind_search_submit(&ids.mobile_search_form, &ids.mobile_search_input)?,
            hover_cards: self.bind_card_hover()?,
            category_links: self.bind_category_filter()?,
            anchors: self.bind_smooth_scroll()?,
            lazy_images: self.bind_lazy_images()?,
        };
        info!(?report, "page controller initialized");
        Ok(report)
    }

    /// Menu button flips the menu panel's hidden marker
    ///
    /// # Errors
    ///
    /// Returns error if the host refuses the listener
    pub fn bind_menu_toggle(&self) -> ControllerResult<bool> {
        let ids = &self.config.ids;
        let (Some(button), Some(menu)) = (
            self.doc.element_by_id(&ids.menu_button),
            self.doc.element_by_id(&ids.menu),
        ) else {
            debug!("menu toggle not bound: button or panel missing");
            return Ok(false);
        };

        let config = Rc::clone(&self.config);
        self.doc.listen(
            &button,
            EventKind::Click,
            Box::new(move |_event| {
                if let Err(err) = visibility::toggle_hidden(&menu, &config.markup.hidden_class) {
                    warn!(%err, "menu toggle failed");
                }
            }),
        )?;
        Ok(true)
    }

    /// Search button flips the mobile search panel and focuses its input
    /// shortly after the panel opens
    ///
    /// # Errors
    ///
    /// Returns error if the host refuses the listener
    pub fn bind_search_toggle(&self) -> ControllerResult<bool> {
        let ids = &self.config.ids;
        let (Some(button), Some(panel)) = (
            self.doc.element_by_id(&ids.mobile_search_button),
            self.doc.element_by_id(&ids.mobile_search),
        ) else {
            debug!("search toggle not bound: button or panel missing");
            return Ok(false);
        };

        let doc = self.doc.clone();
        let config = Rc::clone(&self.config);
        self.doc.listen(
            &button,
            EventKind::Click,
            Box::new(move |_event| {
                match visibility::toggle_hidden(&panel, &config.markup.hidden_class) {
                    Ok(true) => schedule_focus(&doc, &config),
                    Ok(false) => {}
                    Err(err) => warn!(%err, "search panel toggle failed"),
                }
            }),
        )?;
        Ok(true)
    }

    /// Form submission redirects to the search endpoint with the trimmed query
    ///
    /// Default submission is always suppressed; blank queries go nowhere.
    ///
    /// # Errors
    ///
    /// Returns error if the host refuses the listener
    pub fn bind_search_submit(&self, form_id: &str, input_id: &str) -> ControllerResult<bool> {
        let (Some(form), Some(input)) =
            (self.doc.element_by_id(form_id), self.doc.element_by_id(input_id))
        else {
            debug!(form_id, input_id, "search submit not bound: form or input missing");
            return Ok(false);
        };

        let doc = self.doc.clone();
        let config = Rc::clone(&self.config);
        self.doc.listen(
            &form,
            EventKind::Submit,
            Box::new(move |event: &mut ListenerEvent| {
                event.prevent_default();
                let Some(url) =
                    search::search_url(&config.search_path, &config.search_param, &input.value())
                else {
                    return;
                };
                debug!(%url, "search submitted");
                if let Err(err) = doc.navigate(&url) {
                    warn!(%err, "search navigation failed");
                }
            }),
        )?;
        Ok(true)
    }

    /// Video cards lift while hovered
    ///
    /// # Errors
    ///
    /// Returns error if the host refuses a listener
    pub fn bind_card_hover(&self) -> ControllerResult<usize> {
        let cards = self
            .doc
            .query_all(&Selector::class(&self.config.markup.card_class));

        for card in &cards {
            for (kind, transform) in [
                (EventKind::MouseEnter, self.config.hover_transform.clone()),
                (EventKind::MouseLeave, self.config.rest_transform.clone()),
            ] {
                let target = card.clone();
                self.doc.listen(
                    card,
                    kind,
                    Box::new(move |_event| {
                        if let Err(err) = target.set_style("transform", &transform) {
                            warn!(%err, "card hover transform failed");
                        }
                    }),
                )?;
            }
        }
        Ok(cards.len())
    }

    /// Category links filter the video cards instead of navigating
    ///
    /// # Errors
    ///
    /// Returns error if the host refuses a listener
    pub fn bind_category_filter(&self) -> ControllerResult<usize> {
        let links = self
            .doc
            .query_all(&Selector::class(&self.config.markup.category_link_class));

        for link in &links {
            let controller = self.clone();
            let source = link.clone();
            self.doc.listen(
                link,
                EventKind::Click,
                Box::new(move |event: &mut ListenerEvent| {
                    event.prevent_default();
                    let category = source.attribute(&controller.config.markup.category_attr);
                    if let Err(err) = controller.filter_by_category(category.as_deref()) {
                        warn!(%err, "category filter failed");
                    }
                }),
            )?;
        }
        Ok(links.len())
    }

    /// In-page anchors scroll smoothly to their target
    ///
    /// Default navigation is suppressed even when the fragment names no
    /// element, in which case nothing scrolls.
    ///
    /// # Errors
    ///
    /// Returns error if the host refuses a listener
    pub fn bind_smooth_scroll(&self) -> ControllerResult<usize> {
        let anchors = self
            .doc
            .query_all(&Selector::tag_with_attr_prefix("a", "href", "#"));

        for anchor in &anchors {
            let doc = self.doc.clone();
            let scroll = self.config.scroll;
            let source = anchor.clone();
            self.doc.listen(
                anchor,
                EventKind::Click,
                Box::new(move |event: &mut ListenerEvent| {
                    event.prevent_default();
                    let href = source.attribute("href").unwrap_or_default();
                    match resolve_fragment(&doc, &href) {
                        Some(target) => target.scroll_into_view(scroll),
                        None => debug!(%href, "anchor target not found"),
                    }
                }),
            )?;
        }
        Ok(anchors.len())
    }

    /// Images with a deferred source load when they first enter the viewport
    ///
    /// # Errors
    ///
    /// Returns error if the host cannot create the observer
    pub fn bind_lazy_images(&self) -> ControllerResult<usize> {
        let markup = &self.config.markup;
        let images = self
            .doc
            .query_all(&Selector::tag_with_attr("img", &markup.deferred_src_attr));
        if images.is_empty() {
            return Ok(0);
        }

        let config = Rc::clone(&self.config);
        self.doc.observe_intersections(
            &images,
            Box::new(
                move |entries: &[IntersectionEntry<D::Element>],
                      observer: &dyn Unobserve<D::Element>| {
                    let markup = &config.markup;
                    for entry in entries.iter().filter(|entry| entry.is_intersecting) {
                        match lazy::load_deferred(
                            &entry.target,
                            &markup.deferred_src_attr,
                            &markup.lazy_class,
                        ) {
                            Ok(true) => {}
                            Ok(false) => debug!("lazy image lost its deferred source"),
                            Err(err) => warn!(%err, "lazy image load failed"),
                        }
                        observer.unobserve(&entry.target);
                    }
                },
            ),
        )?;
        Ok(images.len())
    }

    /// Shows or hides video cards by category; returns how many are shown
    ///
    /// `Some("all")` (the configured sentinel) shows every card. `None`
    /// matches only cards without a category.
    ///
    /// # Errors
    ///
    /// Returns error if the host rejects a style change
    pub fn filter_by_category(&self, category: Option<&str>) -> ControllerResult<usize> {
        let markup = &self.config.markup;
        let cards = self.doc.query_all(&Selector::class(&markup.card_class));
        let shown = CategoryFilter::new(category, &markup.all_category)
            .apply(&cards, &markup.category_attr)?;
        debug!(?category, shown, total = cards.len(), "cards filtered");
        Ok(shown)
    }

    /// Shows the loading spinner; returns whether it exists
    ///
    /// # Errors
    ///
    /// Returns error if the host rejects the class change
    pub fn show_loading(&self) -> ControllerResult<bool> {
        match self.doc.element_by_id(&self.config.ids.spinner) {
            Some(spinner) => {
                visibility::show(&spinner, &self.config.markup.hidden_class)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Hides the loading spinner; returns whether it exists
    ///
    /// # Errors
    ///
    /// Returns error if the host rejects the class change
    pub fn hide_loading(&self) -> ControllerResult<bool> {
        match self.doc.element_by_id(&self.config.ids.spinner) {
            Some(spinner) => {
                visibility::hide(&spinner, &self.config.markup.hidden_class)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Appends a toast to the body and removes it after the toast lifetime
    ///
    /// # Errors
    ///
    /// Returns error if the toast cannot be created, appended or scheduled
    pub fn show_toast(&self, message: &str, kind: ToastKind) -> ControllerResult<D::Element> {
        let element = toast::build_toast(&self.doc, message, kind)?;
        self.doc.append_to_body(&element)?;

        let expired = element.clone();
        self.doc
            .set_timeout(self.config.toast_duration(), Box::new(move || expired.remove()))?;
        debug!(%kind, text = message, "toast shown");
        Ok(element)
    }
}

fn schedule_focus<D: Document>(doc: &D, config: &ControllerConfig) {
    let lookup = doc.clone();
    let input_id = config.ids.mobile_search_input.clone();
    let scheduled = doc.set_timeout(
        config.focus_delay(),
        Box::new(move || {
            let Some(input) = lookup.element_by_id(&input_id) else {
                return;
            };
            if let Err(err) = input.focus() {
                warn!(%err, "search input focus failed");
            }
        }),
    );
    if let Err(err) = scheduled {
        warn!(%err, "search input focus not scheduled");
    }
}

fn resolve_fragment<D: Document>(doc: &D, href: &str) -> Option<D::Element> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() {
        return None;
    }
    doc.element_by_id(id)
}
