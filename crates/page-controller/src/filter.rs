//! Client-side category filtering of video cards

use crate::dom::Element;
use crate::error::ControllerResult;

/// Inline `display` value for a card that passes the filter
pub const SHOWN: &str = "block";
/// Inline `display` value for a card that fails the filter
pub const FILTERED_OUT: &str = "none";

/// Category selection applied to a set of cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryFilter<'a> {
    selected: Option<&'a str>,
    all: &'a str,
}

impl<'a> CategoryFilter<'a> {
    /// Filter by `selected`, where `all` is the tag matching every card
    ///
    /// `None` stands for a link without a category attribute.
    #[must_use]
    pub const fn new(selected: Option<&'a str>, all: &'a str) -> Self {
        Self { selected, all }
    }

    /// Whether a card tagged `card_category` passes
    ///
    /// Exact, case-sensitive comparison. An untagged selection matches only
    /// untagged cards.
    #[must_use]
    pub fn matches(&self, card_category: Option<&str>) -> bool {
        self.selected == Some(self.all) || self.selected == card_category
    }

    /// Re-evaluates every card, returning how many are shown
    ///
    /// # Errors
    ///
    /// Returns error if the host rejects a style change
    pub fn apply<E: Element>(&self, cards: &[E], category_attr: &str) -> ControllerResult<usize> {
        let mut shown = 0;
        for card in cards {
            let category = card.attribute(category_attr);
            if self.matches(category.as_deref()) {
                card.set_style("display", SHOWN)?;
                shown += 1;
            } else {
                card.set_style("display", FILTERED_OUT)?;
            }
        }
        Ok(shown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, Selector};
    use crate::mock::{MockDocument, MockNode};

    fn displays(doc: &MockDocument) -> Vec<String> {
        doc.query_all(&Selector::class("video-card"))
            .iter()
            .map(|c| c.style("display").unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_matches_all() {
        let filter = CategoryFilter::new(Some("all"), "all");
        assert!(filter.matches(Some("music")));
        assert!(filter.matches(None));
    }

    #[test]
    fn test_matches_exact_case_sensitive() {
        let filter = CategoryFilter::new(Some("music"), "all");
        assert!(filter.matches(Some("music")));
        assert!(!filter.matches(Some("Music")));
        assert!(!filter.matches(Some("music-live")));
        assert!(!filter.matches(None));
    }

    #[test]
    fn test_matches_untagged_selection() {
        let filter = CategoryFilter::new(None, "all");
        assert!(filter.matches(None));
        assert!(!filter.matches(Some("all")));
        assert!(!filter.matches(Some("music")));
    }

    #[test]
    fn test_apply_sets_display() {
        let doc = MockDocument::site();
        let cards = doc.query_all(&Selector::class("video-card"));

        let shown = CategoryFilter::new(Some("music"), "all")
            .apply(&cards, "data-category")
            .unwrap();
        assert_eq!(shown, 2);
        assert_eq!(displays(&doc), vec!["block", "none", "block"]);

        let shown = CategoryFilter::new(Some("all"), "all")
            .apply(&cards, "data-category")
            .unwrap();
        assert_eq!(shown, 3);
        assert_eq!(displays(&doc), vec!["block", "block", "block"]);
    }

    #[test]
    fn test_apply_unknown_category_hides_all() {
        let doc = MockDocument::site();
        let cards = doc.query_all(&Selector::class("video-card"));
        let shown = CategoryFilter::new(Some("news"), "all")
            .apply(&cards, "data-category")
            .unwrap();
        assert_eq!(shown, 0);
        assert_eq!(displays(&doc), vec!["none", "none", "none"]);
    }

    #[test]
    fn test_apply_untagged_card() {
        let doc = MockDocument::new();
        let untagged = doc.append(MockNode::new("div").with_class("video-card"));
        let cards = vec![untagged.clone()];
        CategoryFilter::new(Some("music"), "all")
            .apply(&cards, "data-category")
            .unwrap();
        assert_eq!(untagged.style("display").as_deref(), Some("none"));
    }
}
