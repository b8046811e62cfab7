//! Hidden-marker primitives shared by the menu, search panel and spinner

use crate::dom::Element;
use crate::error::ControllerResult;

/// Flips the hidden marker, returning whether the element is visible afterwards
///
/// # Errors
///
/// Returns error if the host rejects the class change
pub fn toggle_hidden<E: Element>(element: &E, hidden_class: &str) -> ControllerResult<bool> {
    let hidden = element.toggle_class(hidden_class)?;
    Ok(!hidden)
}

/// Removes the hidden marker
///
/// # Errors
///
/// Returns error if the host rejects the class change
pub fn show<E: Element>(element: &E, hidden_class: &str) -> ControllerResult<()> {
    element.remove_class(hidden_class)
}

/// Adds the hidden marker
///
/// # Errors
///
/// Returns error if the host rejects the class change
pub fn hide<E: Element>(element: &E, hidden_class: &str) -> ControllerResult<()> {
    element.add_class(hidden_class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDocument, MockNode};

    #[test]
    fn test_toggle_reports_visibility() {
        let doc = MockDocument::new();
        let panel = doc.append(MockNode::new("div").with_class("hidden"));
        assert!(toggle_hidden(&panel, "hidden").unwrap());
        assert!(!panel.has_class("hidden"));
        assert!(!toggle_hidden(&panel, "hidden").unwrap());
        assert!(panel.has_class("hidden"));
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let doc = MockDocument::new();
        let panel = doc.append(MockNode::new("div").with_class("other"));
        toggle_hidden(&panel, "hidden").unwrap();
        toggle_hidden(&panel, "hidden").unwrap();
        assert_eq!(panel.classes(), vec!["other"]);
    }

    #[test]
    fn test_show_hide_idempotent() {
        let doc = MockDocument::new();
        let spinner = doc.append(MockNode::new("div").with_class("hidden"));
        show(&spinner, "hidden").unwrap();
        show(&spinner, "hidden").unwrap();
        assert!(!spinner.has_class("hidden"));
        hide(&spinner, "hidden").unwrap();
        hide(&spinner, "hidden").unwrap();
        assert!(spinner.has_class("hidden"));
        assert_eq!(spinner.classes(), vec!["hidden"]);
    }
}
