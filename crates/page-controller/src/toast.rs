//! Toast notifications

use crate::dom::{Document, Element};
use crate::error::ControllerResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classes shared by every toast
const TOAST_BASE: &str = "fixed top-4 right-4 z-50 p-4 rounded-lg shadow-lg";

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// Neutral information
    #[default]
    Info,
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
}

impl ToastKind {
    /// Parses a severity tag; unknown tags fall back to [`ToastKind::Info`]
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "success" => Self::Success,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }

    /// Severity tag
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// Background class for this severity
    #[must_use]
    pub const fn background(self) -> &'static str {
        match self {
            Self::Info => "bg-blue-600",
            Self::Success => "bg-green-600",
            Self::Error => "bg-red-600",
        }
    }

    /// Full class list of a toast with this severity
    #[must_use]
    pub fn class_name(self) -> String {
        format!("{TOAST_BASE} {} text-white", self.background())
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creates a detached toast element carrying `message`
///
/// # Errors
///
/// Returns error if the host cannot create or style the element
pub fn build_toast<D: Document>(
    doc: &D,
    message: &str,
    kind: ToastKind,
) -> ControllerResult<D::Element> {
    let toast = doc.create_element("div")?;
    for class in kind.class_name().split_whitespace() {
        toast.add_class(class)?;
    }
    toast.set_text(message);
    Ok(toast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDocument;

    #[test]
    fn test_from_tag() {
        assert_eq!(ToastKind::from_tag("success"), ToastKind::Success);
        assert_eq!(ToastKind::from_tag("error"), ToastKind::Error);
        assert_eq!(ToastKind::from_tag("info"), ToastKind::Info);
        assert_eq!(ToastKind::from_tag("warning"), ToastKind::Info);
        assert_eq!(ToastKind::from_tag("Success"), ToastKind::Info);
        assert_eq!(ToastKind::default(), ToastKind::Info);
    }

    #[test]
    fn test_class_names() {
        assert_eq!(
            ToastKind::Success.class_name(),
            "fixed top-4 right-4 z-50 p-4 rounded-lg shadow-lg bg-green-600 text-white"
        );
        assert!(ToastKind::Error.class_name().contains("bg-red-600"));
        assert!(ToastKind::Info.class_name().contains("bg-blue-600"));
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ToastKind::Error).unwrap(), "\"error\"");
        let kind: ToastKind = serde_json::from_str("\"success\"").unwrap();
        assert_eq!(kind, ToastKind::Success);
    }

    #[test]
    fn test_build_toast_is_detached() {
        let doc = MockDocument::new();
        let toast = build_toast(&doc, "Saved!", ToastKind::Success).unwrap();
        assert_eq!(toast.tag(), "div");
        assert_eq!(toast.text(), "Saved!");
        assert_eq!(toast.class_name(), ToastKind::Success.class_name());
        assert!(!toast.is_connected());
    }
}
