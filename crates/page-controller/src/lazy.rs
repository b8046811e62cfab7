//! Deferred image sources

use crate::dom::Element;
use crate::error::ControllerResult;

/// Promotes an image's deferred source to its active `src`
///
/// Returns `false` without touching the image when it has no deferred source.
///
/// # Errors
///
/// Returns error if the host rejects the attribute or class change
pub fn load_deferred<E: Element>(
    image: &E,
    deferred_attr: &str,
    lazy_class: &str,
) -> ControllerResult<bool> {
    let Some(src) = image.attribute(deferred_attr) else {
        return Ok(false);
    };
    image.set_attribute("src", &src)?;
    image.remove_class(lazy_class)?;
    Ok(true)
}
