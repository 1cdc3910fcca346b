//! Persisted free position of a draggable component.
//!
//! The last un-snapped position lives in two attributes on the component's
//! root node, named by its [`SnapConfig`]. These functions never fail: a
//! missing or malformed attribute reads as "no cached position".

use crate::component::Component;
use crate::config::SnapConfig;
use crate::position::{PositionCoordinates, format_px, parse_px};

/// Read the cached free position.
///
/// Returns `Some` only when both attributes are present and both parse. A
/// half-written pair is treated the same as an absent one.
pub fn get<C: Component + ?Sized>(
    component: &C,
    config: &SnapConfig,
) -> Option<PositionCoordinates> {
    let element = component.element();
    let left = element.attr(config.left_attr()).and_then(parse_px);
    let top = element.attr(config.top_attr()).and_then(parse_px);

    if let (Some(left), Some(top)) = (left, top) {
        return Some(PositionCoordinates::new(left, top));
    }

    if element.has_attr(config.left_attr()) || element.has_attr(config.top_attr()) {
        log::debug!(
            "Ignoring malformed cached position ({}={:?}, {}={:?})",
            config.left_attr(),
            element.attr(config.left_attr()),
            config.top_attr(),
            element.attr(config.top_attr())
        );
    }
    None
}

/// Persist a free position, overwriting any previous value.
pub fn set<C: Component + ?Sized>(
    component: &mut C,
    config: &SnapConfig,
    position: PositionCoordinates,
) {
    let element = component.element_mut();
    element.set_attr(config.left_attr(), format_px(position.left));
    element.set_attr(config.top_attr(), format_px(position.top));
}

/// Remove the cached position. Idempotent.
pub fn clear<C: Component + ?Sized>(component: &mut C, config: &SnapConfig) {
    let element = component.element_mut();
    element.remove_attr(config.left_attr());
    element.remove_attr(config.top_attr());
}
