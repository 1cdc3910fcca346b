//! Snap decisions for dragged components.
//!
//! All geometry uses integer pixels, so a sensor range of zero only matches an
//! exact hit on an anchor or a position inside an area.

use crate::config::{SnapConfig, SnapTarget};
use crate::position::PositionCoordinates;
use serde::Serialize;

/// Result of a snap decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnapDecision {
    /// The position to apply to the component.
    pub position: PositionCoordinates,
    /// Index of the selected target in the config, if snapped.
    pub target: Option<usize>,
}

impl SnapDecision {
    /// A decision that leaves the component free at `position`.
    pub fn free(position: PositionCoordinates) -> Self {
        Self {
            position,
            target: None,
        }
    }

    /// A decision that locks the component onto target `index`.
    pub fn snapped(position: PositionCoordinates, index: usize) -> Self {
        Self {
            position,
            target: Some(index),
        }
    }

    /// Check if the component is locked onto a target.
    pub fn is_snapped(&self) -> bool {
        self.target.is_some()
    }
}

/// Squared sensor range. Saturates instead of overflowing for huge ranges.
fn sensor_range_sq(range: u32) -> i64 {
    let range = i64::from(range);
    range.saturating_mul(range)
}

/// Find the first target, in declared order, whose trigger region is within
/// `sensor_range` of `position`.
pub fn find_target(
    position: PositionCoordinates,
    config: &SnapConfig,
) -> Option<(usize, &SnapTarget)> {
    let range_sq = sensor_range_sq(config.sensor_range());
    config
        .targets()
        .iter()
        .enumerate()
        .find(|(_, target)| target.region.distance_sq(position) <= range_sq)
}

/// Map a proposed drag position to the position that should be applied.
///
/// The proposal is first clamped to the configured bounds. If a target is in
/// range the decision snaps to that target's output, otherwise the clamped
/// proposal is returned unchanged.
pub fn decide(proposed: PositionCoordinates, config: &SnapConfig) -> SnapDecision {
    let proposed = match config.bounds() {
        Some(bounds) => bounds.clamp(proposed),
        None => proposed,
    };

    match find_target(proposed, config) {
        Some((index, target)) => {
            log::debug!(
                "Snapping {:?} to target {} ({})",
                proposed,
                index,
                target.label.as_deref().unwrap_or("unnamed")
            );
            SnapDecision::snapped(target.output, index)
        }
        None => SnapDecision::free(proposed),
    }
}
