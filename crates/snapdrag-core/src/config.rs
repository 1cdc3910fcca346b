//! Per-component drag and snap configuration.

use crate::position::{PositionCoordinates, round_px};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which persisted axis an attribute name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Left,
    Top,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Left => f.write_str("left"),
            Axis::Top => f.write_str("top"),
        }
    }
}

/// Configuration errors, raised when a [`SnapConfig`] is constructed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Empty attribute name for {axis} axis")]
    EmptyAttributeName { axis: Axis },
    #[error("Left and top share the attribute name: {0}")]
    DuplicateAttributeName(String),
    #[error("Sensor range must not be negative: {0}")]
    NegativeSensorRange(i64),
    #[error("Invalid snap region: {0}")]
    InvalidRegion(String),
    #[error("Config parse error: {0}")]
    Parse(String),
}

/// An axis-aligned pixel rectangle (edges inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    /// Create new bounds.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Convert a float rectangle, rounding edges to whole pixels.
    pub fn from_rect(rect: kurbo::Rect) -> Self {
        let rect = rect.abs();
        Self {
            left: round_px(rect.x0),
            top: round_px(rect.y0),
            right: round_px(rect.x1),
            bottom: round_px(rect.y1),
        }
    }

    /// Whether the edges are ordered (`left <= right`, `top <= bottom`).
    pub fn is_valid(&self) -> bool {
        self.left <= self.right && self.top <= self.bottom
    }

    /// Check if a position lies inside or on the edge.
    pub fn contains(&self, p: PositionCoordinates) -> bool {
        p.left >= self.left && p.left <= self.right && p.top >= self.top && p.top <= self.bottom
    }

    /// Clamp a position into the rectangle.
    pub fn clamp(&self, p: PositionCoordinates) -> PositionCoordinates {
        PositionCoordinates::new(
            p.left.clamp(self.left, self.right),
            p.top.clamp(self.top, self.bottom),
        )
    }

    /// Squared distance from a position to the nearest point of the rectangle.
    /// Zero when contained.
    pub fn distance_sq(&self, p: PositionCoordinates) -> i64 {
        p.distance_sq(self.clamp(p))
    }
}

/// The region a proposed position is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerRegion {
    /// A single point, matched by Euclidean distance.
    Anchor(PositionCoordinates),
    /// A rectangle, matched by containment or distance to its nearest edge.
    Area(Bounds),
}

impl TriggerRegion {
    /// Convert a float rectangle into an area region.
    pub fn from_rect(rect: kurbo::Rect) -> Self {
        TriggerRegion::Area(Bounds::from_rect(rect))
    }

    /// Squared distance from a position to this region.
    pub fn distance_sq(&self, p: PositionCoordinates) -> i64 {
        match self {
            TriggerRegion::Anchor(anchor) => p.distance_sq(*anchor),
            TriggerRegion::Area(bounds) => bounds.distance_sq(p),
        }
    }
}

/// A place a component can lock onto while dragged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapTarget {
    /// Region that triggers the snap.
    pub region: TriggerRegion,
    /// Position applied to the component while locked.
    pub output: PositionCoordinates,
    /// Optional name for diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SnapTarget {
    /// Create a target with an explicit region and output position.
    pub fn new(region: TriggerRegion, output: PositionCoordinates) -> Self {
        Self {
            region,
            output,
            label: None,
        }
    }

    /// A target that snaps onto the anchor point itself.
    pub fn anchor(point: PositionCoordinates) -> Self {
        Self::new(TriggerRegion::Anchor(point), point)
    }

    /// Attach a diagnostic label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// What happens to the persisted free position when a drag ends snapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapReleasePolicy {
    /// Forget the previous free position.
    #[default]
    ClearCache,
    /// Leave the previous free position untouched.
    KeepCache,
}

/// Immutable drag/snap configuration owned by a single component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SnapConfigSpec", into = "SnapConfigSpec")]
pub struct SnapConfig {
    left_attr: String,
    top_attr: String,
    sensor_range: u32,
    targets: Vec<SnapTarget>,
    bounds: Option<Bounds>,
    must_snap: bool,
    release_policy: SnapReleasePolicy,
}

impl SnapConfig {
    /// Start building a configuration persisting to the given attribute names.
    pub fn builder(left_attr: impl Into<String>, top_attr: impl Into<String>) -> SnapConfigBuilder {
        SnapConfigBuilder::new(left_attr, top_attr)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let spec: SnapConfigSpec =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::try_from(spec)
    }

    /// Attribute holding the persisted left coordinate.
    pub fn left_attr(&self) -> &str {
        &self.left_attr
    }

    /// Attribute holding the persisted top coordinate.
    pub fn top_attr(&self) -> &str {
        &self.top_attr
    }

    /// Snap tolerance in pixels.
    pub fn sensor_range(&self) -> u32 {
        self.sensor_range
    }

    /// Candidate targets in priority order.
    pub fn targets(&self) -> &[SnapTarget] {
        &self.targets
    }

    /// Optional drag bounds.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Whether a move that finds no target keeps the last position.
    pub fn must_snap(&self) -> bool {
        self.must_snap
    }

    /// Cache policy for a snapped release.
    pub fn release_policy(&self) -> SnapReleasePolicy {
        self.release_policy
    }

    /// Whether this config persists to `name`.
    pub fn owns_attr(&self, name: &str) -> bool {
        self.left_attr == name || self.top_attr == name
    }
}

/// Builder for [`SnapConfig`]. Validation happens in [`SnapConfigBuilder::build`].
#[derive(Debug, Clone)]
pub struct SnapConfigBuilder {
    spec: SnapConfigSpec,
}

impl SnapConfigBuilder {
    fn new(left_attr: impl Into<String>, top_attr: impl Into<String>) -> Self {
        Self {
            spec: SnapConfigSpec {
                left_attr: left_attr.into(),
                top_attr: top_attr.into(),
                sensor_range: 0,
                targets: Vec::new(),
                bounds: None,
                must_snap: false,
                release_policy: SnapReleasePolicy::default(),
            },
        }
    }

    /// Set the snap tolerance in pixels.
    pub fn sensor_range(mut self, range: i64) -> Self {
        self.spec.sensor_range = range;
        self
    }

    /// Append a snap target. Earlier targets win ties.
    pub fn target(mut self, target: SnapTarget) -> Self {
        self.spec.targets.push(target);
        self
    }

    /// Append several snap targets in order.
    pub fn targets(mut self, targets: impl IntoIterator<Item = SnapTarget>) -> Self {
        self.spec.targets.extend(targets);
        self
    }

    /// Constrain proposed positions to `bounds`.
    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.spec.bounds = Some(bounds);
        self
    }

    /// Keep the last position when no target is in range.
    pub fn must_snap(mut self, must_snap: bool) -> Self {
        self.spec.must_snap = must_snap;
        self
    }

    /// Choose what a snapped release does to the cache.
    pub fn release_policy(mut self, policy: SnapReleasePolicy) -> Self {
        self.spec.release_policy = policy;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<SnapConfig, ConfigError> {
        SnapConfig::try_from(self.spec)
    }
}

/// Serialized form of [`SnapConfig`], validated on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapConfigSpec {
    left_attr: String,
    top_attr: String,
    #[serde(default)]
    sensor_range: i64,
    #[serde(default)]
    targets: Vec<SnapTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bounds: Option<Bounds>,
    #[serde(default)]
    must_snap: bool,
    #[serde(default)]
    release_policy: SnapReleasePolicy,
}

impl TryFrom<SnapConfigSpec> for SnapConfig {
    type Error = ConfigError;

    fn try_from(spec: SnapConfigSpec) -> Result<Self, Self::Error> {
        if spec.left_attr.trim().is_empty() {
            return Err(ConfigError::EmptyAttributeName { axis: Axis::Left });
        }
        if spec.top_attr.trim().is_empty() {
            return Err(ConfigError::EmptyAttributeName { axis: Axis::Top });
        }
        if spec.left_attr == spec.top_attr {
            return Err(ConfigError::DuplicateAttributeName(spec.left_attr));
        }
        if spec.sensor_range < 0 {
            return Err(ConfigError::NegativeSensorRange(spec.sensor_range));
        }
        if let Some(bounds) = spec.bounds {
            if !bounds.is_valid() {
                return Err(ConfigError::InvalidRegion(format!("drag bounds {:?}", bounds)));
            }
        }
        for (index, target) in spec.targets.iter().enumerate() {
            if let TriggerRegion::Area(area) = target.region {
                if !area.is_valid() {
                    return Err(ConfigError::InvalidRegion(format!(
                        "target {} area {:?}",
                        index, area
                    )));
                }
            }
        }

        Ok(SnapConfig {
            left_attr: spec.left_attr,
            top_attr: spec.top_attr,
            sensor_range: u32::try_from(spec.sensor_range).unwrap_or(u32::MAX),
            targets: spec.targets,
            bounds: spec.bounds,
            must_snap: spec.must_snap,
            release_policy: spec.release_policy,
        })
    }
}

impl From<SnapConfig> for SnapConfigSpec {
    fn from(config: SnapConfig) -> Self {
        Self {
            left_attr: config.left_attr,
            top_attr: config.top_attr,
            sensor_range: i64::from(config.sensor_range),
            targets: config.targets,
            bounds: config.bounds,
            must_snap: config.must_snap,
            release_policy: config.release_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = SnapConfig::builder("data-x", "data-y").build().unwrap();
        assert_eq!(config.left_attr(), "data-x");
        assert_eq!(config.top_attr(), "data-y");
        assert_eq!(config.sensor_range(), 0);
        assert!(config.targets().is_empty());
        assert!(config.bounds().is_none());
        assert!(!config.must_snap());
        assert_eq!(config.release_policy(), SnapReleasePolicy::ClearCache);
    }

    #[test]
    fn test_rejects_negative_sensor_range() {
        let err = SnapConfig::builder("data-x", "data-y")
            .sensor_range(-1)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::NegativeSensorRange(-1));
    }

    #[test]
    fn test_rejects_empty_attribute_names() {
        let err = SnapConfig::builder("", "data-y").build().unwrap_err();
        assert_eq!(err, ConfigError::EmptyAttributeName { axis: Axis::Left });

        let err = SnapConfig::builder("data-x", "  ").build().unwrap_err();
        assert_eq!(err, ConfigError::EmptyAttributeName { axis: Axis::Top });
    }

    #[test]
    fn test_rejects_shared_attribute_name() {
        let err = SnapConfig::builder("data-pos", "data-pos").build().unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateAttributeName(name) if name == "data-pos"));
    }

    #[test]
    fn test_rejects_inverted_area() {
        let err = SnapConfig::builder("data-x", "data-y")
            .target(SnapTarget::new(
                TriggerRegion::Area(Bounds::new(10, 10, 0, 20)),
                PositionCoordinates::ZERO,
            ))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRegion(_)));
    }

    #[test]
    fn test_empty_targets_allowed() {
        let config = SnapConfig::builder("data-x", "data-y")
            .sensor_range(15)
            .build()
            .unwrap();
        assert_eq!(config.sensor_range(), 15);
        assert!(config.targets().is_empty());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "left_attr": "data-dock-left",
            "top_attr": "data-dock-top",
            "sensor_range": 10,
            "targets": [
                { "region": { "anchor": { "left": 100, "top": 100 } },
                  "output": { "left": 100, "top": 100 },
                  "label": "top-left" },
                { "region": { "area": { "left": 0, "top": 500, "right": 800, "bottom": 600 } },
                  "output": { "left": 0, "top": 560 } }
            ],
            "release_policy": "keep_cache"
        }"#;
        let config = SnapConfig::from_json(json).unwrap();
        assert_eq!(config.targets().len(), 2);
        assert_eq!(config.targets()[0].label.as_deref(), Some("top-left"));
        assert_eq!(config.release_policy(), SnapReleasePolicy::KeepCache);
    }

    #[test]
    fn test_from_json_validates() {
        let json = r#"{ "left_attr": "x", "top_attr": "y", "sensor_range": -5 }"#;
        assert_eq!(
            SnapConfig::from_json(json).unwrap_err(),
            ConfigError::NegativeSensorRange(-5)
        );
        assert!(matches!(
            SnapConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_targets_keep_declared_order() {
        let config = SnapConfig::builder("data-x", "data-y")
            .sensor_range(10)
            .target(SnapTarget::anchor(PositionCoordinates::new(0, 0)).with_label("first"))
            .targets([
                SnapTarget::anchor(PositionCoordinates::new(50, 0)).with_label("second"),
                SnapTarget::anchor(PositionCoordinates::new(100, 0)),
            ])
            .build()
            .unwrap();

        let labels: Vec<_> = config.targets().iter().map(|t| t.label.as_deref()).collect();
        assert_eq!(labels, vec![Some("first"), Some("second"), None]);
    }

    #[test]
    fn test_serde_roundtrip_through_spec() {
        let config = SnapConfig::builder("data-x", "data-y")
            .sensor_range(8)
            .target(SnapTarget::anchor(PositionCoordinates::new(5, 5)))
            .bounds(Bounds::new(0, 0, 640, 480))
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let back: SnapConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_bounds_distance_and_clamp() {
        let b = Bounds::new(0, 0, 100, 50);
        assert_eq!(b.distance_sq(PositionCoordinates::new(50, 25)), 0);
        assert_eq!(b.distance_sq(PositionCoordinates::new(103, 54)), 25);
        assert_eq!(
            b.clamp(PositionCoordinates::new(-10, 70)),
            PositionCoordinates::new(0, 50)
        );
        assert!(b.contains(PositionCoordinates::new(100, 50)));
    }

    #[test]
    fn test_region_from_kurbo_rect() {
        let region = TriggerRegion::from_rect(kurbo::Rect::new(10.2, 20.6, 0.0, 40.0));
        assert_eq!(region, TriggerRegion::Area(Bounds::new(0, 21, 10, 40)));
    }
}
